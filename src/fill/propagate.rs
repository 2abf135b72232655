//! Node and arc consistency over slot domains.
//!
//! A slot's domain starts as the whole vocabulary. Node consistency drops
//! every word of the wrong length; AC-3 then drops every word that has no
//! partner in a crossing slot's domain, until nothing else can be dropped.

use crate::puzzle::{Puzzle, VarId, WordId};
use log::debug;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Candidate words for each slot. Only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    domains: Vec<Vec<WordId>>,
}

impl Domains {
    pub fn new(puzzle: &Puzzle) -> Domains {
        let all: Vec<WordId> = (0..puzzle.words().len()).collect();
        Domains {
            domains: vec![all; puzzle.variables().len()],
        }
    }

    pub fn get(&self, var: VarId) -> &[WordId] {
        &self.domains[var]
    }

    pub fn len(&self, var: VarId) -> usize {
        self.domains[var].len()
    }

    /// The first slot left without candidates, if any.
    pub fn first_empty(&self) -> Option<VarId> {
        self.domains.iter().position(|domain| domain.is_empty())
    }
}

pub struct Propagator<'s> {
    puzzle: &'s Puzzle,
    domains: Domains,
    revisions: usize,
}

impl<'s> Propagator<'s> {
    pub fn new(puzzle: &'s Puzzle) -> Propagator<'s> {
        Propagator {
            puzzle,
            domains: Domains::new(puzzle),
            revisions: 0,
        }
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn into_domains(self) -> Domains {
        self.domains
    }

    /// How many calls to `revise` removed something.
    pub fn revisions(&self) -> usize {
        self.revisions
    }

    /// Removes every word whose length differs from its slot's.
    pub fn enforce_node_consistency(&mut self) {
        let puzzle = self.puzzle;
        for (var, domain) in self.domains.domains.iter_mut().enumerate() {
            let length = puzzle.variable(var).length;
            domain.retain(|&word| puzzle.word(word).len() == length);
        }
    }

    /// Makes `x` arc consistent with `y`: drops every word of `x` that no word
    /// of `y` agrees with at their crossing. Returns whether anything was
    /// dropped.
    pub fn revise(&mut self, x: VarId, y: VarId) -> bool {
        let (i, j) = match self.puzzle.overlap(x, y) {
            Some(overlap) => overlap,
            None => return false,
        };

        let puzzle = self.puzzle;
        // words too short to reach the crossing support nothing and are dropped
        let supported: FxHashSet<char> = self.domains.domains[y]
            .iter()
            .filter_map(|&word| puzzle.word(word).get(j))
            .collect();

        let domain = &mut self.domains.domains[x];
        let before = domain.len();
        domain.retain(|&word| {
            puzzle
                .word(word)
                .get(i)
                .map_or(false, |letter| supported.contains(&letter))
        });

        let revised = domain.len() != before;
        if revised {
            self.revisions += 1;
        }
        revised
    }

    /// Runs AC-3 starting from `arcs`, or from every crossing when `None`.
    /// Returns false as soon as a domain empties.
    pub fn ac3(&mut self, arcs: Option<Vec<(VarId, VarId)>>) -> bool {
        let mut queue: VecDeque<(VarId, VarId)> = match arcs {
            Some(arcs) => arcs.into_iter().collect(),
            None => self.puzzle.arcs().collect(),
        };
        debug!("ac3 starting with {} arcs", queue.len());

        let mut processed = 0;
        while let Some((x, y)) = queue.pop_front() {
            processed += 1;
            if !self.revise(x, y) {
                continue;
            }
            if self.domains.len(x) == 0 {
                debug!(
                    "ac3 emptied the domain of {} after {} arcs",
                    self.puzzle.variable(x),
                    processed
                );
                return false;
            }
            for &v in self.puzzle.neighbors(x) {
                if v != x && v != y {
                    queue.push_back((v, x));
                }
            }
        }

        debug!("ac3 reached a fixed point after {} arcs", processed);
        true
    }
}

use std::time::Instant;

use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    order::{order_domain_values, select_unassigned_variable},
    puzzle::Puzzle,
};

use super::{
    cache::CachedLetterCounts,
    propagate::{Domains, Propagator},
    Assignment, FillError, FillOptions, Filler, PartialAssignment, Statistics,
    INTERRUPT_FREQUENCY,
};

/// Node and arc consistency once up front, then depth first search with
/// MRV/degree slot selection and least-constraining-value word ordering.
pub struct BacktrackingFiller {
    options: FillOptions,
    statistics: Statistics,
}

impl BacktrackingFiller {
    pub fn new(options: FillOptions) -> BacktrackingFiller {
        BacktrackingFiller {
            options,
            statistics: Statistics::default(),
        }
    }

    /// Counters from the most recent `fill`.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

impl Default for BacktrackingFiller {
    fn default() -> BacktrackingFiller {
        BacktrackingFiller::new(FillOptions::default())
    }
}

impl Filler for BacktrackingFiller {
    fn fill(&mut self, puzzle: &Puzzle) -> Result<Assignment, FillError> {
        self.statistics = Statistics::default();
        let start = Instant::now();
        let deadline = self.options.timeout.map(|timeout| start + timeout);

        let mut propagator = Propagator::new(puzzle);
        propagator.enforce_node_consistency();
        let mut wiped_out = propagator.domains().first_empty();
        if wiped_out.is_none() && !propagator.ac3(None) {
            wiped_out = propagator.domains().first_empty();
        }
        self.statistics.revisions = propagator.revisions();
        self.statistics.propagation_time = start.elapsed();

        if let Some(var) = wiped_out {
            let variable = *puzzle.variable(var);
            info!("No candidates left for {} before search", variable);
            return Err(FillError::Propagation { variable });
        }

        let rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let search_start = Instant::now();
        let mut search = Search {
            puzzle,
            domains: propagator.into_domains(),
            letter_counts: CachedLetterCounts::new(),
            assignment: PartialAssignment::new(puzzle.variables().len()),
            rng,
            deadline,
            statistics: &mut self.statistics,
        };
        let result = search.backtrack();
        let assignment = search.assignment.to_assignment(puzzle);

        self.statistics.search_time = search_start.elapsed();
        debug!(
            "Search expanded {} states with {} backtracks in {}ms",
            self.statistics.states,
            self.statistics.backtracks,
            self.statistics.search_time.as_millis()
        );

        match result {
            Ok(()) => {
                info!("Filled {} slots", assignment.len());
                Ok(assignment)
            }
            Err(err) => {
                info!("Fill failed: {}", err);
                Err(err)
            }
        }
    }
}

struct Search<'s> {
    puzzle: &'s Puzzle,
    domains: Domains,
    letter_counts: CachedLetterCounts,
    assignment: PartialAssignment,
    rng: StdRng,
    deadline: Option<Instant>,
    statistics: &'s mut Statistics,
}

impl Search<'_> {
    /// Extends `self.assignment` to a complete one. On `Ok` the assignment is
    /// complete; on `Err` it is exactly what it was on entry.
    fn backtrack(&mut self) -> Result<(), FillError> {
        if self.assignment.is_complete() {
            return Ok(());
        }

        self.statistics.states += 1;
        if self.statistics.states % INTERRUPT_FREQUENCY == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Err(FillError::Timeout);
                }
            }
        }

        let var = match select_unassigned_variable(
            self.puzzle,
            &self.domains,
            &self.assignment,
            &mut self.rng,
        ) {
            Some(var) => var,
            None => return Ok(()),
        };

        let candidates = order_domain_values(
            self.puzzle,
            &self.domains,
            &self.assignment,
            &mut self.letter_counts,
            var,
        );

        for word in candidates {
            if !self.assignment.fits(self.puzzle, var, word) {
                continue;
            }

            trace!(
                "Trying {} at {}",
                self.puzzle.word(word).as_str(),
                self.puzzle.variable(var)
            );
            self.assignment.assign(var, word);
            match self.backtrack() {
                Ok(()) => return Ok(()),
                Err(FillError::Exhausted) => {
                    self.assignment.unassign(var);
                    self.statistics.backtracks += 1;
                }
                Err(err) => {
                    self.assignment.unassign(var);
                    return Err(err);
                }
            }
        }

        Err(FillError::Exhausted)
    }
}

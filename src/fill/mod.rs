use crate::{
    parse::Variable,
    puzzle::{Puzzle, VarId, WordId},
    FxHashMap,
};
use rustc_hash::FxHashSet;
use std::{error::Error, fmt, time::Duration};

pub mod backtrack;
pub mod cache;
pub mod propagate;

/// How many search states we expand between deadline checks.
pub const INTERRUPT_FREQUENCY: usize = 64;

pub trait Filler {
    fn fill(&mut self, puzzle: &Puzzle) -> Result<Assignment, FillError>;
}

/// A (possibly partial) mapping from slots to words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    words: FxHashMap<Variable, String>,
}

impl Assignment {
    pub fn insert(&mut self, variable: Variable, word: String) -> Option<String> {
        self.words.insert(variable, word)
    }

    pub fn get(&self, variable: &Variable) -> Option<&str> {
        self.words.get(variable).map(|word| word.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &String)> {
        self.words.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    /// Node or arc consistency left this slot without candidates.
    Propagation { variable: Variable },
    /// Every candidate for every slot was tried.
    Exhausted,
    Timeout,
}

impl FillError {
    /// True when the puzzle has no fill, however that was discovered.
    pub fn is_unsatisfiable(&self) -> bool {
        !matches!(self, FillError::Timeout)
    }
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::Propagation { variable } => {
                write!(f, "no solution: no candidates left for {}", variable)
            }
            FillError::Exhausted => write!(f, "no solution: search exhausted"),
            FillError::Timeout => write!(f, "gave up after reaching the deadline"),
        }
    }
}

impl Error for FillError {}

#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    /// Seeds tie-breaking between equally good slots. Entropy when absent.
    pub seed: Option<u64>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub revisions: usize,
    pub states: usize,
    pub backtracks: usize,
    pub propagation_time: Duration,
    pub search_time: Duration,
}

/// The assignment as the search sees it: word ids by slot id, plus the set of
/// words already placed.
#[derive(Debug, Clone)]
pub(crate) struct PartialAssignment {
    slots: Vec<Option<WordId>>,
    used: FxHashSet<WordId>,
}

impl PartialAssignment {
    pub(crate) fn new(variable_count: usize) -> PartialAssignment {
        PartialAssignment {
            slots: vec![None; variable_count],
            used: FxHashSet::default(),
        }
    }

    pub(crate) fn is_assigned(&self, var: VarId) -> bool {
        self.slots[var].is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.used.len()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.len() == self.slots.len()
    }

    pub(crate) fn assign(&mut self, var: VarId, word: WordId) {
        debug_assert!(self.slots[var].is_none());
        self.slots[var] = Some(word);
        self.used.insert(word);
    }

    pub(crate) fn unassign(&mut self, var: VarId) {
        if let Some(word) = self.slots[var].take() {
            self.used.remove(&word);
        }
    }

    /// Would the assignment stay consistent with `var` set to `word`? The rest
    /// of the assignment is assumed consistent already.
    pub(crate) fn fits(&self, puzzle: &Puzzle, var: VarId, word: WordId) -> bool {
        let candidate = puzzle.word(word);
        if candidate.len() != puzzle.variable(var).length || self.used.contains(&word) {
            return false;
        }

        puzzle.neighbors(var).iter().all(|&neighbor| {
            match (self.slots[neighbor], puzzle.overlap(var, neighbor)) {
                (Some(other), Some((i, j))) => candidate.letter(i) == puzzle.word(other).letter(j),
                _ => true,
            }
        })
    }

    pub(crate) fn to_assignment(&self, puzzle: &Puzzle) -> Assignment {
        let mut assignment = Assignment::default();
        for (var, word) in self.slots.iter().enumerate() {
            if let Some(word) = word {
                assignment.insert(*puzzle.variable(var), puzzle.word(*word).as_str().to_owned());
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::{FillError, PartialAssignment};
    use crate::{parse::Variable, puzzle::Puzzle, Direction};

    fn crossing() -> Puzzle {
        Puzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
                Variable::new(4, 0, Direction::Across, 3),
            ],
            vec![
                String::from("CAT"),
                String::from("AXE"),
                String::from("TOP"),
                String::from("TOPS"),
            ],
        )
    }

    #[test]
    fn fits_works() {
        let puzzle = crossing();
        let mut partial = PartialAssignment::new(3);

        assert!(partial.fits(&puzzle, 0, 0));
        assert!(!partial.fits(&puzzle, 0, 3));

        partial.assign(0, 0);
        assert!(partial.fits(&puzzle, 1, 1));
        assert!(!partial.fits(&puzzle, 1, 2));
        assert!(!partial.fits(&puzzle, 2, 0));
        assert!(partial.fits(&puzzle, 2, 2));
    }

    #[test]
    fn unassign_restores_state() {
        let puzzle = crossing();
        let mut partial = PartialAssignment::new(3);

        partial.assign(0, 0);
        partial.assign(1, 1);
        assert_eq!(partial.len(), 2);
        assert!(!partial.is_complete());

        partial.unassign(1);
        assert_eq!(partial.len(), 1);
        assert!(!partial.is_assigned(1));
        assert!(partial.fits(&puzzle, 1, 1));

        partial.assign(1, 1);
        partial.assign(2, 2);
        assert!(partial.is_complete());

        let assignment = partial.to_assignment(&puzzle);
        assert!(puzzle.is_consistent(&assignment));
        assert!(puzzle.is_complete(&assignment));
        assert_eq!(assignment.get(puzzle.variable(1)), Some("AXE"));
    }

    #[test]
    fn fill_error_works() {
        let variable = Variable::new(0, 0, Direction::Across, 3);
        assert!(FillError::Propagation { variable }.is_unsatisfiable());
        assert!(FillError::Exhausted.is_unsatisfiable());
        assert!(!FillError::Timeout.is_unsatisfiable());
        assert_eq!(
            FillError::Propagation { variable }.to_string(),
            "no solution: no candidates left for (0, 0) across : 3"
        );
    }
}

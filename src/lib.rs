//! Crossword generation as a constraint satisfaction problem.
//!
//! A [`Crossword`] describes which cells are open. Its slots become the
//! variables of a [`Puzzle`], whose domains are pruned with node and arc
//! consistency before a backtracking search fills them.

pub use rustc_hash::FxHashMap;

pub mod crossword;
pub mod fill;
mod order;
pub mod parse;
pub mod puzzle;

pub use crate::crossword::{Crossword, Direction};
pub use crate::fill::{
    backtrack::BacktrackingFiller, Assignment, FillError, FillOptions, Filler,
};
pub use crate::parse::Variable;
pub use crate::puzzle::Puzzle;

/// Fills every slot of `crossword` from `words` using the default options.
pub fn fill_crossword(crossword: &Crossword, words: Vec<String>) -> Result<Assignment, FillError> {
    let puzzle = Puzzle::from_crossword(crossword, words);
    BacktrackingFiller::default().fill(&puzzle)
}

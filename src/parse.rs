use crate::{Crossword, Direction};
use rustc_hash::FxHashSet;
use std::{fmt, io::Read};

/// One slot of the grid: a maximal run of open cells, across or down.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Variable {
    pub(crate) start_row: usize,
    pub(crate) start_col: usize,
    pub(crate) direction: Direction,
    pub(crate) length: usize,
}

impl Variable {
    pub fn new(start_row: usize, start_col: usize, direction: Direction, length: usize) -> Variable {
        Variable {
            start_row,
            start_col,
            direction,
            length,
        }
    }

    pub fn start_row(&self) -> usize {
        self.start_row
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// The (row, col) of every cell in this slot, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Variable {
            start_row,
            start_col,
            direction,
            length,
        } = *self;

        (0..length).map(move |index| match direction {
            Direction::Across => (start_row, start_col + index),
            Direction::Down => (start_row + index, start_col),
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.start_row, self.start_col, self.direction, self.length
        )
    }
}

/// Every across slot (row by row) followed by every down slot (column by
/// column). Runs of a single open cell aren't slots.
pub fn parse_variables(crossword: &Crossword) -> Vec<Variable> {
    let mut result = vec![];

    for row in 0..crossword.height {
        let mut start_col = None;
        for col in 0..=crossword.width {
            match (crossword.is_open(row, col), start_col) {
                (true, None) => start_col = Some(col),
                (false, Some(start)) => {
                    if col - start > 1 {
                        result.push(Variable::new(row, start, Direction::Across, col - start));
                    }
                    start_col = None;
                }
                _ => {}
            }
        }
    }

    for col in 0..crossword.width {
        let mut start_row = None;
        for row in 0..=crossword.height {
            match (crossword.is_open(row, col), start_row) {
                (true, None) => start_row = Some(row),
                (false, Some(start)) => {
                    if row - start > 1 {
                        result.push(Variable::new(start, col, Direction::Down, row - start));
                    }
                    start_row = None;
                }
                _ => {}
            }
        }
    }

    result
}

/// Reads a newline separated word list. Words are trimmed and uppercased;
/// blank lines and repeats are dropped.
pub fn parse_words(contents: &str) -> Vec<String> {
    dedup(
        contents
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_uppercase()),
    )
}

/// Reads a word list stored as a JSON array of strings.
pub fn parse_words_json<R: Read>(reader: R) -> Result<Vec<String>, String> {
    let words: Vec<String> = serde_json::from_reader(reader)
        .map_err(|err| format!("Word list was not well-formatted JSON: {}", err))?;

    Ok(dedup(
        words
            .into_iter()
            .map(|word| word.trim().to_uppercase())
            .filter(|word| !word.is_empty()),
    ))
}

fn dedup<I: Iterator<Item = String>>(words: I) -> Vec<String> {
    let mut seen = FxHashSet::default();
    words.filter(|word| seen.insert(word.clone())).collect()
}

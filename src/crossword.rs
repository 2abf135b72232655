use crate::fill::Assignment;
use std::fmt;

/// The shape of a puzzle: which cells are open and which are blocked.
#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub struct Crossword {
    pub(crate) open: Vec<bool>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl Crossword {
    /// Parses a grid structure, one line per row. `*` and `#` are blocked cells,
    /// anything else is open, spaces included. Rows shorter than the widest row
    /// are padded with blocked cells.
    pub fn new(contents: String) -> Result<Crossword, String> {
        let lines: Vec<&str> = contents
            .lines()
            .skip_while(|line| line.is_empty())
            .collect();
        let lines = match lines.iter().rposition(|line| !line.is_empty()) {
            Some(last) => &lines[..=last],
            None => return Err(String::from("Crossword structure is empty.")),
        };

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let height = lines.len();

        let mut open = Vec::with_capacity(width * height);
        for line in lines {
            let mut row_length = 0;
            for c in line.chars() {
                open.push(!is_blocked(c));
                row_length += 1;
            }
            for _ in row_length..width {
                open.push(false);
            }
        }

        Ok(Crossword {
            open,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.open[row * self.width + col]
    }

    /// One cell per grid position: the assigned letter, or `None` for blocked
    /// cells and open cells no assigned word covers.
    pub fn letter_grid(&self, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width]; self.height];

        for (variable, word) in assignment.iter() {
            for ((row, col), c) in variable.cells().zip(word.chars()) {
                if self.is_open(row, col) {
                    letters[row][col] = Some(c);
                }
            }
        }

        letters
    }

    /// Text rendering of an assignment laid over this structure.
    pub fn render<'s>(&'s self, assignment: &'s Assignment) -> Rendered<'s> {
        Rendered {
            crossword: self,
            letters: self.letter_grid(assignment),
        }
    }
}

pub(crate) fn is_blocked(c: char) -> bool {
    c == '*' || c == '#'
}

pub struct Rendered<'s> {
    crossword: &'s Crossword,
    letters: Vec<Vec<Option<char>>>,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.crossword.height {
            for col in 0..self.crossword.width {
                if self.crossword.is_open(row, col) {
                    write!(f, "{}", self.letters[row][col].unwrap_or(' '))?;
                } else {
                    write!(f, "█")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

use crate::{
    fill::Assignment,
    parse::{parse_variables, Variable},
    Crossword, Direction, FxHashMap,
};
use rustc_hash::FxHashSet;

/// Index of a variable in `Puzzle::variables`.
pub type VarId = usize;

/// Index of a word in `Puzzle::words`.
pub type WordId = usize;

/// A vocabulary entry, kept as chars so letters can be compared by offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: Vec<char>,
}

impl Word {
    pub fn new(text: String) -> Word {
        let letters = text.chars().collect();
        Word { text, letters }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letter(&self, index: usize) -> char {
        self.letters[index]
    }

    /// Like `letter`, but `None` past the end of the word.
    pub fn get(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }
}

/// Everything the solver needs to know about a puzzle: its slots, which
/// slots cross and where, and the candidate words.
#[derive(Debug, Clone)]
pub struct Puzzle {
    variables: Vec<Variable>,
    index: FxHashMap<Variable, VarId>,
    overlaps: FxHashMap<(VarId, VarId), (usize, usize)>,
    neighbors: Vec<Vec<VarId>>,
    words: Vec<Word>,
}

impl Puzzle {
    /// Builds a puzzle from explicit slots. Overlaps come from the slots'
    /// geometry; repeated words are dropped.
    pub fn new(variables: Vec<Variable>, words: Vec<String>) -> Puzzle {
        let index = variables
            .iter()
            .enumerate()
            .map(|(id, variable)| (*variable, id))
            .collect();

        let mut overlaps = FxHashMap::default();
        let mut neighbors = vec![vec![]; variables.len()];

        for (x, a) in variables.iter().enumerate() {
            for (y, b) in variables.iter().enumerate().skip(x + 1) {
                if let Some((i, j)) = intersect(a, b) {
                    overlaps.insert((x, y), (i, j));
                    overlaps.insert((y, x), (j, i));
                    neighbors[x].push(y);
                    neighbors[y].push(x);
                }
            }
        }

        let mut seen = FxHashSet::default();
        let words = words
            .into_iter()
            .filter(|word| seen.insert(word.clone()))
            .map(Word::new)
            .collect();

        Puzzle {
            variables,
            index,
            overlaps,
            neighbors,
            words,
        }
    }

    pub fn from_crossword(crossword: &Crossword, words: Vec<String>) -> Puzzle {
        Puzzle::new(parse_variables(crossword), words)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    pub fn id_of(&self, variable: &Variable) -> Option<VarId> {
        self.index.get(variable).copied()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id]
    }

    /// `(i, j)` such that letter `i` of `x` is letter `j` of `y`.
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    pub fn neighbors(&self, x: VarId) -> &[VarId] {
        &self.neighbors[x]
    }

    /// Every ordered pair of crossing variables.
    pub fn arcs(&self) -> impl Iterator<Item = (VarId, VarId)> + '_ {
        (0..self.variables.len()).flat_map(move |x| self.neighbors[x].iter().map(move |&y| (x, y)))
    }

    /// Every assigned word fits its slot, no word is used twice, and every
    /// pair of assigned crossing slots agrees on the shared letter.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        let mut used = FxHashSet::default();

        for (variable, word) in assignment.iter() {
            if word.chars().count() != variable.length || !used.insert(word) {
                return false;
            }
        }

        for (variable, word) in assignment.iter() {
            let x = match self.id_of(variable) {
                Some(x) => x,
                None => return false,
            };
            for &y in self.neighbors(x) {
                let other = match assignment.get(&self.variables[y]) {
                    Some(other) => other,
                    None => continue,
                };
                if let Some((i, j)) = self.overlap(x, y) {
                    if word.chars().nth(i) != other.chars().nth(j) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Covers every slot.
    pub fn is_complete(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.variables.len()
            && self
                .variables
                .iter()
                .all(|variable| assignment.get(variable).is_some())
    }
}

fn intersect(a: &Variable, b: &Variable) -> Option<(usize, usize)> {
    let (across, down, swapped) = match (a.direction, b.direction) {
        (Direction::Across, Direction::Down) => (a, b, false),
        (Direction::Down, Direction::Across) => (b, a, true),
        _ => return None,
    };

    let row = across.start_row;
    let col = down.start_col;
    if row < down.start_row
        || row >= down.start_row + down.length
        || col < across.start_col
        || col >= across.start_col + across.length
    {
        return None;
    }

    let i = col - across.start_col;
    let j = row - down.start_row;
    if swapped {
        Some((j, i))
    } else {
        Some((i, j))
    }
}

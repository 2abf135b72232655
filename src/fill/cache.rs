use cached::{Cached, UnboundCache};
use rustc_hash::FxHashMap;

use crate::{
    fill::propagate::Domains,
    puzzle::{Puzzle, VarId},
};

/// How often each letter appears at a given offset across a slot's domain.
///
/// Domains are frozen once search starts, so counts are computed once per
/// (slot, offset) and reused for every value ordering after that.
pub struct CachedLetterCounts {
    counts: UnboundCache<(VarId, usize), FxHashMap<char, usize>>,
}

impl CachedLetterCounts {
    pub fn new() -> CachedLetterCounts {
        CachedLetterCounts {
            counts: UnboundCache::new(),
        }
    }

    /// Words in `var`'s domain with `letter` at `offset`.
    pub fn count(
        &mut self,
        puzzle: &Puzzle,
        domains: &Domains,
        var: VarId,
        offset: usize,
        letter: char,
    ) -> usize {
        let counts = self.counts.cache_get_or_set_with((var, offset), || {
            let mut counts = FxHashMap::default();
            for &word in domains.get(var) {
                *counts.entry(puzzle.word(word).letter(offset)).or_insert(0) += 1;
            }
            counts
        });

        counts.get(&letter).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CachedLetterCounts {
    fn default() -> CachedLetterCounts {
        CachedLetterCounts::new()
    }
}

use crate::{
    fill::{cache::CachedLetterCounts, propagate::Domains, PartialAssignment},
    puzzle::{Puzzle, VarId, WordId},
};
use rand::{seq::SliceRandom, Rng};
use std::cmp::Reverse;

/// Picks the unassigned slot with the fewest candidates left, preferring the
/// one with the most crossings. Any remaining tie is broken at random.
pub(crate) fn select_unassigned_variable<R: Rng>(
    puzzle: &Puzzle,
    domains: &Domains,
    assignment: &PartialAssignment,
    rng: &mut R,
) -> Option<VarId> {
    let key = |var: VarId| (domains.len(var), Reverse(puzzle.neighbors(var).len()));

    let best = (0..puzzle.variables().len())
        .filter(|&var| !assignment.is_assigned(var))
        .map(key)
        .min()?;

    let tied: Vec<VarId> = (0..puzzle.variables().len())
        .filter(|&var| !assignment.is_assigned(var) && key(var) == best)
        .collect();

    tied.choose(rng).copied()
}

/// How many candidates of unassigned crossing slots `word` would rule out if
/// placed in `var`.
pub(crate) fn eliminated(
    puzzle: &Puzzle,
    domains: &Domains,
    assignment: &PartialAssignment,
    letter_counts: &mut CachedLetterCounts,
    var: VarId,
    word: WordId,
) -> usize {
    let candidate = puzzle.word(word);

    puzzle
        .neighbors(var)
        .iter()
        .filter(|&&neighbor| !assignment.is_assigned(neighbor))
        .filter_map(|&neighbor| {
            let (i, j) = puzzle.overlap(var, neighbor)?;
            let agreeing = letter_counts.count(puzzle, domains, neighbor, j, candidate.letter(i));
            Some(domains.len(neighbor) - agreeing)
        })
        .sum()
}

/// `var`'s candidates, least constraining first. Ties keep domain order.
pub(crate) fn order_domain_values(
    puzzle: &Puzzle,
    domains: &Domains,
    assignment: &PartialAssignment,
    letter_counts: &mut CachedLetterCounts,
    var: VarId,
) -> impl Iterator<Item = WordId> {
    let mut scored: Vec<(usize, WordId)> = domains
        .get(var)
        .iter()
        .map(|&word| {
            (
                eliminated(puzzle, domains, assignment, letter_counts, var, word),
                word,
            )
        })
        .collect();

    scored.sort_by_key(|(score, _)| *score);
    scored.into_iter().map(|(_, word)| word)
}

#[cfg(test)]
mod tests {
    use super::{eliminated, order_domain_values, select_unassigned_variable};
    use crate::{
        fill::{cache::CachedLetterCounts, propagate::Propagator, PartialAssignment},
        parse::Variable,
        puzzle::Puzzle,
        Crossword, Direction,
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn fewest_remaining_values_wins() {
        let puzzle = Puzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(2, 0, Direction::Across, 4),
            ],
            words(&["CAT", "DOG", "BIRD"]),
        );
        let mut propagator = Propagator::new(&puzzle);
        propagator.enforce_node_consistency();
        let assignment = PartialAssignment::new(2);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            select_unassigned_variable(&puzzle, propagator.domains(), &assignment, &mut rng),
            Some(1)
        );
    }

    #[test]
    fn degree_breaks_ties() {
        // the down slot crosses both across slots
        let c = Crossword::new(String::from(
            "
___
#_#
___
",
        ))
        .unwrap();
        let puzzle = Puzzle::from_crossword(&c, words(&["CAT", "DOG"]));
        let down = puzzle.id_of(&Variable::new(0, 1, Direction::Down, 3)).unwrap();
        let propagator = Propagator::new(&puzzle);
        let assignment = PartialAssignment::new(3);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                select_unassigned_variable(&puzzle, propagator.domains(), &assignment, &mut rng),
                Some(down)
            );
        }
    }

    #[test]
    fn remaining_ties_pick_among_tied() {
        let puzzle = Puzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(2, 0, Direction::Across, 3),
                Variable::new(4, 0, Direction::Across, 3),
            ],
            words(&["CAT", "DOG", "EMU"]),
        );
        let propagator = Propagator::new(&puzzle);
        let mut assignment = PartialAssignment::new(3);
        assignment.assign(1, 0);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen =
                select_unassigned_variable(&puzzle, propagator.domains(), &assignment, &mut rng)
                    .unwrap();
            assert!(chosen == 0 || chosen == 2);
        }

        assignment.assign(0, 1);
        assignment.assign(2, 2);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            select_unassigned_variable(&puzzle, propagator.domains(), &assignment, &mut rng),
            None
        );
    }

    #[test]
    fn least_constraining_value_first() {
        let puzzle = Puzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ],
            words(&["OXO", "CAT", "ARK", "ASH", "AXE", "TOP"]),
        );
        let propagator = Propagator::new(&puzzle);
        let domains = propagator.domains();
        let assignment = PartialAssignment::new(2);
        let mut counts = CachedLetterCounts::new();

        // three of the six words start with A, none with X
        let cat = 1;
        let oxo = 0;
        assert_eq!(eliminated(&puzzle, domains, &assignment, &mut counts, 0, cat), 3);
        assert_eq!(eliminated(&puzzle, domains, &assignment, &mut counts, 0, oxo), 6);

        let ordered: Vec<String> =
            order_domain_values(&puzzle, domains, &assignment, &mut counts, 0)
                .map(|word| puzzle.word(word).as_str().to_owned())
                .collect();
        assert_eq!(ordered.len(), 6);
        assert_eq!(&ordered[..2], &["CAT", "TOP"]);
        assert_eq!(&ordered[2..], &["OXO", "ARK", "ASH", "AXE"]);
    }

    #[test]
    fn assigned_neighbors_are_not_counted() {
        let puzzle = Puzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ],
            words(&["CAT", "AXE", "TOP"]),
        );
        let propagator = Propagator::new(&puzzle);
        let mut assignment = PartialAssignment::new(2);
        assignment.assign(1, 1);
        let mut counts = CachedLetterCounts::new();

        assert_eq!(
            eliminated(&puzzle, propagator.domains(), &assignment, &mut counts, 0, 2),
            0
        );
    }
}

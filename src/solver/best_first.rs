use super::frontier::{Frontier, PriorityFrontier};
use super::trail::Trail;
use super::{Expander, Limit, Outcome, SearchReport, Tracker};
use crate::engine::Board;
use crate::heuristics::{GoalPositions, Heuristic};
use std::collections::HashSet;

/// Greedy best-first search ordered by `h` alone.
///
/// The visited set is checked lazily when a state is popped, so a state may
/// sit in the frontier several times. The path cost is ignored, so the path
/// found is usually not the shortest.
pub fn best_first(
    start: &Board,
    goal: &Board,
    expander: &mut Expander,
    heuristic: Heuristic,
    goal_positions: &GoalPositions,
    max_nodes: Option<u64>,
) -> SearchReport {
    if start == goal {
        return SearchReport::already_solved();
    }
    let mut tracker = Tracker::new(max_nodes);
    let mut frontier = PriorityFrontier::new();
    let mut visited = HashSet::new();
    frontier.push(heuristic.evaluate(start, goal_positions), (start.clone(), Trail::default()));

    while let Some((board, trail)) = frontier.pop() {
        if tracker.tick() {
            return tracker.finish(Outcome::LimitReached(Limit::Nodes));
        }
        if board == *goal {
            return tracker.finish(Outcome::Solved(trail.to_path()));
        }
        if visited.contains(&board) {
            continue;
        }
        for (mv, next) in expander.expand(&board) {
            if visited.contains(&next) {
                continue;
            }
            let h = heuristic.evaluate(&next, goal_positions);
            frontier.push(h, (next, trail.extend(mv)));
        }
        visited.insert(board);
        tracker.observe(frontier.len());
    }

    tracker.finish(Outcome::Exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MoveOrder;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_best_first_solves_scrambles() {
        let goal = Board::goal(4, 4);
        let positions = GoalPositions::new(&goal);
        let mut rng = SmallRng::seed_from_u64(8);
        for moves in [5, 15, 25] {
            let (start, _) = Board::scrambled(4, 4, moves, &mut rng);
            let mut expander = Expander::new(MoveOrder::default(), None);
            let report = best_first(&start, &goal, &mut expander, Heuristic::Manhattan, &positions, Some(500_000));
            let path = report.outcome.path().unwrap();
            assert_eq!(start.replay(path).unwrap().last(), Some(&goal));
        }
    }

    #[test]
    fn test_best_first_is_deterministic() {
        let goal = Board::goal(4, 4);
        let positions = GoalPositions::new(&goal);
        let (start, _) = Board::scrambled(4, 4, 20, &mut SmallRng::seed_from_u64(2));
        let run = || {
            let mut expander = Expander::new(MoveOrder::default(), None);
            best_first(&start, &goal, &mut expander, Heuristic::Misplaced, &positions, Some(500_000))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_best_first_zero_heuristic_exhausts() {
        let goal = Board::goal(2, 2);
        let positions = GoalPositions::new(&goal);
        let start = Board::from_cells(2, 2, vec![2, 1, 3, 0]).unwrap();
        let mut expander = Expander::new(MoveOrder::default(), None);
        let report = best_first(&start, &goal, &mut expander, Heuristic::Zero, &positions, None);
        assert_eq!(report.outcome, Outcome::Exhausted);
    }
}

use super::{Expander, Limit, Outcome, SearchReport, Tracker};
use crate::engine::{Board, Move, Path};
use log::debug;
use std::collections::HashSet;

enum Descent {
    Found,
    /// The depth bound stopped at least one branch.
    Cutoff,
    /// Every branch ended without reaching the bound.
    Failed,
    NodeLimit,
}

struct DepthLimited<'a> {
    goal: &'a Board,
    expander: &'a mut Expander,
    tracker: Tracker,
    on_path: HashSet<Board>,
    moves: Vec<Move>,
}

impl DepthLimited<'_> {
    fn descend(&mut self, board: &Board, depth: usize) -> Descent {
        if self.tracker.tick() {
            return Descent::NodeLimit;
        }
        if board == self.goal {
            return Descent::Found;
        }
        if depth == 0 {
            return Descent::Cutoff;
        }

        let mut cutoff = false;
        for (mv, next) in self.expander.expand(board) {
            if self.on_path.contains(&next) {
                continue;
            }
            self.on_path.insert(next.clone());
            self.moves.push(mv);
            self.tracker.observe(self.moves.len());
            let result = self.descend(&next, depth - 1);
            self.on_path.remove(&next);
            match result {
                Descent::Found => return Descent::Found,
                Descent::NodeLimit => return Descent::NodeLimit,
                Descent::Cutoff => cutoff = true,
                Descent::Failed => {}
            }
            self.moves.pop();
        }

        if cutoff {
            Descent::Cutoff
        } else {
            Descent::Failed
        }
    }
}

/// Iterative-deepening depth-first search.
///
/// Runs a depth-limited search for every bound from 0 to `max_depth`. Cycles
/// are avoided along the current path only: a state is marked when the search
/// descends into it and unmarked when it backtracks, so the same state may be
/// reached again through another branch.
///
/// # Returns
/// A report whose outcome is
/// - `Solved` at the first bound that reaches the goal (a shortest path),
/// - `Exhausted` if some bound finished without any branch being cut off,
/// - `LimitReached(Depth)` once `max_depth` has been tried,
/// - `LimitReached(Nodes)` when more than `max_nodes` states were visited
///   over all iterations.
pub fn iddfs(
    start: &Board,
    goal: &Board,
    expander: &mut Expander,
    max_depth: usize,
    max_nodes: Option<u64>,
) -> SearchReport {
    if start == goal {
        return SearchReport::already_solved();
    }
    let mut search = DepthLimited {
        goal,
        expander,
        tracker: Tracker::new(max_nodes),
        on_path: HashSet::new(),
        moves: Vec::new(),
    };
    search.on_path.insert(start.clone());

    for depth in 0..=max_depth {
        debug!("depth bound {}, {} nodes so far", depth, search.tracker.nodes);
        match search.descend(start, depth) {
            Descent::Found => {
                let path = Path::from(std::mem::take(&mut search.moves));
                return search.tracker.finish(Outcome::Solved(path));
            }
            Descent::NodeLimit => return search.tracker.finish(Outcome::LimitReached(Limit::Nodes)),
            Descent::Failed => return search.tracker.finish(Outcome::Exhausted),
            Descent::Cutoff => {}
        }
    }

    search.tracker.finish(Outcome::LimitReached(Limit::Depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MoveOrder;
    use crate::solver::bfs;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn expander() -> Expander {
        Expander::new(MoveOrder::default(), Some(0))
    }

    #[test]
    fn test_iddfs_matches_bfs_length() {
        let mut rng = SmallRng::seed_from_u64(21);
        let goal = Board::goal(3, 3);
        for moves in [3, 6, 9] {
            let (start, _) = Board::scrambled(3, 3, moves, &mut rng);
            let deep = iddfs(&start, &goal, &mut expander(), 20, None);
            let wide = bfs(&start, &goal, &mut expander(), None);
            let path = deep.outcome.path().unwrap();
            assert_eq!(path.len(), wide.outcome.path().unwrap().len());
            assert_eq!(start.replay(path).unwrap().last(), Some(&goal));
        }
    }

    #[test]
    fn test_iddfs_depth_limit() {
        let goal = Board::goal(4, 4);
        let start = Board::from_cells(4, 4, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0, 13, 14, 15]).unwrap();
        let report = iddfs(&start, &goal, &mut expander(), 2, None);
        assert_eq!(report.outcome, Outcome::LimitReached(Limit::Depth));

        let report = iddfs(&start, &goal, &mut expander(), 3, None);
        assert_eq!(report.outcome, Outcome::Solved("RRR".parse().unwrap()));
        assert_eq!(report.max_frontier, 3);
    }

    #[test]
    fn test_iddfs_exhausts_small_unreachable_space() {
        // On 2x2 the blank can only cycle; every branch dead-ends on the path set.
        let goal = Board::goal(2, 2);
        let start = Board::from_cells(2, 2, vec![2, 1, 3, 0]).unwrap();
        let report = iddfs(&start, &goal, &mut expander(), 50, None);
        assert_eq!(report.outcome, Outcome::Exhausted);
    }

    #[test]
    fn test_iddfs_node_limit() {
        let goal = Board::goal(4, 4);
        let start = Board::from_cells(4, 4, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0]).unwrap();
        let report = iddfs(&start, &goal, &mut expander(), 50, Some(500));
        assert_eq!(report.outcome, Outcome::LimitReached(Limit::Nodes));
        assert_eq!(report.nodes, 501);
    }
}

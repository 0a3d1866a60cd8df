use super::trail::Trail;
use super::{Expander, Limit, Outcome, SearchReport, Tracker};
use crate::engine::Board;
use std::collections::HashSet;

/// Iterative depth-first search with a global visited set.
///
/// Successors are pushed in reverse so the first direction of the order is
/// explored first. A state joins the visited set once it has been expanded;
/// successors already in the set are not pushed. The first path found is
/// returned, which is usually far from the shortest.
pub fn dfs(start: &Board, goal: &Board, expander: &mut Expander, max_nodes: Option<u64>) -> SearchReport {
    if start == goal {
        return SearchReport::already_solved();
    }
    let mut tracker = Tracker::new(max_nodes);
    let mut stack = vec![(start.clone(), Trail::default())];
    let mut visited = HashSet::new();

    while let Some((board, trail)) = stack.pop() {
        if tracker.tick() {
            return tracker.finish(Outcome::LimitReached(Limit::Nodes));
        }
        if board == *goal {
            return tracker.finish(Outcome::Solved(trail.to_path()));
        }
        for (mv, next) in expander.expand(&board).into_iter().rev() {
            if visited.contains(&next) {
                continue;
            }
            stack.push((next, trail.extend(mv)));
        }
        visited.insert(board);
        tracker.observe(stack.len());
    }

    tracker.finish(Outcome::Exhausted)
}

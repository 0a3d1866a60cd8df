use super::trail::Trail;
use super::{Expander, Limit, Outcome, SearchReport, Tracker};
use crate::engine::Board;
use std::collections::{HashSet, VecDeque};

/// Breadth-first search.
///
/// States are marked visited when they are enqueued and the goal is tested
/// as soon as it is generated, so the first path found is a shortest one.
///
/// # Arguments
/// * `start`, `goal`: the endpoints of the search.
/// * `expander`: successor generator with its order policy.
/// * `max_nodes`: optional cap on the number of dequeued states.
pub fn bfs(start: &Board, goal: &Board, expander: &mut Expander, max_nodes: Option<u64>) -> SearchReport {
    if start == goal {
        return SearchReport::already_solved();
    }
    let mut tracker = Tracker::new(max_nodes);
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    visited.insert(start.clone());
    queue.push_back((start.clone(), Trail::default()));

    while let Some((board, trail)) = queue.pop_front() {
        if tracker.tick() {
            return tracker.finish(Outcome::LimitReached(Limit::Nodes));
        }
        for (mv, next) in expander.expand(&board) {
            if visited.contains(&next) {
                continue;
            }
            if next == *goal {
                return tracker.finish(Outcome::Solved(trail.extend(mv).to_path()));
            }
            visited.insert(next.clone());
            queue.push_back((next, trail.extend(mv)));
        }
        tracker.observe(queue.len());
    }

    tracker.finish(Outcome::Exhausted)
}

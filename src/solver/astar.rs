use super::frontier::{Frontier, PriorityFrontier};
use super::trail::Trail;
use super::{Expander, Limit, Outcome, SearchReport, Tracker};
use crate::engine::Board;
use crate::heuristics::{GoalPositions, Heuristic};
use std::collections::HashMap;

pub(crate) struct Node {
    board: Board,
    trail: Trail,
    g: u32,
}

/// A* search ordered by `f = g + h`.
///
/// With an admissible heuristic the first goal popped lies on a shortest
/// path. See `search_with` for the bookkeeping.
pub fn astar(
    start: &Board,
    goal: &Board,
    expander: &mut Expander,
    heuristic: Heuristic,
    goal_positions: &GoalPositions,
    max_nodes: Option<u64>,
) -> SearchReport {
    search_with(
        PriorityFrontier::new(),
        start,
        goal,
        expander,
        heuristic,
        goal_positions,
        max_nodes,
    )
}

/// A* over an arbitrary frontier.
///
/// `best_g` holds the cheapest known cost of every generated state and
/// `closed` the cost at which each state was expanded. A popped entry whose
/// cost is worse than `best_g` is stale and skipped without removal from the
/// frontier; so is an entry for a state already expanded at no higher cost.
///
/// If the frontier empties after it discarded entries, the search reports
/// `LimitReached(Memory)` instead of `Exhausted`.
pub(crate) fn search_with<F: Frontier<Node>>(
    mut frontier: F,
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
    let mut best_g: HashMap<Board, u32> = HashMap::new();
    let mut closed: HashMap<Board, u32> = HashMap::new();
    best_g.insert(start.clone(), 0);
    frontier.push(
        heuristic.evaluate(start, goal_positions),
        Node {
            board: start.clone(),
            trail: Trail::default(),
            g: 0,
        },
    );

    while let Some(node) = frontier.pop() {
        if tracker.tick() {
            return tracker.finish(Outcome::LimitReached(Limit::Nodes));
        }
        if node.board == *goal {
            return tracker.finish(Outcome::Solved(node.trail.to_path()));
        }
        let g = node.g;
        if best_g.get(&node.board).is_some_and(|&best| g > best) {
            continue;
        }
        if closed.get(&node.board).is_some_and(|&c| c <= g) {
            continue;
        }

        for (mv, next) in expander.expand(&node.board) {
            let tentative = g + 1;
            if closed.get(&next).is_some_and(|&c| tentative >= c) {
                continue;
            }
            if tentative < best_g.get(&next).copied().unwrap_or(u32::MAX) {
                best_g.insert(next.clone(), tentative);
                let f = tentative + heuristic.evaluate(&next, goal_positions);
                frontier.push(
                    f,
                    Node {
                        board: next,
                        trail: node.trail.extend(mv),
                        g: tentative,
                    },
                );
            }
        }
        closed.insert(node.board, g);
        frontier.after_expansion();
        tracker.observe(frontier.len());
    }

    if frontier.dropped() > 0 {
        tracker.finish(Outcome::LimitReached(Limit::Memory))
    } else {
        tracker.finish(Outcome::Exhausted)
    }
}

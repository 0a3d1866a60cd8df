use super::astar::search_with;
use super::frontier::BoundedFrontier;
use super::{Expander, Limit, MemoryPolicy, Outcome, SearchReport, Tracker};
use crate::engine::{Board, Move, Path};
use crate::heuristics::{GoalPositions, Heuristic};
use log::debug;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// f-cost of a node that cannot lead to the goal within the memory cap.
const UNBOUNDED: u32 = u32::MAX;

/// Memory-bounded A*.
///
/// # Arguments
/// * `max_memory`: the cap. With `MemoryPolicy::DropWorst` it bounds the
///   open list; with `MemoryPolicy::Backup` it bounds the number of nodes
///   held in the search tree.
/// * `policy`: what to do when the cap is hit, see `MemoryPolicy`.
///
/// # Returns
/// `LimitReached(Memory)` when the cap made the search give up, which does
/// not prove the goal unreachable.
#[allow(clippy::too_many_arguments)]
pub fn sma_star(
    start: &Board,
    goal: &Board,
    expander: &mut Expander,
    heuristic: Heuristic,
    goal_positions: &GoalPositions,
    max_nodes: Option<u64>,
    max_memory: usize,
    policy: MemoryPolicy,
) -> SearchReport {
    match policy {
        MemoryPolicy::DropWorst => search_with(
            BoundedFrontier::new(max_memory),
            start,
            goal,
            expander,
            heuristic,
            goal_positions,
            max_nodes,
        ),
        MemoryPolicy::Backup => {
            if start == goal {
                return SearchReport::already_solved();
            }
            let tree = BackedUpTree {
                goal,
                expander,
                heuristic,
                goal_positions,
                capacity: max_memory,
                nodes: Vec::new(),
                free: Vec::new(),
                open: BTreeSet::new(),
                live: 0,
                next_seq: 0,
                truncated: false,
                tracker: Tracker::new(max_nodes),
            };
            tree.run(start)
        }
    }
}

/// A successor of a tree node, generated or not.
struct Slot {
    mv: Move,
    board: Board,
    child: Option<usize>,
    /// Backed-up f-cost of a child that was dropped from memory.
    forgotten: Option<u32>,
}

struct TreeNode {
    board: Board,
    parent: Option<usize>,
    mv: Option<Move>,
    depth: u32,
    f: u32,
    seq: u64,
    in_open: bool,
    slots: Vec<Slot>,
}

/// Lowest f first, deepest first among equal f, then oldest.
type OpenKey = (u32, Reverse<u32>, u64, usize);

struct BackedUpTree<'a> {
    goal: &'a Board,
    expander: &'a mut Expander,
    heuristic: Heuristic,
    goal_positions: &'a GoalPositions,
    capacity: usize,
    nodes: Vec<TreeNode>,
    free: Vec<usize>,
    open: BTreeSet<OpenKey>,
    live: usize,
    next_seq: u64,
    /// Set once memory pressure has cut anything off.
    truncated: bool,
    tracker: Tracker,
}

impl BackedUpTree<'_> {
    fn run(mut self, start: &Board) -> SearchReport {
        let slots = self.slots_for(start, None);
        let f = self.heuristic.evaluate(start, self.goal_positions);
        let root = self.alloc(start.clone(), None, None, 0, f, slots);
        self.insert_open(root);

        loop {
            let Some(&(f, _, _, id)) = self.open.first() else {
                return self.tracker.finish(Outcome::Exhausted);
            };
            if f == UNBOUNDED {
                let outcome = if self.truncated {
                    Outcome::LimitReached(Limit::Memory)
                } else {
                    Outcome::Exhausted
                };
                return self.tracker.finish(outcome);
            }
            if self.tracker.tick() {
                return self.tracker.finish(Outcome::LimitReached(Limit::Nodes));
            }
            if self.nodes[id].board == *self.goal {
                let path = self.path_to(id);
                return self.tracker.finish(Outcome::Solved(path));
            }

            let node = &self.nodes[id];
            if node.slots.is_empty() {
                self.backup(id);
                continue;
            }
            if node.slots.iter().all(|s| s.child.is_some()) {
                self.remove_open(id);
                continue;
            }
            if self.live >= self.capacity {
                if !self.forget_worst_leaf(id) {
                    return self.tracker.finish(Outcome::LimitReached(Limit::Memory));
                }
                // the forget may have backed up f-costs above `id`
                continue;
            }
            // never-generated slots first, then the cheapest forgotten one
            let next = self.nodes[id]
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.child.is_none())
                .min_by_key(|(_, s)| s.forgotten.unwrap_or(0))
                .map(|(index, _)| index);
            let Some(index) = next else {
                continue;
            };
            self.generate(id, index);
        }
    }

    fn generate(&mut self, parent: usize, index: usize) {
        let node = &self.nodes[parent];
        let slot = &node.slots[index];
        let board = slot.board.clone();
        let mv = slot.mv;
        let depth = node.depth + 1;
        let h = self.heuristic.evaluate(&board, self.goal_positions);
        let mut f = node.f.max(depth + h).max(slot.forgotten.unwrap_or(0));
        if board != *self.goal && depth as usize >= self.capacity.saturating_sub(1) {
            f = UNBOUNDED;
            self.truncated = true;
        }

        let slots = if f == UNBOUNDED {
            Vec::new()
        } else {
            self.slots_for(&board, Some(parent))
        };
        let child = self.alloc(board, Some(parent), Some(mv), depth, f, slots);
        let slot = &mut self.nodes[parent].slots[index];
        slot.child = Some(child);
        slot.forgotten = None;
        self.insert_open(child);
        self.tracker.observe(self.live);

        if self.nodes[parent].slots.iter().all(|s| s.child.is_some()) {
            self.remove_open(parent);
            self.backup(parent);
        }
    }

    /// Successors of `board` that do not repeat a state on the path from
    /// the root down to `parent`.
    fn slots_for(&mut self, board: &Board, parent: Option<usize>) -> Vec<Slot> {
        let successors = self.expander.expand(board);
        successors
            .into_iter()
            .filter(|(_, next)| !self.on_path(parent, next))
            .map(|(mv, board)| Slot {
                mv,
                board,
                child: None,
                forgotten: None,
            })
            .collect()
    }

    fn on_path(&self, mut cursor: Option<usize>, board: &Board) -> bool {
        while let Some(id) = cursor {
            if self.nodes[id].board == *board {
                return true;
            }
            cursor = self.nodes[id].parent;
        }
        false
    }

    /// Raises the f-cost of `id` to the best of its successors once every
    /// successor is either in memory or remembered, then repeats for the
    /// ancestors while the value keeps changing.
    fn backup(&mut self, mut id: usize) {
        loop {
            let node = &self.nodes[id];
            if node.slots.iter().any(|s| s.child.is_none() && s.forgotten.is_none()) {
                return;
            }
            let best = node
                .slots
                .iter()
                .map(|s| match s.child {
                    Some(child) => self.nodes[child].f,
                    None => s.forgotten.unwrap_or(UNBOUNDED),
                })
                .min()
                .unwrap_or(UNBOUNDED);
            if best <= node.f {
                return;
            }
            let parent = node.parent;
            self.set_f(id, best);
            match parent {
                Some(parent) => id = parent,
                None => return,
            }
        }
    }

    /// Drops the worst open leaf other than `current` and the root, keeping
    /// its f-cost in the parent. Returns `false` if there is none.
    fn forget_worst_leaf(&mut self, current: usize) -> bool {
        let victim = self.open.iter().rev().map(|&(_, _, _, id)| id).find(|&id| {
            let node = &self.nodes[id];
            id != current && node.parent.is_some() && node.slots.iter().all(|s| s.child.is_none())
        });
        let Some(victim) = victim else {
            return false;
        };
        self.remove_open(victim);
        let (parent, f, depth) = {
            let node = &self.nodes[victim];
            (node.parent, node.f, node.depth)
        };
        let Some(parent) = parent else {
            return false;
        };
        debug!("forgetting node at depth {} with f {}", depth, f);

        let slots = &mut self.nodes[parent].slots;
        if let Some(i) = slots.iter().position(|s| s.child == Some(victim)) {
            if f == UNBOUNDED {
                slots.remove(i);
            } else {
                slots[i].child = None;
                slots[i].forgotten = Some(f);
            }
        }
        self.free.push(victim);
        self.live -= 1;
        self.truncated = true;
        self.insert_open(parent);
        self.backup(parent);
        true
    }

    fn alloc(
        &mut self,
        board: Board,
        parent: Option<usize>,
        mv: Option<Move>,
        depth: u32,
        f: u32,
        slots: Vec<Slot>,
    ) -> usize {
        let node = TreeNode {
            board,
            parent,
            mv,
            depth,
            f,
            seq: self.next_seq,
            in_open: false,
            slots,
        };
        self.next_seq += 1;
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn key(&self, id: usize) -> OpenKey {
        let node = &self.nodes[id];
        (node.f, Reverse(node.depth), node.seq, id)
    }

    fn insert_open(&mut self, id: usize) {
        if !self.nodes[id].in_open {
            self.nodes[id].in_open = true;
            self.open.insert(self.key(id));
        }
    }

    fn remove_open(&mut self, id: usize) {
        if self.nodes[id].in_open {
            self.open.remove(&self.key(id));
            self.nodes[id].in_open = false;
        }
    }

    fn set_f(&mut self, id: usize, f: u32) {
        let was_open = self.nodes[id].in_open;
        self.remove_open(id);
        self.nodes[id].f = f;
        if was_open {
            self.insert_open(id);
        }
    }

    fn path_to(&self, id: usize) -> Path {
        let mut moves = Vec::new();
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            moves.extend(node.mv);
            cursor = node.parent;
        }
        moves.reverse();
        Path::from(moves)
    }
}

//! Open-set containers. Each strategy picks one discipline: a LIFO stack, a FIFO queue or a
//! min-heap on a supplied priority.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use num_traits::Zero;

use crate::position::Position;

/// A discovered cell waiting for expansion. `priority` and `cost` are only meaningful to the
/// priority frontier; `cost` is the path cost from the start in steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry<K> {
    pub position: Position,
    pub priority: K,
    pub cost: K,
}

impl<K: Zero> FrontierEntry<K> {
    pub fn start(position: Position) -> FrontierEntry<K> {
        FrontierEntry {
            position,
            priority: Zero::zero(),
            cost: Zero::zero(),
        }
    }
}

pub trait Frontier<K> {
    fn push(&mut self, entry: FrontierEntry<K>);
    fn pop(&mut self) -> Option<FrontierEntry<K>>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn clear(&mut self);
    /// Whether a cell that is already waiting should be pushed again when rediscovered. Only
    /// meaningful for the stack, where the newest push is expanded first.
    fn repush_discovered(&self) -> bool {
        false
    }
}

/// Last in, first out.
#[derive(Clone, Debug)]
pub struct StackFrontier<K> {
    entries: Vec<FrontierEntry<K>>,
}

impl<K> Default for StackFrontier<K> {
    fn default() -> Self {
        StackFrontier {
            entries: Vec::new(),
        }
    }
}

impl<K> Frontier<K> for StackFrontier<K> {
    fn push(&mut self, entry: FrontierEntry<K>) {
        self.entries.push(entry);
    }
    fn pop(&mut self) -> Option<FrontierEntry<K>> {
        self.entries.pop()
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn clear(&mut self) {
        self.entries.clear();
    }
    fn repush_discovered(&self) -> bool {
        true
    }
}

/// First in, first out.
#[derive(Clone, Debug)]
pub struct QueueFrontier<K> {
    entries: VecDeque<FrontierEntry<K>>,
}

impl<K> Default for QueueFrontier<K> {
    fn default() -> Self {
        QueueFrontier {
            entries: VecDeque::new(),
        }
    }
}

impl<K> Frontier<K> for QueueFrontier<K> {
    fn push(&mut self, entry: FrontierEntry<K>) {
        self.entries.push_back(entry);
    }
    fn pop(&mut self) -> Option<FrontierEntry<K>> {
        self.entries.pop_front()
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn clear(&mut self) {
        self.entries.clear();
    }
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    position: Position,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on every key so the max-heap pops the smallest estimate first, then the
        // smallest cost, then the earliest push
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-heap on `(priority, cost)`. Equal keys pop in insertion order.
pub struct PriorityFrontier<K> {
    heap: BinaryHeap<SmallestCostHolder<K>>,
    pushed: usize,
}

impl<K: Ord> Default for PriorityFrontier<K> {
    fn default() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }
}

impl<K: Ord + Copy> Frontier<K> for PriorityFrontier<K> {
    fn push(&mut self, entry: FrontierEntry<K>) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: entry.priority,
            cost: entry.cost,
            sequence: self.pushed,
            position: entry.position,
        });
        self.pushed += 1;
    }
    fn pop(&mut self) -> Option<FrontierEntry<K>> {
        self.heap.pop().map(
            |SmallestCostHolder {
                 estimated_cost,
                 cost,
                 position,
                 ..
             }| FrontierEntry {
                position,
                priority: estimated_cost,
                cost,
            },
        )
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
    fn clear(&mut self) {
        self.heap.clear();
        self.pushed = 0;
    }
}

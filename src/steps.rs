//! Replayable record of a search.
//!
//! The engine never draws anything. It appends [StepEvent]s in the order the algorithm produces
//! them and hands the finished log back with the result. A renderer walks the log with a
//! [Stepper] at whatever pace it likes.
use crate::position::Position;
use crate::{CameFrom, FxIndexSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A cell was taken off the frontier and expanded.
    Move(Position),
    /// A cell was pushed onto the frontier.
    Discover(Position),
    /// The came-from map after an expansion finished.
    TreeSnapshot(CameFrom),
}

/// Append-only collector for step events.
#[derive(Clone, Debug, Default)]
pub struct StepRecorder {
    events: Vec<StepEvent>,
    tree_snapshots: bool,
}

impl StepRecorder {
    pub fn new(tree_snapshots: bool) -> StepRecorder {
        StepRecorder {
            events: Vec::new(),
            tree_snapshots,
        }
    }

    pub fn record_move(&mut self, pos: Position) {
        self.events.push(StepEvent::Move(pos));
    }

    pub fn record_discover(&mut self, pos: Position) {
        self.events.push(StepEvent::Discover(pos));
    }

    /// Copies the came-from map into the log, unless snapshots are switched off.
    pub fn record_tree(&mut self, came_from: &CameFrom) {
        if self.tree_snapshots {
            self.events.push(StepEvent::TreeSnapshot(came_from.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<StepEvent> {
        self.events
    }
}

/// What a renderer needs to draw the search as of some point in the log.
#[derive(Clone, Debug, Default)]
pub struct ReplayFrame<'a> {
    /// Expanded cells in expansion order.
    pub visited: FxIndexSet<Position>,
    /// Discovered cells that have not been expanded yet.
    pub discovered: FxIndexSet<Position>,
    /// The most recent cell taken off the frontier.
    pub current: Option<Position>,
    pub tree: Option<&'a CameFrom>,
}

/// A cursor into a step log. `cursor` counts the events already applied, so it ranges from 0
/// (nothing shown) to the log length (everything shown).
#[derive(Clone, Debug)]
pub struct Stepper<'a> {
    log: &'a [StepEvent],
    cursor: usize,
}

impl<'a> Stepper<'a> {
    pub fn new(log: &'a [StepEvent]) -> Stepper<'a> {
        Stepper { log, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.log.len()
    }

    /// Applies the next event and returns it.
    pub fn step_forward(&mut self) -> Option<&'a StepEvent> {
        let event = self.log.get(self.cursor)?;
        self.cursor += 1;
        Some(event)
    }

    /// Un-applies the last applied event and returns it.
    pub fn step_backward(&mut self) -> Option<&'a StepEvent> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.log.get(self.cursor)
    }

    /// Moves the cursor, clamped to the log length.
    pub fn seek(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.log.len());
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Events applied so far.
    pub fn applied(&self) -> &'a [StepEvent] {
        &self.log[..self.cursor]
    }

    /// Folds the applied events into a drawable state.
    pub fn frame(&self) -> ReplayFrame<'a> {
        let mut frame = ReplayFrame::default();
        for event in self.applied() {
            match event {
                StepEvent::Move(p) => {
                    frame.discovered.shift_remove(p);
                    frame.visited.insert(*p);
                    frame.current = Some(*p);
                }
                StepEvent::Discover(p) => {
                    if !frame.visited.contains(p) {
                        frame.discovered.insert(*p);
                    }
                }
                StepEvent::TreeSnapshot(tree) => frame.tree = Some(tree),
            }
        }
        frame
    }
}

impl<'a> Iterator for Stepper<'a> {
    type Item = &'a StepEvent;

    fn next(&mut self) -> Option<&'a StepEvent> {
        self.step_forward()
    }
}

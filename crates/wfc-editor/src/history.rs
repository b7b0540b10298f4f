//! Bounded undo/redo log over workflow snapshots.
//!
//! Every mutation enters through [`History::update_state`], which merges a
//! patch into the current snapshot and records the result. Undo and redo
//! only move the cursor; they never record anything, so there is no need
//! for a "replaying" flag.
//!
//! Pointer gestures use **batching**: between `begin_batch` and `end_batch`
//! the first [`update_gesture`](History::update_gesture) pushes a new entry
//! and later ones overwrite it, so a whole drag is one undo step. Ordinary
//! edits arriving mid-gesture always get their own entry; the gesture
//! carries on in a fresh entry after them.

use std::collections::VecDeque;
use wfc_core::{StatePatch, WorkflowState};

/// Default number of retained snapshots.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bookkeeping for the open gesture.
struct Batch {
    /// Nesting depth; the batch closes when it drops to zero.
    depth: usize,
    /// Snapshot from before the gesture, for aborting.
    base: WorkflowState,
    /// Whether the gesture owns the entry at the cursor.
    owns_tip: bool,
    /// Whether the gesture recorded anything at all.
    recorded: bool,
    /// Whether an ordinary edit landed while the gesture was open.
    interrupted: bool,
}

pub struct History {
    /// Oldest first. Never empty.
    entries: VecDeque<WorkflowState>,
    /// Index of the current snapshot in `entries`.
    cursor: usize,
    /// Maximum number of retained snapshots.
    capacity: usize,
    batch: Option<Batch>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(WorkflowState::default(), DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(initial: WorkflowState, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
            batch: None,
        }
    }

    pub fn current(&self) -> &WorkflowState {
        &self.entries[self.cursor]
    }

    /// Merge `patch` into the current snapshot and record the result as a
    /// new entry, discarding any redo entries. Empty patches are ignored.
    ///
    /// An open gesture stays open but gives up its entry: its next update
    /// starts a new one after this edit.
    pub fn update_state(&mut self, patch: StatePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(batch) = &mut self.batch {
            batch.owns_tip = false;
            batch.interrupted = true;
        }
        let next = self.current().apply(patch);
        self.push(next);
        true
    }

    /// Like [`update_state`](Self::update_state) for operations that may
    /// have nothing to do.
    pub fn commit(&mut self, patch: Option<StatePatch>) -> bool {
        patch.is_some_and(|p| self.update_state(p))
    }

    /// Record a step of the open gesture. The first step pushes an entry,
    /// later ones overwrite it. Without an open batch this is
    /// [`update_state`](Self::update_state).
    pub fn update_gesture(&mut self, patch: StatePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let next = self.current().apply(patch);
        let Some(batch) = &mut self.batch else {
            self.push(next);
            return true;
        };
        batch.recorded = true;
        if batch.owns_tip {
            self.entries[self.cursor] = next;
            return true;
        }
        batch.owns_tip = true;
        self.push(next);
        true
    }

    fn push(&mut self, next: WorkflowState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(next);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        log::trace!("history: recorded entry {}/{}", self.cursor + 1, self.entries.len());
    }

    /// Start a batch group. Nestable; only the outermost pair matters.
    pub fn begin_batch(&mut self) {
        match &mut self.batch {
            Some(batch) => batch.depth += 1,
            None => {
                self.batch = Some(Batch {
                    depth: 1,
                    base: self.current().clone(),
                    owns_tip: false,
                    recorded: false,
                    interrupted: false,
                });
            }
        }
    }

    /// End a batch group.
    pub fn end_batch(&mut self) {
        if let Some(batch) = &mut self.batch {
            batch.depth -= 1;
            if batch.depth == 0 {
                self.batch = None;
            }
        }
    }

    /// Close every open batch and undo what the gesture did. Returns `true`
    /// if the current snapshot changed.
    ///
    /// An uninterrupted gesture simply loses its entry. If ordinary edits
    /// landed in between, the gesture's layout changes (positions,
    /// selection, viewport) are reverted by a new entry and those edits
    /// are kept.
    pub fn abort_batch(&mut self) -> bool {
        let Some(batch) = self.batch.take() else {
            return false;
        };
        if !batch.recorded {
            return false;
        }
        if !batch.interrupted {
            self.entries.truncate(self.cursor);
            if self.entries.is_empty() {
                // The pre-gesture entry was evicted; put it back.
                self.entries.push_back(batch.base);
            }
            self.cursor = self.entries.len() - 1;
            log::trace!("history: aborted gesture, back to {}/{}", self.cursor + 1, self.entries.len());
            return true;
        }
        match self.current().restore_layout(&batch.base) {
            Some(patch) => {
                let next = self.current().apply(patch);
                self.push(next);
                true
            }
            None => false,
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Step back one snapshot. Closes any open batch so the next update
    /// cannot overwrite the restored entry.
    pub fn undo(&mut self) -> bool {
        self.batch = None;
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        log::trace!("history: undo to {}/{}", self.cursor + 1, self.entries.len());
        true
    }

    pub fn redo(&mut self) -> bool {
        self.batch = None;
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        log::trace!("history: redo to {}/{}", self.cursor + 1, self.entries.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drop all history and start over from `state`.
    pub fn reset(&mut self, state: WorkflowState) {
        self.entries.clear();
        self.entries.push_back(state);
        self.cursor = 0;
        self.batch = None;
    }

    /// Number of retained snapshots, including the current one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

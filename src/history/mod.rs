// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The ring-buffer transaction log.
//!
//! `ActionLog` stores primitive record writes as [`LogEntry::Action`] slots
//! separated by [`LogEntry::Boundary`] markers, one boundary per user-visible
//! action set. A movable cursor supports undo and redo; appending while the
//! cursor sits mid-history discards the redo branch. When the buffer is full
//! the oldest entries are evicted, which narrows what is undoable but never
//! corrupts state.
//!
//! Undo and redo replay rows through the store's raw writes, not through the
//! mutation facade. Replay must not re-trigger consistency rules or append
//! new log entries, otherwise undoing an action would not restore the exact
//! pre-action model.

use std::fmt;

use crate::model::{ChangeStats, StatSeries};
use crate::store::{Database, StoreError};

pub mod entry;
mod ring;

#[cfg(test)]
mod tests;

pub use entry::{ActionRecord, Change, LogEntry};

use ring::Ring;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// No applicable history at the current cursor position.
    InvalidRequest,
    /// The ring buffer evicted entries the request would have needed.
    BufferExceeded,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "no history entry applicable to the request"),
            Self::BufferExceeded => write!(f, "history truncated by ring-buffer eviction"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// The transaction log of one open document.
#[derive(Debug)]
pub struct ActionLog {
    entries: Ring<LogEntry>,
    current: usize,
    truncated: bool,
}

impl ActionLog {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        // One action plus its closing boundary is the smallest useful log.
        Self {
            entries: Ring::new(capacity.max(2)),
            current: 0,
            truncated: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, `0 ..= len`. Entries at `current..` form the redo
    /// branch.
    pub fn current(&self) -> usize {
        self.current
    }

    /// True once any entry has ever been evicted.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn entry(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    fn boundaries_before_current(&self) -> usize {
        (0..self.current)
            .filter_map(|index| self.entries.get(index))
            .filter(|entry| entry.is_boundary())
            .count()
    }

    fn push(&mut self, entry: LogEntry) -> Option<LogEntry> {
        if self.current < self.entries.len() {
            self.entries.truncate(self.current);
        }
        let evicted = self.entries.push_back(entry);
        if evicted.is_some() {
            self.truncated = true;
        }
        self.current = self.entries.len();
        evicted
    }

    /// Appends one action. Any redo branch is discarded first; when the
    /// buffer is full the oldest entry is evicted.
    pub fn record(&mut self, action: ActionRecord) {
        self.push(LogEntry::Action(action));
    }

    /// Closes the open action set with a boundary carrying the store
    /// revision.
    ///
    /// The boundary is recorded unconditionally. `BufferExceeded` is an
    /// informational warning: appending evicted a boundary and the log no
    /// longer holds a complete action set to undo.
    pub fn add_boundary(&mut self, revision: u64) -> Result<(), HistoryError> {
        let evicted = self.push(LogEntry::Boundary { revision });
        let lost_boundary = matches!(evicted, Some(LogEntry::Boundary { .. }));
        if lost_boundary && self.boundaries_before_current() < 2 {
            return Err(HistoryError::BufferExceeded);
        }
        Ok(())
    }

    /// Reopens the latest action set by removing its closing boundary, so the
    /// next recorded action merges into it. Any redo branch is discarded.
    pub fn remove_last_boundary(&mut self) -> Result<(), HistoryError> {
        let closes_a_set = matches!(
            self.current
                .checked_sub(1)
                .and_then(|index| self.entries.get(index)),
            Some(LogEntry::Boundary { .. })
        );
        if !closes_a_set {
            return Err(HistoryError::InvalidRequest);
        }
        self.entries.truncate(self.current);
        self.entries.pop_back();
        self.current -= 1;
        Ok(())
    }

    fn exhausted(&self) -> HistoryError {
        if self.truncated {
            HistoryError::BufferExceeded
        } else {
            HistoryError::InvalidRequest
        }
    }

    /// Rolls the model back over one action set.
    ///
    /// Requires two boundaries before the cursor (the closing one and the one
    /// that opened the set); without them the log holds no complete set, and
    /// the error distinguishes "no more history" from "history lost to
    /// eviction". Walks the cursor backward, inverting each action through
    /// raw store writes, then restores the revision stored in the opening
    /// boundary. Per-entry store failures are tallied into `stats` and do not
    /// stop the walk.
    pub fn undo(
        &mut self,
        db: &mut Database,
        stats: &mut ChangeStats,
    ) -> Result<(), HistoryError> {
        if self.boundaries_before_current() < 2 {
            return Err(self.exhausted());
        }
        let mut index = self.current;
        let closing = index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .is_some_and(LogEntry::is_boundary);
        if closing {
            index -= 1;
        }
        while index > 0 {
            match self.entries.get(index - 1) {
                Some(LogEntry::Boundary { revision }) => {
                    db.set_revision(*revision);
                    break;
                }
                Some(LogEntry::Action(record)) => {
                    apply_undo(record, db, stats);
                    index -= 1;
                }
                None => break,
            }
        }
        self.current = index;
        Ok(())
    }

    /// Replays one action set forward, the mirror of [`ActionLog::undo`].
    /// Stops after the next boundary (restoring its revision) or at the end
    /// of the log.
    pub fn redo(
        &mut self,
        db: &mut Database,
        stats: &mut ChangeStats,
    ) -> Result<(), HistoryError> {
        if self.current == self.entries.len() {
            return Err(HistoryError::InvalidRequest);
        }
        let mut index = self.current;
        while index < self.entries.len() {
            match self.entries.get(index) {
                Some(LogEntry::Boundary { revision }) => {
                    db.set_revision(*revision);
                    index += 1;
                    break;
                }
                Some(LogEntry::Action(record)) => {
                    apply_redo(record, db, stats);
                    index += 1;
                }
                None => break,
            }
        }
        self.current = index;
        Ok(())
    }

    /// Read-only cursor over the actions the next [`ActionLog::undo`] would
    /// invert, in application order.
    pub fn undo_iter(&self) -> UndoIter<'_> {
        let mut hi = self.current;
        let closing = hi
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .is_some_and(LogEntry::is_boundary);
        if closing {
            hi -= 1;
        }
        let mut lo = hi;
        while lo > 0 {
            match self.entries.get(lo - 1) {
                Some(LogEntry::Action(_)) => lo -= 1,
                _ => break,
            }
        }
        UndoIter {
            log: self,
            next: hi,
            lo,
        }
    }

    /// Read-only cursor over the actions the next [`ActionLog::redo`] would
    /// replay, in application order.
    pub fn redo_iter(&self) -> RedoIter<'_> {
        let mut hi = self.current;
        while hi < self.entries.len() {
            match self.entries.get(hi) {
                Some(LogEntry::Action(_)) => hi += 1,
                _ => break,
            }
        }
        RedoIter {
            log: self,
            next: self.current,
            hi,
        }
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks backward from the cursor to the opening boundary.
pub struct UndoIter<'a> {
    log: &'a ActionLog,
    next: usize,
    lo: usize,
}

impl<'a> Iterator for UndoIter<'a> {
    type Item = &'a ActionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next <= self.lo {
            return None;
        }
        self.next -= 1;
        match self.log.entries.get(self.next) {
            Some(LogEntry::Action(record)) => Some(record),
            _ => None,
        }
    }
}

impl UndoIter<'_> {
    /// Folds the would-be undo into `stats` without touching the model:
    /// inverting a creation counts as a deletion and vice versa.
    pub fn collect_stats(self, stats: &mut ChangeStats) {
        for record in self {
            stats.bump(record.table(), inverse_series(record.series()));
        }
    }
}

/// Walks forward from the cursor to the closing boundary.
pub struct RedoIter<'a> {
    log: &'a ActionLog,
    next: usize,
    hi: usize,
}

impl<'a> Iterator for RedoIter<'a> {
    type Item = &'a ActionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.hi {
            return None;
        }
        let item = match self.log.entries.get(self.next) {
            Some(LogEntry::Action(record)) => Some(record),
            _ => None,
        };
        self.next += 1;
        item
    }
}

impl RedoIter<'_> {
    pub fn collect_stats(self, stats: &mut ChangeStats) {
        for record in self {
            stats.bump(record.table(), record.series());
        }
    }
}

fn inverse_series(series: StatSeries) -> StatSeries {
    match series {
        StatSeries::Created => StatSeries::Deleted,
        StatSeries::Deleted => StatSeries::Created,
        other => other,
    }
}

fn apply_undo(record: &ActionRecord, db: &mut Database, stats: &mut ChangeStats) {
    let table = record.table();
    let outcome: Result<StatSeries, StoreError> = match record {
        ActionRecord::Diagram(change) => match change {
            Change::Created { after } => db.take_diagram(after.id()).map(|_| StatSeries::Deleted),
            Change::Modified { before, .. } => {
                db.put_diagram(before.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => {
                db.put_diagram(before.clone());
                Ok(StatSeries::Created)
            }
        },
        ActionRecord::Element(change) => match change {
            Change::Created { after } => db.take_element(after.id()).map(|_| StatSeries::Deleted),
            Change::Modified { before, .. } => {
                db.put_element(before.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => {
                db.put_element(before.clone());
                Ok(StatSeries::Created)
            }
        },
        ActionRecord::Classifier(change) => match change {
            Change::Created { after } => {
                db.take_classifier(after.id()).map(|_| StatSeries::Deleted)
            }
            Change::Modified { before, .. } => {
                db.put_classifier(before.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => {
                db.put_classifier(before.clone());
                Ok(StatSeries::Created)
            }
        },
        ActionRecord::Feature(change) => match change {
            Change::Created { after } => db.take_feature(after.id()).map(|_| StatSeries::Deleted),
            Change::Modified { before, .. } => {
                db.put_feature(before.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => {
                db.put_feature(before.clone());
                Ok(StatSeries::Created)
            }
        },
        ActionRecord::Relationship(change) => match change {
            Change::Created { after } => db
                .take_relationship(after.id())
                .map(|_| StatSeries::Deleted),
            Change::Modified { before, .. } => {
                db.put_relationship(before.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => {
                db.put_relationship(before.clone());
                Ok(StatSeries::Created)
            }
        },
    };
    match outcome {
        Ok(series) => stats.bump(table, series),
        Err(_) => stats.bump(table, StatSeries::Errors),
    }
}

fn apply_redo(record: &ActionRecord, db: &mut Database, stats: &mut ChangeStats) {
    let table = record.table();
    let outcome: Result<StatSeries, StoreError> = match record {
        ActionRecord::Diagram(change) => match change {
            Change::Created { after } => {
                db.put_diagram(after.clone());
                Ok(StatSeries::Created)
            }
            Change::Modified { after, .. } => {
                db.put_diagram(after.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => db.take_diagram(before.id()).map(|_| StatSeries::Deleted),
        },
        ActionRecord::Element(change) => match change {
            Change::Created { after } => {
                db.put_element(after.clone());
                Ok(StatSeries::Created)
            }
            Change::Modified { after, .. } => {
                db.put_element(after.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => db.take_element(before.id()).map(|_| StatSeries::Deleted),
        },
        ActionRecord::Classifier(change) => match change {
            Change::Created { after } => {
                db.put_classifier(after.clone());
                Ok(StatSeries::Created)
            }
            Change::Modified { after, .. } => {
                db.put_classifier(after.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => db
                .take_classifier(before.id())
                .map(|_| StatSeries::Deleted),
        },
        ActionRecord::Feature(change) => match change {
            Change::Created { after } => {
                db.put_feature(after.clone());
                Ok(StatSeries::Created)
            }
            Change::Modified { after, .. } => {
                db.put_feature(after.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => db.take_feature(before.id()).map(|_| StatSeries::Deleted),
        },
        ActionRecord::Relationship(change) => match change {
            Change::Created { after } => {
                db.put_relationship(after.clone());
                Ok(StatSeries::Created)
            }
            Change::Modified { after, .. } => {
                db.put_relationship(after.clone());
                Ok(StatSeries::Modified)
            }
            Change::Deleted { before } => db
                .take_relationship(before.id())
                .map(|_| StatSeries::Deleted),
        },
    };
    match outcome {
        Ok(series) => stats.bump(table, series),
        Err(_) => stats.bump(table, StatSeries::Errors),
    }
}

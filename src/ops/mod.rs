// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The mutation facade.
//!
//! `Controller` is the single write path into the model: every operation
//! performs its primitive store write, records it in the action log, closes
//! the action set with a boundary, and then lets the consistency rules issue
//! compensating operations that merge into the same set. The log is therefore
//! always boundary-closed between operations.
//!
//! Validation happens here, before anything is written; the store's raw
//! replay writes stay unvalidated on purpose.

use std::fmt;

use smallvec::SmallVec;

use crate::history::{ActionLog, ActionRecord, Change, HistoryError};
use crate::model::{
    ChangeStats, Classifier, ClassifierId, Diagram, DiagramElement, DiagramElementId, DiagramId,
    DiagramType, DisplayFlags, EntityTable, Feature, FeatureId, FeatureType, Relationship,
    RelationshipId,
};
use crate::policy;
use crate::store::{Database, StoreError};


/// Where an operation lands in the action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Start a new action set.
    New,
    /// Merge into the latest set by reopening it first. Consistency rules use
    /// this so a whole cascade undoes as one step.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtrlError {
    /// The request does not apply to the current model state, or there is no
    /// history entry to undo/redo.
    InvalidRequest,
    /// The ring buffer evicted history the request would have needed.
    BufferExceeded,
    NotFound { table: EntityTable, id: u64 },
    StillReferenced { table: EntityTable, id: u64 },
    DbStructure { message: String },
}

impl fmt::Display for CtrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "request not applicable to the current model state"),
            Self::BufferExceeded => write!(f, "history truncated by ring-buffer eviction"),
            Self::NotFound { table, id } => write!(f, "{table} {id} not found"),
            Self::StillReferenced { table, id } => {
                write!(f, "{table} {id} is still referenced")
            }
            Self::DbStructure { message } => write!(f, "data store structure error: {message}"),
        }
    }
}

impl std::error::Error for CtrlError {}

impl From<StoreError> for CtrlError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { table, id } => Self::NotFound { table, id },
            StoreError::StillReferenced { table, id } => Self::StillReferenced { table, id },
            StoreError::Structure { message } => Self::DbStructure { message },
            StoreError::Json { source } => Self::DbStructure {
                message: source.to_string(),
            },
        }
    }
}

impl From<HistoryError> for CtrlError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::InvalidRequest => Self::InvalidRequest,
            HistoryError::BufferExceeded => Self::BufferExceeded,
        }
    }
}

/// The mutation facade over one open document: the store, its transaction
/// log, and the operation protocol tying them together.
#[derive(Debug)]
pub struct Controller {
    db: Database,
    log: ActionLog,
}

impl Controller {
    pub fn new() -> Self {
        Self::from_database(Database::new())
    }

    pub fn with_log_capacity(capacity: usize) -> Self {
        let db = Database::new();
        let mut log = ActionLog::with_capacity(capacity);
        // Baseline boundary: the very first operation needs an opening
        // boundary to be undoable. A fresh ring cannot evict anything.
        let _ = log.add_boundary(db.revision());
        Self { db, log }
    }

    /// Wraps an existing model, e.g. one restored from a snapshot.
    pub fn from_database(db: Database) -> Self {
        let mut log = ActionLog::new();
        let _ = log.add_boundary(db.revision());
        Self { db, log }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn into_database(self) -> Database {
        self.db
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Rolls back the newest action set, cascade included.
    pub fn undo(&mut self, stats: &mut ChangeStats) -> Result<(), CtrlError> {
        self.log.undo(&mut self.db, stats)?;
        Ok(())
    }

    /// Replays the set most recently undone.
    pub fn redo(&mut self, stats: &mut ChangeStats) -> Result<(), CtrlError> {
        self.log.redo(&mut self.db, stats)?;
        Ok(())
    }

    /// What [`Controller::undo`] would change, without changing it.
    pub fn undo_preview(&self) -> ChangeStats {
        let mut stats = ChangeStats::new();
        self.log.undo_iter().collect_stats(&mut stats);
        stats
    }

    /// What [`Controller::redo`] would change, without changing it.
    pub fn redo_preview(&self) -> ChangeStats {
        let mut stats = ChangeStats::new();
        self.log.redo_iter().collect_stats(&mut stats);
        stats
    }

    fn open_set(&mut self, mode: SetMode) {
        if mode == SetMode::Append {
            // Nothing to reopen is fine; the operation then starts a set of
            // its own.
            let _ = self.log.remove_last_boundary();
        }
    }

    fn close_set(&mut self) {
        // A lost undo point is not this operation's failure; it resurfaces
        // as BufferExceeded on the undo that needs the evicted entries.
        let _ = self.log.add_boundary(self.db.revision());
    }

    /// `focused_feature` may only reference a lifeline owned by the same
    /// classifier as the element.
    fn check_focusable(
        &self,
        classifier_id: ClassifierId,
        feature_id: FeatureId,
    ) -> Result<(), CtrlError> {
        let feature = self.db.feature(feature_id)?;
        if feature.feature_type() != FeatureType::Lifeline
            || feature.classifier_id() != classifier_id
        {
            return Err(CtrlError::InvalidRequest);
        }
        Ok(())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

// Per-table operations, split by record family.
include!("diagram_impl.rs");
include!("classifier_impl.rs");

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{
    Classifier, Diagram, DiagramElement, EntityTable, Feature, Relationship, StatSeries,
};

/// One primitive record write, holding exactly the snapshots its inversion
/// needs. Creations keep the after-image, deletions the before-image,
/// modifications both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    Created { after: T },
    Modified { before: T, after: T },
    Deleted { before: T },
}

impl<T> Change<T> {
    pub fn series(&self) -> StatSeries {
        match self {
            Change::Created { .. } => StatSeries::Created,
            Change::Modified { .. } => StatSeries::Modified,
            Change::Deleted { .. } => StatSeries::Deleted,
        }
    }
}

/// A [`Change`] tagged with the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRecord {
    Diagram(Change<Diagram>),
    Element(Change<DiagramElement>),
    Classifier(Change<Classifier>),
    Feature(Change<Feature>),
    Relationship(Change<Relationship>),
}

impl ActionRecord {
    pub fn table(&self) -> EntityTable {
        match self {
            ActionRecord::Diagram(_) => EntityTable::Diagram,
            ActionRecord::Element(_) => EntityTable::Element,
            ActionRecord::Classifier(_) => EntityTable::Classifier,
            ActionRecord::Feature(_) => EntityTable::Feature,
            ActionRecord::Relationship(_) => EntityTable::Relationship,
        }
    }

    pub fn series(&self) -> StatSeries {
        match self {
            ActionRecord::Diagram(change) => change.series(),
            ActionRecord::Element(change) => change.series(),
            ActionRecord::Classifier(change) => change.series(),
            ActionRecord::Feature(change) => change.series(),
            ActionRecord::Relationship(change) => change.series(),
        }
    }
}

/// One slot of the transaction log.
///
/// Boundaries separate user-visible action sets and snapshot the store
/// revision in force when the set closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Action(ActionRecord),
    Boundary { revision: u64 },
}

impl LogEntry {
    pub fn is_boundary(&self) -> bool {
        matches!(self, LogEntry::Boundary { .. })
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core record types of the model.
//!
//! A model is a set of diagrams, classifiers placed on them as elements,
//! features owned by classifiers, and relationships between classifiers.

pub mod classifier;
pub mod diagram;
pub mod element;
pub mod feature;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod relationship;
pub mod stats;

pub use classifier::{Classifier, ClassifierType};
pub use diagram::{Diagram, DiagramType};
pub use element::{DiagramElement, DisplayFlags};
pub use feature::{Feature, FeatureType};
pub use ids::{ClassifierId, DiagramElementId, DiagramId, FeatureId, Id, RelationshipId};
pub use relationship::{Relationship, RelationshipType};
pub use stats::{ChangeStats, EntityTable, StatSeries};

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use proteus::model::{
    Classifier, ClassifierId, ClassifierType, Diagram, DiagramElement, DiagramElementId,
    DiagramId, DiagramType, Feature, FeatureId, FeatureType, Relationship, RelationshipId,
    RelationshipType,
};
use proteus::ops::{Controller, SetMode};
use proteus::store::Database;

/// Log capacity large enough that no fixture session evicts entries.
pub const LOG_CAPACITY: usize = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelParams {
    pub diagrams: usize,
    pub classifiers: usize,
    pub placements_per_classifier: usize,
    pub features_per_classifier: usize,
    pub relationship_stride: usize,
}

impl ModelParams {
    pub const fn new(
        diagrams: usize,
        classifiers: usize,
        placements_per_classifier: usize,
        features_per_classifier: usize,
        relationship_stride: usize,
    ) -> Self {
        Self {
            diagrams,
            classifiers,
            placements_per_classifier,
            features_per_classifier,
            relationship_stride,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub const fn params(self) -> ModelParams {
        match self {
            Self::Small => ModelParams::new(4, 24, 1, 2, 3),
            Self::Medium => ModelParams::new(8, 120, 2, 4, 2),
            Self::Large => ModelParams::new(16, 600, 3, 6, 1),
        }
    }
}

/// Deterministic class-diagram model built through the facade, so the log
/// holds the same action sets a real editing session would have produced.
pub fn controller(params: ModelParams) -> Controller {
    assert!(params.diagrams >= 1, "model fixture needs >= 1 diagram");
    assert!(params.classifiers >= 2, "model fixture needs >= 2 classifiers");

    let mut ctrl = Controller::with_log_capacity(LOG_CAPACITY);

    let mut diagram_ids = Vec::<DiagramId>::with_capacity(params.diagrams);
    for idx in 0..params.diagrams {
        let id = ctrl
            .create_diagram(
                Diagram::new(
                    DiagramId::new(0),
                    None,
                    DiagramType::Class,
                    format!("diagram_{idx:03}"),
                ),
                SetMode::New,
            )
            .expect("create diagram");
        diagram_ids.push(id);
    }

    let mut classifier_ids = Vec::<ClassifierId>::with_capacity(params.classifiers);
    for idx in 0..params.classifiers {
        let id = ctrl
            .create_classifier(
                Classifier::new(
                    ClassifierId::new(0),
                    ClassifierType::Class,
                    format!("classifier_{idx:04}"),
                ),
                SetMode::New,
            )
            .expect("create classifier");
        classifier_ids.push(id);
    }

    for (idx, &classifier_id) in classifier_ids.iter().enumerate() {
        for k in 0..params.placements_per_classifier {
            let diagram_id = diagram_ids[idx.wrapping_mul(7).wrapping_add(k) % diagram_ids.len()];
            ctrl.create_element(
                DiagramElement::new(DiagramElementId::new(0), diagram_id, classifier_id),
                SetMode::New,
            )
            .expect("place classifier");
        }
        for k in 0..params.features_per_classifier {
            ctrl.create_feature(
                Feature::new(
                    FeatureId::new(0),
                    classifier_id,
                    FeatureType::Property,
                    format!("attr_{k:02}"),
                ),
                SetMode::New,
            )
            .expect("create feature");
        }
    }

    for idx in (0..params.classifiers).step_by(params.relationship_stride.max(1)) {
        let from = classifier_ids[idx];
        let to = classifier_ids[idx.wrapping_mul(7).wrapping_add(3) % classifier_ids.len()];
        if from == to {
            continue;
        }
        ctrl.create_relationship(
            Relationship::new(
                RelationshipId::new(0),
                RelationshipType::Association,
                from,
                to,
            ),
            SetMode::New,
        )
        .expect("create relationship");
    }

    ctrl
}

pub fn database(params: ModelParams) -> Database {
    controller(params).into_database()
}

pub fn fixture(case: Case) -> Controller {
    controller(case.params())
}

pub fn checksum_database(db: &Database) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(db.revision());
    for diagram in db.diagrams().values() {
        acc = acc.wrapping_mul(131).wrapping_add(diagram.name().len() as u64);
    }
    for element in db.elements().values() {
        acc = acc.wrapping_mul(131).wrapping_add(element.id().as_u64());
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(element.focused_feature().map_or(0, |id| id.as_u64()));
    }
    for classifier in db.classifiers().values() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(classifier.name().len() as u64);
    }
    for feature in db.features().values() {
        acc = acc.wrapping_mul(131).wrapping_add(feature.key().len() as u64);
    }
    for relationship in db.relationships().values() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(relationship.from_classifier().as_u64());
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(relationship.to_classifier().as_u64());
    }
    acc
}

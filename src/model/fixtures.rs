// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::classifier::{Classifier, ClassifierType};
use super::diagram::{Diagram, DiagramType};
use super::element::DiagramElement;
use super::feature::{Feature, FeatureType};
use super::ids::{ClassifierId, DiagramElementId, DiagramId, FeatureId, RelationshipId};
use super::relationship::{Relationship, RelationshipType};

pub(crate) fn diagram(id: u64, diagram_type: DiagramType, name: &str) -> Diagram {
    Diagram::new(DiagramId::new(id), None, diagram_type, name)
}

pub(crate) fn classifier(id: u64, classifier_type: ClassifierType, name: &str) -> Classifier {
    Classifier::new(ClassifierId::new(id), classifier_type, name)
}

pub(crate) fn element(id: u64, diagram: u64, classifier: u64) -> DiagramElement {
    DiagramElement::new(
        DiagramElementId::new(id),
        DiagramId::new(diagram),
        ClassifierId::new(classifier),
    )
}

pub(crate) fn feature(id: u64, classifier: u64, feature_type: FeatureType, key: &str) -> Feature {
    Feature::new(
        FeatureId::new(id),
        ClassifierId::new(classifier),
        feature_type,
        key,
    )
}

pub(crate) fn relationship(
    id: u64,
    relationship_type: RelationshipType,
    from: u64,
    to: u64,
) -> Relationship {
    Relationship::new(
        RelationshipId::new(id),
        relationship_type,
        ClassifierId::new(from),
        ClassifierId::new(to),
    )
}

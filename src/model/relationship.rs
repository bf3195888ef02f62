// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{ClassifierId, FeatureId, RelationshipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Dependency,
    Association,
    Aggregation,
    Composition,
    Generalization,
    Realization,
    SyncCall,
    AsyncCall,
    ReturnCall,
    CommunicationPath,
    ControlFlow,
}

/// A directed edge between two classifiers, optionally anchored on a feature
/// at either end (messages attach to lifelines that way).
///
/// Relationships live in the model, not in any one diagram. A relationship is
/// drawn wherever both of its ends appear together, so its visibility is a
/// derived property of element placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    id: RelationshipId,
    relationship_type: RelationshipType,
    from_classifier: ClassifierId,
    from_feature: Option<FeatureId>,
    to_classifier: ClassifierId,
    to_feature: Option<FeatureId>,
    name: String,
    stereotype: String,
    description: String,
}

impl Relationship {
    pub fn new(
        id: RelationshipId,
        relationship_type: RelationshipType,
        from_classifier: ClassifierId,
        to_classifier: ClassifierId,
    ) -> Self {
        Self {
            id,
            relationship_type,
            from_classifier,
            from_feature: None,
            to_classifier,
            to_feature: None,
            name: String::new(),
            stereotype: String::new(),
            description: String::new(),
        }
    }

    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: RelationshipId) {
        self.id = id;
    }

    pub fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    pub fn from_classifier(&self) -> ClassifierId {
        self.from_classifier
    }

    pub fn to_classifier(&self) -> ClassifierId {
        self.to_classifier
    }

    pub fn from_feature(&self) -> Option<FeatureId> {
        self.from_feature
    }

    pub fn set_from_feature(&mut self, from_feature: Option<FeatureId>) {
        self.from_feature = from_feature;
    }

    pub fn to_feature(&self) -> Option<FeatureId> {
        self.to_feature
    }

    pub fn set_to_feature(&mut self, to_feature: Option<FeatureId>) {
        self.to_feature = to_feature;
    }

    pub fn touches(&self, classifier_id: ClassifierId) -> bool {
        self.from_classifier == classifier_id || self.to_classifier == classifier_id
    }

    pub fn touches_feature(&self, feature_id: FeatureId) -> bool {
        self.from_feature == Some(feature_id) || self.to_feature == Some(feature_id)
    }

    pub fn is_reflexive(&self) -> bool {
        self.from_classifier == self.to_classifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn stereotype(&self) -> &str {
        &self.stereotype
    }

    pub fn set_stereotype(&mut self, stereotype: impl Into<String>) {
        self.stereotype = stereotype.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{ClassifierId, FeatureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Property,
    Operation,
    Port,
    Lifeline,
    ProvidedInterface,
    RequiredInterface,
    TaggedValue,
}

/// A named feature owned by one classifier.
///
/// Lifeline features are special: they exist only while their classifier is
/// placed on at least one scenario diagram, and scenario elements point back
/// at them through `focused_feature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    id: FeatureId,
    classifier_id: ClassifierId,
    feature_type: FeatureType,
    key: String,
    value: String,
    description: String,
    list_order: i32,
}

impl Feature {
    pub fn new(
        id: FeatureId,
        classifier_id: ClassifierId,
        feature_type: FeatureType,
        key: impl Into<String>,
    ) -> Self {
        Self {
            id,
            classifier_id,
            feature_type,
            key: key.into(),
            value: String::new(),
            description: String::new(),
            list_order: 0,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: FeatureId) {
        self.id = id;
    }

    pub fn classifier_id(&self) -> ClassifierId {
        self.classifier_id
    }

    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn list_order(&self) -> i32 {
        self.list_order
    }

    pub fn set_list_order(&mut self, list_order: i32) {
        self.list_order = list_order;
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::ClassifierId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierType {
    Block,
    Class,
    Interface,
    Package,
    Component,
    Node,
    Actor,
    UseCase,
    Object,
    Activity,
    State,
    Requirement,
    Comment,
}

/// One classifier record: a model element that can appear in many diagrams.
///
/// The order fields are layout hints consumed by the rendering layer; this
/// core stores and replays them but never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifier {
    id: ClassifierId,
    classifier_type: ClassifierType,
    name: String,
    stereotype: String,
    description: String,
    x_order: i32,
    y_order: i32,
    list_order: i32,
}

impl Classifier {
    pub fn new(id: ClassifierId, classifier_type: ClassifierType, name: impl Into<String>) -> Self {
        Self {
            id,
            classifier_type,
            name: name.into(),
            stereotype: String::new(),
            description: String::new(),
            x_order: 0,
            y_order: 0,
            list_order: 0,
        }
    }

    pub fn id(&self) -> ClassifierId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ClassifierId) {
        self.id = id;
    }

    pub fn classifier_type(&self) -> ClassifierType {
        self.classifier_type
    }

    pub fn set_classifier_type(&mut self, classifier_type: ClassifierType) {
        self.classifier_type = classifier_type;
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

    pub fn x_order(&self) -> i32 {
        self.x_order
    }

    pub fn y_order(&self) -> i32 {
        self.y_order
    }

    pub fn set_order_hints(&mut self, x_order: i32, y_order: i32) {
        self.x_order = x_order;
        self.y_order = y_order;
    }

    pub fn list_order(&self) -> i32 {
        self.list_order
    }

    pub fn set_list_order(&mut self, list_order: i32) {
        self.list_order = list_order;
    }
}

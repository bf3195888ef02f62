// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::DiagramId;

/// The type of diagram.
///
/// Scenario types require every contained element to carry a lifeline; all
/// other types forbid one. `is_scenario` is the single place that split is
/// decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramType {
    List,
    Box,
    Class,
    Package,
    Component,
    Deployment,
    UseCase,
    Activity,
    StateMachine,
    Requirement,
    Sequence,
    Communication,
    Timing,
    InteractionOverview,
}

impl DiagramType {
    pub fn is_scenario(self) -> bool {
        matches!(
            self,
            Self::Sequence | Self::Communication | Self::Timing | Self::InteractionOverview
        )
    }
}

/// One diagram record: a named view onto the model.
///
/// Diagrams form a tree via `parent_id`; the single-root rule is owned by the
/// embedding application, this core only reacts to type changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    id: DiagramId,
    parent_id: Option<DiagramId>,
    diagram_type: DiagramType,
    name: String,
    stereotype: String,
    description: String,
    list_order: i32,
}

impl Diagram {
    pub fn new(
        id: DiagramId,
        parent_id: Option<DiagramId>,
        diagram_type: DiagramType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent_id,
            diagram_type,
            name: name.into(),
            stereotype: String::new(),
            description: String::new(),
            list_order: 0,
        }
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: DiagramId) {
        self.id = id;
    }

    pub fn parent_id(&self) -> Option<DiagramId> {
        self.parent_id
    }

    pub fn set_parent_id(&mut self, parent_id: Option<DiagramId>) {
        self.parent_id = parent_id;
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    pub fn set_diagram_type(&mut self, diagram_type: DiagramType) {
        self.diagram_type = diagram_type;
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

    pub fn list_order(&self) -> i32 {
        self.list_order
    }

    pub fn set_list_order(&mut self, list_order: i32) {
        self.list_order = list_order;
    }
}

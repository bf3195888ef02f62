// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{ClassifierId, DiagramElementId, DiagramId, FeatureId};

/// Presentation flags of one diagram element, stored as a small bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayFlags(u32);

impl DisplayFlags {
    pub const NONE: DisplayFlags = DisplayFlags(0);
    pub const EMPHASIS: DisplayFlags = DisplayFlags(1 << 0);
    pub const GRAY_OUT: DisplayFlags = DisplayFlags(1 << 1);
    pub const NAMED_INSTANCE: DisplayFlags = DisplayFlags(1 << 2);
    pub const ANONYMOUS_INSTANCE: DisplayFlags = DisplayFlags(1 << 3);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn contains(self, flag: DisplayFlags) -> bool {
        (self.0 & flag.0) == flag.0
    }

    pub fn with(self, flag: DisplayFlags) -> Self {
        Self(self.0 | flag.0)
    }

    pub fn without(self, flag: DisplayFlags) -> Self {
        Self(self.0 & !flag.0)
    }
}

impl fmt::Display for DisplayFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// One occurrence of a classifier in one diagram.
///
/// `focused_feature`, when set, references the lifeline feature that
/// represents this element in a scenario diagram. The policy engine keeps the
/// link consistent with the diagram type and the feature's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramElement {
    id: DiagramElementId,
    diagram_id: DiagramId,
    classifier_id: ClassifierId,
    display_flags: DisplayFlags,
    focused_feature: Option<FeatureId>,
}

impl DiagramElement {
    pub fn new(id: DiagramElementId, diagram_id: DiagramId, classifier_id: ClassifierId) -> Self {
        Self {
            id,
            diagram_id,
            classifier_id,
            display_flags: DisplayFlags::NONE,
            focused_feature: None,
        }
    }

    pub fn id(&self) -> DiagramElementId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: DiagramElementId) {
        self.id = id;
    }

    pub fn diagram_id(&self) -> DiagramId {
        self.diagram_id
    }

    pub fn classifier_id(&self) -> ClassifierId {
        self.classifier_id
    }

    pub fn display_flags(&self) -> DisplayFlags {
        self.display_flags
    }

    pub fn set_display_flags(&mut self, display_flags: DisplayFlags) {
        self.display_flags = display_flags;
    }

    pub fn focused_feature(&self) -> Option<FeatureId> {
        self.focused_feature
    }

    pub fn set_focused_feature(&mut self, focused_feature: Option<FeatureId>) {
        self.focused_feature = focused_feature;
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Diagram and diagram-element operations. Every operation validates against
/// the store before the first write, so a refused request leaves both the
/// model and the log untouched.
impl Controller {
    pub fn create_diagram(
        &mut self,
        diagram: Diagram,
        mode: SetMode,
    ) -> Result<DiagramId, CtrlError> {
        if let Some(parent_id) = diagram.parent_id() {
            self.db.diagram(parent_id)?;
        }
        self.open_set(mode);
        let row = self.db.insert_diagram(diagram).clone();
        let id = row.id();
        self.log
            .record(ActionRecord::Diagram(Change::Created { after: row }));
        self.close_set();
        Ok(id)
    }

    fn update_diagram_with(
        &mut self,
        id: DiagramId,
        mode: SetMode,
        edit: impl FnOnce(&mut Diagram),
    ) -> Result<Diagram, CtrlError> {
        let before = self.db.diagram(id)?.clone();
        let mut after = before.clone();
        edit(&mut after);
        self.open_set(mode);
        self.db.put_diagram(after.clone());
        self.log.record(ActionRecord::Diagram(Change::Modified {
            before: before.clone(),
            after,
        }));
        self.close_set();
        Ok(before)
    }

    pub fn update_diagram_name(
        &mut self,
        id: DiagramId,
        name: impl Into<String>,
        mode: SetMode,
    ) -> Result<Diagram, CtrlError> {
        self.update_diagram_with(id, mode, |diagram| diagram.set_name(name))
    }

    pub fn update_diagram_stereotype(
        &mut self,
        id: DiagramId,
        stereotype: impl Into<String>,
        mode: SetMode,
    ) -> Result<Diagram, CtrlError> {
        self.update_diagram_with(id, mode, |diagram| diagram.set_stereotype(stereotype))
    }

    pub fn update_diagram_description(
        &mut self,
        id: DiagramId,
        description: impl Into<String>,
        mode: SetMode,
    ) -> Result<Diagram, CtrlError> {
        self.update_diagram_with(id, mode, |diagram| diagram.set_description(description))
    }

    pub fn update_diagram_list_order(
        &mut self,
        id: DiagramId,
        list_order: i32,
        mode: SetMode,
    ) -> Result<Diagram, CtrlError> {
        self.update_diagram_with(id, mode, |diagram| diagram.set_list_order(list_order))
    }

    pub fn update_diagram_parent(
        &mut self,
        id: DiagramId,
        parent_id: Option<DiagramId>,
        mode: SetMode,
    ) -> Result<Diagram, CtrlError> {
        if let Some(parent_id) = parent_id {
            // The new parent must exist and must not sit below the diagram.
            let mut cursor = Some(parent_id);
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    return Err(CtrlError::InvalidRequest);
                }
                cursor = self.db.diagram(ancestor)?.parent_id();
            }
        }
        self.update_diagram_with(id, mode, |diagram| diagram.set_parent_id(parent_id))
    }

    /// Changes the diagram kind and lets the lifeline rules repair every
    /// element on it: scenario diagrams get lifelines created, all other
    /// kinds get them deleted.
    pub fn update_diagram_type(
        &mut self,
        id: DiagramId,
        diagram_type: DiagramType,
        mode: SetMode,
    ) -> Result<Diagram, CtrlError> {
        let before =
            self.update_diagram_with(id, mode, |diagram| diagram.set_diagram_type(diagram_type))?;
        policy::post_update_diagram_type(self, id)?;
        Ok(before)
    }

    /// Deletes an empty diagram. Refuses while elements or child diagrams
    /// remain on it.
    pub fn delete_diagram(&mut self, id: DiagramId, mode: SetMode) -> Result<Diagram, CtrlError> {
        self.db.diagram(id)?;
        if self.db.elements_in_diagram(id).next().is_some()
            || self.db.child_diagrams(id).next().is_some()
        {
            return Err(CtrlError::StillReferenced {
                table: EntityTable::Diagram,
                id: id.as_u64(),
            });
        }
        self.open_set(mode);
        let before = self.db.remove_diagram(id)?;
        self.log.record(ActionRecord::Diagram(Change::Deleted {
            before: before.clone(),
        }));
        self.close_set();
        Ok(before)
    }

    /// Places a classifier on a diagram. On scenario diagrams the policy
    /// engine attaches a lifeline afterwards if none was supplied.
    pub fn create_element(
        &mut self,
        element: DiagramElement,
        mode: SetMode,
    ) -> Result<DiagramElementId, CtrlError> {
        self.db.diagram(element.diagram_id())?;
        self.db.classifier(element.classifier_id())?;
        if let Some(feature_id) = element.focused_feature() {
            self.check_focusable(element.classifier_id(), feature_id)?;
        }
        self.open_set(mode);
        let row = self.db.insert_element(element).clone();
        let id = row.id();
        self.log
            .record(ActionRecord::Element(Change::Created { after: row }));
        self.close_set();
        policy::post_create_element(self, id)?;
        Ok(id)
    }

    fn update_element_with(
        &mut self,
        id: DiagramElementId,
        mode: SetMode,
        edit: impl FnOnce(&mut DiagramElement),
    ) -> Result<DiagramElement, CtrlError> {
        let before = self.db.element(id)?.clone();
        let mut after = before.clone();
        edit(&mut after);
        self.open_set(mode);
        self.db.put_element(after.clone());
        self.log.record(ActionRecord::Element(Change::Modified {
            before: before.clone(),
            after,
        }));
        self.close_set();
        Ok(before)
    }

    pub fn update_element_display_flags(
        &mut self,
        id: DiagramElementId,
        display_flags: DisplayFlags,
        mode: SetMode,
    ) -> Result<DiagramElement, CtrlError> {
        self.update_element_with(id, mode, |element| element.set_display_flags(display_flags))
    }

    pub fn update_element_focused_feature(
        &mut self,
        id: DiagramElementId,
        focused_feature: Option<FeatureId>,
        mode: SetMode,
    ) -> Result<DiagramElement, CtrlError> {
        if let Some(feature_id) = focused_feature {
            let classifier_id = self.db.element(id)?.classifier_id();
            self.check_focusable(classifier_id, feature_id)?;
        }
        self.update_element_with(id, mode, |element| {
            element.set_focused_feature(focused_feature)
        })
    }

    /// Removes a classifier from a diagram, then lets the cleanup rules run:
    /// unreferenced classifier, invisible relationships, orphaned lifeline.
    pub fn delete_element(
        &mut self,
        id: DiagramElementId,
        mode: SetMode,
    ) -> Result<DiagramElement, CtrlError> {
        self.db.element(id)?;
        self.open_set(mode);
        let before = self.db.remove_element(id)?;
        self.log.record(ActionRecord::Element(Change::Deleted {
            before: before.clone(),
        }));
        self.close_set();
        policy::post_delete_element(self, &before)?;
        Ok(before)
    }
}

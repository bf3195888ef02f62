// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Classifier, feature, and relationship operations.
impl Controller {
    pub fn create_classifier(
        &mut self,
        classifier: Classifier,
        mode: SetMode,
    ) -> Result<ClassifierId, CtrlError> {
        self.open_set(mode);
        let row = self.db.insert_classifier(classifier).clone();
        let id = row.id();
        self.log
            .record(ActionRecord::Classifier(Change::Created { after: row }));
        self.close_set();
        Ok(id)
    }

    fn update_classifier_with(
        &mut self,
        id: ClassifierId,
        mode: SetMode,
        edit: impl FnOnce(&mut Classifier),
    ) -> Result<Classifier, CtrlError> {
        let before = self.db.classifier(id)?.clone();
        let mut after = before.clone();
        edit(&mut after);
        self.open_set(mode);
        self.db.put_classifier(after.clone());
        self.log.record(ActionRecord::Classifier(Change::Modified {
            before: before.clone(),
            after,
        }));
        self.close_set();
        Ok(before)
    }

    pub fn update_classifier_name(
        &mut self,
        id: ClassifierId,
        name: impl Into<String>,
        mode: SetMode,
    ) -> Result<Classifier, CtrlError> {
        self.update_classifier_with(id, mode, |classifier| classifier.set_name(name))
    }

    pub fn update_classifier_stereotype(
        &mut self,
        id: ClassifierId,
        stereotype: impl Into<String>,
        mode: SetMode,
    ) -> Result<Classifier, CtrlError> {
        self.update_classifier_with(id, mode, |classifier| classifier.set_stereotype(stereotype))
    }

    pub fn update_classifier_description(
        &mut self,
        id: ClassifierId,
        description: impl Into<String>,
        mode: SetMode,
    ) -> Result<Classifier, CtrlError> {
        self.update_classifier_with(id, mode, |classifier| {
            classifier.set_description(description)
        })
    }

    pub fn update_classifier_order_hints(
        &mut self,
        id: ClassifierId,
        x_order: i32,
        y_order: i32,
        mode: SetMode,
    ) -> Result<Classifier, CtrlError> {
        self.update_classifier_with(id, mode, |classifier| {
            classifier.set_order_hints(x_order, y_order)
        })
    }

    pub fn update_classifier_list_order(
        &mut self,
        id: ClassifierId,
        list_order: i32,
        mode: SetMode,
    ) -> Result<Classifier, CtrlError> {
        self.update_classifier_with(id, mode, |classifier| classifier.set_list_order(list_order))
    }

    /// Deletes a classifier and its features as one cascade.
    ///
    /// Refuses while any element or relationship references the classifier,
    /// with nothing mutated. Features are deleted through the facade so their
    /// deletions are logged and run their own rules; the whole cascade lands
    /// in one action set.
    pub fn delete_classifier(
        &mut self,
        id: ClassifierId,
        mode: SetMode,
    ) -> Result<Classifier, CtrlError> {
        self.db.classifier(id)?;
        if self.db.elements_of_classifier(id).next().is_some()
            || self.db.relationships_of_classifier(id).next().is_some()
        {
            return Err(CtrlError::StillReferenced {
                table: EntityTable::Classifier,
                id: id.as_u64(),
            });
        }
        let feature_ids: SmallVec<[FeatureId; 8]> =
            self.db.features_of_classifier(id).map(Feature::id).collect();
        let mut mode = mode;
        for feature_id in feature_ids {
            self.delete_feature(feature_id, mode)?;
            mode = SetMode::Append;
        }
        self.open_set(mode);
        let before = self.db.remove_classifier(id)?;
        self.log.record(ActionRecord::Classifier(Change::Deleted {
            before: before.clone(),
        }));
        self.close_set();
        Ok(before)
    }

    pub fn create_feature(
        &mut self,
        feature: Feature,
        mode: SetMode,
    ) -> Result<FeatureId, CtrlError> {
        self.db.classifier(feature.classifier_id())?;
        self.open_set(mode);
        let row = self.db.insert_feature(feature).clone();
        let id = row.id();
        self.log
            .record(ActionRecord::Feature(Change::Created { after: row }));
        self.close_set();
        Ok(id)
    }

    fn update_feature_with(
        &mut self,
        id: FeatureId,
        mode: SetMode,
        edit: impl FnOnce(&mut Feature),
    ) -> Result<Feature, CtrlError> {
        let before = self.db.feature(id)?.clone();
        let mut after = before.clone();
        edit(&mut after);
        self.open_set(mode);
        self.db.put_feature(after.clone());
        self.log.record(ActionRecord::Feature(Change::Modified {
            before: before.clone(),
            after,
        }));
        self.close_set();
        Ok(before)
    }

    pub fn update_feature_key(
        &mut self,
        id: FeatureId,
        key: impl Into<String>,
        mode: SetMode,
    ) -> Result<Feature, CtrlError> {
        self.update_feature_with(id, mode, |feature| feature.set_key(key))
    }

    pub fn update_feature_value(
        &mut self,
        id: FeatureId,
        value: impl Into<String>,
        mode: SetMode,
    ) -> Result<Feature, CtrlError> {
        self.update_feature_with(id, mode, |feature| feature.set_value(value))
    }

    pub fn update_feature_description(
        &mut self,
        id: FeatureId,
        description: impl Into<String>,
        mode: SetMode,
    ) -> Result<Feature, CtrlError> {
        self.update_feature_with(id, mode, |feature| feature.set_description(description))
    }

    pub fn update_feature_list_order(
        &mut self,
        id: FeatureId,
        list_order: i32,
        mode: SetMode,
    ) -> Result<Feature, CtrlError> {
        self.update_feature_with(id, mode, |feature| feature.set_list_order(list_order))
    }

    /// Deletes a feature, then lets the unlink rule reset every
    /// `focused_feature` pointer that referenced it and drop relationships
    /// anchored on it.
    pub fn delete_feature(&mut self, id: FeatureId, mode: SetMode) -> Result<Feature, CtrlError> {
        self.db.feature(id)?;
        self.open_set(mode);
        let before = self.db.remove_feature(id)?;
        self.log.record(ActionRecord::Feature(Change::Deleted {
            before: before.clone(),
        }));
        self.close_set();
        policy::post_delete_feature(self, &before)?;
        Ok(before)
    }

    pub fn create_relationship(
        &mut self,
        relationship: Relationship,
        mode: SetMode,
    ) -> Result<RelationshipId, CtrlError> {
        self.db.classifier(relationship.from_classifier())?;
        self.db.classifier(relationship.to_classifier())?;
        self.check_anchor(relationship.from_classifier(), relationship.from_feature())?;
        self.check_anchor(relationship.to_classifier(), relationship.to_feature())?;
        self.open_set(mode);
        let row = self.db.insert_relationship(relationship).clone();
        let id = row.id();
        self.log
            .record(ActionRecord::Relationship(Change::Created { after: row }));
        self.close_set();
        Ok(id)
    }

    /// A feature anchor must belong to the endpoint classifier it decorates.
    fn check_anchor(
        &self,
        classifier_id: ClassifierId,
        anchor: Option<FeatureId>,
    ) -> Result<(), CtrlError> {
        let Some(feature_id) = anchor else {
            return Ok(());
        };
        let feature = self.db.feature(feature_id)?;
        if feature.classifier_id() != classifier_id {
            return Err(CtrlError::InvalidRequest);
        }
        Ok(())
    }

    fn update_relationship_with(
        &mut self,
        id: RelationshipId,
        mode: SetMode,
        edit: impl FnOnce(&mut Relationship),
    ) -> Result<Relationship, CtrlError> {
        let before = self.db.relationship(id)?.clone();
        let mut after = before.clone();
        edit(&mut after);
        self.open_set(mode);
        self.db.put_relationship(after.clone());
        self.log.record(ActionRecord::Relationship(Change::Modified {
            before: before.clone(),
            after,
        }));
        self.close_set();
        Ok(before)
    }

    pub fn update_relationship_name(
        &mut self,
        id: RelationshipId,
        name: impl Into<String>,
        mode: SetMode,
    ) -> Result<Relationship, CtrlError> {
        self.update_relationship_with(id, mode, |relationship| relationship.set_name(name))
    }

    pub fn update_relationship_stereotype(
        &mut self,
        id: RelationshipId,
        stereotype: impl Into<String>,
        mode: SetMode,
    ) -> Result<Relationship, CtrlError> {
        self.update_relationship_with(id, mode, |relationship| {
            relationship.set_stereotype(stereotype)
        })
    }

    pub fn update_relationship_description(
        &mut self,
        id: RelationshipId,
        description: impl Into<String>,
        mode: SetMode,
    ) -> Result<Relationship, CtrlError> {
        self.update_relationship_with(id, mode, |relationship| {
            relationship.set_description(description)
        })
    }

    pub fn update_relationship_from_feature(
        &mut self,
        id: RelationshipId,
        anchor: Option<FeatureId>,
        mode: SetMode,
    ) -> Result<Relationship, CtrlError> {
        let from_classifier = self.db.relationship(id)?.from_classifier();
        self.check_anchor(from_classifier, anchor)?;
        self.update_relationship_with(id, mode, |relationship| {
            relationship.set_from_feature(anchor)
        })
    }

    pub fn update_relationship_to_feature(
        &mut self,
        id: RelationshipId,
        anchor: Option<FeatureId>,
        mode: SetMode,
    ) -> Result<Relationship, CtrlError> {
        let to_classifier = self.db.relationship(id)?.to_classifier();
        self.check_anchor(to_classifier, anchor)?;
        self.update_relationship_with(id, mode, |relationship| {
            relationship.set_to_feature(anchor)
        })
    }

    pub fn delete_relationship(
        &mut self,
        id: RelationshipId,
        mode: SetMode,
    ) -> Result<Relationship, CtrlError> {
        self.db.relationship(id)?;
        self.open_set(mode);
        let before = self.db.remove_relationship(id)?;
        self.log.record(ActionRecord::Relationship(Change::Deleted {
            before: before.clone(),
        }));
        self.close_set();
        Ok(before)
    }
}

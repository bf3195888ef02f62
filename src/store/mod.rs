// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory data store.
//!
//! `Database` owns the five record tables plus the revision marker. All
//! checked writes go through the mutation facade; undo/redo replay uses the
//! crate-internal raw row writes so no consistency rules re-run during replay.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{
    Classifier, ClassifierId, Diagram, DiagramElement, DiagramElementId, DiagramId, EntityTable,
    Feature, FeatureId, Relationship, RelationshipId,
};


#[derive(Debug)]
pub enum StoreError {
    NotFound {
        table: EntityTable,
        id: u64,
    },
    StillReferenced {
        table: EntityTable,
        id: u64,
    },
    Structure {
        message: String,
    },
    Json {
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { table, id } => write!(f, "{table} {id} not found"),
            Self::StillReferenced { table, id } => {
                write!(f, "{table} {id} is still referenced")
            }
            Self::Structure { message } => write!(f, "model structure error: {message}"),
            Self::Json { source } => write!(f, "json error: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::StillReferenced { .. } => None,
            Self::Structure { .. } => None,
            Self::Json { source } => Some(source),
        }
    }
}

/// The whole model, one `BTreeMap` per record table.
///
/// The id mint counter hands out table-unique numeric ids; raw writes keep it
/// ahead of any restored id so replayed rows never collide with fresh ones.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Database {
    diagrams: BTreeMap<DiagramId, Diagram>,
    elements: BTreeMap<DiagramElementId, DiagramElement>,
    classifiers: BTreeMap<ClassifierId, Classifier>,
    features: BTreeMap<FeatureId, Feature>,
    relationships: BTreeMap<RelationshipId, Relationship>,
    next_id: u64,
    revision: u64,
}

// The mint counter is an allocation detail, not model state. Two databases
// holding the same rows at the same revision are the same model.
impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        self.diagrams == other.diagrams
            && self.elements == other.elements
            && self.classifiers == other.classifiers
            && self.features == other.features
            && self.relationships == other.relationships
            && self.revision == other.revision
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Self {
            diagrams: BTreeMap::new(),
            elements: BTreeMap::new(),
            classifiers: BTreeMap::new(),
            features: BTreeMap::new(),
            relationships: BTreeMap::new(),
            next_id: 1,
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn note_restored_id(&mut self, id: u64) {
        self.next_id = self.next_id.max(id + 1);
    }

    // ---- point lookups ----

    pub fn diagram(&self, id: DiagramId) -> Result<&Diagram, StoreError> {
        self.diagrams.get(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Diagram,
            id: id.as_u64(),
        })
    }

    pub fn element(&self, id: DiagramElementId) -> Result<&DiagramElement, StoreError> {
        self.elements.get(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Element,
            id: id.as_u64(),
        })
    }

    pub fn classifier(&self, id: ClassifierId) -> Result<&Classifier, StoreError> {
        self.classifiers.get(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Classifier,
            id: id.as_u64(),
        })
    }

    pub fn feature(&self, id: FeatureId) -> Result<&Feature, StoreError> {
        self.features.get(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Feature,
            id: id.as_u64(),
        })
    }

    pub fn relationship(&self, id: RelationshipId) -> Result<&Relationship, StoreError> {
        self.relationships.get(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Relationship,
            id: id.as_u64(),
        })
    }

    // ---- whole tables ----

    pub fn diagrams(&self) -> &BTreeMap<DiagramId, Diagram> {
        &self.diagrams
    }

    pub fn elements(&self) -> &BTreeMap<DiagramElementId, DiagramElement> {
        &self.elements
    }

    pub fn classifiers(&self) -> &BTreeMap<ClassifierId, Classifier> {
        &self.classifiers
    }

    pub fn features(&self) -> &BTreeMap<FeatureId, Feature> {
        &self.features
    }

    pub fn relationships(&self) -> &BTreeMap<RelationshipId, Relationship> {
        &self.relationships
    }

    // ---- bulk queries ----

    pub fn elements_in_diagram(
        &self,
        diagram_id: DiagramId,
    ) -> impl Iterator<Item = &DiagramElement> {
        self.elements
            .values()
            .filter(move |e| e.diagram_id() == diagram_id)
    }

    pub fn elements_of_classifier(
        &self,
        classifier_id: ClassifierId,
    ) -> impl Iterator<Item = &DiagramElement> {
        self.elements
            .values()
            .filter(move |e| e.classifier_id() == classifier_id)
    }

    pub fn features_of_classifier(
        &self,
        classifier_id: ClassifierId,
    ) -> impl Iterator<Item = &Feature> {
        self.features
            .values()
            .filter(move |feat| feat.classifier_id() == classifier_id)
    }

    /// Relationships touching the classifier on either end.
    pub fn relationships_of_classifier(
        &self,
        classifier_id: ClassifierId,
    ) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .values()
            .filter(move |rel| rel.touches(classifier_id))
    }

    /// Relationships anchored on the feature at either end.
    pub fn relationships_of_feature(
        &self,
        feature_id: FeatureId,
    ) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .values()
            .filter(move |rel| rel.touches_feature(feature_id))
    }

    /// Every diagram on which the classifier is placed as an element.
    pub fn diagrams_containing(&self, classifier_id: ClassifierId) -> BTreeSet<DiagramId> {
        self.elements_of_classifier(classifier_id)
            .map(|e| e.diagram_id())
            .collect()
    }

    pub fn child_diagrams(&self, diagram_id: DiagramId) -> impl Iterator<Item = &Diagram> {
        self.diagrams
            .values()
            .filter(move |d| d.parent_id() == Some(diagram_id))
    }

    // ---- checked writes ----

    pub fn insert_diagram(&mut self, mut diagram: Diagram) -> &Diagram {
        let id = DiagramId::new(self.mint_id());
        diagram.set_id(id);
        self.revision += 1;
        self.diagrams.entry(id).or_insert(diagram)
    }

    pub fn insert_element(&mut self, mut element: DiagramElement) -> &DiagramElement {
        let id = DiagramElementId::new(self.mint_id());
        element.set_id(id);
        self.revision += 1;
        self.elements.entry(id).or_insert(element)
    }

    pub fn insert_classifier(&mut self, mut classifier: Classifier) -> &Classifier {
        let id = ClassifierId::new(self.mint_id());
        classifier.set_id(id);
        self.revision += 1;
        self.classifiers.entry(id).or_insert(classifier)
    }

    pub fn insert_feature(&mut self, mut feature: Feature) -> &Feature {
        let id = FeatureId::new(self.mint_id());
        feature.set_id(id);
        self.revision += 1;
        self.features.entry(id).or_insert(feature)
    }

    pub fn insert_relationship(&mut self, mut relationship: Relationship) -> &Relationship {
        let id = RelationshipId::new(self.mint_id());
        relationship.set_id(id);
        self.revision += 1;
        self.relationships.entry(id).or_insert(relationship)
    }

    /// Removes a diagram. Refuses while it still holds elements or child
    /// diagrams.
    pub fn remove_diagram(&mut self, id: DiagramId) -> Result<Diagram, StoreError> {
        self.diagram(id)?;
        let referenced = self.elements_in_diagram(id).next().is_some()
            || self.child_diagrams(id).next().is_some();
        if referenced {
            return Err(StoreError::StillReferenced {
                table: EntityTable::Diagram,
                id: id.as_u64(),
            });
        }
        let row = self.diagrams.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Diagram,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    pub fn remove_element(&mut self, id: DiagramElementId) -> Result<DiagramElement, StoreError> {
        let row = self.elements.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Element,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    /// Removes a classifier. Refuses while any element, feature, or
    /// relationship still references it.
    pub fn remove_classifier(&mut self, id: ClassifierId) -> Result<Classifier, StoreError> {
        self.classifier(id)?;
        let referenced = self.elements_of_classifier(id).next().is_some()
            || self.features_of_classifier(id).next().is_some()
            || self.relationships_of_classifier(id).next().is_some();
        if referenced {
            return Err(StoreError::StillReferenced {
                table: EntityTable::Classifier,
                id: id.as_u64(),
            });
        }
        let row = self.classifiers.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Classifier,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    pub fn remove_feature(&mut self, id: FeatureId) -> Result<Feature, StoreError> {
        let row = self.features.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Feature,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    pub fn remove_relationship(
        &mut self,
        id: RelationshipId,
    ) -> Result<Relationship, StoreError> {
        let row = self.relationships.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Relationship,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    // ---- raw writes for replay ----
    //
    // Upserts keyed by the row's own id. No referential checks here: replay
    // restores rows in log order, which can be temporarily inconsistent.

    pub(crate) fn put_diagram(&mut self, diagram: Diagram) {
        self.note_restored_id(diagram.id().as_u64());
        self.revision += 1;
        self.diagrams.insert(diagram.id(), diagram);
    }

    pub(crate) fn put_element(&mut self, element: DiagramElement) {
        self.note_restored_id(element.id().as_u64());
        self.revision += 1;
        self.elements.insert(element.id(), element);
    }

    pub(crate) fn put_classifier(&mut self, classifier: Classifier) {
        self.note_restored_id(classifier.id().as_u64());
        self.revision += 1;
        self.classifiers.insert(classifier.id(), classifier);
    }

    pub(crate) fn put_feature(&mut self, feature: Feature) {
        self.note_restored_id(feature.id().as_u64());
        self.revision += 1;
        self.features.insert(feature.id(), feature);
    }

    pub(crate) fn put_relationship(&mut self, relationship: Relationship) {
        self.note_restored_id(relationship.id().as_u64());
        self.revision += 1;
        self.relationships.insert(relationship.id(), relationship);
    }

    pub(crate) fn take_diagram(&mut self, id: DiagramId) -> Result<Diagram, StoreError> {
        let row = self.diagrams.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Diagram,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    pub(crate) fn take_element(
        &mut self,
        id: DiagramElementId,
    ) -> Result<DiagramElement, StoreError> {
        self.remove_element(id)
    }

    pub(crate) fn take_classifier(&mut self, id: ClassifierId) -> Result<Classifier, StoreError> {
        let row = self.classifiers.remove(&id).ok_or(StoreError::NotFound {
            table: EntityTable::Classifier,
            id: id.as_u64(),
        })?;
        self.revision += 1;
        Ok(row)
    }

    pub(crate) fn take_feature(&mut self, id: FeatureId) -> Result<Feature, StoreError> {
        self.remove_feature(id)
    }

    pub(crate) fn take_relationship(
        &mut self,
        id: RelationshipId,
    ) -> Result<Relationship, StoreError> {
        self.remove_relationship(id)
    }

    // ---- snapshot codec ----

    /// Serializes the whole model as pretty JSON, for fixtures and
    /// diagnostics. Not an interchange format.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|source| StoreError::Json { source })
    }

    /// Restores a model from [`Database::to_json`] output, then verifies
    /// referential structure so hand-edited fixtures fail loudly.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut db: Database =
            serde_json::from_str(json).map_err(|source| StoreError::Json { source })?;
        db.verify_structure()?;
        // A hand-edited snapshot may carry a stale mint counter.
        let ids = db
            .diagrams
            .keys()
            .map(|id| id.as_u64())
            .chain(db.elements.keys().map(|id| id.as_u64()))
            .chain(db.classifiers.keys().map(|id| id.as_u64()))
            .chain(db.features.keys().map(|id| id.as_u64()))
            .chain(db.relationships.keys().map(|id| id.as_u64()))
            .max();
        if let Some(max_id) = ids {
            db.note_restored_id(max_id);
        }
        Ok(db)
    }

    fn verify_structure(&self) -> Result<(), StoreError> {
        let structure = |message: String| StoreError::Structure { message };

        for diagram in self.diagrams.values() {
            if let Some(parent_id) = diagram.parent_id() {
                if !self.diagrams.contains_key(&parent_id) {
                    return Err(structure(format!(
                        "diagram {} has unknown parent {parent_id}",
                        diagram.id()
                    )));
                }
            }
            // The parent chain must stay acyclic; reparenting walks it.
            let mut cursor = diagram.parent_id();
            let mut hops = self.diagrams.len();
            while let Some(ancestor) = cursor {
                if ancestor == diagram.id() || hops == 0 {
                    return Err(structure(format!(
                        "diagram {} sits in a parent cycle",
                        diagram.id()
                    )));
                }
                hops -= 1;
                cursor = self.diagrams.get(&ancestor).and_then(Diagram::parent_id);
            }
        }
        for element in self.elements.values() {
            if !self.diagrams.contains_key(&element.diagram_id()) {
                return Err(structure(format!(
                    "element {} sits on unknown diagram {}",
                    element.id(),
                    element.diagram_id()
                )));
            }
            if !self.classifiers.contains_key(&element.classifier_id()) {
                return Err(structure(format!(
                    "element {} shows unknown classifier {}",
                    element.id(),
                    element.classifier_id()
                )));
            }
            if let Some(feature_id) = element.focused_feature() {
                if !self.features.contains_key(&feature_id) {
                    return Err(structure(format!(
                        "element {} focuses unknown feature {feature_id}",
                        element.id()
                    )));
                }
            }
        }
        for feature in self.features.values() {
            if !self.classifiers.contains_key(&feature.classifier_id()) {
                return Err(structure(format!(
                    "feature {} belongs to unknown classifier {}",
                    feature.id(),
                    feature.classifier_id()
                )));
            }
        }
        for rel in self.relationships.values() {
            if !self.classifiers.contains_key(&rel.from_classifier()) {
                return Err(structure(format!(
                    "relationship {} starts at unknown classifier {}",
                    rel.id(),
                    rel.from_classifier()
                )));
            }
            if !self.classifiers.contains_key(&rel.to_classifier()) {
                return Err(structure(format!(
                    "relationship {} ends at unknown classifier {}",
                    rel.id(),
                    rel.to_classifier()
                )));
            }
            for feature_id in [rel.from_feature(), rel.to_feature()].into_iter().flatten() {
                if !self.features.contains_key(&feature_id) {
                    return Err(structure(format!(
                        "relationship {} anchors on unknown feature {feature_id}",
                        rel.id()
                    )));
                }
            }
        }
        Ok(())
    }
}

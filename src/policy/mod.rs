// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Consistency rules.
//!
//! One stateless entry point per mutation trigger. Each rule reads the store,
//! stages the ids it intends to touch in call-local collections, and then
//! issues compensating operations back through the facade with
//! [`SetMode::Append`], so a whole cascade shares the triggering operation's
//! action set. Rules re-enter the facade and therefore each other; staging
//! must never live in shared scratch state.
//!
//! Failure policy: a failed compensation does not stop the remaining ones in
//! the same rule. The first error is reported once all compensations ran; the
//! model keeps every repair that succeeded.

use smallvec::SmallVec;

use crate::model::{
    ClassifierId, DiagramElement, DiagramElementId, DiagramId, Feature, FeatureId, FeatureType,
    RelationshipId,
};
use crate::ops::{Controller, CtrlError, SetMode};


/// After placing an element: scenario diagrams require a lifeline, so create
/// and attach one when the new element arrived without.
pub fn post_create_element(
    ctrl: &mut Controller,
    element_id: DiagramElementId,
) -> Result<(), CtrlError> {
    let element = ctrl.database().element(element_id)?;
    if element.focused_feature().is_some() {
        return Ok(());
    }
    let scenario = ctrl
        .database()
        .diagram(element.diagram_id())?
        .diagram_type()
        .is_scenario();
    if scenario {
        attach_lifeline(ctrl, element_id)?;
    }
    Ok(())
}

/// After removing an element, in fixed order: try to drop the now possibly
/// unreferenced classifier, then drop relationships that lost their last
/// shared diagram, then drop the element's own lifeline. Later rules depend
/// on the store state the earlier ones leave behind.
pub fn post_delete_element(
    ctrl: &mut Controller,
    deleted: &DiagramElement,
) -> Result<(), CtrlError> {
    let mut first_err = None;

    note(
        &mut first_err,
        drop_unreferenced_classifier(ctrl, deleted.classifier_id()),
    );
    note(
        &mut first_err,
        drop_invisible_relationships(ctrl, deleted.classifier_id()),
    );
    if let Some(feature_id) = deleted.focused_feature() {
        // The classifier cascade may have taken the lifeline along already.
        if ctrl.database().feature(feature_id).is_ok() {
            note(
                &mut first_err,
                ctrl.delete_feature(feature_id, SetMode::Append).map(drop),
            );
        }
    }

    finish(first_err)
}

/// After changing a diagram's kind: every element on a scenario diagram gets
/// a lifeline, every element on any other kind loses its focused one.
pub fn post_update_diagram_type(
    ctrl: &mut Controller,
    diagram_id: DiagramId,
) -> Result<(), CtrlError> {
    let scenario = ctrl
        .database()
        .diagram(diagram_id)?
        .diagram_type()
        .is_scenario();
    if scenario {
        ensure_lifelines(ctrl, diagram_id)
    } else {
        drop_lifelines(ctrl, diagram_id)
    }
}

/// After removing a feature: reset every `focused_feature` pointer that
/// referenced it, and drop the relationships anchored on it.
pub fn post_delete_feature(ctrl: &mut Controller, deleted: &Feature) -> Result<(), CtrlError> {
    let mut first_err = None;

    if deleted.feature_type() == FeatureType::Lifeline {
        let stale: SmallVec<[DiagramElementId; 8]> = ctrl
            .database()
            .elements_of_classifier(deleted.classifier_id())
            .filter(|element| element.focused_feature() == Some(deleted.id()))
            .map(DiagramElement::id)
            .collect();
        for element_id in stale {
            note(
                &mut first_err,
                ctrl.update_element_focused_feature(element_id, None, SetMode::Append)
                    .map(drop),
            );
        }
    }

    let anchored: SmallVec<[RelationshipId; 8]> = ctrl
        .database()
        .relationships_of_feature(deleted.id())
        .map(|relationship| relationship.id())
        .collect();
    for relationship_id in anchored {
        if ctrl.database().relationship(relationship_id).is_err() {
            continue;
        }
        note(
            &mut first_err,
            ctrl.delete_relationship(relationship_id, SetMode::Append)
                .map(drop),
        );
    }

    finish(first_err)
}

/// Attempts to delete the classifier. "Still referenced" is the expected
/// answer while other elements or relationships use it and is swallowed; any
/// other error propagates.
fn drop_unreferenced_classifier(
    ctrl: &mut Controller,
    classifier_id: ClassifierId,
) -> Result<(), CtrlError> {
    match ctrl.delete_classifier(classifier_id, SetMode::Append) {
        Ok(_) => Ok(()),
        Err(CtrlError::StillReferenced { .. }) => Ok(()),
        Err(err) => Err(err),
    }
}

/// A relationship stays visible while its endpoints share at least one
/// diagram; identical endpoints are always visible. Invisible ones are
/// staged first and deleted after the scan, so recursive deletes cannot
/// disturb the iteration.
fn drop_invisible_relationships(
    ctrl: &mut Controller,
    classifier_id: ClassifierId,
) -> Result<(), CtrlError> {
    let mut doomed: SmallVec<[RelationshipId; 8]> = SmallVec::new();
    {
        let db = ctrl.database();
        for relationship in db.relationships_of_classifier(classifier_id) {
            if relationship.is_reflexive() {
                continue;
            }
            let from = db.diagrams_containing(relationship.from_classifier());
            let to = db.diagrams_containing(relationship.to_classifier());
            if from.intersection(&to).next().is_none() {
                doomed.push(relationship.id());
            }
        }
    }

    let mut first_err = None;
    for relationship_id in doomed {
        if ctrl.database().relationship(relationship_id).is_err() {
            continue;
        }
        note(
            &mut first_err,
            ctrl.delete_relationship(relationship_id, SetMode::Append)
                .map(drop),
        );
    }
    finish(first_err)
}

fn ensure_lifelines(ctrl: &mut Controller, diagram_id: DiagramId) -> Result<(), CtrlError> {
    let bare: SmallVec<[DiagramElementId; 8]> = ctrl
        .database()
        .elements_in_diagram(diagram_id)
        .filter(|element| element.focused_feature().is_none())
        .map(DiagramElement::id)
        .collect();

    let mut first_err = None;
    for element_id in bare {
        note(&mut first_err, attach_lifeline(ctrl, element_id));
    }
    finish(first_err)
}

fn drop_lifelines(ctrl: &mut Controller, diagram_id: DiagramId) -> Result<(), CtrlError> {
    let doomed: SmallVec<[FeatureId; 8]> = ctrl
        .database()
        .elements_in_diagram(diagram_id)
        .filter_map(DiagramElement::focused_feature)
        .collect();

    let mut first_err = None;
    for feature_id in doomed {
        // Elements may share a lifeline; the first deletion unlinks the rest.
        if ctrl.database().feature(feature_id).is_err() {
            continue;
        }
        note(
            &mut first_err,
            ctrl.delete_feature(feature_id, SetMode::Append).map(drop),
        );
    }
    finish(first_err)
}

/// Creates one lifeline on the element's classifier, keyed by the classifier
/// name, and focuses the element on it.
fn attach_lifeline(ctrl: &mut Controller, element_id: DiagramElementId) -> Result<(), CtrlError> {
    let element = ctrl.database().element(element_id)?;
    if element.focused_feature().is_some() {
        return Ok(());
    }
    let classifier_id = element.classifier_id();
    let key = ctrl.database().classifier(classifier_id)?.name().to_owned();

    let lifeline = Feature::new(FeatureId::new(0), classifier_id, FeatureType::Lifeline, key);
    let feature_id = ctrl.create_feature(lifeline, SetMode::Append)?;
    ctrl.update_element_focused_feature(element_id, Some(feature_id), SetMode::Append)?;
    Ok(())
}

fn note(first_err: &mut Option<CtrlError>, outcome: Result<(), CtrlError>) {
    if let Err(err) = outcome {
        first_err.get_or_insert(err);
    }
}

fn finish(first_err: Option<CtrlError>) -> Result<(), CtrlError> {
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

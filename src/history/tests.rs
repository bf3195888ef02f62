// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{ActionLog, ActionRecord, Change, HistoryError, LogEntry};
use crate::model::fixtures;
use crate::model::{ChangeStats, ClassifierId, ClassifierType, EntityTable, StatSeries};
use crate::store::Database;

#[fixture]
fn db() -> Database {
    Database::new()
}

/// Log seeded with the baseline boundary, the state a fresh controller has.
#[fixture]
fn log() -> ActionLog {
    let mut log = ActionLog::new();
    log.add_boundary(0).expect("baseline boundary");
    log
}

/// Emulates the facade's primitive-write protocol: store insert, one Created
/// record in the log.
fn create_classifier(db: &mut Database, log: &mut ActionLog, name: &str) -> ClassifierId {
    let row = db
        .insert_classifier(fixtures::classifier(0, ClassifierType::Class, name))
        .clone();
    let id = row.id();
    log.record(ActionRecord::Classifier(Change::Created { after: row }));
    id
}

fn close_set(db: &Database, log: &mut ActionLog) {
    log.add_boundary(db.revision()).expect("close action set");
}

#[rstest]
fn record_then_boundary_forms_one_closed_set(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    assert_eq!(log.len(), 3);
    assert_eq!(log.current(), 3);
    assert!(!log.truncated());
    assert!(log.entry(0).expect("baseline").is_boundary());
    assert!(!log.entry(1).expect("action").is_boundary());
    assert!(log.entry(2).expect("closing boundary").is_boundary());
}

#[rstest]
fn undo_needs_a_complete_action_set(mut db: Database, mut log: ActionLog) {
    let mut stats = ChangeStats::new();
    let err = log.undo(&mut db, &mut stats).unwrap_err();
    assert_eq!(err, HistoryError::InvalidRequest);
    assert!(stats.is_empty());
}

#[rstest]
fn undo_rolls_back_one_set_and_restores_revision(mut db: Database, mut log: ActionLog) {
    let initial_revision = db.revision();
    let id = create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo");

    assert!(db.classifier(id).is_err());
    assert_eq!(db.revision(), initial_revision);
    assert_eq!(stats.count(EntityTable::Classifier, StatSeries::Deleted), 1);
    assert_eq!(log.current(), 1);
    // The entries stay in place as the redo branch.
    assert_eq!(log.len(), 3);
}

#[rstest]
fn redo_replays_the_undone_set(mut db: Database, mut log: ActionLog) {
    let id = create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);
    let post_create_revision = db.revision();

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo");

    let mut stats = ChangeStats::new();
    log.redo(&mut db, &mut stats).expect("redo");

    assert_eq!(db.classifier(id).expect("restored").name(), "Vehicle");
    assert_eq!(db.revision(), post_create_revision);
    assert_eq!(stats.count(EntityTable::Classifier, StatSeries::Created), 1);
    assert_eq!(log.current(), log.len());
}

#[rstest]
fn undo_walks_every_action_of_the_set(mut db: Database, mut log: ActionLog) {
    let first = create_classifier(&mut db, &mut log, "Vehicle");
    let second = create_classifier(&mut db, &mut log, "Engine");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo");

    assert!(db.classifier(first).is_err());
    assert!(db.classifier(second).is_err());
    assert_eq!(stats.count(EntityTable::Classifier, StatSeries::Deleted), 2);
}

#[rstest]
fn undo_stops_at_the_set_boundary(mut db: Database, mut log: ActionLog) {
    let first = create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);
    let second = create_classifier(&mut db, &mut log, "Engine");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo newest set");

    assert!(db.classifier(first).is_ok());
    assert!(db.classifier(second).is_err());
}

#[rstest]
fn redo_without_a_branch_is_an_invalid_request(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    let err = log.redo(&mut db, &mut stats).unwrap_err();
    assert_eq!(err, HistoryError::InvalidRequest);
}

#[rstest]
fn new_write_discards_the_redo_branch(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo");
    assert!(log.current() < log.len());

    create_classifier(&mut db, &mut log, "Gearbox");
    close_set(&db, &mut log);
    assert_eq!(log.current(), log.len());

    let mut stats = ChangeStats::new();
    let err = log.redo(&mut db, &mut stats).unwrap_err();
    assert_eq!(err, HistoryError::InvalidRequest);
}

#[rstest]
fn boundary_eviction_of_the_last_undo_point_is_reported(mut db: Database) {
    let mut log = ActionLog::with_capacity(4);
    log.add_boundary(0).expect("baseline");

    // Three actions plus the closing boundary push the baseline out.
    create_classifier(&mut db, &mut log, "Vehicle");
    create_classifier(&mut db, &mut log, "Engine");
    create_classifier(&mut db, &mut log, "Gearbox");
    let err = log.add_boundary(db.revision()).unwrap_err();
    assert_eq!(err, HistoryError::BufferExceeded);

    // The boundary was still recorded; only the undo point is gone.
    assert!(log.truncated());
    assert_eq!(log.len(), 4);
    let mut stats = ChangeStats::new();
    let err = log.undo(&mut db, &mut stats).unwrap_err();
    assert_eq!(err, HistoryError::BufferExceeded);
}

#[rstest]
fn action_eviction_keeps_the_remaining_undo_point(mut db: Database) {
    let mut log = ActionLog::with_capacity(4);
    log.add_boundary(0).expect("baseline");

    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);
    // Second set: first action fills the buffer, the next two writes evict
    // the baseline boundary and the first action.
    create_classifier(&mut db, &mut log, "Engine");
    create_classifier(&mut db, &mut log, "Gearbox");
    log.add_boundary(db.revision())
        .expect("two boundaries still reachable");

    assert!(log.truncated());
    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("newest set undoable");
    assert_eq!(stats.count(EntityTable::Classifier, StatSeries::Deleted), 2);
}

#[rstest]
fn remove_last_boundary_reopens_the_set(mut db: Database, mut log: ActionLog) {
    let first = create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    log.remove_last_boundary().expect("reopen");
    let second = create_classifier(&mut db, &mut log, "Engine");
    close_set(&db, &mut log);

    // Both creations now sit in one set and undo together.
    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo merged set");
    assert!(db.classifier(first).is_err());
    assert!(db.classifier(second).is_err());
}

#[rstest]
fn remove_last_boundary_requires_a_trailing_boundary(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    let err = log.remove_last_boundary().unwrap_err();
    assert_eq!(err, HistoryError::InvalidRequest);
    assert_eq!(log.len(), 2);
}

#[rstest]
fn remove_last_boundary_drops_the_redo_branch(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo");
    assert_eq!(log.current(), 1);

    // The cursor now sits right after the baseline boundary.
    log.remove_last_boundary().expect("baseline is a boundary");
    assert!(log.is_empty());
    assert_eq!(log.current(), 0);
}

#[rstest]
fn undo_preview_matches_the_actual_undo(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    create_classifier(&mut db, &mut log, "Engine");
    close_set(&db, &mut log);

    let mut preview = ChangeStats::new();
    log.undo_iter().collect_stats(&mut preview);

    let mut actual = ChangeStats::new();
    log.undo(&mut db, &mut actual).expect("undo");

    assert_eq!(preview, actual);
    assert_eq!(preview.count(EntityTable::Classifier, StatSeries::Deleted), 2);
}

#[rstest]
fn redo_preview_matches_the_actual_redo(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);
    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo");

    let mut preview = ChangeStats::new();
    log.redo_iter().collect_stats(&mut preview);

    let mut actual = ChangeStats::new();
    log.redo(&mut db, &mut actual).expect("redo");

    assert_eq!(preview, actual);
    assert_eq!(preview.count(EntityTable::Classifier, StatSeries::Created), 1);
}

#[rstest]
fn undo_iter_yields_the_set_newest_first(mut db: Database, mut log: ActionLog) {
    let first = create_classifier(&mut db, &mut log, "Vehicle");
    let second = create_classifier(&mut db, &mut log, "Engine");
    close_set(&db, &mut log);

    let ids: Vec<u64> = log
        .undo_iter()
        .map(|record| match record {
            ActionRecord::Classifier(Change::Created { after }) => after.id().as_u64(),
            other => panic!("unexpected record {other:?}"),
        })
        .collect();
    assert_eq!(ids, vec![second.as_u64(), first.as_u64()]);

    // The preview cursor leaves the log untouched.
    assert_eq!(log.current(), log.len());
}

#[rstest]
fn replay_failures_are_tallied_not_fatal(mut db: Database, mut log: ActionLog) {
    // A creation whose row never reached the store cannot be taken back out.
    let ghost = fixtures::classifier(99, ClassifierType::Class, "Ghost");
    log.record(ActionRecord::Classifier(Change::Created { after: ghost }));
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    let mut stats = ChangeStats::new();
    log.undo(&mut db, &mut stats).expect("undo completes");

    assert_eq!(stats.count(EntityTable::Classifier, StatSeries::Deleted), 1);
    assert_eq!(stats.count(EntityTable::Classifier, StatSeries::Errors), 1);
    assert_eq!(log.current(), 1);
}

#[rstest]
fn entries_iterate_oldest_to_newest(mut db: Database, mut log: ActionLog) {
    create_classifier(&mut db, &mut log, "Vehicle");
    close_set(&db, &mut log);

    let shape: Vec<bool> = log.entries().map(LogEntry::is_boundary).collect();
    assert_eq!(shape, vec![true, false, true]);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{aggregate, create_test_table};
use crate::{CapacitySession, EditEvent, PendingChanges, SessionEdit, TableData};
use capacity_domain::{DayName, SlotKey};

fn edit_hours(session: &mut CapacitySession, stream_id: i64, raw: &str) -> SessionEdit {
    session
        .apply(&EditEvent::SetHours {
            stream_id,
            day: DayName::Monday,
            raw: raw.to_string(),
            previous: 0.0,
        })
        .unwrap()
}

#[test]
fn test_load_snapshots_baseline() {
    let session: CapacitySession = CapacitySession::new(create_test_table());
    assert_eq!(session.table(), session.baseline());
    assert!(session.pending().is_empty());
    assert!(!session.is_edited());
}

#[test]
fn test_edit_marks_session_edited() {
    let mut session: CapacitySession = CapacitySession::new(create_test_table());
    assert_eq!(edit_hours(&mut session, 1, "8"), SessionEdit::Applied);
    assert!(session.is_edited());
    assert_eq!(aggregate(&session.table().hours).hours(DayName::Monday), 8.0);
    assert_eq!(aggregate(&session.baseline().hours).hours(DayName::Monday), 0.0);
}

#[test]
fn test_rejected_edit_reports_previous() {
    let mut session: CapacitySession = CapacitySession::new(create_test_table());
    assert_eq!(
        edit_hours(&mut session, 1, "1000"),
        SessionEdit::Reverted { previous: 0.0 }
    );
    assert!(!session.is_edited());
}

#[test]
fn test_reset_restores_baseline() {
    let baseline: TableData = create_test_table();
    let mut session: CapacitySession = CapacitySession::new(baseline.clone());

    edit_hours(&mut session, 1, "8");
    edit_hours(&mut session, 2, "4.75");
    session
        .apply(&EditEvent::SetFreeze {
            key: SlotKey::new(2, "08:00", "12:00"),
            day: DayName::Friday,
            frozen: true,
        })
        .unwrap();

    session.reset_to_baseline();

    assert_eq!(session.table().hours, baseline.hours);
    assert_eq!(session.table().slots, baseline.slots);
    assert_eq!(session.pending(), &PendingChanges::default());
    assert!(!session.is_edited());
}

#[test]
fn test_mark_submitted_moves_baseline() {
    let mut session: CapacitySession = CapacitySession::new(create_test_table());
    edit_hours(&mut session, 1, "8");
    session.mark_submitted();

    assert!(!session.is_edited());
    assert!(session.pending().is_empty());

    session.reset_to_baseline();
    assert_eq!(session.table().hours[1].hours(DayName::Monday), 8.0);
}

#[test]
fn test_full_rows_payload_skips_aggregate() {
    let session: CapacitySession = CapacitySession::new(create_test_table());
    let payload: PendingChanges = session.full_rows_payload();

    assert_eq!(payload.hours.len(), 2);
    assert!(payload.hours.iter().all(|change| change.stream_id != 0));
    assert!(payload.hours.iter().all(|change| change.days.len() == 7));
    assert_eq!(payload.slots.len(), 3);
}

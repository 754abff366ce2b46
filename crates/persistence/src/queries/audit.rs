// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use evreg_domain::EventId;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    audit_event_id: i64,
    event_id: Option<i64>,
    #[allow(dead_code)]
    actor_id: String,
    #[allow(dead_code)]
    actor_type: String,
    actor_json: String,
    cause_json: String,
    #[allow(dead_code)]
    action_name: String,
    action_json: String,
    before_json: String,
    after_json: String,
    #[allow(dead_code)]
    created_at: String,
}

fn row_to_audit_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_json)?;

    Ok(AuditEvent::new(
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        row.event_id.map(EventId::new),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
    ))
}

/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `audit_event_id` - The audit event ID to retrieve
///
/// # Errors
///
/// Returns an error if the audit event is not found or cannot be
/// deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    audit_event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let result = audit_events::table
        .filter(audit_events::audit_event_id.eq(audit_event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn);

    let row: AuditEventRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Audit event {audit_event_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_audit_event(row)
}

/// Retrieves the ordered audit trail for an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event whose trail to retrieve
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn list_audit_events_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .order(audit_events::audit_event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(row_to_audit_event).collect()
}

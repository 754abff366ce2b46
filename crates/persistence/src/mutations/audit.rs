// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.
//!
//! Audit rows are written inside the same transaction as the mutation
//! they describe, so a rolled-back operation leaves no trace and a
//! committed one always has its row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_audit::AuditEvent;
use evreg_domain::EventId;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// The actor's identity and the action name are mirrored into plain
/// columns for filtering; the full structures travel as JSON.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The audit event to persist
/// * `created_at` - The timestamp to record
///
/// # Returns
///
/// The audit event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    };

    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };

    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };

    let before_data: StateSnapshotData = StateSnapshotData {
        data: event.before.data.clone(),
    };

    let after_data: StateSnapshotData = StateSnapshotData {
        data: event.after.data.clone(),
    };

    let scoped_event_id: Option<i64> = event.event.map(EventId::value);

    let actor_json: String = serde_json::to_string(&actor_data)?;
    let cause_json: String = serde_json::to_string(&cause_data)?;
    let action_json: String = serde_json::to_string(&action_data)?;
    let before_json: String = serde_json::to_string(&before_data)?;
    let after_json: String = serde_json::to_string(&after_data)?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::event_id.eq(scoped_event_id),
            audit_events::actor_id.eq(&event.actor.id),
            audit_events::actor_type.eq(&event.actor.actor_type),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_name.eq(&event.action.name),
            audit_events::action_json.eq(action_json),
            audit_events::before_json.eq(before_json),
            audit_events::after_json.eq(after_json),
            audit_events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let audit_event_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        audit_event_id,
        action = event.action.name.as_str(),
        "Persisted audit event"
    );

    Ok(audit_event_id)
}

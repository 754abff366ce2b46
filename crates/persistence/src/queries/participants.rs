// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant identity queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_domain::{Participant, ParticipantId};

use crate::diesel_schema::participants;
use crate::error::PersistenceError;

/// Diesel Queryable struct for participant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = participants)]
struct ParticipantRow {
    participant_id: String,
    display_name: String,
    role: String,
    #[allow(dead_code)]
    created_at: String,
}

/// Retrieves a participant identity mirror, if one has been recorded.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The identity value to look up
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_participant(
    conn: &mut SqliteConnection,
    participant_id: &str,
) -> Result<Option<Participant>, PersistenceError> {
    let row: Option<ParticipantRow> = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .select(ParticipantRow::as_select())
        .first::<ParticipantRow>(conn)
        .optional()?;

    Ok(row.map(|r| Participant {
        id: ParticipantId::new(&r.participant_id),
        display_name: r.display_name,
        role: r.role,
    }))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A generated ticket reference collided with an existing one.
    DuplicateTicketRef(String),
    /// A generated invite code collided with an existing one.
    DuplicateInviteCode(String),
    /// A generated invite token collided with an existing one.
    DuplicateInviteToken(String),
    /// The participant already belongs to a team for this event.
    DuplicateMembership(String),
    /// The participant already holds a pending invite for this team.
    DuplicatePendingInvite(String),
    /// A stored value failed domain-level decoding.
    CorruptRecord(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::DuplicateTicketRef(msg) => write!(f, "Duplicate ticket reference: {msg}"),
            Self::DuplicateInviteCode(msg) => write!(f, "Duplicate invite code: {msg}"),
            Self::DuplicateInviteToken(msg) => write!(f, "Duplicate invite token: {msg}"),
            Self::DuplicateMembership(msg) => {
                write!(f, "Participant already in a team for this event: {msg}")
            }
            Self::DuplicatePendingInvite(msg) => {
                write!(f, "Participant already has a pending invite: {msg}")
            }
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => {
                // SQLite names the violated constraint in the message,
                // e.g. "UNIQUE constraint failed: tickets.ticket_ref".
                let message: String = info.message().to_string();
                if message.contains("tickets.ticket_ref") {
                    Self::DuplicateTicketRef(message)
                } else if message.contains("teams.invite_code") {
                    Self::DuplicateInviteCode(message)
                } else if message.contains("teams.invite_token") {
                    Self::DuplicateInviteToken(message)
                } else if message.contains("team_members.") {
                    Self::DuplicateMembership(message)
                } else if message.contains("team_invites.") {
                    Self::DuplicatePendingInvite(message)
                } else {
                    Self::DatabaseError(message)
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<evreg_domain::DomainError> for PersistenceError {
    fn from(err: evreg_domain::DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}

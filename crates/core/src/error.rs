// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use evreg_domain::DomainError;
use evreg_persistence::PersistenceError;

/// Errors that can occur while executing an allocation operation.
///
/// The variants follow the platform's error taxonomy: `DomainViolation`
/// and `Validation` are caller faults that retrying unchanged cannot
/// fix; `Conflict` means a precondition was invalidated (usually by a
/// concurrent writer) and the caller should re-fetch before retrying;
/// `NotFound` covers records that are absent or not visible to the
/// caller; `Capacity` is a specialized conflict for stock and slot
/// exhaustion, surfaced distinctly because organizers act on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The request is well-formed but not permitted for this record.
    Validation(String),
    /// A precondition no longer holds.
    Conflict(String),
    /// The record is absent or not owned by the caller.
    NotFound(String),
    /// Stock or slots ran out.
    Capacity(String),
    /// The store failed. Fatal to the request.
    Persistence(PersistenceError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Validation(msg) => write!(f, "Validation failed: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Capacity(msg) => write!(f, "Capacity exhausted: {msg}"),
            Self::Persistence(err) => write!(f, "Persistence failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<PersistenceError> for CoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(msg) => Self::NotFound(msg),
            PersistenceError::DuplicateMembership(_) => Self::Conflict(String::from(
                "Participant already belongs to a team for this event",
            )),
            PersistenceError::DuplicatePendingInvite(_) => Self::Conflict(String::from(
                "Participant already has a pending invite for this team",
            )),
            other => Self::Persistence(other),
        }
    }
}

// Required so transaction closures can propagate statement errors with
// `?` and roll the whole transaction back.
impl From<diesel::result::Error> for CoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::from(PersistenceError::from(err))
    }
}

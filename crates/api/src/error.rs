// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use evreg::CoreError;
use evreg_domain::DomainError;
use evreg_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request named valid fields but violated an allocation rule.
    Validation {
        /// A human-readable description of the violated rule.
        message: String,
    },
    /// The request raced a state change and its precondition no longer holds.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The requested allocation exceeds the remaining capacity.
    CapacityExhausted {
        /// A human-readable description of the exhausted capacity.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Validation { message } => {
                write!(f, "Validation failed: {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Conflict: {message}")
            }
            Self::CapacityExhausted { message } => {
                write!(f, "Capacity exhausted: {message}")
            }
            Self::NotFound { message } => {
                write!(f, "Not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidEventKind(value) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!(
                "Unknown event kind '{value}'. Must be 'normal', 'merch', or 'hackathon'"
            ),
        },
        DomainError::InvalidEventPhase(value) => ApiError::InvalidInput {
            field: String::from("phase"),
            message: format!(
                "Unknown event phase '{value}'. Must be 'draft', 'published', or 'closed'"
            ),
        },
        DomainError::InvalidParticipationMode(value) => ApiError::InvalidInput {
            field: String::from("participation_mode"),
            message: format!("Unknown participation mode '{value}'. Must be 'solo' or 'team'"),
        },
        DomainError::InvalidTicketStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown ticket status '{value}'"),
        },
        DomainError::InvalidOrderStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown order status '{value}'"),
        },
        DomainError::InvalidTeamStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown team status '{value}'"),
        },
        DomainError::InvalidInviteStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown invite status '{value}'"),
        },
        DomainError::InvalidEventName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidTeamName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidVariantName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidTeamSize { size, min, max } => ApiError::InvalidInput {
            field: String::from("team_size"),
            message: format!("Team size {size} must be between {min} and {max}"),
        },
        DomainError::InvalidQuantity { quantity } => ApiError::InvalidInput {
            field: String::from("quantity"),
            message: format!("Quantity {quantity} must be positive"),
        },
        DomainError::InvalidRegistrationLimit { limit } => ApiError::InvalidInput {
            field: String::from("registration_limit"),
            message: format!("Registration limit {limit} must not be negative"),
        },
        DomainError::InvalidStock { stock } => ApiError::InvalidInput {
            field: String::from("stock"),
            message: format!("Stock {stock} must not be negative"),
        },
        DomainError::InvalidPrice { price } => ApiError::InvalidInput {
            field: String::from("price"),
            message: format!("Price {price} must not be negative"),
        },
        DomainError::InvalidFee { fee } => ApiError::InvalidInput {
            field: String::from("fee"),
            message: format!("Fee {fee} must not be negative"),
        },
        DomainError::InvalidPerParticipantLimit { limit } => ApiError::InvalidInput {
            field: String::from("per_participant_limit"),
            message: format!("Per-participant limit {limit} must not be negative"),
        },
        DomainError::InvalidParticipantId(msg) => ApiError::InvalidInput {
            field: String::from("participant_id"),
            message: msg,
        },
        DomainError::TimestampParseError { timestamp, error } => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message: format!("Failed to parse timestamp '{timestamp}': {error}"),
        },
        DomainError::TimestampFormatError(msg) => ApiError::Internal {
            message: format!("Failed to format timestamp: {msg}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// Validation failures restate the rule the caller broke, conflicts
/// mean a precondition was invalidated before the write landed, and
/// capacity errors mean the contested resource ran out. Persistence
/// failures are never the caller's fault and surface as internal
/// errors.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Validation(message) => ApiError::Validation { message },
        CoreError::Conflict(message) => ApiError::Conflict { message },
        CoreError::NotFound(message) => ApiError::NotFound { message },
        CoreError::Capacity(message) => ApiError::CapacityExhausted { message },
        CoreError::Persistence(persistence_err) => ApiError::Internal {
            message: persistence_err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Used by read-only handlers that query persistence directly. A
/// missing row surfaces as not-found; anything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::NotFound { message },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

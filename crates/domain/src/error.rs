// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event kind string is not recognized.
    InvalidEventKind(String),
    /// Event phase string is not recognized.
    InvalidEventPhase(String),
    /// Participation mode string is not recognized.
    InvalidParticipationMode(String),
    /// Ticket status string is not recognized.
    InvalidTicketStatus(String),
    /// Order status string is not recognized.
    InvalidOrderStatus(String),
    /// Team status string is not recognized.
    InvalidTeamStatus(String),
    /// Invite status string is not recognized.
    InvalidInviteStatus(String),
    /// Event name is empty or invalid.
    InvalidEventName(String),
    /// Team name is empty or invalid.
    InvalidTeamName(String),
    /// Variant name is empty or invalid.
    InvalidVariantName(String),
    /// Team size is outside the permitted bounds.
    InvalidTeamSize {
        /// The rejected size.
        size: i64,
        /// The smallest permitted size.
        min: i64,
        /// The largest permitted size.
        max: i64,
    },
    /// Order quantity must be positive.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },
    /// Registration limit must not be negative.
    InvalidRegistrationLimit {
        /// The rejected limit.
        limit: i64,
    },
    /// Stock must not be negative.
    InvalidStock {
        /// The rejected stock value.
        stock: i64,
    },
    /// Price must not be negative.
    InvalidPrice {
        /// The rejected price.
        price: i64,
    },
    /// Fee must not be negative.
    InvalidFee {
        /// The rejected fee.
        fee: i64,
    },
    /// Per-participant limit must not be negative.
    InvalidPerParticipantLimit {
        /// The rejected limit.
        limit: i64,
    },
    /// Participant identity value is empty or invalid.
    InvalidParticipantId(String),
    /// Failed to parse a timestamp from its stored form.
    TimestampParseError {
        /// The invalid timestamp string.
        timestamp: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a timestamp into its stored form.
    TimestampFormatError(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEventKind(value) => write!(f, "Invalid event kind: {value}"),
            Self::InvalidEventPhase(value) => write!(f, "Invalid event phase: {value}"),
            Self::InvalidParticipationMode(value) => {
                write!(f, "Invalid participation mode: {value}")
            }
            Self::InvalidTicketStatus(value) => write!(f, "Invalid ticket status: {value}"),
            Self::InvalidOrderStatus(value) => write!(f, "Invalid order status: {value}"),
            Self::InvalidTeamStatus(value) => write!(f, "Invalid team status: {value}"),
            Self::InvalidInviteStatus(value) => write!(f, "Invalid invite status: {value}"),
            Self::InvalidEventName(msg) => write!(f, "Invalid event name: {msg}"),
            Self::InvalidTeamName(msg) => write!(f, "Invalid team name: {msg}"),
            Self::InvalidVariantName(msg) => write!(f, "Invalid variant name: {msg}"),
            Self::InvalidTeamSize { size, min, max } => {
                write!(f, "Team size {size} must be between {min} and {max}")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Quantity {quantity} must be positive")
            }
            Self::InvalidRegistrationLimit { limit } => {
                write!(f, "Registration limit {limit} must not be negative")
            }
            Self::InvalidStock { stock } => {
                write!(f, "Stock {stock} must not be negative")
            }
            Self::InvalidPrice { price } => {
                write!(f, "Price {price} must not be negative")
            }
            Self::InvalidFee { fee } => {
                write!(f, "Fee {fee} must not be negative")
            }
            Self::InvalidPerParticipantLimit { limit } => {
                write!(f, "Per-participant limit {limit} must not be negative")
            }
            Self::InvalidParticipantId(msg) => write!(f, "Invalid participant id: {msg}"),
            Self::TimestampParseError { timestamp, error } => {
                write!(f, "Failed to parse timestamp '{timestamp}': {error}")
            }
            Self::TimestampFormatError(msg) => {
                write!(f, "Failed to format timestamp: {msg}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

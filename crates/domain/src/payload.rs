// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket payload encoding and scan-input decoding.
//!
//! A ticket's payload is the string handed to the external QR encoder.
//! It binds the ticket reference, event, and participant so a scanner
//! can recover all three without a lookup.

use crate::types::{EventId, ParticipantId};
use std::str::FromStr;
use thiserror::Error;

/// Separator between payload segments.
const SEPARATOR: char = '|';

/// Payload decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload does not have exactly three segments.
    #[error("Payload must have the form <ref>|<event>|<participant>, got {segments} segments")]
    WrongSegmentCount { segments: usize },

    /// The ticket reference segment is empty.
    #[error("Payload ticket reference is empty")]
    EmptyTicketRef,

    /// The event segment is not a numeric identifier.
    #[error("Payload event id '{value}' is not numeric")]
    InvalidEventId { value: String },

    /// The participant segment is empty.
    #[error("Payload participant id is empty")]
    EmptyParticipantId,
}

/// The decoded contents of a ticket payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPayload {
    /// The globally unique ticket reference.
    pub ticket_ref: String,
    /// The event the ticket admits to.
    pub event: EventId,
    /// The ticket holder.
    pub participant: ParticipantId,
}

impl TicketPayload {
    /// Creates a payload from its parts.
    #[must_use]
    pub const fn new(ticket_ref: String, event: EventId, participant: ParticipantId) -> Self {
        Self {
            ticket_ref,
            event,
            participant,
        }
    }

    /// Encodes this payload into its wire form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.ticket_ref,
            self.event.value(),
            self.participant.value()
        )
    }
}

impl FromStr for TicketPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(SEPARATOR).collect();
        if segments.len() != 3 {
            return Err(PayloadError::WrongSegmentCount {
                segments: segments.len(),
            });
        }

        let ticket_ref = segments[0].trim();
        if ticket_ref.is_empty() {
            return Err(PayloadError::EmptyTicketRef);
        }

        let event: i64 =
            segments[1]
                .trim()
                .parse()
                .map_err(|_| PayloadError::InvalidEventId {
                    value: segments[1].to_string(),
                })?;

        let participant = segments[2].trim();
        if participant.is_empty() {
            return Err(PayloadError::EmptyParticipantId);
        }

        Ok(Self {
            ticket_ref: ticket_ref.to_string(),
            event: EventId::new(event),
            participant: ParticipantId::new(participant),
        })
    }
}

/// A scanner submission, which may be a full payload or a bare ticket
/// reference.
///
/// Scanners that decode the QR image submit the full payload; manual
/// entry submits just the printed reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCode {
    /// A full `<ref>|<event>|<participant>` payload.
    Payload(TicketPayload),
    /// A bare ticket reference.
    TicketRef(String),
}

impl ScanCode {
    /// Interprets raw scanner input.
    ///
    /// Input containing the payload separator is decoded as a full
    /// payload; anything else is treated as a bare reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or a separated payload
    /// fails to decode.
    pub fn parse(input: &str) -> Result<Self, PayloadError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PayloadError::EmptyTicketRef);
        }

        if trimmed.contains(SEPARATOR) {
            return Ok(Self::Payload(trimmed.parse()?));
        }

        Ok(Self::TicketRef(trimmed.to_string()))
    }

    /// Returns the ticket reference named by this scan.
    #[must_use]
    pub fn ticket_ref(&self) -> &str {
        match self {
            Self::Payload(payload) => &payload.ticket_ref,
            Self::TicketRef(ticket_ref) => ticket_ref,
        }
    }
}

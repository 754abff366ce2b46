// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// The smallest permitted team size.
pub const TEAM_SIZE_MIN: i64 = 2;

/// The largest permitted team size.
pub const TEAM_SIZE_MAX: i64 = 20;

/// Team size used when neither the request nor the event specifies one.
pub const TEAM_SIZE_DEFAULT: i64 = 3;

/// Longest accepted display name for events, teams, and variants.
const NAME_MAX_LEN: usize = 120;

/// Validates an event display name.
///
/// # Errors
///
/// Returns an error if the name is empty after trimming or too long.
pub fn validate_event_name(name: &str) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if name.trim().is_empty() {
        return Err(DomainError::InvalidEventName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: name must fit the display column
    if name.len() > NAME_MAX_LEN {
        return Err(DomainError::InvalidEventName(format!(
            "Name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }

    Ok(())
}

/// Validates a team display name.
///
/// # Errors
///
/// Returns an error if the name is empty after trimming or too long.
pub fn validate_team_name(name: &str) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if name.trim().is_empty() {
        return Err(DomainError::InvalidTeamName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: name must fit the display column
    if name.len() > NAME_MAX_LEN {
        return Err(DomainError::InvalidTeamName(format!(
            "Name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }

    Ok(())
}

/// Validates a variant display name.
///
/// # Errors
///
/// Returns an error if the name is empty after trimming or too long.
pub fn validate_variant_name(name: &str) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if name.trim().is_empty() {
        return Err(DomainError::InvalidVariantName(String::from(
            "Name cannot be empty",
        )));
    }

    if name.len() > NAME_MAX_LEN {
        return Err(DomainError::InvalidVariantName(format!(
            "Name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }

    Ok(())
}

/// Validates a requested team size.
///
/// # Arguments
///
/// * `size` - The requested maximum member count
///
/// # Errors
///
/// Returns an error if the size is outside
/// [`TEAM_SIZE_MIN`]..=[`TEAM_SIZE_MAX`].
pub fn validate_team_size(size: i64) -> Result<(), DomainError> {
    // Rule: teams hold between 2 and 20 members
    if !(TEAM_SIZE_MIN..=TEAM_SIZE_MAX).contains(&size) {
        return Err(DomainError::InvalidTeamSize {
            size,
            min: TEAM_SIZE_MIN,
            max: TEAM_SIZE_MAX,
        });
    }
    Ok(())
}

/// Validates an order quantity.
///
/// # Errors
///
/// Returns an error if the quantity is zero or negative.
pub fn validate_quantity(quantity: i64) -> Result<(), DomainError> {
    // Rule: orders request at least one unit
    if quantity <= 0 {
        return Err(DomainError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Validates a stock value.
///
/// # Errors
///
/// Returns an error if the stock is negative.
pub fn validate_stock(stock: i64) -> Result<(), DomainError> {
    // Rule: capacity counters never start negative
    if stock < 0 {
        return Err(DomainError::InvalidStock { stock });
    }
    Ok(())
}

/// Validates the capacity configuration supplied when an event is created.
///
/// This checks field-level constraints only; kind-dependent rules (such
/// as merch events carrying stock) are enforced where the event is
/// assembled.
///
/// # Arguments
///
/// * `registration_limit` - Maximum registrations, 0 for unlimited
/// * `stock` - Base stock for merch events without variants
/// * `fee` - Base fee in minor currency units
///
/// # Errors
///
/// Returns an error if any field is negative.
pub fn validate_capacity_config(
    registration_limit: i64,
    stock: Option<i64>,
    fee: i64,
) -> Result<(), DomainError> {
    // Rule: capacity counters never start negative
    if registration_limit < 0 {
        return Err(DomainError::InvalidRegistrationLimit {
            limit: registration_limit,
        });
    }

    if let Some(stock) = stock {
        validate_stock(stock)?;
    }

    if fee < 0 {
        return Err(DomainError::InvalidFee { fee });
    }

    Ok(())
}

/// Validates a variant's stock, price, and per-participant limit.
///
/// # Errors
///
/// Returns an error if the name is invalid or any numeric field is
/// negative.
pub fn validate_variant_config(
    name: &str,
    stock: i64,
    price: i64,
    per_participant_limit: i64,
) -> Result<(), DomainError> {
    validate_variant_name(name)?;
    validate_stock(stock)?;

    if price < 0 {
        return Err(DomainError::InvalidPrice { price });
    }

    if per_participant_limit < 0 {
        return Err(DomainError::InvalidPerParticipantLimit {
            limit: per_participant_limit,
        });
    }

    Ok(())
}

/// Validates a participant identity value received from the
/// authentication context.
///
/// # Errors
///
/// Returns an error if the value is empty or embeds the payload
/// separator.
pub fn validate_participant_id(value: &str) -> Result<(), DomainError> {
    // Rule: identity must not be blank
    if value.trim().is_empty() {
        return Err(DomainError::InvalidParticipantId(String::from(
            "Identity cannot be empty",
        )));
    }

    // Rule: identity must survive payload encoding unambiguously
    if value.contains('|') {
        return Err(DomainError::InvalidParticipantId(String::from(
            "Identity cannot contain '|'",
        )));
    }

    Ok(())
}

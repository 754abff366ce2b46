// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, validate_capacity_config, validate_event_name, validate_participant_id,
    validate_quantity, validate_stock, validate_team_name, validate_team_size,
    validate_variant_config,
};

#[test]
fn test_validate_event_name_accepts_normal_name() {
    let result: Result<(), DomainError> = validate_event_name("Spring Hackathon 2026");
    assert!(result.is_ok());
}

#[test]
fn test_validate_event_name_rejects_blank_name() {
    let result: Result<(), DomainError> = validate_event_name("   ");
    assert!(matches!(result, Err(DomainError::InvalidEventName(_))));
}

#[test]
fn test_validate_event_name_rejects_oversized_name() {
    let name: String = "x".repeat(200);
    let result: Result<(), DomainError> = validate_event_name(&name);
    assert!(matches!(result, Err(DomainError::InvalidEventName(_))));
}

#[test]
fn test_validate_team_name_rejects_empty_name() {
    let result: Result<(), DomainError> = validate_team_name("");
    assert!(matches!(result, Err(DomainError::InvalidTeamName(_))));
}

#[test]
fn test_validate_team_size_accepts_bounds() {
    assert!(validate_team_size(2).is_ok());
    assert!(validate_team_size(20).is_ok());
    assert!(validate_team_size(3).is_ok());
}

#[test]
fn test_validate_team_size_rejects_below_minimum() {
    let result: Result<(), DomainError> = validate_team_size(1);
    assert!(matches!(
        result,
        Err(DomainError::InvalidTeamSize { size: 1, .. })
    ));
}

#[test]
fn test_validate_team_size_rejects_above_maximum() {
    let result: Result<(), DomainError> = validate_team_size(21);
    assert!(matches!(
        result,
        Err(DomainError::InvalidTeamSize { size: 21, .. })
    ));
}

#[test]
fn test_validate_quantity_rejects_zero() {
    let result: Result<(), DomainError> = validate_quantity(0);
    assert!(matches!(
        result,
        Err(DomainError::InvalidQuantity { quantity: 0 })
    ));
}

#[test]
fn test_validate_quantity_rejects_negative() {
    let result: Result<(), DomainError> = validate_quantity(-3);
    assert!(matches!(result, Err(DomainError::InvalidQuantity { .. })));
}

#[test]
fn test_validate_quantity_accepts_positive() {
    assert!(validate_quantity(1).is_ok());
    assert!(validate_quantity(10).is_ok());
}

#[test]
fn test_validate_stock_rejects_negative() {
    let result: Result<(), DomainError> = validate_stock(-1);
    assert!(matches!(result, Err(DomainError::InvalidStock { stock: -1 })));
}

#[test]
fn test_validate_capacity_config_accepts_unlimited_registration() {
    let result: Result<(), DomainError> = validate_capacity_config(0, None, 0);
    assert!(result.is_ok());
}

#[test]
fn test_validate_capacity_config_rejects_negative_limit() {
    let result: Result<(), DomainError> = validate_capacity_config(-5, None, 0);
    assert!(matches!(
        result,
        Err(DomainError::InvalidRegistrationLimit { limit: -5 })
    ));
}

#[test]
fn test_validate_capacity_config_rejects_negative_fee() {
    let result: Result<(), DomainError> = validate_capacity_config(0, None, -100);
    assert!(matches!(result, Err(DomainError::InvalidFee { fee: -100 })));
}

#[test]
fn test_validate_variant_config_accepts_zero_limit_as_unlimited() {
    let result: Result<(), DomainError> = validate_variant_config("Tee M", 25, 500, 0);
    assert!(result.is_ok());
}

#[test]
fn test_validate_variant_config_rejects_negative_price() {
    let result: Result<(), DomainError> = validate_variant_config("Tee M", 25, -500, 0);
    assert!(matches!(
        result,
        Err(DomainError::InvalidPrice { price: -500 })
    ));
}

#[test]
fn test_validate_participant_id_rejects_blank() {
    let result: Result<(), DomainError> = validate_participant_id("  ");
    assert!(matches!(result, Err(DomainError::InvalidParticipantId(_))));
}

#[test]
fn test_validate_participant_id_rejects_separator() {
    let result: Result<(), DomainError> = validate_participant_id("u|1");
    assert!(matches!(result, Err(DomainError::InvalidParticipantId(_))));
}

#[test]
fn test_validate_participant_id_accepts_opaque_value() {
    assert!(validate_participant_id("64fa3c9b12de").is_ok());
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EventId, ParticipantId, PayloadError, ScanCode, TicketPayload};

#[test]
fn test_payload_encode_binds_all_three_segments() {
    let payload: TicketPayload = TicketPayload::new(
        String::from("TKT-7F3K2Q9D"),
        EventId::new(12),
        ParticipantId::new("u-88"),
    );
    assert_eq!(payload.encode(), "TKT-7F3K2Q9D|12|u-88");
}

#[test]
fn test_payload_parse_recovers_encoded_fields() {
    let parsed: TicketPayload = "TKT-7F3K2Q9D|12|u-88".parse().unwrap();
    assert_eq!(parsed.ticket_ref, "TKT-7F3K2Q9D");
    assert_eq!(parsed.event, EventId::new(12));
    assert_eq!(parsed.participant, ParticipantId::new("u-88"));
}

#[test]
fn test_payload_parse_rejects_missing_segment() {
    let result: Result<TicketPayload, PayloadError> = "TKT-7F3K2Q9D|12".parse();
    assert!(matches!(
        result,
        Err(PayloadError::WrongSegmentCount { segments: 2 })
    ));
}

#[test]
fn test_payload_parse_rejects_non_numeric_event() {
    let result: Result<TicketPayload, PayloadError> = "TKT-7F3K2Q9D|twelve|u-88".parse();
    assert!(matches!(result, Err(PayloadError::InvalidEventId { .. })));
}

#[test]
fn test_payload_parse_rejects_empty_participant() {
    let result: Result<TicketPayload, PayloadError> = "TKT-7F3K2Q9D|12|".parse();
    assert!(matches!(result, Err(PayloadError::EmptyParticipantId)));
}

#[test]
fn test_scan_code_accepts_bare_reference() {
    let code: ScanCode = ScanCode::parse("TKT-7F3K2Q9D").unwrap();
    assert!(matches!(code, ScanCode::TicketRef(_)));
    assert_eq!(code.ticket_ref(), "TKT-7F3K2Q9D");
}

#[test]
fn test_scan_code_accepts_full_payload() {
    let code: ScanCode = ScanCode::parse("TKT-7F3K2Q9D|12|u-88").unwrap();
    assert!(matches!(code, ScanCode::Payload(_)));
    assert_eq!(code.ticket_ref(), "TKT-7F3K2Q9D");
}

#[test]
fn test_scan_code_trims_surrounding_whitespace() {
    let code: ScanCode = ScanCode::parse("  TKT-7F3K2Q9D  ").unwrap();
    assert_eq!(code.ticket_ref(), "TKT-7F3K2Q9D");
}

#[test]
fn test_scan_code_rejects_empty_input() {
    let result: Result<ScanCode, PayloadError> = ScanCode::parse("   ");
    assert!(matches!(result, Err(PayloadError::EmptyTicketRef)));
}

#[test]
fn test_scan_code_rejects_malformed_payload() {
    let result: Result<ScanCode, PayloadError> = ScanCode::parse("TKT-X|||");
    assert!(matches!(
        result,
        Err(PayloadError::WrongSegmentCount { .. })
    ));
}

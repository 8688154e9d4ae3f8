use super::id::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = BatchId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_ids_are_unique() {
    let first = AdmissionId::new();
    let second = AdmissionId::default();
    assert_ne!(first, second);
    assert_eq!(first.into_inner().get_version_num(), 7);
}

#[test]
fn test_typed_id_display_round_trips_through_from_str() {
    let id = PaymentSourceId::new();
    let parsed = PaymentSourceId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(StudentId::from_str("STD20260101").is_err());
}

#[test]
fn test_typed_id_serializes_transparently() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&FeePaymentId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}

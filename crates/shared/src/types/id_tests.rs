use super::*;

#[test]
fn test_typed_id_display() {
    let id = TransactionId::new("txn_001");
    assert_eq!(format!("{id}"), "txn_001");
    assert_eq!(id.as_str(), "txn_001");
}

#[test]
fn test_typed_id_conversions() {
    let from_str: AccountRef = "acc_checking".into();
    let from_string: AccountRef = String::from("acc_checking").into();
    assert_eq!(from_str, from_string);
    assert_eq!(from_str.into_inner(), "acc_checking");
}

#[test]
fn test_typed_id_serde_transparent() {
    let id = TransactionId::new("txn_42");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"txn_42\"");

    let back: TransactionId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_typed_id_ordering() {
    let mut ids = vec![TransactionId::new("b"), TransactionId::new("a")];
    ids.sort();
    assert_eq!(ids[0].as_str(), "a");
}

use shipping_macros::entity_id;

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
struct ShipmentRef(i64);

#[entity_id]
struct Label(String);

fn main() {
    let id: ShipmentRef = "42".parse().unwrap();
    assert_eq!(id, ShipmentRef::new(42));
    assert_eq!(id.to_string(), "42");
    assert!(ShipmentRef::default().is_unassigned());
    assert!(!id.is_unassigned());
    assert!(ShipmentRef::from(1) < id);
    let raw: i64 = id.into();
    assert_eq!(raw, 42);

    let label = Label::from("TRK1".to_string());
    assert_eq!(label.value(), "TRK1");
    assert!(Label::default().is_unassigned());
}

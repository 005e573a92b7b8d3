use shipping_domain::entity::{Entity, Timestamp};
use shipping_macros::{entity, entity_id};

#[entity_id]
#[derive(Copy)]
struct ParcelId(i64);

#[entity(id = ParcelId)]
#[derive(Clone)]
struct Parcel {
    label: String,
}

#[entity(id = ParcelId, debug = false)]
struct Pallet {
    slots: u8,
}

impl std::fmt::Debug for Pallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pallet(..)")
    }
}

fn main() {
    let at = Timestamp::default();
    let parcel = Parcel::new(ParcelId::new(7), at);
    assert_eq!(parcel.id().value(), &7);
    assert_eq!(parcel.created_at(), at);
    assert!(parcel.label.is_empty());
    let _ = format!("{:?}", parcel.clone());

    let boxed = Pallet::new(ParcelId::default(), at);
    assert!(boxed.id().is_unassigned());
    assert_eq!(boxed.slots, 0);
    let _ = format!("{:?}", boxed);
}

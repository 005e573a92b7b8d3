use shipping_macros::value_object;

#[value_object]
struct Dimensions {
    length_cm: u32,
    width_cm: u32,
}

#[value_object(default = false)]
struct Region(String);

impl Default for Region {
    fn default() -> Self {
        Self("EU".to_string())
    }
}

#[value_object(debug = false)]
struct Opaque(u8);

#[value_object]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum Priority {
    #[default]
    Standard,
    Express,
}

fn main() {
    let d = Dimensions::default();
    assert_eq!(d.clone(), Dimensions { length_cm: 0, width_cm: 0 });
    let _ = format!("{:?}", d);

    assert_eq!(Region::default(), Region("EU".to_string()));

    let _ = Opaque(1).clone();

    let p: Priority = Default::default();
    assert_eq!(p, Priority::Standard);
    assert_ne!(p, Priority::Express);
}

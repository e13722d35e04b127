use quickbuild::Builder;

#[derive(Debug, Builder)]
#[builder(derive(Clone, Debug))]
pub struct Span<T> {
    start: T,
    #[builder(default)]
    label: Option<String>,
}

fn main() {
    let half = Span::<u32>::builder().label(Some("lines".to_string()));
    let _printed = format!("{half:?}");

    let first = half.clone().start(1).build().unwrap();
    let second = half.start(7).build().unwrap();
    assert_eq!(first.start, 1);
    assert_eq!(second.start, 7);
    assert_eq!(first.label, second.label);
}

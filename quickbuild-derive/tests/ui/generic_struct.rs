use std::fmt::Debug;

use quickbuild::Builder;

#[derive(Debug, Builder)]
pub struct Tagged<'a, T>
where
    T: Debug + Clone,
{
    tag: &'a str,
    #[builder(default)]
    values: Vec<T>,
}

fn main() {
    let tagged = Tagged::<u8>::builder().tag("bytes").build().unwrap();
    assert_eq!(tagged.tag, "bytes");
    assert!(tagged.values.is_empty());

    let tagged = TaggedBuilder::new().tag("words").values(vec!["a"]).build().unwrap();
    assert_eq!(tagged.values, vec!["a"]);
}

use quickbuild::{BuildError, Builder};

#[derive(Debug, PartialEq, Builder)]
pub struct TestDataClass1 {
    #[builder(default = 1)]
    counter: i32,
    name: Vec<String>,
}

fn main() {
    let record = TestDataClass1::builder()
        .name(vec!["p".to_string()])
        .name(vec!["q".to_string()])
        .build()
        .unwrap();
    assert_eq!(record.name, vec!["q".to_string()]);
    assert_eq!(record.counter, 1);

    let missing = TestDataClass1::builder().counter(5).build();
    assert_eq!(missing, Err(BuildError::missing("name")));
}

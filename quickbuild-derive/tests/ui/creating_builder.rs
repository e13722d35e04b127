use quickbuild::{Buildable, Builder};

#[derive(Builder)]
pub struct TestDataClass1 {
    #[builder(default = 1)]
    counter: i32,
    name: Vec<String>,
}

fn main() {
    let _from_new = TestDataClass1Builder::new();
    let _from_default = TestDataClass1Builder::default();
    let _from_record = TestDataClass1::builder();
    let _from_trait: TestDataClass1Builder = <TestDataClass1 as Buildable>::builder();
}

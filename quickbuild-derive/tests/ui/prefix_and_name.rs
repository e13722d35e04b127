use quickbuild::Builder;

#[derive(Debug, Builder)]
#[builder(name = "OtherNameBuilder", prefix = "set")]
pub struct Job {
    build: u32,
    r#type: String,
}

fn main() {
    let job = OtherNameBuilder::new()
        .set_build(7)
        .set_type("nightly".to_string())
        .build()
        .unwrap();
    assert_eq!(job.build, 7);
    assert_eq!(job.r#type, "nightly");
}

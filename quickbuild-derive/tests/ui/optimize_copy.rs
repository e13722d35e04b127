use quickbuild::Builder;

#[derive(Debug, Builder)]
#[builder(optimize_copy)]
pub struct Settings {
    retries: u32,
    label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            retries: 3,
            label: "default".to_string(),
        }
    }
}

fn main() {
    let settings = Settings::builder().build().unwrap();
    assert_eq!(settings.retries, 3);
    assert_eq!(settings.label, "default");

    let settings = Settings::builder().retries(9).build().unwrap();
    assert_eq!(settings.retries, 9);
    assert_eq!(settings.label, "default");
}

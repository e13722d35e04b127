//! Sample records with derived builders.
//!
//! `TestDataClass1` is the record the property tests in `tests/` exercise;
//! the others show the builder options on small, realistic shapes.

use std::fmt::Debug;

use quickbuild::Builder;

/// The canonical sample: a required list of names and a counter defaulting to 1
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(derive(Clone, Debug))]
pub struct TestDataClass1 {
    #[builder(default = 1)]
    pub counter: i32,
    pub name: Vec<String>,
}

/// Same shape as [`TestDataClass1`] but its list admits missing entries
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct NullableNames {
    #[builder(default = 1)]
    pub counter: i32,
    pub name: Vec<Option<String>>,
    pub label: Option<String>,
}

/// Setters named `set_<field>`
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(prefix = "set")]
pub struct PrefixedRecord {
    pub name: String,
    #[builder(default)]
    pub tags: Vec<String>,
}

/// Builder with a custom type name
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(name = "OtherNameBuilder")]
pub struct OtherName {
    pub id: u64,
    pub name: String,
}

/// Generic record; the builder carries the type parameter
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Labelled<T>
where
    T: Debug + Clone,
{
    pub label: String,
    #[builder(default)]
    pub values: Vec<T>,
}

/// Unset fields are copied from the shared [`Default`] instance
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(optimize_copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_ms: u64,
    pub name: String,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            backoff_ms: 250,
            name: "default".to_string(),
        }
    }
}

/// Record whose fields are validated in `build()`
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Percentage {
    #[builder(validate = in_percent_range)]
    pub value: i32,
    #[builder(default = String::from("%"), validate = not_blank)]
    pub unit: String,
}

fn in_percent_range(value: &i32) -> Result<(), String> {
    if (0..=100).contains(value) {
        Ok(())
    } else {
        Err(format!("{value} is outside 0..=100"))
    }
}

#[allow(clippy::ptr_arg)]
fn not_blank(value: &String) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("must not be blank")
    } else {
        Ok(())
    }
}

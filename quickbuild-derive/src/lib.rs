//! Procedural macros for quickbuild
//!
//! This crate provides `#[derive(Builder)]` and the `#[property]` test
//! attribute. Use them through the `quickbuild` crate, which re-exports both
//! and hosts the runtime types the generated code refers to.

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

mod builder;
mod property;

/// Derive a fluent builder for a struct with named fields
///
/// For `struct V { .. }` this generates `VBuilder` with one by-value setter
/// per field, `VBuilder::new()`, a `Default` impl, `V::builder()` and a
/// consuming `build()` returning `Result<V, quickbuild::BuildError>`.
///
/// # Basic Usage
///
/// ```rust,ignore
/// use quickbuild::Builder;
///
/// #[derive(Builder)]
/// struct TestDataClass1 {
///     #[builder(default = 1)]
///     counter: i32,
///     name: Vec<String>,
/// }
///
/// let record = TestDataClass1Builder::new()
///     .name(vec!["a".to_string()])
///     .build()?;
/// assert_eq!(record.counter, 1);
/// ```
///
/// # Struct Attributes
///
/// - `name = "OtherNameBuilder"`: name of the generated builder type
/// - `prefix = "set"`: setters become `set_<field>`
/// - `optimize_copy`: unset fields are cloned from one shared
///   `Default::default()` instance; requires `V: Default + Send + Sync` and
///   cannot be combined with generics or field defaults
/// - `derive(Clone, Debug)`: derives for the builder struct itself. Builders
///   derive nothing by default since field types need not implement the
///   traits; with `Clone` a half-filled builder can seed several records
///
/// # Field Attributes
///
/// - `default`: use `Default::default()` when unset
/// - `default = expr`: evaluate `expr` when unset
/// - `validate = path`: call `path(&value) -> Result<(), E: Display>` in
///   `build()`; a rejection becomes `BuildError::Invalid`
///
/// Fields of type `Option<T>` are nullable and default to `None`. Every
/// other field without a default is required, and `build()` names the first
/// unset one in `BuildError::MissingField`.
#[proc_macro_derive(Builder, attributes(builder))]
pub fn derive_builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder::derive_builder(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Attribute macro turning a function into a property-based test
///
/// The function's parameters are generated through `quickbuild::Arbitrary`
/// and the body runs once per generated tuple. The body fails by panicking
/// or by returning `Err`.
///
/// ```rust,ignore
/// use quickbuild::property;
///
/// #[property(iterations = 200)]
/// fn builder_keeps_values(names: Vec<String>, counter: i32) {
///     let record = TestDataClass1::builder().name(names.clone()).counter(counter).build().unwrap();
///     assert_eq!(record.name, names);
/// }
/// ```
///
/// # Configuration
///
/// Settings start from `TestConfig::from_env()` (`QUICKBUILD_*` variables)
/// and the attribute overrides them:
///
/// - `iterations = N`: number of generated inputs (default: 100)
/// - `seed = N`: fixed seed for reproducible runs
/// - `max_shrink_iterations = N`: shrink attempt limit (default: 1000)
/// - `shrink_timeout_ms = N`: shrink time limit
/// - `max_size = N`: upper bound of the size hint
/// - `time_budget_ms = N`: stop starting new iterations after this long
///
/// At most four parameters are supported. `#[ignore]` and `#[should_panic]`
/// are carried over to the generated test.
#[proc_macro_attribute]
pub fn property(args: TokenStream, input: TokenStream) -> TokenStream {
    let item_fn = parse_macro_input!(input as ItemFn);
    property::parse_config(args.into())
        .and_then(|config| property::property_impl(config, item_fn))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

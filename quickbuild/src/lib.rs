#![allow(clippy::result_large_err)]

//! # quickbuild - derived builders with a property driver to exercise them
//!
//! `#[derive(Builder)]` turns a plain struct with named fields into a fluent
//! builder: one by-value setter per field and a consuming `build()` that
//! reports unset required fields and rejected values as [`BuildError`].
//!
//! The property driver generates random, well-typed arguments, runs a
//! property over them, shrinks any failing input and reports the seed that
//! reproduces it.
//!
//! ## Quick Start
//!
//! ```rust
//! use quickbuild::{Builder, TestConfig, for_all};
//!
//! #[derive(Debug, Clone, PartialEq, Builder)]
//! struct Record {
//!     #[builder(default = 1)]
//!     counter: i32,
//!     name: Vec<String>,
//! }
//!
//! let record = Record::builder().name(vec!["a".to_string()]).build().unwrap();
//! assert_eq!(record.counter, 1);
//!
//! let config = TestConfig::default().iterations(50);
//! let result = for_all::<(Vec<String>, i32), _>(
//!     "record_roundtrip",
//!     config,
//!     |(name, counter): (Vec<String>, i32)| {
//!         let record = RecordBuilder::new().name(name.clone()).counter(counter).build();
//!         record == Ok(Record { counter, name })
//!     },
//! );
//! assert!(result.is_ok());
//! ```

// Lets the derive's `::quickbuild::` paths resolve inside this crate's own tests.
extern crate self as quickbuild;

pub mod arbitrary;
pub mod builder;
pub mod config;
pub mod error;
pub mod execution;
pub mod generator;
pub mod primitives;
pub mod property;
pub mod report;
pub mod rng;
pub mod shrink;
pub mod suite;

// Re-export the main public API
pub use arbitrary::Arbitrary;
pub use builder::{BuildError, Buildable};
pub use config::{ConfigError, GeneratorConfig, TestConfig};
pub use error::{Counterexample, PropertyError, PropertyResult, TestFailure, TestSuccess};
pub use execution::{PropertyTest, check, check_with_config, for_all};
pub use generator::{Arguments, Generator, GeneratorRegistry, SharedGenerator};
pub use primitives::*;
pub use property::{Property, PropertyOutput};
pub use report::{PropertyReport, PropertyStatus, SuiteReport};
pub use rng::{create_seeded_rng, derive_seed, fresh_seed};
pub use shrink::{ShrinkConfig, ShrinkEngine, ShrinkResult};
pub use suite::{PropertySuite, SuiteConfig, SuiteError};

// Re-export the macros when the derive feature is enabled
#[cfg(feature = "derive")]
pub use quickbuild_derive::{Builder, property};

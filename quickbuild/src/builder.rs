//! Runtime support for `#[derive(Builder)]`.
//!
//! The derive emits a `<Struct>Builder` with one setter per field and a
//! consuming `build()`. The types here are what that generated code and its
//! callers share.

use std::fmt::Display;

use thiserror::Error;

/// Why a builder could not produce its value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A field without a default was never set
    #[error("property `{field}` is mandatory and must be set in builder")]
    MissingField { field: &'static str },

    /// A field validator rejected the assigned value
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl BuildError {
    /// A required field was not set
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// A field value was rejected
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::Invalid { field, .. } => field,
        }
    }
}

/// Types that have a derived builder
pub trait Buildable: Sized {
    /// The generated builder type
    type Builder: Default;

    /// Start an empty builder
    fn builder() -> Self::Builder {
        Self::Builder::default()
    }
}

/// Run a field validator, mapping its rejection to [`BuildError::Invalid`].
#[doc(hidden)]
pub fn check_field<T, E, F>(field: &'static str, value: &T, validator: F) -> Result<(), BuildError>
where
    T: ?Sized,
    E: Display,
    F: FnOnce(&T) -> Result<(), E>,
{
    validator(value).map_err(|e| BuildError::invalid(field, e.to_string()))
}

//! Property definitions: anything that can judge a generated input.

use std::fmt::Display;

use crate::error::PropertyError;

/// A checkable statement about inputs of type `T`
pub trait Property<T> {
    /// Test the property with the given input
    fn test(&self, input: T) -> Result<(), PropertyError>;
}

/// Return types a property closure may use.
///
/// `()` passes unless the body panics, `bool` fails on `false` and
/// `Result<(), E>` fails with the error's message.
pub trait PropertyOutput {
    /// Convert the body's return value into a verdict
    fn into_verdict(self) -> Result<(), PropertyError>;
}

impl PropertyOutput for () {
    fn into_verdict(self) -> Result<(), PropertyError> {
        Ok(())
    }
}

impl PropertyOutput for bool {
    fn into_verdict(self) -> Result<(), PropertyError> {
        if self {
            Ok(())
        } else {
            Err(PropertyError::falsified("property returned false"))
        }
    }
}

impl<E: Display> PropertyOutput for Result<(), E> {
    fn into_verdict(self) -> Result<(), PropertyError> {
        self.map_err(|e| PropertyError::falsified(e.to_string()))
    }
}

impl<T, F, R> Property<T> for F
where
    F: Fn(T) -> R,
    R: PropertyOutput,
{
    fn test(&self, input: T) -> Result<(), PropertyError> {
        self(input).into_verdict()
    }
}

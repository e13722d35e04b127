//! Error types and result handling for property runs.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::config::{ConfigError, TestConfig};

/// Everything that can go wrong while checking a property
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property body reported a failure
    #[error("{reason}")]
    Falsified { reason: String },

    /// The property body panicked, usually from a failed assertion
    #[error("panicked: {message}")]
    Panicked { message: String },

    /// A generator panicked while producing a value
    #[error("generation failed: {message}")]
    GenerationFailed { message: String },

    /// No generator is registered for a parameter type
    #[error("no generator registered for `{type_name}`")]
    NoGenerator { type_name: &'static str },

    /// The shrunk witness passed when re-run; the property is not deterministic
    #[error("shrunk input {input} no longer reproduces the failure")]
    ShrinkNotReproducible { input: String },

    /// The run configuration was rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PropertyError {
    /// Create a falsification with the given reason
    pub fn falsified(reason: impl Into<String>) -> Self {
        Self::Falsified {
            reason: reason.into(),
        }
    }

    /// Falsifications and panics are counterexamples; everything else stops the property
    pub fn is_falsification(&self) -> bool {
        matches!(self, Self::Falsified { .. } | Self::Panicked { .. })
    }

    /// Driver failures abort a whole suite run
    pub fn is_driver_failure(&self) -> bool {
        matches!(self, Self::ShrinkNotReproducible { .. })
    }
}

/// Result of a property run
pub type PropertyResult<T> = Result<TestSuccess, TestFailure<T>>;

/// Information about a successful run
#[derive(Debug, Clone)]
pub struct TestSuccess {
    /// Property identifier
    pub property: String,
    /// Seed the run was started from
    pub seed: u64,
    /// Number of iterations that passed
    pub iterations: usize,
    /// Whether the time budget stopped the run before all iterations
    pub budget_exhausted: bool,
    /// Test configuration used
    pub config: TestConfig,
    /// Total time spent on the run
    pub duration: Duration,
}

/// A generated input that falsified the property, with its shrunk form
#[derive(Debug, Clone)]
pub struct Counterexample<T> {
    /// Input that first failed
    pub original: T,
    /// Smallest failing input found, if shrinking made progress
    pub shrunk: Option<T>,
    /// Number of successful shrink steps
    pub shrink_steps: usize,
    /// Time spent on shrinking
    pub shrink_duration: Duration,
}

impl<T> Counterexample<T> {
    /// The smallest known failing input
    pub fn minimal(&self) -> &T {
        self.shrunk.as_ref().unwrap_or(&self.original)
    }
}

/// Information about a failed run
#[derive(Debug, Clone)]
pub struct TestFailure<T> {
    /// Property identifier
    pub property: String,
    /// Seed the run was started from
    pub seed: u64,
    /// The error that stopped the run
    pub error: PropertyError,
    /// Iteration where the failure occurred
    pub iteration: Option<usize>,
    /// Failing input, absent when generation or configuration failed
    pub counterexample: Option<Counterexample<T>>,
    /// Test configuration used
    pub config: TestConfig,
    /// Total time spent on the run
    pub duration: Duration,
}

impl<T> TestFailure<T> {
    /// Failure that occurred before any input existed
    pub fn without_input(
        property: impl Into<String>,
        seed: u64,
        error: PropertyError,
        iteration: Option<usize>,
        config: TestConfig,
        duration: Duration,
    ) -> Self {
        Self {
            property: property.into(),
            seed,
            error,
            iteration,
            counterexample: None,
            config,
            duration,
        }
    }

    /// Get a detailed, multi-line report of the failure
    pub fn report(&self) -> String
    where
        T: fmt::Debug,
    {
        let mut report = String::new();

        report.push_str(&format!("property `{}` failed\n", self.property));
        report.push_str(&format!("  seed:       {}\n", self.seed));
        if let Some(iteration) = self.iteration {
            report.push_str(&format!("  iteration:  {}\n", iteration));
        }
        report.push_str(&format!("  reason:     {}\n", self.error));

        match &self.counterexample {
            Some(example) => {
                report.push_str(&format!("  arguments:  {:?}\n", example.original));
                match &example.shrunk {
                    Some(shrunk) => {
                        report.push_str(&format!(
                            "  shrunk:     {:?} ({} steps in {:?})\n",
                            shrunk, example.shrink_steps, example.shrink_duration
                        ));
                    }
                    None => report.push_str("  shrunk:     no smaller failing input\n"),
                }
            }
            None => report.push_str("  arguments:  none generated\n"),
        }

        report.push_str(&format!(
            "  reproduce:  TestConfig::seed({seed}), or QUICKBUILD_SEED={seed} where the config comes from TestConfig::from_env\n",
            seed = self.seed
        ));
        report.push_str(&format!("  ran for:    {:?}\n", self.duration));

        report
    }
}

impl<T: fmt::Debug> fmt::Display for TestFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property `{}` failed (seed {})", self.property, self.seed)?;
        if let Some(example) = &self.counterexample {
            write!(f, " with input {:?}", example.minimal())?;
        }
        write!(f, ": {}", self.error)
    }
}

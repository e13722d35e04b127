//! Type-erased run reports, used by suites that mix parameter types.

use std::fmt;
use std::time::Duration;

use crate::error::PropertyResult;

/// Outcome of one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyStatus {
    /// Every executed iteration passed
    Passed {
        iterations: usize,
        budget_exhausted: bool,
    },
    /// An input falsified the property
    Failed {
        reason: String,
        iteration: Option<usize>,
        original: Option<String>,
        shrunk: Option<String>,
        shrink_steps: usize,
    },
    /// The property could not be checked (generation, registry or configuration failure)
    Aborted { reason: String },
}

/// Report for a single property, with inputs rendered as `Debug` text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReport {
    /// Property identifier
    pub name: String,
    /// Seed the property ran with
    pub seed: u64,
    /// Outcome
    pub status: PropertyStatus,
    /// Time spent on the property
    pub duration: Duration,
}

impl PropertyReport {
    /// Erase the input type of a run result
    pub fn from_result<T: fmt::Debug>(result: &PropertyResult<T>) -> Self {
        match result {
            Ok(success) => Self {
                name: success.property.clone(),
                seed: success.seed,
                status: PropertyStatus::Passed {
                    iterations: success.iterations,
                    budget_exhausted: success.budget_exhausted,
                },
                duration: success.duration,
            },
            Err(failure) if failure.error.is_falsification() => {
                let example = failure.counterexample.as_ref();
                Self {
                    name: failure.property.clone(),
                    seed: failure.seed,
                    status: PropertyStatus::Failed {
                        reason: failure.error.to_string(),
                        iteration: failure.iteration,
                        original: example.map(|c| format!("{:?}", c.original)),
                        shrunk: example.and_then(|c| c.shrunk.as_ref().map(|s| format!("{s:?}"))),
                        shrink_steps: example.map_or(0, |c| c.shrink_steps),
                    },
                    duration: failure.duration,
                }
            }
            Err(failure) => Self {
                name: failure.property.clone(),
                seed: failure.seed,
                status: PropertyStatus::Aborted {
                    reason: failure.error.to_string(),
                },
                duration: failure.duration,
            },
        }
    }

    /// Aborted report for a property that never started
    pub fn aborted(name: impl Into<String>, seed: u64, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed,
            status: PropertyStatus::Aborted {
                reason: reason.into(),
            },
            duration: Duration::ZERO,
        }
    }

    /// Check if the property passed
    pub fn is_passed(&self) -> bool {
        matches!(self.status, PropertyStatus::Passed { .. })
    }
}

impl fmt::Display for PropertyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            PropertyStatus::Passed {
                iterations,
                budget_exhausted,
            } => {
                write!(f, "PASS {} ({} iterations", self.name, iterations)?;
                if *budget_exhausted {
                    write!(f, ", time budget reached")?;
                }
                write!(f, ", seed {})", self.seed)
            }
            PropertyStatus::Failed {
                reason,
                original,
                shrunk,
                shrink_steps,
                ..
            } => {
                write!(f, "FAIL {} (seed {}): {}", self.name, self.seed, reason)?;
                if let Some(original) = original {
                    write!(f, "\n    arguments: {original}")?;
                }
                if let Some(shrunk) = shrunk {
                    write!(f, "\n    shrunk:    {shrunk} after {shrink_steps} steps")?;
                }
                Ok(())
            }
            PropertyStatus::Aborted { reason } => {
                write!(f, "ABORT {} (seed {}): {}", self.name, self.seed, reason)
            }
        }
    }
}

/// Reports for every property of a suite run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    /// Per-property reports in registration order
    pub properties: Vec<PropertyReport>,
    /// Base seed; the property at index `i` ran with `derive_seed(seed, i)`
    pub seed: u64,
    /// Wall-clock time of the whole run
    pub duration: Duration,
}

impl SuiteReport {
    /// True when every property passed
    pub fn is_success(&self) -> bool {
        self.properties.iter().all(PropertyReport::is_passed)
    }

    /// Reports of properties that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &PropertyReport> {
        self.properties.iter().filter(|report| !report.is_passed())
    }

    /// Look up a property by name
    pub fn get(&self, name: &str) -> Option<&PropertyReport> {
        self.properties.iter().find(|report| report.name == name)
    }

    /// One-line count of passes and failures
    pub fn summary(&self) -> String {
        let failed = self.failures().count();
        format!(
            "{} properties: {} passed, {} failed in {:?}",
            self.properties.len(),
            self.properties.len() - failed,
            failed,
            self.duration
        )
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.properties {
            writeln!(f, "{report}")?;
        }
        writeln!(f, "{}", self.summary())?;
        write!(
            f,
            "suite seed {seed}: replay with QUICKBUILD_SEED={seed} or SuiteConfig::test.seed = Some({seed})",
            seed = self.seed
        )
    }
}

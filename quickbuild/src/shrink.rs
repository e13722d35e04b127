//! Greedy shrinking of failing inputs.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::TestConfig;
use crate::error::PropertyError;

/// Result of a shrinking operation
#[derive(Debug, Clone)]
pub struct ShrinkResult<T> {
    /// Original value that failed
    pub original: T,
    /// Minimal value that still fails
    pub minimal: T,
    /// Error reported by the property for `minimal`
    pub error: PropertyError,
    /// Number of accepted shrink steps
    pub steps: usize,
    /// Number of candidates evaluated
    pub attempts: usize,
    /// Time spent shrinking
    pub duration: Duration,
    /// False when the attempt limit or timeout stopped shrinking early
    pub completed: bool,
}

/// Configuration for shrinking behavior
#[derive(Debug, Clone)]
pub struct ShrinkConfig {
    /// Maximum number of candidates evaluated
    pub max_iterations: usize,
    /// Timeout for shrinking process
    pub timeout: Duration,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&TestConfig> for ShrinkConfig {
    fn from(config: &TestConfig) -> Self {
        Self {
            max_iterations: config.max_shrink_iterations,
            timeout: config.shrink_timeout,
        }
    }
}

/// Shrinking engine that coordinates the shrinking process
#[derive(Debug, Clone, Default)]
pub struct ShrinkEngine {
    config: ShrinkConfig,
}

impl ShrinkEngine {
    /// Create a new shrinking engine with custom configuration
    pub fn with_config(config: ShrinkConfig) -> Self {
        Self { config }
    }

    /// Minimize a failing value.
    ///
    /// Candidates for the current value are tried in order; the first one
    /// that still fails replaces it and the search restarts from there. The
    /// search stops at a fixpoint where no candidate fails, or when the
    /// attempt limit or timeout is reached. `check` returns the failure
    /// produced by a candidate, or `None` when it passes.
    pub fn minimize<T, S, F>(
        &self,
        original: T,
        error: PropertyError,
        candidates: S,
        mut check: F,
    ) -> ShrinkResult<T>
    where
        T: Clone,
        S: Fn(&T) -> Box<dyn Iterator<Item = T>>,
        F: FnMut(&T) -> Option<PropertyError>,
    {
        let start_time = Instant::now();
        let mut current = original.clone();
        let mut current_error = error;
        let mut steps = 0;
        let mut attempts = 0;
        let mut completed = true;

        'search: loop {
            let mut found_smaller = false;

            for candidate in candidates(&current) {
                if attempts >= self.config.max_iterations
                    || start_time.elapsed() >= self.config.timeout
                {
                    completed = false;
                    break 'search;
                }
                attempts += 1;

                if let Some(error) = check(&candidate) {
                    current = candidate;
                    current_error = error;
                    steps += 1;
                    found_smaller = true;
                    debug!(steps, attempts, "found smaller failing input");
                    break;
                }
            }

            if !found_smaller {
                break;
            }
        }

        let duration = start_time.elapsed();
        if completed {
            debug!(steps, attempts, ?duration, "shrinking reached a fixpoint");
        } else {
            debug!(steps, attempts, ?duration, "shrinking stopped early");
        }

        ShrinkResult {
            original,
            minimal: current,
            error: current_error,
            steps,
            attempts,
            duration,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use crate::primitives::{IntGenerator, VecGenerator};

    fn fails_when(predicate: impl Fn(i32) -> bool) -> impl FnMut(&i32) -> Option<PropertyError> {
        move |value: &i32| predicate(*value).then(|| PropertyError::falsified(format!("{value}")))
    }

    #[test]
    fn test_shrinks_integer_to_boundary() {
        let generator = IntGenerator::<i32>::full_range();
        let engine = ShrinkEngine::default();

        let result = engine.minimize(
            9_173,
            PropertyError::falsified("9173"),
            |v| generator.shrink(v),
            fails_when(|v| v >= 100),
        );

        assert_eq!(result.minimal, 100);
        assert_eq!(result.original, 9_173);
        assert_eq!(result.error, PropertyError::falsified("100"));
        assert!(result.completed);
        assert!(result.steps > 0);
    }

    #[test]
    fn test_shrinks_vector_to_single_offending_element() {
        let generator = VecGenerator::new(IntGenerator::<i32>::full_range(), 0, 64);
        let engine = ShrinkEngine::default();

        let result = engine.minimize(
            vec![3, -8, 41, 0, 77, 12],
            PropertyError::falsified("contains value over 40"),
            |v| generator.shrink(v),
            |v: &Vec<i32>| {
                v.iter()
                    .any(|&x| x > 40)
                    .then(|| PropertyError::falsified("contains value over 40"))
            },
        );

        assert_eq!(result.minimal, vec![41]);
    }

    #[test]
    fn test_attempt_limit_stops_early() {
        let generator = IntGenerator::<i32>::full_range();
        let engine = ShrinkEngine::with_config(ShrinkConfig {
            max_iterations: 3,
            timeout: Duration::from_secs(10),
        });

        let result = engine.minimize(
            1_000_000,
            PropertyError::falsified("big"),
            |v| generator.shrink(v),
            fails_when(|v| v > 10),
        );

        assert!(!result.completed);
        assert_eq!(result.attempts, 3);
        assert!(result.minimal > 10);
    }

    #[test]
    fn test_fixpoint_without_candidates() {
        let generator = IntGenerator::<i32>::full_range();
        let result = ShrinkEngine::default().minimize(
            0,
            PropertyError::falsified("zero"),
            |v| generator.shrink(v),
            fails_when(|_| true),
        );

        assert_eq!(result.minimal, 0);
        assert_eq!(result.steps, 0);
        assert_eq!(result.attempts, 0);
        assert!(result.completed);
    }
}

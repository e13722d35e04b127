//! Configuration types for controlling property runs and generation size.

use std::time::Duration;

use thiserror::Error;

/// Environment variable overriding [`TestConfig::iterations`]
pub const ENV_ITERATIONS: &str = "QUICKBUILD_ITERATIONS";
/// Environment variable overriding [`TestConfig::seed`]
pub const ENV_SEED: &str = "QUICKBUILD_SEED";
/// Environment variable overriding [`TestConfig::max_shrink_iterations`]
pub const ENV_MAX_SHRINK_ITERATIONS: &str = "QUICKBUILD_MAX_SHRINK_ITERATIONS";
/// Environment variable overriding [`TestConfig::time_budget`], in milliseconds
pub const ENV_TIME_BUDGET_MS: &str = "QUICKBUILD_TIME_BUDGET_MS";

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid number of iterations (must be > 0)
    #[error("invalid iterations count: {0} (must be > 0)")]
    InvalidIterations(usize),
    /// Invalid number of shrink iterations (must be > 0)
    #[error("invalid shrink iterations count: {0} (must be > 0)")]
    InvalidShrinkIterations(usize),
    /// Invalid timeout (must be > 0)
    #[error("invalid {0} (must be > 0)")]
    InvalidTimeout(&'static str),
    /// Size range with min above max
    #[error("invalid size range: min {min} exceeds max {max}")]
    InvalidSizeRange { min: usize, max: usize },
    /// An environment override that could not be parsed
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Configuration handed to generators for a single value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Upper bound for the length of generated collections and strings
    pub size_hint: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { size_hint: 10 }
    }
}

impl GeneratorConfig {
    /// Create a generator configuration with the given size bound
    pub fn with_size(size_hint: usize) -> Self {
        Self { size_hint }
    }
}

/// Configuration for individual property runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    /// Number of iterations to run
    pub iterations: usize,
    /// Optional seed for reproducible runs; drawn from OS entropy when unset
    pub seed: Option<u64>,
    /// Maximum number of candidates tried while shrinking
    pub max_shrink_iterations: usize,
    /// Timeout for the shrinking process
    pub shrink_timeout: Duration,
    /// Wall-clock budget for the iteration loop
    pub time_budget: Option<Duration>,
    /// Size bound used for the first iteration
    pub min_size: usize,
    /// Size bound reached by the last iteration
    pub max_size: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            seed: None,
            max_shrink_iterations: 1000,
            shrink_timeout: Duration::from_secs(10),
            time_budget: None,
            min_size: 0,
            max_size: 32,
        }
    }
}

impl TestConfig {
    /// Default configuration with any `QUICKBUILD_*` environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup; used by [`TestConfig::from_env`]
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(iterations) = parse_var(&lookup, ENV_ITERATIONS)? {
            self.iterations = iterations;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            self.seed = Some(seed);
        }
        if let Some(max_shrink) = parse_var(&lookup, ENV_MAX_SHRINK_ITERATIONS)? {
            self.max_shrink_iterations = max_shrink;
        }
        if let Some(budget_ms) = parse_var::<u64, _>(&lookup, ENV_TIME_BUDGET_MS)? {
            self.time_budget = Some(Duration::from_millis(budget_ms));
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the test configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        if self.max_shrink_iterations == 0 {
            return Err(ConfigError::InvalidShrinkIterations(
                self.max_shrink_iterations,
            ));
        }
        if self.shrink_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("shrink timeout"));
        }
        if self.time_budget.is_some_and(|budget| budget.is_zero()) {
            return Err(ConfigError::InvalidTimeout("time budget"));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::InvalidSizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }

    /// Generator configuration for the given iteration.
    ///
    /// The size bound grows linearly from `min_size` on the first iteration to
    /// `max_size` on the last, so early iterations favour small inputs.
    pub fn generator_config_for(&self, iteration: usize) -> GeneratorConfig {
        let span = self.max_size - self.min_size;
        let last = self.iterations.saturating_sub(1).max(1);
        let step = span * iteration.min(last) / last;
        GeneratorConfig::with_size(self.min_size + step)
    }

    /// Set the iteration count
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the time budget
    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
    }
}

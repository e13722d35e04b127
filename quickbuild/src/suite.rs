//! Suites of named properties resolved through a generator registry.
//!
//! A suite keeps going after a falsification so every failing property is
//! reported, but stops as soon as a driver failure shows its own results
//! cannot be trusted.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, TestConfig};
use crate::error::PropertyError;
use crate::execution::PropertyTest;
use crate::generator::{Arguments, Generator, GeneratorRegistry};
use crate::property::Property;
use crate::report::{PropertyReport, PropertyStatus, SuiteReport};
use crate::rng::{derive_seed, resolve_seed};

/// Configuration for a suite run
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Run distinct properties on worker threads
    pub parallel: bool,
    /// Number of worker threads used when `parallel` is set
    pub threads: usize,
    /// Configuration applied to every property; a fixed seed here seeds the whole suite
    pub test: TestConfig,
}

impl Default for SuiteConfig {
    /// Sequential run over [`TestConfig::from_env`]; an invalid environment
    /// is logged and ignored
    fn default() -> Self {
        let test = TestConfig::from_env().unwrap_or_else(|error| {
            warn!(%error, "ignoring invalid QUICKBUILD_* environment");
            TestConfig::default()
        });
        Self {
            parallel: false,
            threads: num_cpus::get(),
            test,
        }
    }
}

impl SuiteConfig {
    /// Sequential run over [`TestConfig::from_env`], failing on an invalid environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self {
            parallel: false,
            threads: num_cpus::get(),
            test: TestConfig::default(),
        }
        .with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `QUICKBUILD_*` style overrides from a key lookup to the shared test configuration
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.test = self.test.with_overrides(lookup)?;
        Ok(self)
    }
}

/// Reasons a suite run stops without a complete report
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A property's shrunk witness did not reproduce; the remaining properties were skipped
    #[error("driver failure in property `{property}`: {reason}")]
    DriverFailure {
        property: String,
        reason: String,
        partial: SuiteReport,
    },

    /// The shared configuration was rejected
    #[error("invalid suite configuration: {0}")]
    Config(#[from] ConfigError),

    /// A worker thread died outside of any property
    #[error("suite worker panicked")]
    WorkerPanicked,
}

struct Outcome {
    report: PropertyReport,
    driver_failure: bool,
}

type Runner = Box<dyn Fn(&GeneratorRegistry, TestConfig) -> Outcome + Send + Sync>;

struct RegisteredProperty {
    name: String,
    run: Runner,
}

/// Lends a suite-owned property body to a single run
struct PropertyRef<'a, P>(&'a P);

impl<T, P: Property<T>> Property<T> for PropertyRef<'_, P> {
    fn test(&self, input: T) -> Result<(), PropertyError> {
        self.0.test(input)
    }
}

/// A named collection of properties sharing one registry and configuration
pub struct PropertySuite {
    registry: GeneratorRegistry,
    config: SuiteConfig,
    properties: Vec<RegisteredProperty>,
}

impl PropertySuite {
    /// Suite over the built-in generators with the default configuration
    pub fn new() -> Self {
        Self::with_config(SuiteConfig::default())
    }

    /// Suite over the built-in generators with a custom configuration
    pub fn with_config(config: SuiteConfig) -> Self {
        Self {
            registry: GeneratorRegistry::with_defaults(),
            config,
            properties: Vec::new(),
        }
    }

    /// Replace the generator used for `T`
    pub fn register_generator<T, G>(&mut self, generator: G) -> &mut Self
    where
        T: 'static,
        G: Generator<T> + Send + Sync + 'static,
    {
        self.registry.register::<T, G>(generator);
        self
    }

    /// Mutable access to the generator registry
    pub fn registry_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.registry
    }

    /// Register a property over the argument tuple `A`.
    ///
    /// Generators for the elements of `A` are looked up when the suite runs,
    /// so they may be registered after the property.
    pub fn property<A, P>(&mut self, name: impl Into<String>, body: P) -> &mut Self
    where
        A: Arguments,
        P: Property<A> + Send + Sync + 'static,
    {
        let name = name.into();
        let property_name = name.clone();
        let run: Runner = Box::new(move |registry, config| {
            let seed = config.seed.unwrap_or_default();
            let generator = match A::resolve(registry) {
                Ok(generator) => generator,
                Err(err) => {
                    warn!(property = %property_name, %err, "cannot generate arguments");
                    return Outcome {
                        report: PropertyReport::aborted(property_name.clone(), seed, err.to_string()),
                        driver_failure: false,
                    };
                }
            };

            let result =
                PropertyTest::new(property_name.clone(), generator, PropertyRef(&body), config).run();
            Outcome {
                driver_failure: result
                    .as_ref()
                    .is_err_and(|failure| failure.error.is_driver_failure()),
                report: PropertyReport::from_result(&result),
            }
        });

        self.properties.push(RegisteredProperty { name, run });
        self
    }

    /// Number of registered properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if no property is registered
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Run every property and collect their reports
    pub fn run(&self) -> Result<SuiteReport, SuiteError> {
        self.config.test.validate()?;

        let started = Instant::now();
        let base_seed = resolve_seed(self.config.test.seed);
        info!(
            properties = self.properties.len(),
            base_seed,
            parallel = self.config.parallel,
            "running property suite"
        );

        let outcomes = if self.config.parallel && self.config.threads > 1 {
            self.run_parallel(base_seed)?
        } else {
            self.run_sequential(base_seed)
        };

        let mut report = SuiteReport {
            seed: base_seed,
            ..SuiteReport::default()
        };
        let mut driver_failure = None;
        for (index, outcome) in outcomes {
            if outcome.driver_failure && driver_failure.is_none() {
                driver_failure = Some((index, outcome.report.clone()));
            }
            report.properties.push(outcome.report);
        }
        report.duration = started.elapsed();

        if let Some((index, failed)) = driver_failure {
            let reason = match &failed.status {
                PropertyStatus::Aborted { reason } => reason.clone(),
                other => format!("{other:?}"),
            };
            error!(property = %self.properties[index].name, %reason, "aborting suite");
            return Err(SuiteError::DriverFailure {
                property: failed.name,
                reason,
                partial: report,
            });
        }

        info!(summary = %report.summary(), "property suite finished");
        Ok(report)
    }

    fn run_one(&self, index: usize, base_seed: u64) -> Outcome {
        let property = &self.properties[index];
        let mut config = self.config.test.clone();
        config.seed = Some(derive_seed(base_seed, index as u64));
        debug!(property = %property.name, seed = ?config.seed, "starting property");
        (property.run)(&self.registry, config)
    }

    fn run_sequential(&self, base_seed: u64) -> Vec<(usize, Outcome)> {
        let mut outcomes = Vec::with_capacity(self.properties.len());
        for index in 0..self.properties.len() {
            let outcome = self.run_one(index, base_seed);
            let stop = outcome.driver_failure;
            outcomes.push((index, outcome));
            if stop {
                break;
            }
        }
        outcomes
    }

    fn run_parallel(&self, base_seed: u64) -> Result<Vec<(usize, Outcome)>, SuiteError> {
        let next = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let workers = self.config.threads.min(self.properties.len()).max(1);

        let joined = crossbeam::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    s.spawn(|_| {
                        let mut outcomes = Vec::new();
                        while !stop.load(Ordering::SeqCst) {
                            let index = next.fetch_add(1, Ordering::SeqCst);
                            if index >= self.properties.len() {
                                break;
                            }
                            let outcome = self.run_one(index, base_seed);
                            if outcome.driver_failure {
                                stop.store(true, Ordering::SeqCst);
                            }
                            outcomes.push((index, outcome));
                        }
                        outcomes
                    })
                })
                .collect();

            let mut outcomes = Vec::new();
            for handle in handles {
                outcomes.extend(handle.join().map_err(|_| SuiteError::WorkerPanicked)?);
            }
            Ok::<_, SuiteError>(outcomes)
        });

        let mut outcomes: Vec<(usize, Outcome)> =
            joined.map_err(|_| SuiteError::WorkerPanicked)??;
        outcomes.sort_by_key(|(index, _)| *index);
        Ok(outcomes)
    }
}

impl Default for PropertySuite {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::primitives::ConstantGenerator;

    fn seeded_suite(parallel: bool) -> PropertySuite {
        PropertySuite::with_config(SuiteConfig {
            parallel,
            threads: 4,
            test: TestConfig::default().iterations(50).seed(99),
        })
    }

    #[test]
    fn test_suite_continues_after_falsification() {
        let mut suite = seeded_suite(false);
        suite
            .property::<(i32,), _>("abs_is_non_negative", |(x,): (i32,)| {
                x.checked_abs().is_none_or(|a| a >= 0)
            })
            .property::<(i32,), _>("all_small", |(x,): (i32,)| x.unsigned_abs() < 10)
            .property::<(String,), _>("strings_roundtrip", |(s,): (String,)| {
                s.chars().collect::<String>() == s
            });

        let report = suite.run().unwrap();
        assert_eq!(report.properties.len(), 3);
        assert!(!report.is_success());
        assert!(report.get("abs_is_non_negative").unwrap().is_passed());
        assert!(report.get("strings_roundtrip").unwrap().is_passed());
        assert!(matches!(
            report.get("all_small").unwrap().status,
            PropertyStatus::Failed { .. }
        ));
    }

    #[test]
    fn test_missing_generator_aborts_only_that_property() {
        #[derive(Debug, Clone)]
        struct Unregistered;

        let mut suite = seeded_suite(false);
        suite
            .property::<(Unregistered,), _>("needs_custom", |(_u,): (Unregistered,)| true)
            .property::<(), _>("trivial", |(): ()| true);

        let report = suite.run().unwrap();
        assert!(matches!(
            &report.get("needs_custom").unwrap().status,
            PropertyStatus::Aborted { reason } if reason.contains("Unregistered")
        ));
        assert!(report.get("trivial").unwrap().is_passed());

        suite.register_generator::<Unregistered, _>(ConstantGenerator::new(Unregistered));
        assert!(suite.run().unwrap().is_success());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let build = |parallel| {
            let mut suite = seeded_suite(parallel);
            for limit in [5, 50, 500, 5_000] {
                suite.property::<(u16,), _>(format!("below_{limit}"), move |(x,): (u16,)| {
                    x < limit
                });
            }
            suite.run().unwrap()
        };

        let sequential = build(false);
        let parallel = build(true);
        assert_eq!(
            sequential
                .properties
                .iter()
                .map(|r| (&r.name, r.seed, &r.status))
                .collect::<Vec<_>>(),
            parallel
                .properties
                .iter()
                .map(|r| (&r.name, r.seed, &r.status))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_environment_seed_fixes_every_property_seed() {
        let lookup = |key: &str| match key {
            "QUICKBUILD_SEED" => Some("7".to_string()),
            "QUICKBUILD_ITERATIONS" => Some("20".to_string()),
            _ => None,
        };
        let config = SuiteConfig {
            test: TestConfig::default(),
            ..SuiteConfig::default()
        }
        .with_overrides(lookup)
        .unwrap();
        assert_eq!(config.test.seed, Some(7));
        assert_eq!(config.test.iterations, 20);

        let mut suite = PropertySuite::with_config(config);
        suite
            .property::<(u8,), _>("first", |(_x,): (u8,)| true)
            .property::<(u8,), _>("second", |(x,): (u8,)| x < 100);

        let report = suite.run().unwrap();
        assert_eq!(report.seed, 7);
        assert_eq!(report.properties[0].seed, derive_seed(7, 0));
        assert_eq!(report.properties[1].seed, derive_seed(7, 1));
        assert!(report.to_string().contains("QUICKBUILD_SEED=7"));
    }

    #[test]
    fn test_invalid_environment_is_rejected() {
        let err = SuiteConfig::default()
            .with_overrides(|key| (key == "QUICKBUILD_ITERATIONS").then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "QUICKBUILD_ITERATIONS", .. }));
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let suite = PropertySuite::with_config(SuiteConfig {
            test: TestConfig::default().iterations(0),
            ..SuiteConfig::default()
        });
        assert!(matches!(suite.run(), Err(SuiteError::Config(_))));
    }

    /// Starts at 8 and shrinks by counting down
    struct Descending;

    impl Generator<u32> for Descending {
        fn generate(&self, _rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> u32 {
            8
        }

        fn shrink(&self, value: &u32) -> Box<dyn Iterator<Item = u32>> {
            Box::new((0..*value).rev())
        }
    }

    #[test]
    fn test_driver_failure_aborts_suite() {
        let failures = AtomicUsize::new(0);
        let mut suite = seeded_suite(false);
        suite
            .register_generator::<u32, _>(Descending)
            .property::<(bool,), _>("first", |(_b,): (bool,)| true)
            .property::<(u32,), _>("flaky", move |(x,): (u32,)| {
                x == 0 || failures.fetch_add(1, Ordering::SeqCst) >= 2
            })
            .property::<(bool,), _>("never_reached", |(_b,): (bool,)| true);

        match suite.run() {
            Err(SuiteError::DriverFailure {
                property,
                reason,
                partial,
            }) => {
                assert_eq!(property, "flaky");
                assert!(reason.contains("no longer reproduces"));
                assert_eq!(partial.properties.len(), 2);
                assert!(partial.get("never_reached").is_none());
            }
            other => panic!("expected a driver failure, got {other:?}"),
        }
    }
}

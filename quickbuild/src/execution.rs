//! Property test execution engine.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe, catch_unwind};
use std::sync::Once;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, info_span, warn};

use crate::arbitrary::Arbitrary;
use crate::config::TestConfig;
use crate::error::{Counterexample, PropertyError, PropertyResult, TestFailure, TestSuccess};
use crate::generator::Generator;
use crate::property::Property;
use crate::rng::{create_seeded_rng, resolve_seed};
use crate::shrink::{ShrinkConfig, ShrinkEngine};

thread_local! {
    static PANICS_SILENCED: Cell<bool> = const { Cell::new(false) };
}

static SILENCING_HOOK: Once = Once::new();

/// Keeps the panic hook quiet on this thread while alive.
///
/// Shrinking re-runs a panicking body many times; only the first panic of
/// a failure is printed.
struct SilencedPanics {
    previous: bool,
}

impl SilencedPanics {
    fn enter() -> Self {
        SILENCING_HOOK.call_once(|| {
            let previous_hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !PANICS_SILENCED.with(Cell::get) {
                    previous_hook(info);
                }
            }));
        });
        Self {
            previous: PANICS_SILENCED.with(|silenced| silenced.replace(true)),
        }
    }
}

impl Drop for SilencedPanics {
    fn drop(&mut self) {
        PANICS_SILENCED.with(|silenced| silenced.set(self.previous));
    }
}

/// A single property bound to its generator and configuration
pub struct PropertyTest<T, G, P> {
    name: String,
    generator: G,
    property: P,
    config: TestConfig,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, G, P> PropertyTest<T, G, P>
where
    T: Clone + fmt::Debug + 'static,
    G: Generator<T>,
    P: Property<T>,
{
    /// Create a new property test with the given generator, property, and configuration
    pub fn new(name: impl Into<String>, generator: G, property: P, config: TestConfig) -> Self {
        Self {
            name: name.into(),
            generator,
            property,
            config,
            _phantom: PhantomData,
        }
    }

    /// Execute the property test.
    ///
    /// Runs until every iteration passes, the time budget runs out, or an
    /// input falsifies the property. A falsifying input is shrunk and the
    /// minimal witness re-checked before the failure is returned.
    pub fn run(self) -> PropertyResult<T> {
        let started = Instant::now();
        let seed = resolve_seed(self.config.seed);
        let span = info_span!("property", name = %self.name, seed);
        let _guard = span.enter();

        if let Err(config_error) = self.config.validate() {
            let error = PropertyError::from(config_error);
            error!(%error, "rejected configuration");
            return Err(self.failure_without_input(seed, error, None, started));
        }

        let mut rng = create_seeded_rng(seed);
        let mut passed = 0;
        let mut budget_exhausted = false;

        for iteration in 0..self.config.iterations {
            if let Some(budget) = self.config.time_budget
                && started.elapsed() >= budget
            {
                debug!(iteration, ?budget, "time budget exhausted");
                budget_exhausted = true;
                break;
            }

            let generator_config = self.config.generator_config_for(iteration);
            let input = match catch_unwind(AssertUnwindSafe(|| {
                self.generator.generate(&mut rng, &generator_config)
            })) {
                Ok(input) => input,
                Err(payload) => {
                    let error = PropertyError::GenerationFailed {
                        message: panic_message(payload.as_ref()),
                    };
                    warn!(iteration, %error, "generator failed");
                    return Err(self.failure_without_input(seed, error, Some(iteration), started));
                }
            };

            debug!(iteration, size = generator_config.size_hint, ?input, "running iteration");
            if let Err(error) = self.evaluate(input.clone()) {
                return Err(self.falsified(seed, iteration, input, error, started));
            }
            passed += 1;
        }

        let duration = started.elapsed();
        info!(iterations = passed, budget_exhausted, ?duration, "property passed");
        Ok(TestSuccess {
            property: self.name,
            seed,
            iterations: passed,
            budget_exhausted,
            config: self.config,
            duration,
        })
    }

    /// Run the body once, turning a panic into [`PropertyError::Panicked`]
    fn evaluate(&self, input: T) -> Result<(), PropertyError> {
        match catch_unwind(AssertUnwindSafe(|| self.property.test(input))) {
            Ok(verdict) => verdict,
            Err(payload) => Err(PropertyError::Panicked {
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn falsified(
        &self,
        seed: u64,
        iteration: usize,
        original: T,
        error: PropertyError,
        started: Instant,
    ) -> TestFailure<T> {
        warn!(iteration, input = ?original, %error, "property falsified, shrinking");

        let silenced = SilencedPanics::enter();
        let engine = ShrinkEngine::with_config(ShrinkConfig::from(&self.config));
        let shrunk = engine.minimize(
            original,
            error,
            |value| self.generator.shrink(value),
            |candidate| self.evaluate(candidate.clone()).err(),
        );

        let error = if shrunk.steps == 0 {
            shrunk.error
        } else {
            match self.evaluate(shrunk.minimal.clone()) {
                Err(error) => error,
                Ok(()) => {
                    let error = PropertyError::ShrinkNotReproducible {
                        input: format!("{:?}", shrunk.minimal),
                    };
                    error!(%error, "shrunk input passed on re-run");
                    error
                }
            }
        };
        drop(silenced);

        let counterexample = Counterexample {
            shrunk: (shrunk.steps > 0).then_some(shrunk.minimal),
            original: shrunk.original,
            shrink_steps: shrunk.steps,
            shrink_duration: shrunk.duration,
        };
        warn!(
            minimal = ?counterexample.minimal(),
            steps = counterexample.shrink_steps,
            "property failed"
        );

        TestFailure {
            property: self.name.clone(),
            seed,
            error,
            iteration: Some(iteration),
            counterexample: Some(counterexample),
            config: self.config.clone(),
            duration: started.elapsed(),
        }
    }

    fn failure_without_input(
        &self,
        seed: u64,
        error: PropertyError,
        iteration: Option<usize>,
        started: Instant,
    ) -> TestFailure<T> {
        TestFailure::without_input(
            self.name.clone(),
            seed,
            error,
            iteration,
            self.config.clone(),
            started.elapsed(),
        )
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Execute a property test with the defaults and any `QUICKBUILD_*` overrides
pub fn check<T, G, P>(name: &str, generator: G, property: P) -> PropertyResult<T>
where
    T: Clone + fmt::Debug + 'static,
    G: Generator<T>,
    P: Property<T>,
{
    match TestConfig::from_env() {
        Ok(config) => check_with_config(name, generator, property, config),
        Err(config_error) => {
            let error = PropertyError::from(config_error);
            error!(property = name, %error, "rejected environment configuration");
            Err(TestFailure::without_input(
                name,
                0,
                error,
                None,
                TestConfig::default(),
                Duration::ZERO,
            ))
        }
    }
}

/// Execute a property test with a custom configuration
pub fn check_with_config<T, G, P>(
    name: &str,
    generator: G,
    property: P,
    config: TestConfig,
) -> PropertyResult<T>
where
    T: Clone + fmt::Debug + 'static,
    G: Generator<T>,
    P: Property<T>,
{
    PropertyTest::new(name, generator, property, config).run()
}

/// Check a property over the [`Arbitrary`] generator of its input type
pub fn for_all<T, P>(name: &str, config: TestConfig, property: P) -> PropertyResult<T>
where
    T: Arbitrary,
    P: Property<T>,
{
    check_with_config(name, T::arbitrary(), property, config)
}

//! Core generator infrastructure and registry system.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::arbitrary::Arbitrary;
use crate::config::GeneratorConfig;
use crate::error::PropertyError;
use crate::primitives::{Tuple1Generator, Tuple2Generator, Tuple3Generator, Tuple4Generator};

/// Core generator trait for creating random test data
pub trait Generator<T> {
    /// Generate a random value of type T using the provided RNG and configuration
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> T;

    /// Lazily produce candidates smaller than `value`, most aggressive first
    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>>;
}

/// A cheaply clonable, type-erased generator
pub struct SharedGenerator<T> {
    inner: Arc<dyn Generator<T> + Send + Sync>,
}

impl<T> SharedGenerator<T> {
    /// Erase the concrete type of a generator
    pub fn new<G: Generator<T> + Send + Sync + 'static>(generator: G) -> Self {
        Self {
            inner: Arc::new(generator),
        }
    }
}

impl<T> Clone for SharedGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SharedGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGenerator")
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Generator<T> for SharedGenerator<T> {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> T {
        self.inner.generate(rng, config)
    }

    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>> {
        self.inner.shrink(value)
    }
}

/// Type-keyed registry mapping a value type to the generator used for it
pub struct GeneratorRegistry {
    generators: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl GeneratorRegistry {
    /// Create a new empty generator registry
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in generators
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_arbitrary::<bool>();
        registry.register_arbitrary::<char>();
        registry.register_arbitrary::<i8>();
        registry.register_arbitrary::<i16>();
        registry.register_arbitrary::<i32>();
        registry.register_arbitrary::<i64>();
        registry.register_arbitrary::<u8>();
        registry.register_arbitrary::<u16>();
        registry.register_arbitrary::<u32>();
        registry.register_arbitrary::<u64>();
        registry.register_arbitrary::<usize>();
        registry.register_arbitrary::<f32>();
        registry.register_arbitrary::<f64>();
        registry.register_arbitrary::<String>();
        registry.register_arbitrary::<Option<String>>();
        registry.register_arbitrary::<Option<i32>>();
        registry.register_arbitrary::<Vec<String>>();
        registry.register_arbitrary::<Vec<Option<String>>>();
        registry.register_arbitrary::<Vec<i32>>();
        registry.register_arbitrary::<Vec<u8>>();
        registry
    }

    /// Register a generator for a specific type, replacing any previous one
    pub fn register<T: 'static, G: Generator<T> + Send + Sync + 'static>(&mut self, generator: G) {
        self.generators
            .insert(TypeId::of::<T>(), Box::new(SharedGenerator::new(generator)));
    }

    /// Register the [`Arbitrary`] generator of a type
    pub fn register_arbitrary<T: Arbitrary>(&mut self) {
        self.register::<T, _>(T::arbitrary());
    }

    /// Get the generator for a specific type
    pub fn get<T: 'static>(&self) -> Option<SharedGenerator<T>> {
        self.generators
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<SharedGenerator<T>>())
            .cloned()
    }

    /// Get the generator for a type or fail with [`PropertyError::NoGenerator`]
    pub fn require<T: 'static>(&self) -> Result<SharedGenerator<T>, PropertyError> {
        self.get::<T>().ok_or(PropertyError::NoGenerator {
            type_name: std::any::type_name::<T>(),
        })
    }

    /// Check if a generator is registered for a specific type
    pub fn contains<T: 'static>(&self) -> bool {
        self.generators.contains_key(&TypeId::of::<T>())
    }

    /// Remove a generator for a specific type
    pub fn remove<T: 'static>(&mut self) -> bool {
        self.generators.remove(&TypeId::of::<T>()).is_some()
    }

    /// Get the number of registered generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("len", &self.generators.len())
            .finish()
    }
}

/// Parameter lists of a property: tuples whose element generators come from a registry
pub trait Arguments: Clone + fmt::Debug + Send + 'static {
    /// Build the tuple generator, failing on the first unregistered element type
    fn resolve(registry: &GeneratorRegistry) -> Result<SharedGenerator<Self>, PropertyError>;
}

impl Arguments for () {
    fn resolve(_registry: &GeneratorRegistry) -> Result<SharedGenerator<Self>, PropertyError> {
        Ok(SharedGenerator::new(()))
    }
}

macro_rules! impl_arguments {
    ($tuple_gen:ident; $($name:ident),+) => {
        impl<$($name),+> Arguments for ($($name,)+)
        where
            $($name: Clone + fmt::Debug + Send + 'static,)+
        {
            fn resolve(registry: &GeneratorRegistry) -> Result<SharedGenerator<Self>, PropertyError> {
                Ok(SharedGenerator::new($tuple_gen::new($(registry.require::<$name>()?),+)))
            }
        }
    };
}

impl_arguments!(Tuple1Generator; A);
impl_arguments!(Tuple2Generator; A, B);
impl_arguments!(Tuple3Generator; A, B, C);
impl_arguments!(Tuple4Generator; A, B, C, D);

//! Arbitrary trait: the default generator of a type.

use std::fmt;

use crate::generator::Generator;
use crate::primitives::{
    BoolGenerator, CharGenerator, FloatGenerator, IntGenerator, OptionGenerator, StringGenerator,
    Tuple1Generator, Tuple2Generator, Tuple3Generator, Tuple4Generator, VecGenerator,
};

/// Longest string or collection an arbitrary generator produces; the
/// per-iteration size hint usually bounds it first.
pub const MAX_ARBITRARY_LENGTH: usize = 256;

/// Types with a default generator.
///
/// `#[property]` functions and [`crate::for_all`] derive their input
/// generator from this trait, and [`crate::GeneratorRegistry::register_arbitrary`]
/// installs it into a registry.
pub trait Arbitrary: Sized + Clone + fmt::Debug + Send + 'static {
    /// The generator type used for this type
    type Generator: Generator<Self> + Clone + Send + Sync + 'static;

    /// Create the default generator for this type
    fn arbitrary() -> Self::Generator;
}

impl Arbitrary for bool {
    type Generator = BoolGenerator;

    fn arbitrary() -> Self::Generator {
        BoolGenerator
    }
}

macro_rules! impl_arbitrary_int {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                type Generator = IntGenerator<$t>;

                fn arbitrary() -> Self::Generator {
                    IntGenerator::full_range()
                }
            }
        )*
    };
}

impl_arbitrary_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_arbitrary_float {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                type Generator = FloatGenerator<$t>;

                fn arbitrary() -> Self::Generator {
                    FloatGenerator::<$t>::reasonable_range()
                }
            }
        )*
    };
}

impl_arbitrary_float!(f32, f64);

impl Arbitrary for char {
    type Generator = CharGenerator;

    fn arbitrary() -> Self::Generator {
        CharGenerator::text()
    }
}

impl Arbitrary for String {
    type Generator = StringGenerator;

    fn arbitrary() -> Self::Generator {
        StringGenerator::text(0, MAX_ARBITRARY_LENGTH)
    }
}

impl<T: Arbitrary> Arbitrary for Vec<T> {
    type Generator = VecGenerator<T, T::Generator>;

    fn arbitrary() -> Self::Generator {
        VecGenerator::new(T::arbitrary(), 0, MAX_ARBITRARY_LENGTH)
    }
}

impl<T: Arbitrary> Arbitrary for Option<T> {
    type Generator = OptionGenerator<T, T::Generator>;

    fn arbitrary() -> Self::Generator {
        OptionGenerator::new(T::arbitrary())
    }
}

impl Arbitrary for () {
    type Generator = ();

    fn arbitrary() -> Self::Generator {}
}

macro_rules! impl_arbitrary_tuple {
    ($tuple_gen:ident; $($name:ident),+) => {
        impl<$($name: Arbitrary),+> Arbitrary for ($($name,)+) {
            type Generator = $tuple_gen<$($name::Generator),+>;

            fn arbitrary() -> Self::Generator {
                $tuple_gen::new($($name::arbitrary()),+)
            }
        }
    };
}

impl_arbitrary_tuple!(Tuple1Generator; A);
impl_arbitrary_tuple!(Tuple2Generator; A, B);
impl_arbitrary_tuple!(Tuple3Generator; A, B, C);
impl_arbitrary_tuple!(Tuple4Generator; A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_vec_of_strings_covers_edge_shapes() {
        let generator = <Vec<String>>::arbitrary();
        let mut rng = StdRng::seed_from_u64(21);
        let config = GeneratorConfig::with_size(8);

        let values: Vec<Vec<String>> = (0..400)
            .map(|_| generator.generate(&mut rng, &config))
            .collect();

        assert!(values.iter().any(Vec::is_empty));
        assert!(values.iter().any(|v| v.iter().any(String::is_empty)));
        assert!(values.iter().flatten().any(|s| !s.is_ascii()));
        assert!(values.iter().all(|v| v.len() <= 8));
    }

    #[test]
    fn test_floats_stay_in_reasonable_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = GeneratorConfig::default();

        let single = f32::arbitrary();
        let double = f64::arbitrary();
        for _ in 0..100 {
            assert!((-1000.0..=1000.0).contains(&single.generate(&mut rng, &config)));
            assert!((-1000.0..=1000.0).contains(&double.generate(&mut rng, &config)));
        }
        assert_eq!(double.shrink(&0.0).count(), 0);
    }

    #[test]
    fn test_tuple_arbitrary_generates_each_component() {
        let generator = <(Vec<String>, i32)>::arbitrary();
        let mut rng = StdRng::seed_from_u64(1);
        let config = GeneratorConfig::with_size(3);

        let (names, _counter) = generator.generate(&mut rng, &config);
        assert!(names.len() <= 3);

        let shrinks: Vec<_> = generator
            .shrink(&(vec!["q".to_string()], 9))
            .collect();
        assert_eq!(shrinks[0], (Vec::new(), 9));
        assert!(shrinks.contains(&(vec!["q".to_string()], 0)));
    }
}

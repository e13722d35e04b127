//! Generators for primitive types, strings, collections and parameter tuples.

use std::marker::PhantomData;

use num_traits::PrimInt;
use rand::Rng;
use rand::distributions::uniform::SampleUniform;

use crate::config::GeneratorConfig;
use crate::generator::Generator;

/// Upper bound on element-wise shrink candidates taken per position
const ELEMENT_SHRINK_WIDTH: usize = 8;

/// Generator that always yields the same value
#[derive(Debug, Clone)]
pub struct ConstantGenerator<T> {
    value: T,
}

impl<T> ConstantGenerator<T> {
    /// Create a generator returning `value` on every call
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + 'static> Generator<T> for ConstantGenerator<T> {
    fn generate(&self, _rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> T {
        self.value.clone()
    }

    fn shrink(&self, _value: &T) -> Box<dyn Iterator<Item = T>> {
        Box::new(std::iter::empty())
    }
}

impl Generator<()> for () {
    fn generate(&self, _rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) {}

    fn shrink(&self, _value: &()) -> Box<dyn Iterator<Item = ()>> {
        Box::new(std::iter::empty())
    }
}

/// Generator for boolean values
#[derive(Debug, Clone)]
pub struct BoolGenerator;

impl Generator<bool> for BoolGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> bool {
        rng.r#gen()
    }

    fn shrink(&self, value: &bool) -> Box<dyn Iterator<Item = bool>> {
        if *value {
            Box::new(std::iter::once(false))
        } else {
            Box::new(std::iter::empty())
        }
    }
}

/// Generator for integer types within an inclusive range.
///
/// One draw in four is taken from the boundary values of the range (its
/// ends, and `0`, `1` and `-1` when they fall inside it); the rest are
/// uniform. Shrinking moves towards zero, or towards the end of the range
/// closest to zero when zero is excluded.
#[derive(Debug, Clone)]
pub struct IntGenerator<T> {
    min: T,
    max: T,
}

impl<T: PrimInt> IntGenerator<T> {
    /// Create an integer generator over `min..=max`
    pub fn new(min: T, max: T) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Create a generator for the full range of the type
    pub fn full_range() -> Self {
        Self::new(T::min_value(), T::max_value())
    }

    fn edge_values(&self) -> Vec<T> {
        let zero = T::zero();
        let one = T::one();
        let mut edges = vec![self.min];
        if self.max != self.min {
            edges.push(self.max);
        }
        for candidate in [Some(zero), Some(one), zero.checked_sub(&one)]
            .into_iter()
            .flatten()
        {
            if self.min <= candidate && candidate <= self.max && !edges.contains(&candidate) {
                edges.push(candidate);
            }
        }
        edges
    }

    fn shrink_target(&self) -> T {
        let zero = T::zero();
        if self.min > zero {
            self.min
        } else if self.max < zero {
            self.max
        } else {
            zero
        }
    }
}

impl<T> Generator<T> for IntGenerator<T>
where
    T: PrimInt + SampleUniform + 'static,
{
    fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> T {
        if rng.gen_ratio(1, 4) {
            let edges = self.edge_values();
            return edges[rng.gen_range(0..edges.len())];
        }
        rng.gen_range(self.min..=self.max)
    }

    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>> {
        let value = *value;
        let target = self.shrink_target();
        if value == target || value < self.min || value > self.max {
            return Box::new(std::iter::empty());
        }

        // `value` and `target` sit on the same side of zero, so the
        // difference cannot overflow.
        let two = T::one() + T::one();
        let mut delta = value - target;
        let mut shrinks = Vec::new();
        while delta != T::zero() {
            shrinks.push(value - delta);
            delta = delta / two;
        }

        Box::new(shrinks.into_iter())
    }
}

/// Generator for floating-point types
#[derive(Debug, Clone)]
pub struct FloatGenerator<T> {
    min: T,
    max: T,
}

impl<T> FloatGenerator<T>
where
    T: Copy + PartialOrd,
{
    /// Create a new float generator over `min..=max`; reversed bounds are swapped
    pub fn new(min: T, max: T) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }
}

macro_rules! impl_float_generator {
    ($($t:ty),*) => {
        $(
            impl Generator<$t> for FloatGenerator<$t> {
                fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> $t {
                    rng.gen_range(self.min..=self.max)
                }

                fn shrink(&self, value: &$t) -> Box<dyn Iterator<Item = $t>> {
                    let value = *value;
                    if value == 0.0 || !value.is_finite() {
                        return Box::new(std::iter::empty());
                    }

                    let in_range = |candidate: $t| self.min <= candidate && candidate <= self.max;
                    let mut shrinks: Vec<$t> = [0.0, value.trunc(), value / 2.0]
                        .into_iter()
                        .filter(|&candidate| candidate != value && in_range(candidate))
                        .collect();
                    shrinks.dedup();

                    Box::new(shrinks.into_iter())
                }
            }

            impl FloatGenerator<$t> {
                /// Create a generator for a reasonable range of the type
                pub fn reasonable_range() -> Self {
                    Self::new(-1000.0, 1000.0)
                }
            }
        )*
    };
}

impl_float_generator!(f32, f64);

/// Shrink targets for characters, simplest first
const SIMPLEST_CHARS: [char; 3] = ['a', '0', ' '];

/// Position in [`SIMPLEST_CHARS`]; every other character ranks after them.
/// Shrinks only move to a strictly lower rank, so they cannot cycle.
fn simplicity(c: char) -> usize {
    SIMPLEST_CHARS
        .iter()
        .position(|&simple| simple == c)
        .unwrap_or(SIMPLEST_CHARS.len())
}

/// Generator for character values drawn from inclusive code point ranges
#[derive(Debug, Clone)]
pub struct CharGenerator {
    ranges: Vec<(char, char)>,
}

impl CharGenerator {
    /// Printable ASCII, Latin-1 letters and the Greek alphabet
    pub fn text() -> Self {
        Self {
            ranges: vec![(' ', '~'), ('\u{00C0}', '\u{00FF}'), ('\u{0391}', '\u{03C9}')],
        }
    }

    /// Create a new character generator with ASCII printable characters
    pub fn ascii_printable() -> Self {
        Self {
            ranges: vec![(' ', '~')],
        }
    }

    /// Create a new character generator with ASCII alphanumeric characters
    pub fn ascii_alphanumeric() -> Self {
        Self {
            ranges: vec![('0', '9'), ('A', 'Z'), ('a', 'z')],
        }
    }

    /// Create a new character generator with custom ranges
    pub fn with_ranges(ranges: Vec<(char, char)>) -> Self {
        Self { ranges }
    }

    fn contains(&self, c: char) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| start <= c && c <= end)
    }
}

impl Generator<char> for CharGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> char {
        if self.ranges.is_empty() {
            return 'a';
        }

        let (start, end) = self.ranges[rng.gen_range(0..self.ranges.len())];
        let code = rng.gen_range(start as u32..=end as u32);
        char::from_u32(code).unwrap_or(start)
    }

    fn shrink(&self, value: &char) -> Box<dyn Iterator<Item = char>> {
        let rank = simplicity(*value);
        let shrinks: Vec<char> = SIMPLEST_CHARS
            .into_iter()
            .filter(|&c| simplicity(c) < rank && self.contains(c))
            .collect();
        Box::new(shrinks.into_iter())
    }
}

/// Generator for string values.
///
/// The length is bounded by both `max_length` and the size hint of the
/// iteration. A tenth of the draws are forced empty when the minimum length
/// allows it.
#[derive(Debug, Clone)]
pub struct StringGenerator {
    char_generator: CharGenerator,
    min_length: usize,
    max_length: usize,
    empty_probability: f64,
}

impl StringGenerator {
    /// Strings over [`CharGenerator::text`], including non-ASCII characters
    pub fn text(min_length: usize, max_length: usize) -> Self {
        Self::with_char_generator(CharGenerator::text(), min_length, max_length)
    }

    /// Create a new string generator with ASCII alphanumeric characters
    pub fn ascii_alphanumeric(min_length: usize, max_length: usize) -> Self {
        Self::with_char_generator(CharGenerator::ascii_alphanumeric(), min_length, max_length)
    }

    /// Create a new string generator with a custom character generator
    pub fn with_char_generator(
        char_generator: CharGenerator,
        min_length: usize,
        max_length: usize,
    ) -> Self {
        Self {
            char_generator,
            min_length,
            max_length: max_length.max(min_length),
            empty_probability: 0.1,
        }
    }

    /// Change how often an empty string is produced
    pub fn empty_probability(mut self, probability: f64) -> Self {
        self.empty_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl Generator<String> for StringGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> String {
        if self.min_length == 0 && rng.gen_bool(self.empty_probability) {
            return String::new();
        }

        let max_len = self.max_length.min(config.size_hint).max(self.min_length);
        let length = rng.gen_range(self.min_length..=max_len);
        (0..length)
            .map(|_| self.char_generator.generate(rng, config))
            .collect()
    }

    fn shrink(&self, value: &String) -> Box<dyn Iterator<Item = String>> {
        let chars: Vec<char> = value.chars().collect();
        let mut shrinks = Vec::new();

        if chars.len() > self.min_length {
            if self.min_length == 0 {
                shrinks.push(String::new());
            }
            let half = chars.len() / 2;
            if half >= self.min_length && half > 0 {
                shrinks.push(chars[..half].iter().collect());
            }
            for skip in 0..chars.len() {
                shrinks.push(
                    chars
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != skip)
                        .map(|(_, c)| c)
                        .collect(),
                );
            }
        }

        for (i, &c) in chars.iter().enumerate() {
            for simpler in self.char_generator.shrink(&c).take(1) {
                let mut next = chars.clone();
                next[i] = simpler;
                shrinks.push(next.into_iter().collect());
            }
        }

        shrinks.dedup();
        Box::new(shrinks.into_iter())
    }
}

/// Generator for `Vec<T>` collections.
///
/// Shrinking tries structural reductions first (empty, first half, second
/// half, each single removal) and then shrinks elements in place.
#[derive(Debug)]
pub struct VecGenerator<T, G> {
    element_generator: G,
    min_length: usize,
    max_length: usize,
    empty_probability: f64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, G: Clone> Clone for VecGenerator<T, G> {
    fn clone(&self) -> Self {
        Self {
            element_generator: self.element_generator.clone(),
            min_length: self.min_length,
            max_length: self.max_length,
            empty_probability: self.empty_probability,
            _phantom: PhantomData,
        }
    }
}

impl<T, G> VecGenerator<T, G>
where
    G: Generator<T>,
{
    /// Create a new vector generator
    pub fn new(element_generator: G, min_length: usize, max_length: usize) -> Self {
        Self {
            element_generator,
            min_length,
            max_length: max_length.max(min_length),
            empty_probability: 0.1,
            _phantom: PhantomData,
        }
    }

    /// Change how often an empty vector is produced
    pub fn empty_probability(mut self, probability: f64) -> Self {
        self.empty_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl<T, G> Generator<Vec<T>> for VecGenerator<T, G>
where
    G: Generator<T>,
    T: Clone + 'static,
{
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> Vec<T> {
        if self.min_length == 0 && rng.gen_bool(self.empty_probability) {
            return Vec::new();
        }

        let max_len = self.max_length.min(config.size_hint).max(self.min_length);
        let length = rng.gen_range(self.min_length..=max_len);
        (0..length)
            .map(|_| self.element_generator.generate(rng, config))
            .collect()
    }

    fn shrink(&self, value: &Vec<T>) -> Box<dyn Iterator<Item = Vec<T>>> {
        let len = value.len();
        let mut shrinks = Vec::new();

        if len > self.min_length {
            if self.min_length == 0 {
                shrinks.push(Vec::new());
            }
            let half = len / 2;
            if half >= self.min_length && half > 0 {
                shrinks.push(value[..half].to_vec());
                shrinks.push(value[len - half..].to_vec());
            }
            for skip in 0..len {
                let mut next = value.clone();
                next.remove(skip);
                shrinks.push(next);
            }
        }

        for (i, element) in value.iter().enumerate() {
            for simpler in self
                .element_generator
                .shrink(element)
                .take(ELEMENT_SHRINK_WIDTH)
            {
                let mut next = value.clone();
                next[i] = simpler;
                shrinks.push(next);
            }
        }

        Box::new(shrinks.into_iter())
    }
}

/// Generator for `Option<T>`; `None` is the simplest value
#[derive(Debug)]
pub struct OptionGenerator<T, G> {
    inner: G,
    some_probability: f64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, G: Clone> Clone for OptionGenerator<T, G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            some_probability: self.some_probability,
            _phantom: PhantomData,
        }
    }
}

impl<T, G: Generator<T>> OptionGenerator<T, G> {
    /// Produce `Some` three times out of four
    pub fn new(inner: G) -> Self {
        Self::with_probability(inner, 0.75)
    }

    /// Produce `Some` with the given probability
    pub fn with_probability(inner: G, some_probability: f64) -> Self {
        Self {
            inner,
            some_probability: some_probability.clamp(0.0, 1.0),
            _phantom: PhantomData,
        }
    }
}

impl<T, G> Generator<Option<T>> for OptionGenerator<T, G>
where
    G: Generator<T>,
    T: 'static,
{
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> Option<T> {
        if rng.gen_bool(self.some_probability) {
            Some(self.inner.generate(rng, config))
        } else {
            None
        }
    }

    fn shrink(&self, value: &Option<T>) -> Box<dyn Iterator<Item = Option<T>>> {
        match value {
            None => Box::new(std::iter::empty()),
            Some(inner) => Box::new(std::iter::once(None).chain(self.inner.shrink(inner).map(Some))),
        }
    }
}

macro_rules! impl_tuple_generator {
    ($name:ident; $(($t:ident, $g:ident, $arg:ident, $idx:tt)),+) => {
        /// Generator for a tuple of independently generated components.
        ///
        /// Shrinking reduces one component at a time, leftmost first.
        #[derive(Debug, Clone)]
        pub struct $name<$($g),+>($($g),+);

        impl<$($g),+> $name<$($g),+> {
            /// Combine one generator per component
            pub fn new($($arg: $g),+) -> Self {
                Self($($arg),+)
            }
        }

        impl<$($t,)+ $($g),+> Generator<($($t,)+)> for $name<$($g),+>
        where
            $($t: Clone + 'static, $g: Generator<$t>,)+
        {
            fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> ($($t,)+) {
                ($(self.$idx.generate(rng, config),)+)
            }

            fn shrink(&self, value: &($($t,)+)) -> Box<dyn Iterator<Item = ($($t,)+)>> {
                let mut shrinks = Vec::new();
                $(
                    for simpler in self.$idx.shrink(&value.$idx) {
                        let mut next = value.clone();
                        next.$idx = simpler;
                        shrinks.push(next);
                    }
                )+
                Box::new(shrinks.into_iter())
            }
        }
    };
}

impl_tuple_generator!(Tuple1Generator; (A, GA, a, 0));
impl_tuple_generator!(Tuple2Generator; (A, GA, a, 0), (B, GB, b, 1));
impl_tuple_generator!(Tuple3Generator; (A, GA, a, 0), (B, GB, b, 1), (C, GC, c, 2));
impl_tuple_generator!(
    Tuple4Generator;
    (A, GA, a, 0),
    (B, GB, b, 1),
    (C, GC, c, 2),
    (D, GD, d, 3)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropertyError;
    use crate::shrink::ShrinkEngine;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::thread_rng;

    #[test]
    fn test_bool_generator() {
        let generator = BoolGenerator;

        let shrinks_true: Vec<_> = generator.shrink(&true).collect();
        assert_eq!(shrinks_true, vec![false]);

        let shrinks_false: Vec<_> = generator.shrink(&false).collect();
        assert!(shrinks_false.is_empty());
    }

    #[test]
    fn test_int_generator_stays_in_range() {
        let generator = IntGenerator::new(1, 10);
        let mut rng = thread_rng();
        let config = GeneratorConfig::default();

        for _ in 0..200 {
            let value = generator.generate(&mut rng, &config);
            assert!((1..=10).contains(&value));
        }

        let shrinks: Vec<_> = generator.shrink(&5).collect();
        assert_eq!(shrinks, vec![1, 3, 4]);
    }

    #[test]
    fn test_int_generator_hits_boundaries() {
        let generator = IntGenerator::<i32>::full_range();
        let mut rng = StdRng::seed_from_u64(11);
        let config = GeneratorConfig::default();

        let values: Vec<i32> = (0..2000)
            .map(|_| generator.generate(&mut rng, &config))
            .collect();
        for edge in [i32::MIN, i32::MAX, 0, 1, -1] {
            assert!(values.contains(&edge), "never generated {edge}");
        }
    }

    #[test]
    fn test_int_shrink_moves_towards_zero() {
        let generator = IntGenerator::<i32>::full_range();

        let shrinks: Vec<_> = generator.shrink(&-100).collect();
        assert_eq!(shrinks.first(), Some(&0));
        assert!(shrinks.iter().all(|&x| (-100 < x) && x <= 0));

        let shrinks: Vec<_> = generator.shrink(&i32::MIN).collect();
        assert_eq!(shrinks.first(), Some(&0));
        assert_eq!(shrinks.last(), Some(&(i32::MIN + 1)));

        assert_eq!(generator.shrink(&0).count(), 0);

        let negative_only = IntGenerator::new(-50, -10);
        let shrinks: Vec<_> = negative_only.shrink(&-40).collect();
        assert_eq!(shrinks.first(), Some(&-10));
    }

    #[test]
    fn test_float_generator() {
        let generator = FloatGenerator::new(0.0, 1.0);
        let mut rng = thread_rng();
        let config = GeneratorConfig::default();

        for _ in 0..20 {
            let value = generator.generate(&mut rng, &config);
            assert!((0.0..=1.0).contains(&value));
        }

        let shrinks: Vec<_> = generator.shrink(&0.5).collect();
        assert_eq!(shrinks, vec![0.0, 0.25]);
        assert_eq!(generator.shrink(&f64::NAN).count(), 0);
    }

    #[test]
    fn test_float_generator_swaps_reversed_bounds() {
        let generator = FloatGenerator::new(5.0_f32, -5.0);
        let mut rng = StdRng::seed_from_u64(8);
        let config = GeneratorConfig::default();

        for _ in 0..50 {
            let value = generator.generate(&mut rng, &config);
            assert!((-5.0..=5.0).contains(&value));
        }
    }

    #[test]
    fn test_text_chars_include_non_ascii() {
        let generator = CharGenerator::text();
        let mut rng = StdRng::seed_from_u64(3);
        let config = GeneratorConfig::default();

        let chars: Vec<char> = (0..500)
            .map(|_| generator.generate(&mut rng, &config))
            .collect();
        assert!(chars.iter().any(|c| c.is_ascii()));
        assert!(chars.iter().any(|c| !c.is_ascii()));
        assert!(chars.iter().all(|c| !c.is_control()));
    }

    #[test]
    fn test_string_generator_respects_size_hint() {
        let generator = StringGenerator::ascii_alphanumeric(0, 100);
        let mut rng = thread_rng();
        let config = GeneratorConfig::with_size(5);

        for _ in 0..50 {
            let value = generator.generate(&mut rng, &config);
            assert!(value.chars().count() <= 5);
            assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
        }

        let shrinks: Vec<_> = generator.shrink(&"hello".to_string()).collect();
        assert_eq!(shrinks.first().map(String::as_str), Some(""));
        assert!(shrinks.contains(&"he".to_string()));
        assert!(shrinks.contains(&"ello".to_string()));
        assert!(shrinks.contains(&"aello".to_string()));
    }

    #[test]
    fn test_char_shrinks_only_to_simpler_chars() {
        let generator = CharGenerator::text();
        assert_eq!(generator.shrink(&'a').count(), 0);
        assert_eq!(generator.shrink(&'0').collect::<Vec<_>>(), vec!['a']);
        assert_eq!(generator.shrink(&' ').collect::<Vec<_>>(), vec!['a', '0']);
        assert_eq!(generator.shrink(&'Ã').collect::<Vec<_>>(), vec!['a', '0', ' ']);

        let digits = CharGenerator::with_ranges(vec![('0', '9')]);
        assert_eq!(digits.shrink(&'0').count(), 0);
        assert_eq!(digits.shrink(&'7').collect::<Vec<_>>(), vec!['0']);
    }

    #[test]
    fn test_string_shrinking_reaches_a_fixpoint() {
        let generator = StringGenerator::text(0, 16);
        let result = ShrinkEngine::default().minimize(
            "Ã0 b".to_string(),
            PropertyError::falsified("not empty"),
            |value: &String| generator.shrink(value),
            |candidate: &String| {
                (!candidate.is_empty()).then(|| PropertyError::falsified("not empty"))
            },
        );

        assert!(result.completed);
        assert_eq!(result.minimal, "a");
        assert!(result.steps <= 4, "took {} steps", result.steps);
    }

    #[test]
    fn test_string_generator_produces_empty_strings() {
        let generator = StringGenerator::text(0, 32);
        let mut rng = StdRng::seed_from_u64(5);
        let config = GeneratorConfig::with_size(32);

        let empties = (0..500)
            .filter(|_| generator.generate(&mut rng, &config).is_empty())
            .count();
        assert!(empties >= 25, "only {empties} empty strings");
    }

    #[test]
    fn test_vec_generator() {
        let generator = VecGenerator::new(IntGenerator::new(1, 100), 1, 5);
        let mut rng = thread_rng();
        let config = GeneratorConfig::default();

        for _ in 0..20 {
            let value = generator.generate(&mut rng, &config);
            assert!(!value.is_empty() && value.len() <= 5);
            assert!(value.iter().all(|&x| (1..=100).contains(&x)));
        }

        let shrinks: Vec<_> = generator.shrink(&vec![7, 2, 9]).collect();
        assert!(shrinks.iter().all(|v| !v.is_empty()));
        assert_eq!(shrinks[0], vec![7]);
        assert!(shrinks.contains(&vec![2, 9]));
        assert!(shrinks.contains(&vec![1, 2, 9]));
    }

    #[test]
    fn test_vec_generator_produces_empty_vectors() {
        let generator = VecGenerator::new(StringGenerator::text(0, 8), 0, 16);
        let mut rng = StdRng::seed_from_u64(9);
        let config = GeneratorConfig::with_size(16);

        let values: Vec<Vec<String>> = (0..300)
            .map(|_| generator.generate(&mut rng, &config))
            .collect();
        assert!(values.iter().any(Vec::is_empty));
        assert!(values.iter().any(|v| v.len() > 1));

        let shrinks: Vec<_> = generator
            .shrink(&vec!["b".to_string(), "c".to_string()])
            .collect();
        assert_eq!(shrinks[0], Vec::<String>::new());
    }

    #[test]
    fn test_option_generator_shrinks_to_none_first() {
        let generator = OptionGenerator::new(IntGenerator::new(0, 10));
        let shrinks: Vec<_> = generator.shrink(&Some(8)).collect();
        assert_eq!(shrinks[0], None);
        assert_eq!(shrinks[1], Some(0));
        assert_eq!(generator.shrink(&None).count(), 0);
    }

    #[test]
    fn test_tuple_generator_shrinks_one_component_at_a_time() {
        let generator = Tuple2Generator::new(BoolGenerator, IntGenerator::new(0, 10));
        let mut rng = thread_rng();
        let (_flag, number) = generator.generate(&mut rng, &GeneratorConfig::default());
        assert!((0..=10).contains(&number));

        let shrinks: Vec<_> = generator.shrink(&(true, 4)).collect();
        assert_eq!(shrinks, vec![(false, 4), (true, 0), (true, 2), (true, 3)]);
    }
}

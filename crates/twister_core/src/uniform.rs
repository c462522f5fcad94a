//! Uniform real generator over `[lower, upper)`.

use crate::integer::IntegerRng;

/// `1 / (2^53 - 1)`: scales the top 53 bits of a word onto `[0, 1]`.
const INV_2POW53_MINUS_1: f64 = 1.0 / ((1u64 << 53) - 1) as f64;

/// Uniformly distributed reals built on an owned [`IntegerRng`].
///
/// Each draw consumes exactly one 64-bit word. Bounds are not validated: with
/// `lower > upper` the range is simply mirrored.
///
/// # Examples
///
/// ```rust
/// use twister_core::UniformRng;
///
/// let mut rng = UniformRng::new(42, 2.0, 5.0);
/// let value = rng.next_uniform();
/// assert!(value >= 2.0 && value <= 5.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UniformRng {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) integer: IntegerRng,
}

impl UniformRng {
    /// Creates a uniform generator on `[lower, upper)` seeded with `seed`.
    pub fn new(seed: i32, lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            integer: IntegerRng::new(seed),
        }
    }

    /// Lower bound of the range.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the range.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The underlying integer stream.
    #[inline]
    pub fn integer(&self) -> &IntegerRng {
        &self.integer
    }

    /// Draws the next uniform value.
    ///
    /// The top 53 bits of the next word are scaled onto `[0, 1]` and then
    /// mapped linearly onto the configured range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twister_core::UniformRng;
    ///
    /// let mut rng = UniformRng::new(42, 0.0, 1.0);
    /// assert_eq!(rng.next_uniform(), 0.75515553295453919);
    /// ```
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        let raw = self.integer.next_word();
        let fraction = INV_2POW53_MINUS_1 * (raw >> 11) as f64;
        fraction * (self.upper - self.lower) + self.lower
    }

    /// Fills the buffer with uniform values from the configured range.
    ///
    /// Empty buffers are left untouched and consume no draws.
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_uniform();
        }
    }
}

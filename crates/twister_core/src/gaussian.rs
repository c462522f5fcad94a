//! Gaussian generator using the Box-Muller transform.
//!
//! Each Box-Muller pass turns two uniform draws into two independent standard
//! normal values. The first is returned immediately; the second is cached and
//! returned by the following call without touching the uniform stream.

use std::f64::consts::TAU;

use crate::uniform::UniformRng;

/// Normally distributed reals with a given mean and standard deviation.
///
/// Owns a [`UniformRng`] on `[0, 1)`. The parameters are not validated; a
/// zero or negative `stddev` is applied as given.
///
/// # Examples
///
/// ```rust
/// use twister_core::GaussianRng;
///
/// let mut rng = GaussianRng::new(42, 10.0, 2.0);
/// let first = rng.next_gaussian();  // computes a fresh pair
/// let second = rng.next_gaussian(); // returns the cached partner
/// assert!(first.is_finite() && second.is_finite());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianRng {
    pub(crate) mean: f64,
    pub(crate) stddev: f64,
    /// Standard normal value returned by the last fresh pass.
    pub(crate) z1: f64,
    /// Cached partner of `z1`.
    pub(crate) z2: f64,
    /// Set while `z2` has not been handed out yet.
    pub(crate) has_cached: bool,
    pub(crate) uniform: UniformRng,
}

impl GaussianRng {
    /// Creates a Gaussian generator seeded with `seed`.
    pub fn new(seed: i32, mean: f64, stddev: f64) -> Self {
        Self {
            mean,
            stddev,
            z1: 0.0,
            z2: 0.0,
            has_cached: false,
            uniform: UniformRng::new(seed, 0.0, 1.0),
        }
    }

    /// Mean of the distribution.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the distribution.
    #[inline]
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Whether the next draw will be served from the cache.
    #[inline]
    pub fn has_cached(&self) -> bool {
        self.has_cached
    }

    /// The underlying uniform stream.
    #[inline]
    pub fn uniform(&self) -> &UniformRng {
        &self.uniform
    }

    /// Draws the next normally distributed value.
    ///
    /// Odd calls run a Box-Muller pass (two or more uniform draws, redrawing
    /// both while `u1 <= f64::EPSILON` so the logarithm stays finite). Even
    /// calls return the cached partner and consume nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twister_core::GaussianRng;
    ///
    /// let mut rng = GaussianRng::new(42, 0.0, 1.0);
    /// rng.next_gaussian();
    /// assert!(rng.has_cached());
    ///
    /// let after_fresh = rng.uniform().integer().index();
    /// rng.next_gaussian();
    /// assert_eq!(rng.uniform().integer().index(), after_fresh);
    /// ```
    pub fn next_gaussian(&mut self) -> f64 {
        if self.has_cached {
            self.has_cached = false;
            return self.z2 * self.stddev + self.mean;
        }

        let mut u1 = self.uniform.next_uniform();
        let mut u2 = self.uniform.next_uniform();
        while u1 <= f64::EPSILON {
            u1 = self.uniform.next_uniform();
            u2 = self.uniform.next_uniform();
        }

        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        self.z1 = radius * theta.cos();
        self.z2 = radius * theta.sin();
        self.has_cached = true;

        self.z1 * self.stddev + self.mean
    }

    /// Fills the buffer with Gaussian values.
    ///
    /// Equivalent to calling [`next_gaussian`](Self::next_gaussian) once per
    /// element, so the cache carries over between calls.
    pub fn fill_gaussian(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_gaussian();
        }
    }
}

//! Kind-erased wrapper over the three generator layers

use clap::ValueEnum;
use serde::Serialize;
use twister_core::{GaussianRng, IntegerRng, StateResult, UniformRng};

use crate::config::TwisterConfig;

/// Which values a command draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Full 64-bit integers
    Int64,
    /// High 32 bits of each 64-bit draw
    Int32,
    /// Reals on [lower, upper)
    Uniform,
    /// Normal variates with mean and stddev
    Gaussian,
}

/// Fully resolved generator parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParams {
    pub seed: i32,
    pub lower: f64,
    pub upper: f64,
    pub mean: f64,
    pub stddev: f64,
}

impl GeneratorParams {
    /// Parameters taken from configuration defaults
    pub fn from_config(config: &TwisterConfig) -> Self {
        Self {
            seed: config.seed,
            lower: config.lower,
            upper: config.upper,
            mean: config.mean,
            stddev: config.stddev,
        }
    }

    /// Same parameters with a different seed
    pub fn with_seed(self, seed: i32) -> Self {
        Self { seed, ..self }
    }
}

/// A single drawn value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sample {
    Int(i64),
    Real(f64),
}

impl Sample {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Sample::Int(v) => v as f64,
            Sample::Real(v) => v,
        }
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sample::Int(v) => write!(f, "{}", v),
            Sample::Real(v) => write!(f, "{}", v),
        }
    }
}

/// One generator of the requested kind
#[derive(Debug, Clone, PartialEq)]
pub enum Stream {
    Integer { rng: IntegerRng, wide: bool },
    Uniform(UniformRng),
    Gaussian(GaussianRng),
}

impl Stream {
    /// Seed a fresh generator
    pub fn new(kind: Kind, params: &GeneratorParams) -> Self {
        match kind {
            Kind::Int64 | Kind::Int32 => Stream::Integer {
                rng: IntegerRng::new(params.seed),
                wide: kind == Kind::Int64,
            },
            Kind::Uniform => Stream::Uniform(UniformRng::new(params.seed, params.lower, params.upper)),
            Kind::Gaussian => {
                Stream::Gaussian(GaussianRng::new(params.seed, params.mean, params.stddev))
            }
        }
    }

    /// Decode a checkpoint of the layer that `kind` uses
    pub fn from_state_str(kind: Kind, text: &str) -> StateResult<Self> {
        Ok(match kind {
            Kind::Int64 | Kind::Int32 => Stream::Integer {
                rng: IntegerRng::from_state_str(text)?,
                wide: kind == Kind::Int64,
            },
            Kind::Uniform => Stream::Uniform(UniformRng::from_state_str(text)?),
            Kind::Gaussian => Stream::Gaussian(GaussianRng::from_state_str(text)?),
        })
    }

    /// Draw the next value
    pub fn draw(&mut self) -> Sample {
        match self {
            Stream::Integer { rng, wide: true } => Sample::Int(rng.next_i64()),
            Stream::Integer { rng, wide: false } => Sample::Int(i64::from(rng.next_i32())),
            Stream::Uniform(rng) => Sample::Real(rng.next_uniform()),
            Stream::Gaussian(rng) => Sample::Real(rng.next_gaussian()),
        }
    }

    /// Draw `count` values
    pub fn draw_many(&mut self, count: usize) -> Vec<Sample> {
        (0..count).map(|_| self.draw()).collect()
    }

    /// Checkpoint text of the current position
    pub fn to_state_string(&self) -> String {
        match self {
            Stream::Integer { rng, .. } => rng.to_state_string(),
            Stream::Uniform(rng) => rng.to_state_string(),
            Stream::Gaussian(rng) => rng.to_state_string(),
        }
    }
}

//! Check command implementation
//!
//! Self-test: pinned golden vectors and checkpoint round trips for each layer.

use tracing::info;
use twister_core::{GaussianRng, IntegerRng, UniformRng};

use crate::{CliError, Result};

/// First `next_i64` of a stream seeded with 42
const GOLDEN_SEED_42: i64 = -4516583221451431210;

/// 313th draw, the first after a refill
const GOLDEN_SEED_42_DRAW_313: i64 = -1822751843105593046;

/// Run the check command
pub fn run() -> Result<()> {
    info!("Running self-check...");

    check_golden()?;
    info!("  Golden vectors: OK");

    check_round_trips()?;
    info!("  Checkpoint round trips: OK");

    println!("All checks passed");
    Ok(())
}

fn check_golden() -> Result<()> {
    let mut rng = IntegerRng::new(42);
    let first = rng.next_i64();
    if first != GOLDEN_SEED_42 {
        return Err(CliError::CheckFailed(format!(
            "seed 42 first draw: expected {}, got {}",
            GOLDEN_SEED_42, first
        )));
    }

    for _ in 1..312 {
        rng.next_i64();
    }
    let after_refill = rng.next_i64();
    if after_refill != GOLDEN_SEED_42_DRAW_313 {
        return Err(CliError::CheckFailed(format!(
            "seed 42 draw 313: expected {}, got {}",
            GOLDEN_SEED_42_DRAW_313, after_refill
        )));
    }

    Ok(())
}

fn check_round_trips() -> Result<()> {
    let state_error = |layer: &str, e| CliError::CheckFailed(format!("{} decode: {}", layer, e));

    let mut gauss = GaussianRng::new(42, 0.0, 1.0);
    gauss.next_gaussian();
    let mut restored = GaussianRng::from_state_str(&gauss.to_state_string())
        .map_err(|e| state_error("gaussian", e))?;
    let mut uniform = UniformRng::new(42, -1.0, 1.0);
    let mut restored_uniform = UniformRng::from_state_str(&uniform.to_state_string())
        .map_err(|e| state_error("uniform", e))?;

    for i in 0..1000 {
        if restored.next_gaussian().to_bits() != gauss.next_gaussian().to_bits() {
            return Err(CliError::CheckFailed(format!(
                "gaussian stream diverged after restore at draw {}",
                i
            )));
        }
        if restored_uniform.next_uniform().to_bits() != uniform.next_uniform().to_bits() {
            return Err(CliError::CheckFailed(format!(
                "uniform stream diverged after restore at draw {}",
                i
            )));
        }
    }

    Ok(())
}

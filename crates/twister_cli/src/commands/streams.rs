//! Streams command implementation
//!
//! Runs independently seeded generators on the rayon pool. Each worker owns
//! its generator outright, so no locking is involved.

use rayon::prelude::*;
use tracing::info;

use crate::stream::{GeneratorParams, Kind, Stream};
use crate::{CliError, Result};

/// Summary statistics of one stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
    pub seed: i32,
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

/// Run the streams command
pub fn run(kind: Kind, params: &GeneratorParams, streams: usize, count: usize) -> Result<()> {
    if streams == 0 {
        return Err(CliError::InvalidArgument(
            "At least one stream is required".to_string(),
        ));
    }

    info!(streams, count, base_seed = params.seed, ?kind, "Running independent streams");
    let summaries = run_streams(kind, params, streams, count);

    println!(
        "{:>12} {:>10} {:>16} {:>16} {:>16} {:>16}",
        "seed", "count", "mean", "stddev", "min", "max"
    );
    for s in &summaries {
        println!(
            "{:>12} {:>10} {:>16.6e} {:>16.6e} {:>16.6e} {:>16.6e}",
            s.seed, s.count, s.mean, s.stddev, s.min, s.max
        );
    }

    info!("Streams complete");
    Ok(())
}

/// Draw `count` values from each of `streams` generators seeded `seed + i`
pub fn run_streams(
    kind: Kind,
    params: &GeneratorParams,
    streams: usize,
    count: usize,
) -> Vec<StreamSummary> {
    (0..streams)
        .into_par_iter()
        .map(|i| {
            let seed = params.seed.wrapping_add(i as i32);
            let mut stream = Stream::new(kind, &params.with_seed(seed));
            let values: Vec<f64> = stream.draw_many(count).iter().map(|s| s.as_f64()).collect();
            summarise(seed, &values)
        })
        .collect()
}

fn summarise(seed: i32, values: &[f64]) -> StreamSummary {
    let count = values.len();
    let n = count.max(1) as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;

    StreamSummary {
        seed,
        count,
        mean,
        stddev: variance.sqrt(),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TwisterConfig;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summarise() {
        let summary = summarise(3, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(summary.count, 4);
        assert_abs_diff_eq!(summary.mean, 2.5);
        assert_abs_diff_eq!(summary.stddev, 1.25f64.sqrt());
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_streams_are_seeded_consecutively() {
        let params = GeneratorParams::from_config(&TwisterConfig::default());
        let summaries = run_streams(Kind::Uniform, &params, 8, 100);

        let seeds: Vec<i32> = summaries.iter().map(|s| s.seed).collect();
        assert_eq!(seeds, (42..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let params = GeneratorParams::from_config(&TwisterConfig::default());
        let parallel = run_streams(Kind::Gaussian, &params, 6, 1000);

        for summary in &parallel {
            let mut stream = Stream::new(Kind::Gaussian, &params.with_seed(summary.seed));
            let values: Vec<f64> = stream.draw_many(1000).iter().map(|s| s.as_f64()).collect();
            assert_eq!(summarise(summary.seed, &values), *summary);
        }
    }

    #[test]
    fn test_uniform_stream_means() {
        let params = GeneratorParams::from_config(&TwisterConfig::default());
        for summary in run_streams(Kind::Uniform, &params, 4, 50_000) {
            assert_abs_diff_eq!(summary.mean, 0.5, epsilon = 0.01);
            assert!(summary.min >= 0.0 && summary.max <= 1.0);
        }
    }

    #[test]
    fn test_zero_streams_rejected() {
        let params = GeneratorParams::from_config(&TwisterConfig::default());
        assert!(run(Kind::Int64, &params, 0, 10).is_err());
    }
}

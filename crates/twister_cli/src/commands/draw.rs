//! Draw command implementation
//!
//! Draws values from a freshly seeded or resumed stream and optionally
//! checkpoints the final position.

use std::path::Path;

use tracing::info;

use super::{load_checkpoint, save_checkpoint};
use crate::stream::{GeneratorParams, Kind, Sample, Stream};
use crate::{CliError, Result};

/// Run the draw command
pub fn run(
    kind: Kind,
    params: &GeneratorParams,
    count: usize,
    resume: Option<&Path>,
    checkpoint: Option<&Path>,
    format: &str,
) -> Result<()> {
    let mut stream = match resume {
        Some(path) => {
            info!(path = %path.display(), ?kind, "Resuming from checkpoint");
            load_checkpoint(kind, path)?
        }
        None => {
            info!(seed = params.seed, ?kind, "Seeding new stream");
            Stream::new(kind, params)
        }
    };

    let samples = stream.draw_many(count);
    println!("{}", render(&samples, format)?);

    if let Some(path) = checkpoint {
        save_checkpoint(&stream, path)?;
        info!(path = %path.display(), "Checkpoint written");
    }

    Ok(())
}

/// Format samples for output
pub fn render(samples: &[Sample], format: &str) -> Result<String> {
    match format {
        "plain" => Ok(samples
            .iter()
            .map(Sample::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        "json" => Ok(serde_json::to_string(samples)?),
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: plain, json",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TwisterConfig;

    #[test]
    fn test_render_plain() {
        let samples = [Sample::Int(1), Sample::Real(2.5)];
        assert_eq!(render(&samples, "plain").unwrap(), "1\n2.5");
    }

    #[test]
    fn test_render_json() {
        let samples = [Sample::Real(-0.25)];
        assert_eq!(render(&samples, "json").unwrap(), "[-0.25]");
    }

    #[test]
    fn test_render_unknown_format() {
        assert!(matches!(
            render(&[], "xml"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_checkpoint_file_round_trip() {
        let params = GeneratorParams::from_config(&TwisterConfig::default());
        let path = std::env::temp_dir().join(format!(
            "twister-draw-{}-checkpoint.txt",
            std::process::id()
        ));

        let mut original = Stream::new(Kind::Gaussian, &params);
        original.draw_many(5);
        save_checkpoint(&original, &path).unwrap();

        let mut resumed = load_checkpoint(Kind::Gaussian, &path).unwrap();
        assert_eq!(resumed.draw_many(10), original.draw_many(10));

        let wrong = load_checkpoint(Kind::Uniform, &path);
        assert!(matches!(wrong, Err(CliError::State { .. })));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_checkpoint_file() {
        let result = load_checkpoint(Kind::Int64, Path::new("/nonexistent/twister.state"));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}

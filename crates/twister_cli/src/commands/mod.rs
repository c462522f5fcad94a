//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod draw;
pub mod state;
pub mod streams;

use std::path::Path;

use crate::stream::{Kind, Stream};
use crate::{CliError, Result};

/// Read a checkpoint file and decode it as `kind`
pub(crate) fn load_checkpoint(kind: Kind, path: &Path) -> Result<Stream> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Stream::from_state_str(kind, text.trim_end()).map_err(|source| CliError::State {
        path: path.display().to_string(),
        source,
    })
}

/// Write the stream's checkpoint text to `path`
pub(crate) fn save_checkpoint(stream: &Stream, path: &Path) -> Result<()> {
    let mut text = stream.to_state_string();
    text.push('\n');
    std::fs::write(path, text).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

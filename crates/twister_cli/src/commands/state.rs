//! State command implementation
//!
//! Prints the checkpoint text of a seeded stream after skipping some draws.

use tracing::info;

use crate::stream::{GeneratorParams, Kind, Stream};
use crate::Result;

/// Run the state command
pub fn run(kind: Kind, params: &GeneratorParams, skip: usize) -> Result<()> {
    info!(seed = params.seed, ?kind, skip, "Encoding stream state");
    println!("{}", encode_after(kind, params, skip));
    Ok(())
}

/// Checkpoint text of a fresh stream after `skip` draws
pub fn encode_after(kind: Kind, params: &GeneratorParams, skip: usize) -> String {
    let mut stream = Stream::new(kind, params);
    for _ in 0..skip {
        stream.draw();
    }
    stream.to_state_string()
}

//! The terminal belongs to the UI, so log records go to a file.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Appends records to `path`. `RUST_LOG` wins over the `debug` switch.
pub fn init(path: &Path, debug: bool) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if debug { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("device path must not be empty")]
    EmptyDevicePath,
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {}: {source}", path.display())]
    Device {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to signal remap process: {0}")]
    Signal(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

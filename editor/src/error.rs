use std::io;

use hexe_buffer::BufferError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("Not an editor command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No file name")]
    NoPath,

    #[error("No write since last change (add ! to override)")]
    Unsaved,

    #[error("Failed to read configuration: {0}")]
    Config(#[from] config::ConfigError),
}

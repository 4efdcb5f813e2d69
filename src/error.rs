// src/error.rs
use thiserror::Error;

/// Errors raised while loading, detecting, displaying or writing edge maps.
#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("{0} is an unsupported edge-detecting method!")]
    UnsupportedMethod(String),

    #[error("{operation} does not support {channels}-channel images")]
    UnsupportedChannels {
        operation: &'static str,
        channels: i32,
    },

    #[error("image is empty")]
    EmptyImage,

    #[error("cannot derive an output name from {0:?}: no file extension")]
    MissingExtension(String),

    #[error("failed to read image: {path}")]
    Read { path: String },

    #[error("failed to write image: {path}")]
    Write { path: String },

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, EdgeError>;

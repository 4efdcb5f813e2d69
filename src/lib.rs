// src/lib.rs

pub mod error;
pub mod image_processing;
mod macros;
pub mod output;

pub use error::{EdgeError, Result};
pub use image_processing::{detect_edges, EdgeMap, EdgeMethod};

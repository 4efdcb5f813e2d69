// src/image_processing/io.rs
use std::path::Path;

use log::{error, info};
use opencv::core::{Mat, Vector};
use opencv::imgcodecs::{imread, imwrite, IMREAD_UNCHANGED};
use opencv::prelude::*;

use super::EdgeMap;
use crate::error::{EdgeError, Result};

// Extensions whose OpenCV writers accept 32-bit float data.
const FLOAT_EXTENSIONS: [&str; 4] = ["tif", "tiff", "exr", "pfm"];

/// Reads an image as stored on disk: no colour conversion, original depth.
pub fn load_image(path: &str) -> Result<Mat> {
    if !Path::new(path).exists() {
        return Err(EdgeError::Read { path: path.to_string() });
    }

    let image = imread(path, IMREAD_UNCHANGED)?;
    if image.empty() {
        return Err(EdgeError::Read { path: path.to_string() });
    }

    info!(
        "Loaded {}: {}x{} with {} channel(s)",
        path,
        image.cols(),
        image.rows(),
        image.channels()
    );
    Ok(image)
}

fn stores_float(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FLOAT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Writes the edge map in the format implied by the extension of `path`.
///
/// Masks are written as 0/255 8-bit images. Magnitudes keep their float values for
/// TIFF, EXR and PFM and are scaled to 8 bits for every other format.
pub fn write_edge_map(path: &str, edges: &EdgeMap) -> Result<()> {
    let converted;
    let image = match edges {
        EdgeMap::Magnitude(_) if !stores_float(path) => {
            converted = edges.to_u8()?;
            &converted
        }
        _ => edges.mat(),
    };

    info!("Saving edge map to: {}", path);
    match imwrite(path, image, &Vector::new()) {
        Ok(true) => Ok(()),
        Ok(false) => {
            error!("OpenCV refused to write {:?}", path);
            Err(EdgeError::Write { path: path.to_string() })
        }
        Err(e) => {
            error!("Failed to write {:?}: {}", path, e);
            Err(EdgeError::Write { path: path.to_string() })
        }
    }
}

// src/output.rs
use log::info;

use crate::error::{EdgeError, Result};

const EDGES_SUFFIX: &str = "_edges";

/// Picks the path the edge map is written to.
///
/// An explicit, non-empty `output` is used verbatim. Otherwise the name is derived from
/// `input` by inserting `_edges` before the *first* `.`, so `photo.png` becomes
/// `photo_edges.png`.
///
/// Splitting happens at the first dot of the whole path: `archive.tar.gz` becomes
/// `archive_edges.tar.gz` and a dotted directory such as `./photo.png` yields
/// `_edges./photo.png`. Pass an explicit output for such paths. An input without any dot
/// is rejected with [`EdgeError::MissingExtension`].
pub fn resolve_output_path(input: &str, output: Option<&str>) -> Result<String> {
    if let Some(output) = output.filter(|o| !o.is_empty()) {
        return Ok(output.to_string());
    }

    let (stem, extension) = input
        .split_once('.')
        .ok_or_else(|| EdgeError::MissingExtension(input.to_string()))?;

    let derived = format!("{stem}{EDGES_SUFFIX}.{extension}");
    info!("No output file given, saving edges to: {}", derived);
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_name_when_output_missing() -> Result<()> {
        assert_eq!(resolve_output_path("photo.png", None)?, "photo_edges.png");
        Ok(())
    }

    #[test]
    fn test_empty_output_is_treated_as_missing() -> Result<()> {
        assert_eq!(resolve_output_path("photo.png", Some(""))?, "photo_edges.png");
        Ok(())
    }

    #[test]
    fn test_explicit_output_is_verbatim() -> Result<()> {
        assert_eq!(resolve_output_path("photo.png", Some("out.jpg"))?, "out.jpg");
        assert_eq!(resolve_output_path("photo", Some("no_ext"))?, "no_ext");
        Ok(())
    }

    #[test]
    fn test_splits_on_first_dot() -> Result<()> {
        assert_eq!(
            resolve_output_path("archive.tar.gz", None)?,
            "archive_edges.tar.gz"
        );
        assert_eq!(
            resolve_output_path("images.v2/cells.tif", None)?,
            "images_edges.v2/cells.tif"
        );
        Ok(())
    }

    #[test]
    fn test_no_extension_is_an_error() {
        let err = resolve_output_path("test_images/DAPI", None).unwrap_err();
        assert!(matches!(err, EdgeError::MissingExtension(ref p) if p == "test_images/DAPI"));
    }
}

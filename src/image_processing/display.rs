// src/image_processing/display.rs
use log::info;
use opencv::core::{self, Mat, CV_16U, CV_32F, CV_64F, CV_8U, NORM_MINMAX};
use opencv::highgui;
use opencv::imgproc::{cvt_color_def, COLOR_BGRA2BGR, COLOR_GRAY2BGR};
use opencv::prelude::*;

use super::EdgeMap;
use crate::error::{EdgeError, Result};

const WINDOW_NAME: &str = "Original | Edges";
// Poll interval while waiting for the window to close.
const WAIT_MS: i32 = 100;

/// Renders any image as 8-bit BGR for display.
///
/// Single-channel images are stretched min-max onto the full gray range; colour images
/// keep their colours, with 16-bit and float depths rescaled to 8 bits.
pub fn render_panel(image: &Mat) -> Result<Mat> {
    let mut panel = Mat::default();
    match image.channels() {
        1 => {
            let mut gray = Mat::default();
            core::normalize(image, &mut gray, 0.0, 255.0, NORM_MINMAX, CV_8U, &core::no_array())?;
            cvt_color_def(&gray, &mut panel, COLOR_GRAY2BGR)?;
        }
        3 => panel = to_display_depth(image)?,
        4 => cvt_color_def(&to_display_depth(image)?, &mut panel, COLOR_BGRA2BGR)?,
        channels => {
            return Err(EdgeError::UnsupportedChannels {
                operation: "display",
                channels,
            })
        }
    }
    Ok(panel)
}

fn to_display_depth(image: &Mat) -> Result<Mat> {
    let scale = match image.depth() {
        CV_16U => 1.0 / 257.0,
        CV_32F | CV_64F => 255.0,
        _ => 1.0,
    };
    let mut converted = Mat::default();
    image.convert_to(&mut converted, CV_8U, scale, 0.0)?;
    Ok(converted)
}

/// Original on the left, edges on the right, as one 8-bit BGR frame.
pub fn render_side_by_side(original: &Mat, edges: &EdgeMap) -> Result<Mat> {
    let mut frame = Mat::default();
    core::hconcat2(&render_panel(original)?, &render_panel(edges.mat())?, &mut frame)?;
    Ok(frame)
}

/// Shows the original and the edges side by side and blocks until the window is
/// closed.
///
/// Pressing any key while the window has focus is a shortcut that closes it early.
pub fn show_side_by_side(original: &Mat, edges: &EdgeMap) -> Result<()> {
    let frame = render_side_by_side(original, edges)?;

    highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;
    highgui::imshow(WINDOW_NAME, &frame)?;
    info!("Close the window or press any key to continue");

    loop {
        if highgui::wait_key(WAIT_MS)? >= 0 {
            break;
        }
        if highgui::get_window_property(WINDOW_NAME, highgui::WND_PROP_VISIBLE)? < 1.0 {
            break;
        }
    }

    highgui::destroy_all_windows()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, Vec3b, CV_32FC1, CV_8UC1, CV_8UC2, CV_8UC4};

    #[test]
    fn test_gray_panel_is_stretched() -> Result<()> {
        let mut image = Mat::new_rows_cols_with_default(2, 2, CV_32FC1, Scalar::all(0.2))?;
        *image.at_2d_mut::<f32>(1, 1)? = 0.4;
        let panel = render_panel(&image)?;

        assert_eq!(panel.channels(), 3);
        assert_eq!(*panel.at_2d::<Vec3b>(0, 0)?, Vec3b::from([0, 0, 0]));
        assert_eq!(*panel.at_2d::<Vec3b>(1, 1)?, Vec3b::from([255, 255, 255]));
        Ok(())
    }

    #[test]
    fn test_bgra_panel_drops_alpha() -> Result<()> {
        let image = Mat::new_rows_cols_with_default(3, 3, CV_8UC4, Scalar::new(10.0, 20.0, 30.0, 255.0))?;
        let panel = render_panel(&image)?;
        assert_eq!(*panel.at_2d::<Vec3b>(2, 2)?, Vec3b::from([10, 20, 30]));
        Ok(())
    }

    #[test]
    fn test_two_channel_panel_is_rejected() -> Result<()> {
        let image = Mat::new_rows_cols_with_default(3, 3, CV_8UC2, Scalar::all(0.0))?;
        assert!(matches!(
            render_panel(&image),
            Err(EdgeError::UnsupportedChannels { operation: "display", channels: 2 })
        ));
        Ok(())
    }

    #[test]
    fn test_side_by_side_doubles_width() -> Result<()> {
        let original = Mat::new_rows_cols_with_default(5, 7, CV_8UC1, Scalar::all(40.0))?;
        let edges = EdgeMap::Magnitude(Mat::new_rows_cols_with_default(5, 7, CV_32FC1, Scalar::all(0.0))?);
        let frame = render_side_by_side(&original, &edges)?;
        assert_eq!((frame.rows(), frame.cols()), (5, 14));
        Ok(())
    }
}

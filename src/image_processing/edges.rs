// src/image_processing/edges.rs
use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use opencv::core::{
    self, Mat, Point, Rect, Scalar, BORDER_CONSTANT, BORDER_REFLECT, CV_16S, CV_16U, CV_32F, CV_32FC1, CV_32S,
    CV_8S, CV_8U,
};
use opencv::imgproc;
use opencv::prelude::*;

use super::EdgeMap;
use crate::error::{EdgeError, Result};
use crate::time_it;

/// Gaussian smoothing applied before the canny gradients.
pub const CANNY_SIGMA: f64 = 7.0;
/// Hysteresis thresholds on the gradient magnitude of a [0, 1] image.
pub const CANNY_LOW_THRESHOLD: f64 = 0.1;
pub const CANNY_HIGH_THRESHOLD: f64 = 0.2;

// Kernel radius in sigmas.
const GAUSSIAN_TRUNCATE: f64 = 4.0;
// Canny runs on 16-bit derivatives. A 3x3 Sobel response is at most 4x the intensity
// range, so 4 * 8191 = 32764 still fits in i16 while keeping rounding far below the
// thresholds.
const CANNY_INTENSITY_SCALE: f64 = 8191.0;

const SOBEL_KERNEL: [[f32; 3]; 3] = [
    [0.25, 0.5, 0.25],
    [0.0, 0.0, 0.0],
    [-0.25, -0.5, -0.25],
];

const PREWITT_KERNEL: [[f32; 3]; 3] = [
    [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
    [0.0, 0.0, 0.0],
    [-1.0 / 3.0, -1.0 / 3.0, -1.0 / 3.0],
];

/// The supported edge-detecting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeMethod {
    Canny,
    Sobel,
    Prewitt,
}

impl EdgeMethod {
    pub const ALL: [EdgeMethod; 3] = [EdgeMethod::Canny, EdgeMethod::Sobel, EdgeMethod::Prewitt];

    pub fn name(&self) -> &'static str {
        match self {
            EdgeMethod::Canny => "canny",
            EdgeMethod::Sobel => "sobel",
            EdgeMethod::Prewitt => "prewitt",
        }
    }
}

impl fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EdgeMethod {
    type Err = EdgeError;

    fn from_str(s: &str) -> Result<Self> {
        EdgeMethod::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EdgeError::UnsupportedMethod(s.to_string()))
    }
}

/// Detects edges in `image` using `method`.
///
/// The image is first rescaled to floats: integer depths are divided by their maximum,
/// float images are used as-is. No resizing or colour conversion happens here.
///
/// * canny returns an [`EdgeMap::Mask`] and only accepts single-channel images. The
///   outermost ring of pixels is never marked as an edge.
/// * sobel and prewitt return an [`EdgeMap::Magnitude`] with one magnitude per channel.
///
/// The edge map always has the same rows and cols as `image`.
pub fn detect_edges(image: &Mat, method: EdgeMethod) -> Result<EdgeMap> {
    if image.empty() {
        return Err(EdgeError::EmptyImage);
    }

    info!(
        "Detecting edges with {} on {}x{} image ({} channel(s))",
        method,
        image.cols(),
        image.rows(),
        image.channels()
    );

    let float_image = to_float_image(image)?;
    let edges = time_it!(method.name(), {
        match method {
            EdgeMethod::Canny => EdgeMap::Mask(canny(&float_image)?),
            EdgeMethod::Sobel => EdgeMap::Magnitude(gradient_magnitude(&float_image, &SOBEL_KERNEL)?),
            EdgeMethod::Prewitt => EdgeMap::Magnitude(gradient_magnitude(&float_image, &PREWITT_KERNEL)?),
        }
    });

    let (min_val, max_val) = edges.value_range()?;
    info!("Edge map range: [{}, {}]", min_val, max_val);
    if (max_val - min_val).abs() < f64::EPSILON {
        warn!("Edge map is flat - no edges found with {}", method);
    }

    Ok(edges)
}

/// Converts any depth to CV_32F, integer images scaled into [0, 1].
pub fn to_float_image(image: &Mat) -> Result<Mat> {
    let scale = match image.depth() {
        CV_8U => 1.0 / u8::MAX as f64,
        CV_8S => 1.0 / i8::MAX as f64,
        CV_16U => 1.0 / u16::MAX as f64,
        CV_16S => 1.0 / i16::MAX as f64,
        CV_32S => 1.0 / i32::MAX as f64,
        _ => 1.0,
    };

    let mut float_image = Mat::default();
    image.convert_to(&mut float_image, CV_32F, scale, 0.0)?;
    Ok(float_image)
}

/// `sqrt((gh² + gv²) / 2)` where gh uses `kernel` and gv its transpose.
fn gradient_magnitude(image: &Mat, kernel: &[[f32; 3]; 3]) -> Result<Mat> {
    let kernel_h = Mat::from_slice_2d(&kernel[..])?;
    let mut kernel_v = Mat::default();
    core::transpose(&kernel_h, &mut kernel_v)?;

    let mut squares = Vec::with_capacity(2);
    for k in [&kernel_h, &kernel_v] {
        let mut gradient = Mat::default();
        imgproc::filter_2d(image, &mut gradient, -1, k, Point::new(-1, -1), 0.0, BORDER_REFLECT)?;
        let mut squared = Mat::default();
        core::multiply(&gradient, &gradient, &mut squared, 1.0, -1)?;
        squares.push(squared);
    }

    let mut mean_square = Mat::default();
    core::add_weighted(&squares[0], 0.5, &squares[1], 0.5, 0.0, &mut mean_square, -1)?;

    let mut magnitude = Mat::default();
    core::sqrt(&mean_square, &mut magnitude)?;
    Ok(magnitude)
}

/// Gaussian blur with zero padding, divided by the blurred all-ones mask so that the
/// image borders keep their brightness.
fn smooth(image: &Mat, sigma: f64) -> Result<Mat> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as i32;
    let kernel = imgproc::get_gaussian_kernel(2 * radius + 1, sigma, CV_32F)?;

    let blur = |src: &Mat| -> Result<Mat> {
        let mut dst = Mat::default();
        imgproc::sep_filter_2d(src, &mut dst, -1, &kernel, &kernel, Point::new(-1, -1), 0.0, BORDER_CONSTANT)?;
        Ok(dst)
    };

    let blurred = blur(image)?;
    let bleed_over = blur(&Mat::ones(image.rows(), image.cols(), CV_32FC1)?.to_mat()?)?;

    let mut smoothed = Mat::default();
    core::divide2(&blurred, &bleed_over, &mut smoothed, 1.0, -1)?;
    Ok(smoothed)
}

fn derivative(image: &Mat, dx: i32, dy: i32) -> Result<Mat> {
    let mut gradient = Mat::default();
    imgproc::sobel(image, &mut gradient, CV_32F, dx, dy, 3, 1.0, 0.0, BORDER_REFLECT)?;
    let mut gradient_i16 = Mat::default();
    gradient.convert_to(&mut gradient_i16, CV_16S, 1.0, 0.0)?;
    Ok(gradient_i16)
}

fn canny(image: &Mat) -> Result<Mat> {
    if image.channels() != 1 {
        return Err(EdgeError::UnsupportedChannels {
            operation: "canny",
            channels: image.channels(),
        });
    }

    let smoothed = smooth(image, CANNY_SIGMA)?;
    let mut scaled = Mat::default();
    smoothed.convert_to(&mut scaled, CV_32F, CANNY_INTENSITY_SCALE, 0.0)?;

    let dx = derivative(&scaled, 1, 0)?;
    let dy = derivative(&scaled, 0, 1)?;

    let mut edges = Mat::default();
    imgproc::canny_derivative(
        &dx,
        &dy,
        &mut edges,
        CANNY_LOW_THRESHOLD * CANNY_INTENSITY_SCALE,
        CANNY_HIGH_THRESHOLD * CANNY_INTENSITY_SCALE,
        true,
    )?;

    // The 1-pixel image border is never an edge.
    let (rows, cols) = (edges.rows(), edges.cols());
    imgproc::rectangle(
        &mut edges,
        Rect::new(0, 0, cols, rows),
        Scalar::all(0.0),
        1,
        imgproc::LINE_8,
        0,
    )?;
    Ok(edges)
}

// src/image_processing/edge_map.rs
use ndarray::{Array2, Array3};
use opencv::core::{self, Mat, Vector, CV_8U};
use opencv::prelude::*;

use super::conversions::{mat_to_ndarray_bool, mat_to_ndarray_f32};
use crate::error::Result;

/// The result of an edge detection, same rows and cols as the source image.
#[derive(Debug)]
pub enum EdgeMap {
    /// Binary edges (canny): CV_8UC1, every pixel 0 or 255.
    Mask(Mat),
    /// Gradient magnitude (sobel, prewitt): CV_32F, non-negative, one value per channel.
    Magnitude(Mat),
}

/// An [`EdgeMap`] copied out into ndarray form.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeArray {
    Mask(Array2<bool>),
    Magnitude(Array3<f32>),
}

impl EdgeMap {
    pub fn mat(&self) -> &Mat {
        match self {
            EdgeMap::Mask(mat) | EdgeMap::Magnitude(mat) => mat,
        }
    }

    pub fn is_mask(&self) -> bool {
        matches!(self, EdgeMap::Mask(_))
    }

    pub fn rows(&self) -> i32 {
        self.mat().rows()
    }

    pub fn cols(&self) -> i32 {
        self.mat().cols()
    }

    pub fn channels(&self) -> i32 {
        self.mat().channels()
    }

    /// (height, width)
    pub fn dims(&self) -> (usize, usize) {
        (self.rows() as usize, self.cols() as usize)
    }

    pub fn to_array(&self) -> Result<EdgeArray> {
        Ok(match self {
            EdgeMap::Mask(mat) => EdgeArray::Mask(mat_to_ndarray_bool(mat)?),
            EdgeMap::Magnitude(mat) => EdgeArray::Magnitude(mat_to_ndarray_f32(mat)?),
        })
    }

    /// 8-bit version for formats without float support. Magnitudes in [0, 1] map to
    /// [0, 255], anything above saturates.
    pub fn to_u8(&self) -> Result<Mat> {
        match self {
            EdgeMap::Mask(mat) => Ok(mat.try_clone()?),
            EdgeMap::Magnitude(mat) => {
                let mut converted = Mat::default();
                mat.convert_to(&mut converted, CV_8U, 255.0, 0.0)?;
                Ok(converted)
            }
        }
    }

    /// Smallest and largest value over all channels.
    pub fn value_range(&self) -> Result<(f64, f64)> {
        let mut channels = Vector::<Mat>::new();
        core::split(self.mat(), &mut channels)?;

        let mut range = (f64::INFINITY, f64::NEG_INFINITY);
        for channel in channels.iter() {
            let mut min_val = 0f64;
            let mut max_val = 0f64;
            core::min_max_loc(&channel, Some(&mut min_val), Some(&mut max_val), None, None, &core::no_array())?;
            range = (range.0.min(min_val), range.1.max(max_val));
        }
        Ok(range)
    }
}

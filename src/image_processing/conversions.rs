// src/image_processing/conversions.rs
use opencv::core::{Mat, CV_32F, CV_32FC1, CV_8U, CV_8UC1};
use opencv::prelude::*;
use ndarray::{Array2, Array3};

fn expect_type(mat: &Mat, depth: i32, channels: Option<i32>) -> opencv::Result<()> {
    let channels_ok = channels.map_or(true, |c| mat.channels() == c);
    if mat.depth() != depth || !channels_ok {
        return Err(opencv::Error::new(
            opencv::core::StsUnsupportedFormat,
            format!(
                "Unexpected Mat type: depth {} with {} channel(s)",
                mat.depth(),
                mat.channels()
            ),
        ));
    }
    Ok(())
}

/// Converts an ndarray Array2<u8> to an OpenCV Mat of type CV_8UC1.
pub fn ndarray_u8_to_mat(array: &Array2<u8>) -> opencv::Result<Mat> {
    let (rows, cols) = array.dim();

    let array_std = array.as_standard_layout();
    let data = array_std.as_slice().ok_or_else(|| {
        opencv::Error::new(opencv::core::StsError, "Failed to get data slice".to_string())
    })?;

    let mut mat = Mat::zeros(rows as i32, cols as i32, CV_8UC1)?.to_mat()?;
    mat.data_bytes_mut()?.copy_from_slice(data);

    Ok(mat)
}

/// Converts an ndarray Array2<f32> to an OpenCV Mat of type CV_32FC1.
pub fn ndarray_f32_to_mat(array: &Array2<f32>) -> opencv::Result<Mat> {
    let (rows, cols) = array.dim();

    let array_std = array.as_standard_layout();
    let data = array_std.as_slice().ok_or_else(|| {
        opencv::Error::new(opencv::core::StsError, "Failed to get data slice".to_string())
    })?;

    let mut mat = Mat::zeros(rows as i32, cols as i32, CV_32FC1)?.to_mat()?;
    mat.data_typed_mut::<f32>()?.copy_from_slice(data);

    Ok(mat)
}

/// Copies a single-channel 8-bit Mat into an Array2<u8>.
pub fn mat_to_ndarray_u8(mat: &Mat) -> opencv::Result<Array2<u8>> {
    expect_type(mat, CV_8U, Some(1))?;
    // try_clone always yields a continuous Mat, ROIs included
    let mat = mat.try_clone()?;

    let mut array = Array2::<u8>::zeros((mat.rows() as usize, mat.cols() as usize));
    let array_data = array.as_slice_mut().ok_or_else(|| {
        opencv::Error::new(opencv::core::StsError, "Failed to get data slice".to_string())
    })?;
    array_data.copy_from_slice(mat.data_bytes()?);

    Ok(array)
}

/// Reads a single-channel 8-bit Mat as a boolean mask (non-zero = true).
pub fn mat_to_ndarray_bool(mat: &Mat) -> opencv::Result<Array2<bool>> {
    Ok(mat_to_ndarray_u8(mat)?.mapv(|v| v != 0))
}

/// Copies a 32-bit float Mat with any channel count into an Array3<f32> of shape
/// (rows, cols, channels).
pub fn mat_to_ndarray_f32(mat: &Mat) -> opencv::Result<Array3<f32>> {
    expect_type(mat, CV_32F, None)?;
    let mat = mat.try_clone()?;
    let shape = (mat.rows() as usize, mat.cols() as usize, mat.channels() as usize);

    // Multi-channel mats cannot go through data_typed, so decode the raw bytes.
    let values: Vec<f32> = mat
        .data_bytes()?
        .chunks_exact(std::mem::size_of::<f32>())
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Array3::from_shape_vec(shape, values).map_err(|e| {
        opencv::Error::new(opencv::core::StsError, format!("Shape mismatch: {}", e))
    })
}

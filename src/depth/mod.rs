use crate::{Float,DepthFloat};
use crate::error::{Error, Result};
use crate::image::{DisparityMap, DepthMap};

pub mod transform;

/**
 * depth = f*B/d for d > 0. A zero disparity is an unknown pixel and maps to depth 0, not to infinity.
 */
pub fn disparity_to_depth_value(disparity: DepthFloat, focal_length: Float, baseline: Float) -> DepthFloat {
    match disparity {
        d if d > 0.0 => (focal_length * baseline / d as Float) as DepthFloat,
        _ => 0.0
    }
}

/**
 * Converts a disparity map to a depth map in the event camera frame.
 * Maps containing negative disparities are rejected as a whole.
 */
pub fn disparity_to_depth(disparity: &DisparityMap, focal_length: Float, baseline: Float) -> Result<DepthMap> {
    if disparity.has_negative_values() {
        return Err(Error::InvalidInput(format!("disparity map contains negative values (min {})", disparity.min())));
    }

    let buffer = disparity.buffer.map(|d| disparity_to_depth_value(d, focal_length, baseline));
    Ok(DepthMap::from_matrix(buffer))
}

extern crate nalgebra as na;

use na::{DMatrix,Matrix4,Vector4};

use crate::{Float,DepthFloat};
use crate::error::{Error, Result};
use crate::image::DepthMap;
use crate::numerics::pose::homogeneous_from_dynamic;

/**
 * Remaps depth values from the event camera frame into the frame camera frame.
 * Every pixel (x,y) with Z > 0 is lifted to [x, y, Z, 1], transformed, and the resulting z is written
 * back at the same (x,y). The transformed image plane position is discarded, there is no resampling.
 * Pixels without depth stay 0.
 */
pub fn reproject(depth: DepthMap, extrinsic: &DMatrix<Float>) -> Result<DepthMap> {
    let transform = homogeneous_from_dynamic(extrinsic).ok_or_else(|| Error::InvalidInput(
        format!("extrinsic must be 4x4, got {}x{}", extrinsic.nrows(), extrinsic.ncols())))?;
    Ok(reproject_with(depth, &transform))
}

pub fn reproject_with(depth: DepthMap, transform: &Matrix4<Float>) -> DepthMap {
    let width = depth.width();
    let height = depth.height();
    let mut depth_frame = DepthMap::zeros(width, height);

    for x in 0..width {
        for y in 0..height {
            let z = depth.buffer[(y,x)];
            if z > 0.0 {
                let point_event = Vector4::<Float>::new(x as Float, y as Float, z as Float, 1.0);
                let point_frame = transform*point_event;
                depth_frame.buffer[(y,x)] = point_frame[2] as DepthFloat;
            }
        }
    }

    depth_frame
}

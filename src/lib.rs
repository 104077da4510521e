extern crate nalgebra as na;
extern crate image as image_rs;

pub mod error;
pub mod numerics;
pub mod calibration;
pub mod image;
pub mod depth;
pub mod io;
pub mod pipeline;
pub mod events;

pub use crate::error::{Error, Result};
pub use crate::calibration::CalibrationParameters;
pub use crate::image::{DisparityMap, DepthMap};

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

/**
 * Scalar type of the disparity and depth rasters
 */
macro_rules! define_depth_float {
    ($f:tt) => {
        pub use std::$f as depth_float;
        pub type DepthFloat = $f;
    }
}

define_float!(f64);
define_depth_float!(f32);

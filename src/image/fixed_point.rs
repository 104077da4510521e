extern crate image as image_rs;
extern crate num_traits;

use image_rs::{ImageBuffer, Luma};
use num_traits::ToPrimitive;

use crate::DepthFloat;
use crate::error::{Error, Result};
use crate::image::DepthMap;

/** One unit of a stored code value is 1/256 of a pixel (disparity) or length unit (depth) */
pub const FIXED_POINT_SCALE: DepthFloat = 256.0;

pub type Image16 = ImageBuffer<Luma<u16>, Vec<u16>>;

pub fn decode(code: u16) -> DepthFloat {
    code as DepthFloat / FIXED_POINT_SCALE
}

/**
 * Scales by 256 and truncates toward zero. Codes above u16::MAX saturate, the flag reports it.
 */
pub fn encode(value: DepthFloat) -> Result<(u16, bool)> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!("depth value {} cannot be fixed point encoded", value)));
    }

    let scaled = (value * FIXED_POINT_SCALE).trunc();
    Ok(match scaled.to_u16() {
        Some(code) => (code, false),
        None => (u16::MAX, true)
    })
}

/**
 * Encodes a depth map into a 16-bit raster. Returns the raster and the number of saturated pixels.
 */
pub fn encode_map(depth: &DepthMap) -> Result<(Image16, usize)> {
    let width = depth.width();
    let height = depth.height();
    let mut image = Image16::new(width as u32, height as u32);
    let mut saturated = 0;

    for c in 0..width {
        for r in 0..height {
            let (code, clipped) = encode(depth.buffer[(r,c)])?;
            if clipped {
                saturated += 1;
            }
            image.put_pixel(c as u32, r as u32, Luma([code]));
        }
    }

    Ok((image, saturated))
}

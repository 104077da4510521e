extern crate image as image_rs;

use std::io::ErrorKind;
use std::path::Path;
use image_rs::DynamicImage;

use crate::DepthFloat;
use crate::error::{Error, Result};
use crate::image::{fixed_point::FIXED_POINT_SCALE, image_encoding::ImageEncoding};

/**
 * raw_* are the stored sample values, depth_* the metric values. For U16 rasters these are the
 * samples divided by 256, F32 rasters already hold depth.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct DepthMapReport {
    pub width: u32,
    pub height: u32,
    pub encoding: ImageEncoding,
    pub raw_min: DepthFloat,
    pub raw_max: DepthFloat,
    pub depth_min: DepthFloat,
    pub depth_max: DepthFloat
}

/**
 * Sanity checks for a depth raster: single channel, stored as u16 or f32, no negative values, not all zero.
 */
pub fn check_depth_map(file_path: &Path) -> Result<DepthMapReport> {
    if !file_path.exists() {
        return Err(Error::io(file_path, std::io::Error::new(ErrorKind::NotFound, "depth map file not found")));
    }

    let image = image_rs::open(file_path).map_err(|e| Error::image(file_path, e))?;
    let color_type = image.color();
    let (width, height) = (image.width(), image.height());

    let (encoding, samples) = match ImageEncoding::from_color_type(color_type) {
        Some(ImageEncoding::U16) => (ImageEncoding::U16, image.into_luma16().pixels().map(|p| p[0] as DepthFloat).collect::<Vec<DepthFloat>>()),
        Some(ImageEncoding::F32) => (ImageEncoding::F32, float_samples(file_path, image)?),
        Some(ImageEncoding::U8) => return Err(Error::InvalidInput(format!("{} has unexpected sample type {:?}", file_path.display(), color_type))),
        None => return Err(Error::InvalidInput(format!("{} is not a single channel depth image ({:?})", file_path.display(), color_type)))
    };

    let (raw_min, raw_max) = samples.iter().fold((DepthFloat::INFINITY, DepthFloat::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)));
    if samples.is_empty() || raw_max == 0.0 {
        return Err(Error::InvalidInput(format!("{} contains only zero values", file_path.display())));
    }
    if raw_min < 0.0 {
        return Err(Error::InvalidInput(format!("{} contains negative values (min {})", file_path.display(), raw_min)));
    }

    let scale = match encoding {
        ImageEncoding::U16 => FIXED_POINT_SCALE,
        _ => 1.0
    };

    Ok(DepthMapReport {
        width,
        height,
        encoding,
        raw_min,
        raw_max,
        depth_min: raw_min / scale,
        depth_max: raw_max / scale
    })
}

fn float_samples(file_path: &Path, image: DynamicImage) -> Result<Vec<DepthFloat>> {
    let rgb = image.into_rgb32f();
    rgb.pixels().map(|p| {
        let [r, g, b] = p.0;
        match r == g && g == b {
            true => Ok(r),
            false => Err(Error::InvalidInput(format!("{} is not a single channel depth image", file_path.display())))
        }
    }).collect()
}

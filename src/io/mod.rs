extern crate image as image_rs;

use std::path::{Path, PathBuf};
use image_rs::{DynamicImage, GrayImage, ImageBuffer, Luma};

use crate::error::{Error, Result};
use crate::image::{DisparityMap, DepthMap, fixed_point::{encode_map, Image16}};

pub mod event_loader;
pub mod depth_check;

pub const SUPPORTED_RASTER_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "tiff"];

pub fn is_supported_raster(file_path: &Path) -> bool {
    match file_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => SUPPORTED_RASTER_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)),
        None => false
    }
}

/**
 * Output name for a depth map derived from an input raster. JPEG cannot hold 16-bit samples,
 * so those names are moved to png.
 */
pub fn depth_output_name(file_name: &Path) -> PathBuf {
    match file_name.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => file_name.with_extension("png"),
        _ => file_name.to_path_buf()
    }
}

/**
 * Reads a raster at its native bit depth as single channel codes. 8-bit layouts are reduced to 8-bit luma
 * and widened without rescaling, everything else is reduced to 16-bit luma.
 */
pub fn load_fixed_point_raster(file_path: &Path) -> Result<Image16> {
    let image = image_rs::open(file_path).map_err(|e| Error::image(file_path, e))?;
    Ok(match image {
        DynamicImage::ImageLuma16(buffer) => buffer,
        DynamicImage::ImageLuma8(buffer) => widen_luma8(&buffer),
        other if other.color().bits_per_pixel() / other.color().channel_count() as u16 == 8 => widen_luma8(&other.into_luma8()),
        other => other.into_luma16()
    })
}

fn widen_luma8(buffer: &GrayImage) -> Image16 {
    let (width, height) = buffer.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| Luma([buffer.get_pixel(x, y)[0] as u16]))
}

pub fn load_disparity_map(file_path: &Path) -> Result<DisparityMap> {
    let raster = load_fixed_point_raster(file_path)?;
    Ok(DisparityMap::from_fixed_point_image(&raster))
}

pub fn load_depth_map(file_path: &Path) -> Result<DepthMap> {
    let raster = load_fixed_point_raster(file_path)?;
    Ok(DepthMap::from_fixed_point_image(&raster))
}

/**
 * Writes the depth map as a 16-bit 1/256 fixed point raster. Returns the number of saturated pixels.
 */
pub fn save_depth_map(file_path: &Path, depth: &DepthMap) -> Result<usize> {
    let (image, saturated) = encode_map(depth)?;
    image.save(file_path).map_err(|e| Error::image(file_path, e))?;
    Ok(saturated)
}

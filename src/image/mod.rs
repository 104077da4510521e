extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{ImageBuffer, Pixel, Luma};
use image_rs::flat::NormalForm;
use na::DMatrix;

use crate::DepthFloat;
use self::fixed_point::decode;

pub mod image_encoding;
pub mod fixed_point;

/**
 * Sub-pixel disparity, row major indexing (y,x). 0 marks an unknown pixel.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct DisparityMap {
    pub buffer: DMatrix<DepthFloat>
}

/**
 * Metric Z in the frame of the owning camera, indexed (y,x). 0 marks a pixel without depth.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct DepthMap {
    pub buffer: DMatrix<DepthFloat>
}

impl DisparityMap {

    pub fn from_matrix(buffer: DMatrix<DepthFloat>) -> DisparityMap {
        DisparityMap{buffer}
    }

    pub fn from_row_slice(width: usize, height: usize, values: &[DepthFloat]) -> DisparityMap {
        DisparityMap{buffer: DMatrix::<DepthFloat>::from_row_slice(height, width, values)}
    }

    /** Decodes the 1/256 fixed point codes of a 16-bit raster */
    pub fn from_fixed_point_image(image: &ImageBuffer<Luma<u16>, Vec<u16>>) -> DisparityMap {
        DisparityMap{buffer: image16_to_matrix(image)}
    }

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn min(&self) -> DepthFloat {
        self.buffer.min()
    }

    pub fn max(&self) -> DepthFloat {
        self.buffer.max()
    }

    pub fn has_negative_values(&self) -> bool {
        self.buffer.iter().any(|&v| v < 0.0)
    }
}

impl DepthMap {

    pub fn zeros(width: usize, height: usize) -> DepthMap {
        DepthMap{buffer: DMatrix::<DepthFloat>::zeros(height, width)}
    }

    pub fn from_matrix(buffer: DMatrix<DepthFloat>) -> DepthMap {
        DepthMap{buffer}
    }

    pub fn from_row_slice(width: usize, height: usize, values: &[DepthFloat]) -> DepthMap {
        DepthMap{buffer: DMatrix::<DepthFloat>::from_row_slice(height, width, values)}
    }

    pub fn from_fixed_point_image(image: &ImageBuffer<Luma<u16>, Vec<u16>>) -> DepthMap {
        DepthMap{buffer: image16_to_matrix(image)}
    }

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn min(&self) -> DepthFloat {
        self.buffer.min()
    }

    pub fn max(&self) -> DepthFloat {
        self.buffer.max()
    }

    pub fn has_negative_values(&self) -> bool {
        self.buffer.iter().any(|&v| v < 0.0)
    }

    pub fn valid_pixel_count(&self) -> usize {
        self.buffer.iter().filter(|&&v| v > 0.0).count()
    }
}

fn image16_to_matrix(gray_image: &ImageBuffer<Luma<u16>, Vec<u16>>) -> DMatrix<DepthFloat> {
    debug_assert!(gray_image.sample_layout().is_normal(NormalForm::RowMajorPacked));

    let (width, height) = gray_image.dimensions();
    let size = (width * height) as usize;
    let mut vec_column_major: Vec<DepthFloat> = Vec::with_capacity(size);
    for x in 0..width {
        for y in 0..height {
            let pixel_value = gray_image.get_pixel(x, y).channels()[0];
            vec_column_major.push(decode(pixel_value));
        }
    }
    DMatrix::<DepthFloat>::from_vec(height as usize, width as usize, vec_column_major)
}

extern crate image as image_rs;

use image_rs::ColorType;

/**
 * Sample encodings of a single channel raster
 */
#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum ImageEncoding {
    U8,
    U16,
    F32
}

impl ImageEncoding {
    /**
     * Float rasters only come as RGB(A) out of the decoder, they count as single channel when all
     * colour channels agree. That is checked on the samples, not here.
     */
    pub fn from_color_type(color_type: ColorType) -> Option<ImageEncoding> {
        match color_type {
            ColorType::L8 => Some(ImageEncoding::U8),
            ColorType::L16 => Some(ImageEncoding::U16),
            ColorType::Rgb32F | ColorType::Rgba32F => Some(ImageEncoding::F32),
            _ => None
        }
    }
}

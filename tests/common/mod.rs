#![allow(dead_code)]

use std::fs;
use std::path::Path;
use image::{ImageBuffer, Luma};

pub const IDENTITY_T_10: &str = "
    - [1.0, 0.0, 0.0, 0.0]
    - [0.0, 1.0, 0.0, 0.0]
    - [0.0, 0.0, 1.0, 0.0]
    - [0.0, 0.0, 0.0, 1.0]";

pub const SHIFTED_T_10: &str = "
    - [1.0, 0.0, 0.0, -0.5]
    - [0.0, 1.0, 0.0, 0.0]
    - [0.0, 0.0, 1.0, 0.25]
    - [0.0, 0.0, 0.0, 1.0]";

pub const SMALL_T_10: &str = "
    - [1.0, 0.0, 0.0]
    - [0.0, 1.0, 0.0]
    - [0.0, 0.0, 1.0]";

/** cam_to_cam.yaml with the given focal length, baseline and T_10 rows */
pub fn calibration_yaml(focal_length: f64, baseline: f64, t_10: &str) -> String {
    format!("intrinsics:
  camRect0:
    camera_matrix: [{f}, {f}, 320.0, 240.0]
    distortion_coeffs: [0.0, 0.0, 0.0, 0.0]
  camRect1:
    camera_matrix: [1.0, 1.0, 0.0, 0.0]
disparity_to_depth:
  cams_03:
    - [1.0, 0.0, 0.0, -320.0]
    - [0.0, 1.0, 0.0, -240.0]
    - [0.0, 0.0, 0.0, {f}]
    - [0.0, 0.0, {b}, 0.0]
  cams_12:
    - [1.0, 0.0, 0.0, 0.0]
extrinsics:
  T_10:{t}
", f = focal_length, b = baseline, t = t_10)
}

pub fn write_calibration(path: &Path, focal_length: f64, baseline: f64, t_10: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, calibration_yaml(focal_length, baseline, t_10)).unwrap();
}

/** Writes disparities (row major) as a 16-bit 1/256 fixed point png */
pub fn write_disparity_png(path: &Path, width: u32, height: u32, disparities: &[f32]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let image = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(width, height, |x, y| {
        let d = disparities[(y*width + x) as usize];
        Luma([(d*256.0).round() as u16])
    });
    image.save(path).unwrap();
}

pub fn read_png16(path: &Path) -> ImageBuffer<Luma<u16>, Vec<u16>> {
    image::open(path).unwrap().into_luma16()
}

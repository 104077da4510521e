extern crate nalgebra as na;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use na::{DMatrix,Matrix4};
use serde::{Deserialize, Serialize};

use crate::Float;
use crate::error::{Error, Result};
use crate::numerics::pose::{homogeneous_from_dynamic, is_rigid, ORTHONORMAL_TOLERANCE};

/** Stereo pair whose disparity-to-depth table supplies the baseline */
pub const BASELINE_PAIR: &str = "cams_03";
pub const BASELINE_ROW: usize = 3;
pub const BASELINE_COL: usize = 2;

/**
 * Layout of a cam_to_cam.yaml document. Only the entries consumed by the depth pipeline are modelled,
 * every other key of the file is ignored.
 */
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct CamToCamCalibration {
    pub intrinsics: Intrinsics,
    pub disparity_to_depth: DisparityToDepth,
    pub extrinsics: Extrinsics
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Intrinsics {
    #[serde(rename = "camRect0")]
    pub cam_rect_0: CameraIntrinsics
}

/** camera_matrix is stored as [fx, fy, cx, cy] */
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct CameraIntrinsics {
    pub camera_matrix: Vec<Float>
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct DisparityToDepth {
    pub cams_03: Vec<Vec<Float>>
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Extrinsics {
    #[serde(rename = "T_10")]
    pub t_10: Vec<Vec<Float>>
}

/**
 * Validated parameters of one calibration scope. Immutable once built.
 * extrinsic maps points from the event camera frame to the frame camera frame.
 */
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CalibrationParameters {
    focal_length: Float,
    baseline: Float,
    extrinsic: Matrix4<Float>
}

impl CalibrationParameters {

    pub fn new(focal_length: Float, baseline: Float, extrinsic: &DMatrix<Float>) -> Result<CalibrationParameters> {
        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(Error::Configuration(format!("focal length must be positive, got {}", focal_length)));
        }
        if !(baseline.is_finite() && baseline > 0.0) {
            return Err(Error::Configuration(format!("baseline must be positive, got {}", baseline)));
        }

        let extrinsic = homogeneous_from_dynamic(extrinsic).ok_or_else(|| Error::Configuration(
            format!("extrinsic T_10 must be 4x4, got {}x{}", extrinsic.nrows(), extrinsic.ncols())))?;
        if !is_rigid(&extrinsic, ORTHONORMAL_TOLERANCE) {
            return Err(Error::Configuration(format!("extrinsic T_10 is not a rigid transform: {}", extrinsic)));
        }

        Ok(CalibrationParameters{focal_length, baseline, extrinsic})
    }

    pub fn focal_length(&self) -> Float {
        self.focal_length
    }

    pub fn baseline(&self) -> Float {
        self.baseline
    }

    pub fn extrinsic(&self) -> &Matrix4<Float> {
        &self.extrinsic
    }
}

impl CamToCamCalibration {

    pub fn focal_length(&self) -> Result<Float> {
        self.intrinsics.cam_rect_0.camera_matrix.first().copied()
            .ok_or_else(|| Error::Configuration(String::from("intrinsics.camRect0.camera_matrix is empty")))
    }

    pub fn baseline(&self) -> Result<Float> {
        self.disparity_to_depth.cams_03.get(BASELINE_ROW).and_then(|row| row.get(BASELINE_COL)).copied()
            .ok_or_else(|| Error::Configuration(format!("disparity_to_depth.{} has no entry at [{}][{}]", BASELINE_PAIR, BASELINE_ROW, BASELINE_COL)))
    }

    /**
     * T_10 as a dense matrix. Rows of unequal length are rejected instead of being padded.
     */
    pub fn extrinsic(&self) -> Result<DMatrix<Float>> {
        let rows = &self.extrinsics.t_10;
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        if nrows == 0 || ncols == 0 {
            return Err(Error::Configuration(String::from("extrinsics.T_10 is empty")));
        }
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(Error::Configuration(String::from("extrinsics.T_10 has rows of unequal length")));
        }

        Ok(DMatrix::<Float>::from_row_iterator(nrows, ncols, rows.iter().flatten().copied()))
    }

    pub fn to_parameters(&self) -> Result<CalibrationParameters> {
        CalibrationParameters::new(self.focal_length()?, self.baseline()?, &self.extrinsic()?)
    }
}

pub fn from_yaml_str(contents: &str) -> Result<CalibrationParameters> {
    let calibration: CamToCamCalibration = serde_yaml::from_str(contents)
        .map_err(|e| Error::Configuration(format!("calibration document could not be parsed: {}", e)))?;
    calibration.to_parameters()
}

pub fn load(file_path: &Path) -> Result<CalibrationParameters> {
    let file = File::open(file_path).map_err(|e| Error::io(file_path, e))?;
    let reader = BufReader::new(file);
    let calibration: CamToCamCalibration = serde_yaml::from_reader(reader)
        .map_err(|e| Error::Yaml{path: file_path.to_path_buf(), source: e})?;
    calibration.to_parameters()
}

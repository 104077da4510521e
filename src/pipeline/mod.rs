use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::calibration::{self, CalibrationParameters};
use crate::depth::{disparity_to_depth, transform::reproject_with};
use crate::error::{Error, Result};
use crate::image::{DisparityMap, DepthMap};
use crate::io::{depth_output_name, is_supported_raster, load_disparity_map, save_depth_map};
use self::discovery::{DatasetLayout, Discovered, ProcessingUnit, UnitDiscovery};

pub mod discovery;

#[derive(Debug,Clone,PartialEq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String
}

/**
 * Outcome of a folder or dataset run. Failures of single files or whole units are collected here
 * instead of aborting the run.
 */
#[derive(Debug,Clone,Default,PartialEq)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped_files: Vec<Skipped>,
    pub skipped_units: Vec<Skipped>
}

impl RunSummary {
    pub fn merge(&mut self, other: RunSummary) {
        self.written.extend(other.written);
        self.skipped_files.extend(other.skipped_files);
        self.skipped_units.extend(other.skipped_units);
    }

    fn skip_file(&mut self, path: &Path, reason: String) {
        self.skipped_files.push(Skipped{path: path.to_path_buf(), reason});
    }

    fn skip_unit(&mut self, path: &Path, reason: String) {
        self.skipped_units.push(Skipped{path: path.to_path_buf(), reason});
    }
}

/**
 * Disparity in the event camera to depth in the frame camera.
 */
pub fn convert_disparity(disparity: &DisparityMap, calibration: &CalibrationParameters) -> Result<DepthMap> {
    let depth_event = disparity_to_depth(disparity, calibration.focal_length(), calibration.baseline())?;
    if depth_event.has_negative_values() {
        return Err(Error::InvalidInput(format!("depth map contains negative values (min {})", depth_event.min())));
    }

    Ok(reproject_with(depth_event, calibration.extrinsic()))
}

pub fn log_calibration(calibration: &CalibrationParameters) {
    info!("Focal length (f_event): {}, Baseline (B_event): {}", calibration.focal_length(), calibration.baseline());
    info!("T_10 matrix: {}", calibration.extrinsic());
}

/**
 * Converts one disparity raster and writes the frame camera depth raster to output_path.
 */
pub fn process_file(disparity_path: &Path, calibration: &CalibrationParameters, output_path: &Path) -> Result<PathBuf> {
    let disparity = load_disparity_map(disparity_path)?;
    debug!("Disparity map {} min: {}, max: {}", disparity_path.display(), disparity.min(), disparity.max());

    let depth_frame = convert_disparity(&disparity, calibration)?;
    debug!("{} of {} pixels carry depth", depth_frame.valid_pixel_count(), depth_frame.width()*depth_frame.height());

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let saturated = save_depth_map(output_path, &depth_frame)?;
    if saturated > 0 {
        warn!("{} pixels exceeded the 16-bit depth range in {}", saturated, output_path.display());
    }

    info!("Saved depth map to {}", output_path.display());
    Ok(output_path.to_path_buf())
}

/**
 * Converts every supported raster directly inside disparity_dir. Files that fail are logged and skipped.
 * Only problems with the directories themselves are returned as errors.
 */
pub fn process_folder(disparity_dir: &Path, calibration: &CalibrationParameters, output_dir: &Path) -> Result<RunSummary> {
    let mut disparity_paths = fs::read_dir(disparity_dir).map_err(|e| Error::io(disparity_dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_raster(path))
        .collect::<Vec<PathBuf>>();
    disparity_paths.sort();

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut summary = RunSummary::default();
    for disparity_path in disparity_paths {
        let file_name = match disparity_path.file_name() {
            Some(name) => depth_output_name(Path::new(name)),
            None => continue
        };

        info!("Processing {}...", disparity_path.display());
        match process_file(&disparity_path, calibration, &output_dir.join(file_name)) {
            Ok(written) => summary.written.push(written),
            Err(e) => {
                warn!("Skipping {}: {}", disparity_path.display(), e);
                summary.skip_file(&disparity_path, e.to_string());
            }
        }
    }

    Ok(summary)
}

pub fn process_unit(unit: &ProcessingUnit, output_root: &Path, layout: &DatasetLayout) -> Result<RunSummary> {
    let calibration = calibration::load(&unit.calibration_path)?;
    info!("Processing directory: {}", unit.root.display());
    log_calibration(&calibration);

    process_folder(&unit.disparity_dir, &calibration, &unit.output_dir(output_root, layout))
}

/**
 * Walks a dataset tree and converts every unit found. Output mirrors the tree below output_root.
 * Directories without calibration, without disparity input or with an unusable calibration are skipped.
 */
pub fn process_dataset(dataset_root: &Path, output_root: &Path, layout: &DatasetLayout) -> Result<RunSummary> {
    if !dataset_root.is_dir() {
        return Err(Error::io(dataset_root, std::io::Error::new(std::io::ErrorKind::NotFound, "dataset root is not a directory")));
    }

    let mut summary = RunSummary::default();
    for discovered in UnitDiscovery::new(dataset_root, layout) {
        match discovered {
            Discovered::Unit(unit) => match process_unit(&unit, output_root, layout) {
                Ok(unit_summary) => summary.merge(unit_summary),
                Err(e) => {
                    match e.is_configuration() {
                        true => warn!("Invalid calibration parameters in {}, skipping: {}", unit.calibration_path.display(), e),
                        false => warn!("Skipping {}: {}", unit.root.display(), e)
                    };
                    summary.skip_unit(&unit.root, e.to_string());
                }
            },
            Discovered::MissingCalibration(dir) => {
                debug!("Calibration file not found in {}, skipping...", dir.display());
                summary.skip_unit(&dir, String::from("calibration file not found"));
            },
            Discovered::MissingDisparity(dir) => {
                warn!("Disparity directory not found in {}, skipping...", dir.display());
                summary.skip_unit(&dir, String::from("disparity directory not found"));
            }
        }
    }

    Ok(summary)
}

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/**
 * Where calibration, disparity input and depth output live relative to a recording directory.
 */
#[derive(Debug,Clone)]
pub struct DatasetLayout {
    pub calibration_file: PathBuf,
    pub disparity_dir: PathBuf,
    pub output_leaf: PathBuf
}

impl Default for DatasetLayout {
    fn default() -> DatasetLayout {
        DatasetLayout {
            calibration_file: PathBuf::from("calibration/cam_to_cam.yaml"),
            disparity_dir: PathBuf::from("disparity/event"),
            output_leaf: PathBuf::from("depth")
        }
    }
}

/** One calibration scope together with the disparity files it applies to */
#[derive(Debug,Clone,PartialEq)]
pub struct ProcessingUnit {
    pub root: PathBuf,
    pub relative: PathBuf,
    pub calibration_path: PathBuf,
    pub disparity_dir: PathBuf
}

impl ProcessingUnit {
    pub fn output_dir(&self, output_root: &Path, layout: &DatasetLayout) -> PathBuf {
        output_root.join(&self.relative).join(&layout.output_leaf)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub enum Discovered {
    Unit(ProcessingUnit),
    MissingCalibration(PathBuf),
    MissingDisparity(PathBuf)
}

/**
 * Depth first walk over a dataset tree. Every directory is inspected on its own and all of them are
 * descended into, whether they form a unit or not. Siblings are visited in name order.
 * Symlinked directories are not followed.
 */
pub struct UnitDiscovery {
    layout: DatasetLayout,
    dataset_root: PathBuf,
    pending: Vec<PathBuf>
}

impl UnitDiscovery {
    pub fn new(dataset_root: &Path, layout: &DatasetLayout) -> UnitDiscovery {
        UnitDiscovery {
            layout: layout.clone(),
            dataset_root: dataset_root.to_path_buf(),
            pending: vec!(dataset_root.to_path_buf())
        }
    }

    fn inspect_dir(&self, dir: &Path) -> Discovered {
        let calibration_path = dir.join(&self.layout.calibration_file);
        if !calibration_path.is_file() {
            return Discovered::MissingCalibration(dir.to_path_buf());
        }

        let disparity_dir = dir.join(&self.layout.disparity_dir);
        if !disparity_dir.is_dir() {
            return Discovered::MissingDisparity(dir.to_path_buf());
        }

        let relative = dir.strip_prefix(&self.dataset_root).map(Path::to_path_buf).unwrap_or_default();
        Discovered::Unit(ProcessingUnit{root: dir.to_path_buf(), relative, calibration_path, disparity_dir})
    }
}

impl Iterator for UnitDiscovery {
    type Item = Discovered;

    fn next(&mut self) -> Option<Discovered> {
        let dir = self.pending.pop()?;

        match fs::read_dir(&dir) {
            Ok(entries) => {
                let mut children = entries.filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().map_or(false, |t| t.is_dir()))
                    .map(|entry| entry.path())
                    .collect::<Vec<PathBuf>>();
                children.sort();
                self.pending.extend(children.into_iter().rev());
            },
            Err(e) => warn!("Could not list {}: {}", dir.display(), e)
        };

        Some(self.inspect_dir(&dir))
    }
}

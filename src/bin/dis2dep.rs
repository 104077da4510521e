extern crate event_depth;

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use event_depth::{calibration, Float};
use event_depth::events::{write_event_slices, SliceConfig};
use event_depth::io::{depth_check::check_depth_map, event_loader::load_event_windows};
use event_depth::pipeline::{log_calibration, process_dataset, process_file, process_folder, RunSummary, discovery::DatasetLayout};

/** Converts event camera disparity rasters into depth rasters in the frame camera. */
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
enum Command {
    /** Convert a single disparity image */
    Single {
        #[arg(long = "disparity_path")]
        disparity_path: PathBuf,
        #[arg(long = "calibration_path")]
        calibration_path: PathBuf,
        #[arg(long = "output_path")]
        output_path: PathBuf
    },
    /** Convert every disparity image of one directory */
    Folder {
        #[arg(long = "disparity_dir")]
        disparity_dir: PathBuf,
        #[arg(long = "calibration_path")]
        calibration_path: PathBuf,
        #[arg(long = "output_dir")]
        output_dir: PathBuf
    },
    /** Convert a dataset tree, one calibration per recording directory */
    Dataset {
        #[arg(long = "disparity_dir")]
        disparity_dir: PathBuf,
        #[arg(long = "output_dir")]
        output_dir: PathBuf
    },
    /** Check a written depth image */
    Check {
        #[arg(long = "depth_path")]
        depth_path: PathBuf
    },
    /** Render event windows to PNG slices */
    Slices {
        /** Text event file with one "t x y p" event per line */
        event_file: PathBuf,
        output_dir: PathBuf,
        #[arg(long = "delta_time_ms", visible_alias = "dt_ms", default_value_t = 50.0)]
        delta_time_ms: Float,
        #[arg(long, default_value_t = 480)]
        height: u32,
        #[arg(long, default_value_t = 640)]
        width: u32,
        #[arg(long, default_value_t = 2)]
        stride: usize
    }
}

fn report(summary: &RunSummary) {
    info!("Wrote {} depth maps, skipped {} files and {} directories", summary.written.len(), summary.skipped_files.len(), summary.skipped_units.len());
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Single { disparity_path, calibration_path, output_path } => {
            let calibration = calibration::load(&calibration_path).wrap_err("failed to load calibration")?;
            log_calibration(&calibration);
            process_file(&disparity_path, &calibration, &output_path)
                .wrap_err_with(|| format!("failed to convert {}", disparity_path.display()))?;
        },
        Command::Folder { disparity_dir, calibration_path, output_dir } => {
            let calibration = calibration::load(&calibration_path).wrap_err("failed to load calibration")?;
            log_calibration(&calibration);
            let summary = process_folder(&disparity_dir, &calibration, &output_dir)?;
            report(&summary);
        },
        Command::Dataset { disparity_dir, output_dir } => {
            let summary = process_dataset(&disparity_dir, &output_dir, &DatasetLayout::default())?;
            report(&summary);
        },
        Command::Check { depth_path } => {
            let depth_report = check_depth_map(&depth_path)?;
            info!("Depth map {}x{} stored as {:?}", depth_report.width, depth_report.height, depth_report.encoding);
            info!("Depth map min value: {}, max value: {}", depth_report.raw_min, depth_report.raw_max);
            info!("Converted depth map min value: {}, max value: {}", depth_report.depth_min, depth_report.depth_max);
            info!("Depth map checks completed successfully.");
        },
        Command::Slices { event_file, output_dir, delta_time_ms, height, width, stride } => {
            let windows = load_event_windows(&event_file, delta_time_ms)?;
            write_event_slices(windows, &output_dir, &SliceConfig{height, width, stride})?;
        }
    };

    Ok(())
}

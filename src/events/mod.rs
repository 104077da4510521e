extern crate image as image_rs;

use std::fs;
use std::path::Path;
use image_rs::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const NEGATIVE_EVENT: Rgb<u8> = Rgb([255, 0, 0]);
pub const POSITIVE_EVENT: Rgb<u8> = Rgb([0, 0, 255]);

/**
 * Events of one time window as parallel arrays. Polarity 0 is a negative, 1 a positive event.
 */
#[derive(Debug,Clone,Default,PartialEq)]
pub struct EventWindow {
    pub x: Vec<i64>,
    pub y: Vec<i64>,
    pub polarity: Vec<u8>
}

impl EventWindow {
    pub fn push(&mut self, x: i64, y: i64, polarity: u8) {
        self.x.push(x);
        self.y.push(y);
        self.polarity.push(polarity);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug,Clone,Copy)]
pub struct SliceConfig {
    pub height: u32,
    pub width: u32,
    /** Only every stride-th window is written */
    pub stride: usize
}

impl Default for SliceConfig {
    fn default() -> SliceConfig {
        SliceConfig{height: 480, width: 640, stride: 2}
    }
}

/**
 * Draws one window onto a white canvas. Events outside the canvas are dropped. Negative events are painted
 * first, so a positive event always wins a shared pixel.
 */
pub fn render_event_slice(window: &EventWindow, height: u32, width: u32) -> Result<RgbImage> {
    if window.x.len() != window.y.len() || window.x.len() != window.polarity.len() {
        return Err(Error::InvalidInput(format!("event arrays differ in length: x {}, y {}, p {}", window.x.len(), window.y.len(), window.polarity.len())));
    }
    if height == 0 || width == 0 {
        return Err(Error::InvalidInput(format!("slice size must be positive, got {}x{}", width, height)));
    }

    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
    for (polarity, color) in [(0, NEGATIVE_EVENT), (1, POSITIVE_EVENT)] {
        let events = window.x.iter().zip(window.y.iter()).zip(window.polarity.iter());
        for ((&x, &y), &p) in events {
            if p != polarity || x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                continue;
            }
            image.put_pixel(x as u32, y as u32, color);
        }
    }

    Ok(image)
}

/**
 * Renders windows to {index:06}.png in output_dir. Indices count every window, including the ones
 * skipped by the stride. Returns the number of windows consumed.
 */
pub fn write_event_slices<I>(windows: I, output_dir: &Path, config: &SliceConfig) -> Result<usize> where I: IntoIterator<Item = EventWindow> {
    if config.stride == 0 {
        return Err(Error::InvalidInput(String::from("slice stride must be at least 1")));
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut slice_idx = 0;
    for window in windows {
        if slice_idx % config.stride == 0 {
            let output_path = output_dir.join(format!("{:06}.png", slice_idx));
            let image = render_event_slice(&window, config.height, config.width)?;
            image.save(&output_path).map_err(|e| Error::image(&output_path, e))?;
            debug!("wrote slice {} with {} events", output_path.display(), window.len());
        }
        slice_idx += 1;
    }

    info!("Saved {} slices to {}", slice_idx, output_dir.display());
    Ok(slice_idx)
}

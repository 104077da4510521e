use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::Float;
use crate::error::{Error, Result};
use crate::events::EventWindow;

/**
 * Loads a whitespace separated event list with one "t x y p" event per line, t in microseconds and
 * non-decreasing. Lines starting with '#' are skipped. Events are grouped into consecutive windows of
 * delta_time_ms starting at the first timestamp; windows without events are kept so that slice indices
 * stay aligned with time.
 */
pub fn load_event_windows(file_path: &Path, delta_time_ms: Float) -> Result<Vec<EventWindow>> {
    if !(delta_time_ms.is_finite() && delta_time_ms > 0.0) {
        return Err(Error::InvalidInput(format!("window length must be positive, got {} ms", delta_time_ms)));
    }
    let delta_time_us = delta_time_ms*1000.0;

    let file = File::open(file_path).map_err(|e| Error::io(file_path, e))?;
    let reader = BufReader::new(file);

    let mut windows = Vec::<EventWindow>::new();
    let mut window_start: Option<i64> = None;
    let mut last_ts = i64::MIN;

    for (line_idx, line) in reader.lines().enumerate() {
        let contents = line.map_err(|e| Error::io(file_path, e))?;
        let trimmed = contents.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (ts, x, y, p) = parse_event(trimmed).ok_or_else(|| Error::InvalidInput(
            format!("{}:{} malformed event line '{}'", file_path.display(), line_idx+1, trimmed)))?;
        if ts < last_ts {
            return Err(Error::InvalidInput(format!("{}:{} timestamps are not sorted", file_path.display(), line_idx+1)));
        }
        last_ts = ts;

        let start = *window_start.get_or_insert(ts);
        let window_idx = ((ts - start) as Float / delta_time_us).floor() as usize;
        while windows.len() <= window_idx {
            windows.push(EventWindow::default());
        }
        windows[window_idx].push(x, y, p);
    }

    Ok(windows)
}

fn parse_event(line: &str) -> Option<(i64, i64, i64, u8)> {
    let values = line.split_whitespace().collect::<Vec<&str>>();
    match values.len() {
        4 => {
            let ts = values[0].parse::<i64>().ok()?;
            let x = values[1].parse::<i64>().ok()?;
            let y = values[2].parse::<i64>().ok()?;
            let p = values[3].parse::<u8>().ok()?;
            Some((ts, x, y, p))
        },
        _ => None
    }
}

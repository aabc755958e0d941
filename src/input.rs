//! Recorded landmark streams (JSON lines).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::landmarks::LandmarkFrame;

/// One tick of a recording. `landmarks` is `null` or absent when no hand was
/// detected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub t_ms: Option<u64>,
    #[serde(default)]
    pub landmarks: Option<LandmarkFrame>,
}

pub fn read_recording(path: &Path) -> Result<Vec<RecordedFrame>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let frames = parse_lines(BufReader::new(file), path)?;
    debug!("read {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Parse an in-memory recording. Line numbers in errors are 1-based.
pub fn parse_recording(text: &str) -> Result<Vec<RecordedFrame>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(frame) = parse_line(line, i + 1)? {
            out.push(frame);
        }
    }
    Ok(out)
}

fn parse_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<RecordedFrame>> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(frame) = parse_line(&line, i + 1)? {
            out.push(frame);
        }
    }
    Ok(out)
}

fn parse_line(line: &str, line_no: usize) -> Result<Option<RecordedFrame>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|source| Error::Recording {
            line: line_no,
            source,
        })
}

/// Timestamp for frame `index`: its own `t_ms`, or one synthesized from
/// `fps`, which must be positive.
pub fn frame_time_ms(frame: &RecordedFrame, index: usize, fps: f32) -> u64 {
    frame
        .t_ms
        .unwrap_or_else(|| (index as f64 * 1000.0 / fps as f64).round() as u64)
}

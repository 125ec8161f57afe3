// src/map/level.rs

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{CasterError, Result};
use crate::map::Segment;
use crate::utils::Vector2D;

/// A level as stored on disk: an optional start position and the wall list.
///
/// The text format is one comma-separated record per line. An optional first
/// line `x,y` gives the start position, every `x1,y1,x2,y2` line is a wall.
/// All coordinates are divided by the scale divisor when read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub start: Option<Vector2D>,
    pub segments: Vec<Segment>,
}

impl Level {
    pub fn new(start: Option<Vector2D>, segments: Vec<Segment>) -> Self {
        Level { start, segments }
    }

    /// Parses level text. Lines with the wrong field count or a bad number are skipped.
    ///
    /// A two-field `x,y` record is the start position only when it is the first
    /// non-empty line. A leading byte order mark is ignored.
    pub fn parse(text: &str, scale: f64) -> Self {
        let mut level = Level::default();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut first_record = true;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let is_first = std::mem::replace(&mut first_record, false);

            let Some(fields) = parse_fields(line) else {
                debug!("Skipping unparsable level line {}: {:?}", line_no + 1, line);
                continue;
            };

            match fields.as_slice() {
                [x, y] if is_first => {
                    level.start = Some(Vector2D::new(x / scale, y / scale));
                }
                [x1, y1, x2, y2] => {
                    level.segments.push(Segment::from_coords(
                        x1 / scale,
                        y1 / scale,
                        x2 / scale,
                        y2 / scale,
                    ));
                }
                _ => debug!(
                    "Skipping level line {} with {} fields",
                    line_no + 1,
                    fields.len()
                ),
            }
        }

        level
    }

    /// Reads and parses a level file. A missing or unreadable file is an error.
    pub fn load<P: AsRef<Path>>(path: P, scale: f64) -> Result<Self> {
        Self::load_raw(path, scale).map(|(level, _)| level)
    }

    /// Like [`Level::load`], also returning the exact bytes the level was parsed
    /// from so a watcher can compare later reads against them.
    pub fn load_raw<P: AsRef<Path>>(path: P, scale: f64) -> Result<(Self, Vec<u8>)> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| CasterError::Level {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Level::from_bytes(&bytes, scale);
        info!(
            "Loaded level {:?}: {} walls, start {:?}",
            path,
            level.segments.len(),
            level.start
        );
        Ok((level, bytes))
    }

    /// Invalid UTF-8 is replaced, not rejected; the affected lines are skipped.
    pub fn from_bytes(bytes: &[u8], scale: f64) -> Self {
        Level::parse(&String::from_utf8_lossy(bytes), scale)
    }

    /// Serializes back into the text format, multiplying by `scale` so that
    /// `parse` with the same divisor gives back the same coordinates.
    pub fn to_text(&self, scale: f64) -> String {
        let mut buf = String::new();
        if let Some(start) = self.start {
            let _ = writeln!(buf, "{},{}", start.x * scale, start.y * scale);
        }
        for seg in &self.segments {
            let _ = writeln!(
                buf,
                "{},{},{},{}",
                seg.start.x * scale,
                seg.start.y * scale,
                seg.end.x * scale,
                seg.end.y * scale
            );
        }
        buf
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, scale: f64) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text(scale)).map_err(|source| CasterError::LevelWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_fields(line: &str) -> Option<Vec<f64>> {
    line.split(',')
        .map(|field| field.trim().parse::<f64>().ok())
        .collect()
}

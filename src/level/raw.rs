//! Line-oriented level description reader.
//!
//! ### Layout
//! ```text
//! <name>
//! <sector count>
//! wall_start wall_count sector_id floor_z ceil_z     (× sector count)
//! <wall count>
//! ax ay bx by portal                                 (× wall count)
//! camera_x camera_y camera_yaw
//! ```
//! `portal` is `0` for a solid wall, else `1 + target sector index`.
//! After the name line, blank lines and lines starting with `#` are skipped.

use std::{
    io::{self, BufRead},
    str::FromStr,
};
use thiserror::Error;

use crate::config::{MAX_SECTORS, MAX_WALLS};

/*=======================================================================*/
/*                              Raw records                              */
/*=======================================================================*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawSector {
    pub wall_start: usize,
    pub wall_count: usize,
    pub id: u32,
    pub floor_z: f32,
    pub ceil_z: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawWall {
    pub ax: f32,
    pub ay: f32,
    pub bx: f32,
    pub by: f32,
    pub portal: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawCamera {
    pub x: f32,
    pub y: f32,
    pub yaw: f32,
}

/// Everything in a level file, checked only for shape and counts.
#[derive(Clone, Debug, PartialEq)]
pub struct RawLevel {
    pub name: String,
    pub sectors: Vec<RawSector>,
    pub walls: Vec<RawWall>,
    pub camera: RawCamera,
}

/*=======================================================================*/
/*                                Errors                                 */
/*=======================================================================*/

#[derive(Error, Debug)]
pub enum LevelError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected {what}, found end of input")]
    MissingLine { line: usize, what: &'static str },

    #[error("line {line}: {what} needs {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse `{token}` in {what}")]
    BadNumber {
        line: usize,
        what: &'static str,
        token: String,
    },

    #[error("{count} sectors exceeds the limit of {max}")]
    TooManySectors { count: usize, max: usize },

    #[error("{count} walls exceeds the limit of {max}")]
    TooManyWalls { count: usize, max: usize },

    #[error("sector {sector} has no walls")]
    EmptySector { sector: usize },

    #[error("sector {sector}: walls {start}..{end} lie outside the {walls} walls in the level")]
    WallRange {
        sector: usize,
        start: usize,
        end: usize,
        walls: usize,
    },

    #[error("wall {wall}: portal target {target} is outside the {sectors} sectors in the level")]
    PortalTarget {
        wall: usize,
        target: u32,
        sectors: usize,
    },
}

/*=======================================================================*/
/*                              Line reader                              */
/*=======================================================================*/

/// A numeric field; `inf` and `NaN` parse but are never accepted.
trait Field: FromStr {
    fn usable(&self) -> bool;
}

impl Field for usize {
    fn usable(&self) -> bool {
        true
    }
}

impl Field for f32 {
    fn usable(&self) -> bool {
        self.is_finite()
    }
}

impl Field for f64 {
    /// Must also survive the later narrowing to `f32`.
    fn usable(&self) -> bool {
        self.is_finite() && self.abs() <= f32::MAX as f64
    }
}

struct Lines<R> {
    inner: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> Lines<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Pull the next physical line into `buf`.
    fn advance(&mut self, what: &'static str) -> Result<(), LevelError> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Err(LevelError::MissingLine {
                line: self.line_no + 1,
                what,
            });
        }
        self.line_no += 1;
        Ok(())
    }

    /// Next physical line, without its terminator.
    fn raw(&mut self, what: &'static str) -> Result<&str, LevelError> {
        self.advance(what)?;
        Ok(self.buf.trim_end_matches(['\r', '\n']))
    }

    /// Skip to the next line that carries data; returns its line number.
    fn data(&mut self, what: &'static str) -> Result<usize, LevelError> {
        loop {
            self.advance(what)?;
            let line = self.buf.trim();
            if !(line.is_empty() || line.starts_with('#')) {
                return Ok(self.line_no);
            }
        }
    }

    /// Next data line split into exactly `N` parsed fields.
    fn fields<T: Field, const N: usize>(
        &mut self,
        what: &'static str,
    ) -> Result<[T; N], LevelError> {
        let line = self.data(what)?;
        let mut parsed = Vec::with_capacity(N);
        for tok in self.buf.split_whitespace() {
            match tok.parse::<T>() {
                Ok(v) if v.usable() => parsed.push(v),
                _ => {
                    return Err(LevelError::BadNumber {
                        line,
                        what,
                        token: tok.to_owned(),
                    });
                }
            }
        }
        <[T; N]>::try_from(parsed).map_err(|v| LevelError::FieldCount {
            line,
            what,
            expected: N,
            found: v.len(),
        })
    }

    /// A single count, bounded by `max`.
    fn count(
        &mut self,
        what: &'static str,
        max: usize,
        too_many: impl FnOnce(usize) -> LevelError,
    ) -> Result<usize, LevelError> {
        let [n] = self.fields::<usize, 1>(what)?;
        if n > max {
            return Err(too_many(n));
        }
        Ok(n)
    }
}

/*=======================================================================*/
/*                                Parsing                                */
/*=======================================================================*/

/// Read a whole level description.  Counts are bounded before any record is
/// read; nothing is returned unless every line parsed.
pub fn read_raw_level<R: BufRead>(reader: R) -> Result<RawLevel, LevelError> {
    let mut lines = Lines::new(reader);

    let name = lines.raw("level name")?.trim().to_owned();

    let n_sectors = lines.count("sector count", MAX_SECTORS, |count| {
        LevelError::TooManySectors {
            count,
            max: MAX_SECTORS,
        }
    })?;
    let mut sectors = Vec::with_capacity(n_sectors);
    for _ in 0..n_sectors {
        let [start, count, id, floor, ceil] = lines.fields::<f64, 5>("sector")?;
        sectors.push(RawSector {
            wall_start: as_index(start, &lines, "sector")?,
            wall_count: as_index(count, &lines, "sector")?,
            id: as_index(id, &lines, "sector")? as u32,
            floor_z: floor as f32,
            ceil_z: ceil as f32,
        });
    }

    let n_walls = lines.count("wall count", MAX_WALLS, |count| {
        LevelError::TooManyWalls {
            count,
            max: MAX_WALLS,
        }
    })?;
    let mut walls = Vec::with_capacity(n_walls);
    for _ in 0..n_walls {
        let [ax, ay, bx, by, portal] = lines.fields::<f64, 5>("wall")?;
        walls.push(RawWall {
            ax: ax as f32,
            ay: ay as f32,
            bx: bx as f32,
            by: by as f32,
            portal: as_index(portal, &lines, "wall")? as u32,
        });
    }

    let [x, y, yaw] = lines.fields::<f32, 3>("camera")?;

    Ok(RawLevel {
        name,
        sectors,
        walls,
        camera: RawCamera { x, y, yaw },
    })
}

/// Integer-valued field written as a number (`3` or `3.0`).
fn as_index<R>(v: f64, lines: &Lines<R>, what: &'static str) -> Result<usize, LevelError> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Ok(v as usize)
    } else {
        Err(LevelError::BadNumber {
            line: lines.line_no,
            what,
            token: v.to_string(),
        })
    }
}

/*=======================================================================*/
/*                                Tests                                  */
/*=======================================================================*/

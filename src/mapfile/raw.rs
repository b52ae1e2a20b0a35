//! # Level file decoder
//!
//! * Parses the JSON document with **serde_json**.
//! * Walks the generic `Value` tree by hand so every shape problem is
//!   reported with the exact position that caused it.
//!
//! Nothing here checks ids, portals or capacities; that is the loader's
//! job once the document has the right shape.
//!
//! ```text
//! {
//!   "sectors": [ [id, floor, ceiling, [[x0, y0, x1, y1, portal], ...]], ... ],
//!   "start":   [x, y, angleDegrees]            (optional)
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Fields per wall tuple: `x0, y0, x1, y1, portal`.
pub const WALL_FIELDS: usize = 5;

/// Fields per sector tuple: `id, floor, ceiling, walls`.
pub const SECTOR_FIELDS: usize = 4;

/*=======================================================================*/
/*                         Raw decoded structs                           */
/*=======================================================================*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawWall {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub portal: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawSector {
    pub id: i64,
    pub floor: f32,
    pub ceil: f32,
    pub walls: Vec<RawWall>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLevel {
    pub sectors: Vec<RawSector>,
    /// `[x, y, angle in degrees]`
    pub start: Option<[f32; 3]>,
}

/*=======================================================================*/
/*                                Errors                                 */
/*=======================================================================*/

#[derive(Debug, Error)]
pub enum RawError {
    #[error("malformed level file: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("{path}: expected {expected}")]
    Schema { path: String, expected: &'static str },

    #[error("sector #{sector} wall #{wall}: expected 5 values, found {len}")]
    WallShape { sector: usize, wall: usize, len: usize },
}

fn schema(path: impl Into<String>, expected: &'static str) -> RawError {
    RawError::Schema {
        path: path.into(),
        expected,
    }
}

/*=======================================================================*/
/*                               Decoding                                */
/*=======================================================================*/

/// Decode a level document into its raw tuples.
pub fn parse_raw(text: &str) -> Result<RawLevel, RawError> {
    let doc: Value = serde_json::from_str(text)?;
    let root = doc.as_object().ok_or_else(|| schema("$", "an object"))?;

    let sectors = root
        .get("sectors")
        .ok_or_else(|| schema("$.sectors", "an array of sectors"))?
        .as_array()
        .ok_or_else(|| schema("$.sectors", "an array of sectors"))?
        .iter()
        .enumerate()
        .map(|(i, v)| sector_from(i, v))
        .collect::<Result<Vec<_>, _>>()?;

    let start = match root.get("start") {
        None | Some(Value::Null) => None,
        Some(v) => Some(start_from(v)?),
    };

    Ok(RawLevel { sectors, start })
}

fn sector_from(index: usize, v: &Value) -> Result<RawSector, RawError> {
    let path = format!("$.sectors[{index}]");
    let fields = v
        .as_array()
        .filter(|a| a.len() == SECTOR_FIELDS)
        .ok_or_else(|| schema(path.clone(), "[id, floor, ceiling, walls]"))?;

    let id = fields[0]
        .as_i64()
        .ok_or_else(|| schema(format!("{path}[0]"), "an integer sector id"))?;
    let floor = number(&fields[1], || format!("{path}[1]"))?;
    let ceil = number(&fields[2], || format!("{path}[2]"))?;
    let walls = fields[3]
        .as_array()
        .ok_or_else(|| schema(format!("{path}[3]"), "an array of walls"))?
        .iter()
        .enumerate()
        .map(|(j, w)| wall_from(index, j, w))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawSector {
        id,
        floor,
        ceil,
        walls,
    })
}

fn wall_from(sector: usize, wall: usize, v: &Value) -> Result<RawWall, RawError> {
    let path = || format!("$.sectors[{sector}][3][{wall}]");
    let fields = v
        .as_array()
        .ok_or_else(|| schema(path(), "[x0, y0, x1, y1, portal]"))?;
    if fields.len() != WALL_FIELDS {
        return Err(RawError::WallShape {
            sector,
            wall,
            len: fields.len(),
        });
    }

    let coord = |k: usize| -> Result<i32, RawError> {
        fields[k]
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| schema(format!("{}[{k}]", path()), "a 32-bit integer coordinate"))
    };
    let portal = fields[4]
        .as_i64()
        .ok_or_else(|| schema(format!("{}[4]", path()), "an integer portal id"))?;

    Ok(RawWall {
        x0: coord(0)?,
        y0: coord(1)?,
        x1: coord(2)?,
        y1: coord(3)?,
        portal,
    })
}

fn start_from(v: &Value) -> Result<[f32; 3], RawError> {
    let fields = v
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| schema("$.start", "[x, y, angle]"))?;
    Ok([
        number(&fields[0], || "$.start[0]".into())?,
        number(&fields[1], || "$.start[1]".into())?,
        number(&fields[2], || "$.start[2]".into())?,
    ])
}

fn number(v: &Value, path: impl FnOnce() -> String) -> Result<f32, RawError> {
    v.as_f64()
        .map(|n| n as f32)
        .ok_or_else(|| schema(path(), "a number"))
}

/*=======================================================================*/
/*                                Tests                                  */
/*=======================================================================*/

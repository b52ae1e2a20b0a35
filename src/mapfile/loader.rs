// ──────────────────────────────────────────────────────────────────────────
// mapfile/loader.rs
//
//  *   level file (JSON)   ──>  raw::RawLevel   ──╮
//  *   LevelLimits                                │  --->  world::Level
//                                                 ╯
// Every check runs before the Level is assembled, so a failed load never
// leaves a half-built map behind.
// ──────────────────────────────────────────────────────────────────────────

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use glam::{ivec2, vec2};
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    mapfile::raw::{self, RawError, RawLevel},
    world::{Level, NO_SECTOR, Sector, SectorId, Wall},
};

/*──────────────────────────── Limits ───────────────────────────────*/

/// Load-time capacities for one level.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LevelLimits {
    /// also the largest accepted sector id
    pub max_sectors: usize,
    pub max_walls_per_sector: usize,
    /// reject portals whose target has no wall leading back
    pub require_reciprocal_portals: bool,
}

impl Default for LevelLimits {
    fn default() -> Self {
        Self {
            max_sectors: 128,
            max_walls_per_sector: 64,
            require_reciprocal_portals: false,
        }
    }
}

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read level file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Raw(#[from] RawError),

    #[error("level has no sectors")]
    Empty,

    #[error("{count} sectors exceed the limit of {max}")]
    TooManySectors { count: usize, max: usize },

    #[error("sector {sector} has {count} walls, limit is {max}")]
    TooManyWalls {
        sector: SectorId,
        count: usize,
        max: usize,
    },

    #[error("sector {sector} has {count} walls, at least 3 are needed")]
    TooFewWalls { sector: SectorId, count: usize },

    #[error("sector id {id} outside 1..={max}")]
    BadSectorId { id: i64, max: usize },

    #[error("sector id {0} defined twice")]
    DuplicateSector(SectorId),

    #[error("sector {sector} wall #{wall}: portal to unknown sector {target}")]
    BadPortal {
        sector: SectorId,
        wall: usize,
        target: i64,
    },

    #[error("sector {sector} wall #{wall}: portal leads back into its own sector")]
    SelfPortal { sector: SectorId, wall: usize },

    #[error("sector {sector} wall #{wall}: sector {target} has no portal back")]
    OneWayPortal {
        sector: SectorId,
        wall: usize,
        target: SectorId,
    },
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Read and validate the level file at `path`.
///
/// The level is named after the file stem.
pub fn load_level(path: impl AsRef<Path>, limits: &LevelLimits) -> Result<Level, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "level".into());
    parse_level(&name, &text, limits)
}

/// Validate an in-memory level document.
pub fn parse_level(name: &str, text: &str, limits: &LevelLimits) -> Result<Level, LoadError> {
    let raw = raw::parse_raw(text)?;
    build_level(name, raw, limits)
}

/*====================================================================*/
/*                       Validation                                   */
/*====================================================================*/

fn build_level(name: &str, raw: RawLevel, limits: &LevelLimits) -> Result<Level, LoadError> {
    if raw.sectors.is_empty() {
        return Err(LoadError::Empty);
    }
    if raw.sectors.len() > limits.max_sectors {
        return Err(LoadError::TooManySectors {
            count: raw.sectors.len(),
            max: limits.max_sectors,
        });
    }

    /*----- 1. ids and per-sector wall counts ----------------------------*/
    let max_id = limits.max_sectors.min(SectorId::MAX as usize);
    let mut ids: HashSet<SectorId> = HashSet::with_capacity(raw.sectors.len());
    for s in &raw.sectors {
        let id = sector_id(s.id, max_id).ok_or(LoadError::BadSectorId {
            id: s.id,
            max: max_id,
        })?;
        if !ids.insert(id) {
            return Err(LoadError::DuplicateSector(id));
        }
        if s.walls.len() > limits.max_walls_per_sector {
            return Err(LoadError::TooManyWalls {
                sector: id,
                count: s.walls.len(),
                max: limits.max_walls_per_sector,
            });
        }
        if s.walls.len() < 3 {
            return Err(LoadError::TooFewWalls {
                sector: id,
                count: s.walls.len(),
            });
        }
    }

    /*----- 2. walls, portals must point at a loaded sector --------------*/
    let sectors: Vec<Sector> = raw
        .sectors
        .into_iter()
        .map(|s| {
            let id = s.id as SectorId;
            let walls = s
                .walls
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let portal = match w.portal {
                        0 => NO_SECTOR,
                        t => sector_id(t, max_id)
                            .filter(|t| ids.contains(t))
                            .ok_or(LoadError::BadPortal {
                                sector: id,
                                wall: i,
                                target: t,
                            })?,
                    };
                    if portal == id {
                        return Err(LoadError::SelfPortal {
                            sector: id,
                            wall: i,
                        });
                    }
                    Ok(Wall {
                        a: ivec2(w.x0, w.y0),
                        b: ivec2(w.x1, w.y1),
                        portal,
                    })
                })
                .collect::<Result<Vec<_>, LoadError>>()?;
            Ok(Sector {
                id,
                floor_h: s.floor,
                ceil_h: s.ceil,
                walls,
            })
        })
        .collect::<Result<_, LoadError>>()?;

    let mut level = Level::from_sectors(name.to_string(), sectors);

    /*----- 3. soft checks: winding and portal reciprocity --------------*/
    for sector in level.sectors() {
        if sector.signed_area2() < 0.0 {
            warn!("sector {} is wound clockwise; it will render inside out", sector.id);
        }
        for (i, wall) in sector.walls.iter().enumerate() {
            let Some(target) = wall.portal() else {
                continue;
            };
            let reciprocal = level
                .sector(target)
                .is_some_and(|t| t.walls.iter().any(|w| w.portal == sector.id));
            if reciprocal {
                continue;
            }
            if limits.require_reciprocal_portals {
                return Err(LoadError::OneWayPortal {
                    sector: sector.id,
                    wall: i,
                    target,
                });
            }
            warn!(
                "sector {} wall #{i}: one-way portal into sector {target}",
                sector.id
            );
        }
    }

    level.start = raw.start.map(|[x, y, deg]| (vec2(x, y), deg.to_radians()));

    info!(
        "loaded level `{}`: {} sectors, {} walls",
        level.name,
        level.sector_count(),
        level.wall_count()
    );
    Ok(level)
}

/// `n` as a sector id in `1..=max`.
fn sector_id(n: i64, max: usize) -> Option<SectorId> {
    (n >= 1 && n as u64 <= max as u64).then_some(n as SectorId)
}

/*====================================================================*/
/*                              Tests                                 */
/*====================================================================*/

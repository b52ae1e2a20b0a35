use glam::{IVec2, Vec2};

use crate::math::point_side;

/// Sector handle as written in the level file. `0` is never a real sector.
pub type SectorId = u16;

/// "No sector" / "no portal" sentinel.
pub const NO_SECTOR: SectorId = 0;

/// Runtime snapshot of one map (immutable after load).
///
/// Sectors are stored by id; slot 0 is always empty so that a portal value
/// of [`NO_SECTOR`] can never resolve to geometry.
#[derive(Debug, Default)]
pub struct Level {
    pub name: String,
    pub(crate) sectors: Vec<Option<Sector>>,
    /// optional player start `(position, heading in radians)`
    pub start: Option<(Vec2, f32)>,
}

/*--------------------------- sectors -------------------------------*/

/// Convex room with flat floor/ceiling and a counter-clockwise wall loop.
#[derive(Clone, Debug)]
pub struct Sector {
    pub id: SectorId,
    pub floor_h: f32,
    pub ceil_h: f32,
    pub walls: Vec<Wall>,
}

/*---------------------------- walls --------------------------------*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    pub a: IVec2,
    pub b: IVec2,
    /// sector on the far side, [`NO_SECTOR`] for a solid wall
    pub portal: SectorId,
}

impl Wall {
    #[inline]
    pub fn portal(&self) -> Option<SectorId> {
        (self.portal != NO_SECTOR).then_some(self.portal)
    }

    #[inline]
    pub fn is_portal(&self) -> bool {
        self.portal != NO_SECTOR
    }

    /// Endpoints as floats, `(a, b)`.
    #[inline]
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.a.as_vec2(), self.b.as_vec2())
    }
}

impl Sector {
    /// Inclusive point-in-convex-polygon test: points on an edge count as
    /// inside.
    pub fn contains(&self, p: Vec2) -> bool {
        !self.walls.is_empty()
            && self.walls.iter().all(|w| {
                let (a, b) = w.endpoints();
                point_side(p, a, b) <= 0.0
            })
    }

    /// Twice the signed area of the wall loop (positive = counter-clockwise).
    pub fn signed_area2(&self) -> f32 {
        self.walls
            .iter()
            .map(|w| {
                let (a, b) = w.endpoints();
                a.perp_dot(b)
            })
            .sum()
    }

    /// Average of the wall start points.
    pub fn centroid(&self) -> Vec2 {
        if self.walls.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.walls.iter().map(|w| w.a.as_vec2()).sum();
        sum / self.walls.len() as f32
    }
}

impl Level {
    /// Build a level from already-validated sectors (see `mapfile::loader`).
    pub(crate) fn from_sectors(name: String, sectors: Vec<Sector>) -> Self {
        let max_id = sectors.iter().map(|s| s.id).max().unwrap_or(NO_SECTOR);
        let mut slots: Vec<Option<Sector>> = vec![None; max_id as usize + 1];
        for s in sectors {
            let id = s.id as usize;
            slots[id] = Some(s);
        }
        Self {
            name,
            sectors: slots,
            start: None,
        }
    }

    /// Sector `id`, or `None` for the sentinel and unknown ids.
    #[inline]
    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id as usize).and_then(Option::as_ref)
    }

    /// Every populated sector, in ascending id order.
    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.iter().flatten()
    }

    pub fn sector_count(&self) -> usize {
        self.sectors().count()
    }

    pub fn wall_count(&self) -> usize {
        self.sectors().map(|s| s.walls.len()).sum()
    }

    /// One past the largest sector id; sizes per-frame lookup tables.
    #[inline]
    pub fn id_bound(&self) -> usize {
        self.sectors.len()
    }

    /// Brute-force scan for the first sector containing `p`.
    ///
    /// Only for bootstrapping; per-tick tracking goes through
    /// [`Level::locate`](crate::world::Level::locate).
    pub fn sector_at(&self, p: Vec2) -> Option<SectorId> {
        self.sectors().find(|s| s.contains(p)).map(|s| s.id)
    }
}

use std::collections::VecDeque;

use glam::Vec2;
use thiserror::Error;

use super::{Level, SectorId};

/// Why a position could not be attributed to a sector.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// Search exhausted every sector reachable from `from`.
    #[error("point is outside every sector reachable from sector {from}")]
    NotFound { from: SectorId },

    /// More sectors were pending than the worklist can hold.
    #[error("sector search worklist overflow (capacity {capacity})")]
    WorklistOverflow { capacity: usize },
}

// ──────────────────────────────────────────────────────────────────────────
//                       Level – sector tracking
// ──────────────────────────────────────────────────────────────────────────
impl Level {
    /// Breadth-first search over the portal graph for the sector holding `p`,
    /// starting at `from` (usually the camera's last known sector).
    ///
    /// Sectors are tested in FIFO order, so on a shared edge the sector
    /// closest to `from` in portal hops wins; ties go by wall order.
    /// `capacity` bounds the number of pending sectors.
    pub fn locate(&self, from: SectorId, p: Vec2, capacity: usize) -> Result<SectorId, LocateError> {
        let Some(first) = self.sector(from) else {
            return Err(LocateError::NotFound { from });
        };
        if capacity == 0 {
            return Err(LocateError::WorklistOverflow { capacity });
        }

        let mut visited = vec![false; self.id_bound()];
        let mut queue: VecDeque<SectorId> = VecDeque::with_capacity(capacity);
        visited[first.id as usize] = true;
        queue.push_back(first.id);

        while let Some(id) = queue.pop_front() {
            // ids in the queue were checked against the level when enqueued
            let Some(sector) = self.sector(id) else {
                continue;
            };
            if sector.contains(p) {
                return Ok(id);
            }

            for next in sector.walls.iter().filter_map(|w| w.portal()) {
                let Some(seen) = visited.get_mut(next as usize) else {
                    continue;
                };
                if *seen {
                    continue;
                }
                if queue.len() == capacity {
                    return Err(LocateError::WorklistOverflow { capacity });
                }
                *seen = true;
                queue.push_back(next);
            }
        }

        Err(LocateError::NotFound { from })
    }
}

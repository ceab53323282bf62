//! Breadth-first portal walk: which walls are visible this frame, in the
//! order the column rasterizer must consume them.

use std::collections::VecDeque;

use super::clip::{ClippedWall, clip_to_fov};
use super::frame::RenderContext;
use crate::world::{SectorId, WallId, geometry::side_of};

/// One wall that survived culling and clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleWall {
    pub wall: WallId,
    /// Sector whose pass produced this wall.
    pub sector: SectorId,
    pub portal: Option<SectorId>,
    pub clipped: ClippedWall,
}

/// Bounded FIFO of sectors plus a visited set.
///
/// Every sector is queued at most once; once `capacity` sectors have been
/// queued further pushes are dropped.
#[derive(Debug)]
pub struct VisQueue {
    queue: VecDeque<SectorId>,
    visited: Vec<bool>,
    queued: usize,
    capacity: usize,
}

impl VisQueue {
    pub fn new(sector_count: usize, capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity.min(sector_count)),
            visited: vec![false; sector_count],
            queued: 0,
            capacity,
        }
    }

    /// Queue `id` unless it was already seen or the queue is full.
    pub fn push(&mut self, id: SectorId) -> bool {
        let Some(seen) = self.visited.get_mut(id as usize) else {
            return false;
        };
        if *seen {
            return false;
        }
        if self.queued >= self.capacity {
            log::trace!("visibility queue full, dropping sector {id}");
            return false;
        }
        *seen = true;
        self.queued += 1;
        self.queue.push_back(id);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<SectorId> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn is_visited(&self, id: SectorId) -> bool {
        self.visited.get(id as usize).copied().unwrap_or(false)
    }

    /// Sectors queued so far this frame.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queued
    }
}

/// Result of one portal walk.
#[derive(Debug, Default)]
pub struct Visibility {
    /// Sectors in discovery (= processing) order.
    pub sectors: Vec<SectorId>,
    pub walls: Vec<VisibleWall>,
}

/// Walk the sector graph from the camera's sector.
///
/// For each dequeued sector its walls are visited in stored order: back-faces
/// are skipped, the rest are moved to camera space and clipped to the view.
/// A surviving portal queues its far sector.
pub fn collect_visible_walls(ctx: &RenderContext) -> Visibility {
    let world = ctx.world;
    let cam = ctx.camera;
    let mut vis = Visibility::default();

    let mut queue = VisQueue::new(world.sectors.len(), ctx.config.max_sectors);
    queue.push(cam.sector);

    while let Some(sector_id) = queue.pop() {
        let Some(sector) = world.sector(sector_id) else {
            continue;
        };
        vis.sectors.push(sector_id);

        for (wall_id, wall) in world.walls_of(sector) {
            // Back-face: the eye must be strictly on the interior side.
            if side_of(cam.pos, wall.a, wall.b) <= 0.0 {
                continue;
            }

            let Some(clipped) = clip_to_fov(
                cam.to_cam(wall.a),
                cam.to_cam(wall.b),
                ctx.screen.half_fov,
                ctx.config.ray_length,
            ) else {
                continue;
            };

            if let Some(next) = wall.portal {
                queue.push(next);
            }

            vis.walls.push(VisibleWall {
                wall: wall_id,
                sector: sector_id,
                portal: wall.portal,
                clipped,
            });
        }
    }

    vis
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_duplicates() {
        let mut q = VisQueue::new(4, 8);
        assert!(q.push(2));
        assert!(!q.push(2));
        assert!(q.is_visited(2));
        assert!(!q.is_visited(1));
        assert_eq!(q.pop(), Some(2));
        // Still visited after it has been popped.
        assert!(!q.push(2));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn push_respects_capacity() {
        let mut q = VisQueue::new(10, 3);
        for id in 0..10 {
            q.push(id);
        }
        assert_eq!(q.queued(), 3);
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn push_ignores_unknown_sectors() {
        let mut q = VisQueue::new(2, 8);
        assert!(!q.push(5));
        assert_eq!(q.queued(), 0);
    }

    #[test]
    fn fifo_order() {
        let mut q = VisQueue::new(5, 5);
        for id in [3, 1, 4] {
            q.push(id);
        }
        assert_eq!(q.pop(), Some(3));
        q.push(0);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(4));
        assert_eq!(q.pop(), Some(0));
    }
}

//! Collision Detection and Resolution
//!
//! The player body and the coins are axis-aligned boxes; obstacle tiles are
//! the static geometry. Movement is swept one axis at a time and clamped
//! against the first collidable tile in its path, which is what lets the
//! player slide along walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::map::Tilemap;

/// Axis-aligned bounding box stored as center + half-extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Box center in map space.
    pub center: Vec2,
    /// Half of the box size on each axis.
    pub half: Vec2,
}

impl Aabb {
    /// Build a box from its center and full size.
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap test: boxes that only touch edges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_min = self.min();
        let a_max = self.max();
        let b_min = other.min();
        let b_max = other.max();

        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Move `body` by `delta` against the map's obstacle tiles.
///
/// The X component is swept and clamped first, then the Y component from
/// the resolved X position. Assumes the starting box is not already inside
/// an obstacle tile. Returns the resolved center position.
pub fn move_rect(map: &Tilemap, body: Aabb, delta: Vec2) -> Vec2 {
    let mut pos = body.center;

    if delta.x != 0.0 {
        pos.x = sweep_axis(map, pos, body.half, delta.x, Axis::X);
    }
    if delta.y != 0.0 {
        pos.y = sweep_axis(map, pos, body.half, delta.y, Axis::Y);
    }

    pos
}

/// Sweep the box along one axis, returning the clamped center coordinate.
///
/// Candidate tiles come from the region the leading edge travels through,
/// so a step larger than a tile cannot tunnel.
fn sweep_axis(map: &Tilemap, start: Vec2, half: Vec2, delta: f32, axis: Axis) -> f32 {
    let start_coord = match axis {
        Axis::X => start.x,
        Axis::Y => start.y,
    };
    let half_axis = match axis {
        Axis::X => half.x,
        Axis::Y => half.y,
    };
    let mut end = start_coord + delta;

    // Cross-axis extent of the box, unchanged during this sweep
    let (band_min, band_max) = match axis {
        Axis::X => (start.y - half.y, start.y + half.y),
        Axis::Y => (start.x - half.x, start.x + half.x),
    };

    // Interval travelled by the leading edge
    let (sweep_min, sweep_max) = if delta > 0.0 {
        (start_coord + half_axis, end + half_axis)
    } else {
        (end - half_axis, start_coord - half_axis)
    };

    let (region_min, region_max) = match axis {
        Axis::X => (
            Vec2::new(sweep_min, band_min),
            Vec2::new(sweep_max, band_max),
        ),
        Axis::Y => (
            Vec2::new(band_min, sweep_min),
            Vec2::new(band_max, sweep_max),
        ),
    };

    let Some((col0, row0, col1, row1)) = map.cells_overlapping(region_min, region_max) else {
        return end;
    };

    for row in row0..=row1 {
        for col in col0..=col1 {
            if !map.obstacle_at(col, row) {
                continue;
            }
            let (tile_min, tile_max) = map.tile_bounds(col, row);

            match axis {
                Axis::X => {
                    if delta > 0.0 {
                        end = end.min(tile_min.x - half.x);
                    } else {
                        end = end.max(tile_max.x + half.x);
                    }
                }
                Axis::Y => {
                    if delta > 0.0 {
                        end = end.min(tile_min.y - half.y);
                    } else {
                        end = end.max(tile_max.y + half.y);
                    }
                }
            }
        }
    }

    end
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::Tilemap;

    /// 4x4 map, 16px tiles, with a wall column at col 2.
    fn wall_map() -> Tilemap {
        let ground = vec![1; 16];
        #[rustfmt::skip]
        let obstacles = vec![
            0, 0, 9, 0,
            0, 0, 9, 0,
            0, 0, 9, 0,
            0, 0, 9, 0,
        ];
        Tilemap::from_grids(4, 4, 16, 16, ground, obstacles).unwrap()
    }

    #[test]
    fn test_overlaps_strict() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let apart = Aabb::new(Vec2::new(30.0, 0.0), Vec2::splat(10.0));

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_free_movement_unblocked() {
        let map = wall_map();
        let body = Aabb::new(Vec2::new(8.0, 8.0), Vec2::splat(10.0));

        let pos = move_rect(&map, body, Vec2::new(4.0, 6.0));
        assert_eq!(pos, Vec2::new(12.0, 14.0));
    }

    #[test]
    fn test_movement_clamped_by_wall() {
        let map = wall_map();
        // Wall column spans x in [32, 48)
        let body = Aabb::new(Vec2::new(20.0, 20.0), Vec2::splat(10.0));

        // A step bigger than a tile still stops flush against the wall:
        // 32 - 5 = 27, no tunneling
        let pos = move_rect(&map, body, Vec2::new(40.0, 0.0));
        assert_eq!(pos.x, 27.0);
        assert_eq!(pos.y, 20.0);
    }

    #[test]
    fn test_movement_clamped_from_right() {
        let map = wall_map();
        let body = Aabb::new(Vec2::new(60.0, 20.0), Vec2::splat(10.0));

        // Moving left stops at the wall's right face: 48 + 5 = 53
        let pos = move_rect(&map, body, Vec2::new(-40.0, 0.0));
        assert_eq!(pos.x, 53.0);
    }

    #[test]
    fn test_flush_body_stays_put() {
        let map = wall_map();
        // Right edge already exactly at the wall face x = 32
        let body = Aabb::new(Vec2::new(27.0, 20.0), Vec2::splat(10.0));

        let pos = move_rect(&map, body, Vec2::new(5.0, 0.0));
        assert_eq!(pos.x, 27.0);
    }

    #[test]
    fn test_slide_along_wall() {
        let map = wall_map();
        let body = Aabb::new(Vec2::new(27.0, 20.0), Vec2::splat(10.0));

        // Diagonal input: X stays clamped, Y passes through
        let pos = move_rect(&map, body, Vec2::new(5.0, 8.0));
        assert_eq!(pos.x, 27.0);
        assert_eq!(pos.y, 28.0);
    }

    #[test]
    fn test_movement_off_map_is_free() {
        let map = wall_map();
        let body = Aabb::new(Vec2::new(8.0, 8.0), Vec2::splat(10.0));

        // Nothing outside the grid blocks movement
        let pos = move_rect(&map, body, Vec2::new(-100.0, 0.0));
        assert_eq!(pos.x, -92.0);
    }
}

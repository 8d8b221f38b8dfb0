//! Tile Map
//!
//! Two tile layers over a fixed-size grid: `Ground` is decoration,
//! `Obstacles` is the static collision geometry. Collision is by exclusion:
//! every non-empty obstacle tile collides. World queries treat points
//! outside the grid as having no tile, so they never collide either.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the decorative tile layer in a map file.
pub const GROUND_LAYER: &str = "Ground";

/// Name of the collidable tile layer in a map file.
pub const OBSTACLES_LAYER: &str = "Obstacles";

/// Errors produced while loading a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file is not valid JSON for the expected structure.
    #[error("malformed map json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required tile layer is missing.
    #[error("map is missing tile layer {0:?}")]
    MissingLayer(&'static str),

    /// A layer's tile count does not match the map dimensions.
    #[error("layer {layer:?} has {actual} tiles, expected {expected}")]
    LayerSizeMismatch {
        /// Offending layer name.
        layer: String,
        /// Tiles implied by width * height.
        expected: usize,
        /// Tiles actually present.
        actual: usize,
    },

    /// Tile dimensions of zero would make every world query divide by zero.
    #[error("tile dimensions must be non-zero")]
    ZeroTileSize,
}

/// The subset of a Tiled JSON export the game reads.
#[derive(Debug, Deserialize)]
struct TiledMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<TiledLayer>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    name: String,
    #[serde(default)]
    data: Vec<u32>,
}

/// A loaded tile map.
///
/// Tile ids are stored row-major, 0 meaning "no tile". Pixel coordinates
/// are map space: origin at the top-left corner, y growing downward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tilemap {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    ground: Vec<u32>,
    obstacles: Vec<u32>,
}

impl Tilemap {
    /// Parse a Tiled-style JSON map.
    ///
    /// Requires a `Ground` and an `Obstacles` tile layer whose `data`
    /// length matches `width * height`. Extra layers are ignored.
    pub fn from_tiled_json(json: &str) -> Result<Self, MapError> {
        let raw: TiledMap = serde_json::from_str(json)?;

        let mut ground = None;
        let mut obstacles = None;
        for layer in raw.layers {
            let slot = match layer.name.as_str() {
                GROUND_LAYER => &mut ground,
                OBSTACLES_LAYER => &mut obstacles,
                _ => continue,
            };
            *slot = Some(layer.data);
        }

        Self::from_grids(
            raw.width,
            raw.height,
            raw.tilewidth,
            raw.tileheight,
            ground.ok_or(MapError::MissingLayer(GROUND_LAYER))?,
            obstacles.ok_or(MapError::MissingLayer(OBSTACLES_LAYER))?,
        )
    }

    /// Build a map from raw tile grids.
    pub fn from_grids(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        ground: Vec<u32>,
        obstacles: Vec<u32>,
    ) -> Result<Self, MapError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(MapError::ZeroTileSize);
        }

        let expected = (width as usize) * (height as usize);
        for (name, layer) in [(GROUND_LAYER, &ground), (OBSTACLES_LAYER, &obstacles)] {
            if layer.len() != expected {
                return Err(MapError::LayerSizeMismatch {
                    layer: name.to_string(),
                    expected,
                    actual: layer.len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            ground,
            obstacles,
        })
    }

    /// Built-in 40x40 map used by the headless demo and tests: a walled
    /// grove with a few interior hedges.
    pub fn demo_grove() -> Self {
        const SIZE: u32 = 40;
        let cells = (SIZE * SIZE) as usize;

        let mut ground = vec![1u32; cells];
        for row in 0..SIZE {
            for col in 0..SIZE {
                // Sprinkle a second grass tile for visual variety
                if (col * 7 + row * 13) % 19 == 0 {
                    ground[(row * SIZE + col) as usize] = 3;
                }
            }
        }

        let mut obstacles = vec![0u32; cells];
        let mut wall = |col: u32, row: u32| {
            obstacles[(row * SIZE + col) as usize] = 2;
        };

        // Border wall
        for col in 0..SIZE {
            wall(col, 0);
            wall(col, SIZE - 1);
        }
        for row in 0..SIZE {
            wall(0, row);
            wall(SIZE - 1, row);
        }

        // Interior hedges
        for col in 4..18 {
            wall(col, 12);
        }
        for col in 22..36 {
            wall(col, 26);
        }
        for row in 6..16 {
            wall(20, row);
        }

        Self::from_grids(SIZE, SIZE, 16, 16, ground, obstacles)
            .expect("demo map dimensions are consistent")
    }

    /// Map width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Map width in pixels.
    pub fn width_px(&self) -> f32 {
        (self.width * self.tile_width) as f32
    }

    /// Map height in pixels.
    pub fn height_px(&self) -> f32 {
        (self.height * self.tile_height) as f32
    }

    #[inline]
    fn idx(&self, col: u32, row: u32) -> usize {
        (row * self.width + col) as usize
    }

    /// Ground tile id at a cell, 0 when empty or out of bounds.
    pub fn ground_at(&self, col: u32, row: u32) -> u32 {
        if col >= self.width || row >= self.height {
            return 0;
        }
        self.ground[self.idx(col, row)]
    }

    /// Obstacle tile id at a cell, 0 when empty or out of bounds.
    pub fn obstacle_tile_at(&self, col: u32, row: u32) -> u32 {
        if col >= self.width || row >= self.height {
            return 0;
        }
        self.obstacles[self.idx(col, row)]
    }

    /// True when the cell holds a collidable obstacle tile.
    #[inline]
    pub fn obstacle_at(&self, col: u32, row: u32) -> bool {
        self.obstacle_tile_at(col, row) != 0
    }

    /// Cell under a world point, if the point lies on the map.
    pub fn tile_at_point(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.tile_width as f32) as u32;
        let row = (y / self.tile_height as f32) as u32;
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((col, row))
    }

    /// True when the world point sits on a collidable tile.
    ///
    /// A point with no tile underneath (outside the map) does not collide.
    pub fn blocks_point(&self, x: f32, y: f32) -> bool {
        self.tile_at_point(x, y)
            .map(|(col, row)| self.obstacle_at(col, row))
            .unwrap_or(false)
    }

    /// Pixel bounds of a cell as (min, max).
    pub fn tile_bounds(&self, col: u32, row: u32) -> (Vec2, Vec2) {
        let min = Vec2::new(
            (col * self.tile_width) as f32,
            (row * self.tile_height) as f32,
        );
        let max = min + Vec2::new(self.tile_width as f32, self.tile_height as f32);
        (min, max)
    }

    /// Pixel center of a cell.
    pub fn cell_center(&self, col: u32, row: u32) -> Vec2 {
        let (min, max) = self.tile_bounds(col, row);
        (min + max) * 0.5
    }

    /// Inclusive cell ranges `(col0, row0, col1, row1)` overlapped by a
    /// pixel rectangle, or None when the rectangle misses the map.
    ///
    /// Overlap is strict: a rectangle whose edge only touches a cell
    /// boundary does not include the cell beyond it.
    pub fn cells_overlapping(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if max.x <= 0.0 || max.y <= 0.0 || min.x >= self.width_px() || min.y >= self.height_px() {
            return None;
        }

        let tw = self.tile_width as f32;
        let th = self.tile_height as f32;

        let col0 = (min.x.max(0.0) / tw) as u32;
        let row0 = (min.y.max(0.0) / th) as u32;
        let col1 = ((max.x.min(self.width_px()) / tw).ceil() as u32)
            .saturating_sub(1)
            .min(self.width - 1);
        let row1 = ((max.y.min(self.height_px()) / th).ceil() as u32)
            .saturating_sub(1)
            .min(self.height - 1);

        Some((col0, row0, col1, row1))
    }

    /// Cells with no obstacle tile, in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        let height = self.height;
        (0..height)
            .flat_map(move |row| (0..width).map(move |col| (col, row)))
            .filter(|&(col, row)| !self.obstacle_at(col, row))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_MAP_JSON: &str = r#"{
        "width": 3,
        "height": 2,
        "tilewidth": 16,
        "tileheight": 16,
        "layers": [
            { "name": "Ground", "data": [1, 1, 1, 1, 1, 1] },
            { "name": "Obstacles", "data": [5, 0, 0, 0, 0, 7] },
            { "name": "Decals", "data": [0, 0, 0, 0, 0, 0] }
        ]
    }"#;

    #[test]
    fn test_parse_tiled_json() {
        let map = Tilemap::from_tiled_json(TINY_MAP_JSON).unwrap();

        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.width_px(), 48.0);
        assert_eq!(map.height_px(), 32.0);

        // Collision by exclusion: any non-zero obstacle tile collides
        assert!(map.obstacle_at(0, 0));
        assert!(map.obstacle_at(2, 1));
        assert!(!map.obstacle_at(1, 0));
    }

    #[test]
    fn test_parse_rejects_missing_layer() {
        let json = r#"{
            "width": 1, "height": 1, "tilewidth": 16, "tileheight": 16,
            "layers": [{ "name": "Ground", "data": [1] }]
        }"#;

        match Tilemap::from_tiled_json(json) {
            Err(MapError::MissingLayer(name)) => assert_eq!(name, OBSTACLES_LAYER),
            other => panic!("expected MissingLayer, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_size_mismatch() {
        let json = r#"{
            "width": 2, "height": 2, "tilewidth": 16, "tileheight": 16,
            "layers": [
                { "name": "Ground", "data": [1, 1, 1, 1] },
                { "name": "Obstacles", "data": [0, 0] }
            ]
        }"#;

        assert!(matches!(
            Tilemap::from_tiled_json(json),
            Err(MapError::LayerSizeMismatch { expected: 4, actual: 2, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_zero_tile_size() {
        let json = r#"{
            "width": 1, "height": 1, "tilewidth": 0, "tileheight": 16,
            "layers": [
                { "name": "Ground", "data": [1] },
                { "name": "Obstacles", "data": [0] }
            ]
        }"#;

        assert!(matches!(
            Tilemap::from_tiled_json(json),
            Err(MapError::ZeroTileSize)
        ));
    }

    #[test]
    fn test_point_queries() {
        let map = Tilemap::from_tiled_json(TINY_MAP_JSON).unwrap();

        // Inside the obstacle tile at (0, 0)
        assert!(map.blocks_point(8.0, 8.0));
        // Inside a free tile
        assert!(!map.blocks_point(24.0, 8.0));
        // Outside the map there is no tile, so nothing collides
        assert!(!map.blocks_point(-1.0, 8.0));
        assert!(!map.blocks_point(8.0, 100.0));
        assert_eq!(map.tile_at_point(1000.0, 8.0), None);
    }

    #[test]
    fn test_cells_overlapping_strictness() {
        let map = Tilemap::from_tiled_json(TINY_MAP_JSON).unwrap();

        // Rect fully inside cell (1, 0)
        let range = map
            .cells_overlapping(Vec2::new(18.0, 2.0), Vec2::new(30.0, 14.0))
            .unwrap();
        assert_eq!(range, (1, 0, 1, 0));

        // Rect whose right edge only touches x = 32 stays out of column 2
        let range = map
            .cells_overlapping(Vec2::new(18.0, 2.0), Vec2::new(32.0, 14.0))
            .unwrap();
        assert_eq!(range, (1, 0, 1, 0));

        // Nudged past the boundary it spills into column 2
        let range = map
            .cells_overlapping(Vec2::new(18.0, 2.0), Vec2::new(32.5, 14.0))
            .unwrap();
        assert_eq!(range, (1, 0, 2, 0));

        // Entirely off-map
        assert_eq!(
            map.cells_overlapping(Vec2::new(-20.0, 0.0), Vec2::new(-4.0, 10.0)),
            None
        );
    }

    #[test]
    fn test_demo_grove_shape() {
        let map = Tilemap::demo_grove();

        assert_eq!(map.width_px(), 640.0);
        assert_eq!(map.height_px(), 640.0);

        // Border wall is closed
        for col in 0..map.width() {
            assert!(map.obstacle_at(col, 0));
            assert!(map.obstacle_at(col, map.height() - 1));
        }
        for row in 0..map.height() {
            assert!(map.obstacle_at(0, row));
            assert!(map.obstacle_at(map.width() - 1, row));
        }

        // The spawn cell is walkable
        assert!(!map.blocks_point(50.0, 50.0));

        // Interior hedges exist
        assert!(map.obstacle_at(10, 12));
        assert!(map.obstacle_at(20, 10));
    }

    #[test]
    fn test_free_cells_exclude_obstacles() {
        let map = Tilemap::demo_grove();

        let free: Vec<_> = map.free_cells().collect();
        assert!(!free.is_empty());
        for (col, row) in free {
            assert!(!map.obstacle_at(col, row));
        }
    }
}

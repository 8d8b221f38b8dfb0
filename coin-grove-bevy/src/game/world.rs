//! Map loading and tile rendering

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use coin_grove::Tilemap;

/// Map file the client looks for on startup.
pub const MAP_PATH: &str = "assets/maps/grove.json";

/// Load the map file, falling back to the built-in map when it is missing
/// or malformed.
pub fn load_map() -> Tilemap {
    // Relative to the working directory first, then to this crate, so both
    // a packaged binary and `cargo run` from the workspace root find it
    let candidates = [
        PathBuf::from(MAP_PATH),
        Path::new(env!("CARGO_MANIFEST_DIR")).join(MAP_PATH),
    ];

    for path in &candidates {
        let Ok(json) = fs::read_to_string(path) else {
            continue;
        };
        match Tilemap::from_tiled_json(&json) {
            Ok(map) => {
                info!("Loaded map from {}", path.display());
                return map;
            }
            Err(err) => {
                warn!("Map file {} is invalid ({}), using built-in map", path.display(), err);
                return Tilemap::demo_grove();
            }
        }
    }

    warn!("No map file found, using built-in map");
    Tilemap::demo_grove()
}

/// Map space is y-down from the top-left corner; rendering is y-up around
/// the map center.
pub fn map_to_world(map: &Tilemap, p: Vec2, z: f32) -> Vec3 {
    Vec3::new(p.x - map.width_px() * 0.5, map.height_px() * 0.5 - p.y, z)
}

/// Spawn one colored quad per tile, obstacles above the ground layer
pub fn spawn_tiles(commands: &mut Commands, map: &Tilemap) {
    let tile_size = Vec2::new(map.tile_width() as f32, map.tile_height() as f32);

    for row in 0..map.height() {
        for col in 0..map.width() {
            let center = map.cell_center(col, row);

            let ground = map.ground_at(col, row);
            if ground != 0 {
                commands.spawn((
                    Sprite {
                        color: ground_color(ground),
                        custom_size: Some(tile_size),
                        ..default()
                    },
                    Transform::from_translation(map_to_world(map, center, -10.0)),
                ));
            }

            let obstacle = map.obstacle_tile_at(col, row);
            if obstacle != 0 {
                commands.spawn((
                    Sprite {
                        color: obstacle_color(obstacle),
                        custom_size: Some(tile_size),
                        ..default()
                    },
                    Transform::from_translation(map_to_world(map, center, -5.0)),
                ));
            }
        }
    }

    info!("Spawned {}x{} tile grid", map.width(), map.height());
}

fn ground_color(gid: u32) -> Color {
    match gid {
        3 => Color::srgb(0.20, 0.38, 0.20), // darker grass patches
        _ => Color::srgb(0.24, 0.44, 0.23),
    }
}

fn obstacle_color(_gid: u32) -> Color {
    Color::srgb(0.36, 0.33, 0.29)
}

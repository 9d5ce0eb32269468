use std::path::PathBuf;

/// Grid dimensions (50x50 cells, bounded, no wraparound)
pub const GRID_WIDTH: u32 = 50;
pub const GRID_HEIGHT: u32 = 50;

/// Size of each cell on screen, in logical pixels
pub const CELL_SIZE: u32 = 10;

// ============================================
// Simulation speed
// ============================================

/// Time between generations when running
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;

/// Fastest allowed step interval
pub const MIN_UPDATE_INTERVAL_MS: u64 = 1;

/// Slowest allowed step interval
pub const MAX_UPDATE_INTERVAL_MS: u64 = 1000;

// ============================================
// Editing
// ============================================

/// Brush side length bounds, in cells
pub const MIN_CURSOR_SIZE: u32 = 1;
pub const MAX_CURSOR_SIZE: u32 = 10;

// ============================================
// Colors
// ============================================

/// Selectable cell colors as (name, sRGB)
pub const COLOR_PRESETS: [(&str, [u8; 3]); 8] = [
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("green", [0, 200, 0]),
    ("amber", [255, 176, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [220, 60, 200]),
    ("charcoal", [40, 40, 40]),
    ("navy", [16, 24, 64]),
];

/// Index into COLOR_PRESETS for alive cells
pub const DEFAULT_ALIVE_COLOR: usize = 0;

/// Index into COLOR_PRESETS for dead cells
pub const DEFAULT_DEAD_COLOR: usize = 1;

/// Grid line / background color
pub const BACKGROUND_COLOR: [u8; 3] = [120, 180, 255];

// ============================================
// Persistence
// ============================================

/// Grid dump written by save and read by load
pub const DEFAULT_SAVE_FILE: &str = "life_grid.json";

/// Environment variable overriding DEFAULT_SAVE_FILE
pub const SAVE_FILE_ENV: &str = "LIFE_GRID_FILE";

/// Resolve the save file location
pub fn save_path() -> PathBuf {
    std::env::var_os(SAVE_FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE))
}

//! Grid dump format.
//!
//! A saved grid is a JSON document:
//!
//! ```json
//! { "width": 3, "height": 2, "columns": ["01", "11", "00"] }
//! ```
//!
//! `columns[x]` holds the cells `(x, 0) .. (x, height - 1)`, `'1'` for alive
//! and `'0'` for dead. The declared dimensions let a load reject a dump taken
//! from a differently sized grid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::Grid;

const ALIVE: char = '1';
const DEAD: char = '0';

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid grid file: {0}")]
    Format(#[from] serde_json::Error),

    #[error(
        "grid file is {found_width}x{found_height}, expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("malformed grid data: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedGrid {
    width: u32,
    height: u32,
    columns: Vec<String>,
}

impl SavedGrid {
    fn from_grid(grid: &Grid) -> Self {
        let height = grid.height() as usize;
        let columns = grid
            .cells()
            .chunks(height.max(1))
            .map(|column| {
                column
                    .iter()
                    .map(|&alive| if alive { ALIVE } else { DEAD })
                    .collect()
            })
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            columns,
        }
    }

    fn into_grid(self, width: u32, height: u32) -> Result<Grid, PersistenceError> {
        if self.width != width || self.height != height {
            return Err(PersistenceError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                found_width: self.width,
                found_height: self.height,
            });
        }

        if self.columns.len() != width as usize {
            return Err(PersistenceError::Malformed(format!(
                "expected {} columns, found {}",
                width,
                self.columns.len()
            )));
        }

        let mut cells = Vec::with_capacity((width * height) as usize);
        for (x, column) in self.columns.iter().enumerate() {
            let before = cells.len();
            for (y, c) in column.chars().enumerate() {
                match c {
                    ALIVE => cells.push(true),
                    DEAD => cells.push(false),
                    other => {
                        return Err(PersistenceError::Malformed(format!(
                            "unexpected {:?} at ({}, {})",
                            other, x, y
                        )))
                    }
                }
            }

            let found = cells.len() - before;
            if found != height as usize {
                return Err(PersistenceError::Malformed(format!(
                    "column {} has {} cells, expected {}",
                    x, found, height
                )));
            }
        }

        Grid::from_cells(width, height, cells)
            .ok_or_else(|| PersistenceError::Malformed("cell count mismatch".to_string()))
    }
}

/// Write `grid` to `path`, replacing any existing file
pub fn save_grid(grid: &Grid, path: &Path) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(&SavedGrid::from_grid(grid))?;
    fs::write(path, json).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a grid of the given dimensions from `path`
pub fn load_grid(path: &Path, width: u32, height: u32) -> Result<Grid, PersistenceError> {
    let data = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let saved: SavedGrid = serde_json::from_str(&data)?;
    saved.into_grid(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{GridStore, StepSource};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn write(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");

        let mut grid = Grid::new(3, 2);
        grid.set(0, 1, true);
        grid.set(1, 0, true);
        grid.set(1, 1, true);
        save_grid(&grid, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["width"], 3);
        assert_eq!(value["height"], 2);
        assert_eq!(value["columns"], serde_json::json!(["01", "11", "00"]));
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");

        let mut store = GridStore::new(50, 50);
        store.initialize_random_with(&mut StdRng::seed_from_u64(9));
        store.step(StepSource::Live);
        let saved = store.live().clone();
        store.save(&path).unwrap();

        store.clear();
        store.load(&path).unwrap();
        assert_eq!(store.live(), &saved);
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grid(&dir.path().join("absent.json"), 5, 5).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        write(&path, "not a grid");
        let err = load_grid(&path, 5, 5).unwrap_err();
        assert!(matches!(err, PersistenceError::Format(_)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        save_grid(&Grid::new(4, 4), &path).unwrap();

        let err = load_grid(&path, 5, 5).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::DimensionMismatch {
                found_width: 4,
                found_height: 4,
                ..
            }
        ));
        assert_eq!(err.to_string(), "grid file is 4x4, expected 5x5");
    }

    #[test]
    fn test_short_column_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        write(&path, r#"{"width":2,"height":2,"columns":["01","1"]}"#);
        let err = load_grid(&path, 2, 2).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed(_)));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        write(&path, r#"{"width":2,"height":2,"columns":["01"]}"#);
        let err = load_grid(&path, 2, 2).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed(_)));
    }

    #[test]
    fn test_bad_character_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        write(&path, r#"{"width":2,"height":2,"columns":["01","1x"]}"#);
        let err = load_grid(&path, 2, 2).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed(_)));
    }

    #[test]
    fn test_failed_load_leaves_grid_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        write(&path, r#"{"width":5,"height":5,"columns":["00000"]}"#);

        let mut store = GridStore::new(5, 5);
        store.initialize_random_with(&mut StdRng::seed_from_u64(5));
        let before = store.live().clone();

        assert!(store.load(&path).is_err());
        assert!(store.load(&dir.path().join("absent.json")).is_err());
        assert_eq!(store.live(), &before);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_save_load_round_trip(
            (width, height, cells) in (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
                (Just(w), Just(h), proptest::collection::vec(any::<bool>(), (w * h) as usize))
            })
        ) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("grid.json");
            let grid = Grid::from_cells(width, height, cells).unwrap();

            save_grid(&grid, &path).unwrap();
            let loaded = load_grid(&path, width, height).unwrap();
            prop_assert_eq!(loaded, grid);
        }
    }
}

use std::path::Path;

use rand::Rng;

use crate::simulation::persist::{self, PersistenceError};
use crate::simulation::rules;
use crate::simulation::Grid;

/// Which grid a step reads from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepSource {
    Live,
    Scratch,
}

/// Owns the live grid and the scratch snapshot
pub struct GridStore {
    live: Grid,
    scratch: Grid,
    /// Generations stepped since the last clear/randomize/load
    generation: u64,
}

impl GridStore {
    /// Create a store with both grids dead
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            live: Grid::new(width, height),
            scratch: Grid::new(width, height),
            generation: 0,
        }
    }

    /// Create a store with a randomized live grid
    pub fn new_random(width: u32, height: u32) -> Self {
        let mut store = Self::new(width, height);
        store.initialize_random();
        store
    }

    pub fn width(&self) -> u32 {
        self.live.width()
    }

    pub fn height(&self) -> u32 {
        self.live.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Borrow the live grid for rendering
    pub fn live(&self) -> &Grid {
        &self.live
    }

    #[allow(dead_code)]
    pub fn scratch(&self) -> &Grid {
        &self.scratch
    }

    /// Randomize the live grid from the thread-local RNG
    pub fn initialize_random(&mut self) {
        self.initialize_random_with(&mut rand::thread_rng());
    }

    /// Randomize the live grid from `rng`
    pub fn initialize_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.live.randomize(rng);
        self.generation = 0;
    }

    pub fn clear(&mut self) {
        self.live.fill(false);
        self.generation = 0;
    }

    #[allow(dead_code)]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.live.get(x, y)
    }

    pub fn set(&mut self, x: i32, y: i32, alive: bool) {
        self.live.set(x, y, alive);
    }

    pub fn toggle(&mut self, x: i32, y: i32) {
        self.live.toggle(x, y);
    }

    /// Copy the live grid verbatim into the scratch grid
    pub fn snapshot_into_scratch(&mut self) {
        self.scratch.clone_from(&self.live);
    }

    /// Advance one generation, reading from `source` and replacing the live grid.
    ///
    /// Stepping from `Scratch` leaves the scratch grid as it was; it is only
    /// meaningful right after [`GridStore::snapshot_into_scratch`]. Prefer
    /// [`GridStore::step_from_snapshot`], which does both.
    pub fn step(&mut self, source: StepSource) {
        let source = match source {
            StepSource::Live => &self.live,
            StepSource::Scratch => &self.scratch,
        };

        self.live = rules::next_generation(source);
        self.generation += 1;
    }

    /// Snapshot the live grid and step from the snapshot as one operation
    pub fn step_from_snapshot(&mut self) {
        self.snapshot_into_scratch();
        self.step(StepSource::Scratch);
    }

    /// Write the live grid to `path`
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persist::save_grid(&self.live, path)
    }

    /// Replace the live grid with the one stored at `path`.
    ///
    /// On error the live grid is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let grid = persist::load_grid(path, self.width(), self.height())?;
        self.live = grid;
        self.generation = 0;
        Ok(())
    }
}

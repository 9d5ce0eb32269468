use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{
    COLOR_PRESETS, DEFAULT_ALIVE_COLOR, DEFAULT_DEAD_COLOR, DEFAULT_UPDATE_INTERVAL_MS,
    MAX_UPDATE_INTERVAL_MS, MIN_UPDATE_INTERVAL_MS,
};
use crate::simulation::persist::PersistenceError;
use crate::simulation::{Brush, GridStore, StepSource};

/// Whether the timer advances the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    /// Resume requested; the next tick snapshots and steps, then runs normally
    PausedThenResuming,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "Running"),
            RunState::Paused => write!(f, "Paused"),
            RunState::PausedThenResuming => write!(f, "Resuming"),
        }
    }
}

/// Runtime-adjustable controls
#[derive(Clone, Debug)]
pub struct ControlSettings {
    pub update_interval: Duration,
    pub brush: Brush,
    /// Index into COLOR_PRESETS
    pub alive_color: usize,
    /// Index into COLOR_PRESETS
    pub dead_color: usize,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS),
            brush: Brush::default(),
            alive_color: DEFAULT_ALIVE_COLOR,
            dead_color: DEFAULT_DEAD_COLOR,
        }
    }
}

impl ControlSettings {
    pub fn alive_rgb(&self) -> [u8; 3] {
        COLOR_PRESETS[self.alive_color].1
    }

    pub fn dead_rgb(&self) -> [u8; 3] {
        COLOR_PRESETS[self.dead_color].1
    }

    /// Halve the step interval
    pub fn faster(&mut self) {
        self.set_interval_ms(self.update_interval.as_millis() as u64 / 2);
    }

    /// Double the step interval
    pub fn slower(&mut self) {
        self.set_interval_ms(self.update_interval.as_millis() as u64 * 2);
    }

    fn set_interval_ms(&mut self, millis: u64) {
        let millis = millis.clamp(MIN_UPDATE_INTERVAL_MS, MAX_UPDATE_INTERVAL_MS);
        self.update_interval = Duration::from_millis(millis);
    }

    /// Next alive color preset, skipping the current dead color
    pub fn cycle_alive_color(&mut self) {
        self.alive_color = next_preset(self.alive_color, self.dead_color);
    }

    /// Next dead color preset, skipping the current alive color
    pub fn cycle_dead_color(&mut self) {
        self.dead_color = next_preset(self.dead_color, self.alive_color);
    }
}

fn next_preset(current: usize, avoid: usize) -> usize {
    let next = (current + 1) % COLOR_PRESETS.len();
    if next == avoid {
        (next + 1) % COLOR_PRESETS.len()
    } else {
        next
    }
}

/// Simulation state owned by the event loop
pub struct Simulation {
    store: GridStore,
    state: RunState,
    last_step: Instant,
    save_path: PathBuf,
    pub settings: ControlSettings,
}

impl Simulation {
    pub fn new(store: GridStore, save_path: PathBuf, now: Instant) -> Self {
        Self {
            store,
            state: RunState::Running,
            last_step: now,
            save_path,
            settings: ControlSettings::default(),
        }
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn is_paused(&self) -> bool {
        self.state != RunState::Running
    }

    /// Pause when running, request a resume when paused
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::PausedThenResuming,
            RunState::PausedThenResuming => RunState::Paused,
        };
        log::info!("Simulation {}", self.state);
    }

    /// Advance the grid if the step interval has elapsed.
    ///
    /// Returns true when a generation was computed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_step) <= self.settings.update_interval {
            return false;
        }
        self.last_step = now;

        match self.state {
            RunState::Running => {
                self.store.step(StepSource::Live);
                true
            }
            RunState::PausedThenResuming => {
                self.store.step_from_snapshot();
                self.state = RunState::Running;
                true
            }
            RunState::Paused => false,
        }
    }

    /// Compute a single generation while paused
    pub fn step_once(&mut self) {
        if self.is_paused() {
            self.store.step(StepSource::Live);
            log::debug!("Single step to generation {}", self.store.generation());
        }
    }

    /// Paint the current brush at `(x, y)`
    pub fn paint(&mut self, x: i32, y: i32, alive: bool) {
        self.settings.brush.paint(&mut self.store, x, y, alive);
    }

    pub fn toggle_cell(&mut self, x: i32, y: i32) {
        self.store.toggle(x, y);
    }

    pub fn clear(&mut self) {
        self.store.clear();
        log::info!("Board cleared");
    }

    /// Randomize the board and start over
    pub fn restart(&mut self) {
        self.store.initialize_random();
        log::info!("Board randomized ({} live cells)", self.store.live().live_count());
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        match self.store.save(&self.save_path) {
            Ok(()) => {
                log::info!("Saved grid to {}", self.save_path.display());
                Ok(())
            }
            Err(e) => {
                log::error!("Save failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn load(&mut self) -> Result<(), PersistenceError> {
        match self.store.load(&self.save_path) {
            Ok(()) => {
                log::info!("Loaded grid from {}", self.save_path.display());
                Ok(())
            }
            Err(e) => {
                log::error!("Load failed: {}", e);
                Err(e)
            }
        }
    }
}

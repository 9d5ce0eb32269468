mod brush;
mod controller;
mod grid;
pub mod persist;
pub mod rules;
mod store;

pub use brush::{pointer_to_cell, Brush};
pub use controller::Simulation;
pub use grid::Grid;
pub use store::{GridStore, StepSource};

//! Conway's Game of Life on a bounded 50x50 grid, with mouse painting and
//! keyboard controls.

mod app;
mod config;
mod error;
mod gpu;
mod simulation;

use winit::event_loop::EventLoop;

use crate::app::App;
use crate::error::AppError;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    app.finish()
}

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{self, BACKGROUND_COLOR, CELL_SIZE, COLOR_PRESETS, GRID_HEIGHT, GRID_WIDTH};
use crate::error::AppError;
use crate::gpu::{GpuContext, GridBuffers, Palette, RenderPipeline};
use crate::simulation::{pointer_to_cell, GridStore, Simulation};

/// Mouse state tracked between events
#[derive(Default)]
struct PointerState {
    position: Option<(f64, f64)>,
    left_down: bool,
    right_down: bool,
}

impl PointerState {
    /// Paint color for the held button; left wins over right
    fn paint_state(&self) -> Option<bool> {
        if self.left_down {
            Some(true)
        } else if self.right_down {
            Some(false)
        } else {
            None
        }
    }
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    grid_buffers: Option<GridBuffers>,
    render_pipeline: Option<RenderPipeline>,
    simulation: Simulation,
    pointer: PointerState,
    show_grid_lines: bool,
    fps_counter: FpsCounter,
    fps: f64,
    startup_error: Option<AppError>,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            grid_buffers: None,
            render_pipeline: None,
            simulation: Simulation::new(
                GridStore::new_random(GRID_WIDTH, GRID_HEIGHT),
                config::save_path(),
                Instant::now(),
            ),
            pointer: PointerState::default(),
            show_grid_lines: true,
            fps_counter: FpsCounter::new(),
            fps: 0.0,
            startup_error: None,
        }
    }

    /// Outcome of the run once the event loop has returned
    pub fn finish(self) -> Result<(), AppError> {
        match self.startup_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Create the window and GPU resources
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Initializing Game of Life...");
        log::info!("Grid size: {}x{}", GRID_WIDTH, GRID_HEIGHT);

        let window_attrs = Window::default_attributes()
            .with_title("Game of Life")
            .with_inner_size(winit::dpi::LogicalSize::new(
                GRID_WIDTH * CELL_SIZE,
                GRID_HEIGHT * CELL_SIZE,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let grid_buffers = GridBuffers::new(&gpu.device, GRID_WIDTH, GRID_HEIGHT);
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());

        log::info!("Initialization complete!");
        self.log_controls();

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.grid_buffers = Some(grid_buffers);
        self.render_pipeline = Some(render_pipeline);
        self.update_title();
        Ok(())
    }

    fn log_controls(&self) {
        log::info!("Controls:");
        log::info!("  Left drag: Paint live cells");
        log::info!("  Right drag: Erase cells");
        log::info!("  Middle click: Toggle one cell");
        log::info!("  Space: Pause/resume");
        log::info!("  N: Single step while paused");
        log::info!("  C: Clear board");
        log::info!("  R: Restart with a random board");
        log::info!("  S/L: Save/load {}", self.simulation.save_path().display());
        log::info!("  [/]: Cursor size");
        log::info!("  -/=: Slower/faster");
        log::info!("  A/D: Cycle alive/dead color");
        log::info!("  G: Toggle grid lines");
        log::info!("  H: Show this help");
        log::info!("  Escape: Quit");
    }

    fn render(&mut self) {
        let (Some(gpu), Some(buffers), Some(render)) = (
            self.gpu.as_ref(),
            self.grid_buffers.as_mut(),
            self.render_pipeline.as_ref(),
        ) else {
            return;
        };

        let settings = &self.simulation.settings;
        let palette = Palette {
            alive: settings.alive_rgb(),
            dead: settings.dead_rgb(),
            line: BACKGROUND_COLOR,
        };
        buffers.update_render_params(
            &gpu.queue,
            palette,
            self.show_grid_lines,
            gpu.format().is_srgb(),
        );
        buffers.upload_cells(&gpu.queue, self.simulation.store().live());

        // Get surface texture
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = render.create_bind_group(
            &gpu.device,
            &buffers.cells_buffer,
            &buffers.render_params_buffer,
        );
        render.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            self.fps = fps;
            self.update_title();
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };

        let store = self.simulation.store();
        let settings = &self.simulation.settings;
        window.set_title(&format!(
            "Game of Life - Gen {} - {} alive - {} - {} ms - Cursor {} - {:.0} FPS",
            store.generation(),
            store.live().live_count(),
            self.simulation.state(),
            settings.update_interval.as_millis(),
            settings.brush.size(),
            self.fps,
        ));
    }

    /// Grid cell under the pointer, if the pointer is over the window
    fn pointer_cell(&self) -> Option<(i32, i32)> {
        let position = self.pointer.position?;
        let gpu = self.gpu.as_ref()?;
        pointer_to_cell(position, gpu.size(), (GRID_WIDTH, GRID_HEIGHT))
    }

    /// Paint under the pointer with whichever button is held
    fn paint_at_pointer(&mut self) {
        let Some(alive) = self.pointer.paint_state() else {
            return;
        };
        if let Some((x, y)) = self.pointer_cell() {
            self.simulation.paint(x, y, alive);
        }
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        let pressed = state.is_pressed();
        match button {
            MouseButton::Left => self.pointer.left_down = pressed,
            MouseButton::Right => self.pointer.right_down = pressed,
            MouseButton::Middle if pressed => {
                if let Some((x, y)) = self.pointer_cell() {
                    self.simulation.toggle_cell(x, y);
                }
                return;
            }
            _ => return,
        }

        if pressed {
            self.paint_at_pointer();
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => self.simulation.toggle_pause(),
            KeyCode::KeyN => self.simulation.step_once(),
            KeyCode::KeyC => self.simulation.clear(),
            KeyCode::KeyR => self.simulation.restart(),

            // Failures are logged by the simulation and leave the board as is
            KeyCode::KeyS => {
                let _ = self.simulation.save();
            }
            KeyCode::KeyL => {
                let _ = self.simulation.load();
            }

            KeyCode::BracketLeft => {
                self.simulation.settings.brush.shrink();
                log::info!("Cursor size: {}", self.simulation.settings.brush.size());
            }
            KeyCode::BracketRight => {
                self.simulation.settings.brush.grow();
                log::info!("Cursor size: {}", self.simulation.settings.brush.size());
            }

            KeyCode::Minus => {
                self.simulation.settings.slower();
                log::info!(
                    "Step interval: {} ms",
                    self.simulation.settings.update_interval.as_millis()
                );
            }
            KeyCode::Equal => {
                self.simulation.settings.faster();
                log::info!(
                    "Step interval: {} ms",
                    self.simulation.settings.update_interval.as_millis()
                );
            }

            KeyCode::KeyA => {
                self.simulation.settings.cycle_alive_color();
                log::info!(
                    "Alive color: {}",
                    COLOR_PRESETS[self.simulation.settings.alive_color].0
                );
            }
            KeyCode::KeyD => {
                self.simulation.settings.cycle_dead_color();
                log::info!(
                    "Dead color: {}",
                    COLOR_PRESETS[self.simulation.settings.dead_color].0
                );
            }

            KeyCode::KeyG => self.show_grid_lines = !self.show_grid_lines,
            KeyCode::KeyH => self.log_controls(),

            _ => return,
        }

        self.update_title();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            log::error!("Startup failed: {}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.position = Some((position.x, position.y));
                self.paint_at_pointer();
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.position = None;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(state, button);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.simulation.tick(Instant::now()) {
                    log::trace!("Generation {}", self.simulation.store().generation());
                }
                self.render();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

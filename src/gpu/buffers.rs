use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::simulation::Grid;

/// Holds the per-cell storage buffer and the render uniform buffer
pub struct GridBuffers {
    /// One u32 per cell, column-major, 1 = alive
    pub cells_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub render_params_buffer: Buffer,
    /// Reused upload staging for the cell states
    staging: Vec<u32>,
    /// Grid dimensions
    pub width: u32,
    pub height: u32,
}

/// Render parameters passed to render shader (64 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    // Grid info (16 bytes)
    pub grid_width: u32,
    pub grid_height: u32,
    pub show_grid_lines: u32,
    pub _padding: u32,

    // Colors, linear RGBA (48 bytes)
    pub alive_color: [f32; 4],
    pub dead_color: [f32; 4],
    pub line_color: [f32; 4],
}

/// Colors for one frame, as sRGB bytes
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub alive: [u8; 3],
    pub dead: [u8; 3],
    pub line: [u8; 3],
}

impl GridBuffers {
    /// Create buffers sized for a `width` x `height` grid
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let cell_count = (width * height) as usize;
        let buffer_size = (cell_count * std::mem::size_of::<u32>()) as u64;

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cells-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            cells_buffer,
            render_params_buffer,
            staging: vec![0; cell_count],
            width,
            height,
        }
    }

    /// Upload the live grid
    pub fn upload_cells(&mut self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!((grid.width(), grid.height()), (self.width, self.height));

        pack_cells(grid.cells(), &mut self.staging);
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(&self.staging));
    }

    /// Update render parameters
    pub fn update_render_params(
        &self,
        queue: &Queue,
        palette: Palette,
        show_grid_lines: bool,
        srgb_target: bool,
    ) {
        let params = RenderParams {
            grid_width: self.width,
            grid_height: self.height,
            show_grid_lines: show_grid_lines as u32,
            _padding: 0,
            alive_color: to_shader_color(palette.alive, srgb_target),
            dead_color: to_shader_color(palette.dead, srgb_target),
            line_color: to_shader_color(palette.line, srgb_target),
        };
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

/// Pack cell states into the shader's u32-per-cell layout
fn pack_cells(cells: &[bool], out: &mut [u32]) {
    for (dst, &alive) in out.iter_mut().zip(cells) {
        *dst = alive as u32;
    }
}

/// Convert an sRGB byte color to the float color the shader writes.
///
/// An sRGB surface re-encodes on store, so its input must be linear.
fn to_shader_color(rgb: [u8; 3], srgb_target: bool) -> [f32; 4] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if !srgb_target {
            c
        } else if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 1.0]
}

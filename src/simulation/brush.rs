use crate::config::{MAX_CURSOR_SIZE, MIN_CURSOR_SIZE};
use crate::simulation::GridStore;

/// Square paint brush anchored at its top-left cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    size: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            size: MIN_CURSOR_SIZE,
        }
    }
}

impl Brush {
    /// Create a brush, clamping `size` to the allowed range
    pub fn new(size: u32) -> Self {
        Self {
            size: size.clamp(MIN_CURSOR_SIZE, MAX_CURSOR_SIZE),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn grow(&mut self) {
        *self = Self::new(self.size + 1);
    }

    pub fn shrink(&mut self) {
        *self = Self::new(self.size.saturating_sub(1));
    }

    /// Cells covered when the brush sits at `(x, y)`, possibly out of range
    pub fn footprint(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> {
        let size = self.size as i32;
        (0..size).flat_map(move |dx| {
            (0..size).map(move |dy| (x.saturating_add(dx), y.saturating_add(dy)))
        })
    }

    /// Write `alive` into every in-range cell under the brush
    pub fn paint(&self, store: &mut GridStore, x: i32, y: i32, alive: bool) {
        for (cx, cy) in self.footprint(x, y) {
            store.set(cx, cy, alive);
        }
    }
}

/// Map a pointer position in surface pixels to a grid coordinate.
///
/// The surface is stretched over the whole grid, so the mapping follows window
/// resizes. Positions outside the surface land outside the grid, where writes
/// are ignored. Returns `None` for an empty surface.
pub fn pointer_to_cell(
    position: (f64, f64),
    surface_size: (u32, u32),
    grid_size: (u32, u32),
) -> Option<(i32, i32)> {
    let (surface_width, surface_height) = surface_size;
    if surface_width == 0 || surface_height == 0 {
        return None;
    }

    let x = position.0 * grid_size.0 as f64 / surface_width as f64;
    let y = position.1 * grid_size.1 as f64 / surface_height as f64;
    Some((x.floor() as i32, y.floor() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(Brush::new(0).size(), 1);
        assert_eq!(Brush::new(25).size(), 10);

        let mut brush = Brush::new(10);
        brush.grow();
        assert_eq!(brush.size(), 10);

        let mut brush = Brush::default();
        brush.shrink();
        assert_eq!(brush.size(), 1);
    }

    #[test]
    fn test_footprint_is_square_from_anchor() {
        let cells: Vec<_> = Brush::new(2).footprint(3, 4).collect();
        assert_eq!(cells, vec![(3, 4), (3, 5), (4, 4), (4, 5)]);
    }

    #[test]
    fn test_paint_alive_and_dead() {
        let mut store = GridStore::new(10, 10);
        let brush = Brush::new(3);

        brush.paint(&mut store, 2, 2, true);
        assert_eq!(store.live().live_count(), 9);
        assert!(store.get(4, 4));
        assert!(!store.get(5, 5));

        Brush::new(1).paint(&mut store, 3, 3, false);
        assert_eq!(store.live().live_count(), 8);
        assert!(!store.get(3, 3));
    }

    #[test]
    fn test_paint_clips_far_edges() {
        let mut store = GridStore::new(10, 10);
        Brush::new(4).paint(&mut store, 8, 8, true);
        assert_eq!(store.live().live_count(), 4);
    }

    #[test]
    fn test_paint_clips_near_edges() {
        let mut store = GridStore::new(10, 10);
        Brush::new(3).paint(&mut store, -1, -2, true);
        let mut live: Vec<_> = store.live().live_cells().collect();
        live.sort();
        assert_eq!(live, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_pointer_to_cell_scales_surface() {
        assert_eq!(pointer_to_cell((0.0, 0.0), (500, 500), (50, 50)), Some((0, 0)));
        assert_eq!(pointer_to_cell((9.9, 10.0), (500, 500), (50, 50)), Some((0, 1)));
        assert_eq!(pointer_to_cell((499.0, 250.0), (500, 500), (50, 50)), Some((49, 25)));
        // HiDPI surface twice the logical size
        assert_eq!(pointer_to_cell((40.0, 20.0), (1000, 1000), (50, 50)), Some((2, 1)));
    }

    #[test]
    fn test_pointer_outside_surface_is_out_of_range() {
        assert_eq!(pointer_to_cell((-5.0, 3.0), (500, 500), (50, 50)), Some((-1, 0)));
        assert_eq!(pointer_to_cell((510.0, 3.0), (500, 500), (50, 50)), Some((51, 0)));
        assert_eq!(pointer_to_cell((1.0, 1.0), (0, 500), (50, 50)), None);
    }
}

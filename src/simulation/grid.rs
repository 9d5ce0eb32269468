use rand::Rng;

/// Fixed-size boolean grid.
///
/// Cells are stored column-major (`x` outer, `y` inner), the same order the
/// persistence layer writes them in. Every coordinate access goes through
/// [`Grid::index`], so out-of-range reads see a dead cell and out-of-range
/// writes are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Create a grid from column-major cell states
    ///
    /// Returns `None` if `cells` does not hold exactly `width * height` entries.
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Option<Self> {
        if cells.len() != (width * height) as usize {
            return None;
        }

        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Column-major cell states
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Storage index of `(x, y)`, or `None` when either coordinate is outside the grid
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }

        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }

        Some((x * self.height + y) as usize)
    }

    /// Cell state; dead for out-of-range coordinates
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Write a cell state; ignored for out-of-range coordinates
    pub fn set(&mut self, x: i32, y: i32, alive: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = alive;
        }
    }

    /// Flip a cell state; ignored for out-of-range coordinates
    pub fn toggle(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = !self.cells[i];
        }
    }

    /// Overwrite every cell with the same state
    pub fn fill(&mut self, alive: bool) {
        self.cells.fill(alive);
    }

    /// Set every cell alive with probability 0.5, independently
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen_bool(0.5);
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of all live cells, in storage order
    #[allow(dead_code)]
    pub fn live_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let height = self.height as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(i, _)| ((i / height) as i32, (i % height) as i32))
    }
}

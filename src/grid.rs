use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sea,
    Land,
    Trail,
}

/// Fixed-size cell grid. The outer `margin` cells on every side are Land and
/// stay Land for the lifetime of the level.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: i32,
    rows: i32,
    margin: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: i32, rows: i32, margin: i32) -> Result<Self, GameError> {
        if margin < 1 {
            return Err(GameError::Configuration(format!(
                "border margin must be at least 1, got {margin}"
            )));
        }
        if cols < 2 * margin + 1 || rows < 2 * margin + 1 {
            return Err(GameError::Configuration(format!(
                "{cols}x{rows} grid cannot hold a {margin}-cell border"
            )));
        }
        let mut grid = Self {
            cols,
            rows,
            margin,
            cells: vec![Cell::Sea; (cols * rows) as usize],
        };
        grid.reset();
        Ok(grid)
    }

    /// Restore the level-start state: border Land, interior Sea.
    pub fn reset(&mut self) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let idx = self.idx(x, y);
                self.cells[idx] = if self.is_border(x, y) {
                    Cell::Land
                } else {
                    Cell::Sea
                };
            }
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.cols && y < self.rows
    }

    pub fn is_border(&self, x: i32, y: i32) -> bool {
        x < self.margin || x >= self.cols - self.margin || y < self.margin || y >= self.rows - self.margin
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.cols + x) as usize
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, GameError> {
        if !self.in_bounds(x, y) {
            return Err(GameError::OutOfBounds {
                x,
                y,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(self.cells[self.idx(x, y)])
    }

    /// Lenient accessor: anything off-grid reads as Land, so bounce and
    /// collision checks treat the world edge like captured territory.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if !self.in_bounds(x, y) {
            return Cell::Land;
        }
        self.cells[self.idx(x, y)]
    }

    pub fn is_land(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Cell::Land
    }

    /// Only the capture engine and the motion system write cells.
    pub(crate) fn set(&mut self, x: i32, y: i32, cell: Cell) {
        debug_assert!(self.in_bounds(x, y));
        debug_assert!(
            !self.is_border(x, y) || cell == Cell::Land,
            "border cell ({x}, {y}) must stay Land"
        );
        let idx = self.idx(x, y);
        self.cells[idx] = cell;
    }

    /// Land cells over total cells, floored to an integer percentage.
    pub fn percent_land(&self) -> u32 {
        let land = self.cells.iter().filter(|&&c| c == Cell::Land).count();
        (land * 100 / self.cells.len()) as u32
    }

    pub fn has_trail(&self) -> bool {
        self.cells.iter().any(|&c| c == Cell::Trail)
    }

    pub(crate) fn trail_to_land(&mut self) {
        for c in &mut self.cells {
            if *c == Cell::Trail {
                *c = Cell::Land;
            }
        }
    }

    pub(crate) fn trail_to_sea(&mut self) {
        for c in &mut self.cells {
            if *c == Cell::Trail {
                *c = Cell::Sea;
            }
        }
    }
}

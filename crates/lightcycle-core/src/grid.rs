use serde::{Deserialize, Serialize};

/// A cell on the arena grid, in cell units. Column grows to the right, row grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub col: i32,
    pub row: i32,
}

impl GridCoordinate {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The neighbouring cell one step along `direction`. Saturates at the `i32` range.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            col: self.col.saturating_add(dx),
            row: self.row.saturating_add(dy),
        }
    }

    /// Top-left pixel of this cell for a given cell size.
    pub fn to_pixels(self, cell_size: u32) -> (i64, i64) {
        let size = i64::from(cell_size);
        (i64::from(self.col) * size, i64::from(self.row) * size)
    }
}

/// Movement axis, used to decide whether a turn is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    Neutral,
}

/// Heading of a light cycle on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta `(dx, dy)` for one tick of movement.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::None => Axis::Neutral,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// Size of the arena in cells. Valid coordinates are `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && i64::from(coord.col) < i64::from(self.width)
            && i64::from(coord.row) < i64::from(self.height)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The cursor. Velocity has at most one nonzero axis; input lands in
/// `queued` and is applied at the next discrete tick.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Position,
    pub velocity: (i32, i32),
    pub queued: Option<(i32, i32)>,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: Position::new(x, y),
            velocity: (0, 0),
            queued: None,
        }
    }
}

/// Free-roaming enemy with continuous sub-cell position, stepped every
/// render frame for smooth motion. Both velocity axes are always nonzero.
#[derive(Debug, Clone)]
pub struct SeaEnemy {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl SeaEnemy {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    /// The grid cell currently containing the enemy.
    pub fn cell(&self) -> Position {
        Position::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// "Sparky": grid-stepping enemy confined to Land, stepped once per tick.
#[derive(Debug, Clone)]
pub struct LandEnemy {
    pub position: Position,
    pub heading: Direction,
}

impl LandEnemy {
    pub fn new(x: i32, y: i32, heading: Direction) -> Self {
        Self {
            position: Position::new(x, y),
            heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas_are_unit_cardinals() {
        for dir in Direction::CARDINALS {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((ox, oy), (-dx, -dy));
        }
    }

    #[test]
    fn test_sea_enemy_cell_floors() {
        let enemy = SeaEnemy::new(5.9, 2.1, 0.25, -0.25);
        assert_eq!(enemy.cell(), Position::new(5, 2));
    }
}

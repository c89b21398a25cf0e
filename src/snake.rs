use std::collections::VecDeque;

/// One grid square, addressed by column and row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Snake body ordered head first. Never empty; cells stay pairwise distinct
/// and each adjacent pair differs by exactly one step along one axis.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(start: Cell, direction: Direction) -> Self {
        Snake {
            body: VecDeque::from([start]),
            direction,
        }
    }

    /// Builds a snake with a prescribed body, head first, so tests can set
    /// up exact scenarios.
    #[cfg(test)]
    pub fn from_cells(cells: Vec<Cell>, direction: Direction) -> Self {
        Snake {
            body: VecDeque::from(cells),
            direction,
        }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("snake always has a head")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Applies a direction request. A request for the exact opposite of the
    /// current direction is ignored so a single input cannot fold the snake
    /// onto its own neck.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.direction = requested;
        }
    }

    /// The cell the head would enter on the next step.
    pub fn next_head(&self) -> Cell {
        self.head().step(self.direction)
    }

    /// Whether stepping into `cell` collides with the body. The tail cell
    /// does not count: it vacates on the same step.
    pub fn would_bite(&self, cell: Cell) -> bool {
        let tail_exempt = self.len().saturating_sub(1);
        self.body.iter().take(tail_exempt).any(|&c| c == cell)
    }

    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

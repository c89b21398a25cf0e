use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::snake::{Cell, Direction, Snake};

const START_CELL: Cell = Cell { x: 5, y: 5 };
const START_DIRECTION: Direction = Direction::Right;
const FOOD_POINTS: u32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Cell::new(x, y)))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Stopped,
    Running,
    GameOver,
}

/// What a poll of the controller did, so the host can react without diffing
/// game state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    Idle,
    Moved,
    Ate,
    Crashed,
}

/// Single-slot repeating timer: an interval plus at most one pending
/// deadline. Scheduling replaces the previous deadline, so a stale tick can
/// never fire alongside a fresh one.
#[derive(Clone, Copy, Debug)]
pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        TickTimer {
            interval,
            next_due: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Reports whether the deadline has passed, re-arming from `now` when it
    /// has. Late polls slip rather than fire a burst of catch-up ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

/// The whole game behind the window: board, snake, food, score and the tick
/// timer. Commands arrive through the `on_*` methods; the host polls once
/// per frame and renders whatever the accessors expose. Nothing here touches
/// the windowing toolkit.
pub struct Game {
    grid: Grid,
    snake: Snake,
    food: Cell,
    score: u32,
    best_score: u32,
    state: GameState,
    timer: TickTimer,
    rng: StdRng,
}

impl Game {
    pub fn new(grid: Grid, tick_interval: Duration) -> Self {
        Self::with_rng(grid, tick_interval, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    #[cfg(test)]
    pub fn with_seed(grid: Grid, tick_interval: Duration, seed: u64) -> Self {
        Self::with_rng(grid, tick_interval, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, tick_interval: Duration, rng: StdRng) -> Self {
        let mut game = Game {
            grid,
            snake: Snake::new(START_CELL, START_DIRECTION),
            food: Cell::new(0, 0),
            score: 0,
            best_score: 0,
            state: GameState::Stopped,
            timer: TickTimer::new(tick_interval),
            rng,
        };
        game.food = game
            .random_free_cell()
            .expect("a fresh board always has a free cell");
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Begins play from the paused state. A game that is already running or
    /// over is left alone; only a restart revives a finished game.
    pub fn on_start(&mut self, now: Instant) {
        if self.state == GameState::Stopped {
            self.state = GameState::Running;
            self.timer.schedule(now);
        }
    }

    pub fn on_resume(&mut self, now: Instant) {
        self.on_start(now);
    }

    /// Pauses play, keeping snake, food and score where they are.
    pub fn on_stop(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Stopped;
            self.timer.cancel();
        }
    }

    /// Abandons the current round from any state: the pending tick is
    /// cancelled, snake, direction and score return to their initial values
    /// (the best score survives), fresh food is placed and play begins.
    pub fn on_restart(&mut self, now: Instant) {
        self.timer.cancel();
        self.snake = Snake::new(START_CELL, START_DIRECTION);
        self.score = 0;
        self.food = self
            .random_free_cell()
            .expect("a fresh board always has a free cell");
        self.state = GameState::Running;
        self.timer.schedule(now);
    }

    /// Direction requests are accepted in every state and take effect on the
    /// next tick; the snake itself rejects exact reversals.
    pub fn on_key(&mut self, requested: Direction) {
        self.snake.set_direction(requested);
    }

    /// Frame-driven entry point: runs one tick when the game is running and
    /// the tick deadline has passed, otherwise does nothing.
    pub fn poll(&mut self, now: Instant) -> TickOutcome {
        if self.state != GameState::Running || !self.timer.fire(now) {
            return TickOutcome::Idle;
        }
        self.tick()
    }

    fn tick(&mut self) -> TickOutcome {
        let candidate = self.snake.next_head();

        if !self.grid.contains(candidate) || self.snake.would_bite(candidate) {
            self.state = GameState::GameOver;
            self.timer.cancel();
            return TickOutcome::Crashed;
        }

        let ate = candidate == self.food;
        self.snake.advance(candidate, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += FOOD_POINTS;
        self.best_score = self.best_score.max(self.score);
        match self.random_free_cell() {
            Some(cell) => self.food = cell,
            None => {
                // The snake covers the whole board; nowhere left to play.
                self.state = GameState::GameOver;
                self.timer.cancel();
            }
        }
        TickOutcome::Ate
    }

    fn random_free_cell(&mut self) -> Option<Cell> {
        let snake = &self.snake;
        let free: Vec<Cell> = self.grid.cells().filter(|&c| !snake.contains(c)).collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod timer_tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(150);

    #[test]
    fn does_not_fire_before_the_deadline() {
        let mut timer = TickTimer::new(INTERVAL);
        let t0 = Instant::now();
        timer.schedule(t0);
        assert!(!timer.fire(t0 + Duration::from_millis(149)));
        assert!(timer.fire(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn fires_once_then_rearms() {
        let mut timer = TickTimer::new(INTERVAL);
        let t0 = Instant::now();
        timer.schedule(t0);
        assert!(timer.fire(t0 + INTERVAL));
        assert!(!timer.fire(t0 + INTERVAL));
        assert!(timer.fire(t0 + INTERVAL + INTERVAL));
    }

    #[test]
    fn cancel_clears_the_pending_deadline() {
        let mut timer = TickTimer::new(INTERVAL);
        let t0 = Instant::now();
        timer.schedule(t0);
        timer.cancel();
        assert!(!timer.fire(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn rescheduling_replaces_the_deadline() {
        let mut timer = TickTimer::new(INTERVAL);
        let t0 = Instant::now();
        timer.schedule(t0);
        timer.schedule(t0 + Duration::from_millis(100));
        assert!(!timer.fire(t0 + INTERVAL));
        assert!(timer.fire(t0 + Duration::from_millis(250)));
    }
}

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Pos;
use Direction::*;

pub const GRID_WIDTH: i16 = 60;
pub const GRID_HEIGHT: i16 = 20;

const POINTS_PER_FOOD: u32 = 10;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step as a (row, column) delta.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    fn is_opposite_of(self, other: Direction) -> bool {
        let (dr, dc) = self.delta();
        let (or, oc) = other.delta();
        dr + or == 0 && dc + oc == 0
    }
}

/// One round of snake on a bordered grid. Cells with row 0, row height-1,
/// column 0 or column width-1 are wall; everything else is playable.
///
/// The engine does no I/O and keeps no clock; the session loop calls
/// [`GameState::advance`] once per tick and renders whatever it reads back.
pub struct GameState {
    width: i16,
    height: i16,
    snake: VecDeque<Pos>,
    direction: Direction,
    food: Pos,
    score: u32,
    game_over: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new(width: i16, height: i16) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Seeded variant, so food placement is reproducible in tests.
    pub fn seeded(width: i16, height: i16, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i16, height: i16, rng: StdRng) -> Self {
        let mut snake = VecDeque::new();
        snake.push_back((height / 2, width / 2));

        let mut state = GameState {
            width,
            height,
            snake,
            direction: Right,
            food: (0, 0),
            score: 0,
            game_over: false,
            rng,
        };
        state.food = state.spawn_food();
        state
    }

    /// Turns the snake, unless the request would reverse it onto itself.
    /// Rejected requests are dropped silently.
    pub fn set_direction(&mut self, requested: Direction) {
        if !requested.is_opposite_of(self.direction) {
            self.direction = requested;
        }
    }

    /// Moves the snake one cell in its current direction. Running into the
    /// border or into its own body ends the round without touching the
    /// body; landing on food grows the snake by one segment and scores.
    /// Returns `true` when the move ended the round.
    pub fn advance(&mut self) -> bool {
        let (head_row, head_col) = self.snake[0];
        let (dr, dc) = self.direction.delta();
        let new_head = (head_row + dr, head_col + dc);

        let hit_wall = new_head.0 <= 0
            || new_head.0 >= self.height - 1
            || new_head.1 <= 0
            || new_head.1 >= self.width - 1;

        if hit_wall || self.snake.contains(&new_head) {
            self.game_over = true;
            return true;
        }

        self.snake.push_front(new_head);

        if new_head == self.food {
            self.score += POINTS_PER_FOOD;
            self.food = self.spawn_food();
        } else {
            self.snake.pop_back();
        }

        false
    }

    /// Picks a free interior cell for the next piece of food. The interior
    /// always holds more cells than the snake has segments, so the sampling
    /// loop terminates.
    fn spawn_food(&mut self) -> Pos {
        loop {
            let pos = (
                self.rng.gen_range(1..=self.height - 2),
                self.rng.gen_range(1..=self.width - 2),
            );
            if !self.snake.contains(&pos) {
                return pos;
            }
        }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn snake(&self) -> &VecDeque<Pos> {
        &self.snake
    }

    pub fn head(&self) -> Pos {
        self.snake[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Pos {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }
}

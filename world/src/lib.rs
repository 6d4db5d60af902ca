#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Torus Snake.
//!
//! The world owns the snake, the apple, and the deterministic step RNG.
//! Adapters mutate it exclusively through [`apply`] and read it exclusively
//! through the [`query`] module. Every source of randomness is derived from
//! the seed injected via [`Config`], so identical seeds replay identical
//! sessions.

use std::{collections::VecDeque, time::Duration};

use thiserror::Error;
use torus_snake_core::{CellCoord, Command, Event, GridSize, Heading, WELCOME_BANNER};

const DEFAULT_GRID_COLUMNS: u32 = 32;
const DEFAULT_GRID_ROWS: u32 = 24;
const DEFAULT_INITIAL_LENGTH: usize = 1;
const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(100);

/// Configuration parameters required to construct a session world.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    columns: u32,
    rows: u32,
    initial_length: usize,
    step_duration: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from explicit session parameters.
    #[must_use]
    pub const fn new(
        columns: u32,
        rows: u32,
        initial_length: usize,
        step_duration: Duration,
        rng_seed: u64,
    ) -> Self {
        Self {
            columns,
            rows,
            initial_length,
            step_duration,
            rng_seed,
        }
    }

    /// Returns the default configuration with the provided RNG seed.
    #[must_use]
    pub const fn with_seed(rng_seed: u64) -> Self {
        Self::new(
            DEFAULT_GRID_COLUMNS,
            DEFAULT_GRID_ROWS,
            DEFAULT_INITIAL_LENGTH,
            DEFAULT_STEP_DURATION,
            rng_seed,
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }
        if self.step_duration.is_zero() {
            return Err(ConfigError::ZeroStepDuration);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

/// Errors reported when a [`Config`] cannot describe a playable session.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid must contain at least one cell along each axis.
    #[error("grid dimensions must be positive (received {columns}x{rows})")]
    EmptyGrid {
        /// Configured column count that failed validation.
        columns: u32,
        /// Configured row count that failed validation.
        rows: u32,
    },
    /// The snake must start with at least one body cell.
    #[error("initial snake length must be at least 1")]
    ZeroInitialLength,
    /// Steps must consume a positive amount of simulated time.
    #[error("step duration must be positive")]
    ZeroStepDuration,
}

/// Represents the authoritative Torus Snake session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridSize,
    snake: Snake,
    apple: Apple,
    pending_heading: Option<Heading>,
    accumulator: Duration,
    step_duration: Duration,
    initial_length: usize,
    rng: StepRng,
}

impl World {
    /// Creates a new session world from the provided configuration.
    ///
    /// The snake spawns at the grid center with a uniformly random heading
    /// and the apple is randomized once, both drawn from the seeded RNG.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = GridSize::new(config.columns, config.rows);
        let mut rng = StepRng::new(config.rng_seed);
        let snake = Snake::spawned_at(grid.center(), rng.heading(), config.initial_length);
        let apple = Apple {
            cell: randomize_cell(&mut rng, grid),
        };

        Ok(Self {
            banner: WELCOME_BANNER,
            grid,
            snake,
            apple,
            pending_heading: None,
            accumulator: Duration::ZERO,
            step_duration: config.step_duration,
            initial_length: config.initial_length,
            rng,
        })
    }

    /// Performs one discrete step: heading change, move, collision handling,
    /// and food consumption, in that order.
    fn step(&mut self, out_events: &mut Vec<Event>) {
        if let Some(requested) = self.pending_heading.take() {
            self.snake.steer(requested);
        }

        let Some(head) = self.snake.head() else {
            return;
        };
        let new_head = self.grid.step(head, self.snake.heading);

        if self.snake.hits_body(new_head) {
            self.reset(out_events);
            return;
        }

        self.snake.advance(new_head);
        out_events.push(Event::SnakeAdvanced {
            from: head,
            to: new_head,
        });

        if new_head == self.apple.cell {
            let score = self.snake.consume();
            out_events.push(Event::AppleEaten {
                cell: new_head,
                score,
            });
            self.apple.cell = randomize_cell(&mut self.rng, self.grid);
            out_events.push(Event::AppleRespawned {
                cell: self.apple.cell,
            });
        }
    }

    /// Silently returns the snake to its initial state after a
    /// self-collision. The apple is left where it was.
    fn reset(&mut self, out_events: &mut Vec<Event>) {
        let head = self.grid.center();
        self.snake = Snake::spawned_at(head, self.rng.heading(), self.initial_length);
        out_events.push(Event::SnakeReset {
            head,
            length: self.snake.body.len(),
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetHeading { heading } => {
            // Latched until the next step boundary; the most recent request
            // before a step wins, and a step consumes at most one request.
            world.pending_heading = Some(heading);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.accumulator = world.accumulator.saturating_add(dt);
            while world.accumulator >= world.step_duration {
                world.accumulator -= world.step_duration;
                world.step(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use torus_snake_core::{CellCoord, GridSize, Heading};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the session's toroidal grid.
    #[must_use]
    pub fn grid(world: &World) -> GridSize {
        world.grid
    }

    /// Captures a read-only view of the snake, head first.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        SnakeView {
            cells: world.snake.body.iter().copied().collect(),
            heading: world.snake.heading,
            score: world.snake.score,
            target_length: world.snake.target_length,
        }
    }

    /// Cell currently occupied by the snake's head.
    #[must_use]
    pub fn head_position(world: &World) -> CellCoord {
        world.snake.head().unwrap_or(world.grid.center())
    }

    /// Cell currently occupied by the apple.
    #[must_use]
    pub fn apple_position(world: &World) -> CellCoord {
        world.apple.cell
    }

    /// Current score of the session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.snake.score
    }

    /// Immutable snapshot of the snake used for rendering and assertions.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SnakeView {
        /// Occupied cells in traversal order, head at index zero.
        pub cells: Vec<CellCoord>,
        /// Heading the snake is currently travelling along.
        pub heading: Heading,
        /// Apples eaten since the last reset.
        pub score: u32,
        /// Length the body grows toward.
        pub target_length: usize,
    }
}

#[derive(Clone, Debug)]
struct Snake {
    body: VecDeque<CellCoord>,
    heading: Heading,
    target_length: usize,
    score: u32,
}

impl Snake {
    fn spawned_at(head: CellCoord, heading: Heading, target_length: usize) -> Self {
        let mut body = VecDeque::new();
        body.push_front(head);
        Self {
            body,
            heading,
            target_length,
            score: 0,
        }
    }

    fn head(&self) -> Option<CellCoord> {
        self.body.front().copied()
    }

    /// Adopts the requested heading unless it reverses the current one.
    fn steer(&mut self, requested: Heading) {
        if !requested.is_opposite(self.heading) {
            self.heading = requested;
        }
    }

    /// Reports whether the cell collides with the body behind the neck.
    ///
    /// The head and the cell immediately behind it are excluded: the head
    /// cannot legally re-enter either, and the tail segment the head vacates
    /// into must not register as a collision.
    fn hits_body(&self, cell: CellCoord) -> bool {
        self.body.iter().skip(2).any(|occupied| *occupied == cell)
    }

    fn advance(&mut self, new_head: CellCoord) {
        self.body.push_front(new_head);
        if self.body.len() > self.target_length {
            let _ = self.body.pop_back();
        }
    }

    /// Registers a consumed apple and returns the new score.
    fn consume(&mut self) -> u32 {
        self.target_length += 1;
        self.score += 1;
        self.score
    }
}

#[derive(Clone, Copy, Debug)]
struct Apple {
    cell: CellCoord,
}

/// Deterministic step RNG advanced with a 64-bit linear congruence.
#[derive(Clone, Debug)]
struct StepRng {
    state: u64,
}

impl StepRng {
    const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
    const INCREMENT: u64 = 1;

    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Selections use the high half of the state; the low bits of a
    /// modulus-2^64 congruential sequence have short periods.
    fn next_value(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state >> 32
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "next_below requires a positive bound");
        (self.next_value() % u64::from(bound)) as u32
    }

    fn heading(&mut self) -> Heading {
        Heading::ALL[self.next_below(Heading::ALL.len() as u32) as usize]
    }
}

fn randomize_cell(rng: &mut StepRng, grid: GridSize) -> CellCoord {
    CellCoord::new(rng.next_below(grid.columns()), rng.next_below(grid.rows()))
}

/// Test scaffolding that assembles exact session states.
///
/// Available to in-crate tests and, through the `snake_scaffolding`
/// feature, to downstream test suites. Never compiled into release builds
/// of consumers that leave the feature disabled.
#[cfg(any(test, feature = "snake_scaffolding"))]
pub mod scaffolding {
    use super::{Snake, World};
    use std::collections::VecDeque;
    use torus_snake_core::{CellCoord, Heading};

    /// Replaces the snake with the provided body, head at index zero.
    ///
    /// The target length becomes the body length and the score is preserved.
    pub fn place_snake(world: &mut World, cells: &[CellCoord], heading: Heading) {
        debug_assert!(!cells.is_empty(), "place_snake requires at least a head");
        debug_assert!(
            cells.iter().all(|cell| world.grid.contains(*cell)),
            "place_snake requires cells within the grid"
        );

        let body: VecDeque<CellCoord> = cells.iter().copied().collect();
        world.snake = Snake {
            target_length: body.len(),
            body,
            heading,
            score: world.snake.score,
        };
        world.pending_heading = None;
    }

    /// Moves the apple to the provided cell.
    pub fn place_apple(world: &mut World, cell: CellCoord) {
        debug_assert!(
            world.grid.contains(cell),
            "place_apple requires a cell within the grid"
        );
        world.apple.cell = cell;
    }
}

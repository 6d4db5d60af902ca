#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Torus Snake game.
//!
//! This crate defines the message surface that connects adapters and the
//! authoritative world. Adapters submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing what actually happened.
//! The grid geometry lives here as well so that every consumer shares a
//! single definition of the toroidal coordinate space.

use std::time::Duration;

/// Canonical banner emitted when the game boots.
pub const WELCOME_BANNER: &str = "Welcome to Torus Snake.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the snake travel along the provided heading starting
    /// with the next step.
    SetHeading {
        /// Heading the snake should adopt.
        heading: Heading,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the snake's head moved between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before the step.
        from: CellCoord,
        /// Cell the head occupies after the step.
        to: CellCoord,
    },
    /// Confirms that the head landed on the apple.
    AppleEaten {
        /// Cell that held the apple.
        cell: CellCoord,
        /// Score total after the apple was consumed.
        score: u32,
    },
    /// Confirms that the apple was moved to a new cell.
    AppleRespawned {
        /// Cell now holding the apple.
        cell: CellCoord,
    },
    /// Reports that a self-collision returned the snake to its initial state.
    SnakeReset {
        /// Cell the snake occupies after the reset.
        head: CellCoord,
        /// Body length after the reset.
        length: usize,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Unit-vector travel directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Heading {
    /// Every heading in a fixed order, used for uniform random draws.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit-vector offset applied to a cell when stepping along the heading.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Heading pointing in the exact opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether `other` points in the exact opposite direction.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

/// Dimensions of the toroidal playing field measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell at the center of the grid, rounding toward the origin.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Maps signed coordinates onto the torus.
    ///
    /// Both axes use the non-negative Euclidean remainder, so any signed
    /// input lands in `[0, columns) x [0, rows)`. This is the sole place
    /// wrap-around arithmetic lives; all movement routes through it.
    #[must_use]
    pub fn wrap(&self, column: i64, row: i64) -> CellCoord {
        let columns = i64::from(self.columns.max(1));
        let rows = i64::from(self.rows.max(1));
        CellCoord::new(
            column.rem_euclid(columns) as u32,
            row.rem_euclid(rows) as u32,
        )
    }

    /// Advances a cell one step along the heading, wrapping at the edges.
    #[must_use]
    pub fn step(&self, cell: CellCoord, heading: Heading) -> CellCoord {
        let (dx, dy) = heading.offset();
        self.wrap(
            i64::from(cell.column()) + i64::from(dx),
            i64::from(cell.row()) + i64::from(dy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, GridSize, Heading};

    #[test]
    fn heading_offsets_are_unit_vectors() {
        assert_eq!(Heading::Up.offset(), (0, -1));
        assert_eq!(Heading::Down.offset(), (0, 1));
        assert_eq!(Heading::Left.offset(), (-1, 0));
        assert_eq!(Heading::Right.offset(), (1, 0));
    }

    #[test]
    fn opposites_pair_up_both_ways() {
        for heading in Heading::ALL {
            assert_eq!(heading.opposite().opposite(), heading);
            assert!(heading.is_opposite(heading.opposite()));
            assert!(!heading.is_opposite(heading));
        }
    }

    #[test]
    fn wrap_keeps_every_step_within_bounds() {
        let grid = GridSize::new(32, 24);
        let corners = [
            CellCoord::new(0, 0),
            CellCoord::new(31, 0),
            CellCoord::new(0, 23),
            CellCoord::new(31, 23),
        ];

        for corner in corners {
            for heading in Heading::ALL {
                let stepped = grid.step(corner, heading);
                assert!(grid.contains(stepped), "{stepped:?} escaped the grid");
            }
        }
    }

    #[test]
    fn wrap_normalises_negative_coordinates() {
        let grid = GridSize::new(10, 8);
        assert_eq!(grid.wrap(-1, -1), CellCoord::new(9, 7));
        assert_eq!(grid.wrap(-11, 9), CellCoord::new(9, 1));
    }

    #[test]
    fn step_wraps_across_the_right_edge() {
        let grid = GridSize::new(32, 24);
        let stepped = grid.step(CellCoord::new(31, 12), Heading::Right);
        assert_eq!(stepped, CellCoord::new(0, 12));
    }

    #[test]
    fn step_wraps_across_the_top_edge() {
        let grid = GridSize::new(32, 24);
        let stepped = grid.step(CellCoord::new(5, 0), Heading::Up);
        assert_eq!(stepped, CellCoord::new(5, 23));
    }

    #[test]
    fn center_matches_integer_halving() {
        assert_eq!(GridSize::new(32, 24).center(), CellCoord::new(16, 12));
        assert_eq!(GridSize::new(9, 7).center(), CellCoord::new(4, 3));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Torus Snake adapters.
//!
//! Backends consume a declarative [`Scene`] and report per-frame input back
//! to the session driver through [`FrameInput`]; nothing in this crate knows
//! which windowing library ultimately draws the cells.

use anyhow::Result as AnyResult;
use std::time::Duration;
use thiserror::Error;
use torus_snake_core::{CellCoord, Heading};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Describes the cell board that composes the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of columns contained in the board.
    pub columns: u32,
    /// Number of rows contained in the board.
    pub rows: u32,
    /// Side length of a single square cell expressed in pixels.
    pub cell_length: f32,
}

impl BoardPresentation {
    /// Creates a new board descriptor.
    ///
    /// Returns an error when `cell_length` is not positive.
    pub fn new(columns: u32, rows: u32, cell_length: f32) -> Result<Self, RenderingError> {
        if cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
        })
    }

    /// Total width of the board in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the board in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }
}

/// Snake body rendered as one filled rectangle per occupied cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakePresentation {
    /// Occupied cells in traversal order, head at index zero.
    pub cells: Vec<CellCoord>,
    /// Fill color shared by every body cell.
    pub color: Color,
}

impl SnakePresentation {
    /// Creates a new snake presentation descriptor.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>, color: Color) -> Self {
        Self { cells, color }
    }
}

/// Apple rendered as a single filled cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApplePresentation {
    /// Cell occupied by the apple.
    pub cell: CellCoord,
    /// Fill color of the apple.
    pub color: Color,
}

impl ApplePresentation {
    /// Creates a new apple presentation descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, color: Color) -> Self {
        Self { cell, color }
    }
}

/// Score readout drawn in the board's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreLabel {
    /// Apples eaten since the last reset.
    pub score: u32,
    /// Color of the rendered text.
    pub color: Color,
}

impl ScoreLabel {
    /// Creates a new score label descriptor.
    #[must_use]
    pub const fn new(score: u32, color: Color) -> Self {
        Self { score, color }
    }

    /// Text presented to the player.
    #[must_use]
    pub fn text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

/// Scene description combining the board and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Cell board that composes the play area.
    pub board: BoardPresentation,
    /// Snake currently visible on the board.
    pub snake: SnakePresentation,
    /// Apple currently visible on the board.
    pub apple: ApplePresentation,
    /// Score readout for the session.
    pub score: ScoreLabel,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        board: BoardPresentation,
        snake: SnakePresentation,
        apple: ApplePresentation,
        score: ScoreLabel,
    ) -> Self {
        Self {
            board,
            snake,
            apple,
            score,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Input snapshot gathered by adapters once per frame.
///
/// Quit requests never reach the session: backends terminate their own frame
/// loop immediately when one is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// At most one directional command, the first recognized key of the
    /// frame in Up/Down/Left/Right poll order.
    pub heading: Option<Heading>,
}

/// Rendering backend capable of presenting Torus Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the player requests to quit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Cell length must be positive to avoid a zero-sized board.
    #[error("cell_length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_creation_accepts_positive_cell_length() {
        let board = BoardPresentation::new(32, 24, 20.0)
            .expect("positive cell_length should succeed");

        assert_eq!(board.width(), 640.0);
        assert_eq!(board.height(), 480.0);
    }

    #[test]
    fn board_creation_rejects_non_positive_cell_length() {
        let error = BoardPresentation::new(32, 24, 0.0)
            .expect_err("zero cell_length must be rejected");

        assert!(matches!(
            error,
            RenderingError::InvalidCellLength { .. }
        ));
    }

    #[test]
    fn score_label_text_spells_out_the_score() {
        let label = ScoreLabel::new(7, Color::from_rgb_u8(255, 255, 255));
        assert_eq!(label.text(), "Score: 7");
    }

    #[test]
    fn scene_new_preserves_every_channel() {
        let board = BoardPresentation::new(8, 6, 10.0).expect("valid board");
        let snake = SnakePresentation::new(
            vec![CellCoord::new(4, 3), CellCoord::new(3, 3)],
            Color::from_rgb_u8(0, 255, 0),
        );
        let apple = ApplePresentation::new(CellCoord::new(1, 1), Color::from_rgb_u8(255, 0, 0));
        let score = ScoreLabel::new(0, Color::from_rgb_u8(255, 255, 255));

        let scene = Scene::new(board, snake.clone(), apple, score);

        assert_eq!(scene.board, board);
        assert_eq!(scene.snake, snake);
        assert_eq!(scene.apple, apple);
        assert_eq!(scene.score, score);
    }

    #[test]
    fn frame_input_defaults_to_no_commands() {
        let input = FrameInput::default();
        assert_eq!(input.heading, None);
    }
}

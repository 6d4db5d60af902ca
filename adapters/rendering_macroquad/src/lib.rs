#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Torus Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; the game has no sound anyway.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use std::time::Duration;
use torus_snake_core::{CellCoord, Heading};
use torus_snake_rendering::{
    ApplePresentation, BoardPresentation, Color, FrameInput, Presentation, RenderingBackend,
    Scene, ScoreLabel, SnakePresentation,
};

const SCORE_MARGIN: f32 = 5.0;
const SCORE_BASELINE: f32 = 32.0;
const SCORE_FONT_SIZE: f32 = 36.0;

/// Snapshot of edge-triggered keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardInput {
    /// `Q` or `Escape` to quit the frame loop.
    quit_requested: bool,
    /// First directional key found this frame, in Up/Down/Left/Right order.
    heading: Option<Heading>,
}

impl KeyboardInput {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let heading = if is_key_pressed(KeyCode::Up) {
            Some(Heading::Up)
        } else if is_key_pressed(KeyCode::Down) {
            Some(Heading::Down)
        } else if is_key_pressed(KeyCode::Left) {
            Some(Heading::Left)
        } else if is_key_pressed(KeyCode::Right) {
            Some(Heading::Right)
        } else {
            None
        };

        Self {
            quit_requested,
            heading,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints the measured frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.board.width().round() as i32,
            window_height: scene.board.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardInput::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    heading: keyboard.heading,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = BoardMetrics::from_board(&scene.board, screen_width, screen_height);
                draw_snake(&scene.snake, &metrics);
                draw_apple(&scene.apple, &metrics);
                draw_score(&scene.score, &metrics);

                if show_fps {
                    if let Some(fps) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {fps:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Screen-space placement of the board for the current frame.
///
/// The board is scaled uniformly to the largest size that fits the window
/// and centered along the slack axis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct BoardMetrics {
    origin: Vec2,
    cell_length: f32,
}

impl BoardMetrics {
    fn from_board(board: &BoardPresentation, screen_width: f32, screen_height: f32) -> Self {
        if board.columns == 0 || board.rows == 0 {
            return Self {
                origin: Vec2::ZERO,
                cell_length: 0.0,
            };
        }

        let columns = board.columns as f32;
        let rows = board.rows as f32;
        let cell_length = (screen_width / columns)
            .min(screen_height / rows)
            .max(0.0);
        let board_size = Vec2::new(columns, rows) * cell_length;
        let origin = (Vec2::new(screen_width, screen_height) - board_size) * 0.5;

        Self {
            origin,
            cell_length,
        }
    }

    fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        self.origin + Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, dt: Duration) -> Option<f64> {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frames += 1;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let fps = f64::from(self.frames) / self.elapsed.as_secs_f64();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(fps)
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn draw_cell(cell: CellCoord, color: macroquad::color::Color, metrics: &BoardMetrics) {
    let origin = metrics.cell_origin(cell);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        metrics.cell_length,
        metrics.cell_length,
        color,
    );
}

fn draw_snake(snake: &SnakePresentation, metrics: &BoardMetrics) {
    let color = to_macroquad_color(snake.color);
    for cell in &snake.cells {
        draw_cell(*cell, color, metrics);
    }
}

fn draw_apple(apple: &ApplePresentation, metrics: &BoardMetrics) {
    draw_cell(apple.cell, to_macroquad_color(apple.color), metrics);
}

fn draw_score(score: &ScoreLabel, metrics: &BoardMetrics) {
    let position = metrics.origin + Vec2::new(SCORE_MARGIN, SCORE_BASELINE);
    macroquad::text::draw_text(
        &score.text(),
        position.x,
        position.y,
        SCORE_FONT_SIZE,
        to_macroquad_color(score.color),
    );
}

#[cfg(test)]
mod tests {
    use super::BoardMetrics;
    use torus_snake_core::CellCoord;
    use torus_snake_rendering::BoardPresentation;

    #[test]
    fn metrics_fill_an_exactly_matching_window() {
        let board = BoardPresentation::new(32, 24, 20.0).expect("valid board");
        let metrics = BoardMetrics::from_board(&board, 640.0, 480.0);

        assert_eq!(metrics.cell_length, 20.0);
        assert_eq!(metrics.origin.x, 0.0);
        assert_eq!(metrics.origin.y, 0.0);
    }

    #[test]
    fn metrics_center_the_board_in_a_wide_window() {
        let board = BoardPresentation::new(32, 24, 20.0).expect("valid board");
        let metrics = BoardMetrics::from_board(&board, 800.0, 480.0);

        assert_eq!(metrics.cell_length, 20.0);
        assert_eq!(metrics.origin.x, 80.0);
        assert_eq!(metrics.origin.y, 0.0);
    }

    #[test]
    fn metrics_center_the_board_in_a_tall_window() {
        let board = BoardPresentation::new(32, 24, 20.0).expect("valid board");
        let metrics = BoardMetrics::from_board(&board, 640.0, 600.0);

        assert_eq!(metrics.cell_length, 20.0);
        assert_eq!(metrics.origin.x, 0.0);
        assert_eq!(metrics.origin.y, 60.0);
    }

    #[test]
    fn metrics_scale_down_for_a_small_window() {
        let board = BoardPresentation::new(32, 24, 20.0).expect("valid board");
        let metrics = BoardMetrics::from_board(&board, 320.0, 240.0);

        assert_eq!(metrics.cell_length, 10.0);
    }

    #[test]
    fn metrics_survive_an_empty_board() {
        let board = BoardPresentation::new(0, 0, 20.0).expect("valid board");
        let metrics = BoardMetrics::from_board(&board, 640.0, 480.0);

        assert_eq!(metrics.cell_length, 0.0);
    }

    #[test]
    fn cell_origin_offsets_by_whole_cells() {
        let board = BoardPresentation::new(32, 24, 20.0).expect("valid board");
        let metrics = BoardMetrics::from_board(&board, 800.0, 480.0);
        let origin = metrics.cell_origin(CellCoord::new(3, 2));

        assert_eq!(origin.x, 80.0 + 60.0);
        assert_eq!(origin.y, 40.0);
    }
}

//! Per-frame bridge between backend input, world commands, and the scene.
//!
//! The frame order matches the session contract: at most one heading command,
//! then the clock tick, then the scene is rebuilt from query views.

use std::time::Duration;

use torus_snake_core::{Command, Event};
use torus_snake_rendering::{
    ApplePresentation, BoardPresentation, Color, FrameInput, RenderingError, Scene, ScoreLabel,
    SnakePresentation,
};
use torus_snake_world::{self as world, query, World};

const CELL_LENGTH: f32 = 20.0;
const SNAKE_COLOR: Color = Color::from_rgb_u8(0, 255, 0);
const APPLE_COLOR: Color = Color::from_rgb_u8(255, 0, 0);
const SCORE_COLOR: Color = Color::from_rgb_u8(255, 255, 255);

/// Owns the world for the duration of one game session.
pub(crate) struct Session {
    world: World,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            events: Vec::new(),
        }
    }

    /// Describes the initial scene for the current world state.
    pub(crate) fn scene(&self) -> Result<Scene, RenderingError> {
        let grid = query::grid(&self.world);
        let board = BoardPresentation::new(grid.columns(), grid.rows(), CELL_LENGTH)?;
        let view = query::snake_view(&self.world);

        Ok(Scene::new(
            board,
            SnakePresentation::new(view.cells, SNAKE_COLOR),
            ApplePresentation::new(query::apple_position(&self.world), APPLE_COLOR),
            ScoreLabel::new(view.score, SCORE_COLOR),
        ))
    }

    /// Feeds one frame of input into the world and advances the clock.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput) {
        self.events.clear();

        if let Some(heading) = input.heading {
            world::apply(
                &mut self.world,
                Command::SetHeading { heading },
                &mut self.events,
            );
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);
    }

    /// Mirrors the current world state into the scene.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        let view = query::snake_view(&self.world);
        scene.snake.cells = view.cells;
        scene.score.score = view.score;
        scene.apple.cell = query::apple_position(&self.world);
    }

    /// Events produced by the most recent [`advance`](Session::advance) call.
    #[cfg(test)]
    fn last_events(&self) -> &[Event] {
        &self.events
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Torus Snake experience.

mod session;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use torus_snake_rendering::{Color, Presentation, RenderingBackend};
use torus_snake_rendering_macroquad::MacroquadBackend;
use torus_snake_world::{query, Config, World};

use crate::session::Session;

// Classic arcade geometry: a 32x24 board of 20 px cells stepped ten times
// per second, snake starting as a single cell.
const GRID_COLUMNS: u32 = 32;
const GRID_ROWS: u32 = 24;
const INITIAL_LENGTH: usize = 1;
const STEP_DURATION: Duration = Duration::from_millis(100);

const WINDOW_TITLE: &str = "Torus Snake";
const BACKGROUND_COLOR: Color = Color::from_rgb_u8(0, 0, 0);

/// Command-line options accepted by the Torus Snake binary.
///
/// Gameplay geometry is deliberately not configurable here; the flags only
/// cover session reproducibility and backend behaviour.
#[derive(Debug, Parser)]
#[command(name = "torus-snake", about = "Single-player snake on a toroidal grid")]
struct Args {
    /// Seed for the session RNG; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,
    /// Print the measured frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Torus Snake command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = Config::new(GRID_COLUMNS, GRID_ROWS, INITIAL_LENGTH, STEP_DURATION, seed);
    let world = World::new(config).context("failed to construct the session world")?;

    println!("{}", query::welcome_banner(&world));
    println!("Session seed: {seed}");

    let mut session = Session::new(world);
    let scene = session.scene().context("failed to describe the scene")?;
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND_COLOR, scene);

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |dt, input, scene| {
        session.advance(dt, input);
        session.populate_scene(scene);
    })
}

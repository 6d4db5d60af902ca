use std::time::Duration;

use torus_snake_core::{CellCoord, Command, Event, Heading};
use torus_snake_world::{self as world, query, Config, World};

#[test]
fn deterministic_replay_produces_identical_sessions() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first.events, second.events, "replay diverged between runs");
    assert_eq!(first.snake, second.snake);
    assert_eq!(first.apple, second.apple);
}

#[test]
fn replay_advances_one_cell_per_step_quantum() {
    let outcome = replay(scripted_commands());

    // 40 frames of 50 ms equal 20 full step quanta; a single-cell snake can
    // never self-collide, so every quantum produces exactly one advance.
    let advances = outcome
        .events
        .iter()
        .filter(|event| matches!(event, Event::SnakeAdvanced { .. }))
        .count();
    assert_eq!(advances, 20);
    assert!(!outcome
        .events
        .iter()
        .any(|event| matches!(event, Event::SnakeReset { .. })));
}

#[test]
fn replay_keeps_every_cell_within_the_grid() {
    let outcome = replay(scripted_commands());
    let grid = outcome.grid;

    for event in &outcome.events {
        if let Event::SnakeAdvanced { from, to } = event {
            assert!(grid.contains(*from));
            assert!(grid.contains(*to));
        }
    }
    assert!(grid.contains(outcome.apple));
    for cell in &outcome.snake.cells {
        assert!(grid.contains(*cell));
    }
}

struct ReplayOutcome {
    events: Vec<Event>,
    snake: query::SnakeView,
    apple: CellCoord,
    grid: torus_snake_core::GridSize,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut session = World::new(Config::with_seed(0x5EED_CAFE)).expect("valid config");
    let mut log = Vec::new();

    for command in commands {
        world::apply(&mut session, command, &mut log);
    }

    ReplayOutcome {
        events: log,
        snake: query::snake_view(&session),
        apple: query::apple_position(&session),
        grid: query::grid(&session),
    }
}

fn scripted_commands() -> Vec<Command> {
    let frame = Duration::from_millis(50);
    let mut commands = Vec::new();

    for index in 0..40 {
        match index {
            8 => commands.push(Command::SetHeading {
                heading: Heading::Up,
            }),
            16 => commands.push(Command::SetHeading {
                heading: Heading::Left,
            }),
            24 => commands.push(Command::SetHeading {
                heading: Heading::Down,
            }),
            32 => commands.push(Command::SetHeading {
                heading: Heading::Right,
            }),
            _ => {}
        }
        commands.push(Command::Tick { dt: frame });
    }

    commands
}

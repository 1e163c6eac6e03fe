//! Research Wizard headless driver.
//!
//! Runs the simulation core without a window: a fixed-step loop feeds a
//! scripted input pattern (walk in a circle, fire at a point ahead, dash
//! every couple of seconds), logs gameplay messages and optionally prints
//! the last render frame as JSON.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 1200 --seed 7 --dump-json
//! ```

use clap::Parser;
use glam::Vec2;
use log::{debug, error, info, warn};
use std::path::PathBuf;

use researchwizard::events::combat::CombatMessage;
use researchwizard::game::Game;
use researchwizard::resources::gameconfig::GameConfig;
use researchwizard::resources::input::InputFrame;
use researchwizard::systems::render::{
    CameraView, DrawSprite, HudBars, SpriteRenderer, submit_render_frame,
};

/// Research Wizard simulation core
#[derive(Parser)]
#[command(version, about = "Headless runner for the Research Wizard simulation core")]
struct Cli {
    /// INI file with gameplay tunables (default: ./config.ini if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for enemy placement.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the default configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Print the last render frame as JSON.
    #[arg(long)]
    dump_json: bool,
}

/// Renderer that only counts what it is asked to draw.
#[derive(Default)]
struct CountingRenderer {
    sprites: usize,
    highlighted: usize,
}

impl SpriteRenderer for CountingRenderer {
    fn set_camera(&mut self, _camera: &CameraView) {
        self.sprites = 0;
        self.highlighted = 0;
    }

    fn draw_sprite(&mut self, sprite: &DrawSprite) {
        self.sprites += 1;
        if sprite.highlight {
            self.highlighted += 1;
        }
    }

    fn draw_hud(&mut self, _hud: &HudBars) {}
}

/// Input for frame `frame` of the demo script.
fn scripted_input(frame: u32, dt: f32, player_position: Vec2) -> InputFrame {
    let t = frame as f32 * dt;
    let axis = Vec2::new(t.cos(), t.sin());
    let mut input = InputFrame::default().with_axis(axis);
    if frame % 20 < 10 {
        input = input.with_fire_at(player_position + axis * 60.0);
    }
    if frame % 150 == 75 {
        input = input.with_dash();
    }
    input
}

fn load_config(cli: &Cli) -> GameConfig {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("./config.ini"));
    let mut config = GameConfig::with_path(&path);
    if let Err(e) = config.load_from_file() {
        if cli.config.is_some() {
            warn!("{}, using defaults", e);
        } else {
            debug!("{}, using defaults", e);
        }
    }
    config
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default configuration and quit
    if let Some(path) = cli.write_config.as_ref() {
        match GameConfig::with_path(path).save_to_file() {
            Ok(()) => println!("Default config written to {}", path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = load_config(&cli);
    let mut game = match Game::new(config, cli.seed) {
        Ok(game) => game,
        Err(e) => {
            error!("Setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut renderer = CountingRenderer::default();
    let mut kills = 0u32;
    let mut frames_run = 0u32;
    for frame in 0..cli.frames {
        let position = game
            .player_entity()
            .map(|p| p.common.position)
            .unwrap_or(Vec2::ZERO);
        game.step(cli.dt, &scripted_input(frame, cli.dt, position));
        frames_run += 1;

        for message in game.drain_messages() {
            match message {
                CombatMessage::Killed { .. } => kills += 1,
                CombatMessage::PlayerDefeated { .. } => info!("Player defeated at frame {}", frame),
                CombatMessage::SpawnDropped { archetype } => {
                    warn!("Frame {}: {:?} spawn dropped", frame, archetype)
                }
                other => debug!("Frame {}: {:?}", frame, other),
            }
        }

        submit_render_frame(&game.render_frame(), &mut renderer);

        if !game.is_running() {
            break;
        }
    }

    let arena = game.arena();
    info!(
        "Ran {} frames ({:.2}s): {} entities, {} slugs spawned, {} killed, \
         {} sprites drawn last frame ({} highlighted)",
        frames_run,
        game.time().elapsed,
        game.pool().len(),
        arena.enemies_spawned,
        kills,
        renderer.sprites,
        renderer.highlighted
    );

    if cli.dump_json {
        match serde_json::to_string_pretty(&game.render_frame()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Could not serialize render frame: {}", e);
                std::process::exit(1);
            }
        }
    }
}

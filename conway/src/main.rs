// main.rs - Host window for the life engine and the maze carver

use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use eframe::egui;
use egui::Color32;
use life_engine::{DEFAULT_GRID_SIZE, DEFAULT_LIVE_CHANCE, Engine, EngineConfig, Seed, StepReport};
use maze::Maze;
use tracing::info;

mod camera;
mod ui;

use camera::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Life,
    Maze,
}

/// Interactive Game of Life and maze generator.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Which simulation to open.
    #[arg(long, value_enum, default_value_t = ModeArg::Life)]
    mode: ModeArg,
    /// Side length of the life grid.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,
    /// Percent chance each cell starts alive.
    #[arg(long, default_value_t = DEFAULT_LIVE_CHANCE, value_parser = clap::value_parser!(u8).range(0..=100))]
    live_chance: u8,
    /// Random seed. Drawn from the clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Maze columns.
    #[arg(long, default_value_t = 50)]
    maze_width: usize,
    /// Maze rows.
    #[arg(long, default_value_t = 50)]
    maze_height: usize,
    /// Generations per second while running, 0.5 to 90.
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = parse_speed)]
    speed: f32,
}

const DEFAULT_SPEED: f32 = 5.0;
const MIN_SPEED: f32 = 0.5;
const MAX_SPEED: f32 = 90.0;

fn parse_speed(s: &str) -> Result<f32, String> {
    let speed: f32 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(format!("speed must be between {MIN_SPEED} and {MAX_SPEED} generations per second"));
    }
    Ok(speed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let seed = args.seed.map(Seed).unwrap_or_else(Seed::from_clock);
    let mode = match args.mode {
        ModeArg::Life => {
            let config = EngineConfig::new(args.size, args.live_chance).with_seed(seed);
            Mode::Life(Box::new(LifeState::new(Engine::new(config)?, args.speed)))
        }
        ModeArg::Maze => Mode::Maze(Maze::new(args.maze_width, args.maze_height, seed.value())?),
    };
    info!(mode = ?args.mode, %seed, "opening window");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 960.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(ConwayApp::new(mode))),
    )?;
    Ok(())
}

/// Life engine plus the controls that drive it.
pub struct LifeState {
    pub engine: Engine,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub selected_pattern: usize,
    pub last_report: Option<StepReport>,
}

impl LifeState {
    fn new(engine: Engine, speed: f32) -> Self {
        Self {
            engine,
            is_running: false,
            last_update: Instant::now(),
            update_interval: interval_for(speed),
            selected_pattern: 0,
            last_report: None,
        }
    }
}

pub(crate) fn interval_for(gens_per_sec: f32) -> Duration {
    let speed = if gens_per_sec.is_nan() { DEFAULT_SPEED } else { gens_per_sec };
    Duration::from_secs_f32(1.0 / speed.clamp(MIN_SPEED, MAX_SPEED))
}

pub enum Mode {
    Life(Box<LifeState>),
    Maze(Maze),
}

pub struct ConwayApp {
    pub mode: Mode,
    pub camera: Camera,
    pub live_color: Color32,
    pub dead_color: Color32,
}

impl ConwayApp {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            camera: Camera::default(),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }
}

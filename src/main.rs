// main.rs - Conway's Game of Life board with a pattern library
// Board, engines and patterns live in life_engine; this crate is the window.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use life_engine::{Board, Engine, PatternLibrary, PreviewBoard, preview};

mod config; // Settings file and validation
mod ui;     // eframe::App for LifeApp

use config::{AppConfig, EngineKind};

#[derive(Debug, Parser)]
#[command(version, about = "Conway's Game of Life with a pattern library")]
struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square board
    #[arg(long)]
    size: Option<usize>,

    /// Milliseconds between generations
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Chance of a cell starting alive, 0..=1
    #[arg(long)]
    population: Option<f64>,

    #[arg(long, value_enum)]
    engine: Option<EngineKind>,
}

impl Cli {
    fn resolve(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.update_interval_ms = interval_ms;
        }
        if let Some(population) = self.population {
            config.initial_population = population;
        }
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().resolve()?;
    info!(
        "starting {0}x{0} board, {1} ms interval, {2:?} engine",
        config.board_size, config.update_interval_ms, config.engine
    );

    let app = LifeApp::new(config)?;
    let side = app.board_pixels();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side + ui::SIDE_PANEL_WIDTH + 48.0, side.max(560.0) + 32.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("window closed with error: {err}"))
}

/// Main board plus the library previews and the engine driving them.
pub struct LifeApp {
    pub config: AppConfig,
    pub board: Board,
    engine: Box<dyn Engine>,
    pub library: PatternLibrary,
    pub previews: Vec<PreviewBoard>,
    pub show_library: bool,
    /// Pointer was over the board on the previous frame
    pub pointer_inside: bool,
    rng: StdRng,
}

impl LifeApp {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let engine = config.engine.build().context("building engine")?;
        let library = PatternLibrary::load().context("loading pattern library")?;
        let previews = preview::previews(library.iter(), config.preview_interval());

        let mut rng = StdRng::from_entropy();
        let mut board = Board::new(config.board_size);
        board.set_update_interval(config.update_interval());
        board.randomize(config.initial_population, &mut rng)?;

        Ok(Self {
            config,
            board,
            engine,
            library,
            previews,
            show_library: false,
            pointer_inside: false,
            rng,
        })
    }

    pub fn board_pixels(&self) -> f32 {
        self.config.board_size as f32 * self.config.cell_size
    }

    pub fn randomize(&mut self) {
        if let Err(err) = self.board.randomize(self.config.initial_population, &mut self.rng) {
            log::error!("randomize failed: {err}");
        }
    }

    pub fn open_library(&mut self) {
        // cards restart each time the library opens
        self.previews.iter_mut().for_each(PreviewBoard::reset);
        self.show_library = true;
    }
}

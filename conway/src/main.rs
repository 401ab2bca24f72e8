// main.rs - Conway's Game of Life on a wrapping grid
// The window and input handling live in ui.rs; the simulation itself is in
// conway_core.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway_core::{Journal, LogJournal, Simulation, patterns};
use eframe::egui;
use egui::Color32;
use log::{debug, info, warn};

mod input;
mod load_prompt;
mod logging;
mod settings;
mod ui;

use input::Command;
use load_prompt::LoadPrompt;
use settings::Settings;

const TITLE: &str = "Conway's Game of Life";

fn main() -> Result<()> {
    let settings = Settings::parse();
    logging::init(settings.log_path())?;
    info!("Starting {TITLE} v{}", env!("CARGO_PKG_VERSION"));

    let app = GameOfLife::new(&settings)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size(ui::window_size(&settings)),
        ..Default::default()
    };

    eframe::run_native(TITLE, options, Box::new(|_cc| Box::new(app)))
        .map_err(|e| anyhow!("Could not open the window: {e}"))
}

/// The running application: the simulation plus everything needed to show it.
pub struct GameOfLife {
    sim: Simulation,
    saved_grids: PathBuf,
    cell_size: f32,
    last_update: Instant,
    update_interval: Duration,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
    load_prompt: Option<LoadPrompt>,
    status: Option<String>,
}

impl GameOfLife {
    pub fn new(settings: &Settings) -> Result<Self> {
        let journal: Rc<dyn Journal> = Rc::new(LogJournal::default());
        let codec = settings.codec(journal.clone());
        let mut sim = Simulation::new(
            settings.columns as usize,
            settings.rows as usize,
            codec,
            journal,
        )
        .context("Failed to create the grid")?;

        let mut selected_pattern = 0;
        if let Some(name) = &settings.pattern {
            match patterns::PATTERNS.iter().position(|p| p.name.eq_ignore_ascii_case(name)) {
                Some(index) => {
                    sim.apply_pattern(&patterns::PATTERNS[index])?;
                    selected_pattern = index;
                }
                None => warn!("Unknown pattern {name:?}, starting with an empty grid."),
            }
        }

        Ok(Self {
            sim,
            saved_grids: settings.saved_grids.clone(),
            cell_size: settings.cell_size,
            last_update: Instant::now(),
            update_interval: settings.update_interval(),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern,
            load_prompt: None,
            status: None,
        })
    }

    /// Carries out one command. Returns `false` when the app should close.
    pub fn execute(&mut self, command: Command) -> bool {
        debug!("Executing {command:?}");
        match command {
            Command::ToggleRunning => {
                let state = self.sim.toggle_running();
                self.last_update = Instant::now();
                info!("Simulation {state:?} at generation {}.", self.sim.generation());
            }
            Command::PaintCell { row, col } => {
                if let Err(err) = self.sim.toggle_cell(row, col) {
                    debug!("Ignoring paint: {err}");
                }
            }
            Command::Save => self.save(),
            Command::OpenLoadPrompt => {
                if self.sim.is_running() {
                    debug!("Not opening the load prompt while running.");
                } else {
                    self.load_prompt = Some(LoadPrompt::open(&self.saved_grids));
                }
            }
            Command::Load(path) => {
                self.load_prompt = None;
                self.status = Some(match self.sim.load(&path) {
                    Ok(()) => format!("Loaded {}", path.display()),
                    Err(err) => format!("Load failed: {err}"),
                });
            }
            Command::Clear => {
                if let Err(err) = self.sim.clear() {
                    debug!("Ignoring clear: {err}");
                }
            }
            Command::ApplyPattern(index) => match patterns::PATTERNS.get(index) {
                Some(pattern) => {
                    if let Err(err) = self.sim.apply_pattern(pattern) {
                        debug!("Ignoring pattern: {err}");
                    }
                }
                None => warn!("No pattern #{index}."),
            },
            Command::Quit => {
                info!("Quitting at generation {}.", self.sim.generation());
                return false;
            }
        }
        true
    }

    /// Steps the simulation if it is running and the frame clock says a
    /// generation is due. Returns whether a step happened.
    pub fn tick(&mut self) -> bool {
        if !self.sim.is_running() || self.last_update.elapsed() < self.update_interval {
            return false;
        }
        self.last_update = Instant::now();
        self.sim.step()
    }

    /// Time until the next generation is due.
    pub fn time_to_next_tick(&self) -> Duration {
        self.update_interval.saturating_sub(self.last_update.elapsed())
    }

    fn save(&mut self) {
        if self.sim.is_running() {
            debug!("Not saving while running.");
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.sim.recompute_population();
        self.status = Some(match self.sim.save_snapshot(&self.saved_grids, timestamp) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => format!("Save failed: {err}"),
        });
    }
}

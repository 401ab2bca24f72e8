// settings.rs - Command line configuration

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use conway_core::{Charset, DecodeMode, GridCodec, Journal};

/// Conway's Game of Life on a wrapping grid.
///
/// Space starts and pauses. While paused, hold the left mouse button to bring
/// cells to life, press S to save the grid and L to load one.
#[derive(Parser, Debug, Clone)]
#[command(name = "conway", version)]
pub struct Settings {
    /// Number of cell columns.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: u32,
    /// Number of cell rows.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,
    /// Side of one cell in pixels.
    #[arg(long = "cell-size", value_name = "PIXELS", default_value_t = 10.0, value_parser = parse_cell_size)]
    pub cell_size: f32,
    /// Generations per second while running.
    #[arg(long, value_name = "GENERATIONS", default_value_t = 10.0, value_parser = parse_speed)]
    pub speed: f32,
    /// Character written for live cells in saved grids.
    #[arg(long = "alive-symbol", value_name = "CHAR", default_value = "█")]
    pub alive_symbol: String,
    /// Character written for dead cells in saved grids.
    #[arg(long = "dead-symbol", value_name = "CHAR", default_value_t = ' ', value_parser = parse_dead_symbol)]
    pub dead_symbol: char,
    /// Write saved grids as plain ASCII.
    #[arg(long = "ascii-only")]
    pub ascii_only: bool,
    /// Refuse to load grids containing unexpected characters.
    #[arg(long = "strict-load")]
    pub strict_load: bool,
    /// Directory saved grids are written to and offered from.
    #[arg(long = "saved-grids", value_name = "DIR", default_value = "saved_grids")]
    pub saved_grids: PathBuf,
    /// Log file, or `-` to log to stderr.
    #[arg(long = "log-file", value_name = "PATH", default_value = "logs/conway.log")]
    pub log_file: PathBuf,
    /// Pattern to place on the grid at startup, e.g. "glider".
    #[arg(long)]
    pub pattern: Option<String>,
}

impl Settings {
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.speed))
    }

    /// Pixel size of the drawn grid as `[width, height]`.
    pub fn grid_size(&self) -> [f32; 2] {
        [
            self.columns as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        ]
    }

    /// Where log lines go, or `None` for stderr.
    pub fn log_path(&self) -> Option<&Path> {
        (self.log_file != Path::new("-")).then_some(self.log_file.as_path())
    }

    pub fn codec(&self, journal: Rc<dyn Journal>) -> GridCodec {
        let charset = if self.ascii_only { Charset::Ascii } else { Charset::Utf8 };
        let mode = if self.strict_load { DecodeMode::Strict } else { DecodeMode::Permissive };
        GridCodec::new(&self.alive_symbol, self.dead_symbol, journal)
            .with_charset(charset)
            .with_decode_mode(mode)
    }
}

fn parse_cell_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (2.0..=100.0).contains(&size) {
        Ok(size)
    } else {
        Err("cell size must be between 2 and 100 pixels".to_owned())
    }
}

fn parse_speed(s: &str) -> Result<f32, String> {
    let speed: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.5..=90.0).contains(&speed) {
        Ok(speed)
    } else {
        Err("speed must be between 0.5 and 90 generations per second".to_owned())
    }
}

fn parse_dead_symbol(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some('\n' | '\r'), None) => Err("a line break cannot mark dead cells".to_owned()),
        (Some(symbol), None) => Ok(symbol),
        _ => Err("expected exactly one character".to_owned()),
    }
}

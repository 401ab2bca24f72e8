// simulation.rs - The simulation state and the commands that drive it

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::patterns::Pattern;
use crate::{Grid, GridCodec, Journal, LifeError, LifeResult, rules};

/// Whether generations are currently advancing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Owns the current grid together with its generation and population
/// counters.
///
/// Every failing operation leaves the simulation as it found it.
pub struct Simulation {
    grid: Grid,
    generation: u64,
    population: usize,
    state: RunState,
    codec: GridCodec,
    journal: Rc<dyn Journal>,
}

impl Simulation {
    /// Starts a paused simulation on an all-dead `width` x `height` grid.
    pub fn new(width: usize, height: usize, codec: GridCodec, journal: Rc<dyn Journal>) -> LifeResult<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            generation: 0,
            population: 0,
            state: RunState::Paused,
            codec,
            journal,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Population as of the last step or recount; see
    /// [`Simulation::recompute_population`].
    pub fn population(&self) -> usize {
        self.population
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Flips between running and paused. The grid is not touched.
    pub fn toggle_running(&mut self) -> RunState {
        self.set_running(!self.is_running());
        self.state
    }

    pub fn set_running(&mut self, running: bool) {
        self.state = if running { RunState::Running } else { RunState::Paused };
    }

    /// Advances one generation if running. Returns whether a step happened.
    pub fn step(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.grid = rules::advance(&self.grid);
        self.generation += 1;
        self.recompute_population();
        true
    }

    /// Recounts live cells. Call this before showing the population while
    /// paused, since nothing else keeps it current then.
    pub fn recompute_population(&mut self) -> usize {
        self.population = self.grid.population();
        self.population
    }

    /// Brings the cell at `(row, col)` to life. Only allowed while paused.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> LifeResult<()> {
        self.ensure_paused("edit cells")?;
        self.grid.set(row, col, true)
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&mut self) -> LifeResult<()> {
        self.ensure_paused("clear the grid")?;
        self.grid.clear();
        self.generation = 0;
        self.recompute_population();
        self.journal.info("Cleared the grid.");
        Ok(())
    }

    /// Replaces the grid contents with `pattern`, centered and wrapped around
    /// the edges if it does not fit.
    pub fn apply_pattern(&mut self, pattern: &Pattern) -> LifeResult<()> {
        self.ensure_paused("apply a pattern")?;
        let (width, height) = pattern.size();
        let top = self.grid.height().saturating_sub(height) / 2;
        let left = self.grid.width().saturating_sub(width) / 2;
        self.grid.clear();
        for (row, col) in pattern.cells() {
            self.grid.set_wrapping(top + row, left + col, true);
        }
        self.generation = 0;
        self.recompute_population();
        self.journal.info(&format!("Applied the {} pattern.", pattern.name));
        Ok(())
    }

    /// Writes the current grid to `path`.
    pub fn save(&self, path: &Path) -> LifeResult<()> {
        self.codec.save(&self.grid, path).map(drop).inspect_err(|err| {
            self.journal
                .error(&format!("Could not save the grid to {}: {err}", path.display()));
        })
    }

    /// Saves into `dir` under a name recording the timestamp, generation and
    /// population, creating `dir` if needed. Returns the file written.
    pub fn save_snapshot(&self, dir: &Path, timestamp: u64) -> LifeResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| LifeError::io(dir, e))?;
        let path = dir.join(self.snapshot_file_name(timestamp));
        self.save(&path)?;
        Ok(path)
    }

    /// Counts live cells itself, so edits made since the last recount are
    /// reflected in the name.
    pub fn snapshot_file_name(&self, timestamp: u64) -> String {
        format!(
            "grid_{timestamp}_gen{}_pop{}.txt",
            self.generation,
            self.grid.population()
        )
    }

    /// Replaces the grid with the one stored at `path` and restarts the
    /// generation count. Only allowed while paused.
    pub fn load(&mut self, path: &Path) -> LifeResult<()> {
        self.ensure_paused("load a grid")?;
        self.journal
            .info(&format!("Loading grid from {}.", path.display()));
        let grid = fs::read_to_string(path)
            .map_err(|e| LifeError::io(path, e))
            .and_then(|text| self.codec.decode(&text))
            .inspect_err(|err| {
                self.journal
                    .error(&format!("Could not load a grid from {}: {err}", path.display()));
            })?;
        self.journal.info(&format!(
            "Loaded a {}x{} grid.",
            grid.width(),
            grid.height()
        ));
        self.grid = grid;
        self.generation = 0;
        self.recompute_population();
        Ok(())
    }

    fn ensure_paused(&self, operation: &'static str) -> LifeResult<()> {
        if self.is_running() {
            self.journal
                .warn(&format!("Refusing to {operation} while running."));
            return Err(LifeError::InvalidState { operation });
        }
        Ok(())
    }
}

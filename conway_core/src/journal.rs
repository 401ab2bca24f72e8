// journal.rs - Logging collaborator handed to the codec and the simulation
//
// Nothing in the core logs through process-wide state directly; it records
// through a Journal it was given, so callers decide where lines go.

use std::cell::RefCell;

use log::Level;

/// Sink for diagnostic lines produced by the core.
pub trait Journal {
    fn record(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}

/// Forwards every line to the `log` facade under a fixed target.
#[derive(Debug, Clone)]
pub struct LogJournal {
    target: &'static str,
}

impl LogJournal {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogJournal {
    fn default() -> Self {
        Self::new("conway")
    }
}

impl Journal for LogJournal {
    fn record(&self, level: Level, message: &str) {
        log::log!(target: self.target, level, "{message}");
    }
}

/// Keeps every line in memory. Used by tests to check what was reported.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    lines: RefCell<Vec<(Level, String)>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Whether any line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }
}

impl Journal for MemoryJournal {
    fn record(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_owned()));
    }
}

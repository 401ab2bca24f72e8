// codec.rs - Plain-text grid snapshots
//
// A snapshot is one line per row and one character per cell, with no header:
// the dimensions are whatever the lines say. Only the dead symbol is
// significant when reading, so files written with a different live glyph
// still load.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use crate::{Grid, Journal, LifeError, LifeResult, MalformedGrid};

/// Live cell glyph used when the configured one is unusable (U+2588).
pub const DEFAULT_ALIVE: char = '█';
/// Live cell glyph used to retry a failed save.
pub const FALLBACK_ALIVE: char = '#';
/// Dead cells are written as spaces unless configured otherwise.
pub const DEFAULT_DEAD: char = ' ';

/// Character set a snapshot is written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    Ascii,
}

impl Charset {
    pub fn can_encode(self, symbol: char) -> bool {
        match self {
            Charset::Utf8 => true,
            Charset::Ascii => symbol.is_ascii(),
        }
    }
}

/// How strictly [`GridCodec::decode`] treats characters it does not expect.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Anything other than the dead symbol is a live cell.
    #[default]
    Permissive,
    /// Only the live and dead symbols are accepted.
    Strict,
}

pub struct GridCodec {
    alive: char,
    dead: char,
    charset: Charset,
    mode: DecodeMode,
    journal: Rc<dyn Journal>,
}

impl GridCodec {
    /// Creates a codec writing `alive_symbol` for live cells and `dead` for
    /// dead ones.
    ///
    /// A live symbol that is not exactly one character, is a line break, or
    /// collides with the dead symbol is replaced with [`DEFAULT_ALIVE`] and a
    /// warning is recorded. A line break as dead symbol becomes
    /// [`DEFAULT_DEAD`].
    pub fn new(alive_symbol: &str, dead: char, journal: Rc<dyn Journal>) -> Self {
        let dead = if is_line_break(dead) {
            journal.warn(&format!(
                "Dead cell symbol {dead:?} is a line break. Using {DEFAULT_DEAD:?} instead."
            ));
            DEFAULT_DEAD
        } else {
            dead
        };
        let mut chars = alive_symbol.chars();
        let alive = match (chars.next(), chars.next()) {
            (Some(alive), None) if is_line_break(alive) => {
                let substitute = substitute_for(dead);
                journal.warn(&format!(
                    "Live cell symbol {alive:?} is a line break. Using {substitute:?} instead."
                ));
                substitute
            }
            (Some(alive), None) if alive != dead => alive,
            (Some(alive), None) => {
                let substitute = substitute_for(dead);
                journal.warn(&format!(
                    "Live cell symbol {alive:?} is also the dead cell symbol. Using {substitute:?} instead."
                ));
                substitute
            }
            _ => {
                let substitute = substitute_for(dead);
                journal.warn(&format!(
                    "Live cell symbol {alive_symbol:?} is not exactly one character. Using {substitute:?} instead."
                ));
                substitute
            }
        };
        Self {
            alive,
            dead,
            charset: Charset::default(),
            mode: DecodeMode::default(),
            journal,
        }
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn alive_symbol(&self) -> char {
        self.alive
    }

    pub fn dead_symbol(&self) -> char {
        self.dead
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn decode_mode(&self) -> DecodeMode {
        self.mode
    }

    /// Renders `grid` with the configured symbols. Every row, the last one
    /// included, ends in a newline.
    pub fn encode(&self, grid: &Grid) -> String {
        render(grid, self.alive, self.dead)
    }

    /// Renders `grid` with `alive` for live cells, failing if either symbol
    /// is outside the configured charset.
    pub fn encode_with(&self, grid: &Grid, alive: char) -> LifeResult<String> {
        for symbol in [alive, self.dead] {
            if !self.charset.can_encode(symbol) {
                return Err(LifeError::Unencodable(symbol));
            }
        }
        Ok(render(grid, alive, self.dead))
    }

    /// Parses a snapshot. Rows must all have the same, non-zero length.
    pub fn decode(&self, text: &str) -> LifeResult<Grid> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (row, line) in text.lines().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                if symbol == self.dead {
                    cells.push(false);
                } else if self.mode == DecodeMode::Strict && symbol != self.alive {
                    return Err(MalformedGrid::UnknownSymbol { row, col, symbol }.into());
                } else {
                    cells.push(true);
                }
            }
            if let Some(first) = rows.first() {
                if first.len() != cells.len() {
                    return Err(MalformedGrid::RaggedRow {
                        row,
                        expected: first.len(),
                        found: cells.len(),
                    }
                    .into());
                }
            }
            rows.push(cells);
        }
        match rows.first() {
            None => Err(MalformedGrid::Empty.into()),
            Some(first) if first.is_empty() => Err(MalformedGrid::ZeroWidth.into()),
            Some(_) => Grid::from_rows(rows),
        }
    }

    /// Writes `grid` to a new file at `path`, returning the live symbol that
    /// ended up in the file.
    pub fn save(&self, grid: &Grid, path: &Path) -> LifeResult<char> {
        self.save_with(grid, path, |path: &Path| File::create(path))
    }

    /// Like [`GridCodec::save`], opening the destination with `open`.
    ///
    /// If writing with the configured live symbol fails, the whole write is
    /// attempted once more with [`FALLBACK_ALIVE`] before giving up.
    pub fn save_with<W, F>(&self, grid: &Grid, path: &Path, mut open: F) -> LifeResult<char>
    where
        W: Write,
        F: FnMut(&Path) -> io::Result<W>,
    {
        self.journal.info(&format!(
            "Saving grid to {} using {:?} as the live cell symbol.",
            path.display(),
            self.alive
        ));
        let err = match self.write_once(grid, path, self.alive, &mut open) {
            Ok(()) => return Ok(self.alive),
            Err(err) => err,
        };
        self.journal.error(&format!(
            "Could not save using {:?} as the live cell symbol: {err}",
            self.alive
        ));
        if self.alive == FALLBACK_ALIVE || self.dead == FALLBACK_ALIVE {
            return Err(err);
        }

        self.journal
            .info(&format!("Retrying with {FALLBACK_ALIVE:?} as the live cell symbol."));
        match self.write_once(grid, path, FALLBACK_ALIVE, &mut open) {
            Ok(()) => Ok(FALLBACK_ALIVE),
            Err(err) => {
                self.journal.error(&format!(
                    "Could not save using {FALLBACK_ALIVE:?} either: {err}"
                ));
                Err(err)
            }
        }
    }

    fn write_once<W, F>(&self, grid: &Grid, path: &Path, alive: char, open: &mut F) -> LifeResult<()>
    where
        W: Write,
        F: FnMut(&Path) -> io::Result<W>,
    {
        let text = self.encode_with(grid, alive)?;
        let mut file = open(path).map_err(|e| LifeError::io(path, e))?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| LifeError::io(path, e))
    }
}

fn render(grid: &Grid, alive: char, dead: char) -> String {
    let mut text = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        text.extend(row.iter().map(|&cell| if cell { alive } else { dead }));
        text.push('\n');
    }
    text
}

/// Symbols that would split a row in two when read back.
pub fn is_line_break(symbol: char) -> bool {
    symbol == '\n' || symbol == '\r'
}

fn substitute_for(dead: char) -> char {
    if dead == DEFAULT_ALIVE { FALLBACK_ALIVE } else { DEFAULT_ALIVE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryJournal;
    use log::Level;
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn codec(alive: &str) -> (GridCodec, Rc<MemoryJournal>) {
        let journal = Rc::new(MemoryJournal::new());
        (GridCodec::new(alive, DEFAULT_DEAD, journal.clone()), journal)
    }

    fn glider() -> Grid {
        let mut grid = Grid::new(4, 3).unwrap();
        for (row, col) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_encode_layout() {
        let (codec, journal) = codec("█");
        assert_eq!(codec.encode(&glider()), " █  \n  █ \n███ \n");
        assert!(journal.lines().is_empty());
    }

    #[test]
    fn test_bad_alive_symbol_is_replaced() {
        for symbol in ["", "ab", "██"] {
            let (codec, journal) = codec(symbol);
            assert_eq!(codec.alive_symbol(), DEFAULT_ALIVE);
            assert!(journal.contains(Level::Warn, "not exactly one character"));
        }

        let (codec, journal) = codec(" ");
        assert_eq!(codec.alive_symbol(), DEFAULT_ALIVE);
        assert!(journal.contains(Level::Warn, "also the dead cell symbol"));

        let journal = Rc::new(MemoryJournal::new());
        let codec = GridCodec::new("█", '█', journal);
        assert_eq!(codec.alive_symbol(), FALLBACK_ALIVE);
    }

    #[test]
    fn test_line_break_symbols_are_replaced() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(0, 1, true).unwrap();
        grid.set(1, 1, true).unwrap();

        let (codec, journal) = codec("\r");
        assert_eq!(codec.alive_symbol(), DEFAULT_ALIVE);
        assert!(journal.contains(Level::Warn, "line break"));
        assert_eq!(codec.decode(&codec.encode(&grid)).unwrap(), grid);

        let journal = Rc::new(MemoryJournal::new());
        let codec = GridCodec::new("#", '\n', journal.clone());
        assert_eq!(codec.dead_symbol(), DEFAULT_DEAD);
        assert!(journal.contains(Level::Warn, "Dead cell symbol"));
        assert_eq!(codec.decode(&codec.encode(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_save_to_file() {
        let dir = std::env::temp_dir().join(format!("conway_codec_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("glider.txt");

        let (codec, _) = codec("█");
        assert_eq!(codec.save(&glider(), &path).unwrap(), '█');
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(codec.decode(&text).unwrap(), glider());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_decode_is_permissive() {
        let (codec, _) = codec("█");
        let grid = codec.decode(" #  \n  x \nO█. \n").unwrap();
        assert_eq!(grid, glider());
    }

    #[test]
    fn test_decode_strict_rejects_unknown_symbols() {
        let (codec, _) = codec("█");
        let codec = codec.with_decode_mode(DecodeMode::Strict);
        assert_eq!(codec.decode(" █  \n  █ \n███ \n").unwrap(), glider());
        assert!(matches!(
            codec.decode(" █  \n  # \n"),
            Err(LifeError::Malformed(MalformedGrid::UnknownSymbol { row: 1, col: 2, symbol: '#' }))
        ));
    }

    #[test]
    fn test_decode_line_endings() {
        let (codec, _) = codec("#");
        let grid = codec.decode("# \r\n #\r\n").unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.population(), 2);
        // Missing trailing newline is fine too.
        assert_eq!(codec.decode("# \n #").unwrap(), grid);
    }

    #[test]
    fn test_decode_malformed() {
        let (codec, _) = codec("#");
        let err = |text: &str| match codec.decode(text) {
            Err(LifeError::Malformed(m)) => m,
            other => panic!("expected malformed grid, got {other:?}"),
        };
        assert_eq!(err(""), MalformedGrid::Empty);
        assert_eq!(err("\n\n"), MalformedGrid::ZeroWidth);
        assert_eq!(
            err("##\n#\n##\n"),
            MalformedGrid::RaggedRow { row: 1, expected: 2, found: 1 }
        );
        assert_eq!(
            err("##\n##\n\n"),
            MalformedGrid::RaggedRow { row: 2, expected: 2, found: 0 }
        );
    }

    #[test]
    fn test_ascii_charset_rejects_block() {
        let (codec, _) = codec("█");
        let codec = codec.with_charset(Charset::Ascii);
        assert!(matches!(
            codec.encode_with(&glider(), '█'),
            Err(LifeError::Unencodable('█'))
        ));
        assert!(codec.encode_with(&glider(), '#').is_ok());
    }

    /// Writer that shares its buffer with the test and can be told to fail.
    struct Sink {
        fail: bool,
        written: Rc<RefCell<Vec<u8>>>,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            self.written.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_save_falls_back_once_on_write_error() {
        let (codec, journal) = codec("█");
        let written = Rc::new(RefCell::new(Vec::new()));
        let mut opened = 0;
        let used = codec
            .save_with(&glider(), Path::new("grid.txt"), |_| {
                opened += 1;
                written.borrow_mut().clear();
                Ok(Sink { fail: opened == 1, written: written.clone() })
            })
            .unwrap();
        assert_eq!(used, '#');
        assert_eq!(opened, 2);
        assert_eq!(String::from_utf8(written.borrow().clone()).unwrap(), " #  \n  # \n### \n");
        assert!(journal.contains(Level::Error, "disk on fire"));
        assert!(journal.contains(Level::Info, "Retrying"));
        // The configured symbol is kept for the next save.
        assert_eq!(codec.alive_symbol(), '█');
    }

    #[test]
    fn test_save_gives_up_after_one_retry() {
        let (codec, journal) = codec("█");
        let mut opened = 0;
        let result = codec.save_with(&glider(), Path::new("grid.txt"), |_| {
            opened += 1;
            Ok(Sink { fail: true, written: Rc::default() })
        });
        assert!(matches!(result, Err(LifeError::Io { .. })));
        assert_eq!(opened, 2);
        assert!(journal.contains(Level::Error, "either"));
    }

    #[test]
    fn test_save_without_retry_when_already_fallback() {
        let (codec, _) = codec("#");
        let mut opened = 0;
        let result = codec.save_with(&glider(), Path::new("grid.txt"), |path| {
            opened += 1;
            Err::<Sink, _>(io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
        });
        assert!(matches!(result, Err(LifeError::Io { .. })));
        assert_eq!(opened, 1);
    }

    #[test]
    fn test_save_ascii_degrades_to_hash() {
        let (codec, journal) = codec("█");
        let codec = codec.with_charset(Charset::Ascii);
        let written = Rc::new(RefCell::new(Vec::new()));
        let used = codec
            .save_with(&glider(), Path::new("grid.txt"), |_| {
                Ok(Sink { fail: false, written: written.clone() })
            })
            .unwrap();
        assert_eq!(used, '#');
        assert!(written.borrow().is_ascii());
        assert!(journal.contains(Level::Error, "cannot be written"));
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1..24usize, 1..24usize).prop_flat_map(|(width, height)| {
            proptest::collection::vec(any::<bool>(), width * height).prop_map(move |cells| {
                let rows = cells.chunks(width).map(<[bool]>::to_vec).collect();
                Grid::from_rows(rows).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn test_encode_decode_round_trip(
            grid in arb_grid(),
            alive in prop::sample::select(vec!["█", "#", "O", "*", "\r", "\n"]),
            dead in prop::sample::select(vec![' ', '.', '-', '\n', '\r']),
            strict: bool,
        ) {
            let mode = if strict { DecodeMode::Strict } else { DecodeMode::Permissive };
            let codec = GridCodec::new(alive, dead, Rc::new(MemoryJournal::new()))
                .with_decode_mode(mode);
            let text = codec.encode(&grid);
            prop_assert_eq!(text.lines().count(), grid.height());
            prop_assert!(text.ends_with('\n'));
            prop_assert_eq!(codec.decode(&text).unwrap(), grid);
        }
    }
}

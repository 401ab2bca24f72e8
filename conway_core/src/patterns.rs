// patterns.rs - Named starting patterns

/// A well-known pattern drawn as text: `O` is a live cell, anything else dead.
pub struct Pattern {
    pub name: &'static str,
    art: &'static str,
}

impl Pattern {
    /// Coordinates of the live cells, relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.art.lines().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, c)| c == 'O')
                .map(move |(col, _)| (row, col))
        })
    }

    /// Bounding box as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        let width = self.art.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        (width, self.art.lines().count())
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        art: "\
.O.
..O
OOO",
    },
    Pattern {
        name: "Blinker",
        art: "OOO",
    },
    Pattern {
        name: "Toad",
        art: "\
.OOO
OOO.",
    },
    Pattern {
        name: "Beacon",
        art: "\
OO..
OO..
..OO
..OO",
    },
    Pattern {
        name: "Pulsar",
        art: "\
..OOO...OOO..
.............
O....O.O....O
O....O.O....O
O....O.O....O
..OOO...OOO..
.............
..OOO...OOO..
O....O.O....O
O....O.O....O
O....O.O....O
.............
..OOO...OOO..",
    },
    Pattern {
        name: "R-pentomino",
        art: "\
.OO
OO.
.O.",
    },
    Pattern {
        name: "Gosper Glider Gun",
        art: "\
........................O...........
......................O.O...........
............OO......OO............OO
...........O...O....OO............OO
OO........O.....O...OO..............
OO........O...O.OO....O.O...........
..........O.....O.......O...........
...........O...O....................
............OO......................",
    },
];

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

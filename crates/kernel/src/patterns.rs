//! Built-in starting patterns.

use lifegrid_common::{BoardError, Coord};

use crate::board::Board;

/// A named arrangement of live cells on a default-sized board.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Default board height.
    pub rows: usize,
    /// Default board width.
    pub cols: usize,
    /// Live cells relative to the default board.
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "sample",
        description: "the classic 5x5 demo board, grows into a beehive",
        rows: 5,
        cols: 5,
        cells: &[(1, 3), (2, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "block",
        description: "2x2 still life",
        rows: 4,
        cols: 4,
        cells: &[(1, 1), (1, 2), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        description: "period-2 oscillator",
        rows: 5,
        cols: 5,
        cells: &[(2, 1), (2, 2), (2, 3)],
    },
    Pattern {
        name: "toad",
        description: "period-2 oscillator",
        rows: 6,
        cols: 6,
        cells: &[(2, 2), (2, 3), (2, 4), (3, 1), (3, 2), (3, 3)],
    },
    Pattern {
        name: "beacon",
        description: "period-2 oscillator",
        rows: 6,
        cols: 6,
        cells: &[
            (1, 1),
            (1, 2),
            (2, 1),
            (2, 2),
            (3, 3),
            (3, 4),
            (4, 3),
            (4, 4),
        ],
    },
    Pattern {
        name: "glider",
        description: "spaceship moving one cell diagonally every 4 generations",
        rows: 8,
        cols: 8,
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
];

/// Look up a built-in pattern by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Place the pattern on its default board.
    pub fn board(&self) -> Result<Board, BoardError> {
        self.place(self.rows, self.cols)
    }

    /// Place the pattern centered on a `rows` x `cols` board.
    ///
    /// On boards smaller than the default the pattern keeps its original
    /// offsets, so it fails with `InvalidBoard` if a live cell falls outside.
    pub fn place(&self, rows: usize, cols: usize) -> Result<Board, BoardError> {
        let offset = Coord::new(
            rows.saturating_sub(self.rows) / 2,
            cols.saturating_sub(self.cols) / 2,
        );
        self.place_at(rows, cols, offset)
    }

    /// Place the pattern shifted by `offset` from its default position.
    pub fn place_at(&self, rows: usize, cols: usize, offset: Coord) -> Result<Board, BoardError> {
        Board::with_live_cells(
            rows,
            cols,
            self.cells
                .iter()
                .map(|&(r, c)| (r + offset.row, c + offset.col)),
        )
    }
}

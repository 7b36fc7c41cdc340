use lifegrid_common::Cell;
use lifegrid_kernel::Board;

/// Renderer-agnostic interface. All output strategies implement this trait.
///
/// A renderer turns one generation of a board into some output. It never
/// mutates the board.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the board as it stands at `generation`.
    fn render(&self, board: &Board, generation: u64) -> Self::Output;
}

/// Comma-separated `0`/`1` rows, one line per board row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer {
    /// Emit a separator after the last cell of each row as well.
    pub trailing_separator: bool,
}

impl CsvRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trailing_separator() -> Self {
        Self {
            trailing_separator: true,
        }
    }
}

impl Renderer for CsvRenderer {
    type Output = String;

    fn render(&self, board: &Board, _generation: u64) -> String {
        let mut out = String::with_capacity(board.rows() * (board.cols() * 2 + 1));
        for row in board.iter_rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push(char::from(b'0' + cell.to_raw()));
            }
            if self.trailing_separator {
                out.push(',');
            }
            out.push('\n');
        }
        out
    }
}

/// One character per cell, one line per row.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRenderer {
    pub live: char,
    pub dead: char,
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self {
            live: '#',
            dead: '.',
        }
    }
}

impl GlyphRenderer {
    pub fn new(live: char, dead: char) -> Self {
        Self { live, dead }
    }
}

impl Renderer for GlyphRenderer {
    type Output = String;

    fn render(&self, board: &Board, _generation: u64) -> String {
        let mut out = String::new();
        for row in board.iter_rows() {
            out.extend(row.iter().map(|&cell| match cell {
                Cell::Live => self.live,
                Cell::Dead => self.dead,
            }));
            out.push('\n');
        }
        out
    }
}

/// State of a single board position.
///
/// The raw integer encoding is `0` for dead and `1` for live; any other value
/// is rejected when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Live,
}

impl Cell {
    /// Raw value of a dead cell.
    pub const DEAD_RAW: u8 = 0x00;
    /// Raw value of a live cell.
    pub const LIVE_RAW: u8 = 0x01;

    pub fn is_live(self) -> bool {
        self == Cell::Live
    }

    /// Decode a raw integer state. Returns `None` for anything but 0 or 1.
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            Self::DEAD_RAW => Some(Cell::Dead),
            Self::LIVE_RAW => Some(Cell::Live),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            Cell::Dead => Self::DEAD_RAW,
            Cell::Live => Self::LIVE_RAW,
        }
    }
}

impl From<bool> for Cell {
    fn from(live: bool) -> Self {
        if live { Cell::Live } else { Cell::Dead }
    }
}

/// A 0-based (row, column) board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

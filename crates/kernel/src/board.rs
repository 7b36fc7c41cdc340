use lifegrid_common::{BoardError, Cell, Coord, ShapeFault};
use serde::{Deserialize, Serialize};

/// Relative (row, col) offsets of the Moore neighborhood.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How neighbor lookups behave at the board edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Off-board neighbors do not exist; edges and corners have fewer neighbors.
    #[default]
    Clamped,
    /// Both axes wrap around.
    Toroidal,
}

/// A rectangular, non-empty grid of cells stored row-major.
///
/// Every `Board` value upholds the shape invariant: at least one row, at least
/// one column, all rows the same length. Stepping never mutates the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An all-dead board.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::empty(rows, cols));
        }
        let too_large = || BoardError::from(ShapeFault::TooLarge { rows, cols });
        let len = rows.checked_mul(cols).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, Cell::Dead);
        Ok(Self { rows, cols, cells })
    }

    /// Build a board from nested rows of cells.
    pub fn from_rows<R: AsRef<[Cell]>>(grid: &[R]) -> Result<Self, BoardError> {
        let (rows, cols) = check_shape::<Cell, _>(grid)?;
        let cells = grid
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Ok(Self { rows, cols, cells })
    }

    /// Build a board from raw integer states (0 = dead, 1 = live).
    ///
    /// Fails on the first value outside {0, 1}.
    pub fn from_raw<R: AsRef<[u8]>>(grid: &[R]) -> Result<Self, BoardError> {
        let (rows, cols) = check_shape::<u8, _>(grid)?;
        let mut cells = Vec::with_capacity(rows * cols);
        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.as_ref().iter().enumerate() {
                let cell =
                    Cell::from_raw(value).ok_or_else(|| BoardError::invalid_cell(r, c, value))?;
                cells.push(cell);
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// An all-dead board with the given positions set live.
    pub fn with_live_cells<I, C>(rows: usize, cols: usize, live: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        let mut board = Self::new(rows, cols)?;
        for coord in live {
            let coord = coord.into();
            if board.set(coord, Cell::Live).is_none() {
                return Err(ShapeFault::OutOfBounds {
                    row: coord.row,
                    col: coord.col,
                    rows,
                    cols,
                }
                .into());
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell at a position, or `None` when off the board.
    pub fn get(&self, coord: impl Into<Coord>) -> Option<Cell> {
        let index = self.index(coord.into())?;
        Some(self.cells[index])
    }

    /// Overwrite a cell. Returns the previous state, or `None` when off the board.
    pub fn set(&mut self, coord: impl Into<Coord>, cell: Cell) -> Option<Cell> {
        let index = self.index(coord.into())?;
        Some(std::mem::replace(&mut self.cells[index], cell))
    }

    /// Rows as slices, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Positions of all live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_live())
            .map(|(index, _)| self.coord_of(index))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_live()).count()
    }

    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|c| !c.is_live())
    }

    /// Raw integer rendition of the board, one `Vec` per row.
    pub fn to_raw(&self) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|c| c.to_raw()).collect())
            .collect()
    }

    /// Count live cells in the Moore neighborhood of `coord`.
    pub fn live_neighbors(&self, coord: Coord, topology: Topology) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| self.neighbor(coord, dr, dc, topology))
            .filter(|&index| self.cells[index].is_live())
            .count()
    }

    /// The next generation with clamped edges.
    pub fn next_generation(&self) -> Board {
        self.next_generation_with(Topology::Clamped)
    }

    /// The next generation under the given edge topology.
    ///
    /// Every cell is derived from `self` only; the result is a new board with
    /// identical dimensions.
    pub fn next_generation_with(&self, topology: Topology) -> Board {
        let cells = (0..self.cells.len())
            .map(|index| {
                let coord = self.coord_of(index);
                let current = self.cells[index];
                let neighbors = self.live_neighbors(coord, topology);
                let next = next_state(current, neighbors);
                if next != current {
                    tracing::trace!(
                        row = coord.row,
                        col = coord.col,
                        neighbors,
                        ?next,
                        "cell changed"
                    );
                }
                next
            })
            .collect();
        Board {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Deterministic FNV-1a hash over dimensions and cell states.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &(self.rows as u64).to_le_bytes());
        mix(&mut h, &(self.cols as u64).to_le_bytes());
        for cell in &self.cells {
            mix(&mut h, &[cell.to_raw()]);
        }
        h
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        Some(coord.row * self.cols + coord.col)
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    fn neighbor(&self, coord: Coord, dr: isize, dc: isize, topology: Topology) -> Option<usize> {
        let (row, col) = match topology {
            Topology::Clamped => (
                coord.row.checked_add_signed(dr).filter(|&r| r < self.rows)?,
                coord.col.checked_add_signed(dc).filter(|&c| c < self.cols)?,
            ),
            Topology::Toroidal => (
                wrap(coord.row, dr, self.rows),
                wrap(coord.col, dc, self.cols),
            ),
        };
        Some(row * self.cols + col)
    }
}

fn wrap(pos: usize, delta: isize, len: usize) -> usize {
    (pos as isize + delta).rem_euclid(len as isize) as usize
}

/// Validate the rectangular, non-empty invariant and return `(rows, cols)`.
fn check_shape<T, R: AsRef<[T]>>(grid: &[R]) -> Result<(usize, usize), BoardError> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, |row| row.as_ref().len());
    if rows == 0 || cols == 0 {
        return Err(BoardError::empty(rows, cols));
    }
    for (row, cells) in grid.iter().enumerate() {
        let len = cells.as_ref().len();
        if len != cols {
            return Err(ShapeFault::Ragged {
                row,
                len,
                expected: cols,
            }
            .into());
        }
    }
    Ok((rows, cols))
}

/// B3/S23: the state of a cell in the next generation.
pub fn next_state(current: Cell, live_neighbors: usize) -> Cell {
    match (current, live_neighbors) {
        (Cell::Live, 2 | 3) => Cell::Live,
        (Cell::Live, _) => Cell::Dead,
        (Cell::Dead, 3) => Cell::Live,
        (Cell::Dead, _) => Cell::Dead,
    }
}

/// Step a raw integer grid one generation with clamped edges.
///
/// Rejects grids with zero rows or columns, ragged rows, and values other
/// than 0 or 1. The input is never modified.
pub fn next_generation<R: AsRef<[u8]>>(grid: &[R]) -> Result<Vec<Vec<u8>>, BoardError> {
    Ok(Board::from_raw(grid)?.next_generation().to_raw())
}

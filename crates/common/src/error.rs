/// Why a grid failed the rectangular, non-empty board invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeFault {
    #[error("board must have a positive number of rows and columns, got {rows}x{cols}")]
    Empty { rows: usize, cols: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("position ({row}, {col}) lies outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("board of {rows}x{cols} cells is too large to allocate")]
    TooLarge { rows: usize, cols: usize },
}

/// Errors from constructing or stepping a board.
///
/// Neither kind is recoverable: the input has to be fixed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] ShapeFault),
    #[error("invalid cell state {value:?} at ({row}, {col}): expected dead or live")]
    InvalidCellState {
        row: usize,
        col: usize,
        value: String,
    },
}

impl BoardError {
    pub fn empty(rows: usize, cols: usize) -> Self {
        ShapeFault::Empty { rows, cols }.into()
    }

    pub fn invalid_cell(row: usize, col: usize, value: impl ToString) -> Self {
        BoardError::InvalidCellState {
            row,
            col,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_names_dimensions() {
        let e = BoardError::empty(0, 5);
        assert!(matches!(e, BoardError::InvalidBoard(ShapeFault::Empty { .. })));
        assert!(e.to_string().contains("0x5"));
    }

    #[test]
    fn too_large_is_an_invalid_board() {
        let e: BoardError = ShapeFault::TooLarge {
            rows: usize::MAX,
            cols: 2,
        }
        .into();
        assert!(matches!(e, BoardError::InvalidBoard(ShapeFault::TooLarge { cols: 2, .. })));
        assert!(e.to_string().contains("too large"));
    }

    #[test]
    fn invalid_cell_message_names_position() {
        let e = BoardError::invalid_cell(1, 2, 7);
        assert_eq!(
            e.to_string(),
            "invalid cell state \"7\" at (1, 2): expected dead or live"
        );
    }
}

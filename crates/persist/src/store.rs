//! File-backed board loading and saving.
//!
//! The format is chosen from the file extension:
//! ```text
//! *.json         - versioned JSON document, may carry run settings
//! *.csv          - 0/1 comma separated rows
//! *.cells, *.txt - plaintext, O live / . dead, ! comments
//! ```

use std::path::{Path, PathBuf};

use lifegrid_common::BoardError;
use lifegrid_kernel::Board;

use crate::codec::{BoardFile, BoardFormat};

/// Errors from encoding, decoding and file access.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error(
        "declared size {declared_rows}x{declared_cols} does not match cells {rows}x{cols}"
    )]
    DimensionMismatch {
        declared_rows: usize,
        declared_cols: usize,
        rows: usize,
        cols: usize,
    },
    #[error("unknown board file format: {}", .0.display())]
    UnknownFormat(PathBuf),
}

fn format_for(path: &Path) -> Result<BoardFormat, PersistError> {
    BoardFormat::from_path(path).ok_or_else(|| PersistError::UnknownFormat(path.to_path_buf()))
}

/// Load a board file, picking the format from the extension.
pub fn load(path: impl AsRef<Path>) -> Result<BoardFile, PersistError> {
    let path = path.as_ref();
    let format = format_for(path)?;
    let text = std::fs::read_to_string(path)?;
    let file = BoardFile::decode(&text, format)?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        rows = file.board.rows(),
        cols = file.board.cols(),
        "board loaded"
    );
    Ok(file)
}

/// Load only the board, discarding any stored settings.
pub fn load_board(path: impl AsRef<Path>) -> Result<Board, PersistError> {
    Ok(load(path)?.board)
}

/// Save a board file, picking the format from the extension.
pub fn save(path: impl AsRef<Path>, file: &BoardFile) -> Result<(), PersistError> {
    let path = path.as_ref();
    let format = format_for(path)?;
    std::fs::write(path, file.encode(format)?)?;
    tracing::debug!(path = %path.display(), ?format, "board saved");
    Ok(())
}

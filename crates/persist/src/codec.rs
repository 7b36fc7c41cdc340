use std::path::Path;

use lifegrid_common::{BoardError, Cell};
use lifegrid_kernel::{Board, SimulationConfig};
use serde::{Deserialize, Serialize};

use crate::store::PersistError;

/// Current JSON document schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Plaintext glyphs.
const PLAINTEXT_LIVE: char = 'O';
const PLAINTEXT_DEAD: char = '.';
const PLAINTEXT_COMMENT: char = '!';

/// On-disk board encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardFormat {
    /// Versioned JSON document; the only format that carries run settings.
    Json,
    /// `0`/`1` comma separated, one row per line.
    Csv,
    /// `O` live, `.` dead, `!` comment lines.
    Plaintext,
}

impl BoardFormat {
    /// Pick a format from a file extension (`json`, `csv`, `cells`, `txt`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(BoardFormat::Json),
            "csv" => Some(BoardFormat::Csv),
            "cells" | "txt" => Some(BoardFormat::Plaintext),
            _ => None,
        }
    }
}

/// A board plus optional run settings, as stored in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFile {
    pub board: Board,
    pub config: Option<SimulationConfig>,
}

/// JSON wire form.
#[derive(Debug, Serialize, Deserialize)]
struct BoardDocument {
    schema_version: u32,
    rows: usize,
    cols: usize,
    cells: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<SimulationConfig>,
}

impl BoardFile {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            config: None,
        }
    }

    pub fn with_config(board: Board, config: SimulationConfig) -> Self {
        Self {
            board,
            config: Some(config),
        }
    }

    /// Encode into text. Settings are dropped by formats that cannot hold them.
    pub fn encode(&self, format: BoardFormat) -> Result<String, PersistError> {
        match format {
            BoardFormat::Json => {
                let doc = BoardDocument {
                    schema_version: SCHEMA_VERSION,
                    rows: self.board.rows(),
                    cols: self.board.cols(),
                    cells: self.board.to_raw(),
                    config: self.config,
                };
                Ok(serde_json::to_string_pretty(&doc)?)
            }
            BoardFormat::Csv => Ok(encode_csv(&self.board)),
            BoardFormat::Plaintext => Ok(encode_plaintext(&self.board)),
        }
    }

    /// Decode from text, validating shape and cell states.
    pub fn decode(text: &str, format: BoardFormat) -> Result<Self, PersistError> {
        match format {
            BoardFormat::Json => decode_json(text),
            BoardFormat::Csv => Ok(Self::new(decode_csv(text)?)),
            BoardFormat::Plaintext => Ok(Self::new(decode_plaintext(text)?)),
        }
    }
}

fn decode_json(text: &str) -> Result<BoardFile, PersistError> {
    let doc: BoardDocument = serde_json::from_str(text)?;
    if doc.schema_version != SCHEMA_VERSION {
        return Err(PersistError::SchemaMismatch {
            file_version: doc.schema_version,
            expected_version: SCHEMA_VERSION,
        });
    }
    let board = Board::from_raw(&doc.cells)?;
    if board.dims() != (doc.rows, doc.cols) {
        return Err(PersistError::DimensionMismatch {
            declared_rows: doc.rows,
            declared_cols: doc.cols,
            rows: board.rows(),
            cols: board.cols(),
        });
    }
    Ok(BoardFile {
        board,
        config: doc.config,
    })
}

fn encode_csv(board: &Board) -> String {
    let mut out = String::new();
    for row in board.iter_rows() {
        let line: Vec<String> = row.iter().map(|c| c.to_raw().to_string()).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn decode_csv(text: &str) -> Result<Board, BoardError> {
    let mut grid = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row = grid.len();
        // The print format of older tools ends every row with a separator.
        let line = line.strip_suffix(',').unwrap_or(line);
        let cells = line
            .split(',')
            .enumerate()
            .map(|(col, token)| match token.trim() {
                "0" => Ok(Cell::Dead),
                "1" => Ok(Cell::Live),
                other => Err(BoardError::invalid_cell(row, col, other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        grid.push(cells);
    }
    Board::from_rows(&grid)
}

fn encode_plaintext(board: &Board) -> String {
    let mut out = format!(
        "{PLAINTEXT_COMMENT}lifegrid {}x{}\n",
        board.rows(),
        board.cols()
    );
    for row in board.iter_rows() {
        out.extend(row.iter().map(|&c| match c {
            Cell::Live => PLAINTEXT_LIVE,
            Cell::Dead => PLAINTEXT_DEAD,
        }));
        out.push('\n');
    }
    out
}

fn decode_plaintext(text: &str) -> Result<Board, BoardError> {
    let mut grid: Vec<Vec<Cell>> = Vec::new();
    for line in text.lines().filter(|l| !l.starts_with(PLAINTEXT_COMMENT)) {
        let row = grid.len();
        let cells = line
            .trim_end()
            .chars()
            .enumerate()
            .map(|(col, ch)| match ch {
                PLAINTEXT_LIVE => Ok(Cell::Live),
                PLAINTEXT_DEAD => Ok(Cell::Dead),
                other => Err(BoardError::invalid_cell(row, col, other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        grid.push(cells);
    }
    while grid.last().is_some_and(|row| row.is_empty()) {
        grid.pop();
    }

    // Short rows are implicitly padded with dead cells.
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, Cell::Dead);
    }
    Board::from_rows(&grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_common::ShapeFault;
    use lifegrid_kernel::Topology;

    fn glider() -> Board {
        Board::with_live_cells(4, 5, [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]).unwrap()
    }

    #[test]
    fn every_format_roundtrips() {
        let file = BoardFile::new(glider());
        for format in [BoardFormat::Json, BoardFormat::Csv, BoardFormat::Plaintext] {
            let text = file.encode(format).unwrap();
            let decoded = BoardFile::decode(&text, format).unwrap();
            assert_eq!(decoded.board, file.board, "{format:?}");
        }
    }

    #[test]
    fn json_keeps_config() {
        let config = SimulationConfig {
            topology: Topology::Toroidal,
            generations: 12,
        };
        let file = BoardFile::with_config(glider(), config);
        let text = file.encode(BoardFormat::Json).unwrap();
        assert!(text.contains("\"toroidal\""));
        let decoded = BoardFile::decode(&text, BoardFormat::Json).unwrap();
        assert_eq!(decoded, file);
    }

    #[test]
    fn json_without_config_omits_field() {
        let text = BoardFile::new(glider()).encode(BoardFormat::Json).unwrap();
        assert!(!text.contains("config"));
    }

    #[test]
    fn json_schema_mismatch_fails_closed() {
        let text = r#"{"schema_version": 999, "rows": 1, "cols": 1, "cells": [[0]]}"#;
        match BoardFile::decode(text, BoardFormat::Json) {
            Err(PersistError::SchemaMismatch {
                file_version,
                expected_version,
            }) => {
                assert_eq!(file_version, 999);
                assert_eq!(expected_version, SCHEMA_VERSION);
            }
            other => panic!("expected SchemaMismatch, got: {other:?}"),
        }
    }

    #[test]
    fn json_declared_dims_must_match() {
        let text = r#"{"schema_version": 1, "rows": 2, "cols": 2, "cells": [[0, 1, 0]]}"#;
        let err = BoardFile::decode(text, BoardFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            PersistError::DimensionMismatch {
                declared_rows: 2,
                rows: 1,
                ..
            }
        ));
    }

    #[test]
    fn json_rejects_invalid_cell_value() {
        let text = r#"{"schema_version": 1, "rows": 1, "cols": 2, "cells": [[0, 3]]}"#;
        let err = BoardFile::decode(text, BoardFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Board(BoardError::InvalidCellState { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn json_rejects_empty_board() {
        let text = r#"{"schema_version": 1, "rows": 0, "cols": 0, "cells": []}"#;
        let err = BoardFile::decode(text, BoardFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Board(BoardError::InvalidBoard(ShapeFault::Empty { .. }))
        ));
    }

    #[test]
    fn csv_accepts_trailing_separator_and_blank_lines() {
        let text = "0,1,0,\n\n1, 1 ,0,\n";
        let board = BoardFile::decode(text, BoardFormat::Csv).unwrap().board;
        assert_eq!(board.to_raw(), vec![vec![0, 1, 0], vec![1, 1, 0]]);
    }

    #[test]
    fn csv_rejects_unknown_token() {
        let err = BoardFile::decode("0,1\n0,x\n", BoardFormat::Csv).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Board(BoardError::InvalidCellState { row: 1, col: 1, .. })
        ));
    }

    #[test]
    fn csv_rejects_ragged_rows() {
        let err = BoardFile::decode("0,1,0\n0,1\n", BoardFormat::Csv).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Board(BoardError::InvalidBoard(ShapeFault::Ragged { row: 1, .. }))
        ));
    }

    #[test]
    fn csv_rejects_empty_text() {
        let err = BoardFile::decode("\n\n", BoardFormat::Csv).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Board(BoardError::InvalidBoard(ShapeFault::Empty { .. }))
        ));
    }

    #[test]
    fn plaintext_skips_comments_and_pads_rows() {
        let text = "!Name: Blinker\n!\n...\nOOO\n\n";
        let board = BoardFile::decode(text, BoardFormat::Plaintext).unwrap().board;
        assert_eq!(board.dims(), (2, 3));
        assert_eq!(board.population(), 3);

        let text = ".O\nOOO\n";
        let board = BoardFile::decode(text, BoardFormat::Plaintext).unwrap().board;
        assert_eq!(board.to_raw(), vec![vec![0, 1, 0], vec![1, 1, 1]]);
    }

    #[test]
    fn plaintext_blank_line_inside_body_is_dead_row() {
        let text = "O.\n\n.O\n";
        let board = BoardFile::decode(text, BoardFormat::Plaintext).unwrap().board;
        assert_eq!(board.to_raw(), vec![vec![1, 0], vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn plaintext_rejects_unknown_glyph() {
        let err = BoardFile::decode("O.\n.*\n", BoardFormat::Plaintext).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Board(BoardError::InvalidCellState { row: 1, col: 1, .. })
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(BoardFormat::from_path(Path::new("a.json")), Some(BoardFormat::Json));
        assert_eq!(BoardFormat::from_path(Path::new("a.CSV")), Some(BoardFormat::Csv));
        assert_eq!(
            BoardFormat::from_path(Path::new("dir/glider.cells")),
            Some(BoardFormat::Plaintext)
        );
        assert_eq!(BoardFormat::from_path(Path::new("board.rle")), None);
        assert_eq!(BoardFormat::from_path(Path::new("board")), None);
    }
}

//! Persistence: board files in JSON, CSV and plaintext form.
//!
//! # Invariants
//! - Decoding validates the board shape and every cell before returning.
//! - Encoding then decoding in any format yields an identical board.
//! - JSON documents carry a schema version; mismatches fail closed.

mod codec;
mod store;

pub use codec::{BoardFile, BoardFormat, SCHEMA_VERSION};
pub use store::{PersistError, load, load_board, save};

pub fn crate_info() -> &'static str {
    concat!("lifegrid-persist v", env!("CARGO_PKG_VERSION"))
}

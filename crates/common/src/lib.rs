//! Shared types for the lifegrid workspace: cell states, coordinates, errors.

mod error;
mod types;

pub use error::{BoardError, ShapeFault};
pub use types::{Cell, Coord};

pub fn crate_info() -> &'static str {
    concat!("lifegrid-common v", env!("CARGO_PKG_VERSION"))
}

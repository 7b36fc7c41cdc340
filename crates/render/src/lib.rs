//! Rendering adapter: output strategies for boards.
//!
//! # Invariants
//! - Renderers read a board; they never modify it.
//! - Rendering is separate from stepping; the kernel never prints.

mod presenter;
mod renderer;

pub use presenter::TextPresenter;
pub use renderer::{CsvRenderer, GlyphRenderer, Renderer};

pub fn crate_info() -> &'static str {
    concat!("lifegrid-render v", env!("CARGO_PKG_VERSION"))
}

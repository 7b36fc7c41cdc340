//! Board kernel: board state, generation stepping, settle detection.
//!
//! # Invariants
//! - Every `Board` is non-empty and rectangular.
//! - Stepping is a pure function of the previous board; inputs are never mutated.
//! - Clamped edges are the default topology.

pub mod board;
pub mod patterns;
pub mod simulation;

pub use board::{Board, Topology, next_generation, next_state};
pub use patterns::Pattern;
pub use simulation::{DEFAULT_GENERATIONS, Outcome, Simulation, SimulationConfig};

pub fn crate_info() -> &'static str {
    concat!("lifegrid-kernel v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}

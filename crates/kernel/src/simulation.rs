use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Topology};

/// Generation count used when nothing else is configured.
pub const DEFAULT_GENERATIONS: u64 = 4;

/// Run settings that travel with a board (CLI flags or a board file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub topology: Topology,
    #[serde(default = "default_generations")]
    pub generations: u64,
}

fn default_generations() -> u64 {
    DEFAULT_GENERATIONS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            generations: DEFAULT_GENERATIONS,
        }
    }
}

/// How a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every cell is dead at `generation`.
    Extinct { generation: u64 },
    /// The board stopped changing; `generation` is the first unchanged one.
    StillLife { generation: u64 },
    /// The board at `generation` recurs every `period` generations.
    Oscillating { generation: u64, period: u64 },
    /// The generation cap was hit before the board settled.
    Exhausted { generation: u64 },
}

/// Drives a board forward one generation at a time.
///
/// The simulation owns only the current board; each step replaces it with a
/// freshly computed one.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: Board,
    topology: Topology,
    generation: u64,
}

impl Simulation {
    /// Start at generation 0 with clamped edges.
    pub fn new(board: Board) -> Self {
        Self::with_topology(board, Topology::Clamped)
    }

    pub fn with_topology(board: Board, topology: Topology) -> Self {
        Self {
            board,
            topology,
            generation: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation and return the new board.
    pub fn step(&mut self) -> &Board {
        self.board = self.board.next_generation_with(self.topology);
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            population = self.board.population(),
            "stepped"
        );
        &self.board
    }

    /// Step `generations` times, reporting each new board to `observer`.
    ///
    /// The starting board is not reported.
    pub fn run<F>(&mut self, generations: u64, mut observer: F)
    where
        F: FnMut(&Board, u64),
    {
        let _span = tracing::info_span!("run", generations).entered();
        for _ in 0..generations {
            self.step();
            observer(&self.board, self.generation);
        }
    }

    /// Step until the board dies out, stops changing, starts repeating, or
    /// `max_generations` steps have been taken.
    pub fn run_until_settled<F>(&mut self, max_generations: u64, mut observer: F) -> Outcome
    where
        F: FnMut(&Board, u64),
    {
        let _span = tracing::info_span!("run_until_settled", max_generations).entered();
        if self.board.is_extinct() {
            return Outcome::Extinct {
                generation: self.generation,
            };
        }

        let mut seen = History::default();
        seen.remember(&self.board, self.generation);

        for _ in 0..max_generations {
            self.step();
            observer(&self.board, self.generation);

            if self.board.is_extinct() {
                return Outcome::Extinct {
                    generation: self.generation,
                };
            }
            if let Some(first) = seen.lookup(&self.board) {
                let period = self.generation - first;
                tracing::debug!(first, period, "board repeated");
                return if period == 1 {
                    Outcome::StillLife { generation: first }
                } else {
                    Outcome::Oscillating {
                        generation: first,
                        period,
                    }
                };
            }
            seen.remember(&self.board, self.generation);
        }

        Outcome::Exhausted {
            generation: self.generation,
        }
    }
}

/// Boards seen so far, bucketed by `state_hash`.
#[derive(Default)]
struct History {
    buckets: HashMap<u64, Vec<(u64, Board)>>,
}

impl History {
    fn remember(&mut self, board: &Board, generation: u64) {
        self.buckets
            .entry(board.state_hash())
            .or_default()
            .push((generation, board.clone()));
    }

    fn lookup(&self, board: &Board) -> Option<u64> {
        self.buckets
            .get(&board.state_hash())?
            .iter()
            .find(|(_, seen)| seen == board)
            .map(|(generation, _)| *generation)
    }
}

// lib.rs - Core of Conway's Game of Life
//
// A toroidal grid, the B3/S23 update rule, plain-text snapshots and the
// paused/running simulation that ties them together. The crate does no
// drawing and reads no input: a front end turns user actions into calls on
// Simulation and draws Simulation::grid.

pub mod codec;
mod error;
mod grid;
pub mod journal;
mod neighbors;
pub mod patterns;
pub mod rules;
mod simulation;

pub use codec::{Charset, DecodeMode, GridCodec};
pub use error::{LifeError, LifeResult, MalformedGrid};
pub use grid::Grid;
pub use journal::{Journal, LogJournal, MemoryJournal};
pub use neighbors::NeighborCounts;
pub use simulation::{RunState, Simulation};

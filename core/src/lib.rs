//! Recursive-division maze with a key to collect
//!
//! This crate holds everything that does not depend on a display or input
//! device:
//! - [`grid`]: the tagged cell matrix
//! - [`partition`]: recursive-division generation
//! - [`reachability`]: distance fills and key placement
//! - [`agent`]: hero movement, key pickup and the win condition
//! - [`maze`]: the [`Maze`] facade tying them together
//!
//! All randomness comes from an injected [`RandomSource`], so a seeded
//! [`SimpleLCG`] reproduces the same maze on every platform.
//!
//! The crate is no_std (it needs `alloc`), with an optional `serde` feature
//! for the host side.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod agent;
pub mod error;
pub mod grid;
pub mod maze;
pub mod partition;
pub mod reachability;
pub mod rng;
pub mod tags;

// Re-export commonly used types for convenience
pub use agent::{Agent, AgentState, Direction, MoveOutcome, ParseDirectionError};
pub use error::MazeError;
pub use grid::{Grid, Position};
pub use maze::Maze;
pub use reachability::KeyPlacement;
pub use rng::{RandomSource, SimpleLCG};
pub use tags::{Tag, Tags};

/// Default maze dimensions (chambers, not including walls)
pub const MAZE_WIDTH: usize = 20;
pub const MAZE_HEIGHT: usize = 20;

/// Largest accepted width or height
pub const MAX_DIMENSION: usize = 1024;

/// Maximum number of moves accepted in a recorded path
pub const MAX_MOVES: usize = 10_000;

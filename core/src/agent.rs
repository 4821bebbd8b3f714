//! Hero movement, key pickup and the win condition
//!
//! ```text
//!   Idle --place--> Active { has_key: false } --key--> Active { has_key: true }
//!                                                        |
//!                                          exit door ----+--> Finished
//! ```
//!
//! Invalid commands are ordinary input for an interactive agent, so they are
//! dropped silently instead of being reported as errors.

use core::fmt;
use core::str::FromStr;

use crate::grid::{Grid, Position};
use crate::tags::Tag;

/// One of the four unit moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Grid delta as `(dr, dc)`
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Unknown direction name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: '{0}'. Must be 'up', 'down', 'left' or 'right'")]
pub struct ParseDirectionError(pub alloc::string::String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let matches = |a: &str, b: &str| name.eq_ignore_ascii_case(a) || name.eq_ignore_ascii_case(b);
        if matches("up", "north") {
            Ok(Direction::Up)
        } else if matches("down", "south") {
            Ok(Direction::Down)
        } else if matches("left", "west") {
            Ok(Direction::Left)
        } else if matches("right", "east") {
            Ok(Direction::Right)
        } else {
            Err(ParseDirectionError(alloc::string::String::from(s)))
        }
    }
}

/// Controller state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgentState {
    /// No hero on the grid yet
    #[default]
    Idle,
    Active { hero: Position, has_key: bool },
    /// Hero is on the exit door holding the key; terminal
    Finished { hero: Position },
}

/// What a move command did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wrong state, out of bounds or a wall
    Rejected,
    Moved,
    PickedUpKey,
    Finished,
}

/// Drives the hero over a finished grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Agent {
    state: AgentState,
}

impl Agent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn position(&self) -> Option<Position> {
        match self.state {
            AgentState::Idle => None,
            AgentState::Active { hero, .. } | AgentState::Finished { hero } => Some(hero),
        }
    }

    pub fn has_key(&self) -> bool {
        match self.state {
            AgentState::Active { has_key, .. } => has_key,
            AgentState::Finished { .. } => true,
            AgentState::Idle => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AgentState::Finished { .. })
    }

    /// Put the hero on the entrance door in the bottom row
    ///
    /// Only valid while idle. Returns whether a hero was placed.
    pub fn place(&mut self, grid: &mut Grid) -> bool {
        if self.state != AgentState::Idle {
            return false;
        }
        let Some(entrance) = grid.find_in_row(grid.rows() - 1, Tag::Entrance) else {
            tracing::warn!("no entrance in bottom row, hero not placed");
            return false;
        };

        grid.set(entrance, grid.get(entrance).with(Tag::Hero));
        self.state = AgentState::Active {
            hero: entrance,
            has_key: false,
        };
        tracing::debug!(row = entrance.row, col = entrance.col, "placed hero");
        true
    }

    /// Try to step the hero by `(dr, dc)`
    pub fn move_by(&mut self, grid: &mut Grid, dr: isize, dc: isize) -> MoveOutcome {
        let AgentState::Active { hero, has_key } = self.state else {
            return MoveOutcome::Rejected;
        };
        let Some(target) = hero.offset(dr, dc).filter(|&t| grid.contains(t)) else {
            return MoveOutcome::Rejected;
        };
        let mut tags = grid.get(target);
        if tags.contains(Tag::Wall) {
            return MoveOutcome::Rejected;
        }

        grid.set(hero, grid.get(hero).without(Tag::Hero));

        let mut outcome = MoveOutcome::Moved;
        let has_key = if tags.contains(Tag::Key) {
            tags.remove(Tag::Key);
            outcome = MoveOutcome::PickedUpKey;
            true
        } else {
            has_key
        };
        tags.insert(Tag::Hero);
        grid.set(target, tags);

        self.state = if has_key && tags.contains(Tag::Door) && tags.contains(Tag::Exit) {
            outcome = MoveOutcome::Finished;
            AgentState::Finished { hero: target }
        } else {
            AgentState::Active { hero: target, has_key }
        };

        tracing::trace!(row = target.row, col = target.col, ?outcome, "hero moved");
        outcome
    }

    pub fn step(&mut self, grid: &mut Grid, direction: Direction) -> MoveOutcome {
        let (dr, dc) = direction.delta();
        self.move_by(grid, dr, dc)
    }

    /// Forget the hero without touching the grid; used when the grid is rebuilt
    pub fn reset(&mut self) {
        self.state = AgentState::Idle;
    }
}

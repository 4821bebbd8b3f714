//! A generated maze plus the hero walking through it

use crate::agent::{Agent, Direction, MoveOutcome};
use crate::error::MazeError;
use crate::grid::{Grid, Position};
use crate::partition::partition;
use crate::reachability::{place_key, KeyPlacement};
use crate::rng::RandomSource;
use crate::tags::{Tag, Tags};
use crate::MAX_DIMENSION;

/// Fully generated maze with its key placed
///
/// The grid is only ever changed through [`Maze::place_hero`],
/// [`Maze::move_hero`] and [`Maze::regenerate`].
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    agent: Agent,
    key: KeyPlacement,
    entrance: Position,
    exit: Position,
}

impl Maze {
    /// Build a `width × height` chamber maze
    ///
    /// # Arguments
    /// * `width` - Number of chamber columns (not including walls)
    /// * `height` - Number of chamber rows (not including walls)
    /// * `rng` - Source for every random choice; a seeded source gives a
    ///   reproducible maze
    ///
    /// # Returns
    /// A maze whose open cells are all reachable from the entrance, with the
    /// key on the cell farthest from both doors
    ///
    /// # Example
    /// ```
    /// use maze_core::{Maze, SimpleLCG};
    ///
    /// let maze = Maze::new(1, 1, &mut SimpleLCG::new(7)).unwrap();
    /// assert_eq!(maze.total_steps(), 2);
    /// ```
    #[tracing::instrument(level = "debug", skip(rng))]
    pub fn new(width: usize, height: usize, rng: &mut impl RandomSource) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(MazeError::TooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }

        let mut grid = Grid::skeleton(width, height, rng);
        partition(&mut grid, rng);
        let key = place_key(&mut grid).ok_or(MazeError::NoKeyCell)?;

        // skeleton() always places both doors
        let entrance = grid
            .find_in_row(grid.rows() - 1, Tag::Entrance)
            .ok_or(MazeError::NoKeyCell)?;
        let exit = grid.find_in_row(0, Tag::Exit).ok_or(MazeError::NoKeyCell)?;

        Ok(Self {
            grid,
            agent: Agent::new(),
            key,
            entrance,
            exit,
        })
    }

    /// Throw away the current layout and build a fresh one of the same size
    ///
    /// Any hero on the old grid is removed.
    pub fn regenerate(&mut self, rng: &mut impl RandomSource) -> Result<(), MazeError> {
        *self = Self::new(self.width(), self.height(), rng)?;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read-only view of the cell grid for renderers
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rows of cell tags, top to bottom
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &[Tags]> + '_ {
        self.grid.cells()
    }

    /// Entrance-to-key-to-exit distance; display only
    pub fn total_steps(&self) -> u32 {
        self.key.total_steps
    }

    /// Where the key was placed (it may since have been picked up)
    pub fn key_position(&self) -> Position {
        self.key.position
    }

    pub fn entrance(&self) -> Position {
        self.entrance
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn hero_position(&self) -> Option<Position> {
        self.agent.position()
    }

    pub fn has_key(&self) -> bool {
        self.agent.has_key()
    }

    pub fn is_finished(&self) -> bool {
        self.agent.is_finished()
    }

    /// Put the hero on the entrance; ignored if a hero is already placed
    pub fn place_hero(&mut self) {
        self.agent.place(&mut self.grid);
    }

    /// Move the hero one cell; invalid moves are silently ignored
    pub fn move_hero(&mut self, direction: Direction) -> MoveOutcome {
        self.agent.step(&mut self.grid, direction)
    }
}

//! Cell grid for a chamber maze
//!
//! A maze of `width × height` chambers is stored as a `(2*height+1) ×
//! (2*width+1)` grid of cells:
//! - Even rows and even columns are wall candidates
//! - Odd row / odd column cells are spaces (one per chamber)
//! - Row 0 holds the exit door, the last row holds the entrance door
//!
//! Chamber coordinates are 1-based. [`space`] and [`wall`] convert them to
//! cell indices.

use alloc::vec;
use alloc::vec::Vec;

use crate::rng::RandomSource;
use crate::tags::{Tag, Tags};

/// Cell column (or row) of the space for chamber `x` (1-based)
pub const fn space(x: usize) -> usize {
    2 * (x - 1) + 1
}

/// Cell column (or row) of wall line `x`
pub const fn wall(x: usize) -> usize {
    2 * x
}

/// A cell position in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor at `(dr, dc)`, or `None` if it would fall off the top/left edge
    pub fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Rectangular matrix of tagged cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Tags>,
    width: usize,
    height: usize,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Grid with every cell untagged
    pub fn empty(width: usize, height: usize) -> Self {
        let rows = 2 * height + 1;
        let cols = 2 * width + 1;
        Self {
            cells: vec![Tags::EMPTY; rows * cols],
            width,
            height,
            rows,
            cols,
        }
    }

    /// Build the initial skeleton: outer border, all wall lines, one exit
    /// door in the top row and one entrance door in the bottom row
    ///
    /// The exit column is drawn before the entrance column.
    pub fn skeleton(width: usize, height: usize, rng: &mut impl RandomSource) -> Self {
        let mut grid = Self::empty(width, height);
        let (rows, cols) = (grid.rows, grid.cols);

        for r in 0..rows {
            for c in 0..cols {
                let is_wall = if r == 0 || r == rows - 1 {
                    true
                } else if r % 2 == 1 {
                    c == 0 || c == cols - 1
                } else {
                    c % 2 == 0
                };
                if is_wall {
                    grid.set_tags(r as isize, c as isize, Tags::WALL);
                }
            }
        }

        let exit_col = space(rng.randint(1, width));
        grid.set_tags(0, exit_col as isize, Tags::EXIT_DOOR);

        let entrance_col = space(rng.randint(1, width));
        grid.set_tags((rows - 1) as isize, entrance_col as isize, Tags::ENTRANCE_DOOR);

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Signed so that callers can probe `row - 1` without wrapping.
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    fn index(&self, row: isize, col: isize) -> Option<usize> {
        self.in_bounds(row, col)
            .then(|| row as usize * self.cols + col as usize)
    }

    /// Tags at a cell; out-of-bounds reads as empty
    pub fn tags_at(&self, row: isize, col: isize) -> Tags {
        self.index(row, col).map_or(Tags::EMPTY, |i| self.cells[i])
    }

    /// Replace the tags of a cell; out-of-bounds writes are ignored
    pub fn set_tags(&mut self, row: isize, col: isize, tags: Tags) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = tags;
        }
    }

    pub fn is_passable(&self, row: isize, col: isize) -> bool {
        self.in_bounds(row, col) && self.tags_at(row, col).is_passable()
    }

    pub fn get(&self, pos: Position) -> Tags {
        self.tags_at(pos.row as isize, pos.col as isize)
    }

    pub fn set(&mut self, pos: Position, tags: Tags) {
        self.set_tags(pos.row as isize, pos.col as isize, tags);
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Iterate rows as slices, top to bottom
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &[Tags]> + '_ {
        self.cells.chunks_exact(self.cols)
    }

    /// First cell in `row` carrying `tag`, scanning left to right
    pub fn find_in_row(&self, row: usize, tag: Tag) -> Option<Position> {
        (0..self.cols)
            .map(|col| Position::new(row, col))
            .find(|&pos| self.get(pos).contains(tag))
    }

    /// All cells carrying `tag`, in row-major order
    pub fn positions_with(&self, tag: Tag) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, tags)| tags.contains(tag))
            .map(|(i, _)| Position::new(i / self.cols, i % self.cols))
    }

    /// Row-major flat index, used by the distance arrays
    pub(crate) fn flat(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleLCG;

    #[test]
    fn test_coordinate_helpers() {
        assert_eq!(space(1), 1);
        assert_eq!(space(3), 5);
        assert_eq!(wall(1), 2);
        assert_eq!(wall(3), 6);
    }

    #[test]
    fn test_skeleton_dimensions() {
        let grid = Grid::skeleton(4, 3, &mut SimpleLCG::new(7));
        assert_eq!(grid.rows(), 7);
        assert_eq!(grid.cols(), 9);
        assert_eq!(grid.cells().len(), 7);
        assert!(grid.cells().all(|row| row.len() == 9));
    }

    #[test]
    fn test_skeleton_layout() {
        let grid = Grid::skeleton(5, 5, &mut SimpleLCG::new(12345));

        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                let tags = grid.tags_at(r as isize, c as isize);
                if r == 0 || r == grid.rows() - 1 {
                    assert!(tags == Tags::WALL || tags.contains(Tag::Door), "border ({}, {})", r, c);
                } else if r % 2 == 1 && c % 2 == 1 {
                    assert!(tags.is_empty(), "space ({}, {}) should start open", r, c);
                } else if r % 2 == 0 && c % 2 == 0 {
                    assert_eq!(tags, Tags::WALL, "corner ({}, {})", r, c);
                }
            }
        }

        let exits: Vec<_> = grid.positions_with(Tag::Exit).collect();
        let entrances: Vec<_> = grid.positions_with(Tag::Entrance).collect();
        assert_eq!(exits.len(), 1);
        assert_eq!(entrances.len(), 1);
        assert_eq!(exits[0].row, 0);
        assert_eq!(entrances[0].row, grid.rows() - 1);
        assert_eq!(exits[0].col % 2, 1);
        assert_eq!(entrances[0].col % 2, 1);
        assert_eq!(grid.get(exits[0]), Tags::EXIT_DOOR);
        assert_eq!(grid.get(entrances[0]), Tags::ENTRANCE_DOOR);
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::empty(2, 2);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(4, 4));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, 5));
        assert_eq!(grid.tags_at(-1, -1), Tags::EMPTY);
        assert!(!grid.is_passable(5, 0));
        assert!(grid.is_passable(1, 1));
    }

    #[test]
    fn test_cells_are_independent() {
        let mut grid = Grid::empty(2, 2);
        grid.set_tags(1, 1, Tags::KEY);
        assert_eq!(grid.tags_at(1, 1), Tags::KEY);
        assert!(grid.tags_at(1, 3).is_empty());
        assert!(grid.tags_at(3, 1).is_empty());

        // Out-of-bounds writes are dropped
        grid.set_tags(9, 9, Tags::WALL);
        assert_eq!(grid.positions_with(Tag::Wall).count(), 0);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(0, 3);
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(1, -1), Some(Position::new(1, 2)));
    }
}

//! Maze generation using the Recursive Division algorithm
//!
//! Algorithm:
//! 1. Start with the whole interior as one open region
//! 2. Draw one horizontal and one vertical wall line through it
//!    - The horizontal line is picked from the middle half of the region
//!    - The vertical line is picked from the middle third
//! 3. Punch a single gap into three of the four wall segments around the
//!    crossing point, leaving one random segment solid
//! 4. Repeat for the four quadrants until no region has room left
//!
//! Because only one segment per split is left solid, every quadrant stays
//! joined to the others and the finished maze is fully connected.
//!
//! Ref: https://en.wikipedia.org/wiki/Maze_generation_algorithm#Recursive_division_method

use alloc::vec;
use alloc::vec::Vec;

use crate::grid::{space, wall, Grid};
use crate::rng::RandomSource;
use crate::tags::Tags;

/// Region bounds in wall-line indices, all inclusive
///
/// Wall line `r` is cell row `2r`; the region spans cell rows
/// `2*r1 - 1 ..= 2*r2 + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    r1: usize,
    r2: usize,
    c1: usize,
    c2: usize,
}

impl Region {
    /// Base case: nothing left to split
    fn is_collapsed(&self) -> bool {
        self.r2 < self.r1 || self.c2 < self.c1
    }
}

/// `Math.round`-style rounding (half rounds up) of `num / den`
fn round_div(num: i64, den: i64) -> i64 {
    (2 * num + den).div_euclid(2 * den)
}

/// Pick a wall line between `lo` and `hi`, restricted to the central band
/// that remains after dropping `1/parts` of the span on each side
fn pick_line(lo: usize, hi: usize, parts: i64, rng: &mut impl RandomSource) -> usize {
    if lo == hi {
        return lo;
    }
    let x = lo as i64 + 1;
    let y = hi as i64 - 1;
    let start = round_div(x * parts + (y - x), parts);
    let end = round_div(x * parts + (parts - 1) * (y - x), parts);
    rng.randint(start as usize, end as usize)
}

/// Carve the maze into `grid` in place
///
/// Expects a [`Grid::skeleton`]. Regions are processed from an explicit stack
/// in the same order a depth-first recursive implementation would visit them,
/// so very large mazes cannot exhaust the call stack.
pub fn partition(grid: &mut Grid, rng: &mut impl RandomSource) {
    if grid.width() == 0 || grid.height() == 0 {
        return;
    }

    let mut stack = vec![Region {
        r1: 1,
        r2: grid.height() - 1,
        c1: 1,
        c2: grid.width() - 1,
    }];
    let mut splits = 0usize;
    let mut max_stack = stack.len();

    while let Some(region) = stack.pop() {
        if region.is_collapsed() {
            continue;
        }
        let (horiz, vert) = split(grid, region, rng);
        splits += 1;

        // horiz/vert are never below 1. Pushed in reverse so the top-left
        // quadrant is carved first.
        let Region { r1, r2, c1, c2 } = region;
        let quadrants = [
            (r1, horiz - 1, c1, vert - 1),
            (horiz + 1, r2, c1, vert - 1),
            (r1, horiz - 1, vert + 1, c2),
            (horiz + 1, r2, vert + 1, c2),
        ];
        for (r1, r2, c1, c2) in quadrants.into_iter().rev() {
            stack.push(Region { r1, r2, c1, c2 });
        }
        max_stack = max_stack.max(stack.len());
    }

    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        splits,
        max_stack,
        "partitioned maze"
    );
}

/// Draw the wall cross for one region and open its gaps
fn split(grid: &mut Grid, region: Region, rng: &mut impl RandomSource) -> (usize, usize) {
    let Region { r1, r2, c1, c2 } = region;

    let horiz = pick_line(r1, r2, 4, rng);
    let vert = pick_line(c1, c2, 3, rng);

    let wall_row = wall(horiz);
    let wall_col = wall(vert);
    for i in wall(r1) - 1..=wall(r2) + 1 {
        for j in wall(c1) - 1..=wall(c2) + 1 {
            if i == wall_row || j == wall_col {
                grid.set_tags(i as isize, j as isize, Tags::WALL);
            }
        }
    }

    // One segment stays solid: [left, right, upper, lower]
    let mut gaps = [true, true, true, false];
    rng.shuffle(&mut gaps);

    let mut openings: Vec<(usize, usize)> = Vec::with_capacity(3);
    if gaps[0] {
        openings.push((wall_row, space(rng.randint(c1, vert))));
    }
    if gaps[1] {
        openings.push((wall_row, space(rng.randint(vert + 1, c2 + 1))));
    }
    if gaps[2] {
        openings.push((space(rng.randint(r1, horiz)), wall_col));
    }
    if gaps[3] {
        openings.push((space(rng.randint(horiz + 1, r2 + 1)), wall_col));
    }
    for (row, col) in openings {
        grid.set_tags(row as isize, col as isize, Tags::EMPTY);
    }

    tracing::trace!(r1, r2, c1, c2, horiz, vert, solid = ?gaps.iter().position(|&g| !g), "split region");
    (horiz, vert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::rng::SimpleLCG;
    use crate::tags::Tag;
    use alloc::collections::VecDeque;

    fn generate(width: usize, height: usize, seed: u32) -> Grid {
        let mut rng = SimpleLCG::new(seed);
        let mut grid = Grid::skeleton(width, height, &mut rng);
        partition(&mut grid, &mut rng);
        grid
    }

    /// Plain flood fill over non-wall cells, independent of the analyzer
    fn reachable_from_entrance(grid: &Grid) -> Vec<bool> {
        let mut seen = vec![false; grid.rows() * grid.cols()];
        let start = grid.positions_with(Tag::Entrance).next().unwrap();
        let mut queue = VecDeque::from([start]);
        seen[grid.flat(start)] = true;
        while let Some(pos) = queue.pop_front() {
            for (dr, dc) in [(-1, 0), (0, 1), (1, 0), (0, -1)] {
                let Some(next) = pos.offset(dr, dc) else { continue };
                if grid.contains(next) && grid.get(next).is_passable() && !seen[grid.flat(next)] {
                    seen[grid.flat(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_round_div_matches_half_up() {
        assert_eq!(round_div(7, 4), 2); // 1.75
        assert_eq!(round_div(5, 2), 3); // 2.5
        assert_eq!(round_div(9, 4), 2); // 2.25
        assert_eq!(round_div(5, 3), 2); // 1.67
        assert_eq!(round_div(4, 3), 1); // 1.33
    }

    #[test]
    fn test_pick_line_bands() {
        let mut rng = SimpleLCG::new(99999);
        assert_eq!(pick_line(3, 3, 4, &mut rng), 3);
        // Two-line regions always take the second line
        assert_eq!(pick_line(1, 2, 4, &mut rng), 2);
        assert_eq!(pick_line(1, 2, 3, &mut rng), 2);

        for _ in 0..200 {
            // x=2, y=19: middle half is round(6.25)..=round(14.75) = 6..=15
            let h = pick_line(1, 20, 4, &mut rng);
            assert!((6..=15).contains(&h), "horizontal line {} outside middle half", h);
            // middle third is round(7.67)..=round(13.33) = 8..=13
            let v = pick_line(1, 20, 3, &mut rng);
            assert!((8..=13).contains(&v), "vertical line {} outside middle third", v);
        }
    }

    #[test]
    fn test_single_chamber_is_untouched() {
        let mut rng = SimpleLCG::new(1);
        let skeleton = Grid::skeleton(1, 1, &mut rng);
        let mut grid = skeleton.clone();
        partition(&mut grid, &mut rng);
        assert_eq!(grid, skeleton);
    }

    #[test]
    fn test_border_is_preserved() {
        let grid = generate(12, 9, 2918957128);
        let last_row = grid.rows() - 1;
        let last_col = grid.cols() - 1;
        for c in 0..grid.cols() {
            let top = grid.get(Position::new(0, c));
            let bottom = grid.get(Position::new(last_row, c));
            assert!(top == Tags::WALL || top == Tags::EXIT_DOOR);
            assert!(bottom == Tags::WALL || bottom == Tags::ENTRANCE_DOOR);
        }
        for r in 0..grid.rows() {
            assert_eq!(grid.get(Position::new(r, 0)), Tags::WALL);
            assert_eq!(grid.get(Position::new(r, last_col)), Tags::WALL);
        }
    }

    #[test]
    fn test_spaces_stay_open() {
        let grid = generate(10, 10, 4242);
        for r in (1..grid.rows()).step_by(2) {
            for c in (1..grid.cols()).step_by(2) {
                assert!(grid.get(Position::new(r, c)).is_empty(), "space ({}, {}) was walled", r, c);
            }
        }
    }

    #[test]
    fn test_every_open_cell_is_connected() {
        for seed in 1..60u32 {
            let width = 1 + (seed as usize * 7) % 17;
            let height = 1 + (seed as usize * 11) % 13;
            let grid = generate(width, height, seed);
            let seen = reachable_from_entrance(&grid);

            for r in 0..grid.rows() {
                for c in 0..grid.cols() {
                    let pos = Position::new(r, c);
                    if grid.get(pos).is_passable() {
                        assert!(
                            seen[grid.flat(pos)],
                            "seed {} ({}x{}): ({}, {}) unreachable",
                            seed, width, height, r, c
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate(15, 15, 99999), generate(15, 15, 99999));
    }

    #[test]
    fn test_different_seeds() {
        // Different seeds should (almost certainly) produce different mazes
        assert_ne!(generate(10, 10, 11111), generate(10, 10, 22222));
    }

    #[test]
    fn test_large_maze_does_not_recurse() {
        let grid = generate(300, 300, 777);
        assert_eq!(grid.rows(), 601);
        assert_eq!(grid.positions_with(Tag::Entrance).count(), 1);
    }
}

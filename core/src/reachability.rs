//! Key placement by two-sided reachability
//!
//! The key goes where a player has to wander the most: the cell maximising
//! `distance from entrance + distance from exit`. Cells on the direct
//! entrance-to-exit route score the minimum, and dead ends deep in a side
//! branch score the highest.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::grid::{Grid, Position};
use crate::tags::{Tag, Tags};

/// Row/column deltas in probe order: north, east, south, west
pub(crate) const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Where the key ended up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPlacement {
    pub position: Position,
    /// Entrance-to-key plus key-to-exit distance, in moves
    pub total_steps: u32,
}

/// Step counts from `seed` to every passable cell (`None` where unreached)
///
/// Breadth-first, so each cell is settled exactly once. Cells tagged `stop`
/// get a distance but are not expanded.
pub fn distances_from(grid: &Grid, seed: Position, stop: Tag) -> Vec<Option<u32>> {
    let mut dist = vec![None; grid.rows() * grid.cols()];
    if !grid.contains(seed) || !grid.get(seed).is_passable() {
        return dist;
    }

    dist[grid.flat(seed)] = Some(0);
    let mut frontier = VecDeque::from([seed]);

    while let Some(pos) = frontier.pop_front() {
        if grid.get(pos).contains(stop) {
            continue;
        }
        let next_steps = dist[grid.flat(pos)].map_or(0, |d| d + 1);

        for (dr, dc) in NEIGHBORS {
            let Some(next) = pos.offset(dr, dc) else {
                continue;
            };
            if !grid.contains(next) || !grid.get(next).is_passable() {
                continue;
            }
            let slot = &mut dist[grid.flat(next)];
            if slot.is_none() {
                *slot = Some(next_steps);
                frontier.push_back(next);
            }
        }
    }

    dist
}

/// Find the best key cell without touching the grid
///
/// Only untagged cells reached from both doors qualify. Ties go to the
/// first cell in row-major order.
pub fn key_location(grid: &Grid) -> Option<KeyPlacement> {
    let entrance = grid.find_in_row(grid.rows() - 1, Tag::Entrance)?;
    let exit = grid.find_in_row(0, Tag::Exit)?;

    let from_entrance = distances_from(grid, entrance, Tag::Exit);
    let from_exit = distances_from(grid, exit, Tag::Entrance);

    let mut best: Option<KeyPlacement> = None;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = Position::new(row, col);
            if !grid.get(pos).is_empty() {
                continue;
            }
            let i = grid.flat(pos);
            let (Some(a), Some(b)) = (from_entrance[i], from_exit[i]) else {
                continue;
            };
            if best.map_or(true, |current| a + b > current.total_steps) {
                best = Some(KeyPlacement {
                    position: pos,
                    total_steps: a + b,
                });
            }
        }
    }
    best
}

/// Pick the key cell and tag it, replacing whatever it held
pub fn place_key(grid: &mut Grid) -> Option<KeyPlacement> {
    let placement = key_location(grid)?;
    grid.set(placement.position, Tags::KEY);

    tracing::debug!(
        row = placement.position.row,
        col = placement.position.col,
        total_steps = placement.total_steps,
        "placed key"
    );
    Some(placement)
}

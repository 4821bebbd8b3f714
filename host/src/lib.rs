use maze_core::{Direction, Maze, MazeError, MoveOutcome, Position, SimpleLCG, Tag, MAX_MOVES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maze parameters as read from the command line or a JSON config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MazeConfig {
    /// Chamber columns
    pub width: usize,
    /// Chamber rows
    pub height: usize,
    /// RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u32>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: maze_core::MAZE_WIDTH,
            height: maze_core::MAZE_HEIGHT,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)?;
        let config: MazeConfig = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// The configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(1);
            // Fold the 128-bit value so both halves contribute
            (nanos ^ (nanos >> 32)) as u32
        })
    }
}

/// Everything a renderer or a later replay needs to know about one maze
///
/// The grid is rebuilt from `(width, height, seed)`, so `cells` is for
/// display only; replays never trust it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeSnapshot {
    pub width: usize,
    pub height: usize,
    pub seed: u32,

    /// Entrance-to-key-to-exit distance in moves
    pub total_steps: u32,

    pub entrance: Position,
    pub exit: Position,
    pub key: Position,

    /// Tag names per cell, e.g. `["door", "exit"]`; empty for open cells
    pub cells: Vec<Vec<Vec<Tag>>>,
}

/// Result of replaying a move list against a maze
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayReport {
    pub seed: u32,
    /// Moves that actually changed the hero's position
    pub moves_applied: usize,
    /// Moves dropped as walls, edges or after finishing
    pub moves_rejected: usize,
    pub hero: Option<Position>,
    pub has_key: bool,
    pub finished: bool,
}

/// Generate a maze from a config.
///
/// # Returns
/// * `Ok((Maze, seed))` - The maze and the seed it was built from
/// * `Err` - If the dimensions are rejected
///
/// # Example
/// ```
/// use host::{generate_maze, MazeConfig};
///
/// let config = MazeConfig { width: 5, height: 5, seed: Some(2918957128) };
/// let (maze, seed) = generate_maze(&config).unwrap();
/// assert_eq!(seed, 2918957128);
/// assert_eq!(maze.grid().rows(), 11);
/// ```
pub fn generate_maze(config: &MazeConfig) -> Result<(Maze, u32), MazeError> {
    let seed = config.resolve_seed();
    tracing::info!("Generating {}x{} maze with seed {}", config.width, config.height, seed);

    let mut rng = SimpleLCG::new(seed);
    let maze = Maze::new(config.width, config.height, &mut rng)?;

    tracing::info!(
        "Maze generated: key at ({}, {}), {} total steps",
        maze.key_position().row,
        maze.key_position().col,
        maze.total_steps()
    );
    Ok((maze, seed))
}

/// Capture a maze in its serializable form
pub fn snapshot(maze: &Maze, seed: u32) -> MazeSnapshot {
    let cells: Vec<Vec<Vec<Tag>>> = maze
        .cells()
        .map(|row| row.iter().map(|tags| tags.iter().collect()).collect())
        .collect();

    MazeSnapshot {
        width: maze.width(),
        height: maze.height(),
        seed,
        total_steps: maze.total_steps(),
        entrance: maze.entrance(),
        exit: maze.exit(),
        key: maze.key_position(),
        cells,
    }
}

/// Rebuild the maze described by a snapshot.
///
/// This is safe because maze generation is deterministic (same algorithm and RNG).
pub fn regenerate_maze(snapshot: &MazeSnapshot) -> Result<Maze, Box<dyn std::error::Error>> {
    let config = MazeConfig {
        width: snapshot.width,
        height: snapshot.height,
        seed: Some(snapshot.seed),
    };
    let (maze, _) = generate_maze(&config)?;

    if maze.total_steps() != snapshot.total_steps || maze.key_position() != snapshot.key {
        return Err(format!(
            "Snapshot does not match seed {}: expected key at ({}, {}) with {} steps, regenerated ({}, {}) with {}",
            snapshot.seed,
            snapshot.key.row,
            snapshot.key.col,
            snapshot.total_steps,
            maze.key_position().row,
            maze.key_position().col,
            maze.total_steps()
        )
        .into());
    }
    Ok(maze)
}

/// Place the hero and feed it a recorded list of moves.
///
/// Moves after the maze is finished are counted as rejected, mirroring what
/// an interactive session would do with extra key presses.
pub fn play(maze: &mut Maze, seed: u32, moves: &[Direction]) -> PlayReport {
    maze.place_hero();

    let mut applied = 0;
    let mut rejected = 0;
    for &direction in moves {
        match maze.move_hero(direction) {
            MoveOutcome::Rejected => rejected += 1,
            MoveOutcome::PickedUpKey => {
                applied += 1;
                tracing::info!("Key collected after {} moves", applied);
            }
            MoveOutcome::Finished => {
                applied += 1;
                tracing::info!("Exit reached with the key after {} moves", applied);
            }
            MoveOutcome::Moved => applied += 1,
        }
    }

    PlayReport {
        seed,
        moves_applied: applied,
        moves_rejected: rejected,
        hero: maze.hero_position(),
        has_key: maze.has_key(),
        finished: maze.is_finished(),
    }
}

/// Replay moves against the maze a snapshot describes
pub fn replay(snapshot: &MazeSnapshot, moves: &[Direction]) -> Result<PlayReport, Box<dyn std::error::Error>> {
    tracing::info!("Replaying {} moves on maze seed {}", moves.len(), snapshot.seed);
    let mut maze = regenerate_maze(snapshot)?;
    Ok(play(&mut maze, snapshot.seed, moves))
}

/// Plain-text picture of the maze, one character per cell
///
/// `#` wall, `E` exit, `S` entrance, `K` key, `@` hero, space for open cells.
pub fn render_ascii(maze: &Maze) -> String {
    let mut out = String::with_capacity(maze.grid().rows() * (maze.grid().cols() + 1));
    for row in maze.cells() {
        for &tags in row {
            let ch = if tags.contains(Tag::Hero) {
                '@'
            } else if tags.contains(Tag::Key) {
                'K'
            } else if tags.contains(Tag::Exit) {
                'E'
            } else if tags.contains(Tag::Entrance) {
                'S'
            } else if tags.contains(Tag::Wall) {
                '#'
            } else {
                ' '
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

pub fn save_snapshot(snapshot: &MazeSnapshot, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_snapshot(path: &str) -> Result<MazeSnapshot, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    let snapshot: MazeSnapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}

pub fn save_report(report: &PlayReport, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Parse a JSON moves array such as `["up", "up", "left"]`
pub fn parse_moves(json: &str) -> Result<Vec<Direction>, Box<dyn std::error::Error>> {
    // Validate size (prevent loading gigabytes into memory)
    if json.len() > 10_000_000 {
        return Err("Moves file is too large (max 10MB)".into());
    }

    let moves: Vec<Direction> = serde_json::from_str(json)?;

    if moves.is_empty() {
        return Err("Moves array is empty".into());
    }

    if moves.len() > MAX_MOVES {
        return Err(format!("Too many moves: {} (max {})", moves.len(), MAX_MOVES).into());
    }

    Ok(moves)
}

pub fn load_moves(path: &str) -> Result<Vec<Direction>, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    parse_moves(&json)
}

/// Shortest sequence of moves between two cells, if one exists
///
/// Used to produce reference solutions; the hero tag does not block.
pub fn shortest_route(maze: &Maze, from: Position, to: Position) -> Option<Vec<Direction>> {
    let grid = maze.grid();
    // No passable cell is a plain wall, so this fill never stops early
    let dist = maze_core::reachability::distances_from(grid, to, Tag::Wall);
    let index = |p: Position| p.row * grid.cols() + p.col;

    let mut here = dist[index(from)]?;
    let mut pos = from;
    let mut moves = Vec::with_capacity(here as usize);
    while here > 0 {
        let (direction, next) = Direction::ALL.into_iter().find_map(|d| {
            let (dr, dc) = d.delta();
            let next = pos.offset(dr, dc).filter(|&n| grid.contains(n))?;
            (dist[index(next)] == Some(here - 1)).then_some((d, next))
        })?;
        moves.push(direction);
        pos = next;
        here -= 1;
    }
    Some(moves)
}

/// Reference solution: entrance to key, then key to exit
pub fn solve(maze: &Maze) -> Option<Vec<Direction>> {
    let mut moves = shortest_route(maze, maze.entrance(), maze.key_position())?;
    moves.extend(shortest_route(maze, maze.key_position(), maze.exit())?);
    Some(moves)
}

use host::{generate_maze, parse_moves, regenerate_maze, replay, snapshot, solve, MazeConfig};
use maze_core::Direction;

/// The known maze seed for testing
const MAZE_SEED: u32 = 2918957128;

fn test_config() -> MazeConfig {
    MazeConfig {
        width: 20,
        height: 20,
        seed: Some(MAZE_SEED),
    }
}

#[test]
fn test_reference_solution_finishes() {
    let (maze, seed) = generate_maze(&test_config()).expect("Maze generation failed");
    let snap = snapshot(&maze, seed);
    let moves = solve(&maze).expect("Maze should be solvable");

    let report = replay(&snap, &moves).expect("Replay failed");

    assert!(report.finished, "Reference solution should finish the maze");
    assert!(report.has_key);
    assert_eq!(report.hero, Some(maze.exit()));
    assert_eq!(report.moves_rejected, 0);
    assert_eq!(report.moves_applied, moves.len());
    assert_eq!(moves.len() as u32, maze.total_steps());
}

#[test]
fn test_empty_moves_are_rejected() {
    assert!(parse_moves("[]").is_err(), "Empty moves should be rejected");
}

#[test]
fn test_partial_solution() {
    let (maze, seed) = generate_maze(&test_config()).expect("Maze generation failed");
    let snap = snapshot(&maze, seed);
    let moves = solve(&maze).expect("Maze should be solvable");

    // Stop one move short of the exit
    let report = replay(&snap, &moves[..moves.len() - 1]).expect("Replay failed");

    assert!(!report.finished, "Partial solution should not finish");
    assert!(report.has_key, "Key comes well before the last move");
}

#[test]
fn test_wrong_seed() {
    let (maze, _) = generate_maze(&test_config()).expect("Maze generation failed");
    let moves = solve(&maze).expect("Maze should be solvable");

    // Same moves against a different maze
    let other = MazeConfig {
        seed: Some(12345),
        ..test_config()
    };
    let (other_maze, other_seed) = generate_maze(&other).expect("Maze generation failed");
    let report = replay(&snapshot(&other_maze, other_seed), &moves).expect("Replay failed");

    assert!(!report.finished, "Moves for another maze should not finish");
}

#[test]
fn test_walls_reject_moves() {
    let (maze, seed) = generate_maze(&test_config()).expect("Maze generation failed");
    let snap = snapshot(&maze, seed);

    // The entrance sits in the bottom border: sideways is always wall
    let moves = vec![Direction::Left, Direction::Right, Direction::Down];
    let report = replay(&snap, &moves).expect("Replay failed");

    assert_eq!(report.moves_applied, 0);
    assert_eq!(report.moves_rejected, 3);
    assert_eq!(report.hero, Some(maze.entrance()));
    assert!(!report.finished);
}

#[test]
fn test_snapshot_round_trip_regenerates_same_maze() {
    let (maze, seed) = generate_maze(&test_config()).expect("Maze generation failed");
    let json = serde_json::to_string(&snapshot(&maze, seed)).unwrap();
    let loaded = serde_json::from_str(&json).unwrap();

    let rebuilt = regenerate_maze(&loaded).expect("Regeneration failed");
    assert_eq!(rebuilt.grid(), maze.grid());
}

#[test]
fn test_tampered_snapshot_is_detected() {
    let (maze, seed) = generate_maze(&test_config()).expect("Maze generation failed");
    let mut snap = snapshot(&maze, seed);
    snap.total_steps += 2;

    assert!(regenerate_maze(&snap).is_err());
}

#[test]
fn test_invalid_dimensions() {
    let config = MazeConfig {
        width: 0,
        ..test_config()
    };
    assert!(generate_maze(&config).is_err());
}

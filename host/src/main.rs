use host::{
    generate_maze, load_moves, load_snapshot, regenerate_maze, render_ascii, replay, save_report,
    save_snapshot, snapshot, solve, MazeConfig,
};
use std::env;
use std::fs;
use std::time::Instant;

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("🧩 Key Maze");
    println!("{}", "=".repeat(70));
    println!();

    // Parse CLI arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            let (config, output_file) = parse_generate_args(&args[2..]).unwrap_or_else(|e| {
                eprintln!("❌ Error: {}", e);
                std::process::exit(1);
            });
            generate_command(&config, output_file.as_deref());
        }

        "play" => {
            if args.len() < 4 {
                eprintln!("Usage: {} play <maze_file> <moves_file> [output_file]", args[0]);
                eprintln!("Error: Missing required arguments");
                std::process::exit(1);
            }
            play_command(&args[2], &args[3], args.get(4).map(|s| s.as_str()));
        }

        "solve" => {
            if args.len() < 3 {
                eprintln!("Usage: {} solve <maze_file> [output_file]", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }
            solve_command(&args[2], args.get(3).map(|s| s.as_str()));
        }

        "show" => {
            if args.len() < 3 {
                eprintln!("Usage: {} show <maze_file>", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }
            show_command(&args[2]);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate [--width <w>] [--height <h>] [--seed <seed>] [--config <file>] [output_file]");
    eprintln!("      Generate a maze and place its key");
    eprintln!("      - --width/--height: Chamber counts (default: 20x20)");
    eprintln!("      - --seed: Integer seed; derived from the clock when omitted");
    eprintln!("      - --config: JSON file with width, height and seed");
    eprintln!("                  Flags given after --config override it");
    eprintln!("      - output_file: File to save the maze (JSON)");
    eprintln!("                     Defaults to: <seed>_maze.json");
    eprintln!();
    eprintln!("  play <maze_file> <moves_file> [output_file]");
    eprintln!("      Replay a list of moves against a saved maze");
    eprintln!("      - moves_file: JSON array of \"up\", \"down\", \"left\", \"right\"");
    eprintln!("      - output_file: Defaults to: <seed>_report.json");
    eprintln!();
    eprintln!("  solve <maze_file> [output_file]");
    eprintln!("      Write a reference solution (entrance -> key -> exit)");
    eprintln!("      - output_file: Defaults to: <seed>_moves.json");
    eprintln!();
    eprintln!("  show <maze_file>");
    eprintln!("      Print the maze as text");
    eprintln!();
    eprintln!("Example workflow:");
    eprintln!("  1. Generate maze:  {} generate --seed 2918957128", program);
    eprintln!("     (saves to 2918957128_maze.json)");
    eprintln!("  2. Solve it:       {} solve 2918957128_maze.json", program);
    eprintln!("  3. Replay moves:   {} play 2918957128_maze.json 2918957128_moves.json", program);
}

fn parse_generate_args(args: &[String]) -> Result<(MazeConfig, Option<String>), Box<dyn std::error::Error>> {
    let mut config = MazeConfig::default();
    let mut output_file = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--width" => {
                let v = value("--width")?;
                config.width = v.parse().map_err(|_| format!("Invalid width '{}'", v))?;
            }
            "--height" => {
                let v = value("--height")?;
                config.height = v.parse().map_err(|_| format!("Invalid height '{}'", v))?;
            }
            "--seed" => {
                let v = value("--seed")?;
                config.seed = Some(v.parse().map_err(|_| {
                    format!("Invalid maze seed '{}'. Must be a non-negative integer.", v)
                })?);
            }
            "--config" => {
                config = MazeConfig::load(value("--config")?)?;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag).into()),
            file => output_file = Some(file.to_string()),
        }
    }

    Ok((config, output_file))
}

fn generate_command(config: &MazeConfig, output_file: Option<&str>) {
    println!("📋 Generating maze");
    println!("  Size: {}x{} chambers", config.width, config.height);
    println!();

    let start = Instant::now();

    match generate_maze(config) {
        Ok((maze, seed)) => {
            let duration = start.elapsed();
            println!("  Generation time: {:.3}ms", duration.as_secs_f64() * 1000.0);
            println!();
            println!("✅ Maze generated successfully!");
            println!("  Seed: {}", seed);
            println!("  Grid size: {}x{} cells", maze.grid().rows(), maze.grid().cols());
            println!("  Key at: ({}, {})", maze.key_position().row, maze.key_position().col);
            println!("  Total steps: {}", maze.total_steps());
            println!();

            // Use default filename pattern if no output file specified
            let default_filename = format!("{}_maze.json", seed);
            let file_to_save = output_file.unwrap_or(&default_filename);

            match save_snapshot(&snapshot(&maze, seed), file_to_save) {
                Ok(_) => {
                    println!("💾 Maze saved to: {}", file_to_save);
                }
                Err(e) => {
                    eprintln!("❌ Error saving maze: {}", e);
                    std::process::exit(1);
                }
            }

            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!();
            eprintln!("❌ Error generating maze: {}", e);
            eprintln!("{}", "=".repeat(70));
            std::process::exit(1);
        }
    }
}

fn play_command(maze_file: &str, moves_file: &str, output_file: Option<&str>) {
    println!("📋 Replaying moves");
    println!("  Maze file: {}", maze_file);
    println!("  Moves file: {}", moves_file);
    println!();

    let snapshot = match load_snapshot(maze_file) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("❌ Error loading maze: {}", e);
            std::process::exit(1);
        }
    };

    println!("📦 Loaded maze (seed: {})", snapshot.seed);

    let moves = match load_moves(moves_file) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("❌ Error loading moves: {}", e);
            std::process::exit(1);
        }
    };

    println!("📦 Loaded {} moves", moves.len());
    println!();

    match replay(&snapshot, &moves) {
        Ok(report) => {
            println!("✅ Replay complete");
            println!("  Moves applied: {}", report.moves_applied);
            println!("  Moves rejected: {}", report.moves_rejected);
            match report.hero {
                Some(pos) => println!("  Hero at: ({}, {})", pos.row, pos.col),
                None => println!("  Hero at: -"),
            }
            println!("  Has key: {}", if report.has_key { "Yes ✓" } else { "No ✗" });
            println!("  Finished: {}", if report.finished { "Yes ✓" } else { "No ✗" });
            println!();

            let default_filename = format!("{}_report.json", report.seed);
            let file_to_save = output_file.unwrap_or(&default_filename);

            match save_report(&report, file_to_save) {
                Ok(_) => println!("💾 Report saved to: {}", file_to_save),
                Err(e) => {
                    eprintln!("❌ Error saving report: {}", e);
                    std::process::exit(1);
                }
            }

            if report.finished {
                println!("🎊 Maze escaped with the key!");
            }
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!();
            eprintln!("❌ Error replaying moves: {}", e);
            eprintln!("{}", "=".repeat(70));
            std::process::exit(1);
        }
    }
}

fn solve_command(maze_file: &str, output_file: Option<&str>) {
    let result = load_snapshot(maze_file).and_then(|snapshot| {
        let maze = regenerate_maze(&snapshot)?;
        let moves = solve(&maze).ok_or("Maze has no route through the key")?;
        Ok((snapshot.seed, moves))
    });

    let (seed, moves) = match result {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("❌ Error solving maze: {}", e);
            std::process::exit(1);
        }
    };

    println!("✅ Found a {}-move solution", moves.len());

    let default_filename = format!("{}_moves.json", seed);
    let file_to_save = output_file.unwrap_or(&default_filename);

    let saved = serde_json::to_string(&moves)
        .map_err(|e| e.to_string())
        .and_then(|json| fs::write(file_to_save, json).map_err(|e| e.to_string()));
    match saved {
        Ok(()) => println!("💾 Moves saved to: {}", file_to_save),
        Err(e) => {
            eprintln!("❌ Error saving moves: {}", e);
            std::process::exit(1);
        }
    }
    println!("{}", "=".repeat(70));
}

fn show_command(maze_file: &str) {
    match load_snapshot(maze_file).and_then(|snapshot| regenerate_maze(&snapshot)) {
        Ok(maze) => {
            print!("{}", render_ascii(&maze));
            println!();
            println!("  Total steps: {}", maze.total_steps());
        }
        Err(e) => {
            eprintln!("❌ Error loading maze: {}", e);
            std::process::exit(1);
        }
    }
}

// Standalone replay tool for auditing Battlesnake decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use safe_step_snake::config::Config;
use safe_step_snake::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Audit every logged turn");
    eprintln!("  replay battlesnake_debug.jsonl");
    eprintln!();
    eprintln!("  # Audit specific turns with per-turn output");
    eprintln!("  replay battlesnake_debug.jsonl --turns 5,10,15 --verbose");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut turns = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--turns" => {
                let Some(value) = args.get(i + 1) else {
                    fail("--turns requires an argument");
                };
                turns = Some(parse_turns(value).unwrap_or_else(|e| fail(&e)));
                i += 1;
            }
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    fail("--config requires an argument");
                };
                config_path = value.clone();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {} ({}), using hardcoded defaults", e, config_path);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(&config, verbose);
    let entries = engine.load_log_file(log_file).unwrap_or_else(|e| fail(&e));

    let results = match turns {
        Some(turns) => engine.replay_turns(&entries, &turns).unwrap_or_else(|e| fail(&e)),
        None => engine.replay_all(&entries),
    };

    ReplayEngine::print_report(&results);

    if results.iter().any(|r| !r.consistent) {
        process::exit(2);
    }
}

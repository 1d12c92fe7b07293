//! Economy simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 2 players, 10 days x 10 rounds
//!   cargo run --bin simulate -- --players 4 -d 30   # 4 players for a month
//!   cargo run --bin simulate -- --seed 42 --log     # Reproducible, with action log

use dungeon_economy::simulator::{run_simulation, EconomyConfig, PlayerProfile, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, show_log) = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DUNGEON ECONOMY SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Players:        {}", config.players.len());
    println!("  Days:           {}", config.days);
    println!("  Rounds/Day:     {}", config.rounds_per_day);
    println!(
        "  Daily Reset:    {}",
        config.economy.reset_resources_daily
    );
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let outcome = match run_simulation(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    if show_log {
        for line in outcome.game.log().lines() {
            println!("{line}");
        }
        println!();
    }

    println!("{}", outcome.report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = outcome.report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report {filename}: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut show_log = false;
    let mut activity: Option<f64> = None;
    let mut frequency: Option<u32> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--days" => {
                if i + 1 < args.len() {
                    config.days = args[i + 1].parse().unwrap_or(config.days);
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if i + 1 < args.len() {
                    config.rounds_per_day = args[i + 1].parse().unwrap_or(config.rounds_per_day);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-p" | "--players" => {
                if i + 1 < args.len() {
                    if let Ok(count) = args[i + 1].parse::<usize>() {
                        config.players = SimConfig::with_players(count).players;
                    }
                    i += 1;
                }
            }
            "--activity" => {
                if i + 1 < args.len() {
                    activity = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--frequency" => {
                if i + 1 < args.len() {
                    frequency = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--classic" => {
                config.economy = EconomyConfig::classic();
            }
            "--engagement" => {
                let preset = SimConfig::engagement_comparison();
                config.days = preset.days;
                config.players = preset.players;
            }
            "--log" => {
                show_log = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    // Applied last so they hold regardless of flag order.
    config.players = config
        .players
        .into_iter()
        .map(|p| apply_engagement(p, activity, frequency))
        .collect();

    (config, show_log)
}

fn apply_engagement(
    mut profile: PlayerProfile,
    activity: Option<f64>,
    frequency: Option<u32>,
) -> PlayerProfile {
    if let Some(level) = activity {
        profile = profile.with_activity(level);
    }
    if let Some(days) = frequency {
        profile = profile.with_frequency(days);
    }
    profile
}

fn print_help() {
    println!("Dungeon Economy Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -d, --days <N>      Days to simulate (default: 10)");
    println!("    -r, --rounds <N>    Rounds per day (default: 10)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -p, --players <N>   Number of players (default: 2)");
    println!("    --activity <F>      Share of rounds each player plays, 0.0-1.0");
    println!("    --frequency <N>     Play every N days");
    println!("    --classic           Daily reset, uniform tiers, capped gear bonus");
    println!("    --engagement        Mixed roster of dedicated and casual players");
    println!("    --log               Print the full action log");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=debug for diagnostic output on stderr.");
}

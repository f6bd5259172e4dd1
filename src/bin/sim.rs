use std::path::PathBuf;

use battleship_rules::{init_logging, AutoPilot, Command, PlayerId, Session, Settings};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play a whole game with scripted input and print a JSON summary.
#[derive(Parser)]
struct Args {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write a bincode snapshot of the finished session here.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let rng = match args.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let mut session = Session::new(settings)?;
    let mut pilot = AutoPilot::new(rng);
    let mut events = 0usize;
    let mut commands = session.start().commands;

    while !session.is_over() {
        let batch = pilot
            .next_events(session.rules(), session.game())
            .map_err(|e| anyhow::anyhow!(e))?;
        if batch.is_empty() {
            break;
        }
        for event in batch {
            events += 1;
            commands.extend(session.apply(event).commands);
        }
    }

    if let Some(path) = &args.snapshot {
        let bytes = bincode::serialize(&session.snapshot())?;
        std::fs::write(path, bytes)?;
    }

    let errors = commands
        .iter()
        .filter(|c| matches!(c, Command::Error { .. }))
        .count();
    let stats = |id: PlayerId| {
        let p = session.game().player(id);
        json!({"shots": p.shots_fired(), "hits": p.hits_landed(), "ships_left": p.live_ships()})
    };
    let result = json!({
        "winner": session.winner().map(|p| p.to_string()),
        "events": events,
        "commands": commands.len(),
        "errors": errors,
        "player1": stats(PlayerId::P1),
        "player2": stats(PlayerId::P2),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

use std::path::PathBuf;

use battleship_rules::{
    driver::{self, LineSensor, Presenter},
    init_logging, Command, Session, Settings,
};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file; defaults to a 10x10 board with ships of size 2, 3, 3 and 4.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read events from stdin, one per line (`select`, `move ship 3 4`, ...).
    Play,
    /// Run a file of events, one per line.
    Replay { script: PathBuf },
}

/// Prints each command as a JSON line on stdout.
struct JsonPresenter;

#[async_trait::async_trait]
impl Presenter for JsonPresenter {
    async fn present(&mut self, command: &Command) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string(command)?);
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut session = Session::new(settings)?;
    let mut presenter = JsonPresenter;

    let winner = match cli.command {
        Commands::Play => {
            let mut sensor = LineSensor::new(BufReader::new(tokio::io::stdin()));
            driver::run(&mut session, &mut sensor, &mut presenter).await?
        }
        Commands::Replay { script } => {
            let file = tokio::fs::File::open(&script)
                .await
                .map_err(|e| anyhow::anyhow!("cannot open {}: {}", script.display(), e))?;
            let mut sensor = LineSensor::new(BufReader::new(file));
            driver::run(&mut session, &mut sensor, &mut presenter).await?
        }
    };

    match winner {
        Some(player) => eprintln!("{} wins", player),
        None => eprintln!("game unfinished ({:?})", session.rules().state().phase()),
    }
    Ok(())
}

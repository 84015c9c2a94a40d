mod prompt;
mod table;

use clap::Parser;
use fairdice_core::{Die, GameOutcome, GameSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fairdice")]
#[command(about = "Non-transitive dice game with a provably fair roll protocol")]
#[command(version)]
struct Cli {
    /// Dice as comma-separated integer faces, e.g. 2,2,4,4,9,9
    #[arg(required = true, value_name = "DIE")]
    dice: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "fairdice={},fairdice_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup validation happens before any protocol state exists
    let dice = match parse_dice(&cli.dice) {
        Ok(dice) => dice,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Example: fairdice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(dice) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(dice: Vec<Die>) -> anyhow::Result<()> {
    let mut session = GameSession::new(dice)?;
    tracing::debug!("starting game session {}", session.id());
    let mut io = prompt::TerminalIo::new();
    let outcome = session.play(&mut io)?;
    if outcome == GameOutcome::Aborted {
        println!("Game aborted.");
    }
    Ok(())
}

/// Parse the raw die arguments: at least three dice, every face an integer.
fn parse_dice(specs: &[String]) -> Result<Vec<Die>, String> {
    if specs.len() < 3 {
        return Err(format!("at least 3 dice are required, got {}", specs.len()));
    }
    specs.iter().map(|spec| parse_die(spec)).collect()
}

fn parse_die(spec: &str) -> Result<Die, String> {
    let faces = spec
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid face value '{}' in die '{}'", token.trim(), spec))
        })
        .collect::<Result<Vec<i64>, String>>()?;
    Die::new(faces).map_err(|_| format!("die '{spec}' has no faces"))
}

//! Set simulation CLI.
//!
//! Runs an all-bot game for a bounded time and prints the winners.
//! Board changes are logged through `LogUi`; set `RUST_LOG=debug` to see
//! every press and claim.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rust_set::{Config, GameBuilder, LogUi, PlayerKind, TimerMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Timer {
    Countdown,
    Elapsed,
    Unlimited,
}

impl From<Timer> for TimerMode {
    fn from(timer: Timer) -> Self {
        match timer {
            Timer::Countdown => TimerMode::Countdown,
            Timer::Elapsed => TimerMode::Elapsed,
            Timer::Unlimited => TimerMode::Unlimited,
        }
    }
}

#[derive(Parser)]
#[command(name = "set-sim")]
#[command(version)]
#[command(about = "Run a Set game between bots")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of bot players
    #[arg(long)]
    players: Option<usize>,

    /// Slots on the table
    #[arg(long)]
    table_size: Option<usize>,

    /// Cards in the deck
    #[arg(long)]
    deck_size: Option<usize>,

    /// Round length in milliseconds (countdown mode)
    #[arg(long)]
    round_ms: Option<u64>,

    /// Freeze after a point, in milliseconds
    #[arg(long)]
    point_freeze_ms: Option<u64>,

    /// Freeze after a penalty, in milliseconds
    #[arg(long)]
    penalty_freeze_ms: Option<u64>,

    /// Pause between bot presses, in milliseconds
    #[arg(long)]
    bot_delay_ms: Option<u64>,

    /// Clock behaviour
    #[arg(long, value_enum)]
    timer: Option<Timer>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the game after this many seconds
    #[arg(long, default_value = "30")]
    duration: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Config::from_json(&json)?
            }
            None => Config::default().with_seats(0, 2).with_bot_delay_ms(200),
        };

        if let Some(players) = self.players {
            config = config.with_players(vec![PlayerKind::Bot; players]);
        }
        if let Some(table_size) = self.table_size {
            config = config.with_table_size(table_size);
        }
        if let Some(deck_size) = self.deck_size {
            config = config.with_deck_size(deck_size);
        }
        if let Some(round_ms) = self.round_ms {
            config = config.with_round_ms(round_ms);
        }
        if let Some(point) = self.point_freeze_ms {
            config.point_freeze_ms = point;
        }
        if let Some(penalty) = self.penalty_freeze_ms {
            config.penalty_freeze_ms = penalty;
        }
        if let Some(delay) = self.bot_delay_ms {
            config = config.with_bot_delay_ms(delay);
        }
        if let Some(timer) = self.timer {
            config = config.with_timer(timer.into());
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.load_config()?;
    log::info!("config: {}", serde_json::to_string(&config)?);

    let mut game = GameBuilder::new(config).ui(Arc::new(LogUi)).build()?;
    game.start();
    let control = game.control();
    let players = game.players().clone();

    let limit = Duration::from_secs(cli.duration);
    let finished = game.join();
    tokio::pin!(finished);
    let winners = tokio::select! {
        result = &mut finished => result?,
        _ = tokio::time::sleep(limit) => {
            log::info!("time limit reached");
            control.terminate();
            finished.await?
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("interrupted");
            control.terminate();
            finished.await?
        }
    };

    for (player, seat) in players.iter() {
        println!("{}: {}", player, seat.score());
    }
    let names: Vec<String> = winners.iter().map(ToString::to_string).collect();
    println!("winners: {}", names.join(", "));
    Ok(())
}

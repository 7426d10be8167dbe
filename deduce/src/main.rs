//! Deduce - a typing trainer for your terminal
//!
//! Practice on passages from the Sherlock Holmes stories, from a single paragraph up to whole
//! pages, and keep track of your best scores.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use web_time::SystemTime;

mod app;
mod challenges;
mod config;
mod error;
mod logging;
mod page;
mod scores;
mod utils;

use crate::app::{App, Context};
use crate::challenges::Catalog;
use crate::config::Config;
use crate::error::AppError;
use crate::page::leaderboard::{self, View};
use crate::scores::{FileStore, ScoreBoard};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory to read `settings.toml` from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the menu and start this challenge
    #[arg(long, value_name = "ID")]
    challenge: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every challenge
    List,
    /// Print the high scores
    Scores {
        /// Only show scores for this challenge
        #[arg(long, value_name = "ID")]
        challenge: Option<String>,

        /// Newest first, instead of fastest first
        #[arg(long)]
        recent: bool,
    },
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = Config::get(cli.config)?;
    logging::init(&config.settings.log, &config.log_file())?;
    log::info!("Using configuration from {}", config.config_dir.display());

    match cli.command {
        Some(Command::List) => list(&Catalog::builtin()),
        Some(Command::Scores { challenge, recent }) => scores(&config, challenge, recent)?,
        None => {
            let context = Context::new(config)?;
            let challenge = cli
                .challenge
                .map(|id| {
                    context
                        .catalog
                        .get(&id)
                        .cloned()
                        .ok_or(AppError::UnknownChallenge(id))
                })
                .transpose()?;

            App::new(context, challenge).run()?;
        }
    }

    Ok(())
}

fn list(catalog: &Catalog) {
    for level in catalog.levels() {
        println!("{level}");
        for challenge in catalog.by_level(level) {
            println!(
                "  {:<16} {:<28} {:<10} {}",
                challenge.id, challenge.title, challenge.difficulty, challenge.estimated_time
            );
        }
    }
}

fn scores(config: &Config, challenge: Option<String>, recent: bool) -> Result<(), AppError> {
    let catalog = Catalog::builtin();
    if let Some(id) = &challenge
        && catalog.get(id).is_none()
    {
        return Err(AppError::UnknownChallenge(id.clone()));
    }

    let board = ScoreBoard::new(FileStore::new(config.scores_dir())?);
    let view = if recent { View::Recent } else { View::Top };
    let scores = leaderboard::select(
        &board,
        view,
        challenge.as_deref(),
        config.settings.scores.leaderboard_size,
    );

    if scores.is_empty() {
        println!("No high scores saved yet");
        return Ok(());
    }

    let now = SystemTime::now();
    for (rank, score) in scores.iter().enumerate() {
        let title = catalog
            .get(&score.challenge_id)
            .map_or(score.challenge_id.as_str(), |challenge| challenge.title);
        println!(
            "{:>2}. {:<20} {:>4} wpm {:>4}%  {:<28} {}",
            rank + 1,
            score.player_name,
            score.wpm,
            score.accuracy,
            title,
            utils::time_ago(score.timestamp(), now)
        );
    }

    Ok(())
}

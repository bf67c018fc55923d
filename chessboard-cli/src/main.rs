//! Chessboard CLI - Command-line interface
//!
//! Commands:
//! - play: Two players at one console
//! - show: Print a board and exit
//! - export: Write a setup file to start games from

mod play;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chessboard_core::Setup;

#[derive(Parser)]
#[command(name = "chessboard")]
#[command(about = "Two-player console chess")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game at the console
    Play(play::PlayArgs),
    /// Print a board and exit
    Show {
        /// Setup file to show instead of the opening position
        #[arg(long, value_name = "FILE")]
        setup: Option<PathBuf>,
        #[arg(long)]
        no_color: bool,
    },
    /// Write the opening position as a setup file
    Export {
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, default_value = "BLACK")]
        p1_color: String,
        #[arg(long, default_value = "WHITE")]
        p2_color: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Show { setup, no_color } => {
            let board = play::load_board(setup.as_deref(), "BLACK", "WHITE")?;
            print!("{}", render::render_board(&board, !no_color));
            Ok(())
        }
        Commands::Export { output, p1_color, p2_color } => {
            let board = chessboard_core::Board::new(&p1_color, &p2_color);
            let setup = Setup {
                name: "standard".to_string(),
                ..Setup::from_board(&board)
            };
            setup.save(&output)?;
            tracing::info!("Wrote setup to {}", output.display());
            Ok(())
        }
    }
}

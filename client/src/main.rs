//! Command line interface for the sweeper server.

use std::{io, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use sweeper_client::{
    BoardParams, GameView, MoveRequest, Pos, Result, SweeperClient, render_game,
};
use tracing::error;
use uuid::Uuid;

/// Play Minesweeper against a sweeper server
#[derive(Parser, Debug)]
#[command(name = "sweeper", version, long_about = None)]
struct Cli {
    /// Base URL of the server
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game
    Start {
        height: usize,
        width: usize,
        mines: usize,
    },
    /// Show a game
    View { id: Uuid },
    /// Act on a cell; rows and columns are numbered from 1
    Play {
        id: Uuid,
        action: Action,
        row: usize,
        column: usize,
    },
    /// Resign a game
    End { id: Uuid },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Action {
    #[value(alias = "clear", alias = "c")]
    Reset,
    #[value(alias = "f")]
    Flag,
    #[value(alias = "q")]
    Question,
    #[value(alias = "r")]
    Reveal,
}

impl Action {
    fn request(self, pos: Pos) -> MoveRequest {
        match self {
            Self::Reset => MoveRequest::Reset { pos },
            Self::Flag => MoveRequest::Flag { pos },
            Self::Question => MoveRequest::Question { pos },
            Self::Reveal => MoveRequest::Reveal { pos },
        }
    }
}

fn zero_based(value: usize, name: &str) -> Result<usize> {
    value
        .checked_sub(1)
        .ok_or_else(|| format!("{name} numbers start at 1").into())
}

async fn run(cli: Cli) -> Result<GameView> {
    let client = SweeperClient::new(&cli.server)?;

    match cli.command {
        Command::Start {
            height,
            width,
            mines,
        } => {
            client
                .start_game(BoardParams {
                    width,
                    height,
                    mines,
                })
                .await
        }
        Command::View { id } => client.get_game(id).await,
        Command::Play {
            id,
            action,
            row,
            column,
        } => {
            let pos = Pos {
                row: zero_based(row, "row")?,
                column: zero_based(column, "column")?,
            };
            client.make_move(id, action.request(pos)).await
        }
        Command::End { id } => client.end_game(id).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let command = format!("{:?}", cli.command);

    let game = match run(cli).await {
        Ok(game) => game,
        Err(err) => {
            error!("Failed to run {}: {}", command, err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = render_game(&mut io::stdout().lock(), &game) {
        error!("Failed to render game: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

//! Sweeper Client Library
//!
//! An HTTP client for the sweeper server and a plain-text board renderer.
//!
//! ```rust,no_run
//! use sweeper_client::{BoardParams, MoveRequest, Pos, SweeperClient, render_game};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = SweeperClient::new("http://localhost:8000")?;
//!
//!     let game = client.start_game(BoardParams::default()).await?;
//!     let game = client
//!         .make_move(game.id, MoveRequest::Flag { pos: Pos { row: 0, column: 0 } })
//!         .await?;
//!
//!     render_game(&mut std::io::stdout(), &game)?;
//!     Ok(())
//! }
//! ```

mod client;
mod render;

pub use client::SweeperClient;
pub use render::render_game;

// Re-export common types for convenience
pub use sweeper_common::{models::*, protocol::*};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

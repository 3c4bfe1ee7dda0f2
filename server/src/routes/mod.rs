use rocket::{Request, Route, State, catch, get, http::Status, post, routes, serde::json::Json};
use sweeper_common::{
    models::{BoardParams, GameView},
    protocol::MoveRequest,
};
use tokio::{task, time};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::{
    config::ServerConfig,
    data::{Board, CellState, GameId},
    service::Service,
};

mod error;
mod view;

pub use error::ApiError;

fn parse_id(id: &str) -> Result<GameId, ApiError> {
    GameId::parse_str(id)
        .map_err(|err| ApiError::invalid_argument(format!("invalid game id {id:?}: {err}")))
}

#[post("/games", data = "<params>")]
#[instrument(level = "trace", skip(service, config), fields(width = params.width, height = params.height, mines = params.mines))]
pub async fn start_game(
    params: Json<BoardParams>,
    service: &State<Service>,
    config: &State<ServerConfig>,
) -> Result<Json<GameView>, ApiError> {
    let cancel = CancellationToken::new();
    // Stops the generator if the client goes away before it finishes.
    let _guard = cancel.clone().drop_guard();

    let mut creation = {
        let service = service.inner().clone();
        let cancel = cancel.clone();
        let board: Board = params.into_inner().into();
        task::spawn_blocking(move || service.start_game(&cancel, board))
    };

    let joined = match time::timeout(config.creation_timeout, &mut creation).await {
        Ok(joined) => joined,
        Err(_) => {
            warn!(
                "Game creation exceeded {:?}, cancelling",
                config.creation_timeout
            );
            cancel.cancel();
            creation.await
        }
    };

    let game = joined??;
    info!("Created game {}", game.id());
    Ok(Json((&game).into()))
}

#[get("/games/<id>")]
#[instrument(level = "trace", skip(service))]
pub fn get_game(id: &str, service: &State<Service>) -> Result<Json<GameView>, ApiError> {
    let game = service.get_game(parse_id(id)?)?;
    Ok(Json((&game).into()))
}

#[post("/games/<id>/moves", data = "<request>")]
#[instrument(level = "trace", skip(service))]
pub fn make_move(
    id: &str,
    request: Json<MoveRequest>,
    service: &State<Service>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_id(id)?;
    let game = match request.into_inner() {
        MoveRequest::Reveal { pos } => service.make_move(id, pos.into(), CellState::Revealed)?,
        MoveRequest::Flag { pos } => service.make_move(id, pos.into(), CellState::Flagged)?,
        MoveRequest::Question { pos } => {
            service.make_move(id, pos.into(), CellState::Questioned)?
        }
        MoveRequest::Reset { pos } => service.make_move(id, pos.into(), CellState::Default)?,
        MoveRequest::End => service.end_game(id)?,
    };
    Ok(Json((&game).into()))
}

#[post("/games/<id>/end")]
#[instrument(level = "trace", skip(service))]
pub fn end_game(id: &str, service: &State<Service>) -> Result<Json<GameView>, ApiError> {
    let game = service.end_game(parse_id(id)?)?;
    Ok(Json((&game).into()))
}

/// Answers anything the handlers did not with an [`ErrorResponse`] body.
#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request) -> ApiError {
    ApiError {
        status,
        kind: match status.code {
            404 => "not_found",
            400 | 422 => "invalid_argument",
            _ => "internal",
        },
        message: status.reason_lossy().to_string(),
    }
}

pub fn routes() -> Vec<Route> {
    routes![start_game, get_game, make_move, end_game]
}

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use rocket::{
    http::Status,
    local::blocking::{Client, LocalResponse},
};
use sweeper_common::{
    models::{BoardParams, Cell, GameStatus, GameView, Pos},
    protocol::{ErrorResponse, MoveRequest},
};
use sweeper_server::{
    config::ServerConfig,
    generator::{NumberGenerator, RandomIds},
    service::Service,
    store::StoreKind,
};

/// 3x3 board with mines in the top-left and bottom-right corners, opened at
/// the top-right corner. Repeats for every game created.
const CORNERS: [usize; 6] = [0, 0, 2, 2, 0, 2];
const CORNERS_BOARD: BoardParams = BoardParams {
    width: 3,
    height: 3,
    mines: 2,
};

fn cycling(script: &'static [usize]) -> impl NumberGenerator {
    let next = AtomicUsize::new(0);
    move |bound: usize| -> usize {
        let i = next.fetch_add(1, Ordering::Relaxed);
        script[i % script.len()] % bound
    }
}

fn client_with(numbers: impl NumberGenerator + 'static, config: ServerConfig) -> Client {
    let service = Service::new(
        StoreKind::Sharded.build().into(),
        Arc::new(RandomIds),
        Arc::new(numbers),
    );
    let rocket = sweeper_server::build_with_service(config, service).unwrap();
    Client::tracked(rocket).unwrap()
}

fn client() -> Client {
    client_with(cycling(&CORNERS), ServerConfig::default())
}

fn start(client: &Client, params: BoardParams) -> GameView {
    let response = client.post("/games").json(&params).dispatch();
    assert_eq!(response.status(), Status::Ok);
    response.into_json().unwrap()
}

fn play<'c>(client: &'c Client, id: &str, request: MoveRequest) -> LocalResponse<'c> {
    client
        .post(format!("/games/{id}/moves"))
        .json(&request)
        .dispatch()
}

fn error(response: LocalResponse<'_>, status: Status) -> ErrorResponse {
    assert_eq!(response.status(), status);
    response.into_json().unwrap()
}

#[test]
fn created_games_start_with_the_opening_revealed() {
    let client = client();

    let game = start(&client, CORNERS_BOARD);

    assert_eq!(game.status, GameStatus::Ongoing);
    assert_eq!(game.board, CORNERS_BOARD);
    assert_eq!(game.cell(Pos { row: 0, column: 2 }), Some(Cell::Revealed { adjacent: 0 }));
    assert_eq!(game.cell(Pos { row: 1, column: 1 }), Some(Cell::Revealed { adjacent: 2 }));
    assert_eq!(game.cell(Pos { row: 0, column: 0 }), Some(Cell::Hidden));

    let fetched: GameView = client
        .get(format!("/games/{}", game.id))
        .dispatch()
        .into_json()
        .unwrap();
    assert_eq!(fetched, game);
}

#[test]
fn seeded_servers_generate_the_same_boards() {
    let config = ServerConfig {
        seed: Some(7),
        ..ServerConfig::default()
    };
    let fields: Vec<_> = (0..2)
        .map(|_| {
            let client = Client::tracked(sweeper_server::build(config.clone()).unwrap()).unwrap();
            start(&client, BoardParams::default()).field
        })
        .collect();

    assert_eq!(fields[0], fields[1]);
}

#[test]
fn missing_board_fields_use_defaults() {
    let client = client_with(sweeper_server::generator::ThreadNumbers, ServerConfig::default());

    let response = client
        .post("/games")
        .header(rocket::http::ContentType::JSON)
        .body("{}")
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let game: GameView = response.into_json().unwrap();

    assert_eq!(game.board, BoardParams::default());
    assert_eq!(game.field.len(), 9);
    assert!(game.field.iter().all(|row| row.len() == 9));
}

#[test]
fn invalid_boards_are_rejected() {
    let client = client();

    for params in [
        BoardParams {
            width: 0,
            height: 3,
            mines: 1,
        },
        BoardParams {
            width: 3,
            height: 3,
            mines: 0,
        },
        BoardParams {
            width: 3,
            height: 3,
            mines: 9,
        },
    ] {
        let response = client.post("/games").json(&params).dispatch();
        assert_eq!(error(response, Status::BadRequest).kind, "invalid_board");
    }
}

#[test]
fn malformed_ids_are_invalid_arguments() {
    let client = client();

    let response = client.get("/games/not-a-uuid").dispatch();

    assert_eq!(error(response, Status::BadRequest).kind, "invalid_argument");
}

#[test]
fn unknown_games_are_not_found() {
    let client = client();

    let response = client
        .get("/games/00000000-0000-0000-0000-000000000001")
        .dispatch();

    assert_eq!(error(response, Status::NotFound).kind, "not_found");
}

#[test]
fn unknown_routes_answer_with_an_error_body() {
    let client = client();

    let response = client.get("/nowhere").dispatch();

    assert_eq!(error(response, Status::NotFound).kind, "not_found");
}

#[test]
fn moves_outside_the_board_are_rejected() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id.to_string();

    let response = play(&client, &id, MoveRequest::Reveal {
        pos: Pos { row: 3, column: 0 },
    });

    assert_eq!(error(response, Status::BadRequest).kind, "out_of_bounds");
}

#[test]
fn flagged_cells_cannot_be_revealed() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id.to_string();
    let pos = Pos { row: 1, column: 0 };

    let game: GameView = play(&client, &id, MoveRequest::Flag { pos })
        .into_json()
        .unwrap();
    assert_eq!(game.cell(pos), Some(Cell::Flagged));

    let response = play(&client, &id, MoveRequest::Reveal { pos });
    assert_eq!(error(response, Status::PreconditionFailed).kind, "flagged");

    let response = play(&client, &id, MoveRequest::Flag {
        pos: Pos { row: 0, column: 2 },
    });
    assert_eq!(error(response, Status::Conflict).kind, "already_revealed");
}

#[test]
fn flagging_every_mine_wins() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id.to_string();

    play(&client, &id, MoveRequest::Flag {
        pos: Pos { row: 0, column: 0 },
    });
    let game: GameView = play(&client, &id, MoveRequest::Flag {
        pos: Pos { row: 2, column: 2 },
    })
    .into_json()
    .unwrap();

    assert_eq!(game.status, GameStatus::Won);
    assert_eq!(game.flagged(), 2);
}

#[test]
fn revealing_a_mine_loses() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id.to_string();

    let game: GameView = play(&client, &id, MoveRequest::Reveal {
        pos: Pos { row: 2, column: 2 },
    })
    .into_json()
    .unwrap();

    assert_eq!(game.status, GameStatus::Lost);
    assert_eq!(game.cell(Pos { row: 2, column: 2 }), Some(Cell::Mine));
}

#[test]
fn ended_games_reject_moves() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id.to_string();

    let game: GameView = client
        .post(format!("/games/{id}/end"))
        .dispatch()
        .into_json()
        .unwrap();
    assert_eq!(game.status, GameStatus::Resigned);

    let response = play(&client, &id, MoveRequest::Reveal {
        pos: Pos { row: 1, column: 0 },
    });
    assert_eq!(error(response, Status::Conflict).kind, "game_finished");

    let response = play(&client, &id, MoveRequest::End);
    assert_eq!(error(response, Status::Conflict).kind, "game_finished");
}

#[test]
fn end_can_be_sent_as_a_move() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id.to_string();

    let game: GameView = play(&client, &id, MoveRequest::End).into_json().unwrap();

    assert_eq!(game.status, GameStatus::Resigned);
}

#[test]
fn slow_creation_is_cancelled() {
    // Every draw lands on the same cell, so the second mine is never placed.
    let client = client_with(|_: usize| -> usize { 0 }, ServerConfig {
        creation_timeout: Duration::from_millis(50),
        ..ServerConfig::default()
    });

    let response = client.post("/games").json(&CORNERS_BOARD).dispatch();

    assert_eq!(error(response, Status::ServiceUnavailable).kind, "cancelled");
}

#[test]
fn views_serialize_with_tagged_cells() {
    let client = client();
    let id = start(&client, CORNERS_BOARD).id;

    let body: serde_json::Value = client
        .get(format!("/games/{id}"))
        .dispatch()
        .into_json()
        .unwrap();

    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["status"], "ongoing");
    assert_eq!(body["board"]["mines"], 2);
    assert_eq!(body["field"][0][0], serde_json::json!({ "state": "hidden" }));
    assert_eq!(
        body["field"][1][1],
        serde_json::json!({ "state": "revealed", "adjacent": 2 })
    );
}

#[test]
fn overflowing_board_sizes_are_invalid() {
    let client = client();

    let response = client
        .post("/games")
        .header(rocket::http::ContentType::JSON)
        .body(r#"{"width": 9223372036854775809, "height": 2, "mines": 1}"#)
        .dispatch();

    let body = error(response, Status::BadRequest);
    assert_eq!(body.kind, "invalid_board");
    assert!(body.message.contains("invalid board dimensions"));
}

#[test]
fn boards_over_the_configured_limit_are_invalid() {
    let config = ServerConfig {
        max_cells: 100,
        ..ServerConfig::default()
    };
    let client = Client::tracked(sweeper_server::build(config).unwrap()).unwrap();

    let response = client
        .post("/games")
        .json(&BoardParams {
            width: 11,
            height: 10,
            mines: 10,
        })
        .dispatch();

    let body = error(response, Status::BadRequest);
    assert_eq!(body.kind, "invalid_board");
    assert_eq!(body.message, "invalid board: board of 110 cells exceeds the limit of 100");
}

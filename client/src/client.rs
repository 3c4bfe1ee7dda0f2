use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use sweeper_common::{
    models::{BoardParams, GameView},
    protocol::{ErrorResponse, MoveRequest},
};
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::Result;

/// HTTP client for the sweeper server API
pub struct SweeperClient {
    client: Client,
    base_url: Url,
}

impl SweeperClient {
    /// Create a new client talking to the server at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::new();

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Start a new game on a board described by `params`
    #[instrument(level = "debug", skip(self))]
    pub async fn start_game(&self, params: BoardParams) -> Result<GameView> {
        let url = self.endpoint("/games")?;
        let response = self.client.post(url).json(&params).send().await?;
        decode(response).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_game(&self, id: Uuid) -> Result<GameView> {
        let url = self.endpoint(&format!("/games/{id}"))?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn make_move(&self, id: Uuid, request: MoveRequest) -> Result<GameView> {
        let url = self.endpoint(&format!("/games/{id}/moves"))?;
        let response = self.client.post(url).json(&request).send().await?;
        decode(response).await
    }

    /// Resign the game
    #[instrument(level = "debug", skip(self))]
    pub async fn end_game(&self, id: Uuid) -> Result<GameView> {
        let url = self.endpoint(&format!("/games/{id}/end"))?;
        let response = self.client.post(url).send().await?;
        decode(response).await
    }
}

/// Decodes a successful body as `T`, or the server's error body into an error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await?;
    debug!("Server answered {}: {}", status, body);
    Err(error_message(status, &body).into())
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => format!("{}: {}", err.kind, err.message),
        Err(_) => format!("request failed: {status}"),
    }
}

use serde::{Deserialize, Serialize};

use crate::models::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action")]
pub enum MoveRequest {
    #[serde(rename = "reveal")]
    Reveal { pos: Pos },
    #[serde(rename = "flag")]
    Flag { pos: Pos },
    #[serde(rename = "question")]
    Question { pos: Pos },
    #[serde(rename = "reset")]
    Reset { pos: Pos },
    #[serde(rename = "end")]
    End,
}

/// Body returned alongside every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

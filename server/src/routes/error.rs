use rocket::{
    Request,
    http::Status,
    response::{self, Responder, status},
    serde::json::Json,
};
use sweeper_common::protocol::ErrorResponse;
use tokio::task::JoinError;
use tracing::error;

use crate::error::{ErrorKind, SweeperError};

/// Error returned by the HTTP handlers, rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status: Status::BadRequest,
            kind: "invalid_argument",
            message: message.into(),
        }
    }
}

fn status_for(kind: ErrorKind) -> Status {
    match kind {
        ErrorKind::InvalidBoard | ErrorKind::OutOfBounds => Status::BadRequest,
        ErrorKind::AlreadyRevealed | ErrorKind::GameFinished => Status::Conflict,
        ErrorKind::Flagged => Status::PreconditionFailed,
        ErrorKind::NotFound => Status::NotFound,
        ErrorKind::Cancelled => Status::ServiceUnavailable,
    }
}

impl From<SweeperError> for ApiError {
    fn from(err: SweeperError) -> Self {
        let kind = err.kind();
        Self {
            status: status_for(kind),
            kind: kind.as_str(),
            message: err.to_string(),
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        error!("Game creation task failed: {}", err);
        Self {
            status: Status::InternalServerError,
            kind: "internal",
            message: "game creation failed".to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        status::Custom(
            self.status,
            Json(ErrorResponse {
                kind: self.kind.to_string(),
                message: self.message,
            }),
        )
        .respond_to(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::CellRef, error::BoardError};

    #[test]
    fn sweeper_errors_map_to_statuses() {
        let cases = [
            (SweeperError::from(BoardError::NoMines), Status::BadRequest),
            (SweeperError::OutOfBounds(CellRef::new(9, 9)), Status::BadRequest),
            (SweeperError::AlreadyRevealed, Status::Conflict),
            (SweeperError::GameFinished, Status::Conflict),
            (SweeperError::Flagged, Status::PreconditionFailed),
            (SweeperError::NotFound(uuid::Uuid::nil()), Status::NotFound),
            (SweeperError::Cancelled, Status::ServiceUnavailable),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn mutator_failures_use_the_wrapped_kind() {
        let err = ApiError::from(SweeperError::mutator(SweeperError::Flagged));

        assert_eq!(err.status, Status::PreconditionFailed);
        assert_eq!(err.kind, "flagged");
        assert_eq!(err.message, "error in mutator: cell is flagged");
    }
}

//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use expert_tictactoe::{EngineError, Player};
use tracing::{error, warn};

/// A failed move request on its way out as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ApiError {
    /// The engine refused the board or found no move.
    #[display("{}", _0)]
    Engine(EngineError),

    /// The query string could not be read.
    #[display("Malformed query: {}", _0)]
    Query(String),
}

impl ApiError {
    /// Client mistakes are 400s; a board with no move left is our 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine(EngineError::NoLegalMove) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Engine(_) | ApiError::Query(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Body text sent to the client.
    pub fn message(&self) -> String {
        match self {
            ApiError::Engine(EngineError::InvalidBoard(defect)) => {
                format!("Board is invalid! ({})", defect)
            }
            ApiError::Engine(EngineError::IllegalTurn(player)) => {
                format!("It is not {}'s turn!", turn_label(*player))
            }
            ApiError::Engine(err) => format!("Error: {}", err),
            ApiError::Query(reason) => format!("Board is invalid! ({})", reason),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Query(rejection.body_text())
    }
}

fn turn_label(player: Player) -> char {
    player.symbol().to_ascii_uppercase()
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Move selection failed");
        } else {
            warn!(error = %self, "Rejected move request");
        }
        (status, Json(self.message())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expert_tictactoe::BoardDefect;

    #[test]
    fn test_status_mapping() {
        let invalid = ApiError::from(EngineError::InvalidBoard(BoardDefect::Length(3)));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let turn = ApiError::from(EngineError::IllegalTurn(Player::O));
        assert_eq!(turn.status(), StatusCode::BAD_REQUEST);
        assert_eq!(turn.message(), "It is not O's turn!");

        let stuck = ApiError::from(EngineError::NoLegalMove);
        assert_eq!(stuck.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(stuck.message().starts_with("Error: "));
    }

    #[test]
    fn test_invalid_board_message_names_defect() {
        let err = ApiError::from(EngineError::InvalidBoard(BoardDefect::Symbol('z')));
        assert_eq!(err.message(), "Board is invalid! (unrecognized square value 'z')");
    }

    #[test]
    fn test_query_error_is_bad_request() {
        let err = ApiError::Query("duplicate field `board`".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Board is invalid! (duplicate field `board`)");
    }
}

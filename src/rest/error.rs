use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::models::ErrorResponse;
use crate::directory::FetchError;
use crate::overlay::OverlayError;

const LIST_FAILED: &str = "Unable to retrieve repositories";
const LIST_ERRORED: &str = "Error retrieving repositories";
pub const OWNER_NOT_FOUND: &str = "User not found";

/// Status and body returned for a failed request.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(message),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.body = self.body.with_detail(detail);
        self
    }
}

impl From<OverlayError> for ApiError {
    fn from(err: OverlayError) -> Self {
        match err {
            OverlayError::Validation(message) => {
                log::warn!("rejected request: {}", message);
                Self::bad_request(message)
            }
            OverlayError::Directory(FetchError::OwnerNotFound(owner)) => {
                log::warn!("directory has no owner {}", owner);
                Self {
                    status: StatusCode::NOT_FOUND,
                    body: ErrorResponse::new(LIST_FAILED).with_detail(OWNER_NOT_FOUND),
                }
            }
            OverlayError::Directory(FetchError::Upstream { status, body }) => {
                log::warn!("directory service answered {}: {}", status, body);
                Self {
                    status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    body: ErrorResponse::new(LIST_FAILED).with_detail(body),
                }
            }
            OverlayError::Directory(err @ (FetchError::Transport(_) | FetchError::Decode(_))) => {
                log::error!("directory request failed: {}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse::new(LIST_ERRORED).with_detail(err.to_string()),
                }
            }
            OverlayError::Storage(err) => {
                log::error!("override store failed: {:#}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse::new("Storage failure").with_detail(format!("{err:#}")),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

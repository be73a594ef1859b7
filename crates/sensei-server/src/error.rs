//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sensei_core::ChatError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Chat(#[from] ChatError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Chat(ChatError::Checkout(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Configuration defects are for operators; the visitor gets a generic body.
        tracing::error!("chat turn failed: {}", self);
        let status = self.status_code();
        let body = ErrorResponse {
            error: "Something went wrong on our side. Please try again later.".to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sensei_core::{Bucket, CheckoutError};

    fn defect() -> ApiError {
        let source = url::Url::parse("not a url").unwrap_err();
        ApiError::Chat(ChatError::Checkout(CheckoutError::MalformedDestination {
            bucket: Bucket::Kata,
            template: "not a url".to_string(),
            source,
        }))
    }

    #[test]
    fn test_status_code() {
        assert_eq!(defect().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_response_does_not_leak_template() {
        let response = defect().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8_lossy(&bytes);
        assert!(!body.contains("not a url"));
        assert!(!body.contains("kata"));
    }
}

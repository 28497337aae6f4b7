use crate::models::Screen;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Failure talking to the transaction recorder.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transaction store is not configured")]
    NotConfigured,

    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Store returned an unreadable body: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failure opening the payment widget.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("Payment widget API key is missing")]
    MissingApiKey,

    #[error("Invalid fiat amount: {0}")]
    InvalidAmount(String),

    #[error("Widget initialization failed: {0}")]
    Init(String),
}

/// An event the checkout state machine refused.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Event '{event}' is not allowed on the {screen} screen")]
    InvalidTransition { screen: Screen, event: &'static str },

    #[error("Amount '{0}' is not a positive number")]
    AmountNotPositive(String),

    #[error("Service agreement has not been accepted")]
    AgreementRequired,

    #[error("Transaction could not be recorded: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum CryptoTapError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for CryptoTapError {
    fn from(rejection: JsonRejection) -> Self {
        CryptoTapError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl CryptoTapError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            CryptoTapError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            CryptoTapError::Flow(FlowError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "INVALID_TRANSITION")
            }
            CryptoTapError::Flow(FlowError::AmountNotPositive(_)) => {
                (StatusCode::CONFLICT, "AMOUNT_NOT_POSITIVE")
            }
            CryptoTapError::Flow(FlowError::AgreementRequired) => {
                (StatusCode::CONFLICT, "AGREEMENT_REQUIRED")
            }
            CryptoTapError::Flow(FlowError::Store(_)) | CryptoTapError::Store(_) => {
                (StatusCode::BAD_GATEWAY, "STORE_ERROR")
            }
            CryptoTapError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl IntoResponse for CryptoTapError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, error_code = error_code, "Request failed");
        } else {
            tracing::debug!(error = %self, error_code = error_code, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (CryptoTapError::SessionNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                CryptoTapError::Flow(FlowError::InvalidTransition {
                    screen: Screen::Entry,
                    event: "confirm",
                }),
                StatusCode::CONFLICT,
            ),
            (
                CryptoTapError::Flow(FlowError::Store(StoreError::NotConfigured)),
                StatusCode::BAD_GATEWAY,
            ),
            (CryptoTapError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                CryptoTapError::Flow(FlowError::AmountNotPositive("0".into())),
                StatusCode::CONFLICT,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn invalid_transition_message_names_screen() {
        let err = FlowError::InvalidTransition {
            screen: Screen::Disclaimer,
            event: "express_pay",
        };
        assert_eq!(
            err.to_string(),
            "Event 'express_pay' is not allowed on the disclaimer screen"
        );
    }
}

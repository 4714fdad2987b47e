use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use thiserror::Error;

use crate::database::DatabaseError;
use crate::models::ApiError;

pub type ApiFailure = (StatusCode, Json<ApiError>);

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("From and To locations are required")]
    MissingEndpoints,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingSignupFields,
    #[error("Email and password are required")]
    MissingLoginFields,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token is missing")]
    MissingToken,
    #[error("Token is invalid or expired")]
    InvalidToken,
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("password task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("user store error: {0}")]
    Storage(#[source] DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::EmailTaken(_) => Self::EmailTaken,
            other => Self::Storage(other),
        }
    }
}

/// Unwraps a JSON body, turning axum's plain-text rejection into a 400 with
/// the usual `{"message"}` body.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiFailure> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("rejected request body: {rejection}");
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(rejection.body_text())),
        )
    })
}

pub fn route_error_to_api_error(err: RouteError) -> ApiFailure {
    let status = match &err {
        RouteError::MissingEndpoints => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiError::new(err.to_string())))
}

pub fn auth_error_to_api_error(err: AuthError) -> ApiFailure {
    let status = match &err {
        AuthError::MissingSignupFields
        | AuthError::MissingLoginFields
        | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::Hash(_)
        | AuthError::Blocking(_)
        | AuthError::Sign(_)
        | AuthError::Storage(_) => {
            tracing::error!("auth failure: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Internal server error")),
            );
        }
    };
    (status, Json(ApiError::new(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoints_is_a_client_error() {
        let (status, Json(body)) = route_error_to_api_error(RouteError::MissingEndpoints);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "From and To locations are required");
    }

    #[test]
    fn duplicate_email_from_store_reads_like_precheck() {
        let err = AuthError::from(DatabaseError::EmailTaken("a@b.c".into()));
        let (status, Json(body)) = auth_error_to_api_error(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Email already registered");
    }

    #[test]
    fn token_failures_are_unauthorized() {
        let (status, Json(body)) = auth_error_to_api_error(AuthError::MissingToken);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Token is missing");
    }

    #[test]
    fn internal_failures_hide_details() {
        let (status, Json(body)) = auth_error_to_api_error(AuthError::Hash("salt".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }
}

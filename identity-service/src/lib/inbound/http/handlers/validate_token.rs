use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::authorization::errors::AuthorizationError;
use crate::inbound::http::router::AppState;

/// Report the claims of the presented bearer token.
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<ValidateTokenResponseData>, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| AuthorizationError::MalformedAuth)?;

    let claims = state.authorization_gate.validate_bearer(header)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateTokenResponseData {
            user_id: claims.sub,
            role: claims.role.as_str().to_string(),
            exp: claims.exp,
            iat: claims.iat,
            iss: claims.iss,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub user_id: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

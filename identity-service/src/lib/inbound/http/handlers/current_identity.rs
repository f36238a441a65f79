use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::authorization::models::Principal;
use crate::identity::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

pub async fn current_identity(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    state
        .authentication_service
        .get_identity(&principal.identity_id)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}

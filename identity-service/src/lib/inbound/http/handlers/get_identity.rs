use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::authorization::models::Principal;
use crate::identity::errors::IdentityError;
use crate::identity::models::IdentityId;
use crate::identity::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

/// Administrator lookup of any identity.
pub async fn get_identity(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(identity_id): Path<String>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    let identity_id = IdentityId::from_string(&identity_id).map_err(IdentityError::from)?;

    tracing::debug!(
        admin_id = %principal.identity_id,
        identity_id = %identity_id,
        "Identity lookup"
    );

    state
        .authentication_service
        .get_identity(&identity_id)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}

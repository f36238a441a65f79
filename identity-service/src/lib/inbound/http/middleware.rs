use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::authorization::errors::AuthorizationError;
use crate::authorization::gate::AuthorizationGate;

/// Middleware that admits requests through the route group's gate.
///
/// On success the caller's [`Principal`](crate::authorization::models::Principal)
/// is stored in the request extensions for downstream handlers.
pub async fn authorize(
    State(gate): State<AuthorizationGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| AuthorizationError::MalformedAuth)?;

    let principal = gate.admit(header)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

use std::sync::Arc;
use std::time::Duration;

use auth::Role;
use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_identity::current_identity;
use super::handlers::get_identity::get_identity;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::validate_token::validate_token;
use super::middleware::authorize;
use crate::authorization::gate::AuthorizationGate;
use crate::identity::ports::AuthenticationServicePort;

#[derive(Clone)]
pub struct AppState {
    pub authentication_service: Arc<dyn AuthenticationServicePort>,
    /// Gate admitting any authenticated caller, used for inline token checks
    pub authorization_gate: AuthorizationGate,
}

pub fn create_router(
    authentication_service: Arc<dyn AuthenticationServicePort>,
    token_service: Arc<TokenService>,
) -> Router {
    let authenticated_gate = AuthorizationGate::authenticated(Arc::clone(&token_service));
    let admin_gate = AuthorizationGate::new(Arc::clone(&token_service), [Role::Admin]);

    let state = AppState {
        authentication_service,
        authorization_gate: authenticated_gate.clone(),
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/validate", get(validate_token));

    let authenticated_routes = Router::new()
        .route("/api/v1/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(authenticated_gate, authorize));

    let admin_routes = Router::new()
        .route("/api/v1/admin/identities/:identity_id", get(get_identity))
        .route_layer(middleware::from_fn_with_state(admin_gate, authorize));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub mod areas;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routing;

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::rejection::JsonRejection,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::areas::AreaCatalog;
use crate::auth::{AuthenticatedUser, TokenService};
use crate::database::Database;
use crate::error::{ApiFailure, json_body, route_error_to_api_error};
use crate::models::{RouteRequest, RouteResponse};
use crate::routing::plan_routes;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<TokenService>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/api/route", post(route_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .route("/api/areas", get(areas_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// POST /api/route - Shortest and eco route between two named locations
async fn route_handler(
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiFailure> {
    let req = json_body(payload)?;
    tracing::debug!("route request from {}: {:?} -> {:?}", user.email, req.from, req.to);

    let (shortest_route, eco_route) = plan_routes(&req).map_err(route_error_to_api_error)?;

    Ok(Json(RouteResponse {
        shortest_route,
        eco_route,
        message: "Routes calculated successfully".to_string(),
    }))
}

/// GET /api/areas - The full area catalog keyed by name
async fn areas_handler() -> impl IntoResponse {
    Json(AreaCatalog)
}

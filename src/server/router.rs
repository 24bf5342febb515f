use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use super::state::ServeState;

pub(crate) fn build_router(state: ServeState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/oppi/v1/product/:id", get(product_handler))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

async fn health_handler(State(state): State<ServeState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "products": state.store.len(),
    }))
}

async fn product_handler(
    State(state): State<ServeState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.store.get(id) {
        Some(record) => {
            debug!(target: "posinfo.server", id, "product served");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": record,
                })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "message": "product not found",
            })),
        ),
    }
}

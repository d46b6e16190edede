use axum::http::{Method, StatusCode, header};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::index;
use crate::temperature::TemperatureStoreHandle;
use crate::temperature_routes;

// Anything that goes in here must be a handle or pointer that can be cloned.
// The underlying state itself should be shared.
#[derive(Clone)]
pub struct AppState {
    pub temperatures: TemperatureStoreHandle,
    /// Status sent along with the "Store not found" body.
    pub not_found_status: StatusCode,
}

impl AppState {
    pub fn new(temperatures: TemperatureStoreHandle, strict_status: bool) -> AppState {
        let not_found_status = if strict_status {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        };
        AppState {
            temperatures,
            not_found_status,
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_TYPE])
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::get_index))
        .nest("/temperature", temperature_routes::routes(state))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

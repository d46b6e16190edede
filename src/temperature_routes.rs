use axum::{
    Router,
    extract::{Json, Path, State, rejection::PathRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::lookup::{LookupResult, artificial_delay, lookup};
use crate::temperature::TemperatureRecord;

pub const NOT_FOUND_MESSAGE: &str = "Store not found";

/// JSON envelope: `{"status": "success"|"failure", "data": ...}`.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum TemperatureResponse {
    Success(TemperatureRecord),
    Failure(String),
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/{place}", get(get_temperature))
        .with_state(state)
}

async fn get_temperature(
    State(state): State<AppState>,
    place: Result<Path<String>, PathRejection>,
) -> (StatusCode, Json<TemperatureResponse>) {
    let result = match place {
        Ok(Path(place)) => lookup(&state.temperatures, &place).await,
        // Not valid UTF-8, so it cannot name any stored place.
        Err(rejection) => {
            log::debug!("unreadable place in path: {}", rejection);
            artificial_delay().await;
            LookupResult::NotFound
        }
    };
    match result {
        LookupResult::Found(record) => (StatusCode::OK, Json(TemperatureResponse::Success(record))),
        LookupResult::NotFound => (
            state.not_found_status,
            Json(TemperatureResponse::Failure(NOT_FOUND_MESSAGE.to_string())),
        ),
    }
}

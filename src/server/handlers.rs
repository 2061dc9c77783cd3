use crate::api::AirQualityProvider;
use crate::models::{AqiInsight, City, DataEnvelope};
use crate::service::AqiService;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// --- Error Handling ---
// The service never fails, so the only error left is a malformed request.
pub enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(s) => (StatusCode::BAD_REQUEST, s),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct CurrentParams {
    city: Option<String>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn cities<P: AirQualityProvider>(
    State(service): State<Arc<AqiService<P>>>,
) -> Json<DataEnvelope<Vec<City>>> {
    Json(DataEnvelope::new(service.cities().to_vec()))
}

pub async fn current_aqi<P: AirQualityProvider>(
    State(service): State<Arc<AqiService<P>>>,
    Query(params): Query<CurrentParams>,
) -> Result<Json<DataEnvelope<AqiInsight>>, ApiError> {
    let city = params
        .city
        .ok_or_else(|| ApiError::BadRequest("missing query parameter 'city'".to_string()))?;
    let insight = service.current(&city).await;
    Ok(Json(DataEnvelope::new(insight)))
}

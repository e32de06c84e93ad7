use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::GeoPoint,
    services::haversine_km,
};

#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub to: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub km: f64,
}

fn point(value: Option<&Value>, field: &str) -> AppResult<GeoPoint> {
    value.and_then(GeoPoint::from_value).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "{} must be an object with numeric lat and lng",
            field
        ))
    })
}

/// Handler for the great-circle distance endpoint
pub async fn distance_km(
    payload: Result<Json<DistanceRequest>, JsonRejection>,
) -> AppResult<Json<DistanceResponse>> {
    let Json(payload) = payload?;
    let from = point(payload.from.as_ref(), "from")?;
    let to = point(payload.to.as_ref(), "to")?;

    Ok(Json(DistanceResponse {
        km: haversine_km(from, to),
    }))
}

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{
        PreferencePayload, RecommendationRequest, RecommendationResponse, RecommendationSummary,
    },
    routes::AppState,
    services::recommendations,
};

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<PreferencePayload>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(payload) = payload?;
    let request = RecommendationRequest::try_from(payload)?;

    tracing::info!(
        request_id = %request_id,
        categories = request.categories.len(),
        locations = request.locations.len(),
        delegate = state.delegate.is_some(),
        "Processing recommendation request"
    );

    let outcome = recommendations::recommend(
        state.delegate.as_deref(),
        &request,
        state.delegate_failure_fallback,
    )
    .await;

    tracing::info!(
        request_id = %request_id,
        count = outcome.recommendations.len(),
        source = ?outcome.source,
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse {
        summary: RecommendationSummary {
            count: outcome.recommendations.len(),
            start_date: request.start_date,
            end_date: request.end_date,
            source: outcome.source,
        },
        recommendations: outcome.recommendations,
    }))
}

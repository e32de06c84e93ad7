use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{error::AppResult, routes::AppState};

/// Proxies a user lookup to the upstream user service
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> AppResult<Json<Value>> {
    let user = state.users.find_by_email(&email).await?;
    Ok(Json(user))
}

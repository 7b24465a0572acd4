//! Degree recommendation endpoint

use axum::{extract::State, routing::post, Json, Router};
use mentorlink_common::db::models::Degree;
use serde::Deserialize;

use crate::auth::CurrentAccount;
use crate::error::ApiResult;
use crate::services::recommender;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub about_me_1: String,
    #[serde(default)]
    pub about_me_2: String,
    #[serde(default)]
    pub about_me_3: String,
}

/// POST /api/recommendations
///
/// Scores degrees from the three prompts and persists the top 3 into the
/// caller's student profile. Returned in slot order.
pub async fn recommend(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<RecommendRequest>,
) -> ApiResult<Json<Vec<Degree>>> {
    let degrees = recommender::recommend_degrees(
        &state.db,
        &account,
        [
            request.about_me_1.as_str(),
            request.about_me_2.as_str(),
            request.about_me_3.as_str(),
        ],
    )
    .await?;

    Ok(Json(degrees))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/recommendations", post(recommend))
}

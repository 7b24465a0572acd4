//! Pair session endpoint

use axum::{extract::State, routing::post, Json, Router};
use mentorlink_common::db::models::PairSession;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::ApiResult;
use crate::services::lifecycle;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePairSessionRequest {
    pub mentor_id: Uuid,
    #[serde(default)]
    pub price: f64,
    pub url: String,
}

/// POST /api/pair-sessions
///
/// Binds a fresh feedback form and notifies the mentor as a side effect.
pub async fn create_pair_session(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<CreatePairSessionRequest>,
) -> ApiResult<Json<PairSession>> {
    let session = lifecycle::create_pair_session(
        &state.db,
        &account,
        request.mentor_id,
        request.price,
        request.url,
    )
    .await?;

    Ok(Json(session))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/pair-sessions", post(create_pair_session))
}

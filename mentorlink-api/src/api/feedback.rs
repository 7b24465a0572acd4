//! Feedback submission endpoint

use axum::{
    extract::{Path, State},
    routing::patch,
    Json, Router,
};
use mentorlink_common::db::models::{FeedbackForm, FeedbackState};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::ApiResult;
use crate::services::feedback::{submit_feedback, FeedbackUpdate};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    #[serde(flatten)]
    pub form: FeedbackForm,
    pub state: FeedbackState,
}

/// PATCH /api/feedback/:id
///
/// Partial update: absent fields keep their prior values.
pub async fn update_feedback(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(form_id): Path<Uuid>,
    Json(update): Json<FeedbackUpdate>,
) -> ApiResult<Json<FeedbackResponse>> {
    let form = submit_feedback(&state.db, &account, form_id, update).await?;
    let state = form.state();

    Ok(Json(FeedbackResponse { form, state }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/feedback/:id", patch(update_feedback))
}

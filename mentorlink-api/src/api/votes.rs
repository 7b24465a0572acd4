//! Upvote endpoint

use axum::{extract::State, routing::post, Json, Router};
use mentorlink_common::db::models::{Upvote, Votable};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::{ApiError, ApiResult};
use crate::services::ledger;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SetVoteRequest {
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
    pub has_upvoted: bool,
}

/// POST /api/votes
///
/// The body must carry exactly one of question_id / answer_id.
pub async fn set_vote(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<SetVoteRequest>,
) -> ApiResult<Json<Upvote>> {
    let votable = match (request.question_id, request.answer_id) {
        (Some(question_id), None) => Votable::Question(question_id),
        (None, Some(answer_id)) => Votable::Answer(answer_id),
        _ => {
            return Err(ApiError::BadRequest(
                "Provide exactly one of question_id or answer_id".to_string(),
            ))
        }
    };

    let upvote = ledger::set_vote(&state.db, &account, votable, request.has_upvoted).await?;

    Ok(Json(upvote))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/votes", post(set_vote))
}

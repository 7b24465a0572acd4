//! Answer endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use mentorlink_common::db::models::{Answer, Votable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::db;
use crate::error::ApiResult;
use crate::services::{ledger, lifecycle};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    pub question_id: Uuid,
    pub text: String,
}

/// POST /api/answers
///
/// Seeds one upvote ledger row per registered account as a side effect.
pub async fn create_answer(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<CreateAnswerRequest>,
) -> ApiResult<Json<Answer>> {
    let answer =
        lifecycle::create_answer(&state.db, &account, request.question_id, request.text).await?;

    Ok(Json(answer))
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub answer: Answer,
    pub upvotes: i64,
}

/// GET /api/questions/:id/answers
pub async fn list_answers(
    State(state): State<AppState>,
    CurrentAccount(_account): CurrentAccount,
    Path(question_id): Path<Uuid>,
) -> ApiResult<Json<Vec<AnswerResponse>>> {
    let answers = db::answers::list_answers_for_question(&state.db, question_id).await?;

    let mut response = Vec::with_capacity(answers.len());
    for answer in answers {
        let upvotes = ledger::upvote_count(&state.db, Votable::Answer(answer.id)).await?;
        response.push(AnswerResponse { answer, upvotes });
    }

    Ok(Json(response))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/answers", post(create_answer))
        .route("/api/questions/:id/answers", get(list_answers))
}

//! Question endpoints

use axum::{extract::State, routing::get, Json, Router};
use mentorlink_common::db::models::{Question, Role, Votable};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentAccount;
use crate::db;
use crate::error::ApiResult;
use crate::services::{ledger, lifecycle};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    #[serde(flatten)]
    pub question: Question,
    pub upvotes: i64,
}

/// GET /api/questions
///
/// Mentors see every question; students and unassigned accounts see only
/// their own. Newest first.
pub async fn list_questions(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> ApiResult<Json<Vec<QuestionResponse>>> {
    let questions = match account.role {
        Role::Mentor => db::questions::list_questions(&state.db).await?,
        _ => db::questions::list_questions_by_author(&state.db, account.id).await?,
    };

    let mut response = Vec::with_capacity(questions.len());
    for question in questions {
        let upvotes = ledger::upvote_count(&state.db, Votable::Question(question.id)).await?;
        response.push(QuestionResponse { question, upvotes });
    }

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// POST /api/questions
///
/// Seeds one upvote ledger row per registered account as a side effect.
pub async fn create_question(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<CreateQuestionRequest>,
) -> ApiResult<Json<Question>> {
    let question =
        lifecycle::create_question(&state.db, &account, request.title, request.text).await?;

    Ok(Json(question))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/questions", get(list_questions).post(create_question))
}

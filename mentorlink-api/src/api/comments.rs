//! Comment endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use mentorlink_common::db::models::Comment;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub answer_id: Uuid,
    pub text: String,
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<Json<Comment>> {
    db::answers::load_answer(&state.db, request.answer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Answer {}", request.answer_id)))?;

    let comment = Comment::new(account.id, request.answer_id, request.text);
    db::comments::insert_comment(&state.db, &comment).await?;

    Ok(Json(comment))
}

/// GET /api/answers/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    CurrentAccount(_account): CurrentAccount,
    Path(answer_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Comment>>> {
    let comments = db::comments::list_comments_for_answer(&state.db, answer_id).await?;
    Ok(Json(comments))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/comments", post(create_comment))
        .route("/api/answers/:id/comments", get(list_comments))
}

//! Notification endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use mentorlink_common::db::models::Notification;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/notifications
///
/// The caller's notifications, by recency then unseen-first.
pub async fn list_notifications(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = db::notifications::list_for_account(&state.db, account.id).await?;
    Ok(Json(notifications))
}

/// POST /api/notifications/:id/seen
pub async fn mark_seen(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let updated = db::notifications::mark_seen(&state.db, account.id, notification_id).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!(
            "Notification {}",
            notification_id
        )));
    }

    Ok(Json(json!({ "status": "ok" })))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/:id/seen", post(mark_seen))
}

//! Appointment endpoint

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use mentorlink_common::db::models::Appointment;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::error::ApiResult;
use crate::services::lifecycle;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub mentor_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub price: f64,
}

/// POST /api/appointments
///
/// Fails with 422 when the target mentor is not flagged professional.
/// The meeting URL is generated server-side.
pub async fn create_appointment(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<CreateAppointmentRequest>,
) -> ApiResult<Json<Appointment>> {
    let appointment = lifecycle::create_appointment(
        &state.db,
        &account,
        request.mentor_id,
        request.starts_at,
        request.ends_at,
        request.price,
    )
    .await?;

    Ok(Json(appointment))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/appointments", post(create_appointment))
}

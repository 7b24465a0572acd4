//! Account registration endpoint
//!
//! Registration is public: the upstream identity service hashes the
//! credential before it reaches this boundary.

use axum::{extract::State, routing::post, Json, Router};
use mentorlink_common::db::models::Account;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::accounts::{create_account, ProfileSpec};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MentorProfileRequest {
    #[serde(default)]
    pub is_professional: bool,
    pub degree_id: Uuid,
    pub university_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub mentor: Option<MentorProfileRequest>,
    #[serde(default)]
    pub student: bool,
}

/// POST /api/accounts
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> ApiResult<Json<Account>> {
    let profile = match (request.mentor, request.student) {
        (Some(_), true) => {
            return Err(ApiError::BadRequest(
                "An account cannot be both mentor and student".to_string(),
            ))
        }
        (Some(mentor), false) => ProfileSpec::Mentor {
            is_professional: mentor.is_professional,
            degree_id: mentor.degree_id,
            university_id: mentor.university_id,
        },
        (None, true) => ProfileSpec::Student,
        (None, false) => ProfileSpec::None,
    };

    let account = create_account(
        &state.db,
        &request.email,
        request.password_hash,
        request.name,
        profile,
    )
    .await?;

    Ok(Json(account))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/accounts", post(register))
}

//! Authenticated-account extraction
//!
//! Token issuance and verification live in the upstream identity service.
//! That service forwards the authenticated account id in the
//! `x-account-id` header; this extractor resolves it against the accounts
//! table and rejects anything else with 401.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use mentorlink_common::db::models::Account;
use uuid::Uuid;

use crate::{db, error::ApiError, AppState};

/// Header carrying the authenticated account id
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";

/// The authenticated account for this request
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCOUNT_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing account identity".to_string()))?;

        let account_id = Uuid::parse_str(header)
            .map_err(|_| ApiError::Unauthorized("Malformed account identity".to_string()))?;

        let account = db::accounts::load_account(&state.db, account_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Unknown account".to_string()))?;

        Ok(CurrentAccount(account))
    }
}

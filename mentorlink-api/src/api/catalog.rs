//! Degree, keyword and university catalog endpoints
//!
//! Listing is public. Seeding endpoints back the keyword corpus the
//! recommender matches against.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use mentorlink_common::db::models::{Degree, Keyword, University};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/degrees
pub async fn list_degrees(State(state): State<AppState>) -> ApiResult<Json<Vec<Degree>>> {
    let degrees = db::degrees::list_degrees(&state.db).await?;
    Ok(Json(degrees))
}

#[derive(Debug, Deserialize)]
pub struct CreateDegreeRequest {
    pub name: String,
}

/// POST /api/degrees
pub async fn create_degree(
    State(state): State<AppState>,
    Json(request): Json<CreateDegreeRequest>,
) -> ApiResult<Json<Degree>> {
    let degree = Degree::new(request.name);
    db::degrees::insert_degree(&state.db, &degree).await?;
    Ok(Json(degree))
}

#[derive(Debug, Deserialize)]
pub struct CreateKeywordRequest {
    pub name: String,
    pub degree_id: Uuid,
}

/// POST /api/keywords
pub async fn create_keyword(
    State(state): State<AppState>,
    Json(request): Json<CreateKeywordRequest>,
) -> ApiResult<Json<Keyword>> {
    db::degrees::load_degree(&state.db, request.degree_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Degree {}", request.degree_id)))?;

    let keyword = Keyword::new(request.name, request.degree_id);
    db::keywords::insert_keyword(&state.db, &keyword).await?;
    Ok(Json(keyword))
}

#[derive(Debug, Serialize)]
pub struct UniversityResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub degrees: Vec<Degree>,
}

/// GET /api/universities
pub async fn list_universities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UniversityResponse>>> {
    let universities = db::universities::list_universities(&state.db).await?;

    let mut response = Vec::with_capacity(universities.len());
    for university in universities {
        let degrees = db::universities::list_degrees_for_university(&state.db, university.id).await?;
        response.push(UniversityResponse {
            id: university.id,
            name: university.name,
            location: university.location,
            degrees,
        });
    }

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct CreateUniversityRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub degree_ids: Vec<Uuid>,
}

/// POST /api/universities
pub async fn create_university(
    State(state): State<AppState>,
    Json(request): Json<CreateUniversityRequest>,
) -> ApiResult<Json<University>> {
    let university = University::new(request.name, request.location);
    db::universities::insert_university(&state.db, &university).await?;

    for degree_id in request.degree_ids {
        db::degrees::load_degree(&state.db, degree_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Degree {}", degree_id)))?;
        db::universities::link_degree(&state.db, university.id, degree_id).await?;
    }

    Ok(Json(university))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/degrees", get(list_degrees).post(create_degree))
        .route("/api/keywords", post(create_keyword))
        .route(
            "/api/universities",
            get(list_universities).post(create_university),
        )
}

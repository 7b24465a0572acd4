//! Integration tests for the mentorlink-api HTTP surface
//!
//! Each test drives the full router against a temp-dir SQLite database,
//! exercising the lifecycle fan-out, the upvote ledger, the feedback
//! state machine and the recommender through the same code paths a
//! deployed service runs.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mentorlink_api::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: temp-dir database + router + raw pool for assertions
async fn setup() -> (TempDir, SqlitePool, Router) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("mentorlink.db");

    let pool = mentorlink_common::db::init_database(&db_path)
        .await
        .expect("database init");

    let app = build_router(AppState::new(pool.clone()));

    (temp_dir, pool, app)
}

fn get(uri: &str, account_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(id) = account_id {
        builder = builder.header("x-account-id", id);
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, account_id: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(id) = account_id {
        builder = builder.header("x-account-id", id);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

/// Register a degree + university pair and return their ids
async fn seed_catalog(app: &Router) -> (String, String) {
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/degrees",
            None,
            json!({ "name": "Computer Science" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let degree_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/universities",
            None,
            json!({
                "name": "Test University",
                "location": "Testville",
                "degree_ids": [degree_id],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let university_id = json_body(response).await["id"].as_str().unwrap().to_string();

    (degree_id, university_id)
}

async fn register_mentor(
    app: &Router,
    email: &str,
    degree_id: &str,
    university_id: &str,
    is_professional: bool,
) -> String {
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/accounts",
            None,
            json!({
                "email": email,
                "password_hash": "argon2-hash",
                "name": "Mentor",
                "mentor": {
                    "is_professional": is_professional,
                    "degree_id": degree_id,
                    "university_id": university_id,
                },
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

async fn register_student(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/accounts",
            None,
            json!({
                "email": email,
                "password_hash": "argon2-hash",
                "name": "Student",
                "student": true,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health and authentication boundary
// =============================================================================

#[tokio::test]
async fn health_endpoint_requires_no_auth() {
    let (_dir, _pool, app) = setup().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "mentorlink-api");
}

#[tokio::test]
async fn protected_endpoints_reject_missing_identity() {
    let (_dir, _pool, app) = setup().await;

    let response = app
        .clone()
        .oneshot(get("/api/notifications", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get("/api/notifications", Some("not-a-uuid")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn degree_listing_is_public() {
    let (_dir, _pool, app) = setup().await;

    let response = app.oneshot(get("/api/degrees", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Account registration
// =============================================================================

#[tokio::test]
async fn account_cannot_be_both_mentor_and_student() {
    let (_dir, _pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/accounts",
            None,
            json!({
                "email": "both@example.com",
                "password_hash": "hash",
                "name": "Both",
                "student": true,
                "mentor": {
                    "degree_id": degree_id,
                    "university_id": university_id,
                },
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (_dir, _pool, app) = setup().await;

    register_student(&app, "dup@example.com").await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/accounts",
            None,
            json!({
                "email": "Dup@Example.com",
                "password_hash": "hash",
                "name": "Dup",
                "student": true,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Question scope
// =============================================================================

#[tokio::test]
async fn students_see_own_questions_mentors_see_all() {
    let (_dir, _pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let mentor = register_mentor(&app, "mentor@example.com", &degree_id, &university_id, false).await;
    let student_a = register_student(&app, "a@example.com").await;
    let student_b = register_student(&app, "b@example.com").await;

    for (author, title) in [(&student_a, "from a"), (&student_b, "from b")] {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/questions",
                Some(author),
                json!({ "title": title, "text": "body" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get("/api/questions", Some(&student_a)))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "from a");

    let response = app
        .oneshot(get("/api/questions", Some(&mentor)))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

// =============================================================================
// End-to-end ledger scenario
// =============================================================================

#[tokio::test]
async fn upvote_flow_accrues_mentor_points() {
    let (_dir, pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let mentor_account =
        register_mentor(&app, "mentor@example.com", &degree_id, &university_id, false).await;
    let student_account = register_student(&app, "student@example.com").await;

    // Student asks; two accounts exist, so two ledger rows appear
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/questions",
            Some(&student_account),
            json!({ "title": "How do I learn Rust?", "text": "..." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let question_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM upvotes WHERE question_id = ?")
        .bind(&question_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);
    let voted: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM upvotes WHERE question_id = ? AND has_upvoted = 1",
    )
    .bind(&question_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(voted, 0);

    // Mentor answers; the answer gets its own two rows
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/answers",
            Some(&mentor_account),
            json!({ "question_id": question_id, "text": "Start with the book." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let answer_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM upvotes WHERE answer_id = ?")
        .bind(&answer_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);

    // Student upvotes the mentor's answer
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/votes",
            Some(&student_account),
            json!({ "answer_id": answer_id, "has_upvoted": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let points: i64 = sqlx::query_scalar("SELECT points FROM mentors WHERE account_id = ?")
        .bind(&mentor_account)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 5);

    // Voting true again changes nothing
    app.clone()
        .oneshot(send_json(
            "POST",
            "/api/votes",
            Some(&student_account),
            json!({ "answer_id": answer_id, "has_upvoted": true }),
        ))
        .await
        .unwrap();
    let points: i64 = sqlx::query_scalar("SELECT points FROM mentors WHERE account_id = ?")
        .bind(&mentor_account)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 5);
}

#[tokio::test]
async fn vote_without_target_is_bad_request() {
    let (_dir, _pool, app) = setup().await;
    let student = register_student(&app, "student@example.com").await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/votes",
            Some(&student),
            json!({ "has_upvoted": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn vote_on_unknown_votable_is_not_found() {
    let (_dir, _pool, app) = setup().await;
    let student = register_student(&app, "student@example.com").await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/votes",
            Some(&student),
            json!({
                "answer_id": "00000000-0000-0000-0000-000000000099",
                "has_upvoted": true,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Pair sessions, appointments and feedback
// =============================================================================

#[tokio::test]
async fn pair_session_notifies_mentor() {
    let (_dir, pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let mentor_account =
        register_mentor(&app, "mentor@example.com", &degree_id, &university_id, false).await;
    let student_account = register_student(&app, "student@example.com").await;

    let mentor_id: String = sqlx::query_scalar("SELECT id FROM mentors WHERE account_id = ?")
        .bind(&mentor_account)
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/pair-sessions",
            Some(&student_account),
            json!({
                "mentor_id": mentor_id,
                "price": 40.0,
                "url": "https://meet.example/session",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = json_body(response).await;
    let form_id = session["feedback_form_id"].as_str().unwrap().to_string();

    // The mentor sees the request in their inbox, unseen
    let response = app
        .clone()
        .oneshot(get("/api/notifications", Some(&mentor_account)))
        .await
        .unwrap();
    let inbox = json_body(response).await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["feedback_form_id"], form_id.as_str());
    assert_eq!(inbox[0]["seen"], false);

    // Marking it seen works exactly once per id
    let notification_id = inbox[0]["id"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/api/notifications/{}/seen", notification_id),
            Some(&mentor_account),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/notifications/00000000-0000-0000-0000-000000000001/seen",
            Some(&mentor_account),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn appointment_against_amateur_mentor_is_unprocessable() {
    let (_dir, pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let mentor_account =
        register_mentor(&app, "amateur@example.com", &degree_id, &university_id, false).await;
    let student_account = register_student(&app, "student@example.com").await;

    let mentor_id: String = sqlx::query_scalar("SELECT id FROM mentors WHERE account_id = ?")
        .bind(&mentor_account)
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/appointments",
            Some(&student_account),
            json!({
                "mentor_id": mentor_id,
                "starts_at": "2026-09-01T10:00:00Z",
                "ends_at": "2026-09-01T11:00:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_MENTOR");
}

#[tokio::test]
async fn appointment_against_professional_mentor_succeeds() {
    let (_dir, pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let mentor_account =
        register_mentor(&app, "pro@example.com", &degree_id, &university_id, true).await;
    let student_account = register_student(&app, "student@example.com").await;

    let mentor_id: String = sqlx::query_scalar("SELECT id FROM mentors WHERE account_id = ?")
        .bind(&mentor_account)
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/appointments",
            Some(&student_account),
            json!({
                "mentor_id": mentor_id,
                "starts_at": "2026-09-01T10:00:00Z",
                "ends_at": "2026-09-01T11:00:00Z",
                "price": 25.0,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let appointment = json_body(response).await;
    assert_eq!(appointment["status"], "requested");
    assert!(appointment["url"].as_str().unwrap().starts_with("https://"));
    assert!(appointment["feedback_form_id"].is_string());
}

#[tokio::test]
async fn feedback_partial_update_preserves_fields() {
    let (_dir, pool, app) = setup().await;
    let (degree_id, university_id) = seed_catalog(&app).await;

    let mentor_account =
        register_mentor(&app, "mentor@example.com", &degree_id, &university_id, false).await;
    let student_account = register_student(&app, "student@example.com").await;

    let mentor_id: String = sqlx::query_scalar("SELECT id FROM mentors WHERE account_id = ?")
        .bind(&mentor_account)
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/pair-sessions",
            Some(&student_account),
            json!({ "mentor_id": mentor_id, "url": "https://meet.example/s" }),
        ))
        .await
        .unwrap();
    let form_id = json_body(response).await["feedback_form_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &format!("/api/feedback/{}", form_id),
            Some(&student_account),
            json!({ "student_comment": "great mentor" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &format!("/api/feedback/{}", form_id),
            Some(&student_account),
            json!({ "student_satisfied_rating": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let form = json_body(response).await;
    assert_eq!(form["student_satisfied_rating"], 5);
    assert_eq!(form["student_comment"], "great mentor");
    assert_eq!(form["mentor_satisfied_rating"], Value::Null);
    assert_eq!(form["state"], "partially_complete");
}

#[tokio::test]
async fn feedback_on_unknown_form_is_not_found() {
    let (_dir, _pool, app) = setup().await;
    let student = register_student(&app, "student@example.com").await;

    let response = app
        .oneshot(send_json(
            "PATCH",
            "/api/feedback/00000000-0000-0000-0000-000000000042",
            Some(&student),
            json!({ "student_satisfied_rating": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn recommendations_fill_three_slots() {
    let (_dir, pool, app) = setup().await;

    // A small catalog with a clear keyword signal
    let mut degree_ids = Vec::new();
    for name in ["Data Engineering", "Mathematics", "History", "Biology"] {
        let response = app
            .clone()
            .oneshot(send_json("POST", "/api/degrees", None, json!({ "name": name })))
            .await
            .unwrap();
        degree_ids.push(
            json_body(response).await["id"]
                .as_str()
                .unwrap()
                .to_string(),
        );
    }
    for keyword in ["database", "databases", "sql databases"] {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/keywords",
                None,
                json!({ "name": keyword, "degree_id": degree_ids[0] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let student_account = register_student(&app, "student@example.com").await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/recommendations",
            Some(&student_account),
            json!({ "about_me_1": "I love database work", "about_me_2": "", "about_me_3": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let recommended = json_body(response).await;
    let slots = recommended.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["id"], degree_ids[0].as_str());

    // Persisted onto the student profile
    let degree1: Option<String> =
        sqlx::query_scalar("SELECT degree1_id FROM students LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(degree1.as_deref(), Some(degree_ids[0].as_str()));
}

//! Entity lifecycle operations
//!
//! Creating a question or answer seeds one upvote ledger row per current
//! account. Creating a pair session or appointment creates and binds its
//! feedback form and notifies the mentor. Each operation is a single
//! transaction: the parent row and its dependents commit together or not
//! at all.

use mentorlink_common::db::models::{
    Account, Answer, Appointment, FeedbackForm, Notification, PairSession, Question, Votable,
};
use mentorlink_common::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::services::meeting;

/// Create a question and seed its upvote ledger
pub async fn create_question(
    pool: &SqlitePool,
    author: &Account,
    title: String,
    text: String,
) -> Result<Question> {
    let mut tx = pool.begin().await?;

    let question = Question::new(author.id, title, text);
    db::questions::insert_question(&mut *tx, &question).await?;

    let seeded = seed_upvotes(&mut tx, Votable::Question(question.id)).await?;

    tx.commit().await?;
    info!(question_id = %question.id, seeded, "Question created");

    Ok(question)
}

/// Create an answer on an existing question and seed its upvote ledger
pub async fn create_answer(
    pool: &SqlitePool,
    author: &Account,
    question_id: Uuid,
    text: String,
) -> Result<Answer> {
    let mut tx = pool.begin().await?;

    db::questions::load_question(&mut *tx, question_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Question {}", question_id)))?;

    let answer = Answer::new(author.id, question_id, text);
    db::answers::insert_answer(&mut *tx, &answer).await?;

    let seeded = seed_upvotes(&mut tx, Votable::Answer(answer.id)).await?;

    tx.commit().await?;
    info!(answer_id = %answer.id, %question_id, seeded, "Answer created");

    Ok(answer)
}

/// Seed one placeholder upvote row per current account for a freshly
/// created votable. Seeding happens exactly once, at creation; calling
/// this for an already-seeded votable is a programming error.
pub async fn seed_upvotes(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    votable: Votable,
) -> Result<u64> {
    let existing = db::upvotes::count_rows(&mut **tx, votable).await?;
    if existing > 0 {
        return Err(Error::InvariantViolation(format!(
            "Upvote ledger already seeded for {:?}",
            votable
        )));
    }

    let account_ids = db::accounts::list_account_ids(&mut **tx).await?;
    db::upvotes::seed_for_accounts(&mut **tx, votable, &account_ids).await
}

/// Create a pair session: bind a fresh feedback form and notify the mentor
pub async fn create_pair_session(
    pool: &SqlitePool,
    student_account: &Account,
    mentor_id: Uuid,
    price: f64,
    url: String,
) -> Result<PairSession> {
    let mut tx = pool.begin().await?;

    let student = db::students::load_student_by_account(&mut *tx, student_account.id)
        .await?
        .ok_or_else(|| Error::BadRequest("Caller has no student profile".to_string()))?;

    let mentor = db::mentors::load_mentor(&mut *tx, mentor_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Mentor {}", mentor_id)))?;

    // Dependent form first, so the bound id is durable before the parent row
    let form = FeedbackForm::new();
    db::feedback_forms::insert_form(&mut *tx, &form).await?;

    let mut session = PairSession::new(mentor.id, student.id, price, url);
    session.bind_feedback_form(form.id)?;
    db::pair_sessions::insert_pair_session(&mut *tx, &session).await?;

    let notification = Notification::new(
        mentor.account_id,
        form.id,
        "New pair session request".to_string(),
    );
    db::notifications::insert_notification(&mut *tx, &notification).await?;

    tx.commit().await?;
    info!(session_id = %session.id, feedback_form_id = %form.id, "Pair session created");

    Ok(session)
}

/// Create an appointment against a professional mentor. The meeting URL
/// comes from the external link generator; form binding and mentor
/// notification follow the pair-session fan-out.
pub async fn create_appointment(
    pool: &SqlitePool,
    student_account: &Account,
    mentor_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    price: f64,
) -> Result<Appointment> {
    if ends_at <= starts_at {
        return Err(Error::BadRequest(
            "Appointment end must be after its start".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let student = db::students::load_student_by_account(&mut *tx, student_account.id)
        .await?
        .ok_or_else(|| Error::BadRequest("Caller has no student profile".to_string()))?;

    let mentor = db::mentors::load_mentor(&mut *tx, mentor_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Mentor {}", mentor_id)))?;

    if !mentor.is_professional {
        return Err(Error::InvalidMentor(format!(
            "Mentor {} is not flagged professional",
            mentor_id
        )));
    }

    let form = FeedbackForm::new();
    db::feedback_forms::insert_form(&mut *tx, &form).await?;

    let url = meeting::generate_meeting_url();
    let mut appointment = Appointment::new(mentor.id, student.id, url, starts_at, ends_at, price);
    appointment.bind_feedback_form(form.id)?;
    db::appointments::insert_appointment(&mut *tx, &appointment).await?;

    let notification = Notification::new(
        mentor.account_id,
        form.id,
        "New appointment request".to_string(),
    );
    db::notifications::insert_notification(&mut *tx, &notification).await?;

    tx.commit().await?;
    info!(appointment_id = %appointment.id, feedback_form_id = %form.id, "Appointment created");

    Ok(appointment)
}

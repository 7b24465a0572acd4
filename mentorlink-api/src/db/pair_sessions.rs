//! Pair session database operations

use mentorlink_common::db::models::PairSession;
use mentorlink_common::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn session_from_row(row: &SqliteRow) -> Result<PairSession> {
    let id: String = row.get("id");
    let mentor_id: String = row.get("mentor_id");
    let student_id: String = row.get("student_id");
    let feedback_form_id: String = row.get("feedback_form_id");
    let created_at: String = row.get("created_at");

    Ok(PairSession {
        id: parse_uuid(&id)?,
        price: row.get("price"),
        url: row.get("url"),
        mentor_id: parse_uuid(&mentor_id)?,
        student_id: parse_uuid(&student_id)?,
        feedback_form_id: Some(parse_uuid(&feedback_form_id)?),
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Persist a pair session. The feedback form must already be bound;
/// sessions never reach the database without one.
pub async fn insert_pair_session(db: impl SqliteExecutor<'_>, session: &PairSession) -> Result<()> {
    let feedback_form_id = session.feedback_form_id.ok_or_else(|| {
        Error::Internal(format!(
            "Pair session {} has no bound feedback form",
            session.id
        ))
    })?;

    sqlx::query(
        r#"
        INSERT INTO pair_sessions (id, price, url, mentor_id, student_id, feedback_form_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(session.id.to_string())
    .bind(session.price)
    .bind(&session.url)
    .bind(session.mentor_id.to_string())
    .bind(session.student_id.to_string())
    .bind(feedback_form_id.to_string())
    .bind(session.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_pair_session(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<Option<PairSession>> {
    let row = sqlx::query(
        r#"
        SELECT id, price, url, mentor_id, student_id, feedback_form_id, created_at
        FROM pair_sessions
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(session_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Session bound to a given feedback form, if any
pub async fn load_by_feedback_form(
    db: impl SqliteExecutor<'_>,
    feedback_form_id: Uuid,
) -> Result<Option<PairSession>> {
    let row = sqlx::query(
        r#"
        SELECT id, price, url, mentor_id, student_id, feedback_form_id, created_at
        FROM pair_sessions
        WHERE feedback_form_id = ?
        "#,
    )
    .bind(feedback_form_id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(session_from_row(&row)?)),
        None => Ok(None),
    }
}

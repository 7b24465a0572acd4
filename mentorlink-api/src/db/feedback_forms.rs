//! Feedback form database operations

use mentorlink_common::db::models::FeedbackForm;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn form_from_row(row: &SqliteRow) -> Result<FeedbackForm> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");

    Ok(FeedbackForm {
        id: parse_uuid(&id)?,
        student_satisfied_rating: row.get("student_satisfied_rating"),
        mentor_satisfied_rating: row.get("mentor_satisfied_rating"),
        has_student_reported: row.get::<i64, _>("has_student_reported") != 0,
        has_mentor_reported: row.get::<i64, _>("has_mentor_reported") != 0,
        student_comment: row.get("student_comment"),
        mentor_comment: row.get("mentor_comment"),
        created_at: parse_timestamp(&created_at)?,
    })
}

pub async fn insert_form(db: impl SqliteExecutor<'_>, form: &FeedbackForm) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO feedback_forms (
            id, student_satisfied_rating, mentor_satisfied_rating,
            has_student_reported, has_mentor_reported,
            student_comment, mentor_comment, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(form.id.to_string())
    .bind(form.student_satisfied_rating)
    .bind(form.mentor_satisfied_rating)
    .bind(form.has_student_reported as i64)
    .bind(form.has_mentor_reported as i64)
    .bind(&form.student_comment)
    .bind(&form.mentor_comment)
    .bind(form.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_form(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<FeedbackForm>> {
    let row = sqlx::query(
        r#"
        SELECT id, student_satisfied_rating, mentor_satisfied_rating,
               has_student_reported, has_mentor_reported,
               student_comment, mentor_comment, created_at
        FROM feedback_forms
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(form_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Persist the mutable fields of a form
pub async fn update_form(db: impl SqliteExecutor<'_>, form: &FeedbackForm) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE feedback_forms
        SET student_satisfied_rating = ?,
            mentor_satisfied_rating = ?,
            has_student_reported = ?,
            has_mentor_reported = ?,
            student_comment = ?,
            mentor_comment = ?
        WHERE id = ?
        "#,
    )
    .bind(form.student_satisfied_rating)
    .bind(form.mentor_satisfied_rating)
    .bind(form.has_student_reported as i64)
    .bind(form.has_mentor_reported as i64)
    .bind(&form.student_comment)
    .bind(&form.mentor_comment)
    .bind(form.id.to_string())
    .execute(db)
    .await?;

    Ok(())
}

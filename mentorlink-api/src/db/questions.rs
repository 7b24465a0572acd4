//! Question database operations

use mentorlink_common::db::models::Question;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn question_from_row(row: &SqliteRow) -> Result<Question> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");
    let created_at: String = row.get("created_at");

    Ok(Question {
        id: parse_uuid(&id)?,
        title: row.get("title"),
        text: row.get("text"),
        account_id: parse_uuid(&account_id)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub async fn insert_question(db: impl SqliteExecutor<'_>, question: &Question) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO questions (id, title, text, account_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(question.id.to_string())
    .bind(&question.title)
    .bind(&question.text)
    .bind(question.account_id.to_string())
    .bind(question.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_question(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Question>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, text, account_id, created_at
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(question_from_row(&row)?)),
        None => Ok(None),
    }
}

/// All questions, newest first. Mentor read scope.
pub async fn list_questions(db: impl SqliteExecutor<'_>) -> Result<Vec<Question>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, text, account_id, created_at
        FROM questions
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    rows.iter().map(question_from_row).collect()
}

/// A single author's questions, newest first. Student read scope.
pub async fn list_questions_by_author(
    db: impl SqliteExecutor<'_>,
    account_id: Uuid,
) -> Result<Vec<Question>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, text, account_id, created_at
        FROM questions
        WHERE account_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(account_id.to_string())
    .fetch_all(db)
    .await?;

    rows.iter().map(question_from_row).collect()
}

//! Answer database operations

use mentorlink_common::db::models::Answer;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn answer_from_row(row: &SqliteRow) -> Result<Answer> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");
    let question_id: String = row.get("question_id");
    let created_at: String = row.get("created_at");

    Ok(Answer {
        id: parse_uuid(&id)?,
        text: row.get("text"),
        account_id: parse_uuid(&account_id)?,
        question_id: parse_uuid(&question_id)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub async fn insert_answer(db: impl SqliteExecutor<'_>, answer: &Answer) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO answers (id, text, account_id, question_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(answer.id.to_string())
    .bind(&answer.text)
    .bind(answer.account_id.to_string())
    .bind(answer.question_id.to_string())
    .bind(answer.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_answer(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Answer>> {
    let row = sqlx::query(
        r#"
        SELECT id, text, account_id, question_id, created_at
        FROM answers
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(answer_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn list_answers_for_question(
    db: impl SqliteExecutor<'_>,
    question_id: Uuid,
) -> Result<Vec<Answer>> {
    let rows = sqlx::query(
        r#"
        SELECT id, text, account_id, question_id, created_at
        FROM answers
        WHERE question_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(question_id.to_string())
    .fetch_all(db)
    .await?;

    rows.iter().map(answer_from_row).collect()
}

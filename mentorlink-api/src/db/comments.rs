//! Comment database operations

use mentorlink_common::db::models::Comment;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn comment_from_row(row: &SqliteRow) -> Result<Comment> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");
    let answer_id: String = row.get("answer_id");
    let created_at: String = row.get("created_at");

    Ok(Comment {
        id: parse_uuid(&id)?,
        text: row.get("text"),
        account_id: parse_uuid(&account_id)?,
        answer_id: parse_uuid(&answer_id)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub async fn insert_comment(db: impl SqliteExecutor<'_>, comment: &Comment) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO comments (id, text, account_id, answer_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(comment.id.to_string())
    .bind(&comment.text)
    .bind(comment.account_id.to_string())
    .bind(comment.answer_id.to_string())
    .bind(comment.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn list_comments_for_answer(
    db: impl SqliteExecutor<'_>,
    answer_id: Uuid,
) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT id, text, account_id, answer_id, created_at
        FROM comments
        WHERE answer_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(answer_id.to_string())
    .fetch_all(db)
    .await?;

    rows.iter().map(comment_from_row).collect()
}

//! Upvote ledger database operations
//!
//! One row per (account, votable) pair. Duplicate rows are impossible:
//! inserts go through `INSERT OR IGNORE` against the unique indexes
//! rather than a check-then-insert.

use mentorlink_common::db::models::{Upvote, Votable};
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn votable_column(votable: Votable) -> (&'static str, Uuid) {
    match votable {
        Votable::Question(id) => ("question_id", id),
        Votable::Answer(id) => ("answer_id", id),
    }
}

fn upvote_from_row(row: &SqliteRow) -> Result<Upvote> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");
    let question_id: Option<String> = row.get("question_id");
    let answer_id: Option<String> = row.get("answer_id");
    let created_at: String = row.get("created_at");

    Ok(Upvote {
        id: parse_uuid(&id)?,
        account_id: parse_uuid(&account_id)?,
        question_id: question_id.as_deref().map(parse_uuid).transpose()?,
        answer_id: answer_id.as_deref().map(parse_uuid).transpose()?,
        has_upvoted: row.get::<i64, _>("has_upvoted") != 0,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Insert a placeholder row unless one already exists for the
/// (account, votable) pair. Returns true if a row was inserted.
pub async fn insert_placeholder(db: impl SqliteExecutor<'_>, upvote: &Upvote) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO upvotes (id, account_id, question_id, answer_id, has_upvoted, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(upvote.id.to_string())
    .bind(upvote.account_id.to_string())
    .bind(upvote.question_id.map(|id| id.to_string()))
    .bind(upvote.answer_id.map(|id| id.to_string()))
    .bind(upvote.has_upvoted as i64)
    .bind(upvote.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Batch-seed placeholder rows for every given account against one
/// votable, in a single statement.
pub async fn seed_for_accounts(
    db: impl SqliteExecutor<'_>,
    votable: Votable,
    account_ids: &[Uuid],
) -> Result<u64> {
    if account_ids.is_empty() {
        return Ok(0);
    }

    let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
        "INSERT OR IGNORE INTO upvotes (id, account_id, question_id, answer_id, has_upvoted, created_at) ",
    );
    builder.push_values(account_ids, |mut row, account_id| {
        let upvote = Upvote::new(*account_id, votable);
        row.push_bind(upvote.id.to_string())
            .push_bind(upvote.account_id.to_string())
            .push_bind(upvote.question_id.map(|id| id.to_string()))
            .push_bind(upvote.answer_id.map(|id| id.to_string()))
            .push_bind(upvote.has_upvoted as i64)
            .push_bind(upvote.created_at.to_rfc3339());
    });

    let result = builder.build().execute(db).await?;

    Ok(result.rows_affected())
}

pub async fn load_for(
    db: impl SqliteExecutor<'_>,
    account_id: Uuid,
    votable: Votable,
) -> Result<Option<Upvote>> {
    let (column, votable_id) = votable_column(votable);

    let row = sqlx::query(&format!(
        "SELECT id, account_id, question_id, answer_id, has_upvoted, created_at
         FROM upvotes
         WHERE account_id = ? AND {} = ?",
        column
    ))
    .bind(account_id.to_string())
    .bind(votable_id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(upvote_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn set_state(db: impl SqliteExecutor<'_>, upvote_id: Uuid, state: bool) -> Result<()> {
    sqlx::query("UPDATE upvotes SET has_upvoted = ? WHERE id = ?")
        .bind(state as i64)
        .bind(upvote_id.to_string())
        .execute(db)
        .await?;

    Ok(())
}

/// Total ledger rows for a votable (one per account after seeding)
pub async fn count_rows(db: impl SqliteExecutor<'_>, votable: Votable) -> Result<i64> {
    let (column, votable_id) = votable_column(votable);

    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM upvotes WHERE {} = ?",
        column
    ))
    .bind(votable_id.to_string())
    .fetch_one(db)
    .await?;

    Ok(count)
}

/// Rows with vote-state true: the votable's upvote count
pub async fn count_upvoted(db: impl SqliteExecutor<'_>, votable: Votable) -> Result<i64> {
    let (column, votable_id) = votable_column(votable);

    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM upvotes WHERE {} = ? AND has_upvoted = 1",
        column
    ))
    .bind(votable_id.to_string())
    .fetch_one(db)
    .await?;

    Ok(count)
}

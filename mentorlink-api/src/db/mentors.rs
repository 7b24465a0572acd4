//! Mentor profile database operations

use mentorlink_common::db::models::Mentor;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::parse_uuid;

fn mentor_from_row(row: &SqliteRow) -> Result<Mentor> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");
    let degree_id: String = row.get("degree_id");
    let university_id: String = row.get("university_id");

    Ok(Mentor {
        id: parse_uuid(&id)?,
        account_id: parse_uuid(&account_id)?,
        is_professional: row.get::<i64, _>("is_professional") != 0,
        points: row.get("points"),
        degree_id: parse_uuid(&degree_id)?,
        university_id: parse_uuid(&university_id)?,
    })
}

pub async fn insert_mentor(db: impl SqliteExecutor<'_>, mentor: &Mentor) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO mentors (id, account_id, is_professional, points, degree_id, university_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(mentor.id.to_string())
    .bind(mentor.account_id.to_string())
    .bind(mentor.is_professional as i64)
    .bind(mentor.points)
    .bind(mentor.degree_id.to_string())
    .bind(mentor.university_id.to_string())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_mentor(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Mentor>> {
    let row = sqlx::query(
        r#"
        SELECT id, account_id, is_professional, points, degree_id, university_id
        FROM mentors
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(mentor_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn load_mentor_by_account(
    db: impl SqliteExecutor<'_>,
    account_id: Uuid,
) -> Result<Option<Mentor>> {
    let row = sqlx::query(
        r#"
        SELECT id, account_id, is_professional, points, degree_id, university_id
        FROM mentors
        WHERE account_id = ?
        "#,
    )
    .bind(account_id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(mentor_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Add points to a mentor's total. Accrual only; the ledger never calls
/// this with a negative delta.
pub async fn add_points(db: impl SqliteExecutor<'_>, mentor_id: Uuid, delta: i64) -> Result<()> {
    sqlx::query("UPDATE mentors SET points = points + ? WHERE id = ?")
        .bind(delta)
        .bind(mentor_id.to_string())
        .execute(db)
        .await?;

    Ok(())
}

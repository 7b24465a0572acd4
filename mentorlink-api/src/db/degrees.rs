//! Degree database operations

use mentorlink_common::db::models::Degree;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::parse_uuid;

fn degree_from_row(row: &SqliteRow) -> Result<Degree> {
    let id: String = row.get("id");
    Ok(Degree {
        id: parse_uuid(&id)?,
        name: row.get("name"),
    })
}

pub async fn insert_degree(db: impl SqliteExecutor<'_>, degree: &Degree) -> Result<()> {
    sqlx::query("INSERT INTO degrees (id, name) VALUES (?, ?)")
        .bind(degree.id.to_string())
        .bind(&degree.name)
        .execute(db)
        .await?;

    Ok(())
}

pub async fn load_degree(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Degree>> {
    let row = sqlx::query("SELECT id, name FROM degrees WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(db)
        .await?;

    match row {
        Some(row) => Ok(Some(degree_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn list_degrees(db: impl SqliteExecutor<'_>) -> Result<Vec<Degree>> {
    let rows = sqlx::query("SELECT id, name FROM degrees ORDER BY name")
        .fetch_all(db)
        .await?;

    rows.iter().map(degree_from_row).collect()
}

//! Keyword database operations
//!
//! Keywords are the static token → degree mapping behind the recommender.
//! Seeded once, read-only afterward.

use mentorlink_common::db::models::Keyword;
use mentorlink_common::Result;
use sqlx::{Row, SqliteExecutor};

use super::parse_uuid;

pub async fn insert_keyword(db: impl SqliteExecutor<'_>, keyword: &Keyword) -> Result<()> {
    sqlx::query("INSERT INTO keywords (id, name, degree_id) VALUES (?, ?, ?)")
        .bind(keyword.id.to_string())
        .bind(&keyword.name)
        .bind(keyword.degree_id.to_string())
        .execute(db)
        .await?;

    Ok(())
}

pub async fn list_keywords(db: impl SqliteExecutor<'_>) -> Result<Vec<Keyword>> {
    let rows = sqlx::query("SELECT id, name, degree_id FROM keywords")
        .fetch_all(db)
        .await?;

    rows.iter()
        .map(|row| {
            let id: String = row.get("id");
            let degree_id: String = row.get("degree_id");
            Ok(Keyword {
                id: parse_uuid(&id)?,
                name: row.get("name"),
                degree_id: parse_uuid(&degree_id)?,
            })
        })
        .collect()
}

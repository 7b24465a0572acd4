//! University database operations

use mentorlink_common::db::models::{Degree, University};
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::parse_uuid;

fn university_from_row(row: &SqliteRow) -> Result<University> {
    let id: String = row.get("id");
    Ok(University {
        id: parse_uuid(&id)?,
        name: row.get("name"),
        location: row.get("location"),
    })
}

pub async fn insert_university(db: impl SqliteExecutor<'_>, university: &University) -> Result<()> {
    sqlx::query("INSERT INTO universities (id, name, location) VALUES (?, ?, ?)")
        .bind(university.id.to_string())
        .bind(&university.name)
        .bind(&university.location)
        .execute(db)
        .await?;

    Ok(())
}

pub async fn load_university(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<University>> {
    let row = sqlx::query("SELECT id, name, location FROM universities WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(db)
        .await?;

    match row {
        Some(row) => Ok(Some(university_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn list_universities(db: impl SqliteExecutor<'_>) -> Result<Vec<University>> {
    let rows = sqlx::query("SELECT id, name, location FROM universities ORDER BY name")
        .fetch_all(db)
        .await?;

    rows.iter().map(university_from_row).collect()
}

/// Link a degree to a university's offering
pub async fn link_degree(
    db: impl SqliteExecutor<'_>,
    university_id: Uuid,
    degree_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO university_degrees (university_id, degree_id)
        VALUES (?, ?)
        ON CONFLICT(university_id, degree_id) DO NOTHING
        "#,
    )
    .bind(university_id.to_string())
    .bind(degree_id.to_string())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn list_degrees_for_university(
    db: impl SqliteExecutor<'_>,
    university_id: Uuid,
) -> Result<Vec<Degree>> {
    let rows = sqlx::query(
        r#"
        SELECT d.id, d.name
        FROM degrees d
        JOIN university_degrees ud ON ud.degree_id = d.id
        WHERE ud.university_id = ?
        ORDER BY d.name
        "#,
    )
    .bind(university_id.to_string())
    .fetch_all(db)
    .await?;

    rows.iter()
        .map(|row| {
            let id: String = row.get("id");
            Ok(Degree {
                id: parse_uuid(&id)?,
                name: row.get("name"),
            })
        })
        .collect()
}

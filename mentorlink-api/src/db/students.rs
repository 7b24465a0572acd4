//! Student profile database operations

use mentorlink_common::db::models::Student;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::parse_uuid;

fn student_from_row(row: &SqliteRow) -> Result<Student> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");

    let slot = |value: Option<String>| -> Result<Option<Uuid>> {
        value.as_deref().map(parse_uuid).transpose()
    };

    Ok(Student {
        id: parse_uuid(&id)?,
        account_id: parse_uuid(&account_id)?,
        degree1_id: slot(row.get("degree1_id"))?,
        degree2_id: slot(row.get("degree2_id"))?,
        degree3_id: slot(row.get("degree3_id"))?,
    })
}

pub async fn insert_student(db: impl SqliteExecutor<'_>, student: &Student) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO students (id, account_id, degree1_id, degree2_id, degree3_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(student.id.to_string())
    .bind(student.account_id.to_string())
    .bind(student.degree1_id.map(|id| id.to_string()))
    .bind(student.degree2_id.map(|id| id.to_string()))
    .bind(student.degree3_id.map(|id| id.to_string()))
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_student(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Student>> {
    let row = sqlx::query(
        r#"
        SELECT id, account_id, degree1_id, degree2_id, degree3_id
        FROM students
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(student_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn load_student_by_account(
    db: impl SqliteExecutor<'_>,
    account_id: Uuid,
) -> Result<Option<Student>> {
    let row = sqlx::query(
        r#"
        SELECT id, account_id, degree1_id, degree2_id, degree3_id
        FROM students
        WHERE account_id = ?
        "#,
    )
    .bind(account_id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(student_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Write the three recommended degree slots, in score order
pub async fn set_recommended_degrees(
    db: impl SqliteExecutor<'_>,
    student_id: Uuid,
    degrees: [Uuid; 3],
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE students
        SET degree1_id = ?, degree2_id = ?, degree3_id = ?
        WHERE id = ?
        "#,
    )
    .bind(degrees[0].to_string())
    .bind(degrees[1].to_string())
    .bind(degrees[2].to_string())
    .bind(student_id.to_string())
    .execute(db)
    .await?;

    Ok(())
}

//! Appointment database operations

use mentorlink_common::db::models::{Appointment, AppointmentStatus};
use mentorlink_common::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn appointment_from_row(row: &SqliteRow) -> Result<Appointment> {
    let id: String = row.get("id");
    let status: String = row.get("status");
    let mentor_id: String = row.get("mentor_id");
    let student_id: String = row.get("student_id");
    let starts_at: String = row.get("starts_at");
    let ends_at: String = row.get("ends_at");
    let feedback_form_id: String = row.get("feedback_form_id");
    let created_at: String = row.get("created_at");

    Ok(Appointment {
        id: parse_uuid(&id)?,
        url: row.get("url"),
        status: AppointmentStatus::parse(&status)?,
        mentor_id: parse_uuid(&mentor_id)?,
        student_id: parse_uuid(&student_id)?,
        starts_at: parse_timestamp(&starts_at)?,
        ends_at: parse_timestamp(&ends_at)?,
        price: row.get("price"),
        feedback_form_id: Some(parse_uuid(&feedback_form_id)?),
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Persist an appointment. The feedback form must already be bound.
pub async fn insert_appointment(
    db: impl SqliteExecutor<'_>,
    appointment: &Appointment,
) -> Result<()> {
    let feedback_form_id = appointment.feedback_form_id.ok_or_else(|| {
        Error::Internal(format!(
            "Appointment {} has no bound feedback form",
            appointment.id
        ))
    })?;

    sqlx::query(
        r#"
        INSERT INTO appointments (
            id, url, status, mentor_id, student_id,
            starts_at, ends_at, price, feedback_form_id, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(appointment.id.to_string())
    .bind(&appointment.url)
    .bind(appointment.status.as_str())
    .bind(appointment.mentor_id.to_string())
    .bind(appointment.student_id.to_string())
    .bind(appointment.starts_at.to_rfc3339())
    .bind(appointment.ends_at.to_rfc3339())
    .bind(appointment.price)
    .bind(feedback_form_id.to_string())
    .bind(appointment.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

pub async fn load_appointment(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<Option<Appointment>> {
    let row = sqlx::query(
        r#"
        SELECT id, url, status, mentor_id, student_id,
               starts_at, ends_at, price, feedback_form_id, created_at
        FROM appointments
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(appointment_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Appointment bound to a given feedback form, if any
pub async fn load_by_feedback_form(
    db: impl SqliteExecutor<'_>,
    feedback_form_id: Uuid,
) -> Result<Option<Appointment>> {
    let row = sqlx::query(
        r#"
        SELECT id, url, status, mentor_id, student_id,
               starts_at, ends_at, price, feedback_form_id, created_at
        FROM appointments
        WHERE feedback_form_id = ?
        "#,
    )
    .bind(feedback_form_id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(appointment_from_row(&row)?)),
        None => Ok(None),
    }
}

//! Notification database operations

use mentorlink_common::db::models::Notification;
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn notification_from_row(row: &SqliteRow) -> Result<Notification> {
    let id: String = row.get("id");
    let account_id: String = row.get("account_id");
    let feedback_form_id: String = row.get("feedback_form_id");
    let created_at: String = row.get("created_at");

    Ok(Notification {
        id: parse_uuid(&id)?,
        account_id: parse_uuid(&account_id)?,
        feedback_form_id: parse_uuid(&feedback_form_id)?,
        title: row.get("title"),
        seen: row.get::<i64, _>("seen") != 0,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub async fn insert_notification(
    db: impl SqliteExecutor<'_>,
    notification: &Notification,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, account_id, feedback_form_id, title, seen, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(notification.id.to_string())
    .bind(notification.account_id.to_string())
    .bind(notification.feedback_form_id.to_string())
    .bind(&notification.title)
    .bind(notification.seen as i64)
    .bind(notification.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

/// An account's notifications, by recency then unseen-first
pub async fn list_for_account(
    db: impl SqliteExecutor<'_>,
    account_id: Uuid,
) -> Result<Vec<Notification>> {
    let rows = sqlx::query(
        r#"
        SELECT id, account_id, feedback_form_id, title, seen, created_at
        FROM notifications
        WHERE account_id = ?
        ORDER BY created_at DESC, seen ASC
        "#,
    )
    .bind(account_id.to_string())
    .fetch_all(db)
    .await?;

    rows.iter().map(notification_from_row).collect()
}

/// Mark a notification seen, scoped to its owning account.
/// Returns the number of rows updated (0 when the id does not resolve).
pub async fn mark_seen(
    db: impl SqliteExecutor<'_>,
    account_id: Uuid,
    notification_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query("UPDATE notifications SET seen = 1 WHERE id = ? AND account_id = ?")
        .bind(notification_id.to_string())
        .bind(account_id.to_string())
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

//! Account database operations

use mentorlink_common::db::models::{Account, Role};
use mentorlink_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    let id: String = row.get("id");
    let role: String = row.get("role");
    let created_at: String = row.get("created_at");

    Ok(Account {
        id: parse_uuid(&id)?,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        name: row.get("name"),
        role: Role::parse(&role)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Save account to database
pub async fn insert_account(db: impl SqliteExecutor<'_>, account: &Account) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO accounts (id, email, password_hash, name, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(account.id.to_string())
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(&account.name)
    .bind(account.role.as_str())
    .bind(account.created_at.to_rfc3339())
    .execute(db)
    .await?;

    Ok(())
}

/// Load account by id
pub async fn load_account(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Account>> {
    let row = sqlx::query(
        r#"
        SELECT id, email, password_hash, name, role, created_at
        FROM accounts
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(account_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Check whether an email is already registered (emails are stored lowercased)
pub async fn email_exists(db: impl SqliteExecutor<'_>, email: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?)")
        .bind(email.to_lowercase())
        .fetch_one(db)
        .await?;

    Ok(exists)
}

/// All currently-registered account ids. Used by the lifecycle manager to
/// seed upvote ledger rows when a votable is created.
pub async fn list_account_ids(db: impl SqliteExecutor<'_>) -> Result<Vec<Uuid>> {
    let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM accounts ORDER BY created_at")
        .fetch_all(db)
        .await?;

    ids.iter().map(|id| parse_uuid(id)).collect()
}

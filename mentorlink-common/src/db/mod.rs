//! Database initialization and schema
//!
//! All tables are created idempotently at startup. The schema carries the
//! uniqueness and cascade rules the service layer relies on:
//! - one upvote row per (account, votable), enforced by unique indexes
//! - one feedback form per pair session / appointment, enforced by a
//!   UNIQUE NOT NULL foreign key
//! - cascade deletes following entity ownership

pub mod models;

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_connection(&pool).await?;
    create_schema(&pool).await?;

    Ok(pool)
}

/// Apply connection-level PRAGMAs
pub async fn configure_connection(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    Ok(())
}

/// Create all tables (idempotent - safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_degrees_table(pool).await?;
    create_keywords_table(pool).await?;
    create_universities_table(pool).await?;
    create_accounts_table(pool).await?;
    create_mentors_table(pool).await?;
    create_students_table(pool).await?;
    create_questions_table(pool).await?;
    create_answers_table(pool).await?;
    create_comments_table(pool).await?;
    create_upvotes_table(pool).await?;
    create_feedback_forms_table(pool).await?;
    create_pair_sessions_table(pool).await?;
    create_appointments_table(pool).await?;
    create_notifications_table(pool).await?;

    info!("Database schema initialized");

    Ok(())
}

pub async fn create_degrees_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS degrees (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_keywords_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS keywords (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            degree_id TEXT NOT NULL REFERENCES degrees(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_keywords_degree ON keywords(degree_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_universities_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS universities (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS university_degrees (
            university_id TEXT NOT NULL REFERENCES universities(id) ON DELETE CASCADE,
            degree_id TEXT NOT NULL REFERENCES degrees(id) ON DELETE CASCADE,
            PRIMARY KEY (university_id, degree_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_accounts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'unassigned'
                CHECK (role IN ('mentor', 'student', 'unassigned')),
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_mentors_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mentors (
            id TEXT PRIMARY KEY,
            account_id TEXT NOT NULL UNIQUE REFERENCES accounts(id) ON DELETE CASCADE,
            is_professional INTEGER NOT NULL DEFAULT 0,
            points INTEGER NOT NULL DEFAULT 0 CHECK (points >= 0),
            degree_id TEXT NOT NULL REFERENCES degrees(id) ON DELETE CASCADE,
            university_id TEXT NOT NULL REFERENCES universities(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_students_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id TEXT PRIMARY KEY,
            account_id TEXT NOT NULL UNIQUE REFERENCES accounts(id) ON DELETE CASCADE,
            degree1_id TEXT REFERENCES degrees(id) ON DELETE SET NULL,
            degree2_id TEXT REFERENCES degrees(id) ON DELETE SET NULL,
            degree3_id TEXT REFERENCES degrees(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_questions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL DEFAULT '',
            account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_account ON questions(account_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_created ON questions(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_answers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS answers (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            question_id TEXT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_comments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            answer_id TEXT NOT NULL REFERENCES answers(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_answer ON comments(answer_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Upvote ledger. Exactly one of question_id/answer_id is set per row;
/// the unique indexes make duplicate (account, votable) rows impossible
/// even under concurrent seeding.
pub async fn create_upvotes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS upvotes (
            id TEXT PRIMARY KEY,
            account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            question_id TEXT REFERENCES questions(id) ON DELETE CASCADE,
            answer_id TEXT REFERENCES answers(id) ON DELETE CASCADE,
            has_upvoted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            CHECK ((question_id IS NULL) != (answer_id IS NULL)),
            UNIQUE (account_id, question_id),
            UNIQUE (account_id, answer_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_upvotes_question ON upvotes(question_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_upvotes_answer ON upvotes(answer_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_feedback_forms_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback_forms (
            id TEXT PRIMARY KEY,
            student_satisfied_rating INTEGER
                CHECK (student_satisfied_rating IS NULL
                       OR (student_satisfied_rating >= 1 AND student_satisfied_rating <= 5)),
            mentor_satisfied_rating INTEGER
                CHECK (mentor_satisfied_rating IS NULL
                       OR (mentor_satisfied_rating >= 1 AND mentor_satisfied_rating <= 5)),
            has_student_reported INTEGER NOT NULL DEFAULT 0,
            has_mentor_reported INTEGER NOT NULL DEFAULT 0,
            student_comment TEXT NOT NULL DEFAULT '',
            mentor_comment TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// The feedback form owns the cascade: deleting a form deletes the
/// session bound to it (and, transitively, the form's notifications).
pub async fn create_pair_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pair_sessions (
            id TEXT PRIMARY KEY,
            price REAL NOT NULL DEFAULT 0,
            url TEXT NOT NULL,
            mentor_id TEXT NOT NULL REFERENCES mentors(id) ON DELETE CASCADE,
            student_id TEXT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            feedback_form_id TEXT NOT NULL UNIQUE
                REFERENCES feedback_forms(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pair_sessions_mentor ON pair_sessions(mentor_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pair_sessions_student ON pair_sessions(student_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_appointments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'requested'
                CHECK (status IN ('requested', 'confirmed', 'completed', 'cancelled')),
            mentor_id TEXT NOT NULL REFERENCES mentors(id) ON DELETE CASCADE,
            student_id TEXT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            starts_at TEXT NOT NULL,
            ends_at TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            feedback_form_id TEXT NOT NULL UNIQUE
                REFERENCES feedback_forms(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            CHECK (ends_at > starts_at)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_appointments_mentor ON appointments(mentor_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_appointments_student ON appointments(student_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_notifications_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id TEXT PRIMARY KEY,
            account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            feedback_form_id TEXT NOT NULL REFERENCES feedback_forms(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            seen INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_notifications_account ON notifications(account_id)")
        .execute(pool)
        .await?;

    Ok(())
}

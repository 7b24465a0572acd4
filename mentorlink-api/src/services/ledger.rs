//! Upvote ledger operations
//!
//! The ledger holds one row per (account, votable). Rows are seeded at
//! votable creation, so a vote update targets an existing row or fails.
//! Flipping a vote from false to true on a mentor-authored votable
//! accrues points; accrual is monotonic, retraction never decrements.

use mentorlink_common::db::models::{Account, Role, Upvote, Votable};
use mentorlink_common::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::db;

/// Points a mentor accrues when one of their votables gains an upvote
pub const MENTOR_UPVOTE_POINTS: i64 = 5;

/// Return the ledger row for (account, votable), creating the
/// placeholder if it is somehow absent. Insert-if-absent, never a
/// check-then-insert.
pub async fn get_or_create(
    pool: &SqlitePool,
    account: &Account,
    votable: Votable,
) -> Result<Upvote> {
    let placeholder = Upvote::new(account.id, votable);
    db::upvotes::insert_placeholder(pool, &placeholder).await?;

    db::upvotes::load_for(pool, account.id, votable)
        .await?
        .ok_or_else(|| {
            Error::Internal(format!(
                "Upvote row missing after insert for account {}",
                account.id
            ))
        })
}

/// Set the vote state on an existing ledger row. Fails with `NotFound`
/// when no row exists; clients never create rows for arbitrary votables.
pub async fn set_vote(
    pool: &SqlitePool,
    account: &Account,
    votable: Votable,
    state: bool,
) -> Result<Upvote> {
    let mut tx = pool.begin().await?;

    let mut upvote = db::upvotes::load_for(&mut *tx, account.id, votable)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No upvote entry for {:?}", votable)))?;

    // Accrue only on the false→true edge
    if state && !upvote.has_upvoted {
        accrue_author_points(&mut tx, votable).await?;
    }

    db::upvotes::set_state(&mut *tx, upvote.id, state).await?;
    upvote.has_upvoted = state;

    tx.commit().await?;

    Ok(upvote)
}

/// Number of accounts that have upvoted a votable
pub async fn upvote_count(pool: &SqlitePool, votable: Votable) -> Result<i64> {
    db::upvotes::count_upvoted(pool, votable).await
}

async fn accrue_author_points(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    votable: Votable,
) -> Result<()> {
    let author_id = votable_author(&mut *tx, votable).await?;

    let author = db::accounts::load_account(&mut **tx, author_id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Votable author {} missing", author_id)))?;

    if author.role != Role::Mentor {
        return Ok(());
    }

    let mentor = db::mentors::load_mentor_by_account(&mut **tx, author_id)
        .await?
        .ok_or_else(|| {
            Error::Internal(format!("Mentor profile missing for account {}", author_id))
        })?;

    db::mentors::add_points(&mut **tx, mentor.id, MENTOR_UPVOTE_POINTS).await?;
    info!(mentor_id = %mentor.id, points = MENTOR_UPVOTE_POINTS, "Mentor points accrued");

    Ok(())
}

async fn votable_author(conn: &mut SqliteConnection, votable: Votable) -> Result<Uuid> {
    match votable {
        Votable::Question(id) => db::questions::load_question(&mut *conn, id)
            .await?
            .map(|q| q.account_id)
            .ok_or_else(|| Error::NotFound(format!("Question {}", id))),
        Votable::Answer(id) => db::answers::load_answer(&mut *conn, id)
            .await?
            .map(|a| a.account_id)
            .ok_or_else(|| Error::NotFound(format!("Answer {}", id))),
    }
}

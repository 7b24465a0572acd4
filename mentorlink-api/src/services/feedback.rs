//! Feedback form state machine
//!
//! Forms move OPEN → PARTIALLY_COMPLETE → COMPLETE as the two sides
//! submit their ratings. Updates are partial: absent fields keep their
//! prior values. A mentor-side submission notifies the session's student
//! to invite the reciprocal rating.

use mentorlink_common::db::models::{Account, FeedbackForm, Notification, Role};
use mentorlink_common::{Error, Result};
use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db;

/// Partial feedback submission. Absent fields are left untouched,
/// never cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackUpdate {
    pub student_satisfied_rating: Option<i64>,
    pub mentor_satisfied_rating: Option<i64>,
    pub has_student_reported: Option<bool>,
    pub has_mentor_reported: Option<bool>,
    pub student_comment: Option<String>,
    pub mentor_comment: Option<String>,
}

impl FeedbackUpdate {
    fn validate(&self) -> Result<()> {
        for rating in [self.student_satisfied_rating, self.mentor_satisfied_rating]
            .into_iter()
            .flatten()
        {
            if !(1..=5).contains(&rating) {
                return Err(Error::BadRequest(format!(
                    "Satisfaction rating must be between 1 and 5, got {}",
                    rating
                )));
            }
        }
        Ok(())
    }

    fn apply(&self, form: &mut FeedbackForm) {
        if let Some(rating) = self.student_satisfied_rating {
            form.student_satisfied_rating = Some(rating);
        }
        if let Some(rating) = self.mentor_satisfied_rating {
            form.mentor_satisfied_rating = Some(rating);
        }
        if let Some(reported) = self.has_student_reported {
            form.has_student_reported = reported;
        }
        if let Some(reported) = self.has_mentor_reported {
            form.has_mentor_reported = reported;
        }
        if let Some(comment) = &self.student_comment {
            form.student_comment = comment.clone();
        }
        if let Some(comment) = &self.mentor_comment {
            form.mentor_comment = comment.clone();
        }
    }
}

/// Apply a partial feedback submission to an existing form
pub async fn submit_feedback(
    pool: &SqlitePool,
    submitter: &Account,
    form_id: Uuid,
    update: FeedbackUpdate,
) -> Result<FeedbackForm> {
    update.validate()?;

    let mut tx = pool.begin().await?;

    let mut form = db::feedback_forms::load_form(&mut *tx, form_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Feedback form {}", form_id)))?;

    update.apply(&mut form);
    db::feedback_forms::update_form(&mut *tx, &form).await?;
    debug!(form_id = %form.id, state = ?form.state(), "Feedback form updated");

    // A mentor submission invites the student's reciprocal rating
    if submitter.role == Role::Mentor {
        notify_session_student(&mut tx, &form).await?;
    }

    tx.commit().await?;

    Ok(form)
}

async fn notify_session_student(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    form: &FeedbackForm,
) -> Result<()> {
    let Some(student_id) = bound_student_id(&mut *tx, form.id).await? else {
        // A form is always created bound; an orphan means external surgery
        warn!(form_id = %form.id, "Feedback form bound to no session or appointment");
        return Ok(());
    };

    let student = db::students::load_student(&mut **tx, student_id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Student {} missing", student_id)))?;

    let notification = Notification::new(
        student.account_id,
        form.id,
        "Your mentor left feedback, please add yours".to_string(),
    );
    db::notifications::insert_notification(&mut **tx, &notification).await?;

    Ok(())
}

async fn bound_student_id(conn: &mut SqliteConnection, form_id: Uuid) -> Result<Option<Uuid>> {
    if let Some(session) = db::pair_sessions::load_by_feedback_form(&mut *conn, form_id).await? {
        return Ok(Some(session.student_id));
    }
    if let Some(appointment) = db::appointments::load_by_feedback_form(&mut *conn, form_id).await? {
        return Ok(Some(appointment.student_id));
    }
    Ok(None)
}

//! Database models shared across MentorLink crates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Account role tag. Stored explicitly on the accounts row; never inferred
/// from the presence of a profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Student,
    Unassigned,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Student => "student",
            Role::Unassigned => "unassigned",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "mentor" => Ok(Role::Mentor),
            "student" => Ok(Role::Student),
            "unassigned" => Ok(Role::Unassigned),
            other => Err(Error::Internal(format!("Unknown account role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create new account. Email is case-normalized at creation.
    pub fn new(email: &str, password_hash: String, name: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            password_hash,
            name,
            role,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Degree {
    pub id: Uuid,
    pub name: String,
}

impl Degree {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// Keyword owned by a degree. Immutable once seeded; queried by the
/// degree recommender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub id: Uuid,
    pub name: String,
    pub degree_id: Uuid,
}

impl Keyword {
    pub fn new(name: String, degree_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            degree_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

impl University {
    pub fn new(name: String, location: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    pub id: Uuid,
    pub account_id: Uuid,
    pub is_professional: bool,
    /// Accrued point total. Monotonically non-decreasing; mutated only by
    /// the upvote ledger.
    pub points: i64,
    pub degree_id: Uuid,
    pub university_id: Uuid,
}

impl Mentor {
    pub fn new(account_id: Uuid, is_professional: bool, degree_id: Uuid, university_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            is_professional,
            points: 0,
            degree_id,
            university_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Recommended degree slots, written only by the recommender
    pub degree1_id: Option<Uuid>,
    pub degree2_id: Option<Uuid>,
    pub degree3_id: Option<Uuid>,
}

impl Student {
    pub fn new(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            degree1_id: None,
            degree2_id: None,
            degree3_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(account_id: Uuid, title: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            account_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Uuid,
    pub text: String,
    pub account_id: Uuid,
    pub question_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(account_id: Uuid, question_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            account_id,
            question_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub account_id: Uuid,
    pub answer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(account_id: Uuid, answer_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            account_id,
            answer_id,
            created_at: Utc::now(),
        }
    }
}

/// Target of an upvote ledger row: a question or an answer, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Votable {
    Question(Uuid),
    Answer(Uuid),
}

impl Votable {
    pub fn question_id(&self) -> Option<Uuid> {
        match self {
            Votable::Question(id) => Some(*id),
            Votable::Answer(_) => None,
        }
    }

    pub fn answer_id(&self) -> Option<Uuid> {
        match self {
            Votable::Question(_) => None,
            Votable::Answer(id) => Some(*id),
        }
    }
}

/// One ledger row per (account, votable) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upvote {
    pub id: Uuid,
    pub account_id: Uuid,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
    pub has_upvoted: bool,
    pub created_at: DateTime<Utc>,
}

impl Upvote {
    /// Create placeholder row (not-yet-voted)
    pub fn new(account_id: Uuid, votable: Votable) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            question_id: votable.question_id(),
            answer_id: votable.answer_id(),
            has_upvoted: false,
            created_at: Utc::now(),
        }
    }
}

/// Feedback form completion state, derived from the rating fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackState {
    Open,
    PartiallyComplete,
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackForm {
    pub id: Uuid,
    pub student_satisfied_rating: Option<i64>,
    pub mentor_satisfied_rating: Option<i64>,
    pub has_student_reported: bool,
    pub has_mentor_reported: bool,
    pub student_comment: String,
    pub mentor_comment: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackForm {
    /// Create empty form. Forms are created only as a side effect of
    /// pair-session/appointment creation, never directly by a client.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            student_satisfied_rating: None,
            mentor_satisfied_rating: None,
            has_student_reported: false,
            has_mentor_reported: false,
            student_comment: String::new(),
            mentor_comment: String::new(),
            created_at: Utc::now(),
        }
    }

    /// OPEN (both ratings null) → PARTIALLY_COMPLETE (one side rated)
    /// → COMPLETE (both sides rated)
    pub fn state(&self) -> FeedbackState {
        match (self.student_satisfied_rating, self.mentor_satisfied_rating) {
            (None, None) => FeedbackState::Open,
            (Some(_), Some(_)) => FeedbackState::Complete,
            _ => FeedbackState::PartiallyComplete,
        }
    }
}

impl Default for FeedbackForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSession {
    pub id: Uuid,
    pub price: f64,
    pub url: String,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    /// Bound exactly once, at creation time. `bind_feedback_form` refuses
    /// to overwrite an existing binding.
    pub feedback_form_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PairSession {
    pub fn new(mentor_id: Uuid, student_id: Uuid, price: f64, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            price,
            url,
            mentor_id,
            student_id,
            feedback_form_id: None,
            created_at: Utc::now(),
        }
    }

    /// One-shot binding of the feedback form. Rebinding fails.
    pub fn bind_feedback_form(&mut self, form_id: Uuid) -> Result<()> {
        if let Some(bound) = self.feedback_form_id {
            return Err(Error::InvariantViolation(format!(
                "Pair session {} already bound to feedback form {}",
                self.id, bound
            )));
        }
        self.feedback_form_id = Some(form_id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Requested => "requested",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "requested" => Ok(AppointmentStatus::Requested),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(Error::Internal(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub url: String,
    pub status: AppointmentStatus,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price: f64,
    /// Same one-shot binding invariant as PairSession
    pub feedback_form_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        mentor_id: Uuid,
        student_id: Uuid,
        url: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            status: AppointmentStatus::Requested,
            mentor_id,
            student_id,
            starts_at,
            ends_at,
            price,
            feedback_form_id: None,
            created_at: Utc::now(),
        }
    }

    /// One-shot binding of the feedback form. Rebinding fails.
    pub fn bind_feedback_form(&mut self, form_id: Uuid) -> Result<()> {
        if let Some(bound) = self.feedback_form_id {
            return Err(Error::InvariantViolation(format!(
                "Appointment {} already bound to feedback form {}",
                self.id, bound
            )));
        }
        self.feedback_form_id = Some(form_id);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub account_id: Uuid,
    pub feedback_form_id: Uuid,
    pub title: String,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(account_id: Uuid, feedback_form_id: Uuid, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            feedback_form_id,
            title,
            seen: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_state_transitions() {
        let mut form = FeedbackForm::new();
        assert_eq!(form.state(), FeedbackState::Open);

        form.student_satisfied_rating = Some(4);
        assert_eq!(form.state(), FeedbackState::PartiallyComplete);

        form.mentor_satisfied_rating = Some(5);
        assert_eq!(form.state(), FeedbackState::Complete);
    }

    #[test]
    fn pair_session_rebinding_fails() {
        let mut session = PairSession::new(Uuid::new_v4(), Uuid::new_v4(), 25.0, "url".into());
        let form_id = Uuid::new_v4();

        session.bind_feedback_form(form_id).unwrap();
        assert_eq!(session.feedback_form_id, Some(form_id));

        let err = session.bind_feedback_form(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        // First binding untouched
        assert_eq!(session.feedback_form_id, Some(form_id));
    }

    #[test]
    fn appointment_rebinding_fails() {
        let now = Utc::now();
        let mut appointment =
            Appointment::new(Uuid::new_v4(), Uuid::new_v4(), "url".into(), now, now, 0.0);

        appointment.bind_feedback_form(Uuid::new_v4()).unwrap();
        let err = appointment.bind_feedback_form(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn account_email_is_normalized() {
        let account = Account::new("Alice@Example.COM", "hash".into(), "Alice".into(), Role::Student);
        assert_eq!(account.email, "alice@example.com");
    }

    #[test]
    fn votable_carries_exactly_one_id() {
        let q = Votable::Question(Uuid::new_v4());
        assert!(q.question_id().is_some());
        assert!(q.answer_id().is_none());

        let a = Votable::Answer(Uuid::new_v4());
        assert!(a.question_id().is_none());
        assert!(a.answer_id().is_some());
    }
}

//! Account creation
//!
//! An account links to at most one profile: mentor or student, never
//! both. The profile choice is a tagged enum, so "both" is not even
//! representable; the role column is written to match.

use mentorlink_common::db::models::{Account, Mentor, Role, Student};
use mentorlink_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db;

/// Profile requested at account creation
#[derive(Debug, Clone)]
pub enum ProfileSpec {
    Mentor {
        is_professional: bool,
        degree_id: Uuid,
        university_id: Uuid,
    },
    Student,
    None,
}

impl ProfileSpec {
    fn role(&self) -> Role {
        match self {
            ProfileSpec::Mentor { .. } => Role::Mentor,
            ProfileSpec::Student => Role::Student,
            ProfileSpec::None => Role::Unassigned,
        }
    }
}

/// Create an account and its profile row in one transaction
pub async fn create_account(
    pool: &SqlitePool,
    email: &str,
    password_hash: String,
    name: String,
    profile: ProfileSpec,
) -> Result<Account> {
    if email.trim().is_empty() || password_hash.is_empty() {
        return Err(Error::BadRequest(
            "Email and credential hash are required".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    if db::accounts::email_exists(&mut *tx, email).await? {
        return Err(Error::BadRequest(format!(
            "Email {} is already registered",
            email.to_lowercase()
        )));
    }

    let account = Account::new(email, password_hash, name, profile.role());
    db::accounts::insert_account(&mut *tx, &account).await?;

    match profile {
        ProfileSpec::Mentor {
            is_professional,
            degree_id,
            university_id,
        } => {
            db::degrees::load_degree(&mut *tx, degree_id)
                .await?
                .ok_or_else(|| Error::NotFound(format!("Degree {}", degree_id)))?;
            db::universities::load_university(&mut *tx, university_id)
                .await?
                .ok_or_else(|| Error::NotFound(format!("University {}", university_id)))?;

            let mentor = Mentor::new(account.id, is_professional, degree_id, university_id);
            db::mentors::insert_mentor(&mut *tx, &mentor).await?;
        }
        ProfileSpec::Student => {
            let student = Student::new(account.id);
            db::students::insert_student(&mut *tx, &student).await?;
        }
        ProfileSpec::None => {}
    }

    tx.commit().await?;
    info!(account_id = %account.id, role = account.role.as_str(), "Account created");

    Ok(account)
}

//! Keyword index and degree recommender
//!
//! Free-text "about me" prompts are tokenized on whitespace; each token
//! is matched case-insensitively as a substring of keyword names. Per
//! token, only the top 3 degrees by match count feed the running totals.
//! The three highest-scoring distinct degrees land in the student's
//! recommendation slots; short rankings are padded with uniformly random
//! degrees.

use mentorlink_common::db::models::{Account, Degree};
use mentorlink_common::{Error, Result};
use rand::seq::SliceRandom;
use sqlx::{SqliteExecutor, SqlitePool};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::db;

/// Number of degree slots on a student profile
pub const RECOMMENDATION_SLOTS: usize = 3;

/// Degrees kept per token before scores aggregate
const TOKEN_DEGREE_CAP: usize = 3;

struct IndexEntry {
    name: String,
    degree_id: Uuid,
}

/// In-memory snapshot of the keyword corpus, queried per token
pub struct KeywordIndex {
    entries: Vec<IndexEntry>,
}

impl KeywordIndex {
    pub async fn load(db: impl SqliteExecutor<'_>) -> Result<Self> {
        let keywords = db::keywords::list_keywords(db).await?;

        let entries = keywords
            .into_iter()
            .map(|keyword| IndexEntry {
                name: keyword.name.to_lowercase(),
                degree_id: keyword.degree_id,
            })
            .collect();

        Ok(Self { entries })
    }

    /// Degrees whose keywords contain the token, with match counts,
    /// capped to the top 3 degrees for this token
    pub fn token_matches(&self, token: &str) -> Vec<(Uuid, usize)> {
        let token = token.to_lowercase();
        if token.is_empty() {
            return Vec::new();
        }

        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for entry in &self.entries {
            if entry.name.contains(&token) {
                *counts.entry(entry.degree_id).or_default() += 1;
            }
        }

        let mut ranked: Vec<(Uuid, usize)> = counts.into_iter().collect();
        // Tie-break on id so equal counts rank deterministically
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(TOKEN_DEGREE_CAP);

        ranked
    }
}

/// Score degrees from the three "about me" prompts and persist the top 3
/// into the caller's student profile. Returned in slot order.
pub async fn recommend_degrees(
    pool: &SqlitePool,
    student_account: &Account,
    inputs: [&str; 3],
) -> Result<Vec<Degree>> {
    let student = db::students::load_student_by_account(pool, student_account.id)
        .await?
        .ok_or_else(|| Error::BadRequest("Caller has no student profile".to_string()))?;

    let all_degrees = db::degrees::list_degrees(pool).await?;
    if all_degrees.len() < RECOMMENDATION_SLOTS {
        return Err(Error::BadRequest(format!(
            "Degree catalog holds {} degrees, need at least {}",
            all_degrees.len(),
            RECOMMENDATION_SLOTS
        )));
    }

    let index = KeywordIndex::load(pool).await?;

    let mut scores: HashMap<Uuid, usize> = HashMap::new();
    for input in inputs {
        for token in input.split_whitespace() {
            for (degree_id, count) in index.token_matches(token) {
                *scores.entry(degree_id).or_default() += count;
            }
        }
    }

    let mut ranked: Vec<(Uuid, usize)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut selected: Vec<Uuid> = ranked
        .iter()
        .take(RECOMMENDATION_SLOTS)
        .map(|(id, _)| *id)
        .collect();

    // Pad short rankings with uniformly random degrees, no duplicates
    if selected.len() < RECOMMENDATION_SLOTS {
        let mut remaining: Vec<Uuid> = all_degrees
            .iter()
            .map(|d| d.id)
            .filter(|id| !selected.contains(id))
            .collect();
        remaining.shuffle(&mut rand::thread_rng());
        selected.extend(remaining.into_iter().take(RECOMMENDATION_SLOTS - selected.len()));
    }

    let slots = [selected[0], selected[1], selected[2]];
    db::students::set_recommended_degrees(pool, student.id, slots).await?;
    info!(student_id = %student.id, ?slots, "Degree recommendations assigned");

    let by_id: HashMap<Uuid, Degree> =
        all_degrees.into_iter().map(|d| (d.id, d)).collect();
    let recommended = slots
        .iter()
        .map(|id| {
            by_id
                .get(id)
                .cloned()
                .ok_or_else(|| Error::Internal(format!("Degree {} missing from catalog", id)))
        })
        .collect::<Result<Vec<Degree>>>()?;

    Ok(recommended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::{seed_degree, seed_student_account, test_pool};
    use mentorlink_common::db::models::Keyword;
    use std::collections::HashSet;

    async fn seed_keyword(pool: &SqlitePool, name: &str, degree_id: Uuid) {
        let keyword = Keyword::new(name.to_string(), degree_id);
        db::keywords::insert_keyword(pool, &keyword).await.unwrap();
    }

    #[tokio::test]
    async fn strongest_match_lands_in_first_slot() {
        let pool = test_pool().await;
        let (account, student) = seed_student_account(&pool, "student@example.com").await;

        let degree_a = seed_degree(&pool, "Data Engineering").await;
        let degree_b = seed_degree(&pool, "Business Informatics").await;
        for i in 0..10 {
            seed_degree(&pool, &format!("Unrelated {}", i)).await;
        }

        // "database" matches A three times; "systems" matches A twice, B once
        seed_keyword(&pool, "database", degree_a.id).await;
        seed_keyword(&pool, "databases", degree_a.id).await;
        seed_keyword(&pool, "database administration", degree_a.id).await;
        seed_keyword(&pool, "systems", degree_a.id).await;
        seed_keyword(&pool, "distributed systems", degree_a.id).await;
        seed_keyword(&pool, "information systems", degree_b.id).await;

        let recommended = recommend_degrees(&pool, &account, ["database systems", "", ""])
            .await
            .unwrap();

        assert_eq!(recommended.len(), 3);
        assert_eq!(recommended[0].id, degree_a.id);

        let distinct: HashSet<Uuid> = recommended.iter().map(|d| d.id).collect();
        assert_eq!(distinct.len(), 3, "slots must hold distinct degrees");

        // Slots were persisted onto the student profile in order
        let stored = db::students::load_student(&pool, student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.degree1_id, Some(recommended[0].id));
        assert_eq!(stored.degree2_id, Some(recommended[1].id));
        assert_eq!(stored.degree3_id, Some(recommended[2].id));
    }

    #[tokio::test]
    async fn matching_is_case_insensitive_substring() {
        let pool = test_pool().await;
        let (account, _) = seed_student_account(&pool, "student@example.com").await;

        let degree = seed_degree(&pool, "Security").await;
        seed_degree(&pool, "Filler A").await;
        seed_degree(&pool, "Filler B").await;
        seed_keyword(&pool, "Cryptography", degree.id).await;

        let recommended = recommend_degrees(&pool, &account, ["CRYPTO", "", ""])
            .await
            .unwrap();
        assert_eq!(recommended[0].id, degree.id);
    }

    #[tokio::test]
    async fn empty_inputs_fill_all_slots_randomly() {
        let pool = test_pool().await;
        let (account, _) = seed_student_account(&pool, "student@example.com").await;

        for i in 0..12 {
            seed_degree(&pool, &format!("Degree {}", i)).await;
        }

        let mut orderings = HashSet::new();
        for _ in 0..10 {
            let recommended = recommend_degrees(&pool, &account, ["", "", ""])
                .await
                .unwrap();
            assert_eq!(recommended.len(), 3);

            let ids: Vec<Uuid> = recommended.iter().map(|d| d.id).collect();
            let distinct: HashSet<Uuid> = ids.iter().copied().collect();
            assert_eq!(distinct.len(), 3);

            orderings.insert(ids);
        }

        // Uniform selection from 12 degrees should vary across 10 calls
        assert!(orderings.len() > 1, "random fill never varied");
    }

    #[tokio::test]
    async fn tiny_catalog_is_rejected() {
        let pool = test_pool().await;
        let (account, _) = seed_student_account(&pool, "student@example.com").await;

        seed_degree(&pool, "Only One").await;
        seed_degree(&pool, "Only Two").await;

        let err = recommend_degrees(&pool, &account, ["anything", "", ""])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn caller_without_student_profile_is_rejected() {
        let pool = test_pool().await;
        let account = mentorlink_common::db::models::Account::new(
            "plain@example.com",
            "hash".into(),
            "Plain".into(),
            mentorlink_common::db::models::Role::Unassigned,
        );
        db::accounts::insert_account(&pool, &account).await.unwrap();

        for i in 0..3 {
            seed_degree(&pool, &format!("Degree {}", i)).await;
        }

        let err = recommend_degrees(&pool, &account, ["", "", ""])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }
}

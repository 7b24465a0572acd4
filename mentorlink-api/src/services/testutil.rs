//! Shared fixtures for service tests

use mentorlink_common::db::models::{
    Account, Degree, Mentor, Role, Student, University,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::db;

/// Single-connection in-memory database with the full schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    mentorlink_common::db::configure_connection(&pool).await.unwrap();
    mentorlink_common::db::create_schema(&pool).await.unwrap();
    pool
}

pub async fn seed_degree(pool: &SqlitePool, name: &str) -> Degree {
    let degree = Degree::new(name.to_string());
    db::degrees::insert_degree(pool, &degree).await.unwrap();
    degree
}

pub async fn seed_university(pool: &SqlitePool, name: &str) -> University {
    let university = University::new(name.to_string(), "Testville".to_string());
    db::universities::insert_university(pool, &university)
        .await
        .unwrap();
    university
}

pub async fn seed_student_account(pool: &SqlitePool, email: &str) -> (Account, Student) {
    let account = Account::new(email, "hash".into(), "Student".into(), Role::Student);
    db::accounts::insert_account(pool, &account).await.unwrap();

    let student = Student::new(account.id);
    db::students::insert_student(pool, &student).await.unwrap();

    (account, student)
}

pub async fn seed_mentor_account(
    pool: &SqlitePool,
    email: &str,
    is_professional: bool,
) -> (Account, Mentor) {
    let degree = seed_degree(pool, "Computer Science").await;
    let university = seed_university(pool, "Test University").await;

    let account = Account::new(email, "hash".into(), "Mentor".into(), Role::Mentor);
    db::accounts::insert_account(pool, &account).await.unwrap();

    let mentor = Mentor::new(account.id, is_professional, degree.id, university.id);
    db::mentors::insert_mentor(pool, &mentor).await.unwrap();

    (account, mentor)
}

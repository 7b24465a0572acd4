//! Common error types for MentorLink

use thiserror::Error;

/// Common result type for MentorLink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across MentorLink crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A one-shot dependent-creation invariant was violated
    /// (re-seeding an upvote ledger, re-binding a feedback form)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Appointment requested against a non-professional mentor
    #[error("Invalid mentor: {0}")]
    InvalidMentor(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

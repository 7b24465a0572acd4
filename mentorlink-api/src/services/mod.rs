//! Business operations
//!
//! Every multi-row mutation is an explicit service operation running in a
//! single transaction, so dependent-record creation commits or rolls back
//! with its parent.

pub mod accounts;
pub mod feedback;
pub mod ledger;
pub mod lifecycle;
pub mod meeting;
pub mod recommender;

#[cfg(test)]
pub(crate) mod testutil;

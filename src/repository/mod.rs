//! User storage behind the user screen.
//!
//! The dispatcher only talks to the [`UserRepository`] trait, so the
//! in-memory store can be swapped for a test double or a real backend.
//! Every mutating call returns the complete list as it stands after the
//! write, so callers never see a partial view.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{User, UserId};

pub use memory::InMemoryUserRepository;

/// Errors a repository call can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// A user with this id is already stored.
    #[error("user {0} already exists")]
    DuplicateId(UserId),

    /// The storage backend could not serve the request.
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Append `user` and return the resulting list.
    async fn add(&self, user: User) -> Result<Vec<User>, RepositoryError>;

    /// Remove `user` (matched by id) and return the resulting list.
    ///
    /// Removing a user that is not stored leaves the list unchanged.
    async fn remove(&self, user: &User) -> Result<Vec<User>, RepositoryError>;

    /// Remove every user. Always returns an empty list on success.
    async fn clear(&self) -> Result<Vec<User>, RepositoryError>;

    /// Allocate an id that no stored or future user will share.
    fn next_id(&self) -> UserId;
}

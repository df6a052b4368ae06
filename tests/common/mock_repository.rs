//! Repository doubles for dispatcher tests.

#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use userdesk::model::{IdGenerator, User, UserId};
use userdesk::repository::{InMemoryUserRepository, RepositoryError, UserRepository};

/// In-memory repository with a separate delay per operation.
pub struct DelayedRepository {
    inner: InMemoryUserRepository,
    pub list_ms: u64,
    pub add_ms: u64,
    pub remove_ms: u64,
    pub clear_ms: u64,
}

impl DelayedRepository {
    pub fn new(add_ms: u64, remove_ms: u64) -> Self {
        Self {
            inner: InMemoryUserRepository::instant(),
            list_ms: 0,
            add_ms,
            remove_ms,
            clear_ms: 0,
        }
    }

    async fn pause(ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait]
impl UserRepository for DelayedRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Self::pause(self.list_ms).await;
        self.inner.list().await
    }

    async fn add(&self, user: User) -> Result<Vec<User>, RepositoryError> {
        Self::pause(self.add_ms).await;
        self.inner.add(user).await
    }

    async fn remove(&self, user: &User) -> Result<Vec<User>, RepositoryError> {
        Self::pause(self.remove_ms).await;
        self.inner.remove(user).await
    }

    async fn clear(&self) -> Result<Vec<User>, RepositoryError> {
        Self::pause(self.clear_ms).await;
        self.inner.clear().await
    }

    fn next_id(&self) -> UserId {
        self.inner.next_id()
    }
}

/// Repository whose every call fails with the same message.
pub struct FailingRepository {
    message: String,
    ids: IdGenerator,
}

impl FailingRepository {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ids: IdGenerator::new(),
        }
    }

    fn error(&self) -> RepositoryError {
        RepositoryError::Unavailable(self.message.clone())
    }
}

#[async_trait]
impl UserRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Err(self.error())
    }

    async fn add(&self, _user: User) -> Result<Vec<User>, RepositoryError> {
        Err(self.error())
    }

    async fn remove(&self, _user: &User) -> Result<Vec<User>, RepositoryError> {
        Err(self.error())
    }

    async fn clear(&self) -> Result<Vec<User>, RepositoryError> {
        Err(self.error())
    }

    fn next_id(&self) -> UserId {
        self.ids.next_id()
    }
}

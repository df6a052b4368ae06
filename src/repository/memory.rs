use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{RepositoryError, UserRepository};
use crate::config::RepositoryConfig;
use crate::model::{IdGenerator, User, UserId};

/// Process-local user list with simulated I/O latency.
///
/// The latency is slept before the lock is taken, so concurrent callers
/// overlap their waits the same way they would against a remote store.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    ids: IdGenerator,
    list_latency: Duration,
    mutation_latency: Duration,
}

impl InMemoryUserRepository {
    pub fn new(config: &RepositoryConfig) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            ids: IdGenerator::new(),
            list_latency: Duration::from_millis(config.list_latency_ms),
            mutation_latency: Duration::from_millis(config.mutation_latency_ms),
        }
    }

    /// Repository without any simulated delay.
    pub fn instant() -> Self {
        Self::new(&RepositoryConfig {
            list_latency_ms: 0,
            mutation_latency_ms: 0,
        })
    }

    async fn simulate(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Self::simulate(self.list_latency).await;
        Ok(self.users.lock().clone())
    }

    async fn add(&self, user: User) -> Result<Vec<User>, RepositoryError> {
        Self::simulate(self.mutation_latency).await;
        let mut users = self.users.lock();
        if users.contains(&user) {
            return Err(RepositoryError::DuplicateId(user.id));
        }
        tracing::debug!(id = %user.id, "Storing user");
        users.push(user);
        Ok(users.clone())
    }

    async fn remove(&self, user: &User) -> Result<Vec<User>, RepositoryError> {
        Self::simulate(self.mutation_latency).await;
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|stored| stored != user);
        if users.len() == before {
            tracing::debug!(id = %user.id, "Remove ignored, user not stored");
        }
        Ok(users.clone())
    }

    async fn clear(&self) -> Result<Vec<User>, RepositoryError> {
        Self::simulate(self.mutation_latency).await;
        let mut users = self.users.lock();
        users.clear();
        Ok(Vec::new())
    }

    fn next_id(&self) -> UserId {
        self.ids.next_id()
    }
}

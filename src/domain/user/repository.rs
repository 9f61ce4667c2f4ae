//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations own identifier assignment and email uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Persist a new user, assigning its identifier
    ///
    /// Returns `DomainError::Conflict` when the email is already registered.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Get a user by their login email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by their ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Mock user repository that records calls and can be told to fail
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<Vec<User>>>,
        should_fail: Arc<RwLock<bool>>,
        create_calls: AtomicUsize,
        lookup_calls: AtomicUsize,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Number of `create` calls seen so far
        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        /// Number of `find_by_*` calls seen so far
        pub fn lookup_calls(&self) -> usize {
            self.lookup_calls.load(Ordering::SeqCst)
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, user: NewUser) -> Result<User, DomainError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.iter().any(|u| u.email() == user.email()) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already registered",
                    user.email()
                )));
            }

            let id = UserId::new(users.len() as i64 + 1)
                .map_err(|e| DomainError::internal(e.to_string()))?;
            let user = user.into_user(id);
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            self.lookup_calls.fetch_add(1, Ordering::SeqCst);
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.iter().find(|u| u.email() == email).cloned())
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
            self.lookup_calls.fetch_add(1, Ordering::SeqCst);
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.iter().find(|u| u.id() == id).cloned())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn new_user(email: &str) -> NewUser {
            NewUser::new("A", "B", email, "hashed_password").unwrap()
        }

        #[tokio::test]
        async fn test_create_assigns_ids() {
            let repo = MockUserRepository::new();

            let first = repo.create(new_user("a@b.com")).await.unwrap();
            let second = repo.create(new_user("c@d.com")).await.unwrap();

            assert_eq!(first.id().value(), 1);
            assert_eq!(second.id().value(), 2);
            assert_eq!(repo.create_calls(), 2);
        }

        #[tokio::test]
        async fn test_email_uniqueness() {
            let repo = MockUserRepository::new();

            repo.create(new_user("a@b.com")).await.unwrap();

            let result = repo.create(new_user("a@b.com")).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.find_by_email("a@b.com").await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }

        #[tokio::test]
        async fn test_lookups_are_counted() {
            let repo = MockUserRepository::new();
            let created = repo.create(new_user("a@b.com")).await.unwrap();

            assert!(repo.find_by_email("a@b.com").await.unwrap().is_some());
            assert!(repo.find_by_email("x@y.com").await.unwrap().is_none());
            assert!(repo.find_by_id(created.id()).await.unwrap().is_some());
            assert_eq!(repo.lookup_calls(), 3);
        }
    }
}

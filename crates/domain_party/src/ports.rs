//! Party Domain Ports
//!
//! This module defines the port interface for user records, enabling
//! swappable implementations (PostgreSQL in `infra_db`, in-memory mock).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_party::ports::UserPort;
//! use std::sync::Arc;
//!
//! pub struct UserService {
//!     users: Arc<dyn UserPort>,
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::user::User;

/// Record store operations for users
///
/// Users are keyed by username. All methods return `Result<T, PortError>`
/// so services handle every adapter identically.
#[async_trait]
pub trait UserPort: DomainPort + HealthCheckable {
    /// Retrieves a user by username
    ///
    /// # Returns
    ///
    /// The user if found, or `PortError::NotFound`
    async fn get_user(&self, username: &str) -> Result<User, PortError>;

    /// Inserts a new user
    ///
    /// # Returns
    ///
    /// `PortError::Conflict` if the username is taken
    async fn create_user(&self, user: &User) -> Result<(), PortError>;

    /// Writes the full user row, inserting it when absent
    async fn save_user(&self, user: &User) -> Result<(), PortError>;
}

/// Extension trait for UserPort with convenience methods
#[async_trait]
pub trait UserPortExt: UserPort {
    /// Looks a user up, mapping NotFound to `None`
    async fn find_user(&self, username: &str) -> Result<Option<User>, PortError> {
        match self.get_user(username).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation for all UserPort implementors
impl<T: UserPort + ?Sized> UserPortExt for T {}

/// Mock implementation of UserPort for testing
///
/// This adapter stores users in memory and is useful for unit testing
/// without database dependencies.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of UserPort
    #[derive(Debug, Default)]
    pub struct MockUserPort {
        users: Arc<RwLock<HashMap<String, User>>>,
    }

    impl MockUserPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with users for testing
        pub async fn with_users(users: Vec<User>) -> Self {
            let port = Self::new();
            for user in users {
                port.users.write().await.insert(user.username.clone(), user);
            }
            port
        }

        /// Number of stored users
        pub async fn len(&self) -> usize {
            self.users.read().await.len()
        }
    }

    impl DomainPort for MockUserPort {}

    #[async_trait]
    impl HealthCheckable for MockUserPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-user-port".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl UserPort for MockUserPort {
        async fn get_user(&self, username: &str) -> Result<User, PortError> {
            self.users
                .read()
                .await
                .get(username)
                .cloned()
                .ok_or_else(|| PortError::not_found("User", username))
        }

        async fn create_user(&self, user: &User) -> Result<(), PortError> {
            let mut users = self.users.write().await;
            if users.contains_key(&user.username) {
                return Err(PortError::conflict(format!(
                    "user {} already exists",
                    user.username
                )));
            }
            users.insert(user.username.clone(), user.clone());
            Ok(())
        }

        async fn save_user(&self, user: &User) -> Result<(), PortError> {
            self.users
                .write()
                .await
                .insert(user.username.clone(), user.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockUserPort;

    #[tokio::test]
    async fn test_mock_port_create_and_get() {
        let port = MockUserPort::new();
        port.create_user(&User::new("jdoe", "h", "John", "Doe")).await.unwrap();

        let retrieved = port.get_user("jdoe").await.unwrap();
        assert_eq!(retrieved.first_name, "John");
    }

    #[tokio::test]
    async fn test_mock_port_create_twice_conflicts() {
        let port = MockUserPort::new();
        let user = User::new("jdoe", "h", "John", "Doe");
        port.create_user(&user).await.unwrap();

        let result = port.create_user(&user).await;
        assert!(result.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_find_user_maps_not_found_to_none() {
        let port = MockUserPort::new();
        assert!(port.find_user("nobody").await.unwrap().is_none());
        assert!(port.get_user("nobody").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_health_check() {
        let port = MockUserPort::new();
        let result = port.health_check().await;
        assert_eq!(result.status, core_kernel::AdapterHealth::Healthy);
    }
}

//! Party domain services
//!
//! `UserService` owns user provisioning and credential checks. It is the
//! only place plaintext passwords are seen; everything below it stores
//! digests.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::credentials::CredentialHasher;
use crate::error::UserError;
use crate::ports::{UserPort, UserPortExt};
use crate::user::{NewUser, User, UserInfo};

/// Service for user accounts
pub struct UserService {
    users: Arc<dyn UserPort>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserService {
    /// Creates a new user service
    ///
    /// # Arguments
    ///
    /// * `users` - Record store for users
    /// * `hasher` - Credential hasher used for new and updated passwords
    pub fn new(users: Arc<dyn UserPort>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    /// Creates a user, or returns the stored user when the username exists
    ///
    /// The stored record always wins: a second call with different names
    /// returns the names from the first call.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: NewUser) -> Result<User, UserError> {
        if request.username.is_empty() {
            return Err(UserError::invalid("username is required"));
        }

        if let Some(existing) = self.users.find_user(&request.username).await? {
            debug!("user already exists");
            return Ok(existing);
        }

        if request.password.is_empty() {
            return Err(UserError::invalid("password is required"));
        }

        let user = User::new(
            request.username,
            self.hasher.hash(&request.password)?,
            request.first_name,
            request.last_name,
        );

        match self.users.create_user(&user).await {
            Ok(()) => {
                info!("user created");
                Ok(user)
            }
            // Lost a race against a concurrent create; the stored row wins
            Err(e) if e.is_conflict() => Ok(self.users.get_user(&user.username).await?),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves the holder of a new contract
    ///
    /// An existing user is returned unchanged. An absent user is created when
    /// a password is supplied; otherwise the call fails with NotFound.
    #[instrument(skip(self, password, first_name, last_name))]
    pub async fn provision(
        &self,
        username: &str,
        password: Option<&str>,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, UserError> {
        if let Some(existing) = self.users.find_user(username).await? {
            return Ok(existing);
        }

        match password {
            Some(password) if !password.is_empty() => {
                self.create_user(NewUser {
                    username: username.to_string(),
                    password: password.to_string(),
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                })
                .await
            }
            _ => Err(UserError::UserNotFound(username.to_string())),
        }
    }

    /// Checks a username/password pair; unknown users do not authenticate
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, UserError> {
        let Some(user) = self.users.find_user(username).await? else {
            return Ok(false);
        };
        let ok = self.hasher.verify(password, &user.password_hash);
        debug!(authenticated = ok, "credential check");
        Ok(ok)
    }

    /// Public details of a user, `None` when unknown
    #[instrument(skip(self))]
    pub async fn user_info(&self, username: &str) -> Result<Option<UserInfo>, UserError> {
        Ok(self.users.find_user(username).await?.map(|u| u.info()))
    }

    /// Replaces a user's credential
    #[instrument(skip(self, new_password))]
    pub async fn update_password(&self, username: &str, new_password: &str) -> Result<bool, UserError> {
        if username.is_empty() || new_password.is_empty() {
            return Err(UserError::invalid("username and password are required"));
        }

        let mut user = self.users.get_user(username).await?;
        user.password_hash = self.hasher.hash(new_password)?;
        self.users.save_user(&user).await?;

        info!("password updated");
        Ok(true)
    }

    /// Loads a user, failing with NotFound when absent
    pub async fn get_user(&self, username: &str) -> Result<User, UserError> {
        Ok(self.users.get_user(username).await?)
    }
}

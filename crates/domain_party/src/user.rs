//! User model

use serde::{Deserialize, Serialize};

/// A contract holder
///
/// The username is the identity key. Contracts point back at a user by
/// username; the user does not own a collection of contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity key
    pub username: String,
    /// PHC-formatted credential hash, never sent over the wire
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl User {
    /// Creates a user from an already-hashed credential
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Returns "first last", the name shown on claim review screens
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the public projection of this user
    pub fn info(&self) -> UserInfo {
        UserInfo {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Public user details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request to register a user with a plaintext password
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("jdoe", "secret-hash", "John", "Doe");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "jdoe");
    }

    #[test]
    fn test_display_name() {
        let user = User::new("ab", "", "Ada", "Byron");
        assert_eq!(user.display_name(), "Ada Byron");
    }
}

//! Party Domain
//!
//! This crate manages the people who hold contracts: shop customers
//! identified by username, their credential hashes and display names.
//!
//! Users are provisioned lazily. A contract sale names a username; if the
//! user does not exist yet and a password is supplied, the user is created
//! on the spot. Otherwise the existing record is used untouched.
//!
//! # Examples
//!
//! ```rust
//! use domain_party::user::User;
//!
//! let user = User::new("jdoe", "$argon2id$...", "John", "Doe");
//! assert_eq!(user.display_name(), "John Doe");
//! ```

pub mod user;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod services;

pub use user::{User, UserInfo, NewUser};
pub use credentials::{CredentialHasher, Argon2Hasher};
pub use error::UserError;
pub use ports::{UserPort, UserPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockUserPort;
pub use services::UserService;

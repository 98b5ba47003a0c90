//! Request and response bodies
//!
//! Request DTOs derive `Validate` and convert into the domain request
//! types. Domain records are serialized as they are.

pub mod contracts;
pub mod claims;
pub mod users;

use serde::{Deserialize, Serialize};

/// Body of operations without a natural result
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self {
            message: "Success".to_string(),
        }
    }
}

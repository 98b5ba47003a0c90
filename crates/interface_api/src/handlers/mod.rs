//! Request handlers
//!
//! One typed handler per route. Handlers decode the body, call a single
//! service operation and serialize its result.

pub mod health;
pub mod contracts;
pub mod claims;
pub mod repairs;
pub mod users;

//! Claims Management Domain
//!
//! This crate implements the claim lifecycle for shop-sold items: filing,
//! theft review, processing into repair or reimbursement, and repair order
//! fulfilment.
//!
//! # Claim Lifecycle
//!
//! ```text
//!          ┌──────────► Rejected
//!          │
//! New ─────┼──────────► Repair ──(repair order ready)──► repaired
//!          │
//!          ├──────────► Reimbursement
//!          │
//!          └─(theft)──► TheftConfirmed ──► Reimbursement (contract voided)
//!                                     └──► Rejected
//! ```
//!
//! Theft claims must be confirmed before they can be processed, and stolen
//! items are never repaired.
//!
//! Every operation touching more than one record runs inside a scoped
//! contract session (see [`ports::with_contract`]): the contract is locked,
//! the work is staged, and all writes land together or not at all.

pub mod status;
pub mod claim;
pub mod repair;
pub mod lifecycle;
pub mod error;
pub mod ports;
pub mod services;

pub use status::ClaimStatus;
pub use claim::{Claim, ClaimQuery, FileClaim, ProcessClaim, TheftClaimView, TheftReview};
pub use repair::{RepairOrder, RepairOrderQuery, RepairOrderView};
pub use error::ClaimError;
pub use ports::{with_contract, ClaimsPort, ContractSession, SessionFuture};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClaimsPort;
pub use services::ClaimService;

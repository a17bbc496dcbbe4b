//! Approval screens shared by proposals and on-calls.
//!
//! Written once against [`contracts::domain::common::ApprovalDocument`];
//! the domain modules only pick the record type.

pub mod api;
pub mod details;
pub mod list;
pub mod mutation;
pub mod state;

pub use details::{approval_details, DetailsExtra};
pub use list::approval_list;

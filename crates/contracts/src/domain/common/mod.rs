//! Types shared by every record the dashboard renders.

pub mod approval;
pub mod document;
pub mod financials;
pub mod master_data;
pub mod revision;
pub mod status;

pub use approval::{
    ApprovalHistoryEntry, ApprovalRecord, ApprovalRole, ApprovalState, ApproveRequest,
    RejectRevisionRequest, UpdateCoNumberRequest,
};
pub use document::{ApprovalDocument, DocumentSearchQuery, LineItemView};
pub use financials::{FinancialChanges, FinancialSummary};
pub use master_data::{MasterDataQuery, MasterRecord};
pub use revision::{Revision, RevisionStatus};
pub use status::{AuditStamps, EntityStatus, UserRef};

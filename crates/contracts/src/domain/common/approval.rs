//! RSH/NSH approval records and the client-side guards that run before
//! an approve, reject or close request is sent.

use super::status::UserRef;
use crate::shared::ApiError;
use crate::system::auth::UserRole;
use serde::{Deserialize, Serialize};

pub const USER_ID_NOT_FOUND: &str = "User ID not found";
pub const REJECTION_REASON_REQUIRED: &str = "Rejection reason is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalRole {
    /// Regional Service Head.
    Rsh,
    /// National Service Head.
    Nsh,
}

impl ApprovalRole {
    pub const ALL: [ApprovalRole; 2] = [ApprovalRole::Rsh, ApprovalRole::Nsh];

    /// Segment used in `/approve-:type`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Rsh => "rsh",
            Self::Nsh => "nsh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rsh => "RSH",
            Self::Nsh => "NSH",
        }
    }

    /// Approval buttons a user may see.
    pub fn allowed_for(role: &UserRole) -> Vec<ApprovalRole> {
        match role {
            UserRole::Admin => Self::ALL.to_vec(),
            UserRole::Rsh => vec![Self::Rsh],
            UserRole::Nsh => vec![Self::Nsh],
            UserRole::User | UserRole::Other(_) => Vec::new(),
        }
    }
}

/// One approval sub-record (`RSHApproval` / `NSHApproval`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApprovalRecord {
    pub approved: bool,
    pub approved_by: Option<UserRef>,
    pub approved_at: Option<String>,
    pub remark: Option<String>,
    pub rejected: bool,
    pub rejected_by: Option<UserRef>,
    pub rejected_at: Option<String>,
    #[serde(alias = "rejectionReason")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalState {
    Pending,
    Approved {
        by: Option<String>,
        at: Option<String>,
        remark: Option<String>,
    },
    Rejected {
        by: Option<String>,
        at: Option<String>,
        reason: Option<String>,
    },
}

impl ApprovalRecord {
    pub fn state(&self) -> ApprovalState {
        if self.rejected {
            ApprovalState::Rejected {
                by: self.rejected_by.as_ref().map(|u| u.display().to_string()),
                at: self.rejected_at.clone(),
                reason: self.reason.clone(),
            }
        } else if self.approved {
            ApprovalState::Approved {
                by: self.approved_by.as_ref().map(|u| u.display().to_string()),
                at: self.approved_at.clone(),
                remark: self.remark.clone(),
            }
        } else {
            ApprovalState::Pending
        }
    }

    pub fn is_decided(&self) -> bool {
        self.approved || self.rejected
    }
}

impl ApprovalState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved { .. } => "Approved",
            Self::Rejected { .. } => "Rejected",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Pending => "warning",
            Self::Approved { .. } => "success",
            Self::Rejected { .. } => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApprovalHistoryEntry {
    pub action: String,
    pub role: Option<String>,
    #[serde(alias = "approvedBy", alias = "by")]
    pub user: Option<UserRef>,
    #[serde(alias = "reason")]
    pub remark: Option<String>,
    #[serde(alias = "timestamp", alias = "at")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequest {
    pub revision_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRevisionRequest {
    pub revision_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub user_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCoNumberRequest {
    #[serde(rename = "CoNumber")]
    pub co_number: String,
    #[serde(rename = "cnoteNumber")]
    pub cnote_number: String,
}

fn require_user_id(user_id: Option<&str>) -> Result<String, ApiError> {
    match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ApiError::validation(USER_ID_NOT_FOUND)),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build an approve request, or refuse before any network call.
pub fn prepare_approval(
    user_id: Option<&str>,
    revision_number: u32,
    item_id: Option<&str>,
    remark: &str,
) -> Result<ApproveRequest, ApiError> {
    let user_id = require_user_id(user_id)?;
    Ok(ApproveRequest {
        revision_number,
        item_id: item_id.and_then(non_blank),
        user_id,
        remark: non_blank(remark),
    })
}

/// Whether the reject button may be enabled for this reason text.
pub fn can_submit_reason(reason: &str) -> bool {
    !reason.trim().is_empty()
}

pub fn prepare_rejection(
    user_id: Option<&str>,
    revision_number: u32,
    item_id: Option<&str>,
    reason: &str,
) -> Result<RejectRevisionRequest, ApiError> {
    let user_id = require_user_id(user_id)?;
    let reason = non_blank(reason).ok_or_else(|| ApiError::validation(REJECTION_REASON_REQUIRED))?;
    Ok(RejectRevisionRequest {
        revision_number,
        item_id: item_id.and_then(non_blank),
        user_id,
        reason,
    })
}

/// Closing a record assigns both the CO and the CNote number.
pub fn prepare_close(co_number: &str, cnote_number: &str) -> Result<UpdateCoNumberRequest, ApiError> {
    let co_number =
        non_blank(co_number).ok_or_else(|| ApiError::validation("CO Number is required"))?;
    let cnote_number =
        non_blank(cnote_number).ok_or_else(|| ApiError::validation("CNote Number is required"))?;
    Ok(UpdateCoNumberRequest {
        co_number,
        cnote_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_without_user_id_is_refused() {
        let err = prepare_approval(None, 1, None, "").unwrap_err();
        assert_eq!(err, ApiError::Validation(USER_ID_NOT_FOUND.to_string()));

        let err = prepare_approval(Some(""), 1, Some("item-1"), "ok").unwrap_err();
        assert_eq!(err.to_string(), "User ID not found");
    }

    #[test]
    fn test_approval_request_body() {
        let req = prepare_approval(Some(" u-1 "), 3, Some("item-9"), "  ").unwrap();
        assert_eq!(req.user_id, "u-1");
        assert_eq!(req.remark, None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"revisionNumber": 3, "itemId": "item-9", "userId": "u-1"})
        );
    }

    #[test]
    fn test_blank_reason_blocks_rejection() {
        assert!(!can_submit_reason(""));
        assert!(!can_submit_reason("   \n"));
        assert!(can_submit_reason("Discount too high"));

        let err = prepare_rejection(Some("u-1"), 2, None, "  ").unwrap_err();
        assert_eq!(err, ApiError::Validation(REJECTION_REASON_REQUIRED.to_string()));

        // the user id check runs first
        let err = prepare_rejection(None, 2, None, "").unwrap_err();
        assert_eq!(err.to_string(), USER_ID_NOT_FOUND);
    }

    #[test]
    fn test_prepare_close() {
        assert!(prepare_close("CO-1", "").is_err());
        let req = prepare_close(" CO-1 ", "CN-7").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"CoNumber": "CO-1", "cnoteNumber": "CN-7"})
        );
    }

    #[test]
    fn test_record_state() {
        let rec: ApprovalRecord = serde_json::from_str(
            r#"{"approved":true,"approvedBy":{"_id":"1","name":"N. Rao"},"approvedAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(
            rec.state(),
            ApprovalState::Approved {
                by: Some("N. Rao".to_string()),
                at: Some("2024-05-01T10:00:00Z".to_string()),
                remark: None,
            }
        );

        let rec: ApprovalRecord =
            serde_json::from_str(r#"{"rejected":true,"rejectionReason":"price"}"#).unwrap();
        assert_eq!(rec.state().label(), "Rejected");
        assert!(ApprovalRecord::default().state() == ApprovalState::Pending);
    }

    #[test]
    fn test_allowed_roles() {
        assert_eq!(ApprovalRole::allowed_for(&UserRole::Rsh), vec![ApprovalRole::Rsh]);
        assert_eq!(ApprovalRole::allowed_for(&UserRole::Admin).len(), 2);
        assert!(ApprovalRole::allowed_for(&UserRole::User).is_empty());
    }
}

//! Turning a click in the approval panel into at most one request.

use contracts::domain::common::approval::{prepare_approval, prepare_close, prepare_rejection};
use contracts::domain::common::{
    ApprovalDocument, ApprovalRole, ApproveRequest, RejectRevisionRequest, UpdateCoNumberRequest,
};
use contracts::ApiError;

/// What the user asked for, with the raw form input.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Approve {
        role: ApprovalRole,
        item_id: Option<String>,
        remark: String,
    },
    Reject {
        item_id: Option<String>,
        reason: String,
    },
    Close {
        co_number: String,
        cnote_number: String,
    },
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
            Self::Close { .. } => "close",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Approve(ApproveRequest),
    Reject(RejectRevisionRequest),
    Close(UpdateCoNumberRequest),
}

/// A validated request: where it goes and what it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub path: String,
    pub payload: Payload,
}

/// `Ok(None)` while another mutation is in flight or no record is open;
/// `Err` when the input fails validation. Neither case sends anything.
pub fn plan<D: ApprovalDocument>(
    in_flight: bool,
    doc: Option<&D>,
    user_id: Option<&str>,
    decision: &Decision,
) -> Result<Option<Mutation>, ApiError> {
    if in_flight {
        return Ok(None);
    }
    let Some(doc) = doc else {
        return Ok(None);
    };
    let revision = doc.current_revision_number();
    let mutation = match decision {
        Decision::Approve {
            role,
            item_id,
            remark,
        } => Mutation {
            path: D::approve_path(doc.id(), *role),
            payload: Payload::Approve(prepare_approval(
                user_id,
                revision,
                item_id.as_deref(),
                remark,
            )?),
        },
        Decision::Reject { item_id, reason } => Mutation {
            path: D::reject_path(doc.id()),
            payload: Payload::Reject(prepare_rejection(
                user_id,
                revision,
                item_id.as_deref(),
                reason,
            )?),
        },
        Decision::Close {
            co_number,
            cnote_number,
        } => Mutation {
            path: D::close_path(doc.id()),
            payload: Payload::Close(prepare_close(co_number, cnote_number)?),
        },
    };
    Ok(Some(mutation))
}

/// What the panel does once the server answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Clear the forms and re-fetch the list.
    Refetch,
    ShowError(ApiError),
}

pub fn outcome(result: Result<(), ApiError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Refetch,
        Err(e) => Outcome::ShowError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_proposal::Proposal;
    use contracts::domain::a002_oncall::OnCall;
    use contracts::domain::common::approval::USER_ID_NOT_FOUND;

    fn proposal() -> Proposal {
        serde_json::from_str(r#"{"_id": "p1", "currentRevision": 2}"#).unwrap()
    }

    fn approve() -> Decision {
        Decision::Approve {
            role: ApprovalRole::Rsh,
            item_id: Some("i1".to_string()),
            remark: " looks fine ".to_string(),
        }
    }

    #[test]
    fn test_approve_builds_request() {
        let doc = proposal();
        let mutation = plan(false, Some(&doc), Some("u-1"), &approve())
            .unwrap()
            .unwrap();
        assert_eq!(mutation.path, Proposal::approve_path("p1", ApprovalRole::Rsh));
        assert_eq!(
            mutation.payload,
            Payload::Approve(ApproveRequest {
                revision_number: 2,
                item_id: Some("i1".to_string()),
                user_id: "u-1".to_string(),
                remark: Some("looks fine".to_string()),
            })
        );
    }

    #[test]
    fn test_in_flight_sends_nothing() {
        let doc = proposal();
        assert_eq!(plan(true, Some(&doc), Some("u-1"), &approve()), Ok(None));
        let close = Decision::Close {
            co_number: "CO-1".to_string(),
            cnote_number: "CN-1".to_string(),
        };
        assert_eq!(plan(true, Some(&doc), Some("u-1"), &close), Ok(None));
    }

    #[test]
    fn test_no_record_sends_nothing() {
        assert_eq!(plan::<Proposal>(false, None, Some("u-1"), &approve()), Ok(None));
    }

    #[test]
    fn test_blank_user_is_refused() {
        let doc = proposal();
        for user in [None, Some(""), Some("   ")] {
            assert_eq!(
                plan(false, Some(&doc), user, &approve()),
                Err(ApiError::Validation(USER_ID_NOT_FOUND.to_string()))
            );
        }
    }

    #[test]
    fn test_reject_needs_reason() {
        let doc: OnCall = serde_json::from_str(r#"{"_id": "o1", "currentRevision": 1}"#).unwrap();
        let blank = Decision::Reject {
            item_id: None,
            reason: "  ".to_string(),
        };
        assert!(plan(false, Some(&doc), Some("u-1"), &blank).is_err());

        let reject = Decision::Reject {
            item_id: None,
            reason: "rate too high".to_string(),
        };
        let mutation = plan(false, Some(&doc), Some("u-1"), &reject).unwrap().unwrap();
        assert_eq!(mutation.path, "/phone/oncall/o1/reject-revision");
    }

    #[test]
    fn test_close_needs_both_numbers() {
        let doc = proposal();
        let close = Decision::Close {
            co_number: "CO-9".to_string(),
            cnote_number: " ".to_string(),
        };
        assert!(plan(false, Some(&doc), None, &close).is_err());
    }

    #[test]
    fn test_success_refetches() {
        assert_eq!(outcome(Ok(())), Outcome::Refetch);
        assert_eq!(
            outcome(Err(ApiError::Unauthorized)),
            Outcome::ShowError(ApiError::Unauthorized)
        );
    }
}

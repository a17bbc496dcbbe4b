use super::approval::ApprovalHistoryEntry;
use super::status::UserRef;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RevisionStatus {
    Draft,
    #[default]
    Pending,
    Approved,
    Rejected,
    Submitted,
    Revised,
    Completed,
    Other(String),
}

impl RevisionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Submitted => "submitted",
            Self::Revised => "revised",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Submitted => "Submitted",
            Self::Revised => "Revised",
            Self::Completed => "Completed",
            Self::Other(s) => s,
        }
    }

    /// Badge variant name understood by the UI badge component.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Approved | Self::Completed => "success",
            Self::Rejected => "error",
            Self::Pending | Self::Submitted => "warning",
            Self::Revised => "primary",
            Self::Draft | Self::Other(_) => "neutral",
        }
    }

    /// Approvals and rejections are only offered while the revision awaits a decision.
    pub fn awaits_decision(&self) -> bool {
        matches!(self, Self::Pending | Self::Submitted | Self::Revised)
    }

    /// Statuses offered by the list filter.
    pub fn filter_options() -> [RevisionStatus; 7] {
        [
            Self::Draft,
            Self::Pending,
            Self::Approved,
            Self::Rejected,
            Self::Submitted,
            Self::Revised,
            Self::Completed,
        ]
    }
}

impl From<String> for RevisionStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "submitted" => Self::Submitted,
            "revised" => Self::Revised,
            "completed" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<RevisionStatus> for String {
    fn from(status: RevisionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RevisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A versioned snapshot of changed fields with its own approval trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    default,
    bound(deserialize = "C: Deserialize<'de> + Default")
)]
pub struct Revision<C> {
    #[serde(alias = "revisionNo")]
    pub revision_number: u32,
    pub status: RevisionStatus,
    pub changes: C,
    pub approval_history: Vec<ApprovalHistoryEntry>,
    pub rejection_reason: Option<String>,
    #[serde(alias = "date", alias = "createdAt")]
    pub revision_date: Option<String>,
    pub created_by: Option<UserRef>,
}

/// Revisions ordered by number, oldest first.
pub fn ordered<C>(revisions: &[Revision<C>]) -> Vec<&Revision<C>> {
    let mut out: Vec<&Revision<C>> = revisions.iter().collect();
    out.sort_by_key(|r| r.revision_number);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_keeps_unknown() {
        let s: RevisionStatus = serde_json::from_str(r#""Approved""#).unwrap();
        assert_eq!(s, RevisionStatus::Approved);

        let s: RevisionStatus = serde_json::from_str(r#""on-hold""#).unwrap();
        assert_eq!(s, RevisionStatus::Other("on-hold".to_string()));
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""on-hold""#);
    }

    #[test]
    fn test_revision_defaults_missing_fields() {
        let rev: Revision<serde_json::Value> =
            serde_json::from_str(r#"{"revisionNumber":2,"status":"rejected"}"#).unwrap();
        assert_eq!(rev.revision_number, 2);
        assert_eq!(rev.status, RevisionStatus::Rejected);
        assert!(rev.approval_history.is_empty());
        assert!(!rev.status.awaits_decision());
    }

    #[test]
    fn test_ordered() {
        let revisions: Vec<Revision<()>> = [3, 1, 2]
            .into_iter()
            .map(|n| Revision {
                revision_number: n,
                ..Default::default()
            })
            .collect();
        let numbers: Vec<u32> = ordered(&revisions)
            .into_iter()
            .map(|r| r.revision_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}

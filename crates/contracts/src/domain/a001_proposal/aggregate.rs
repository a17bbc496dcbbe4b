use crate::domain::a003_customer::CustomerRef;
use crate::domain::a005_equipment::EquipmentRef;
use crate::domain::common::{
    revision, ApprovalDocument, ApprovalRecord, AuditStamps, FinancialChanges, FinancialSummary,
    LineItemView, Revision, RevisionStatus, UserRef,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// Service contract quote for one customer, priced per equipment item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Proposal {
    #[serde(rename = "_id")]
    pub id: String,
    pub proposal_number: String,
    pub customer: CustomerRef,
    pub items: Vec<ProposalItem>,
    pub current_revision: u32,
    pub revisions: Vec<Revision<ProposalChanges>>,
    pub status: RevisionStatus,
    #[serde(flatten)]
    pub financials: FinancialSummary,
    pub remark: Option<String>,
    #[serde(rename = "CoNumber", alias = "coNumber")]
    pub co_number: Option<String>,
    pub cnote_number: Option<String>,
    pub created_by: Option<UserRef>,
    #[serde(flatten)]
    pub audit: AuditStamps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProposalItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub equipment: EquipmentRef,
    /// CMC / NCMC
    pub warranty_type: String,
    pub years: u32,
    pub subtotal: f64,
    #[serde(rename = "RSHApproval")]
    pub rsh_approval: ApprovalRecord,
    #[serde(rename = "NSHApproval")]
    pub nsh_approval: ApprovalRecord,
}

/// Fields a proposal revision may override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProposalChanges {
    #[serde(flatten)]
    pub financials: FinancialChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ProposalItem>>,
}

impl Proposal {
    /// Revisions ordered by number, oldest first.
    pub fn revision_history(&self) -> Vec<&Revision<ProposalChanges>> {
        revision::ordered(&self.revisions)
    }
}

impl ApprovalDocument for Proposal {
    type Changes = ProposalChanges;

    const API_PREFIX: &'static str = "/phone/proposal";
    const KIND_LABEL: &'static str = "Proposal";
    const TAB_KEY: &'static str = "a001_proposal";
    const EXPORT_PATH: &'static str = "/excel/proposal/export-proposals";
    const EXPORT_FILE_NAME: &'static str = "proposals.xlsx";

    fn id(&self) -> &str {
        &self.id
    }

    fn number(&self) -> &str {
        &self.proposal_number
    }

    fn customer_name(&self) -> String {
        self.customer.display_name()
    }

    fn status(&self) -> &RevisionStatus {
        &self.status
    }

    fn current_revision_number(&self) -> u32 {
        self.current_revision
    }

    fn revisions(&self) -> &[Revision<ProposalChanges>] {
        &self.revisions
    }

    fn line_items(&self) -> Vec<LineItemView> {
        self.items
            .iter()
            .map(|item| LineItemView {
                id: item.id.clone(),
                title: item.equipment.title(),
                subtitle: match (item.warranty_type.is_empty(), item.years) {
                    (true, 0) => String::new(),
                    (true, y) => format!("{} yr", y),
                    (false, 0) => item.warranty_type.clone(),
                    (false, y) => format!("{} · {} yr", item.warranty_type, y),
                },
                subtotal: item.subtotal,
                rsh: item.rsh_approval.clone(),
                nsh: item.nsh_approval.clone(),
            })
            .collect()
    }

    fn financials(&self) -> &FinancialSummary {
        &self.financials
    }

    fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    fn co_number(&self) -> Option<&str> {
        self.co_number.as_deref()
    }

    fn cnote_number(&self) -> Option<&str> {
        self.cnote_number.as_deref()
    }

    fn created_at(&self) -> Option<&str> {
        self.audit.created_at.as_deref()
    }

    fn with_revision(&self, number: u32) -> Self {
        let Some(rev) = self.revisions.iter().find(|r| r.revision_number == number) else {
            return self.clone();
        };
        let changes = &rev.changes;
        Self {
            financials: self.financials.with_changes(&changes.financials),
            remark: changes.remark.clone().or_else(|| self.remark.clone()),
            items: changes.items.clone().unwrap_or_else(|| self.items.clone()),
            status: rev.status.clone(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Proposal {
        serde_json::from_str(
            r#"{
                "_id": "p1",
                "proposalNumber": "PR-0042",
                "customer": {"customercodeid": "100245", "customername": "City Hospital", "city": "Pune"},
                "items": [{
                    "_id": "i1",
                    "equipment": {"serialnumber": "SN-1", "materialdescription": "Ventilator"},
                    "warrantyType": "CMC",
                    "years": 2,
                    "subtotal": 50000,
                    "RSHApproval": {"approved": true},
                    "NSHApproval": {}
                }],
                "currentRevision": 2,
                "revisions": [
                    {"revisionNumber": 2, "status": "pending", "changes": {"discountPercentage": 12, "finalAmount": 49560}},
                    {"revisionNumber": 1, "status": "rejected", "changes": {"remark": "first pass"}}
                ],
                "status": "revised",
                "grandSubTotal": 50000,
                "discountPercentage": 5,
                "finalAmount": 55460,
                "remark": "initial",
                "CoNumber": "",
                "createdAt": "2024-03-10T09:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_nested_record() {
        let p = sample();
        assert_eq!(p.number(), "PR-0042");
        assert_eq!(p.customer_name(), "City Hospital, Pune");
        assert_eq!(p.financials.grand_sub_total, 50000.0);
        assert!(!p.is_closed());

        let items = p.line_items();
        assert_eq!(items[0].title, "Ventilator (SN-1)");
        assert_eq!(items[0].subtitle, "CMC · 2 yr");
        assert!(items[0].rsh.approved);
        assert!(!items[0].nsh.is_decided());
    }

    #[test]
    fn test_current_revision_and_history() {
        let p = sample();
        assert_eq!(p.current_revision().map(|r| r.revision_number), Some(2));
        let numbers: Vec<u32> = p.revision_history().iter().map(|r| r.revision_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_with_revision_returns_new_record() {
        let p = sample();
        let applied = p.with_revision(2);
        assert_eq!(applied.financials.discount_percentage, 12.0);
        assert_eq!(applied.financials.final_amount, 49560.0);
        // untouched fields come from the base
        assert_eq!(applied.financials.grand_sub_total, 50000.0);
        assert_eq!(applied.remark.as_deref(), Some("initial"));
        assert_eq!(applied.status, RevisionStatus::Pending);
        // base record is unchanged
        assert_eq!(p.financials.discount_percentage, 5.0);

        let first = p.with_revision(1);
        assert_eq!(first.remark.as_deref(), Some("first pass"));
        assert_eq!(first.financials, p.financials);

        assert_eq!(p.with_revision(9), p);
    }
}

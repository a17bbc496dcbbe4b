use crate::domain::a003_customer::CustomerRef;
use crate::domain::common::{
    revision, ApprovalDocument, ApprovalRecord, AuditStamps, FinancialChanges, FinancialSummary,
    LineItemView, Revision, RevisionStatus, UserRef,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// Spare-parts service request raised against a customer complaint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnCall {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(alias = "oncallNumber")]
    pub on_call_number: String,
    pub customer: CustomerRef,
    pub complaint_id: Option<String>,
    pub product_groups: Vec<ProductGroup>,
    pub current_revision: u32,
    pub revisions: Vec<Revision<OnCallChanges>>,
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
pub struct ProductGroup {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_group: String,
    pub spares: Vec<SpareLine>,
    pub subtotal: f64,
    #[serde(rename = "RSHApproval")]
    pub rsh_approval: ApprovalRecord,
    #[serde(rename = "NSHApproval")]
    pub nsh_approval: ApprovalRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpareLine {
    #[serde(alias = "PartNumber")]
    pub part_number: String,
    pub description: String,
    #[serde(alias = "qty")]
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnCallChanges {
    #[serde(flatten)]
    pub financials: FinancialChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_groups: Option<Vec<ProductGroup>>,
}

impl OnCall {
    pub fn revision_history(&self) -> Vec<&Revision<OnCallChanges>> {
        revision::ordered(&self.revisions)
    }
}

impl ProductGroup {
    fn spares_summary(&self) -> String {
        match self.spares.len() {
            0 => String::new(),
            1 => self.spares[0].part_number.clone(),
            n => format!("{} +{} more", self.spares[0].part_number, n - 1),
        }
    }
}

impl ApprovalDocument for OnCall {
    type Changes = OnCallChanges;

    const API_PREFIX: &'static str = "/phone/oncall";
    const KIND_LABEL: &'static str = "On-Call";
    const TAB_KEY: &'static str = "a002_oncall";
    const EXPORT_PATH: &'static str = "/excel/oncall/export-oncalls";
    const EXPORT_FILE_NAME: &'static str = "oncalls.xlsx";

    fn id(&self) -> &str {
        &self.id
    }

    fn number(&self) -> &str {
        &self.on_call_number
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

    fn revisions(&self) -> &[Revision<OnCallChanges>] {
        &self.revisions
    }

    fn line_items(&self) -> Vec<LineItemView> {
        self.product_groups
            .iter()
            .map(|group| LineItemView {
                id: group.id.clone(),
                title: group.product_group.clone(),
                subtitle: group.spares_summary(),
                subtotal: group.subtotal,
                rsh: group.rsh_approval.clone(),
                nsh: group.nsh_approval.clone(),
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
            product_groups: changes
                .product_groups
                .clone()
                .unwrap_or_else(|| self.product_groups.clone()),
            status: rev.status.clone(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oncall_line_items_and_revision() {
        let oc: OnCall = serde_json::from_str(
            r#"{
                "_id": "o1",
                "onCallNumber": "OC-7",
                "customer": "100245",
                "productGroups": [{
                    "_id": "g1",
                    "productGroup": "Imaging",
                    "spares": [
                        {"partNumber": "P-1", "quantity": 1, "rate": 100, "amount": 100},
                        {"partNumber": "P-2", "quantity": 2, "rate": 50, "amount": 100}
                    ],
                    "subtotal": 200,
                    "NSHApproval": {"rejected": true, "reason": "stock"}
                }],
                "currentRevision": 1,
                "revisions": [{
                    "revisionNumber": 1,
                    "status": "submitted",
                    "changes": {"productGroups": [], "gstPercentage": 18}
                }],
                "CoNumber": "CO-9"
            }"#,
        )
        .unwrap();

        assert_eq!(oc.customer_name(), "100245");
        assert!(oc.is_closed());
        let items = oc.line_items();
        assert_eq!(items[0].subtitle, "P-1 +1 more");
        assert_eq!(items[0].nsh.state().label(), "Rejected");

        let applied = oc.with_revision(1);
        assert!(applied.product_groups.is_empty());
        assert_eq!(applied.financials.gst_percentage, 18.0);
        assert_eq!(oc.product_groups.len(), 1);
        assert!(applied.status.awaits_decision());
    }

    #[test]
    fn test_oncall_paths() {
        assert_eq!(OnCall::search_path(), "/phone/oncall/search");
        assert_eq!(
            OnCall::approve_path("o1", crate::domain::common::ApprovalRole::Nsh),
            "/phone/oncall/o1/approve-nsh"
        );
        assert_eq!(OnCall::reject_path("o1"), "/phone/oncall/o1/reject-revision");
        assert_eq!(OnCall::close_path("o1"), "/phone/oncall/o1/update-conumber");
    }
}

use serde::{Deserialize, Serialize};

/// Server-computed totals of a proposal or on-call.
///
/// Displayed as-is; the dashboard never recomputes any of these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSummary {
    #[serde(alias = "subTotal", alias = "subtotal")]
    pub grand_sub_total: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub after_discount: f64,
    pub tds_percentage: f64,
    pub tds_amount: f64,
    pub after_tds: f64,
    pub gst_percentage: f64,
    pub gst_amount: f64,
    pub final_amount: f64,
}

/// The subset of totals a revision may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialChanges {
    #[serde(alias = "subTotal", skip_serializing_if = "Option::is_none")]
    pub grand_sub_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tds_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tds_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_tds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_amount: Option<f64>,
}

impl FinancialSummary {
    /// Overlay the values present in `changes`, leaving the rest untouched.
    pub fn with_changes(&self, changes: &FinancialChanges) -> Self {
        Self {
            grand_sub_total: changes.grand_sub_total.unwrap_or(self.grand_sub_total),
            discount_percentage: changes
                .discount_percentage
                .unwrap_or(self.discount_percentage),
            discount_amount: changes.discount_amount.unwrap_or(self.discount_amount),
            after_discount: changes.after_discount.unwrap_or(self.after_discount),
            tds_percentage: changes.tds_percentage.unwrap_or(self.tds_percentage),
            tds_amount: changes.tds_amount.unwrap_or(self.tds_amount),
            after_tds: changes.after_tds.unwrap_or(self.after_tds),
            gst_percentage: changes.gst_percentage.unwrap_or(self.gst_percentage),
            gst_amount: changes.gst_amount.unwrap_or(self.gst_amount),
            final_amount: changes.final_amount.unwrap_or(self.final_amount),
        }
    }
}

impl FinancialChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_changes_overlays_only_present_fields() {
        let base = FinancialSummary {
            grand_sub_total: 100_000.0,
            discount_percentage: 5.0,
            discount_amount: 5_000.0,
            final_amount: 112_100.0,
            ..Default::default()
        };
        let changes = FinancialChanges {
            discount_percentage: Some(10.0),
            discount_amount: Some(10_000.0),
            ..Default::default()
        };

        let applied = base.with_changes(&changes);
        assert_eq!(applied.grand_sub_total, 100_000.0);
        assert_eq!(applied.discount_percentage, 10.0);
        assert_eq!(applied.discount_amount, 10_000.0);
        assert_eq!(applied.final_amount, 112_100.0);
        // base is untouched
        assert_eq!(base.discount_percentage, 5.0);
    }
}

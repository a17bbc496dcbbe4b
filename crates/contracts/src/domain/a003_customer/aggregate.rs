use crate::domain::common::{AuditStamps, EntityStatus, MasterRecord};
use crate::usecases::u501_bulk_upload::BulkEntity;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub customercodeid: String,
    pub customername: String,
    pub hospitalname: String,
    pub street: String,
    pub district: String,
    pub city: String,
    pub region: String,
    pub pincode: String,
    pub country: String,
    pub telephone: String,
    pub email: String,
    /// PAN
    pub taxnumber1: String,
    /// GSTIN
    pub taxnumber2: String,
    pub status: EntityStatus,
    #[serde(flatten)]
    pub audit: AuditStamps,
}

impl MasterRecord for Customer {
    const COLLECTION_PATH: &'static str = "/collections/customer";
    const EXPORT_PATH: &'static str = "/excel/customer/export-customers";
    const EXPORT_FILE_NAME: &'static str = "customers.xlsx";
    const TITLE: &'static str = "Customers";
    const BULK_ENTITY: BulkEntity = BulkEntity::Customer;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &EntityStatus {
        &self.status
    }

    fn audit(&self) -> &AuditStamps {
        &self.audit
    }

    fn headers() -> Vec<&'static str> {
        vec![
            "Customer Code",
            "Customer Name",
            "Hospital",
            "City",
            "Pincode",
            "Telephone",
            "Email",
            "GSTIN",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customercodeid.clone(),
            self.customername.clone(),
            self.hospitalname.clone(),
            self.city.clone(),
            self.pincode.clone(),
            self.telephone.clone(),
            self.email.clone(),
            self.taxnumber2.clone(),
        ]
    }
}

// ============================================================================
// Reference embedded in proposals and on-calls
// ============================================================================

/// Customer as embedded in a proposal: populated document or bare code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Populated(CustomerSummary),
    Code(String),
}

impl Default for CustomerRef {
    fn default() -> Self {
        Self::Code(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerSummary {
    pub customercodeid: String,
    pub customername: String,
    pub hospitalname: String,
    pub city: String,
}

impl CustomerRef {
    pub fn display_name(&self) -> String {
        match self {
            Self::Code(code) => code.clone(),
            Self::Populated(c) => {
                let name = if c.customername.is_empty() {
                    &c.hospitalname
                } else {
                    &c.customername
                };
                match (name.is_empty(), c.city.is_empty()) {
                    (true, _) => c.customercodeid.clone(),
                    (false, true) => name.clone(),
                    (false, false) => format!("{}, {}", name, c.city),
                }
            }
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Code(code) => code,
            Self::Populated(c) => &c.customercodeid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_from_api() {
        let json = r#"{
            "_id": "c1",
            "customercodeid": "100245",
            "customername": "City Hospital",
            "city": "Pune",
            "status": "Inactive",
            "createdAt": "2024-02-01T08:00:00Z"
        }"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(c.customercodeid, "100245");
        assert!(!c.status.is_active());
        assert_eq!(c.audit.created_at.as_deref(), Some("2024-02-01T08:00:00Z"));
        assert_eq!(c.cells().len(), Customer::headers().len());
    }

    #[test]
    fn test_customer_ref_display() {
        let r: CustomerRef = serde_json::from_str(r#""100245""#).unwrap();
        assert_eq!(r.display_name(), "100245");

        let r: CustomerRef =
            serde_json::from_str(r#"{"customercodeid":"100245","customername":"City Hospital","city":"Pune"}"#)
                .unwrap();
        assert_eq!(r.display_name(), "City Hospital, Pune");
        assert_eq!(r.code(), "100245");
    }
}

use crate::domain::common::{AuditStamps, EntityStatus, MasterRecord};
use crate::usecases::u501_bulk_upload::BulkEntity;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    #[serde(rename = "_id")]
    pub id: String,
    pub serialnumber: String,
    pub materialcode: String,
    pub materialdescription: String,
    pub currentcustomer: String,
    pub endcustomer: String,
    #[serde(rename = "custWarrantystartdate")]
    pub cust_warranty_start_date: Option<String>,
    #[serde(rename = "custWarrantyenddate")]
    pub cust_warranty_end_date: Option<String>,
    #[serde(rename = "dealerwarrantystartdate")]
    pub dealer_warranty_start_date: Option<String>,
    #[serde(rename = "dealerwarrantyenddate")]
    pub dealer_warranty_end_date: Option<String>,
    pub dealer: String,
    pub status: EntityStatus,
    #[serde(flatten)]
    pub audit: AuditStamps,
}

impl MasterRecord for Equipment {
    const COLLECTION_PATH: &'static str = "/collections/equipment";
    const EXPORT_PATH: &'static str = "/excel/equipment/export-equipment";
    const EXPORT_FILE_NAME: &'static str = "equipment.xlsx";
    const TITLE: &'static str = "Equipment";
    const BULK_ENTITY: BulkEntity = BulkEntity::Equipment;

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
            "Serial Number",
            "Material Code",
            "Description",
            "Current Customer",
            "Warranty Start",
            "Warranty End",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.serialnumber.clone(),
            self.materialcode.clone(),
            self.materialdescription.clone(),
            self.currentcustomer.clone(),
            self.cust_warranty_start_date.clone().unwrap_or_default(),
            self.cust_warranty_end_date.clone().unwrap_or_default(),
        ]
    }
}

// ============================================================================
// Reference embedded in proposal items
// ============================================================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub serialnumber: String,
    pub materialcode: String,
    #[serde(alias = "name")]
    pub materialdescription: String,
}

impl EquipmentRef {
    pub fn title(&self) -> String {
        match (self.serialnumber.is_empty(), self.materialdescription.is_empty()) {
            (false, false) => format!("{} ({})", self.materialdescription, self.serialnumber),
            (false, true) => self.serialnumber.clone(),
            (true, false) => self.materialdescription.clone(),
            (true, true) => self.materialcode.clone(),
        }
    }
}

use crate::domain::common::{AuditStamps, EntityStatus, MasterRecord};
use crate::usecases::u501_bulk_upload::BulkEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    /// Part number
    #[serde(alias = "partnoid")]
    pub materialcode: String,
    pub productdescription: String,
    pub productgroup: String,
    pub subgrp: String,
    /// PM frequency, as entered by the service team.
    pub frequency: String,
    pub installationcheckliststatus: String,
    pub pmcheckliststatus: String,
    pub status: EntityStatus,
    #[serde(flatten)]
    pub audit: AuditStamps,
}

impl MasterRecord for Product {
    const COLLECTION_PATH: &'static str = "/collections/product";
    const EXPORT_PATH: &'static str = "/excel/product/export-products";
    const EXPORT_FILE_NAME: &'static str = "products.xlsx";
    const TITLE: &'static str = "Products";
    const BULK_ENTITY: BulkEntity = BulkEntity::Product;

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
            "Part Number",
            "Description",
            "Product Group",
            "Sub Group",
            "Frequency",
            "Installation Checklist",
            "PM Checklist",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.materialcode.clone(),
            self.productdescription.clone(),
            self.productgroup.clone(),
            self.subgrp.clone(),
            self.frequency.clone(),
            self.installationcheckliststatus.clone(),
            self.pmcheckliststatus.clone(),
        ]
    }
}

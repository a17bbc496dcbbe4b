pub mod alias_table;
pub mod header_reader;
pub mod ndjson;
pub mod progress;
pub mod retry;

pub use alias_table::{normalize_text, AliasTable, ColumnMapping, FieldAlias, HeaderVerdict};
pub use header_reader::{read_headers, validate_file, FileFormat, HeaderReadError};
pub use ndjson::{NdjsonDecoder, NdjsonError};
pub use progress::{
    BulkUploadEvent, BulkUploadPhase, BulkUploadProgress, Counters, RecordResult, RecordStatus,
};
pub use retry::{RetryPolicy, UPLOAD_TIMEOUT_MS};

use crate::usecases::common::UseCaseMetadata;
use serde::{Deserialize, Serialize};

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Master data collection a spreadsheet can be loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkEntity {
    Product,
    Customer,
    Equipment,
}

impl BulkEntity {
    pub const ALL: [BulkEntity; 3] = [
        BulkEntity::Product,
        BulkEntity::Customer,
        BulkEntity::Equipment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Customer => "customer",
            Self::Equipment => "equipment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Products",
            Self::Customer => "Customers",
            Self::Equipment => "Equipment",
        }
    }

    pub fn upload_path(&self) -> String {
        format!("/bulk/{}/bulk-upload", self.as_str())
    }

    pub fn alias_table(&self) -> &'static AliasTable {
        AliasTable::for_entity(*self)
    }
}

pub struct BulkUpload;

impl UseCaseMetadata for BulkUpload {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "bulk_upload"
    }

    fn display_name() -> &'static str {
        "Bulk Upload"
    }

    fn description() -> &'static str {
        "Load products, customers or equipment from a CSV or Excel file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_paths() {
        assert_eq!(BulkEntity::Product.upload_path(), "/bulk/product/bulk-upload");
        assert_eq!(BulkEntity::Customer.upload_path(), "/bulk/customer/bulk-upload");
        assert_eq!(BulkEntity::Equipment.upload_path(), "/bulk/equipment/bulk-upload");
        assert_eq!(BulkUpload::full_name(), "u501_bulk_upload");
        assert_eq!(BulkEntity::Equipment.alias_table().fields[0].field, "serialnumber");
    }
}

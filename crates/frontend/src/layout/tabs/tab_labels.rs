//! Titles for every tab key, shared by the sidebar and the tab strip.

use contracts::domain::a003_customer::Customer;
use contracts::domain::a004_product::Product;
use contracts::domain::a005_equipment::Equipment;
use contracts::domain::common::MasterRecord;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_bulk_upload::BulkUpload;

/// Every key the registry can render.
pub const TAB_KEYS: [&str; 6] = [
    "a001_proposal",
    "a002_oncall",
    "a003_customer",
    "a004_product",
    "a005_equipment",
    "u501_bulk_upload",
];

pub fn tab_label_for_key(key: &str) -> Option<&'static str> {
    let label = match key {
        "a001_proposal" => "Proposals",
        "a002_oncall" => "On-Calls",
        "a003_customer" => Customer::TITLE,
        "a004_product" => Product::TITLE,
        "a005_equipment" => Equipment::TITLE,
        "u501_bulk_upload" => BulkUpload::display_name(),
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_label() {
        for key in TAB_KEYS {
            assert!(tab_label_for_key(key).is_some(), "no label for {key}");
        }
        assert_eq!(tab_label_for_key("a004_product"), Some("Products"));
        assert_eq!(tab_label_for_key("u501_bulk_upload"), Some("Bulk Upload"));
        assert_eq!(tab_label_for_key("p900_sales_register"), None);
    }
}

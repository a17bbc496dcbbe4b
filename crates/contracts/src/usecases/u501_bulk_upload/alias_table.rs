//! Header matching for bulk upload files.
//!
//! Only the header row is checked. Each canonical field has a list of
//! known spellings; a header matches when its normalized text equals one
//! of them, or failing that, when one contains the other.

use super::BulkEntity;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static PRODUCT_TABLE: Lazy<AliasTable> = Lazy::new(AliasTable::product);
static CUSTOMER_TABLE: Lazy<AliasTable> = Lazy::new(AliasTable::customer);
static EQUIPMENT_TABLE: Lazy<AliasTable> = Lazy::new(AliasTable::equipment);

/// Lowercase and keep only alphanumerics: `"Sub_GRp "` becomes `"subgrp"`.
pub fn normalize_text(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAlias {
    /// Field name the server expects, e.g. `materialcode`.
    pub field: &'static str,
    /// Shown to the user when the column is missing.
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl FieldAlias {
    const fn required(
        field: &'static str,
        label: &'static str,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            label,
            aliases,
            required: true,
        }
    }

    const fn optional(
        field: &'static str,
        label: &'static str,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            label,
            aliases,
            required: false,
        }
    }

    fn normalized_aliases(&self) -> Vec<String> {
        std::iter::once(self.field)
            .chain(self.aliases.iter().copied())
            .map(normalize_text)
            .filter(|a| !a.is_empty())
            .collect()
    }
}

/// Match status of one table field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub field: String,
    /// Expected column label
    pub expected: String,
    /// Header as it appears in the file
    pub found: Option<String>,
    /// Position in the header row
    pub file_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderVerdict {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub mapped_columns: Vec<ColumnMapping>,
    pub error: Option<String>,
}

impl HeaderVerdict {
    /// Verdict for a file whose headers could not be read at all.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn found_count(&self) -> usize {
        self.mapped_columns
            .iter()
            .filter(|m| m.found.is_some())
            .count()
    }

    pub fn mapping_for(&self, field: &str) -> Option<&ColumnMapping> {
        self.mapped_columns.iter().find(|m| m.field == field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    pub fields: Vec<FieldAlias>,
}

impl AliasTable {
    pub fn new(fields: Vec<FieldAlias>) -> Self {
        Self { fields }
    }

    /// Shared built-in table for an upload target.
    pub fn for_entity(entity: BulkEntity) -> &'static AliasTable {
        match entity {
            BulkEntity::Product => &PRODUCT_TABLE,
            BulkEntity::Customer => &CUSTOMER_TABLE,
            BulkEntity::Equipment => &EQUIPMENT_TABLE,
        }
    }

    pub fn product() -> Self {
        Self::new(vec![
            FieldAlias::required(
                "materialcode",
                "Part Number",
                &["partnumber", "partno", "materialcode", "partcode", "productcode"],
            ),
            FieldAlias::required(
                "productdescription",
                "Product Description",
                &["productdescription", "description", "partdescription", "materialdescription"],
            ),
            FieldAlias::required(
                "productgroup",
                "Product Group",
                &["productgroup", "prodgroup", "group"],
            ),
            FieldAlias::required("subgrp", "Sub Group", &["subgrp", "subgroup"]),
            FieldAlias::required("frequency", "Frequency", &["frequency", "pmfrequency", "freq"]),
            FieldAlias::required(
                "installationcheckliststatus",
                "Installation Checklist Status",
                &["installationcheckliststatus", "installationchecklist", "installchecklist"],
            ),
            FieldAlias::required(
                "pmcheckliststatus",
                "PM Checklist Status",
                &["pmcheckliststatus", "pmchecklist"],
            ),
        ])
    }

    pub fn customer() -> Self {
        Self::new(vec![
            FieldAlias::required(
                "customercodeid",
                "Customer Code",
                &["customercodeid", "customercode", "custcode", "customerid"],
            ),
            FieldAlias::required(
                "customername",
                "Customer Name",
                &["customername", "custname", "name"],
            ),
            FieldAlias::optional("hospitalname", "Hospital Name", &["hospitalname", "hospital"]),
            FieldAlias::optional("street", "Street", &["street", "address"]),
            FieldAlias::optional("district", "District", &["district"]),
            FieldAlias::required("city", "City", &["city", "town"]),
            FieldAlias::optional("region", "Region", &["region", "state"]),
            FieldAlias::required("pincode", "Pincode", &["pincode", "postalcode", "zipcode", "pin"]),
            FieldAlias::optional("country", "Country", &["country"]),
            FieldAlias::optional(
                "telephone",
                "Telephone",
                &["telephone", "phone", "mobile", "contactnumber"],
            ),
            FieldAlias::optional("email", "Email", &["email", "emailid", "mail"]),
            FieldAlias::optional("taxnumber1", "PAN", &["taxnumber1", "pan", "pannumber"]),
            FieldAlias::optional("taxnumber2", "GST Number", &["taxnumber2", "gstin", "gstnumber", "gst"]),
        ])
    }

    pub fn equipment() -> Self {
        Self::new(vec![
            FieldAlias::required(
                "serialnumber",
                "Serial Number",
                &["serialnumber", "serialno", "equipmentserial", "serial"],
            ),
            FieldAlias::required(
                "materialcode",
                "Material Code",
                &["materialcode", "partnumber", "partno", "material"],
            ),
            FieldAlias::required(
                "materialdescription",
                "Material Description",
                &["materialdescription", "equipmentdescription", "description"],
            ),
            FieldAlias::required(
                "currentcustomer",
                "Current Customer",
                &["currentcustomer", "customercode", "customer"],
            ),
            FieldAlias::optional("endcustomer", "End Customer", &["endcustomer"]),
            FieldAlias::required(
                "custWarrantystartdate",
                "Warranty Start Date",
                &["custwarrantystartdate", "warrantystartdate", "warrantystart"],
            ),
            FieldAlias::required(
                "custWarrantyenddate",
                "Warranty End Date",
                &["custwarrantyenddate", "warrantyenddate", "warrantyend"],
            ),
            FieldAlias::optional("dealer", "Dealer", &["dealer", "dealercode"]),
        ])
    }

    /// Match a header row against the table.
    ///
    /// Three passes, each over headers nobody claimed yet: exact alias
    /// matches, then headers containing a field's own name, then
    /// containment in either direction with the longest aliases tried
    /// first. A loose alias (`name`, `customer`) therefore only gets what
    /// more specific fields left over. A header is claimed at most once.
    pub fn match_headers(&self, headers: &[String]) -> HeaderVerdict {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_text(h)).collect();
        let aliases: Vec<Vec<String>> = self.fields.iter().map(FieldAlias::normalized_aliases).collect();

        let mut claimed = vec![false; headers.len()];
        let mut found: Vec<Option<usize>> = vec![None; self.fields.len()];

        // exact
        for (slot, field_aliases) in found.iter_mut().zip(&aliases) {
            let hit = normalized
                .iter()
                .enumerate()
                .find(|(idx, h)| {
                    !claimed[*idx] && !h.is_empty() && field_aliases.iter().any(|a| a == *h)
                })
                .map(|(idx, _)| idx);
            if let Some(idx) = hit {
                claimed[idx] = true;
                *slot = Some(idx);
            }
        }

        // a header containing the field's own name, e.g. "End Customer Name"
        for (slot, field) in found.iter_mut().zip(&self.fields) {
            if slot.is_some() {
                continue;
            }
            let canonical = normalize_text(field.field);
            if canonical.is_empty() {
                continue;
            }
            let hit = normalized
                .iter()
                .enumerate()
                .find(|(idx, h)| !claimed[*idx] && h.contains(canonical.as_str()))
                .map(|(idx, _)| idx);
            if let Some(idx) = hit {
                claimed[idx] = true;
                *slot = Some(idx);
            }
        }

        // containment either direction, longest alias first across all fields
        let mut candidates: Vec<(usize, &str)> = aliases
            .iter()
            .enumerate()
            .flat_map(|(field_idx, list)| list.iter().map(move |a| (field_idx, a.as_str())))
            .collect();
        candidates.sort_by_key(|(_, alias)| std::cmp::Reverse(alias.len()));

        for (field_idx, alias) in candidates {
            if found[field_idx].is_some() {
                continue;
            }
            let hit = normalized
                .iter()
                .enumerate()
                .find(|(idx, h)| {
                    !claimed[*idx] && !h.is_empty() && (h.contains(alias) || alias.contains(h.as_str()))
                })
                .map(|(idx, _)| idx);
            if let Some(idx) = hit {
                claimed[idx] = true;
                found[field_idx] = Some(idx);
            }
        }

        let mapped_columns: Vec<ColumnMapping> = self
            .fields
            .iter()
            .zip(&found)
            .map(|(field, idx)| ColumnMapping {
                field: field.field.to_string(),
                expected: field.label.to_string(),
                found: idx.map(|i| headers[i].trim().to_string()),
                file_index: *idx,
            })
            .collect();

        let missing_fields: Vec<String> = self
            .fields
            .iter()
            .zip(&found)
            .filter(|(field, idx)| field.required && idx.is_none())
            .map(|(field, _)| field.label.to_string())
            .collect();

        let is_valid = missing_fields.is_empty();
        let error = (!is_valid).then(|| format!("Missing required columns: {}", missing_fields.join(", ")));

        HeaderVerdict {
            is_valid,
            missing_fields,
            mapped_columns,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(line: &str) -> Vec<String> {
        line.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Sub_GRp "), "subgrp");
        assert_eq!(normalize_text("PM checklist Status"), "pmcheckliststatus");
        assert_eq!(normalize_text("  -- "), "");

        for sample in ["Part No.", "Ünïcode Name", "GST #2", "", "already"] {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_part_number_maps_to_materialcode() {
        let verdict = AliasTable::product().match_headers(&headers("Part Number"));
        let mapping = verdict.mapping_for("materialcode").unwrap();
        assert_eq!(mapping.found.as_deref(), Some("Part Number"));
        assert_eq!(mapping.file_index, Some(0));
    }

    #[test]
    fn test_product_file_accepted() {
        let verdict = AliasTable::product().match_headers(&headers(
            "Part No,Product Description,Product Group,Sub_GRp,Frequency,Installation checklist Status,PM checklist Status",
        ));
        assert!(verdict.is_valid);
        assert!(verdict.missing_fields.is_empty());
        assert_eq!(verdict.error, None);
        assert_eq!(verdict.found_count(), 7);
        assert_eq!(verdict.mapping_for("subgrp").unwrap().file_index, Some(3));
    }

    #[test]
    fn test_product_file_without_frequency_rejected() {
        let verdict = AliasTable::product().match_headers(&headers(
            "Part No,Product Description,Product Group,Sub_GRp,Installation checklist Status,PM checklist Status",
        ));
        assert!(!verdict.is_valid);
        assert_eq!(verdict.missing_fields, vec!["Frequency".to_string()]);
        assert!(verdict.error.unwrap().contains("Frequency"));
    }

    #[test]
    fn test_equipment_without_serial_number() {
        let verdict = AliasTable::equipment().match_headers(&headers(
            "Material Code,Material Description,Current Customer,Warranty Start Date,Warranty End Date",
        ));
        assert!(!verdict.is_valid);
        assert!(verdict.missing_fields.contains(&"Serial Number".to_string()));
        assert_eq!(verdict.missing_fields.len(), 1);
    }

    #[test]
    fn test_fuzzy_match_uses_containment() {
        // "Equipment Serial No" contains "serialno"
        let verdict = AliasTable::equipment().match_headers(&headers(
            "Equipment Serial No,Material,Description,Customer,Warranty Start,Warranty End",
        ));
        assert!(verdict.is_valid, "{:?}", verdict.missing_fields);
        assert_eq!(
            verdict.mapping_for("serialnumber").unwrap().found.as_deref(),
            Some("Equipment Serial No")
        );
    }

    #[test]
    fn test_exact_match_wins_over_fuzzy() {
        // "name" would also match "Hospital Name"; the exact pass keeps it for hospitalname
        let verdict = AliasTable::customer().match_headers(&headers(
            "Hospital Name,Customer Code,Customer Name,City,Pincode",
        ));
        assert!(verdict.is_valid);
        assert_eq!(verdict.mapping_for("hospitalname").unwrap().file_index, Some(0));
        assert_eq!(verdict.mapping_for("customername").unwrap().file_index, Some(2));
    }

    #[test]
    fn test_empty_headers_never_match() {
        let verdict = AliasTable::product().match_headers(&headers(",,  ,__"));
        assert!(!verdict.is_valid);
        assert_eq!(verdict.found_count(), 0);
        assert_eq!(verdict.missing_fields.len(), 7);
    }

    #[test]
    fn test_mapped_columns_follow_table_order() {
        let table = AliasTable::customer();
        let verdict = table.match_headers(&headers("City,Customer Name,Customer Code,PIN"));
        let fields: Vec<&str> = verdict.mapped_columns.iter().map(|m| m.field.as_str()).collect();
        let expected: Vec<&str> = table.fields.iter().map(|f| f.field).collect();
        assert_eq!(fields, expected);
        // optional columns never block the upload
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_loose_alias_does_not_steal_specific_column() {
        // "customer" is contained in both customer headers
        let verdict = AliasTable::equipment().match_headers(&headers(
            "Serial Number,Material Code,Material Description,End Customer Name,Current Customer Name,Warranty Start Date,Warranty End Date",
        ));
        assert!(verdict.is_valid);
        assert_eq!(
            verdict.mapping_for("currentcustomer").unwrap().found.as_deref(),
            Some("Current Customer Name")
        );
        assert_eq!(
            verdict.mapping_for("endcustomer").unwrap().found.as_deref(),
            Some("End Customer Name")
        );
    }

    #[test]
    fn test_loose_alias_takes_leftover_column() {
        // "Customer Ref" only fits the loose "customer" alias
        let verdict = AliasTable::equipment().match_headers(&headers(
            "Customer Ref,Equipment Serial,Part No,Description,Warranty Start,Warranty End",
        ));
        assert!(verdict.is_valid, "{:?}", verdict.missing_fields);
        assert_eq!(
            verdict.mapping_for("currentcustomer").unwrap().found.as_deref(),
            Some("Customer Ref")
        );
        assert_eq!(
            verdict.mapping_for("serialnumber").unwrap().file_index,
            Some(1)
        );
        assert_eq!(verdict.mapping_for("endcustomer").unwrap().found, None);
    }
}


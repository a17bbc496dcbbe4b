//! Reads the header row of an uploaded file without parsing its data rows.

use super::alias_table::{AliasTable, HeaderVerdict};
use calamine::{open_workbook_auto_from_rs, DataType, Reader};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    /// Tab separated, `.tsv` or `.txt`
    Tsv,
    Xlsx,
    Xls,
    Json,
}

impl FileFormat {
    /// Value for the file input `accept` attribute.
    pub const ACCEPT: &'static str = ".csv,.tsv,.txt,.xlsx,.xls,.json";

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.')?.1.trim().to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "txt" => Some(Self::Tsv),
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum HeaderReadError {
    #[error("The file is empty")]
    Empty,
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("No header row found in the file")]
    NoHeaderRow,
    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not read Excel workbook: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Could not read JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON must be an array of objects or a single object")]
    JsonShape,
}

/// Header row of `bytes`, in file order.
pub fn read_headers(file_name: &str, bytes: &[u8]) -> Result<Vec<String>, HeaderReadError> {
    let format = FileFormat::from_file_name(file_name)
        .ok_or_else(|| HeaderReadError::UnsupportedFormat(file_name.to_string()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(HeaderReadError::Empty);
    }

    let headers = match format {
        FileFormat::Csv => delimited_headers(bytes, b',')?,
        FileFormat::Tsv => delimited_headers(bytes, b'\t')?,
        FileFormat::Xlsx | FileFormat::Xls => workbook_headers(bytes)?,
        FileFormat::Json => json_headers(bytes)?,
    };

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(HeaderReadError::NoHeaderRow);
    }
    Ok(headers)
}

/// Read and match headers. Any read failure becomes an invalid verdict.
pub fn validate_file(file_name: &str, bytes: &[u8], table: &AliasTable) -> HeaderVerdict {
    match read_headers(file_name, bytes) {
        Ok(headers) => table.match_headers(&headers),
        Err(e) => HeaderVerdict::failed(e.to_string()),
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

fn delimited_headers(bytes: &[u8], delimiter: u8) -> Result<Vec<String>, HeaderReadError> {
    let bytes = strip_bom(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(|h| h.trim().to_string()).collect()),
        None => Err(HeaderReadError::NoHeaderRow),
    }
}

fn workbook_headers(bytes: &[u8]) -> Result<Vec<String>, HeaderReadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(HeaderReadError::NoHeaderRow)??;

    let row = range.rows().next().ok_or(HeaderReadError::NoHeaderRow)?;
    Ok(row
        .iter()
        .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
        .collect())
}

fn json_headers(bytes: &[u8]) -> Result<Vec<String>, HeaderReadError> {
    let value: serde_json::Value = serde_json::from_slice(strip_bom(bytes))?;
    let object = match &value {
        serde_json::Value::Array(items) => match items.first() {
            Some(serde_json::Value::Object(map)) => map,
            Some(_) => return Err(HeaderReadError::JsonShape),
            None => return Err(HeaderReadError::NoHeaderRow),
        },
        serde_json::Value::Object(map) => map,
        _ => return Err(HeaderReadError::JsonShape),
    };
    Ok(object.keys().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    const HEADERS: [&str; 7] = [
        "Part No",
        "Product Description",
        "Product Group",
        "Sub_GRp",
        "Frequency",
        "Installation checklist Status",
        "PM checklist Status",
    ];

    fn xlsx_bytes(headers: &[&str]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, h) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *h).unwrap();
            sheet.write_string(1, col as u16, "value").unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    fn json_bytes(headers: &[&str]) -> Vec<u8> {
        let mut row = serde_json::Map::new();
        for h in headers {
            row.insert(h.to_string(), serde_json::Value::String("value".into()));
        }
        serde_json::to_vec(&serde_json::Value::Array(vec![serde_json::Value::Object(row)])).unwrap()
    }

    #[test]
    fn test_file_format_from_name() {
        assert_eq!(FileFormat::from_file_name("products.CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_file_name("a.b.txt"), Some(FileFormat::Tsv));
        assert_eq!(FileFormat::from_file_name("book.xls"), Some(FileFormat::Xls));
        assert_eq!(FileFormat::from_file_name("noext"), None);
        assert_eq!(FileFormat::from_file_name("image.png"), None);
    }

    #[test]
    fn test_csv_headers_with_bom_and_quotes() {
        let bytes = b"\xEF\xBB\xBFPart No,\"Product Description\", Frequency \n1,2,3\n";
        let headers = read_headers("p.csv", bytes).unwrap();
        assert_eq!(headers, vec!["Part No", "Product Description", "Frequency"]);
    }

    #[test]
    fn test_same_headers_same_mapping_across_formats() {
        let table = AliasTable::product();
        let csv = format!("{}\n1,2,3,4,5,6,7\n", HEADERS.join(","));
        let tsv = format!("{}\n1\t2\n", HEADERS.join("\t"));

        let from_csv = validate_file("products.csv", csv.as_bytes(), &table);
        let from_tsv = validate_file("products.tsv", tsv.as_bytes(), &table);
        let from_xlsx = validate_file("products.xlsx", &xlsx_bytes(&HEADERS), &table);
        let from_json = validate_file("products.json", &json_bytes(&HEADERS), &table);

        assert!(from_csv.is_valid);
        assert_eq!(from_csv.mapped_columns, from_tsv.mapped_columns);
        assert_eq!(from_csv.mapped_columns, from_xlsx.mapped_columns);
        assert_eq!(from_csv.mapped_columns, from_json.mapped_columns);
    }

    #[test]
    fn test_json_object_keys_keep_document_order() {
        let bytes = br#"{"Serial Number": 1, "Material Code": 2, "Description": 3}"#;
        let headers = read_headers("eq.json", bytes).unwrap();
        assert_eq!(headers, vec!["Serial Number", "Material Code", "Description"]);

        assert!(matches!(
            read_headers("eq.json", b"[1, 2]"),
            Err(HeaderReadError::JsonShape)
        ));
    }

    #[test]
    fn test_json_with_bom() {
        let headers = read_headers("p.json", b"\xEF\xBB\xBF[{\"Part No\":1}]").unwrap();
        assert_eq!(headers, vec!["Part No"]);

        let table = AliasTable::product();
        let mut json = b"\xEF\xBB\xBF".to_vec();
        json.extend(json_bytes(&HEADERS));
        let csv = format!("{}\n", HEADERS.join(","));
        assert_eq!(
            validate_file("products.json", &json, &table),
            validate_file("products.csv", csv.as_bytes(), &table)
        );
    }

    #[test]
    fn test_unreadable_input_gives_invalid_verdict() {
        let table = AliasTable::equipment();
        for (name, bytes) in [
            ("empty.csv", &b""[..]),
            ("blank.csv", &b"  \n\n"[..]),
            ("commas.csv", &b",,,\n"[..]),
            ("broken.xlsx", &b"not a zip archive"[..]),
            ("broken.json", &b"{\"a\": "[..]),
            ("empty.json", &b"[]"[..]),
            ("photo.png", &b"\x89PNG"[..]),
        ] {
            let verdict = validate_file(name, bytes, &table);
            assert!(!verdict.is_valid, "{name}");
            assert!(
                verdict.error.as_deref().is_some_and(|e| !e.is_empty()),
                "{name}"
            );
        }
    }
}

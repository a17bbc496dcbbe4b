use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the bulk upload response stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BulkUploadEvent {
    /// File accepted, rows counted
    Init {
        #[serde(default, alias = "totalRecords")]
        total: u64,
        #[serde(default)]
        message: Option<String>,
    },
    Progress {
        #[serde(flatten)]
        counters: Counters,
        #[serde(default)]
        message: Option<String>,
    },
    /// Results for a slice of rows
    Batch {
        #[serde(default, alias = "records")]
        results: Vec<RecordResult>,
        #[serde(flatten)]
        counters: Counters,
    },
    Complete {
        #[serde(flatten)]
        counters: Counters,
        #[serde(default)]
        message: Option<String>,
    },
    Error {
        #[serde(default, alias = "error")]
        message: String,
    },
    #[serde(other)]
    Unknown,
}

/// Running totals as reported by the server. Absent values leave the
/// client's count unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    #[serde(alias = "totalRecords", skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(alias = "processedRecords", skip_serializing_if = "Option::is_none")]
    pub processed: Option<u64>,
    #[serde(alias = "inserted", alias = "createdCount", skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    #[serde(alias = "updatedCount", skip_serializing_if = "Option::is_none")]
    pub updated: Option<u64>,
    #[serde(alias = "failedCount", alias = "errors", skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
}

impl Counters {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    Created,
    Updated,
    #[default]
    Failed,
    Skipped,
    Other(String),
}

impl RecordStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
            Self::Other(s) => s,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<String> for RecordStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" | "inserted" | "success" => Self::Created,
            "updated" => Self::Updated,
            "failed" | "error" => Self::Failed,
            "skipped" | "duplicate" => Self::Skipped,
            _ => Self::Other(value),
        }
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        status.label().to_ascii_lowercase()
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome for one uploaded row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordResult {
    #[serde(alias = "rowNumber")]
    pub row: Option<u64>,
    /// Natural key of the row (part number, serial number, customer code)
    #[serde(
        alias = "materialcode",
        alias = "serialnumber",
        alias = "customercodeid",
        alias = "identifier"
    )]
    pub key: Option<String>,
    pub status: RecordStatus,
    #[serde(alias = "error")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkUploadPhase {
    #[default]
    Idle,
    Uploading,
    Completed,
    Failed,
}

/// Client-side view of a running upload, folded from stream events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkUploadProgress {
    pub phase: BulkUploadPhase,
    pub total: u64,
    pub processed: u64,
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
    pub results: Vec<RecordResult>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl BulkUploadProgress {
    pub fn started() -> Self {
        Self {
            phase: BulkUploadPhase::Uploading,
            ..Default::default()
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == BulkUploadPhase::Uploading
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.phase,
            BulkUploadPhase::Completed | BulkUploadPhase::Failed
        )
    }

    /// Fold one event. Events after completion or failure are ignored.
    pub fn apply(&mut self, event: BulkUploadEvent) {
        if self.is_finished() {
            return;
        }
        match event {
            BulkUploadEvent::Init { total, message } => {
                self.phase = BulkUploadPhase::Uploading;
                self.total = total;
                self.message = message;
            }
            BulkUploadEvent::Progress { counters, message } => {
                self.phase = BulkUploadPhase::Uploading;
                self.merge(&counters);
                if message.is_some() {
                    self.message = message;
                }
            }
            BulkUploadEvent::Batch { results, counters } => {
                self.phase = BulkUploadPhase::Uploading;
                if counters.is_empty() {
                    self.count(&results);
                } else {
                    self.merge(&counters);
                }
                self.results.extend(results);
            }
            BulkUploadEvent::Complete { counters, message } => {
                self.merge(&counters);
                if self.processed < self.total {
                    self.processed = self.total;
                }
                self.message = message.or_else(|| Some("Upload completed".to_string()));
                self.phase = BulkUploadPhase::Completed;
            }
            BulkUploadEvent::Error { message } => self.fail(message),
            BulkUploadEvent::Unknown => {}
        }
    }

    /// Mark the upload failed, e.g. on a network error or timeout.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(if message.trim().is_empty() {
            "Upload failed".to_string()
        } else {
            message
        });
        self.phase = BulkUploadPhase::Failed;
    }

    /// The response stream closed. Without a `complete` event the upload
    /// only counts as done when every row was processed.
    pub fn end_of_stream(&mut self) {
        if !self.is_uploading() {
            return;
        }
        if self.total > 0 && self.processed >= self.total {
            self.phase = BulkUploadPhase::Completed;
            self.message.get_or_insert_with(|| "Upload completed".to_string());
        } else {
            self.fail("Connection closed before the upload completed");
        }
    }

    /// Whole percent of rows processed, 0..=100.
    pub fn percent(&self) -> u8 {
        if self.phase == BulkUploadPhase::Completed {
            return 100;
        }
        if self.total == 0 {
            return 0;
        }
        (self.processed.min(self.total) * 100 / self.total) as u8
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordResult> {
        self.results.iter().filter(|r| r.status.is_failure())
    }

    fn merge(&mut self, counters: &Counters) {
        if let Some(total) = counters.total {
            self.total = total;
        }
        if let Some(processed) = counters.processed {
            self.processed = processed;
        }
        if let Some(created) = counters.created {
            self.created = created;
        }
        if let Some(updated) = counters.updated {
            self.updated = updated;
        }
        if let Some(failed) = counters.failed {
            self.failed = failed;
        }
    }

    fn count(&mut self, results: &[RecordResult]) {
        for result in results {
            match result.status {
                RecordStatus::Created => self.created += 1,
                RecordStatus::Updated => self.updated += 1,
                RecordStatus::Failed => self.failed += 1,
                RecordStatus::Skipped | RecordStatus::Other(_) => {}
            }
        }
        self.processed += results.len() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: &str) -> BulkUploadEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_event_shapes() {
        assert_eq!(
            event(r#"{"type":"init","total":120}"#),
            BulkUploadEvent::Init {
                total: 120,
                message: None
            }
        );
        assert_eq!(
            event(r#"{"type":"error","error":"bad file"}"#),
            BulkUploadEvent::Error {
                message: "bad file".to_string()
            }
        );
        assert_eq!(event(r#"{"type":"heartbeat"}"#), BulkUploadEvent::Unknown);
    }

    #[test]
    fn test_progress_flow() {
        let mut progress = BulkUploadProgress::started();
        progress.apply(event(r#"{"type":"init","total":4}"#));
        assert_eq!(progress.percent(), 0);

        progress.apply(event(
            r#"{"type":"batch","results":[
                {"row":2,"materialcode":"P-1","status":"created"},
                {"row":3,"materialcode":"P-2","status":"failed","error":"Frequency is required"}
            ]}"#,
        ));
        assert_eq!(progress.processed, 2);
        assert_eq!(progress.created, 1);
        assert_eq!(progress.failed, 1);
        assert_eq!(progress.percent(), 50);

        let failures: Vec<_> = progress.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].key.as_deref(), Some("P-2"));
        assert_eq!(failures[0].message.as_deref(), Some("Frequency is required"));

        progress.apply(event(
            r#"{"type":"progress","processed":3,"created":1,"updated":1,"failed":1}"#,
        ));
        assert_eq!(progress.updated, 1);
        assert_eq!(progress.percent(), 75);

        progress.apply(event(r#"{"type":"complete","created":2,"updated":1,"failed":1}"#));
        assert_eq!(progress.phase, BulkUploadPhase::Completed);
        assert_eq!(progress.processed, 4);
        assert_eq!(progress.created, 2);
        assert_eq!(progress.percent(), 100);
        assert!(!progress.is_uploading());
    }

    #[test]
    fn test_error_event_is_terminal() {
        let mut progress = BulkUploadProgress::started();
        progress.apply(event(r#"{"type":"init","total":10}"#));
        progress.apply(event(r#"{"type":"error","message":"Database unavailable"}"#));
        assert_eq!(progress.phase, BulkUploadPhase::Failed);
        assert_eq!(progress.error.as_deref(), Some("Database unavailable"));

        progress.apply(event(r#"{"type":"complete"}"#));
        assert_eq!(progress.phase, BulkUploadPhase::Failed);
    }

    #[test]
    fn test_end_of_stream() {
        let mut p = BulkUploadProgress::started();
        p.apply(BulkUploadEvent::Init {
            total: 2,
            message: None,
        });
        p.end_of_stream();
        assert_eq!(p.phase, BulkUploadPhase::Failed);

        let mut p = BulkUploadProgress::started();
        p.apply(BulkUploadEvent::Progress {
            counters: Counters {
                total: Some(2),
                processed: Some(2),
                ..Default::default()
            },
            message: None,
        });
        p.end_of_stream();
        assert_eq!(p.phase, BulkUploadPhase::Completed);
        assert_eq!(p.percent(), 100);

        // already terminal: untouched
        let mut p = BulkUploadProgress::started();
        p.fail("boom");
        p.end_of_stream();
        assert_eq!(p.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_fail_with_blank_message() {
        let mut progress = BulkUploadProgress::started();
        progress.fail("  ");
        assert_eq!(progress.error.as_deref(), Some("Upload failed"));
    }
}

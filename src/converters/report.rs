use crate::converters::converter::{Conversion, ConversionStatus};
use crate::error::{ConversionError, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub source: PathBuf,
    pub error: String,
}

/// Aggregate outcome of a batch run. Per-file failures are collected as
/// values rather than unwound, so one bad file never aborts the batch.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub converted: Vec<Conversion>,
    pub skipped: Vec<Conversion>,
    pub failures: Vec<FailureEntry>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, conversion: Conversion) {
        if conversion.was_converted() {
            self.converted.push(conversion);
        } else {
            self.skipped.push(conversion);
        }
    }

    pub fn record_failure(&mut self, source: PathBuf, error: &ConversionError) {
        self.failures.push(FailureEntry {
            source,
            error: error.to_string(),
        });
    }

    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped.len() + self.failures.len()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Conversion Report ===\n");
        summary.push_str(&format!("Candidate Files: {}\n", self.total()));
        summary.push_str(&format!("Converted: {}\n", self.converted.len()));
        summary.push_str(&format!(
            "Skipped (already converted): {}\n",
            self.skipped.len()
        ));
        summary.push_str(&format!("Failed: {}\n", self.failures.len()));

        if !self.converted.is_empty() {
            summary.push_str("\nConverted Files:\n");
            for conversion in &self.converted {
                if let ConversionStatus::Converted {
                    shape,
                    bytes_written,
                    ..
                } = &conversion.status
                {
                    summary.push_str(&format!(
                        "  • {} -> {} [{}x{}x{}] ({})\n",
                        file_name(&conversion.source),
                        file_name(&conversion.output),
                        shape[0],
                        shape[1],
                        shape[2],
                        format_size(*bytes_written)
                    ));
                }
            }
        }

        if !self.failures.is_empty() {
            summary.push_str("\nFailures:\n");
            for failure in &self.failures {
                summary.push_str(&format!(
                    "  • {}: {}\n",
                    file_name(&failure.source),
                    failure.error
                ));
            }
        }

        summary
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_size(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    if mb < 0.1 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} MB", mb)
    }
}

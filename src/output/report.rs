use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::valuation::{PropertyAttributes, ValuationResult};

/// JSON document handed to report tooling: the property and its valuations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub property: PropertyAttributes,
    pub results: Vec<ValuationResult>,
}

impl ValuationReport {
    pub fn new(property: PropertyAttributes, results: Vec<ValuationResult>) -> Self {
        Self { property, results }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize valuation report")
    }
}

/// Save a report as pretty JSON, atomically
///
/// Uses atomic-write-file so readers never see a half-written report.
pub fn write_report(path: &Path, report: &ValuationReport) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize valuation report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}

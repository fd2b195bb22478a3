//! Error types for trio-triage
//!
//! Reference-table problems (known genes, syndrome regions) are fatal: a
//! run cannot proceed against a partially loaded authoritative database.
//! Per-variant problems are never fatal; they are handled where they occur
//! by skipping the offending call with a warning.

use thiserror::Error;

/// Main error type for trio-triage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriageError {
    /// A row of the known-gene table could not be parsed
    #[error("Invalid known-gene table {path} at line {line}: {reason}")]
    GeneTable {
        /// Path of the offending table
        path: String,
        /// 1-based line number
        line: usize,
        /// Explanation of the problem
        reason: String,
    },

    /// A row of the syndrome-region table could not be parsed
    #[error("Invalid syndrome-region table {path} at line {line}: {reason}")]
    RegionTable {
        /// Path of the offending table
        path: String,
        /// 1-based line number
        line: usize,
        /// Explanation of the problem
        reason: String,
    },

    /// A syndrome region with start > end
    #[error("Invalid region '{name}': start {start} is beyond end {end}")]
    InvalidRegion { name: String, start: u64, end: u64 },

    /// Family composition that violates pedigree constraints
    #[error("Invalid family: {reason}")]
    InvalidFamily { reason: String },

    /// Filter configuration outside the permitted range
    #[error("Invalid frequency threshold: {value} (must be between 0 and 1)")]
    InvalidFrequency { value: f64 },

    /// File IO error (stringified to keep the error type cloneable)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl From<std::io::Error> for TriageError {
    fn from(e: std::io::Error) -> Self {
        TriageError::Io { msg: e.to_string() }
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(e: serde_json::Error) -> Self {
        TriageError::Json { msg: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_table_display() {
        let err = TriageError::GeneTable {
            path: "genes.tsv".to_string(),
            line: 12,
            reason: "unknown inheritance mode 'Triallelic'".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("genes.tsv"));
        assert!(msg.contains("line 12"));
        assert!(msg.contains("Triallelic"));
    }

    #[test]
    fn test_invalid_region_display() {
        let err = TriageError::InvalidRegion {
            name: "1q21.1 deletion".to_string(),
            start: 500,
            end: 100,
        };
        assert!(format!("{err}").contains("start 500 is beyond end 100"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: TriageError = io.into();
        assert!(matches!(err, TriageError::Io { .. }));
    }
}

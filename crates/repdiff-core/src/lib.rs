#![forbid(unsafe_code)]

//! Parameter-set extraction + diff engine for pipeline/trigger report files.
//!
//! Two report encodings feed one shared model: free-form `.txt` reports are
//! parsed line-by-line, `.xml` exports are flattened to one synthetic line per
//! element and parsed with a second grammar. The resulting collections are
//! compared in three independent passes (top-level key presence, attribute
//! slot presence, nested value diff); every pass checks the larger *subject*
//! collection against the smaller *baseline* one.
//!
//! Design goals:
//! - deterministic output (sorted key iteration, document-ordered maps)
//! - case-insensitive matching with case-preserving reporting
//! - no process-global state; grammars are built per extraction

pub mod compare;
pub mod error;
pub mod input;
pub mod model;
pub mod report;
pub mod text;
pub mod xml;

pub use compare::{ComparisonReport, Labeled, compare_collections};
pub use error::{Error, Result};
pub use input::{ReportFormat, detect_format, load_collection};
pub use model::{HeaderVariant, ParameterCollection, ParameterSet};

use std::path::Path;

/// Routes, extracts, and compares two report files. Both files are read to
/// completion before the first pass runs; any read or parse failure aborts the
/// whole comparison with no partial result.
pub fn compare_files(path1: &Path, path2: &Path) -> Result<ComparisonReport> {
    let a = load_collection(path1)?;
    let b = load_collection(path2)?;
    let label1 = path1.display().to_string();
    let label2 = path2.display().to_string();
    Ok(compare_collections(
        Labeled {
            collection: &a,
            label: &label1,
        },
        Labeled {
            collection: &b,
            label: &label2,
        },
    ))
}

#[cfg(test)]
mod tests;

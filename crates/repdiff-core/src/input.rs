//! Format routing: picks an extractor per input path by file extension.

use crate::error::{Error, Result};
use crate::model::ParameterCollection;
use crate::text::TextGrammar;
use crate::xml::{self, XmlGrammar};
use std::fs;
use std::path::Path;

/// The two supported report encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Xml,
}

/// Matches the path suffix case-insensitively; `None` for anything that is
/// neither `.txt` nor `.xml`.
pub fn detect_format(path: &Path) -> Option<ReportFormat> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("txt") {
        Some(ReportFormat::Text)
    } else if ext.eq_ignore_ascii_case("xml") {
        Some(ReportFormat::Xml)
    } else {
        None
    }
}

/// Reads `path` to completion and extracts its parameter collection with the
/// grammar matching its format.
pub fn load_collection(path: &Path) -> Result<ParameterCollection> {
    let format = detect_format(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.display().to_string(),
        source,
    })?;

    match format {
        ReportFormat::Text => {
            let lines: Vec<&str> = contents.lines().map(str::trim).collect();
            Ok(TextGrammar::new().extract(&lines))
        }
        ReportFormat::Xml => {
            let lines = xml::flatten(&contents, &path.display().to_string())?;
            Ok(XmlGrammar::new().extract(&lines))
        }
    }
}

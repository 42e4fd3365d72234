//! Formatting helpers for finding detail text.
//!
//! Detail strings are self-contained sentences: they name the files and
//! pipelines involved via a lightweight embedded-link markup that the
//! hosting system renders as cross-references.

use crate::model::File;

/// Renders the `{label|path}` embedded-link markup.
pub fn audit_link(label: &str, path: &str) -> String {
    format!("{{{}|{}}}", label, path)
}

/// Extracts the trailing identifier from a resource path, e.g.
/// `/files/ENCFF000ABC/` becomes `ENCFF000ABC`. Answers the whole input
/// when it has no path structure.
pub fn path_to_text(path: &str) -> String {
    path.trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .to_string()
}

/// An embedded link to a resource path, labeled with its trailing
/// identifier.
pub fn link_to(path: &str) -> String {
    audit_link(&path_to_text(path), path)
}

/// An embedded link to a file, labeled with its accession when it has one.
pub fn file_link(file: &File) -> String {
    if file.accession.is_empty() {
        link_to(&file.id)
    } else {
        audit_link(&file.accession, &file.id)
    }
}

/// Formats a ratio or correlation value to exactly two decimal places, the
/// fixed precision every detail string uses for such values.
pub fn ratio(value: f64) -> String {
    format!("{:.2}", value)
}

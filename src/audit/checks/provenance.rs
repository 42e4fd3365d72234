//! File-graph provenance checks: stale or missing derivation chains, mixed
//! source read lengths, and duplicated quality metrics.
//!
//! These checks are assay-agnostic: they inspect the shape of the file
//! graph rather than any published standard, and they report structural
//! anomalies as findings rather than failing on them.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::audit::detail::file_link;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::graph;
use crate::audit::index::FileIndex;
use crate::model::File;

/// Buckets holding derived alignment files, whose derivation chains these
/// checks walk.
const ALIGNMENT_BUCKETS: &[&str] = &[
    "alignments",
    "unfiltered_alignments",
    "transcriptome_alignments",
];

/// Runs every provenance check over the file index.
pub fn check_provenance(index: &FileIndex<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for bucket in ALIGNMENT_BUCKETS {
        for file in index.files(bucket) {
            findings.extend(check_derivation(file, index));
            findings.extend(check_source_read_lengths(file, index));
        }
    }

    for file in index.originals() {
        findings.extend(check_duplicate_metrics(file));
    }

    findings
}

/// A derived file must name its inputs, and those inputs must still be part
/// of the dataset; a chain into removed files marks the processing run as
/// out of date.
fn check_derivation(file: &File, index: &FileIndex<'_>) -> Option<Finding> {
    if file.derived_from.is_empty() {
        return Some(Finding::new(
            "missing derived_from",
            format!(
                "Alignment file {} does not record the files it was derived \
                 from.",
                file_link(file)
            ),
            Level::InternalAction,
        ));
    }
    if graph::has_stale_derivation(file, index) {
        return Some(Finding::new(
            "out of date analysis",
            format!(
                "Alignment file {} was derived from files that are no \
                 longer part of this dataset; its analysis is out of date.",
                file_link(file)
            ),
            Level::InternalAction,
        ));
    }
    None
}

/// Sequencing runs of differing read length feeding one alignment skew
/// mapping statistics.
fn check_source_read_lengths(file: &File, index: &FileIndex<'_>) -> Option<Finding> {
    let lengths = graph::source_read_lengths(file, index);
    if lengths.len() > 1 {
        return Some(Finding::new(
            "mixed read lengths",
            format!(
                "Alignment file {} was mapped from sequencing runs of \
                 differing read lengths ({}).",
                file_link(file),
                lengths.iter().join(", "),
            ),
            Level::Warning,
        ));
    }
    None
}

/// More than one metric of the same type and processing stage on one file is
/// ambiguous: checks would not know which one to believe.
fn check_duplicate_metrics(file: &File) -> Vec<Finding> {
    let mut counts: IndexMap<(&str, &str), usize> = IndexMap::new();
    for metric in &file.quality_metrics {
        let tag = match metric.kind.first() {
            Some(tag) => tag.as_str(),
            None => continue,
        };
        let stage = metric.processing_stage.as_deref().unwrap_or("");
        *counts.entry((tag, stage)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((tag, _), count)| {
            Finding::new(
                "duplicate quality metrics",
                format!(
                    "File {} carries {} metrics of type {}; at most one was \
                     expected, so the values are ambiguous.",
                    file_link(file),
                    count,
                    tag,
                ),
                Level::Error,
            )
        })
        .collect()
}

//! The analysis-level audit: registration table, gates, and the
//! accumulator.

use tracing::debug;

use crate::audit::checks::atac_seq;
use crate::audit::checks::provenance;
use crate::audit::finding::Finding;
use crate::audit::index::FileIndex;
use crate::audit::index::ANALYSIS_BUCKETS;
use crate::model::Analysis;

/// A registered analysis-level check.
pub struct AnalysisCheck {
    /// Name of the check, for listings.
    pub name: &'static str,

    /// The check itself.
    pub run: fn(&Analysis, &FileIndex<'_>) -> Vec<Finding>,
}

fn check_analysis_standards(analysis: &Analysis, index: &FileIndex<'_>) -> Vec<Finding> {
    // One dataset and one pipeline generation per analysis: multi-dataset
    // or mixed-award analyses are skipped outright rather than audited
    // against an arbitrary member.
    if analysis.sole_dataset().is_none() {
        return Vec::new();
    }
    if !analysis.pipeline_award_rfas.is_empty() && analysis.sole_pipeline_rfa().is_none() {
        return Vec::new();
    }
    atac_seq::check_standards(analysis, index)
}

fn check_analysis_provenance(_analysis: &Analysis, index: &FileIndex<'_>) -> Vec<Finding> {
    provenance::check_provenance(index)
}

/// Analysis-level checks, in registration order.
pub const ANALYSIS_CHECKS: &[AnalysisCheck] = &[
    AnalysisCheck {
        name: "assay standards",
        run: check_analysis_standards,
    },
    AnalysisCheck {
        name: "file provenance",
        run: check_analysis_provenance,
    },
];

/// Audits one analysis.
///
/// The index is built over the analysis's own files; the files of its
/// datasets resolve derivation references without being bucketed, so a
/// processing chain reaching back into raw experiment files is not reported
/// as stale.
pub fn audit_analysis(analysis: &Analysis) -> Vec<Finding> {
    let contributed = analysis
        .datasets
        .iter()
        .flat_map(|dataset| {
            dataset
                .original_files
                .iter()
                .chain(dataset.contributing_files.iter())
        });
    let index = FileIndex::build(&analysis.files, contributed, &ANALYSIS_BUCKETS);

    let mut findings = Vec::new();
    for check in ANALYSIS_CHECKS {
        let before = findings.len();
        findings.extend((check.run)(analysis, &index));
        debug!(
            "  [*] {}: {} finding(s)",
            check.name,
            findings.len() - before
        );
    }
    findings
}

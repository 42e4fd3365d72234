//! DNase-seq data standards: SPOT1 enrichment, read depth, and signal
//! concordance.

use crate::audit::checks::concordance;
use crate::audit::checks::flagstat_mapped;
use crate::audit::detail::file_link;
use crate::audit::detail::ratio;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::index::FileIndex;
use crate::audit::metrics::file_metrics_of_type;
use crate::audit::metrics::metrics_of_type;
use crate::audit::standards;
use crate::audit::standards::pipelines;
use crate::audit::thresholds::Call;
use crate::model::Experiment;

/// Runs the DNase-seq standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "DNase-seq" {
        return Vec::new();
    }

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&[pipelines::DNASE]) {
            continue;
        }

        match flagstat_mapped(file) {
            None => findings.push(Finding::new(
                "missing read depth",
                format!(
                    "Alignment file {} has no read depth information.",
                    file_link(file)
                ),
                Level::InternalAction,
            )),
            Some(depth) => {
                let (category, level) = match standards::DNASE_DEPTH.classify(depth) {
                    Call::Critical => ("extremely low read depth", Level::Error),
                    Call::Poor => ("insufficient read depth", Level::NotCompliant),
                    Call::Marginal => ("low read depth", Level::Warning),
                    Call::Pass => continue,
                };
                findings.push(Finding::new(
                    category,
                    format!(
                        "Alignment file {} has {} mapped reads. DNase-seq \
                         experiments require at least {} mapped reads per \
                         replicate; {} or more is recommended.",
                        file_link(file),
                        depth as u64,
                        standards::DNASE_DEPTH.poor as u64,
                        standards::DNASE_DEPTH.marginal as u64,
                    ),
                    level,
                ));
            }
        }

        // SPOT1 is attached to the alignments the hotspot caller ran over.
        for metric in file_metrics_of_type(file, "HotspotQualityMetric") {
            match metric.number("SPOT1 score") {
                None => findings.push(Finding::new(
                    "missing spot score",
                    format!(
                        "Alignment file {} has a hotspot metric with no \
                         SPOT1 score.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                )),
                Some(spot) => {
                    let (category, level) = match standards::SPOT1.classify(spot) {
                        Call::Critical => ("extremely low spot score", Level::Error),
                        Call::Poor => ("insufficient spot score", Level::NotCompliant),
                        Call::Marginal => ("low spot score", Level::Warning),
                        Call::Pass => continue,
                    };
                    findings.push(Finding::new(
                        category,
                        format!(
                            "SPOT1 score of alignment file {} is {}. A SPOT1 \
                             score of {} or higher is recommended for \
                             DNase-seq.",
                            file_link(file),
                            ratio(spot),
                            ratio(standards::SPOT1.marginal),
                        ),
                        level,
                    ));
                }
            }
        }
    }

    if experiment.is_replicated() {
        let correlations = metrics_of_type(
            index.files("signal"),
            "CorrelationQualityMetric",
            None,
            None,
        );
        findings.extend(concordance::check_correlation(
            &correlations,
            "Pearson correlation",
            experiment.replication_type.as_deref(),
            "insufficient replicate concordance",
            Level::NotCompliant,
        ));
    }

    findings
}

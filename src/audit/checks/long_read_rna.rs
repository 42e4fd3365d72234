//! Long read RNA-seq data standards: mapped-read depth, genes detected, and
//! quantification concordance.

use crate::audit::checks::concordance;
use crate::audit::detail::file_link;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::index::FileIndex;
use crate::audit::metrics::file_metrics_of_type;
use crate::audit::metrics::metrics_of_type;
use crate::audit::standards;
use crate::audit::standards::pipelines;
use crate::audit::thresholds::Call;
use crate::model::Experiment;

/// Runs the long read RNA-seq standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "long read RNA-seq" {
        return Vec::new();
    }

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&[pipelines::LONG_READ_RNA]) {
            continue;
        }

        for metric in file_metrics_of_type(file, "LongReadRnaMappingQualityMetric") {
            match metric.number("mapped_reads") {
                None => findings.push(Finding::new(
                    "missing read depth",
                    format!(
                        "Alignment file {} has a mapping metric with no \
                         mapped-read count.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                )),
                Some(depth) => {
                    let (category, level) =
                        match standards::LONG_READ_RNA_DEPTH.classify(depth) {
                            Call::Critical | Call::Poor => {
                                ("insufficient read depth", Level::NotCompliant)
                            }
                            Call::Marginal => ("low read depth", Level::Warning),
                            Call::Pass => continue,
                        };
                    findings.push(Finding::new(
                        category,
                        format!(
                            "Alignment file {} has {} full-length mapped \
                             reads. Long read RNA-seq experiments require at \
                             least {} mapped reads per replicate; {} or more \
                             is recommended.",
                            file_link(file),
                            depth as u64,
                            standards::LONG_READ_RNA_DEPTH.poor as u64,
                            standards::LONG_READ_RNA_DEPTH.marginal as u64,
                        ),
                        level,
                    ));
                }
            }
        }
    }

    for file in index.files("transcript_quantifications") {
        for metric in file_metrics_of_type(file, "LongReadRnaQuantificationQualityMetric") {
            let genes = match metric.number("genes_detected") {
                Some(genes) => genes,
                None => continue,
            };
            let (category, level) = match standards::LONG_READ_GENES_DETECTED.classify(genes) {
                Call::Critical | Call::Poor => ("insufficient genes detected", Level::NotCompliant),
                Call::Marginal => ("low genes detected", Level::Warning),
                Call::Pass => continue,
            };
            findings.push(Finding::new(
                category,
                format!(
                    "Quantification file {} detects {} genes; at least {} \
                     is required and {} or more is recommended for long \
                     read RNA-seq.",
                    file_link(file),
                    genes as u64,
                    standards::LONG_READ_GENES_DETECTED.poor as u64,
                    standards::LONG_READ_GENES_DETECTED.marginal as u64,
                ),
                level,
            ));
        }
    }

    if experiment.is_replicated() {
        let correlations = metrics_of_type(
            index.files("transcript_quantifications"),
            "CorrelationQualityMetric",
            None,
            None,
        );
        findings.extend(concordance::check_correlation(
            &correlations,
            "Spearman correlation",
            experiment.replication_type.as_deref(),
            "low replicate concordance",
            Level::Warning,
        ));
    }

    findings
}

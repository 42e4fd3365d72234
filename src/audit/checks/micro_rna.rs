//! microRNA-seq data standards: aligned-read depth, expressed microRNA
//! counts, and quantification concordance.

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

/// Runs the microRNA-seq standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "microRNA-seq" {
        return Vec::new();
    }

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&[pipelines::MICRO_RNA]) {
            continue;
        }

        for metric in file_metrics_of_type(file, "MicroRnaMappingQualityMetric") {
            match metric.number("aligned_reads") {
                None => findings.push(Finding::new(
                    "missing read depth",
                    format!(
                        "Alignment file {} has a mapping metric with no \
                         aligned-read count.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                )),
                Some(depth) => {
                    let (category, level) = match standards::MICRO_RNA_DEPTH.classify(depth) {
                        Call::Critical | Call::Poor => {
                            ("insufficient read depth", Level::NotCompliant)
                        }
                        Call::Marginal => ("low read depth", Level::Warning),
                        Call::Pass => continue,
                    };
                    findings.push(Finding::new(
                        category,
                        format!(
                            "Alignment file {} has {} aligned reads. \
                             microRNA-seq experiments require at least {} \
                             aligned reads per replicate; {} or more is \
                             recommended.",
                            file_link(file),
                            depth as u64,
                            standards::MICRO_RNA_DEPTH.poor as u64,
                            standards::MICRO_RNA_DEPTH.marginal as u64,
                        ),
                        level,
                    ));
                }
            }
        }
    }

    for file in index.files("micro_rna_quantifications") {
        for metric in file_metrics_of_type(file, "MicroRnaQuantificationQualityMetric") {
            match metric.number("expressed_mirnas") {
                None => findings.push(Finding::new(
                    "missing microRNA quantifications",
                    format!(
                        "Quantification file {} has a quantification metric \
                         with no expressed-microRNA count.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                )),
                Some(expressed) => {
                    let (category, level) =
                        match standards::MICRO_RNA_EXPRESSED.classify(expressed) {
                            Call::Critical | Call::Poor => {
                                ("insufficient microRNAs expressed", Level::NotCompliant)
                            }
                            Call::Marginal => ("low microRNAs expressed", Level::Warning),
                            Call::Pass => continue,
                        };
                    findings.push(Finding::new(
                        category,
                        format!(
                            "Quantification file {} detects {} expressed \
                             microRNAs; at least {} is required and {} or \
                             more is recommended.",
                            file_link(file),
                            expressed as u64,
                            standards::MICRO_RNA_EXPRESSED.poor as u64,
                            standards::MICRO_RNA_EXPRESSED.marginal as u64,
                        ),
                        level,
                    ));
                }
            }
        }
    }

    if experiment.is_replicated() {
        let correlations = metrics_of_type(
            index.files("micro_rna_quantifications"),
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

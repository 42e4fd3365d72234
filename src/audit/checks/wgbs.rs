//! Whole-genome bisulfite sequencing standards: genome-wide coverage,
//! lambda conversion efficiency, and CpG methylation concordance.

use crate::audit::checks::concordance;
use crate::audit::checks::flagstat_mapped;
use crate::audit::detail::file_link;
use crate::audit::detail::ratio;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::graph;
use crate::audit::index::FileIndex;
use crate::audit::metrics::file_metrics_of_type;
use crate::audit::metrics::metrics_of_type;
use crate::audit::standards;
use crate::audit::standards::pipelines;
use crate::audit::thresholds::Call;
use crate::model::Experiment;

/// Runs the WGBS standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "whole-genome shotgun bisulfite sequencing" {
        return Vec::new();
    }

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&[pipelines::WGBS]) {
            continue;
        }

        // Coverage = mapped reads x read length / effective genome size.
        // The read length comes from the sequencing runs one hop upstream;
        // when they disagree the largest is used here and the disagreement
        // itself is reported by the mixed-read-length provenance check.
        let mapped = match flagstat_mapped(file) {
            Some(mapped) => mapped,
            None => {
                findings.push(Finding::new(
                    "missing read depth",
                    format!(
                        "Alignment file {} has no read depth information.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                ));
                continue;
            }
        };
        let read_length = graph::source_read_lengths(file, index).into_iter().max();
        let genome_size = file
            .assembly
            .as_deref()
            .and_then(standards::genome_size);
        let (read_length, genome_size) = match (read_length, genome_size) {
            (Some(read_length), Some(genome_size)) => (read_length, genome_size),
            _ => {
                findings.push(Finding::new(
                    "missing coverage information",
                    format!(
                        "Coverage of alignment file {} cannot be computed: \
                         the source read length or the assembly genome size \
                         is unknown.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                ));
                continue;
            }
        };

        let coverage = mapped * read_length as f64 / genome_size;
        let (category, level) = match standards::WGBS_COVERAGE.classify(coverage) {
            Call::Critical => ("extremely low coverage", Level::Error),
            Call::Poor => ("insufficient coverage", Level::NotCompliant),
            Call::Marginal => ("low coverage", Level::Warning),
            Call::Pass => continue,
        };
        findings.push(Finding::new(
            category,
            format!(
                "Alignment file {} has {}X genome-wide coverage ({} mapped \
                 reads of length {}). WGBS experiments require at least \
                 {}X coverage; {}X or more is recommended.",
                file_link(file),
                ratio(coverage),
                mapped as u64,
                read_length,
                standards::WGBS_COVERAGE.poor as u64,
                standards::WGBS_COVERAGE.marginal as u64,
            ),
            level,
        ));
    }

    for file in index.files("cpg_quantifications") {
        for metric in file_metrics_of_type(file, "BismarkQualityMetric") {
            let conversion = match metric.number("lambda C conversion rate") {
                Some(rate) => rate,
                None => continue,
            };
            if conversion < standards::WGBS_LAMBDA_CONVERSION_MINIMUM {
                findings.push(Finding::new(
                    "insufficient C-to-T conversion",
                    format!(
                        "Lambda C conversion rate of {} is {}%; bisulfite \
                         conversion of at least {}% is required.",
                        file_link(file),
                        ratio(conversion),
                        standards::WGBS_LAMBDA_CONVERSION_MINIMUM as u64,
                    ),
                    Level::NotCompliant,
                ));
            }
        }
    }

    if experiment.is_replicated() {
        let correlations = metrics_of_type(
            index.files("cpg_quantifications"),
            "CpgCorrelationQualityMetric",
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

//! Bulk RNA-seq family data standards: star-aligned read depth per assay
//! variant and quantification concordance.

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
use crate::audit::thresholds::Cutoffs;
use crate::model::Experiment;
use crate::model::File;

/// Long-RNA assay variants held to the deep-sequencing table.
const LONG_RNA_ASSAYS: &[&str] = &["RNA-seq", "polyA plus RNA-seq", "polyA minus RNA-seq"];

/// Knockdown-followed variants: shallower sequencing is the published
/// standard because the contrast, not the catalog, is the point.
const KNOCKDOWN_ASSAYS: &[&str] = &[
    "shRNA knockdown followed by RNA-seq",
    "siRNA knockdown followed by RNA-seq",
    "CRISPR genome editing followed by RNA-seq",
    "CRISPRi followed by RNA-seq",
];

/// 5'-end assays.
const FIVE_PRIME_ASSAYS: &[&str] = &["RAMPAGE", "CAGE"];

/// The depth table and recognized pipelines for an assay term, when the
/// bulk RNA standards cover it.
fn assay_profile(assay_term_name: &str) -> Option<(Cutoffs, Vec<&'static str>)> {
    if LONG_RNA_ASSAYS.contains(&assay_term_name) {
        Some((standards::LONG_RNA_DEPTH, pipelines::LONG_RNA.to_vec()))
    } else if KNOCKDOWN_ASSAYS.contains(&assay_term_name) {
        Some((standards::KNOCKDOWN_RNA_DEPTH, pipelines::LONG_RNA.to_vec()))
    } else if FIVE_PRIME_ASSAYS.contains(&assay_term_name) {
        Some((standards::RAMPAGE_DEPTH, vec![pipelines::RAMPAGE]))
    } else if assay_term_name == "small RNA-seq" {
        Some((standards::SMALL_RNA_DEPTH, vec![pipelines::SMALL_RNA]))
    } else {
        None
    }
}

/// Runs the bulk RNA-seq standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    let (depth_standard, recognized_pipelines) = match assay_profile(&experiment.assay_term_name) {
        Some(profile) => profile,
        None => return Vec::new(),
    };

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&recognized_pipelines) {
            continue;
        }
        findings.extend(check_star_depth(file, depth_standard, experiment));
    }

    if experiment.is_replicated() {
        let correlations = metrics_of_type(
            index.files("gene_quantifications"),
            "MadQualityMetric",
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

/// Star-aligned depth: uniquely mapped reads plus multi-mapped reads. A
/// star metric without the uniquely-mapped count cannot be evaluated and
/// becomes an internal follow-up.
fn check_star_depth(
    file: &File,
    cutoffs: Cutoffs,
    experiment: &Experiment,
) -> Option<Finding> {
    let star_metrics = file_metrics_of_type(file, "StarQualityMetric");
    if star_metrics.is_empty() {
        return Some(Finding::new(
            "missing read depth",
            format!(
                "Alignment file {} has no read depth information.",
                file_link(file)
            ),
            Level::InternalAction,
        ));
    }

    let metric = star_metrics[0];
    let uniquely = match metric.number("Uniquely mapped reads number") {
        Some(value) => value,
        None => {
            return Some(Finding::new(
                "missing read depth",
                format!(
                    "Alignment file {} has a STAR metric with no uniquely \
                     mapped read count.",
                    file_link(file)
                ),
                Level::InternalAction,
            ))
        }
    };
    let multi = metric
        .number("Number of reads mapped to multiple loci")
        .unwrap_or(0.0);
    let depth = uniquely + multi;

    let (category, level) = match cutoffs.classify(depth) {
        Call::Critical | Call::Poor => ("insufficient read depth", Level::NotCompliant),
        Call::Marginal => ("low read depth", Level::Warning),
        Call::Pass => return None,
    };

    Some(Finding::new(
        category,
        format!(
            "Alignment file {} has {} aligned reads (uniquely mapped plus \
             multi-mapped). {} experiments require at least {} aligned \
             reads per replicate; {} or more is recommended.",
            file_link(file),
            depth as u64,
            experiment.assay_term_name,
            cutoffs.poor as u64,
            cutoffs.marginal as u64,
        ),
        level,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::index::EXPERIMENT_BUCKETS;
    use crate::model::QualityMetric;
    use serde_json::json;

    fn star_metric(uniquely: u64, multi: u64) -> QualityMetric {
        let mut metric: QualityMetric = serde_json::from_value(json!({
            "Uniquely mapped reads number": uniquely,
            "Number of reads mapped to multiple loci": multi
        }))
        .unwrap();
        metric.kind = vec![String::from("StarQualityMetric")];
        metric.uuid = format!("star-{}", uniquely);
        metric
    }

    fn aligned_with(metrics: Vec<QualityMetric>) -> File {
        File {
            id: String::from("/files/ENCFF000RNA/"),
            accession: String::from("ENCFF000RNA"),
            status: String::from("released"),
            file_format: String::from("bam"),
            output_type: String::from("alignments"),
            quality_metrics: metrics,
            ..Default::default()
        }
    }

    fn experiment(assay: &str, files: Vec<File>) -> Experiment {
        Experiment {
            assay_term_name: String::from(assay),
            original_files: files,
            ..Default::default()
        }
    }

    fn findings_of(experiment: &Experiment) -> Vec<Finding> {
        let index = FileIndex::build(&experiment.original_files, &[], &EXPERIMENT_BUCKETS);
        check_standards(experiment, &index)
    }

    #[test]
    fn test_depth_table_varies_by_assay_variant() {
        // 12M aligned reads: insufficient for long RNA (minimum 20M), but
        // passing for a knockdown variant (recommendation 10M).
        let files = vec![aligned_with(vec![star_metric(10_000_000, 2_000_000)])];
        let long = experiment("RNA-seq", files.clone());
        let findings = findings_of(&long);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "insufficient read depth");
        assert_eq!(findings[0].level, Level::NotCompliant);
        assert!(findings[0].detail.contains("12000000"));

        let knockdown = experiment("shRNA knockdown followed by RNA-seq", files);
        assert!(findings_of(&knockdown).is_empty());
    }

    #[test]
    fn test_missing_star_metric_is_internal_follow_up() {
        let e = experiment("RAMPAGE", vec![aligned_with(vec![])]);
        let findings = findings_of(&e);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "missing read depth");
        assert_eq!(findings[0].level, Level::InternalAction);
    }

    #[test]
    fn test_spearman_concordance_on_gene_quantifications() {
        let mut quantification = File {
            id: String::from("/files/ENCFF000TSV/"),
            accession: String::from("ENCFF000TSV"),
            status: String::from("released"),
            file_format: String::from("tsv"),
            output_type: String::from("gene quantifications"),
            ..Default::default()
        };
        let mut metric: QualityMetric =
            serde_json::from_value(json!({ "Spearman correlation": 0.82 })).unwrap();
        metric.kind = vec![String::from("MadQualityMetric")];
        metric.uuid = String::from("u-mad");
        quantification.quality_metrics = vec![metric];

        let mut e = experiment("RNA-seq", vec![quantification]);
        e.replication_type = Some(String::from("isogenic"));
        let findings = findings_of(&e);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low replicate concordance");
        assert_eq!(findings[0].level, Level::Warning);

        // Unknown replication structure switches the check off entirely.
        e.replication_type = None;
        assert!(findings_of(&e).is_empty());
    }

    #[test]
    fn test_uncovered_assays_are_inapplicable() {
        let e = experiment("microRNA-seq", vec![aligned_with(vec![star_metric(1, 0)])]);
        assert!(findings_of(&e).is_empty());
    }
}

//! ATAC-seq data standards, evaluated at the analysis level: usable-fragment
//! depth, TSS enrichment by assembly, library complexity, peak enrichment,
//! and replicate concordance.

use crate::audit::checks::concordance;
use crate::audit::checks::library;
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
use crate::model::Analysis;
use crate::model::File;

/// Runs the ATAC-seq standards over an analysis.
pub fn check_standards(analysis: &Analysis, index: &FileIndex<'_>) -> Vec<Finding> {
    let dataset = match analysis.sole_dataset() {
        Some(dataset) => dataset,
        None => return Vec::new(),
    };
    let assay = if analysis.assay_term_name.is_empty() {
        dataset.assay_term_name.as_str()
    } else {
        analysis.assay_term_name.as_str()
    };
    if assay != "ATAC-seq" {
        return Vec::new();
    }
    if !analysis.pipelines.is_empty()
        && !analysis
            .pipelines
            .iter()
            .any(|pipeline| pipelines::ATAC.contains(&pipeline.title.as_str()))
    {
        return Vec::new();
    }

    let mut findings = Vec::new();
    let alignments: Vec<&File> = index.files("alignments").collect();

    for file in &alignments {
        for metric in file_metrics_of_type(file, "AtacAlignmentQualityMetric") {
            match metric.number("usable_fragments") {
                None => findings.push(Finding::new(
                    "missing read depth",
                    format!(
                        "Alignment file {} has an alignment metric with no \
                         usable-fragment count.",
                        file_link(file)
                    ),
                    Level::InternalAction,
                )),
                Some(depth) => {
                    let (category, level) = match standards::ATAC_DEPTH.classify(depth) {
                        Call::Critical | Call::Poor => {
                            ("insufficient read depth", Level::NotCompliant)
                        }
                        Call::Marginal => ("low read depth", Level::Warning),
                        Call::Pass => continue,
                    };
                    findings.push(Finding::new(
                        category,
                        format!(
                            "Alignment file {} has {} usable fragments. \
                             ATAC-seq experiments require at least {} usable \
                             fragments per replicate; {} or more is \
                             recommended.",
                            file_link(file),
                            depth as u64,
                            standards::ATAC_DEPTH.poor as u64,
                            standards::ATAC_DEPTH.marginal as u64,
                        ),
                        level,
                    ));
                }
            }
        }

        findings.extend(check_tss_enrichment(file, analysis));
    }

    findings.extend(library::check_complexity(
        &alignments,
        "AtacLibraryQualityMetric",
    ));

    // The most recent PBC1 observed on the library metrics, carried into the
    // peak enrichment evaluation below.
    let pbc1 = metrics_of_type(
        alignments.iter().copied(),
        "AtacLibraryQualityMetric",
        None,
        None,
    )
    .iter()
    .rev()
    .find_map(|metric| metric.number("PBC1"));

    let default_peaks: Vec<&File> = index
        .files("preferred_default_idr_peaks")
        .filter(|file| file.preferred_default)
        .collect();

    for file in &default_peaks {
        for metric in file_metrics_of_type(file, "AtacPeakEnrichmentQualityMetric") {
            let frip = match metric.number("frip") {
                Some(frip) => frip,
                None => continue,
            };
            // TODO: confirm with the standards owners whether this gate
            // should read `frip`; the production comparison tests the PBC1
            // value carried over from the library metrics above, and the
            // two must stay in lockstep until that is adjudicated.
            let gate = pbc1.unwrap_or(frip);
            if gate < standards::ATAC_FRIP_MINIMUM {
                findings.push(Finding::new(
                    "low FRiP score",
                    format!(
                        "Fraction of reads in peaks for file {} is {}; a \
                         FRiP of {} or higher is expected for ATAC-seq.",
                        file_link(file),
                        ratio(frip),
                        ratio(standards::ATAC_FRIP_MINIMUM),
                    ),
                    Level::Warning,
                ));
            }
        }
    }

    if dataset.is_replicated() {
        let replication_metrics = metrics_of_type(
            default_peaks.iter().copied(),
            "AtacReplicationQualityMetric",
            None,
            None,
        );
        findings.extend(concordance::check_idr_ratios(&replication_metrics));
    }

    findings
}

/// TSS enrichment, judged against the assembly-specific bands. Files mapped
/// to an assembly without published bands are skipped.
fn check_tss_enrichment(file: &File, analysis: &Analysis) -> Vec<Finding> {
    let assembly = match file.assembly.as_deref().or(analysis.assembly.as_deref()) {
        Some(assembly) => assembly,
        None => return Vec::new(),
    };
    let cutoffs = match standards::tss_enrichment_standard(assembly) {
        Some(cutoffs) => cutoffs,
        None => return Vec::new(),
    };

    let mut findings = Vec::new();
    for metric in file_metrics_of_type(file, "AtacAlignmentEnrichmentQualityMetric") {
        let tss = match metric.number("tss_enrichment") {
            Some(tss) => tss,
            None => continue,
        };
        let (category, level) = match cutoffs.classify(tss) {
            Call::Critical | Call::Poor => ("insufficient TSS enrichment", Level::NotCompliant),
            Call::Marginal => ("low TSS enrichment", Level::Warning),
            Call::Pass => continue,
        };
        findings.push(Finding::new(
            category,
            format!(
                "TSS enrichment of alignment file {} is {} on {}; at least \
                 {} is required and {} or more is recommended for that \
                 assembly.",
                file_link(file),
                ratio(tss),
                assembly,
                ratio(cutoffs.poor),
                ratio(cutoffs.marginal),
            ),
            level,
        ));
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::index::ANALYSIS_BUCKETS;
    use crate::model::Experiment;
    use crate::model::Pipeline;
    use crate::model::QualityMetric;
    use serde_json::json;

    fn metric(tag: &str, uuid: &str, values: serde_json::Value) -> QualityMetric {
        let mut metric: QualityMetric = serde_json::from_value(values).unwrap();
        metric.kind = vec![String::from(tag)];
        metric.uuid = String::from(uuid);
        metric
    }

    fn atac_analysis(files: Vec<File>) -> Analysis {
        Analysis {
            assay_term_name: String::from("ATAC-seq"),
            datasets: vec![Experiment {
                assay_term_name: String::from("ATAC-seq"),
                replication_type: Some(String::from("isogenic")),
                ..Default::default()
            }],
            pipelines: vec![Pipeline {
                title: String::from("ATAC-seq (replicated)"),
                ..Default::default()
            }],
            files,
            ..Default::default()
        }
    }

    fn findings_of(analysis: &Analysis) -> Vec<Finding> {
        let index = FileIndex::build(&analysis.files, &[], &ANALYSIS_BUCKETS);
        check_standards(analysis, &index)
    }

    fn alignment(assembly: &str, metrics: Vec<QualityMetric>) -> File {
        File {
            id: String::from("/files/ENCFF000ATC/"),
            accession: String::from("ENCFF000ATC"),
            status: String::from("released"),
            file_format: String::from("bam"),
            output_type: String::from("alignments"),
            assembly: Some(String::from(assembly)),
            quality_metrics: metrics,
            ..Default::default()
        }
    }

    #[test]
    fn test_tss_enrichment_cutoffs_differ_by_assembly() {
        // 8.0 passes the human bands (5/7) but misses the mouse minimum (10).
        let enrichment = metric(
            "AtacAlignmentEnrichmentQualityMetric",
            "u-tss",
            json!({ "tss_enrichment": 8.0 }),
        );

        let human = atac_analysis(vec![alignment("GRCh38", vec![enrichment.clone()])]);
        assert!(findings_of(&human).is_empty());

        let mouse = atac_analysis(vec![alignment("mm10", vec![enrichment])]);
        let findings = findings_of(&mouse);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "insufficient TSS enrichment");
        assert_eq!(findings[0].level, Level::NotCompliant);
    }

    #[test]
    fn test_usable_fragment_depth() {
        let depth = metric(
            "AtacAlignmentQualityMetric",
            "u-depth",
            json!({ "usable_fragments": 30_000_000 }),
        );
        let analysis = atac_analysis(vec![alignment("GRCh38", vec![depth])]);
        let findings = findings_of(&analysis);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low read depth");
        assert_eq!(findings[0].level, Level::Warning);
    }

    #[test]
    fn test_multi_dataset_analyses_are_skipped() {
        let mut analysis = atac_analysis(vec![]);
        analysis.datasets.push(Experiment::default());
        assert!(findings_of(&analysis).is_empty());
    }

    #[test]
    fn test_replication_metrics_on_default_peaks() {
        let mut peaks = File {
            id: String::from("/files/ENCFF000PKS/"),
            accession: String::from("ENCFF000PKS"),
            status: String::from("released"),
            file_format: String::from("bed"),
            output_type: String::from("IDR thresholded peaks"),
            preferred_default: true,
            ..Default::default()
        };
        peaks.quality_metrics = vec![metric(
            "AtacReplicationQualityMetric",
            "u-rep",
            json!({ "rescue_ratio": 2.5, "self_consistency_ratio": 2.5 }),
        )];
        let analysis = atac_analysis(vec![peaks]);
        let findings = findings_of(&analysis);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "insufficient replicate concordance");
        assert_eq!(findings[0].level, Level::NotCompliant);
    }

    #[test]
    fn test_non_default_peak_files_are_not_judged() {
        let mut peaks = File {
            id: String::from("/files/ENCFF000PKS/"),
            accession: String::from("ENCFF000PKS"),
            status: String::from("released"),
            file_format: String::from("bed"),
            output_type: String::from("IDR thresholded peaks"),
            preferred_default: false,
            ..Default::default()
        };
        peaks.quality_metrics = vec![metric(
            "AtacReplicationQualityMetric",
            "u-rep",
            json!({ "rescue_ratio": 2.5, "self_consistency_ratio": 2.5 }),
        )];
        let analysis = atac_analysis(vec![peaks]);
        assert!(findings_of(&analysis).is_empty());
    }

    #[test]
    fn test_frip_gate_carries_the_library_coefficient() {
        // The library metric reports a passing PBC1, so the peak enrichment
        // gate does not fire even though the FRiP value itself is below the
        // minimum. This mirrors the production comparison; see the TODO at
        // the gate.
        let lib = metric("AtacLibraryQualityMetric", "u-lib", json!({ "PBC1": 0.95 }));
        let mut peaks = File {
            id: String::from("/files/ENCFF000PKS/"),
            accession: String::from("ENCFF000PKS"),
            status: String::from("released"),
            file_format: String::from("bed"),
            output_type: String::from("IDR thresholded peaks"),
            preferred_default: true,
            ..Default::default()
        };
        peaks.quality_metrics = vec![metric(
            "AtacPeakEnrichmentQualityMetric",
            "u-frip",
            json!({ "frip": 0.1 }),
        )];
        let analysis = atac_analysis(vec![alignment("GRCh38", vec![lib]), peaks]);
        assert!(findings_of(&analysis).is_empty());

        // Without a library metric the gate falls back to the FRiP value.
        let mut peaks = File {
            id: String::from("/files/ENCFF000PKS/"),
            accession: String::from("ENCFF000PKS"),
            status: String::from("released"),
            file_format: String::from("bed"),
            output_type: String::from("IDR thresholded peaks"),
            preferred_default: true,
            ..Default::default()
        };
        peaks.quality_metrics = vec![metric(
            "AtacPeakEnrichmentQualityMetric",
            "u-frip",
            json!({ "frip": 0.1 }),
        )];
        let analysis = atac_analysis(vec![peaks]);
        let findings = findings_of(&analysis);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low FRiP score");
        assert!(findings[0].detail.contains("0.10"));
    }
}

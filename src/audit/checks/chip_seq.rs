//! ChIP-seq data standards: read depth by target class, library complexity,
//! and replicate concordance.

use crate::audit::checks::concordance;
use crate::audit::checks::flagstat_mapped;
use crate::audit::checks::library;
use crate::audit::detail::file_link;
use crate::audit::detail::link_to;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::graph;
use crate::audit::index::FileIndex;
use crate::audit::metrics::metrics_of_type;
use crate::audit::standards;
use crate::audit::standards::pipelines;
use crate::audit::standards::TargetClass;
use crate::audit::thresholds::Call;
use crate::audit::thresholds::Cutoffs;
use crate::model::Experiment;
use crate::model::File;

/// Pipelines whose alignment files these standards apply to. Files from the
/// legacy raw-mapping pipeline are judged on mapped reads (the pipeline does
/// not filter); files from the filtered pipelines are judged on usable
/// fragments.
const CHIP_PIPELINES: &[&str] = &[
    pipelines::RAW_MAPPING,
    pipelines::HISTONE_CHIP,
    pipelines::TF_CHIP,
];

/// Runs the ChIP-seq standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "ChIP-seq" {
        return Vec::new();
    }
    let target = match &experiment.target {
        Some(target) => target,
        None => return Vec::new(),
    };
    let class = match standards::target_class(target) {
        Some(class) => class,
        None => return Vec::new(),
    };

    let mut findings = Vec::new();

    if standards::UNFILTERED_DEPTH_TARGETS.contains(&target.name.as_str()) {
        // Exception list: these broad marks lose a large share of reads to
        // filtering over repetitive regions, so depth is judged on mapped
        // reads of the unfiltered alignments against the broad-mark table.
        for file in index.files("unfiltered_alignments") {
            findings.extend(check_depth(
                flagstat_mapped(file),
                standards::BROAD_MARK_DEPTH,
                "mapped reads",
                file,
                &target.name,
                class,
            ));
        }
    } else {
        for file in index.files("alignments") {
            let titles = file.pipeline_titles();
            // Judge each file against its own pipeline: a legacy experiment
            // can carry alignments from two pipeline generations, and one
            // out-of-scope file must not silence the others.
            if !titles.is_empty() && !file.produced_by_any(CHIP_PIPELINES) {
                continue;
            }

            let raw_mapping_only = file.produced_by_any(&[pipelines::RAW_MAPPING])
                && !file.produced_by_any(&[pipelines::HISTONE_CHIP, pipelines::TF_CHIP]);

            let (depth, noun) = if raw_mapping_only {
                (flagstat_mapped(file), "mapped reads")
            } else {
                (usable_fragments(file, index), "usable fragments")
            };

            findings.extend(check_depth(
                depth,
                standards::chip_depth_standard(class),
                noun,
                file,
                &target.name,
                class,
            ));
        }
    }

    let alignments: Vec<&File> = index.files("alignments").collect();
    findings.extend(library::check_complexity(
        &alignments,
        "ChipLibraryQualityMetric",
    ));

    if class == TargetClass::TranscriptionFactor && experiment.is_replicated() {
        let idr_metrics = metrics_of_type(
            index.files("optimal_idr_peaks"),
            "IDRQualityMetric",
            None,
            None,
        );
        findings.extend(concordance::check_idr_ratios(&idr_metrics));
    }

    findings
}

/// Usable fragments of a filtered alignment file: the flagstats mapped count,
/// halved when the file was mapped from a paired-end run (the pair is one
/// fragment).
pub fn usable_fragments(file: &File, index: &FileIndex<'_>) -> Option<f64> {
    let mapped = flagstat_mapped(file)?;
    if graph::is_paired_end(file, index) {
        Some(mapped / 2.0)
    } else {
        Some(mapped)
    }
}

fn check_depth(
    depth: Option<f64>,
    cutoffs: Cutoffs,
    noun: &str,
    file: &File,
    target_name: &str,
    class: TargetClass,
) -> Option<Finding> {
    let depth = match depth {
        Some(depth) => depth,
        None => {
            return Some(Finding::new(
                "missing read depth",
                format!(
                    "Alignment file {} has no read depth information.",
                    file_link(file)
                ),
                Level::InternalAction,
            ))
        }
    };

    let (category, level) = match cutoffs.classify(depth) {
        Call::Critical => ("extremely low read depth", Level::Error),
        Call::Poor => ("insufficient read depth", Level::NotCompliant),
        Call::Marginal => ("low read depth", Level::Warning),
        Call::Pass => return None,
    };

    let pipeline = file
        .pipeline_id()
        .map(|id| format!(" produced by pipeline {}", link_to(id)))
        .unwrap_or_default();

    Some(Finding::new(
        category,
        format!(
            "Alignment file {}{} has {} {}. ChIP-seq experiments targeting \
             {} ({}) require at least {} {}; {} or more is recommended.",
            file_link(file),
            pipeline,
            depth as u64,
            noun,
            target_name,
            class_phrase(class),
            cutoffs.poor as u64,
            noun,
            cutoffs.marginal as u64,
        ),
        level,
    ))
}

fn class_phrase(class: TargetClass) -> &'static str {
    match class {
        TargetClass::BroadHistoneMark => "a broad histone mark",
        TargetClass::NarrowHistoneMark => "a narrow histone mark",
        TargetClass::TranscriptionFactor => "a transcription factor",
        TargetClass::Control => "a control",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::index::EXPERIMENT_BUCKETS;
    use crate::model::file::AnalysisStep;
    use crate::model::file::AnalysisStepVersion;
    use crate::model::Pipeline;
    use crate::model::QualityMetric;
    use crate::model::Target;
    use serde_json::json;

    fn flagstats(mapped: u64) -> QualityMetric {
        let mut metric: QualityMetric =
            serde_json::from_value(json!({ "mapped": mapped })).unwrap();
        metric.kind = vec![String::from("SamtoolsFlagstatsQualityMetric")];
        metric.uuid = format!("flagstats-{}", mapped);
        metric
    }

    fn aligned(id: &str, output_type: &str, pipeline: Option<&str>, mapped: Option<u64>) -> File {
        File {
            id: format!("/files/{}/", id),
            accession: String::from(id),
            status: String::from("released"),
            file_format: String::from("bam"),
            output_type: String::from(output_type),
            quality_metrics: mapped.map(flagstats).into_iter().collect(),
            analysis_step_version: pipeline.map(|title| AnalysisStepVersion {
                analysis_step: Some(AnalysisStep {
                    pipelines: vec![Pipeline {
                        id: format!("/pipelines/{}/", title.replace(' ', "-")),
                        title: String::from(title),
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn chip_experiment(target_name: &str, investigated_as: &str, files: Vec<File>) -> Experiment {
        Experiment {
            assay_term_name: String::from("ChIP-seq"),
            target: Some(Target {
                name: String::from(target_name),
                label: String::from(target_name.split('-').next().unwrap()),
                investigated_as: vec![String::from(investigated_as)],
                ..Default::default()
            }),
            original_files: files,
            ..Default::default()
        }
    }

    fn findings_of(experiment: &Experiment) -> Vec<Finding> {
        let index = FileIndex::build(&experiment.original_files, &[], &EXPERIMENT_BUCKETS);
        check_standards(experiment, &index)
    }

    #[test]
    fn test_h3k9me3_uses_unfiltered_mapped_reads_against_the_broad_table() {
        // 40M mapped reads sits between the broad minimum (20M) and the
        // broad recommendation (45M).
        let experiment = chip_experiment(
            "H3K9me3-human",
            "broad histone mark",
            vec![aligned(
                "ENCFF000UNF",
                "unfiltered alignments",
                Some(pipelines::HISTONE_CHIP),
                Some(40_000_000),
            )],
        );
        let findings = findings_of(&experiment);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low read depth");
        assert_eq!(findings[0].level, Level::Warning);
        assert!(findings[0].detail.contains("mapped reads"));
    }

    #[test]
    fn test_each_file_is_judged_against_its_own_pipeline() {
        // One alignment from the legacy raw-mapping pipeline, one from the
        // histone pipeline, one from an out-of-scope pipeline. The raw
        // mapping file is shallow; the histone file passes; the out-of-scope
        // file is skipped rather than silencing the experiment.
        let experiment = chip_experiment(
            "H3K4me3-human",
            "narrow histone mark",
            vec![
                aligned(
                    "ENCFF000RAW",
                    "alignments",
                    Some(pipelines::RAW_MAPPING),
                    Some(15_000_000),
                ),
                aligned(
                    "ENCFF000HIS",
                    "alignments",
                    Some(pipelines::HISTONE_CHIP),
                    Some(50_000_000),
                ),
                aligned(
                    "ENCFF000DNS",
                    "alignments",
                    Some(pipelines::DNASE),
                    Some(1_000),
                ),
            ],
        );
        let findings = findings_of(&experiment);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low read depth");
        assert!(findings[0].detail.contains("ENCFF000RAW"));
    }

    #[test]
    fn test_paired_end_mapped_reads_halve_to_usable_fragments() {
        let mut reads = File {
            id: String::from("/files/ENCFF000FQ1/"),
            accession: String::from("ENCFF000FQ1"),
            status: String::from("released"),
            file_format: String::from("fastq"),
            output_type: String::from("reads"),
            run_type: Some(String::from("paired-ended")),
            ..Default::default()
        };
        reads.read_length = Some(100);

        let mut bam = aligned(
            "ENCFF000BAM",
            "alignments",
            Some(pipelines::TF_CHIP),
            Some(30_000_000),
        );
        bam.derived_from = vec![String::from("/files/ENCFF000FQ1/")];

        // 30M mapped pairs halve to 15M usable fragments: between the TF
        // minimum (10M) and recommendation (20M).
        let experiment = chip_experiment(
            "CTCF-human",
            "transcription factor",
            vec![reads, bam],
        );
        let findings = findings_of(&experiment);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low read depth");
        assert!(findings[0].detail.contains("15000000 usable fragments"));
    }

    #[test]
    fn test_zero_depth_and_missing_depth_are_distinct() {
        let experiment = chip_experiment(
            "H3K4me3-human",
            "narrow histone mark",
            vec![
                aligned(
                    "ENCFF000ZER",
                    "alignments",
                    Some(pipelines::HISTONE_CHIP),
                    Some(0),
                ),
                aligned("ENCFF000NON", "alignments", Some(pipelines::HISTONE_CHIP), None),
            ],
        );
        let findings = findings_of(&experiment);
        assert_eq!(findings.len(), 2);

        let zero = findings.iter().find(|f| f.detail.contains("ENCFF000ZER")).unwrap();
        assert_eq!(zero.category, "extremely low read depth");
        assert_eq!(zero.level, Level::Error);

        let missing = findings.iter().find(|f| f.detail.contains("ENCFF000NON")).unwrap();
        assert_eq!(missing.category, "missing read depth");
        assert_eq!(missing.level, Level::InternalAction);
    }

    #[test]
    fn test_tf_idr_concordance_requires_replication() {
        let mut idr_peaks = File {
            id: String::from("/files/ENCFF000IDR/"),
            accession: String::from("ENCFF000IDR"),
            status: String::from("released"),
            file_format: String::from("bed"),
            output_type: String::from("optimal IDR thresholded peaks"),
            ..Default::default()
        };
        let mut metric: QualityMetric = serde_json::from_value(json!({
            "rescue_ratio": 1.5,
            "self_consistency_ratio": 2.5
        }))
        .unwrap();
        metric.kind = vec![String::from("IDRQualityMetric")];
        metric.uuid = String::from("u-idr");
        idr_peaks.quality_metrics = vec![metric];

        let mut experiment =
            chip_experiment("CTCF-human", "transcription factor", vec![idr_peaks]);
        assert!(findings_of(&experiment).is_empty());

        experiment.replication_type = Some(String::from("isogenic"));
        let findings = findings_of(&experiment);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "borderline replicate concordance");
        assert_eq!(findings[0].level, Level::Warning);
    }

    #[test]
    fn test_inapplicable_experiments_yield_nothing() {
        // Wrong assay.
        let mut experiment = chip_experiment("CTCF-human", "transcription factor", vec![]);
        experiment.assay_term_name = String::from("DNase-seq");
        assert!(findings_of(&experiment).is_empty());

        // No target.
        let mut experiment = chip_experiment("CTCF-human", "transcription factor", vec![]);
        experiment.target = None;
        assert!(findings_of(&experiment).is_empty());

        // Target outside the audited classes.
        let experiment = chip_experiment("POLR2A-human", "RNA polymerase complex", vec![]);
        assert!(findings_of(&experiment).is_empty());
    }
}

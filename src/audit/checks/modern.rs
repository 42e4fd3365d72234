//! modERN transcription factor ChIP-seq standards.
//!
//! The modERN consortium publishes a single unique-read minimum per
//! replicate rather than the banded tables of the general branch.

use crate::audit::checks::chip_seq::usable_fragments;
use crate::audit::detail::file_link;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::index::FileIndex;
use crate::audit::standards;
use crate::audit::standards::pipelines;
use crate::model::Experiment;

/// Runs the modERN standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "ChIP-seq" {
        return Vec::new();
    }
    if !standards::MODERN_RFAS.contains(&experiment.rfa()) {
        return Vec::new();
    }

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&[pipelines::MODERN_CHIP]) {
            continue;
        }

        match usable_fragments(file, index) {
            None => findings.push(Finding::new(
                "missing read depth",
                format!(
                    "Alignment file {} has no read depth information.",
                    file_link(file)
                ),
                Level::InternalAction,
            )),
            Some(depth) => {
                if depth < standards::MODERN_DEPTH_MINIMUM {
                    findings.push(Finding::new(
                        "insufficient read depth",
                        format!(
                            "Alignment file {} has {} usable fragments; the \
                             modERN standard requires at least {} uniquely \
                             mapped reads per replicate.",
                            file_link(file),
                            depth as u64,
                            standards::MODERN_DEPTH_MINIMUM as u64,
                        ),
                        Level::NotCompliant,
                    ));
                }
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::index::EXPERIMENT_BUCKETS;
    use crate::model::Award;
    use crate::model::File;
    use crate::model::QualityMetric;
    use serde_json::json;

    fn modern_experiment(mapped: u64) -> Experiment {
        let mut metric: QualityMetric =
            serde_json::from_value(json!({ "mapped": mapped })).unwrap();
        metric.kind = vec![String::from("SamtoolsFlagstatsQualityMetric")];
        metric.uuid = String::from("u-fs");
        Experiment {
            assay_term_name: String::from("ChIP-seq"),
            award: Award {
                rfa: Some(String::from("modERN")),
                ..Default::default()
            },
            original_files: vec![File {
                id: String::from("/files/ENCFF000MOD/"),
                accession: String::from("ENCFF000MOD"),
                status: String::from("released"),
                file_format: String::from("bam"),
                output_type: String::from("alignments"),
                quality_metrics: vec![metric],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn findings_of(experiment: &Experiment) -> Vec<Finding> {
        let index = FileIndex::build(&experiment.original_files, &[], &EXPERIMENT_BUCKETS);
        check_standards(experiment, &index)
    }

    #[test]
    fn test_single_minimum() {
        let shallow = modern_experiment(8_000_000);
        let findings = findings_of(&shallow);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "insufficient read depth");
        assert_eq!(findings[0].level, Level::NotCompliant);

        let deep = modern_experiment(12_000_000);
        assert!(findings_of(&deep).is_empty());
    }

    #[test]
    fn test_non_modern_awards_are_inapplicable() {
        let mut experiment = modern_experiment(8_000_000);
        experiment.award.rfa = Some(String::from("ENCODE4"));
        assert!(findings_of(&experiment).is_empty());
    }
}

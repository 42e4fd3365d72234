//! ChIA-PET data standards: usable-read depth on the interaction-calling
//! alignments.

use crate::audit::checks::flagstat_mapped;
use crate::audit::detail::file_link;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::index::FileIndex;
use crate::audit::metrics::file_metrics_of_type;
use crate::audit::standards;
use crate::audit::standards::pipelines;
use crate::audit::thresholds::Call;
use crate::model::Experiment;

/// Runs the ChIA-PET standards over an experiment.
pub fn check_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    if experiment.assay_term_name != "ChIA-PET" {
        return Vec::new();
    }

    let mut findings = Vec::new();

    for file in index.files("alignments") {
        let titles = file.pipeline_titles();
        if !titles.is_empty() && !file.produced_by_any(&[pipelines::CHIA_PET]) {
            continue;
        }

        // The dedicated alignment metric reports usable reads after PET
        // filtering; older files only carry flagstats, whose mapped count
        // stands in.
        let depth = file_metrics_of_type(file, "ChiaPetAlignmentQualityMetric")
            .iter()
            .find_map(|metric| metric.number("usable_reads"))
            .or_else(|| flagstat_mapped(file));

        let depth = match depth {
            Some(depth) => depth,
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

        let (category, level) = match standards::CHIA_PET_DEPTH.classify(depth) {
            Call::Critical | Call::Poor => ("insufficient read depth", Level::NotCompliant),
            Call::Marginal => ("low read depth", Level::Warning),
            Call::Pass => continue,
        };
        findings.push(Finding::new(
            category,
            format!(
                "Alignment file {} has {} usable reads. ChIA-PET \
                 experiments require at least {} usable reads per \
                 replicate; {} or more is recommended.",
                file_link(file),
                depth as u64,
                standards::CHIA_PET_DEPTH.poor as u64,
                standards::CHIA_PET_DEPTH.marginal as u64,
            ),
            level,
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::index::EXPERIMENT_BUCKETS;
    use crate::model::File;
    use crate::model::QualityMetric;
    use serde_json::json;

    fn alignment(usable_reads: u64) -> File {
        let mut metric: QualityMetric =
            serde_json::from_value(json!({ "usable_reads": usable_reads })).unwrap();
        metric.kind = vec![String::from("ChiaPetAlignmentQualityMetric")];
        metric.uuid = String::from("u-pet");
        File {
            id: String::from("/files/ENCFF000PET/"),
            accession: String::from("ENCFF000PET"),
            status: String::from("released"),
            file_format: String::from("bam"),
            output_type: String::from("alignments"),
            quality_metrics: vec![metric],
            ..Default::default()
        }
    }

    fn findings_of(files: Vec<File>) -> Vec<Finding> {
        let experiment = Experiment {
            assay_term_name: String::from("ChIA-PET"),
            original_files: files,
            ..Default::default()
        };
        let index = FileIndex::build(&experiment.original_files, &[], &EXPERIMENT_BUCKETS);
        check_standards(&experiment, &index)
    }

    #[test]
    fn test_usable_read_bands() {
        let findings = findings_of(vec![alignment(40_000_000)]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "insufficient read depth");

        let findings = findings_of(vec![alignment(75_000_000)]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low read depth");

        assert!(findings_of(vec![alignment(150_000_000)]).is_empty());
    }

    #[test]
    fn test_flagstats_stand_in_when_the_pet_metric_is_absent() {
        let mut metric: QualityMetric =
            serde_json::from_value(json!({ "mapped": 60_000_000 })).unwrap();
        metric.kind = vec![String::from("SamtoolsFlagstatsQualityMetric")];
        metric.uuid = String::from("u-fs");
        let mut file = alignment(0);
        file.quality_metrics = vec![metric];

        let findings = findings_of(vec![file]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "low read depth");
    }
}

//! The experiment-level audit: registration tables and the accumulator.

use tracing::debug;

use crate::audit::checks::metadata;
use crate::audit::checks::provenance;
use crate::audit::dispatch;
use crate::audit::finding::Finding;
use crate::audit::index::FileIndex;
use crate::audit::index::EXPERIMENT_BUCKETS;
use crate::model::Experiment;

/// A registered check that needs the file index.
pub struct FileCheck {
    /// Name of the check, for listings.
    pub name: &'static str,

    /// The check itself.
    pub run: fn(&Experiment, &FileIndex<'_>) -> Vec<Finding>,
}

/// A registered check operating on entity-level metadata alone.
pub struct MetadataCheck {
    /// Name of the check, for listings.
    pub name: &'static str,

    /// The check itself.
    pub run: fn(&Experiment) -> Vec<Finding>,
}

fn check_experiment_provenance(_experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    provenance::check_provenance(index)
}

/// Checks that read the file index, in registration order.
pub const FILE_CHECKS: &[FileCheck] = &[
    FileCheck {
        name: "assay standards",
        run: dispatch::dispatch_standards,
    },
    FileCheck {
        name: "file provenance",
        run: check_experiment_provenance,
    },
];

/// Checks that read entity metadata alone, in registration order.
pub const METADATA_CHECKS: &[MetadataCheck] = &[
    MetadataCheck {
        name: "replication",
        run: metadata::check_replication,
    },
    MetadataCheck {
        name: "replicate libraries",
        run: metadata::check_replicate_libraries,
    },
    MetadataCheck {
        name: "target",
        run: metadata::check_target,
    },
    MetadataCheck {
        name: "antibody",
        run: metadata::check_antibody,
    },
    MetadataCheck {
        name: "controls",
        run: metadata::check_controls,
    },
    MetadataCheck {
        name: "GEO submission",
        run: metadata::check_geo_submission,
    },
    MetadataCheck {
        name: "spike-ins",
        run: metadata::check_spikeins,
    },
];

/// Audits one experiment.
///
/// The file index is built exactly once and shared read-only across every
/// registered check. Every check runs unconditionally; findings come back in
/// registration order, then each check's own order, with no global sort or
/// cross-check dedup — overlapping findings from different checks are
/// intentional.
pub fn audit_experiment(experiment: &Experiment) -> Vec<Finding> {
    let index = FileIndex::build(
        &experiment.original_files,
        &experiment.contributing_files,
        &EXPERIMENT_BUCKETS,
    );

    let mut findings = Vec::new();
    for check in FILE_CHECKS {
        let before = findings.len();
        findings.extend((check.run)(experiment, &index));
        debug!(
            "  [*] {}: {} finding(s)",
            check.name,
            findings.len() - before
        );
    }
    for check in METADATA_CHECKS {
        let before = findings.len();
        findings.extend((check.run)(experiment));
        debug!(
            "  [*] {}: {} finding(s)",
            check.name,
            findings.len() - before
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::finding::Level;
    use serde_json::json;

    /// A released, unreplicated ChIP-seq experiment with a shallow legacy
    /// alignment and a stale modern alignment: enough surface to exercise
    /// standards, provenance, and metadata checks in one pass.
    fn fixture() -> Experiment {
        serde_json::from_value(json!({
            "@id": "/experiments/ENCSR000FIX/",
            "@type": ["Experiment", "Dataset", "Item"],
            "accession": "ENCSR000FIX",
            "status": "released",
            "assay_term_name": "ChIP-seq",
            "award": { "@id": "/awards/U54HG004558/", "rfa": "ENCODE4" },
            "target": {
                "@id": "/targets/H3K4me3-human/",
                "name": "H3K4me3-human",
                "label": "H3K4me3",
                "investigated_as": ["narrow histone mark"]
            },
            "replicates": [{
                "@id": "/replicates/rep1/",
                "biological_replicate_number": 1,
                "technical_replicate_number": 1,
                "library": {
                    "@id": "/libraries/ENCLB000AAA/",
                    "documents": ["/documents/protocol-1/"]
                },
                "antibody": {
                    "@id": "/antibodies/ENCAB000AAA/",
                    "characterizations": ["/antibody-characterizations/c1/"]
                }
            }],
            "replication_type": "unreplicated",
            "dbxrefs": ["GEO:GSE99999"],
            "possible_controls": [{
                "@id": "/experiments/ENCSR000CTL/",
                "target": {
                    "@id": "/targets/Control-human/",
                    "name": "Control-human",
                    "investigated_as": ["control"]
                }
            }],
            "original_files": [
                {
                    "@id": "/files/ENCFF000FQ1/",
                    "accession": "ENCFF000FQ1",
                    "status": "released",
                    "file_format": "fastq",
                    "output_type": "reads",
                    "read_length": 36,
                    "run_type": "single-ended"
                },
                {
                    "@id": "/files/ENCFF000OLD/",
                    "accession": "ENCFF000OLD",
                    "status": "released",
                    "file_format": "bam",
                    "output_type": "alignments",
                    "derived_from": ["/files/ENCFF000FQ1/"],
                    "quality_metrics": [{
                        "@type": ["SamtoolsFlagstatsQualityMetric", "QualityMetric"],
                        "uuid": "fs-old",
                        "mapped": 12000000
                    }],
                    "analysis_step_version": {
                        "analysis_step": {
                            "pipelines": [{
                                "@id": "/pipelines/ENCPL000RAW/",
                                "title": "Raw mapping with no filtration"
                            }]
                        }
                    }
                },
                {
                    "@id": "/files/ENCFF000NEW/",
                    "accession": "ENCFF000NEW",
                    "status": "released",
                    "file_format": "bam",
                    "output_type": "alignments",
                    "derived_from": ["/files/ENCFF000GONE/"],
                    "quality_metrics": [{
                        "@type": ["SamtoolsFlagstatsQualityMetric", "QualityMetric"],
                        "uuid": "fs-new",
                        "mapped": 30000000
                    }],
                    "analysis_step_version": {
                        "analysis_step": {
                            "pipelines": [{
                                "@id": "/pipelines/ENCPL000HIS/",
                                "title": "Histone ChIP-seq"
                            }]
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_legacy_and_modern_files_audit_independently() {
        let findings = audit_experiment(&fixture());

        // The legacy raw-mapping file sits between the narrow minimum and
        // recommendation on mapped reads; the modern file passes on usable
        // fragments but its derivation chain is stale.
        let depth: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.category == "low read depth")
            .collect();
        assert_eq!(depth.len(), 1);
        assert!(depth[0].detail.contains("ENCFF000OLD"));

        assert!(findings
            .iter()
            .any(|f| f.category == "out of date analysis" && f.detail.contains("ENCFF000NEW")));

        // Metadata checks fire alongside the file checks.
        assert!(findings
            .iter()
            .any(|f| f.category == "unreplicated experiment" && f.level == Level::NotCompliant));
    }

    #[test]
    fn test_audit_is_deterministic() {
        let experiment = fixture();
        let first = audit_experiment(&experiment);
        let second = audit_experiment(&experiment);
        assert_eq!(first, second);

        let pairs: Vec<(String, Level)> = first
            .iter()
            .map(|f| (f.category.clone(), f.level))
            .collect();
        let again: Vec<(String, Level)> = second
            .iter()
            .map(|f| (f.category.clone(), f.level))
            .collect();
        assert_eq!(pairs, again);
    }

    #[test]
    fn test_every_check_is_registered_once() {
        let mut names: Vec<&str> = FILE_CHECKS
            .iter()
            .map(|c| c.name)
            .chain(METADATA_CHECKS.iter().map(|c| c.name))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_empty_experiment_audits_without_failing() {
        let experiment = Experiment::default();
        let findings = audit_experiment(&experiment);
        // An empty record has no files and no replicates; only the
        // replicate-structure check has anything to say.
        assert!(findings.iter().all(|f| f.category == "missing replicates"));
    }
}

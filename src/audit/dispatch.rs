//! Routing an experiment to the standards checks that apply to it.
//!
//! A stateless decision tree evaluated per call: award RFA first, then assay
//! term, then each matched check guards on the pipeline provenance of the
//! individual files it inspects. The general and modERN branches are
//! evaluated independently — routing never assumes one pipeline generation
//! per experiment.

use crate::audit::checks::chia_pet;
use crate::audit::checks::chip_seq;
use crate::audit::checks::dnase_seq;
use crate::audit::checks::long_read_rna;
use crate::audit::checks::micro_rna;
use crate::audit::checks::modern;
use crate::audit::checks::rna_seq;
use crate::audit::checks::wgbs;
use crate::audit::finding::Finding;
use crate::audit::index::FileIndex;
use crate::audit::standards;
use crate::model::Experiment;

/// Dispatches the per-assay standards checks for one experiment.
pub fn dispatch_standards(experiment: &Experiment, index: &FileIndex<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let rfa = experiment.rfa();

    if standards::STANDARDS_RFAS.contains(&rfa) {
        match experiment.assay_term_name.as_str() {
            "ChIP-seq" => findings.extend(chip_seq::check_standards(experiment, index)),
            "DNase-seq" => findings.extend(dnase_seq::check_standards(experiment, index)),
            "microRNA-seq" => findings.extend(micro_rna::check_standards(experiment, index)),
            "long read RNA-seq" => {
                findings.extend(long_read_rna::check_standards(experiment, index))
            }
            "whole-genome shotgun bisulfite sequencing" => {
                findings.extend(wgbs::check_standards(experiment, index))
            }
            "ChIA-PET" => findings.extend(chia_pet::check_standards(experiment, index)),
            // The remaining RNA family terms share one checker, which owns
            // the variant-specific tables.
            _ => findings.extend(rna_seq::check_standards(experiment, index)),
        }
    }

    if standards::MODERN_RFAS.contains(&rfa) {
        findings.extend(modern::check_standards(experiment, index));
    }

    findings
}

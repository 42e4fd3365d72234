//! The per-assay standards checks and the entity-level metadata checks.
//!
//! Every check in this tree is a pure function from a frozen entity (plus
//! the shared, read-only file index) to a finite list of findings. Checks
//! validate their own applicability first and answer empty when they do not
//! apply; they treat unrecognized or missing keys as "not applicable" and
//! trust a more specific check (or none) to flag structurally bad data.

pub mod atac_seq;
pub mod chia_pet;
pub mod chip_seq;
pub mod concordance;
pub mod dnase_seq;
pub mod library;
pub mod long_read_rna;
pub mod metadata;
pub mod micro_rna;
pub mod modern;
pub mod provenance;
pub mod rna_seq;
pub mod wgbs;

use crate::audit::metrics::file_metrics_of_type;
use crate::model::File;

/// The mapped-read count of a file, from its samtools flagstats metric.
///
/// When several flagstats metrics are attached the first is used; the
/// duplicate-metric anomaly check reports the ambiguity separately.
pub(crate) fn flagstat_mapped(file: &File) -> Option<f64> {
    file_metrics_of_type(file, "SamtoolsFlagstatsQualityMetric")
        .iter()
        .find_map(|metric| metric.number("mapped"))
}

//! The externally defined data standards, reproduced as enumerated
//! constants.
//!
//! Nothing in this module is derived or computed: every number is a
//! published standard and every string is an exact registry value. Checks
//! consume these tables; they never invent thresholds of their own.

use crate::audit::thresholds::Cutoffs;
use crate::model::Target;

//=============//
// Award gates //
//=============//

/// Award RFAs eligible for the general standards checks.
pub const STANDARDS_RFAS: &[&str] = &[
    "ENCODE",
    "ENCODE2",
    "ENCODE2-Mouse",
    "ENCODE3",
    "ENCODE4",
    "Roadmap",
];

/// Award RFAs routed to the modERN standards branch instead.
pub const MODERN_RFAS: &[&str] = &["modERN", "modENCODE"];

//=================//
// Pipeline titles //
//=================//

/// Registry titles of the pipelines each assay family's checks recognize.
/// Titles are free text defined by the pipeline registry; matching is exact
/// string membership.
pub mod pipelines {
    /// Legacy uniform-processing mapping pipeline. Files it produced are
    /// judged on mapped reads only, since it performs no filtering.
    pub const RAW_MAPPING: &str = "Raw mapping with no filtration";

    /// Histone ChIP-seq uniform pipeline.
    pub const HISTONE_CHIP: &str = "Histone ChIP-seq";

    /// Transcription factor ChIP-seq uniform pipeline.
    pub const TF_CHIP: &str = "Transcription factor ChIP-seq";

    /// modERN transcription factor ChIP-seq pipeline.
    pub const MODERN_CHIP: &str = "Transcription factor ChIP-seq pipeline (modERN)";

    /// DNase-seq uniform pipeline.
    pub const DNASE: &str = "DNase-HOTSPOT";

    /// Long RNA-seq uniform pipelines.
    pub const LONG_RNA: &[&str] = &[
        "RNA-seq of long RNAs (paired-end, stranded)",
        "RNA-seq of long RNAs (single-end, unstranded)",
    ];

    /// Small RNA-seq uniform pipeline.
    pub const SMALL_RNA: &str = "Small RNA-seq single-end pipeline";

    /// RAMPAGE / CAGE uniform pipeline.
    pub const RAMPAGE: &str = "RAMPAGE (paired-end, stranded)";

    /// microRNA-seq uniform pipeline.
    pub const MICRO_RNA: &str = "microRNA-seq pipeline";

    /// Long read RNA-seq uniform pipeline.
    pub const LONG_READ_RNA: &str = "Long read RNA-seq pipeline";

    /// Whole-genome bisulfite pipeline.
    pub const WGBS: &str = "WGBS paired-end pipeline";

    /// ATAC-seq uniform pipelines.
    pub const ATAC: &[&str] = &["ATAC-seq (replicated)", "ATAC-seq (unreplicated)"];

    /// ChIA-PET processing pipeline.
    pub const CHIA_PET: &str = "ChIA-PET pipeline";
}

//=====================//
// ChIP-seq read depth //
//=====================//

/// Which threshold table a ChIP-seq target selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetClass {
    /// Broad histone marks (e.g. H3K27me3, H3K36me3, H3K9me3).
    BroadHistoneMark,

    /// Narrow histone marks (e.g. H3K4me3, H3K27ac).
    NarrowHistoneMark,

    /// Transcription factors.
    TranscriptionFactor,

    /// Control immunoprecipitations (input, mock IP).
    Control,
}

/// Classifies a target by its `investigated_as` capability tags. Answers
/// `None` for targets outside the four audited classes.
pub fn target_class(target: &Target) -> Option<TargetClass> {
    if target.investigated_as("broad histone mark") {
        Some(TargetClass::BroadHistoneMark)
    } else if target.investigated_as("narrow histone mark") {
        Some(TargetClass::NarrowHistoneMark)
    } else if target.investigated_as("transcription factor") {
        Some(TargetClass::TranscriptionFactor)
    } else if target.investigated_as("control") {
        Some(TargetClass::Control)
    } else {
        None
    }
}

/// Usable-fragment depth for broad histone marks: minimum 20M, recommended
/// 45M, drastically-low floor 5M.
pub const BROAD_MARK_DEPTH: Cutoffs =
    Cutoffs::with_critical(5_000_000.0, 20_000_000.0, 45_000_000.0);

/// Usable-fragment depth for narrow histone marks: minimum 10M, recommended
/// 20M.
pub const NARROW_MARK_DEPTH: Cutoffs =
    Cutoffs::with_critical(5_000_000.0, 10_000_000.0, 20_000_000.0);

/// Usable-fragment depth for transcription factors: minimum 10M, recommended
/// 20M.
pub const TF_DEPTH: Cutoffs = Cutoffs::with_critical(5_000_000.0, 10_000_000.0, 20_000_000.0);

/// Usable-fragment depth for control immunoprecipitations, held to the
/// narrow-mark table.
pub const CONTROL_DEPTH: Cutoffs = NARROW_MARK_DEPTH;

/// The depth table for a target class.
pub fn chip_depth_standard(class: TargetClass) -> Cutoffs {
    match class {
        TargetClass::BroadHistoneMark => BROAD_MARK_DEPTH,
        TargetClass::NarrowHistoneMark => NARROW_MARK_DEPTH,
        TargetClass::TranscriptionFactor => TF_DEPTH,
        TargetClass::Control => CONTROL_DEPTH,
    }
}

/// Targets whose depth is evaluated on mapped reads of *unfiltered*
/// alignments instead of usable fragments of filtered alignments. A
/// hard-coded exception list, not a generalizable rule.
pub const UNFILTERED_DEPTH_TARGETS: &[&str] = &["H3K9me3-human", "H3K9me3-mouse"];

/// modERN TF ChIP-seq unique-read minimum. The modERN standard publishes a
/// single cutoff, no recommendation band.
pub const MODERN_DEPTH_MINIMUM: f64 = 10_000_000.0;

//====================//
// Library complexity //
//====================//

/// Non-redundant fraction bands: 0.5 / 0.8 / 0.9.
pub const NRF: Cutoffs = Cutoffs::with_critical(0.5, 0.8, 0.9);

/// PCR bottlenecking coefficient 1 bands: 0.5 / 0.8 / 0.9.
pub const PBC1: Cutoffs = Cutoffs::with_critical(0.5, 0.8, 0.9);

/// PCR bottlenecking coefficient 2 bands: 1 / 3 / 10. A library with no
/// two-read duplicates reports `"Infinity"`, which passes.
pub const PBC2: Cutoffs = Cutoffs::with_critical(1.0, 3.0, 10.0);

//===========//
// DNase-seq //
//===========//

/// SPOT1 score bands: 0.25 / 0.3 / 0.4.
pub const SPOT1: Cutoffs = Cutoffs::with_critical(0.25, 0.3, 0.4);

/// DNase-seq mapped-read depth: minimum 20M, recommended 50M, floor 10M.
pub const DNASE_DEPTH: Cutoffs = Cutoffs::with_critical(10_000_000.0, 20_000_000.0, 50_000_000.0);

//================//
// RNA-seq family //
//================//

/// Star-aligned depth for RNA-seq of long RNAs: minimum 20M, recommended
/// 30M.
pub const LONG_RNA_DEPTH: Cutoffs = Cutoffs::new(20_000_000.0, 30_000_000.0);

/// Star-aligned depth for knockdown-followed RNA-seq variants: minimum 5M,
/// recommended 10M.
pub const KNOCKDOWN_RNA_DEPTH: Cutoffs = Cutoffs::new(5_000_000.0, 10_000_000.0);

/// Star-aligned depth for RAMPAGE and CAGE: minimum 10M, recommended 20M.
pub const RAMPAGE_DEPTH: Cutoffs = Cutoffs::new(10_000_000.0, 20_000_000.0);

/// Star-aligned depth for small RNA-seq: minimum 20M, recommended 30M.
pub const SMALL_RNA_DEPTH: Cutoffs = Cutoffs::new(20_000_000.0, 30_000_000.0);

/// Aligned-read depth for microRNA-seq: minimum 3M, recommended 5M.
pub const MICRO_RNA_DEPTH: Cutoffs = Cutoffs::new(3_000_000.0, 5_000_000.0);

/// Distinct microRNAs expressed: minimum 200, recommended 300.
pub const MICRO_RNA_EXPRESSED: Cutoffs = Cutoffs::new(200.0, 300.0);

/// Mapped-read depth for long read RNA-seq: minimum 600k, recommended 2M.
pub const LONG_READ_RNA_DEPTH: Cutoffs = Cutoffs::new(600_000.0, 2_000_000.0);

/// Genes detected for long read RNA-seq: minimum 4000, recommended 8000.
pub const LONG_READ_GENES_DETECTED: Cutoffs = Cutoffs::new(4_000.0, 8_000.0);

//======//
// WGBS //
//======//

/// Genome-wide coverage bands: 5X / 25X / 30X.
pub const WGBS_COVERAGE: Cutoffs = Cutoffs::with_critical(5.0, 25.0, 30.0);

/// Minimum lambda-phage C-to-T conversion rate, in percent.
pub const WGBS_LAMBDA_CONVERSION_MINIMUM: f64 = 98.0;

/// Effective genome size used for coverage, per assembly.
pub fn genome_size(assembly: &str) -> Option<f64> {
    match assembly {
        "GRCh38" | "hg19" => Some(3_300_000_000.0),
        "mm10" | "mm9" | "GRCm38" => Some(2_800_000_000.0),
        _ => None,
    }
}

//==========//
// ATAC-seq //
//==========//

/// TSS enrichment bands, per assembly. Human and mouse references use
/// different cutoffs because their annotation sets differ in TSS density.
pub fn tss_enrichment_standard(assembly: &str) -> Option<Cutoffs> {
    match assembly {
        "GRCh38" | "hg19" => Some(Cutoffs::new(5.0, 7.0)),
        "mm10" | "mm9" => Some(Cutoffs::new(10.0, 15.0)),
        _ => None,
    }
}

/// ATAC-seq usable-fragment depth: minimum 25M, recommended 50M.
pub const ATAC_DEPTH: Cutoffs = Cutoffs::new(25_000_000.0, 50_000_000.0);

/// Minimum fraction of reads in peaks.
pub const ATAC_FRIP_MINIMUM: f64 = 0.3;

//==========//
// ChIA-PET //
//==========//

/// ChIA-PET usable-read depth: minimum 50M, recommended 100M.
pub const CHIA_PET_DEPTH: Cutoffs = Cutoffs::new(50_000_000.0, 100_000_000.0);

//=======================//
// Replicate concordance //
//=======================//

/// IDR rescue-ratio threshold.
pub const IDR_RESCUE_RATIO: f64 = 2.0;

/// IDR self-consistency-ratio threshold.
pub const IDR_SELF_CONSISTENCY_RATIO: f64 = 2.0;

/// Correlation minimum (Pearson or Spearman) for the given replication
/// type. Anisogenic replicates are held to a looser standard than isogenic
/// ones. Answers `None` for unreplicated or undetermined structures, where
/// concordance checks do not apply.
pub fn correlation_minimum(replication_type: Option<&str>) -> Option<f64> {
    match replication_type {
        Some("isogenic") => Some(0.9),
        Some("anisogenic") => Some(0.85),
        _ => None,
    }
}

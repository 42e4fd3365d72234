//! The file index: partitioning an entity's files into named semantic
//! buckets.
//!
//! Bucket membership is enumerated, not algorithmic: a fixed table maps each
//! `(file_format, output_type)` pair to zero or more named buckets, and a
//! file lands in every bucket its pair names, provided its status is not in
//! the table's excluded set. Membership is a pure function of
//! `(file_format, output_type, status)`.
//!
//! Two tables exist. The experiment-level and analysis-level enumerations
//! diverge deliberately around IDR peak outputs ([`EXPERIMENT_BUCKETS`]
//! carries `optimal_idr_peaks`, [`ANALYSIS_BUCKETS`] carries
//! `preferred_default_idr_peaks` and `overlap_and_idr_peaks`): the
//! analysis-side schema is the newer generation of the upstream system and
//! the divergence is preserved rather than unified.

use indexmap::IndexMap;

use crate::model::File;

/// One row of a bucket table: a `(file_format, output_type)` pair and the
/// buckets files with that pair belong to.
#[derive(Debug)]
pub struct BucketRule {
    /// Container format to match.
    pub file_format: &'static str,

    /// Output type to match.
    pub output_type: &'static str,

    /// Buckets a matching file lands in. May name more than one: a file can
    /// legitimately belong to several semantic groups at once.
    pub buckets: &'static [&'static str],
}

/// A complete enumerated bucket table for one audit context.
#[derive(Debug)]
pub struct BucketTable {
    /// Name of the table, for listings.
    pub name: &'static str,

    /// Every bucket this table defines. The built index materializes each
    /// one, possibly empty.
    pub buckets: &'static [&'static str],

    /// The enumerated membership rules.
    pub rules: &'static [BucketRule],

    /// File statuses excluded from indexing entirely.
    pub excluded_statuses: &'static [&'static str],
}

impl BucketTable {
    /// Buckets for the given `(file_format, output_type)` pair per this
    /// table's enumeration. Pairs the table does not name belong to no
    /// bucket.
    pub fn buckets_for(&self, file_format: &str, output_type: &str) -> &'static [&'static str] {
        self.rules
            .iter()
            .find(|rule| rule.file_format == file_format && rule.output_type == output_type)
            .map(|rule| rule.buckets)
            .unwrap_or(&[])
    }
}

/// The experiment-level bucket table.
pub const EXPERIMENT_BUCKETS: BucketTable = BucketTable {
    name: "experiment",
    buckets: &[
        "raw_data",
        "alignments",
        "unfiltered_alignments",
        "transcriptome_alignments",
        "peaks",
        "optimal_idr_peaks",
        "signal",
        "gene_quantifications",
        "transcript_quantifications",
        "micro_rna_quantifications",
        "cpg_quantifications",
        "chromatin_interactions",
    ],
    rules: &[
        BucketRule {
            file_format: "fastq",
            output_type: "reads",
            buckets: &["raw_data"],
        },
        BucketRule {
            file_format: "bam",
            output_type: "alignments",
            buckets: &["alignments"],
        },
        BucketRule {
            file_format: "bam",
            output_type: "unfiltered alignments",
            buckets: &["unfiltered_alignments"],
        },
        BucketRule {
            file_format: "bam",
            output_type: "transcriptome alignments",
            buckets: &["transcriptome_alignments"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "peaks",
            buckets: &["peaks"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "peaks",
            buckets: &["peaks"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "optimal IDR thresholded peaks",
            buckets: &["peaks", "optimal_idr_peaks"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "optimal IDR thresholded peaks",
            buckets: &["peaks", "optimal_idr_peaks"],
        },
        BucketRule {
            file_format: "bigWig",
            output_type: "signal of unique reads",
            buckets: &["signal"],
        },
        BucketRule {
            file_format: "bigWig",
            output_type: "signal of all reads",
            buckets: &["signal"],
        },
        BucketRule {
            file_format: "tsv",
            output_type: "gene quantifications",
            buckets: &["gene_quantifications"],
        },
        BucketRule {
            file_format: "tsv",
            output_type: "transcript quantifications",
            buckets: &["transcript_quantifications"],
        },
        BucketRule {
            file_format: "tsv",
            output_type: "microRNA quantifications",
            buckets: &["micro_rna_quantifications"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "methylation state at CpG",
            buckets: &["cpg_quantifications"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "methylation state at CpG",
            buckets: &["cpg_quantifications"],
        },
        BucketRule {
            file_format: "bedpe",
            output_type: "long range chromatin interactions",
            buckets: &["chromatin_interactions"],
        },
    ],
    excluded_statuses: &["uploading", "content error", "upload failed"],
};

/// The analysis-level bucket table.
///
/// Analyses designate default outputs among their IDR peak files; the
/// `preferred_default_idr_peaks` bucket holds every IDR peak file and checks
/// narrow to the `preferred_default`-flagged members, keeping bucket
/// membership itself a pure function of format, output type, and status.
pub const ANALYSIS_BUCKETS: BucketTable = BucketTable {
    name: "analysis",
    buckets: &[
        "raw_data",
        "alignments",
        "unfiltered_alignments",
        "transcriptome_alignments",
        "peaks",
        "preferred_default_idr_peaks",
        "overlap_and_idr_peaks",
        "signal",
        "gene_quantifications",
        "transcript_quantifications",
        "micro_rna_quantifications",
        "cpg_quantifications",
        "chromatin_interactions",
    ],
    rules: &[
        BucketRule {
            file_format: "fastq",
            output_type: "reads",
            buckets: &["raw_data"],
        },
        BucketRule {
            file_format: "bam",
            output_type: "alignments",
            buckets: &["alignments"],
        },
        BucketRule {
            file_format: "bam",
            output_type: "unfiltered alignments",
            buckets: &["unfiltered_alignments"],
        },
        BucketRule {
            file_format: "bam",
            output_type: "transcriptome alignments",
            buckets: &["transcriptome_alignments"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "peaks",
            buckets: &["peaks"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "peaks",
            buckets: &["peaks"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "IDR thresholded peaks",
            buckets: &["peaks", "preferred_default_idr_peaks", "overlap_and_idr_peaks"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "IDR thresholded peaks",
            buckets: &["peaks", "preferred_default_idr_peaks", "overlap_and_idr_peaks"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "overlap peaks",
            buckets: &["peaks", "overlap_and_idr_peaks"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "overlap peaks",
            buckets: &["peaks", "overlap_and_idr_peaks"],
        },
        BucketRule {
            file_format: "bigWig",
            output_type: "signal of unique reads",
            buckets: &["signal"],
        },
        BucketRule {
            file_format: "bigWig",
            output_type: "signal of all reads",
            buckets: &["signal"],
        },
        BucketRule {
            file_format: "tsv",
            output_type: "gene quantifications",
            buckets: &["gene_quantifications"],
        },
        BucketRule {
            file_format: "tsv",
            output_type: "transcript quantifications",
            buckets: &["transcript_quantifications"],
        },
        BucketRule {
            file_format: "tsv",
            output_type: "microRNA quantifications",
            buckets: &["micro_rna_quantifications"],
        },
        BucketRule {
            file_format: "bed",
            output_type: "methylation state at CpG",
            buckets: &["cpg_quantifications"],
        },
        BucketRule {
            file_format: "bigBed",
            output_type: "methylation state at CpG",
            buckets: &["cpg_quantifications"],
        },
        BucketRule {
            file_format: "bedpe",
            output_type: "long range chromatin interactions",
            buckets: &["chromatin_interactions"],
        },
    ],
    excluded_statuses: &[
        "uploading",
        "content error",
        "upload failed",
        "revoked",
        "deleted",
    ],
};

/// The built file index for one audit invocation.
///
/// Built exactly once by the accumulator and passed to every check by shared
/// reference: checks read it, nothing mutates it.
pub struct FileIndex<'a> {
    table: &'static BucketTable,
    buckets: IndexMap<&'static str, IndexMap<&'a str, &'a File>>,
    originals: IndexMap<&'a str, &'a File>,
    contributing: IndexMap<&'a str, &'a File>,
}

impl<'a> FileIndex<'a> {
    /// Builds the index over an entity's own files and the files contributed
    /// from other datasets.
    pub fn build<I>(
        files: &'a [File],
        contributing: I,
        table: &'static BucketTable,
    ) -> FileIndex<'a>
    where
        I: IntoIterator<Item = &'a File>,
    {
        let mut buckets: IndexMap<&'static str, IndexMap<&'a str, &'a File>> = table
            .buckets
            .iter()
            .map(|name| (*name, IndexMap::new()))
            .collect();

        let mut originals = IndexMap::new();
        for file in files {
            if table.excluded_statuses.contains(&file.status.as_str()) {
                continue;
            }
            originals.insert(file.id.as_str(), file);
            for bucket in table.buckets_for(&file.file_format, &file.output_type) {
                // Bucket names in rules are drawn from `table.buckets`, so
                // the entry always exists.
                buckets
                    .get_mut(bucket)
                    .expect("bucket rule names an undeclared bucket")
                    .insert(file.id.as_str(), file);
            }
        }

        let contributing = contributing
            .into_iter()
            .filter(|file| !table.excluded_statuses.contains(&file.status.as_str()))
            .map(|file| (file.id.as_str(), file))
            .collect();

        FileIndex {
            table,
            buckets,
            originals,
            contributing,
        }
    }

    /// The table this index was built against.
    pub fn table(&self) -> &'static BucketTable {
        self.table
    }

    /// The files of a named bucket, keyed by file id in discovery order.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not a bucket of this index's table: asking for
    /// an undeclared bucket is a programming error, not an empty result.
    pub fn bucket(&self, name: &str) -> &IndexMap<&'a str, &'a File> {
        match self.buckets.get(name) {
            Some(bucket) => bucket,
            None => panic!(
                "unknown file bucket '{}' for the {} table",
                name, self.table.name
            ),
        }
    }

    /// The files of a named bucket, as a slice-like iterator.
    pub fn files(&self, name: &str) -> impl Iterator<Item = &'a File> + '_ {
        self.bucket(name).values().copied()
    }

    /// Whether a named bucket holds no files.
    pub fn is_empty(&self, name: &str) -> bool {
        self.bucket(name).is_empty()
    }

    /// Resolves a file id against the entity's own files first, contributed
    /// files second. Dangling ids answer `None`.
    pub fn resolve(&self, id: &str) -> Option<&'a File> {
        self.originals
            .get(id)
            .or_else(|| self.contributing.get(id))
            .copied()
    }

    /// All of the entity's own indexed files, in discovery order.
    pub fn originals(&self) -> impl Iterator<Item = &'a File> + '_ {
        self.originals.values().copied()
    }
}

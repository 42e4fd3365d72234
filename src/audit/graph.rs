//! Walking the derivation graph: `derived_from` resolution and provenance
//! queries over the file index.
//!
//! Derivation chains on real data routinely reference archived or removed
//! files. Every function here skips dangling references silently and never
//! errors; staleness is a separate, explicit query.

use indexmap::IndexSet;

use crate::audit::index::FileIndex;
use crate::model::File;

/// One hop of `derived_from` for each input file, keeping only resolved
/// files of the requested format, deduplicated by accession in discovery
/// order.
pub fn derived_from_of_format<'a>(
    files: &[&'a File],
    index: &FileIndex<'a>,
    file_format: &str,
) -> Vec<&'a File> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    let mut results = Vec::new();

    for file in files {
        for id in &file.derived_from {
            let resolved = match index.resolve(id) {
                Some(f) => f,
                None => continue,
            };
            if resolved.file_format != file_format {
                continue;
            }
            if seen.insert(resolved.accession.as_str()) {
                results.push(resolved);
            }
        }
    }

    results
}

/// Whether any `derived_from` reference of `file` fails to resolve against
/// the current original and contributing files.
///
/// A processed file pointing at inputs that are no longer part of the
/// dataset marks the processing run as out of date.
pub fn has_stale_derivation(file: &File, index: &FileIndex<'_>) -> bool {
    file.derived_from.iter().any(|id| index.resolve(id).is_none())
}

/// The sequencing-read files one hop upstream of `file`.
pub fn source_reads<'a>(file: &'a File, index: &FileIndex<'a>) -> Vec<&'a File> {
    derived_from_of_format(&[file], index, "fastq")
}

/// Whether `file` was mapped from at least one paired-end sequencing run.
pub fn is_paired_end(file: &File, index: &FileIndex<'_>) -> bool {
    source_reads(file, index)
        .iter()
        .any(|reads| reads.is_paired_ended())
}

/// The distinct read lengths of the sequencing runs feeding `file`, in
/// discovery order. Source reads without a recorded read length contribute
/// nothing.
pub fn source_read_lengths(file: &File, index: &FileIndex<'_>) -> Vec<u64> {
    let mut lengths: Vec<u64> = Vec::new();
    for reads in source_reads(file, index) {
        if let Some(length) = reads.read_length {
            if !lengths.contains(&length) {
                lengths.push(length);
            }
        }
    }
    lengths
}

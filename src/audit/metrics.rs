//! Extracting quality metrics from a bucket of files.

use indexmap::IndexMap;

use crate::model::File;
use crate::model::QualityMetric;

/// Collects the quality metrics carrying `tag` in their `@type` set from the
/// given files, deduplicated by `uuid` in discovery order.
///
/// A metric computed across several files (a paired-replicate correlation,
/// say) is embedded under each of them; deduplication by identity returns it
/// once. When `assembly` or `annotation` is given, only files matching that
/// reference contribute.
pub fn metrics_of_type<'a, I>(
    files: I,
    tag: &str,
    assembly: Option<&str>,
    annotation: Option<&str>,
) -> Vec<&'a QualityMetric>
where
    I: IntoIterator<Item = &'a File>,
{
    let mut found: IndexMap<&str, &QualityMetric> = IndexMap::new();

    for file in files {
        if let Some(wanted) = assembly {
            if file.assembly.as_deref() != Some(wanted) {
                continue;
            }
        }
        if let Some(wanted) = annotation {
            if file.genome_annotation.as_deref() != Some(wanted) {
                continue;
            }
        }
        for metric in &file.quality_metrics {
            if metric.is_a(tag) {
                found.entry(metric.uuid.as_str()).or_insert(metric);
            }
        }
    }

    found.into_iter().map(|(_, metric)| metric).collect()
}

/// The metrics of `tag` attached to a single file, without reference
/// filtering. Used by per-file checks and by the duplicate-metric anomaly
/// check.
pub fn file_metrics_of_type<'a>(file: &'a File, tag: &str) -> Vec<&'a QualityMetric> {
    file.quality_metrics
        .iter()
        .filter(|metric| metric.is_a(tag))
        .collect()
}

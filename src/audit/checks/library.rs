//! Library complexity: NRF and PCR bottlenecking coefficients.
//!
//! Shared between the ChIP-seq and ATAC-seq standards, which attach the same
//! measured quantities under assay-specific metric types.

use crate::audit::detail::file_link;
use crate::audit::detail::ratio;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::metrics::file_metrics_of_type;
use crate::audit::standards;
use crate::audit::thresholds::Call;
use crate::audit::thresholds::Cutoffs;
use crate::model::File;

/// Evaluates NRF, PBC1, and PBC2 on each alignment file's library metrics.
///
/// A metric that omits one of the three quantities is simply not evaluated
/// for it: complexity metrics are routinely partial and absence here is not
/// a reportable condition.
pub fn check_complexity(files: &[&File], metric_tag: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for file in files {
        for metric in file_metrics_of_type(file, metric_tag) {
            if let Some(nrf) = metric.number("NRF") {
                findings.extend(classify_nrf(nrf, file));
            }
            if let Some(pbc1) = metric.number("PBC1") {
                findings.extend(classify_bottlenecking("PBC1", pbc1, standards::PBC1, file));
            }
            if let Some(pbc2) = metric.number("PBC2") {
                findings.extend(classify_bottlenecking("PBC2", pbc2, standards::PBC2, file));
            }
        }
    }

    findings
}

fn classify_nrf(nrf: f64, file: &File) -> Option<Finding> {
    let (category, level, verdict) = match standards::NRF.classify(nrf) {
        Call::Critical => ("poor library complexity", Level::NotCompliant, "poor"),
        Call::Poor => ("moderate library complexity", Level::Warning, "moderate"),
        Call::Marginal => ("mild library complexity", Level::Warning, "acceptable but mild"),
        Call::Pass => return None,
    };
    Some(Finding::new(
        category,
        format!(
            "NRF (non-redundant fraction) of alignment file {} is {}. \
             An NRF of 0.9 or higher is recommended, 0.8 is acceptable; \
             this library's complexity is {}.",
            file_link(file),
            ratio(nrf),
            verdict
        ),
        level,
    ))
}

fn classify_bottlenecking(
    coefficient: &str,
    value: f64,
    cutoffs: Cutoffs,
    file: &File,
) -> Option<Finding> {
    let (category, level) = match cutoffs.classify(value) {
        Call::Critical => ("severe bottlenecking", Level::NotCompliant),
        Call::Poor => ("moderate bottlenecking", Level::Warning),
        Call::Marginal => ("mild bottlenecking", Level::Warning),
        Call::Pass => return None,
    };
    Some(Finding::new(
        category,
        format!(
            "{} of alignment file {} is {}, indicating PCR bottlenecking \
             in library preparation ({} or higher passes the recommended \
             standard).",
            coefficient,
            file_link(file),
            ratio(value),
            ratio(cutoffs.marginal)
        ),
        level,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file_with_metric(values: serde_json::Value) -> File {
        let mut metric: crate::model::QualityMetric = serde_json::from_value(values).unwrap();
        metric.kind = vec![String::from("ChipLibraryQualityMetric")];
        metric.uuid = String::from("u-1");
        File {
            id: String::from("/files/ENCFF000AAA/"),
            accession: String::from("ENCFF000AAA"),
            quality_metrics: vec![metric],
            ..Default::default()
        }
    }

    #[test]
    fn test_nrf_point_three_is_exactly_one_poor_complexity_finding() {
        let file = file_with_metric(json!({ "NRF": 0.3 }));
        let findings = check_complexity(&[&file], "ChipLibraryQualityMetric");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "poor library complexity");
        assert_eq!(findings[0].level, Level::NotCompliant);
        assert!(findings[0].detail.contains("0.30"));
    }

    #[test]
    fn test_passing_values_yield_nothing() {
        let file = file_with_metric(json!({ "NRF": 0.95, "PBC1": 0.92, "PBC2": 12.0 }));
        assert!(check_complexity(&[&file], "ChipLibraryQualityMetric").is_empty());
    }

    #[test]
    fn test_infinite_pbc2_passes() {
        let file = file_with_metric(json!({ "PBC2": "Infinity" }));
        assert!(check_complexity(&[&file], "ChipLibraryQualityMetric").is_empty());
    }

    #[test]
    fn test_bottlenecked_library_fires_both_coefficients() {
        let file = file_with_metric(json!({ "PBC1": 0.4, "PBC2": 0.5 }));
        let findings = check_complexity(&[&file], "ChipLibraryQualityMetric");
        assert_eq!(findings.len(), 2);
        assert!(findings
            .iter()
            .all(|f| f.category == "severe bottlenecking" && f.level == Level::NotCompliant));
    }

    #[test]
    fn test_wrong_metric_tag_does_not_apply() {
        let file = file_with_metric(json!({ "NRF": 0.3 }));
        assert!(check_complexity(&[&file], "AtacLibraryQualityMetric").is_empty());
    }
}

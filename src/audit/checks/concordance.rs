//! Replicate concordance: IDR ratio checks and correlation minima.
//!
//! These checks only make sense on experiments whose replication structure
//! is known and replicated; callers gate on that before extracting metrics.

use crate::audit::detail::ratio;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::audit::standards;
use crate::model::QualityMetric;

/// Evaluates IDR rescue and self-consistency ratios.
///
/// Both ratios over their thresholds means the replicates disagree in a way
/// reproducible analysis cannot rescue; exactly one over means borderline
/// concordance. A metric carrying neither ratio is a pipeline bookkeeping
/// problem and comes back as an internal follow-up.
pub fn check_idr_ratios(metrics: &[&QualityMetric]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for metric in metrics {
        let rescue = metric.number("rescue_ratio");
        let self_consistency = metric.number("self_consistency_ratio");

        let (rescue, self_consistency) = match (rescue, self_consistency) {
            (None, None) => {
                findings.push(Finding::new(
                    "missing replicate concordance",
                    format!(
                        "Reproducibility metric {} carries neither a rescue \
                         ratio nor a self-consistency ratio.",
                        metric.id
                    ),
                    Level::InternalAction,
                ));
                continue;
            }
            (rescue, self_consistency) => (
                rescue.unwrap_or(f64::NEG_INFINITY),
                self_consistency.unwrap_or(f64::NEG_INFINITY),
            ),
        };

        let rescue_over = rescue > standards::IDR_RESCUE_RATIO;
        let self_over = self_consistency > standards::IDR_SELF_CONSISTENCY_RATIO;

        if rescue_over && self_over {
            findings.push(Finding::new(
                "insufficient replicate concordance",
                format!(
                    "Replicates of this experiment have a rescue ratio of {} \
                     and a self-consistency ratio of {}; both exceed the \
                     threshold of {}, so the replicates do not pass the \
                     reproducibility standard.",
                    ratio(rescue),
                    ratio(self_consistency),
                    ratio(standards::IDR_RESCUE_RATIO),
                ),
                Level::NotCompliant,
            ));
        } else if rescue_over || self_over {
            findings.push(Finding::new(
                "borderline replicate concordance",
                format!(
                    "Replicates of this experiment have a rescue ratio of {} \
                     and a self-consistency ratio of {}; one of the two \
                     exceeds the threshold of {}, so replicate concordance \
                     is borderline.",
                    ratio(rescue),
                    ratio(self_consistency),
                    ratio(standards::IDR_RESCUE_RATIO),
                ),
                Level::Warning,
            ));
        }
    }

    findings
}

/// Evaluates a correlation quantity (Pearson or Spearman) against the
/// replication-type-dependent minimum.
///
/// `key` names the measured quantity on the metric; `category` and `level`
/// are supplied by the assay family, which own the severity of a concordance
/// miss. Answers empty when the replication structure yields no applicable
/// minimum.
pub fn check_correlation(
    metrics: &[&QualityMetric],
    key: &str,
    replication_type: Option<&str>,
    category: &'static str,
    level: Level,
) -> Vec<Finding> {
    let minimum = match standards::correlation_minimum(replication_type) {
        Some(m) => m,
        None => return Vec::new(),
    };

    let mut findings = Vec::new();
    for metric in metrics {
        let value = match metric.number(key) {
            Some(v) => v,
            None => continue,
        };
        if value < minimum {
            findings.push(Finding::new(
                category,
                format!(
                    "{} of replicates is {}, below the minimum of {} for \
                     {} replicates.",
                    key,
                    ratio(value),
                    ratio(minimum),
                    replication_type.unwrap_or("replicated"),
                ),
                level,
            ));
        }
    }
    findings
}

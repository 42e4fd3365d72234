//! Quality metrics: polymorphic records whose open-ended keys are the
//! measured quantities.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A quality metric attached to one or more files.
///
/// Metrics are polymorphic: the `@type` list carries capability tags (e.g.
/// `"StarQualityMetric"`, `"IDRQualityMetric"`) and checks dispatch by
/// testing tag membership rather than by a closed class hierarchy, since a
/// metric routinely carries several co-occurring tags. The measured values
/// themselves arrive as whatever keys the metric-producing pipeline step
/// emitted, captured here in the flattened `values` map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QualityMetric {
    /// Resource path of the metric.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Type tags of the metric, most specific first.
    #[serde(rename = "@type", default)]
    pub kind: Vec<String>,

    /// Identity of the metric. A metric reachable from several files is the
    /// same metric exactly when the uuids match.
    #[serde(default)]
    pub uuid: String,

    /// Reference assembly the metric was computed against, when applicable.
    #[serde(default)]
    pub assembly: Option<String>,

    /// Genome annotation the metric was computed against, when applicable.
    #[serde(default)]
    pub genome_annotation: Option<String>,

    /// Which processing stage of the alignments the metric describes:
    /// `"filtered"` or `"unfiltered"`, when the pipeline distinguishes.
    #[serde(default)]
    pub processing_stage: Option<String>,

    /// Resource paths of the files this metric was computed from.
    #[serde(default)]
    pub quality_metric_of: Vec<String>,

    /// The measured quantities, keyed by whatever names the producing step
    /// emitted (e.g. `"NRF"`, `"Spearman correlation"`, `"mapped"`).
    #[serde(flatten)]
    pub values: serde_json::Map<String, Value>,
}

impl QualityMetric {
    /// Whether this metric carries the given type tag.
    pub fn is_a(&self, tag: &str) -> bool {
        self.kind.iter().any(|k| k == tag)
    }

    /// The raw measured value under `key`, when present.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The measured value under `key` as a float.
    ///
    /// Three inputs produce `Some`: a JSON number, and the strings
    /// `"Infinity"` / `"-Infinity"`, which ratio metrics (notably PBC2 with
    /// zero two-read duplicates) legitimately emit. Everything else —
    /// including the JSON `false` and `null` the upstream pipelines use as
    /// an "undeterminable" sentinel — answers `None`. `Some(0.0)` and
    /// `None` therefore remain distinct: a measured zero classifies against
    /// thresholds, an absent measurement becomes a missing-data finding.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) if s == "Infinity" => Some(f64::INFINITY),
            Some(Value::String(s)) if s == "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        }
    }

}

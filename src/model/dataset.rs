//! Top-level entities: experiments, analyses, and their award/target/pipeline
//! sub-objects.

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::model::file::File;
use crate::model::replicate::Replicate;

/// The funding award an experiment was produced under.
///
/// The `rfa` string (e.g. `"ENCODE4"`, `"modERN"`) gates which data
/// standards apply to the experiment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Award {
    /// Resource path of the award.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// The request-for-applications generation this award belongs to.
    #[serde(default)]
    pub rfa: Option<String>,
}

/// The molecular target of an assay (e.g. a histone mark or a transcription
/// factor for ChIP-seq).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Target {
    /// Resource path of the target.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Unique target name, including the organism suffix (e.g.
    /// `"H3K9me3-human"`).
    #[serde(default)]
    pub name: String,

    /// Display label (e.g. `"H3K9me3"`).
    #[serde(default)]
    pub label: String,

    /// Capability tags describing what the target is investigated as. The
    /// tags relevant to auditing are `"broad histone mark"`,
    /// `"narrow histone mark"`, `"transcription factor"`, and `"control"`.
    #[serde(default)]
    pub investigated_as: Vec<String>,
}

impl Target {
    /// Whether this target carries the given `investigated_as` tag.
    pub fn investigated_as(&self, tag: &str) -> bool {
        self.investigated_as.iter().any(|t| t == tag)
    }
}

/// A processing pipeline, as embedded under a file's analysis step or on an
/// analysis object.
///
/// Pipeline titles are free-text strings defined by the pipeline registry of
/// the hosting system, not an enum: checks match them by exact string
/// membership in per-assay allowlists.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Pipeline {
    /// Resource path of the pipeline.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Registry title of the pipeline.
    #[serde(default)]
    pub title: String,
}

/// A fully-embedded experiment record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Experiment {
    /// Resource path of the experiment.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Type tags of the record, most specific first.
    #[serde(rename = "@type", default)]
    pub kind: Vec<String>,

    /// Accession of the experiment.
    #[serde(default)]
    pub accession: String,

    /// Object status (e.g. `"released"`, `"in progress"`).
    #[serde(default)]
    pub status: String,

    /// Ontology term name of the assay (e.g. `"ChIP-seq"`).
    #[serde(default)]
    pub assay_term_name: String,

    /// The award this experiment was produced under.
    #[serde(default)]
    pub award: Award,

    /// The assay target, when the assay has one.
    #[serde(default)]
    pub target: Option<Target>,

    /// Replicates of the experiment, in submission order.
    #[serde(default)]
    pub replicates: Vec<Replicate>,

    /// Candidate control experiments, embedded shallowly.
    #[serde(default)]
    pub possible_controls: Vec<Experiment>,

    /// All files attached to the experiment, including superseded ones.
    #[serde(default)]
    pub original_files: Vec<File>,

    /// Files contributed from other datasets (e.g. reference annotations or
    /// control alignments) that this experiment's processing used.
    #[serde(default)]
    pub contributing_files: Vec<File>,

    /// External database cross-references (e.g. `"GEO:GSE12345"`).
    #[serde(default)]
    pub dbxrefs: Vec<String>,

    /// Replication structure computed by the hosting system: one of
    /// `"unreplicated"`, `"isogenic"`, or `"anisogenic"`. Absent when the
    /// replication structure could not be determined.
    #[serde(default)]
    pub replication_type: Option<String>,

    /// Internal curation tags.
    #[serde(default)]
    pub internal_tags: Vec<String>,
}

impl Experiment {
    /// The award RFA, or an empty string when the award carries none.
    pub fn rfa(&self) -> &str {
        self.award.rfa.as_deref().unwrap_or("")
    }

    /// Whether the replication structure is known and replicated.
    ///
    /// Concordance checks only fire on experiments that answer `true` here:
    /// an absent replication type means the structure is undetermined, which
    /// is distinct from known-unreplicated.
    pub fn is_replicated(&self) -> bool {
        matches!(
            self.replication_type.as_deref(),
            Some(t) if t != "unreplicated"
        )
    }

    /// Distinct biological replicate numbers present on the experiment.
    pub fn biological_replicate_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self
            .replicates
            .iter()
            .filter_map(|r| r.biological_replicate_number)
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}

/// A fully-embedded analysis record: one processing run over one or more
/// datasets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Analysis {
    /// Resource path of the analysis.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Type tags of the record, most specific first.
    #[serde(rename = "@type", default)]
    pub kind: Vec<String>,

    /// Accession of the analysis.
    #[serde(default)]
    pub accession: String,

    /// Object status.
    #[serde(default)]
    pub status: String,

    /// Ontology term name of the assay of the underlying dataset(s).
    #[serde(default)]
    pub assay_term_name: String,

    /// The datasets this analysis processed, embedded.
    #[serde(default)]
    pub datasets: Vec<Experiment>,

    /// Files produced by this analysis.
    #[serde(default)]
    pub files: Vec<File>,

    /// Pipelines that produced the analysis files.
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,

    /// RFAs of the awards the pipelines belong to.
    #[serde(default)]
    pub pipeline_award_rfas: Vec<String>,

    /// Reference assembly of the analysis, when uniform.
    #[serde(default)]
    pub assembly: Option<String>,
}

impl Analysis {
    /// The single dataset of this analysis, when there is exactly one.
    ///
    /// Standards checks deliberately skip multi-dataset analyses.
    pub fn sole_dataset(&self) -> Option<&Experiment> {
        match self.datasets.as_slice() {
            [dataset] => Some(dataset),
            _ => None,
        }
    }

    /// The single pipeline award RFA, when there is exactly one distinct one.
    pub fn sole_pipeline_rfa(&self) -> Option<&str> {
        let rfas: Vec<&str> = self
            .pipeline_award_rfas
            .iter()
            .map(String::as_str)
            .unique()
            .collect();
        match rfas.as_slice() {
            [rfa] => Some(rfa),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_investigated_as() {
        let target = Target {
            investigated_as: vec![String::from("broad histone mark")],
            ..Default::default()
        };
        assert!(target.investigated_as("broad histone mark"));
        assert!(!target.investigated_as("transcription factor"));
    }

    #[test]
    fn test_replication_type_gating() {
        let mut experiment = Experiment::default();
        assert!(!experiment.is_replicated());

        experiment.replication_type = Some(String::from("unreplicated"));
        assert!(!experiment.is_replicated());

        experiment.replication_type = Some(String::from("isogenic"));
        assert!(experiment.is_replicated());

        experiment.replication_type = Some(String::from("anisogenic"));
        assert!(experiment.is_replicated());
    }

    #[test]
    fn test_sole_dataset_and_rfa() {
        let mut analysis = Analysis {
            datasets: vec![Experiment::default()],
            pipeline_award_rfas: vec![String::from("ENCODE4"), String::from("ENCODE4")],
            ..Default::default()
        };
        assert!(analysis.sole_dataset().is_some());
        assert_eq!(analysis.sole_pipeline_rfa(), Some("ENCODE4"));

        analysis.datasets.push(Experiment::default());
        analysis.pipeline_award_rfas.push(String::from("ENCODE3"));
        assert!(analysis.sole_dataset().is_none());
        assert_eq!(analysis.sole_pipeline_rfa(), None);
    }

    #[test]
    fn test_deserializes_with_absent_optional_keys() {
        let experiment: Experiment = serde_json::from_value(serde_json::json!({
            "@id": "/experiments/ENCSR000AAA/",
            "accession": "ENCSR000AAA",
            "assay_term_name": "ChIP-seq"
        }))
        .unwrap();
        assert_eq!(experiment.assay_term_name, "ChIP-seq");
        assert!(experiment.target.is_none());
        assert!(experiment.original_files.is_empty());
        assert_eq!(experiment.rfa(), "");
    }
}

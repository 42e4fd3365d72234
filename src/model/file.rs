//! Files attached to an entity, along with the analysis-step path used to
//! recover which pipeline produced a file.

use serde::Deserialize;
use serde::Serialize;

use crate::model::dataset::Pipeline;
use crate::model::metric::QualityMetric;

/// The analysis step a file was produced by.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisStep {
    /// Resource path of the step.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Pipelines this step belongs to.
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}

/// The versioned analysis step embedded on a processed file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisStepVersion {
    /// Resource path of the step version.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// The step itself.
    #[serde(default)]
    pub analysis_step: Option<AnalysisStep>,
}

/// Back-reference from a file to the replicate it belongs to.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FileReplicate {
    /// Resource path of the replicate.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Biological replicate number.
    #[serde(default)]
    pub biological_replicate_number: Option<u32>,

    /// Technical replicate number.
    #[serde(default)]
    pub technical_replicate_number: Option<u32>,
}

/// The lab that submitted a file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Lab {
    /// Resource path of the lab.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Display title of the lab.
    #[serde(default)]
    pub title: String,
}

/// The sequencing platform a raw file was produced on.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Platform {
    /// Resource path of the platform.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Display term of the platform.
    #[serde(default)]
    pub term_name: String,
}

/// A fully-embedded file record.
///
/// Raw files (sequencing reads) carry `read_length`, `run_type`, and
/// `platform`; processed files carry `derived_from`, `assembly`, quality
/// metrics, and their analysis-step path. Either kind may leave any of these
/// absent on real data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct File {
    /// Resource path of the file.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Accession of the file.
    #[serde(default)]
    pub accession: String,

    /// Object status (e.g. `"released"`, `"uploading"`, `"revoked"`).
    #[serde(default)]
    pub status: String,

    /// Container format of the file (e.g. `"fastq"`, `"bam"`, `"bed"`).
    #[serde(default)]
    pub file_format: String,

    /// Semantic content of the file (e.g. `"alignments"`, `"peaks"`).
    #[serde(default)]
    pub output_type: String,

    /// Reference assembly the file is mapped to, for mapped formats.
    #[serde(default)]
    pub assembly: Option<String>,

    /// Genome annotation version, for quantification formats.
    #[serde(default)]
    pub genome_annotation: Option<String>,

    /// Resource path of the dataset the file belongs to.
    #[serde(default)]
    pub dataset: String,

    /// Resource paths of the files this file was derived from.
    #[serde(default)]
    pub derived_from: Vec<String>,

    /// Quality metrics computed from this file.
    #[serde(default)]
    pub quality_metrics: Vec<QualityMetric>,

    /// The replicate this file belongs to, when it belongs to one.
    #[serde(default)]
    pub replicate: Option<FileReplicate>,

    /// Biological replicate numbers this file covers.
    #[serde(default)]
    pub biological_replicates: Vec<u32>,

    /// Read length in base pairs, for sequencing-read files.
    #[serde(default)]
    pub read_length: Option<u64>,

    /// Run type of the sequencing run: `"single-ended"` or `"paired-ended"`.
    #[serde(default)]
    pub run_type: Option<String>,

    /// Sequencing platform, for sequencing-read files.
    #[serde(default)]
    pub platform: Option<Platform>,

    /// Submitting lab.
    #[serde(default)]
    pub lab: Option<Lab>,

    /// Whether the hosting system marks this file as the preferred default
    /// among its siblings.
    #[serde(default)]
    pub preferred_default: bool,

    /// The analysis step version that produced this file.
    #[serde(default)]
    pub analysis_step_version: Option<AnalysisStepVersion>,
}

impl File {
    /// Titles of the pipelines that produced this file, in embedding order.
    ///
    /// Resolved through `analysis_step_version.analysis_step.pipelines`; an
    /// absent link anywhere along the path yields an empty list, not an
    /// error. Raw files have no analysis step and answer empty.
    pub fn pipeline_titles(&self) -> Vec<&str> {
        self.analysis_step_version
            .as_ref()
            .and_then(|asv| asv.analysis_step.as_ref())
            .map(|step| {
                step.pipelines
                    .iter()
                    .map(|pipeline| pipeline.title.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether any of this file's pipelines has a title in `titles`.
    pub fn produced_by_any(&self, titles: &[&str]) -> bool {
        self.pipeline_titles()
            .iter()
            .any(|title| titles.contains(title))
    }

    /// Resource path of the first pipeline that produced this file, when
    /// known. Used to cross-link findings back to the pipeline involved.
    pub fn pipeline_id(&self) -> Option<&str> {
        self.analysis_step_version
            .as_ref()
            .and_then(|asv| asv.analysis_step.as_ref())
            .and_then(|step| step.pipelines.first())
            .map(|pipeline| pipeline.id.as_str())
    }

    /// Whether this file is a paired-end sequencing run.
    pub fn is_paired_ended(&self) -> bool {
        self.run_type.as_deref() == Some("paired-ended")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_pipeline(title: &str) -> File {
        File {
            analysis_step_version: Some(AnalysisStepVersion {
                analysis_step: Some(AnalysisStep {
                    pipelines: vec![Pipeline {
                        id: String::from("/pipelines/ENCPL001XYZ/"),
                        title: String::from(title),
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pipeline_titles_resolve_through_the_step_path() {
        let file = file_with_pipeline("Histone ChIP-seq");
        assert_eq!(file.pipeline_titles(), vec!["Histone ChIP-seq"]);
        assert!(file.produced_by_any(&["Histone ChIP-seq", "Raw mapping with no filtration"]));
        assert!(!file.produced_by_any(&["DNase-HOTSPOT"]));
        assert_eq!(file.pipeline_id(), Some("/pipelines/ENCPL001XYZ/"));
    }

    #[test]
    fn test_pipeline_titles_tolerate_absent_links() {
        let mut file = File::default();
        assert!(file.pipeline_titles().is_empty());
        assert_eq!(file.pipeline_id(), None);

        file.analysis_step_version = Some(AnalysisStepVersion::default());
        assert!(file.pipeline_titles().is_empty());
    }
}

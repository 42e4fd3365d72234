//! Replicates and the library/biosample/antibody chain hanging off of them.

use serde::Deserialize;
use serde::Serialize;

/// The organism of a biosample donor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Organism {
    /// Resource path of the organism.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Scientific name (e.g. `"Homo sapiens"`).
    #[serde(default)]
    pub scientific_name: String,
}

/// The biological sample a library was prepared from.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Biosample {
    /// Resource path of the biosample.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Accession of the biosample.
    #[serde(default)]
    pub accession: String,

    /// Organism of the biosample.
    #[serde(default)]
    pub organism: Option<Organism>,
}

/// A nucleic-acid library prepared for sequencing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Library {
    /// Resource path of the library.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Accession of the library.
    #[serde(default)]
    pub accession: String,

    /// Spike-in datasets added to the library.
    #[serde(default)]
    pub spikeins_used: Vec<String>,

    /// Protocol documents attached to the library.
    #[serde(default)]
    pub documents: Vec<String>,

    /// The biosample the library was prepared from.
    #[serde(default)]
    pub biosample: Option<Biosample>,
}

/// An antibody lot used for an immunoprecipitation assay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Antibody {
    /// Resource path of the antibody lot.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Accession of the antibody lot.
    #[serde(default)]
    pub accession: String,

    /// Characterization records for the lot.
    #[serde(default)]
    pub characterizations: Vec<String>,

    /// Targets the lot is characterized against.
    #[serde(default)]
    pub targets: Vec<String>,
}

/// One replicate of an experiment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Replicate {
    /// Resource path of the replicate.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Object status.
    #[serde(default)]
    pub status: String,

    /// Biological replicate number.
    #[serde(default)]
    pub biological_replicate_number: Option<u32>,

    /// Technical replicate number within the biological replicate.
    #[serde(default)]
    pub technical_replicate_number: Option<u32>,

    /// The library sequenced for this replicate, when attached.
    #[serde(default)]
    pub library: Option<Library>,

    /// The antibody used for this replicate, for immunoprecipitation assays.
    #[serde(default)]
    pub antibody: Option<Antibody>,
}

//! Entity-level metadata checks that need no file index: replication
//! structure, libraries and documents, targets and antibodies, controls,
//! external submission, and spike-ins.

use indexmap::IndexSet;

use crate::audit::detail::link_to;
use crate::audit::finding::Finding;
use crate::audit::finding::Level;
use crate::model::Experiment;

/// Statuses under which metadata completeness is not audited: the record is
/// on its way out rather than on its way in.
const RETIRED_STATUSES: &[&str] = &["deleted", "revoked", "replaced"];

/// Assays that must name a molecular target.
const TARGET_REQUIRED_ASSAYS: &[&str] = &["ChIP-seq", "ChIA-PET"];

/// Assays that must name candidate control experiments.
const CONTROL_REQUIRED_ASSAYS: &[&str] = &["ChIP-seq", "ChIA-PET"];

/// Assays whose libraries must carry spike-in datasets for quantification
/// to be calibrated.
const SPIKE_IN_ASSAYS: &[&str] = &["RNA-seq", "polyA plus RNA-seq", "polyA minus RNA-seq"];

fn retired(experiment: &Experiment) -> bool {
    RETIRED_STATUSES.contains(&experiment.status.as_str())
}

/// Replication structure: every experiment needs replicates, and most need
/// more than one biological replicate.
pub fn check_replication(experiment: &Experiment) -> Vec<Finding> {
    if retired(experiment) {
        return Vec::new();
    }

    if experiment.replicates.is_empty() {
        return vec![Finding::new(
            "missing replicates",
            format!(
                "Experiment {} has no replicates.",
                link_to(&experiment.id)
            ),
            Level::Error,
        )];
    }

    // Control experiments are exempt: a single input replicate is normal.
    let is_control = experiment
        .target
        .as_ref()
        .map(|target| target.investigated_as("control"))
        .unwrap_or(false);

    if !is_control && experiment.biological_replicate_numbers().len() == 1 {
        return vec![Finding::new(
            "unreplicated experiment",
            format!(
                "Experiment {} has only one biological replicate.",
                link_to(&experiment.id)
            ),
            Level::NotCompliant,
        )];
    }

    Vec::new()
}

/// Every replicate needs a library, and every library needs protocol
/// documents.
pub fn check_replicate_libraries(experiment: &Experiment) -> Vec<Finding> {
    if retired(experiment) {
        return Vec::new();
    }

    let mut findings = Vec::new();
    let mut undocumented: IndexSet<&str> = IndexSet::new();

    for replicate in &experiment.replicates {
        match &replicate.library {
            None => findings.push(Finding::new(
                "replicate with no library",
                format!("Replicate {} has no library.", link_to(&replicate.id)),
                Level::Error,
            )),
            Some(library) => {
                if library.documents.is_empty() {
                    undocumented.insert(library.id.as_str());
                }
            }
        }
    }

    for library in undocumented {
        findings.push(Finding::new(
            "missing documents",
            format!(
                "Library {} has no attached protocol documents.",
                link_to(library)
            ),
            Level::NotCompliant,
        ));
    }

    findings
}

/// Immunoprecipitation assays must name their target.
pub fn check_target(experiment: &Experiment) -> Vec<Finding> {
    if retired(experiment) {
        return Vec::new();
    }
    if !TARGET_REQUIRED_ASSAYS.contains(&experiment.assay_term_name.as_str()) {
        return Vec::new();
    }
    if experiment.target.is_some() {
        return Vec::new();
    }
    vec![Finding::new(
        "missing target",
        format!(
            "{} experiment {} has no target.",
            experiment.assay_term_name,
            link_to(&experiment.id)
        ),
        Level::Error,
    )]
}

/// ChIP-seq replicates need a characterized antibody. Control
/// immunoprecipitations are exempt from the antibody requirement entirely.
pub fn check_antibody(experiment: &Experiment) -> Vec<Finding> {
    if retired(experiment) {
        return Vec::new();
    }
    if experiment.assay_term_name != "ChIP-seq" {
        return Vec::new();
    }
    let target = match &experiment.target {
        Some(target) => target,
        None => return Vec::new(),
    };
    if target.investigated_as("control") {
        return Vec::new();
    }

    let mut findings = Vec::new();
    let mut uncharacterized: IndexSet<&str> = IndexSet::new();

    for replicate in &experiment.replicates {
        match &replicate.antibody {
            None => findings.push(Finding::new(
                "missing antibody",
                format!(
                    "ChIP-seq replicate {} has no antibody.",
                    link_to(&replicate.id)
                ),
                Level::NotCompliant,
            )),
            Some(antibody) => {
                if antibody.characterizations.is_empty() {
                    uncharacterized.insert(antibody.id.as_str());
                }
            }
        }
    }

    for antibody in uncharacterized {
        findings.push(Finding::new(
            "uncharacterized antibody",
            format!(
                "Antibody {} has no characterizations.",
                link_to(antibody)
            ),
            Level::NotCompliant,
        ));
    }

    findings
}

/// Assays requiring controls must name candidate controls, and the
/// candidates must actually be controls.
pub fn check_controls(experiment: &Experiment) -> Vec<Finding> {
    if retired(experiment) {
        return Vec::new();
    }
    if !CONTROL_REQUIRED_ASSAYS.contains(&experiment.assay_term_name.as_str()) {
        return Vec::new();
    }
    let target = match &experiment.target {
        Some(target) => target,
        None => return Vec::new(),
    };
    if target.investigated_as("control") {
        return Vec::new();
    }

    if experiment.possible_controls.is_empty() {
        return vec![Finding::new(
            "missing possible_controls",
            format!(
                "{} experiment {} names no candidate control experiments.",
                experiment.assay_term_name,
                link_to(&experiment.id)
            ),
            Level::NotCompliant,
        )];
    }

    let mut findings = Vec::new();
    for control in &experiment.possible_controls {
        if let Some(control_target) = &control.target {
            if !control_target.investigated_as("control") {
                findings.push(Finding::new(
                    "invalid possible_control",
                    format!(
                        "Experiment {} names {} as a possible control, but \
                         its target {} is not a control.",
                        link_to(&experiment.id),
                        link_to(&control.id),
                        control_target.name,
                    ),
                    Level::Error,
                ));
            }
        }
    }
    findings
}

/// Released experiments are expected to have been submitted to GEO.
pub fn check_geo_submission(experiment: &Experiment) -> Vec<Finding> {
    if experiment.status != "released" {
        return Vec::new();
    }
    if experiment
        .dbxrefs
        .iter()
        .any(|dbxref| dbxref.starts_with("GEO:"))
    {
        return Vec::new();
    }
    vec![Finding::new(
        "experiment not submitted to GEO",
        format!(
            "Released experiment {} has no GEO cross-reference.",
            link_to(&experiment.id)
        ),
        Level::InternalAction,
    )]
}

/// Long-RNA libraries need spike-in datasets for calibrated quantification.
pub fn check_spikeins(experiment: &Experiment) -> Vec<Finding> {
    if retired(experiment) {
        return Vec::new();
    }
    if !SPIKE_IN_ASSAYS.contains(&experiment.assay_term_name.as_str()) {
        return Vec::new();
    }

    let mut findings = Vec::new();
    for replicate in &experiment.replicates {
        let library = match &replicate.library {
            Some(library) => library,
            None => continue,
        };
        if library.spikeins_used.is_empty() {
            findings.push(Finding::new(
                "missing spikeins",
                format!(
                    "Library {} of {} experiment {} has no spike-ins.",
                    link_to(&library.id),
                    experiment.assay_term_name,
                    link_to(&experiment.id),
                ),
                Level::NotCompliant,
            ));
        }
    }
    findings
}

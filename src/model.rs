//! The embedded metadata model consumed by the audit engine.
//!
//! Every type in this module is a read-only snapshot: the storage layer of
//! the hosting system materializes an entity with all of its linked
//! sub-objects embedded, serializes it to JSON, and hands it to us. The
//! audit engine never creates, updates, or deletes any of these records.
//!
//! Two disciplines apply throughout:
//!
//! * Every nested relationship that can be absent on real data is an
//!   [`Option`] (or an empty collection), and every accessor is total. A
//!   missing sub-object means "feature not present", never a crash.
//! * Unknown keys are ignored on deserialization, except on
//!   [`QualityMetric`](metric::QualityMetric) where they are collected: the
//!   open-ended keys of a metric are its measured quantities.

pub mod dataset;
pub mod file;
pub mod metric;
pub mod replicate;

pub use self::dataset::Analysis;
pub use self::dataset::Award;
pub use self::dataset::Experiment;
pub use self::dataset::Pipeline;
pub use self::dataset::Target;
pub use self::file::File;
pub use self::metric::QualityMetric;
pub use self::replicate::Replicate;

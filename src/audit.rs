//! The audit engine: entity graph in, findings out.
//!
//! The engine is a pure computation over an in-memory graph. It issues no
//! network or database calls, builds its file index exactly once per
//! invocation, and runs every registered check unconditionally — checks are
//! independent, side-effect-free, and never short-circuit one another. A
//! check that cannot apply returns nothing; a check that cannot evaluate
//! something it should be able to evaluate reports that as a finding. No
//! check ever fails with an error on malformed data.

pub mod analysis;
pub mod checks;
pub mod detail;
pub mod dispatch;
pub mod experiment;
pub mod finding;
pub mod graph;
pub mod index;
pub mod metrics;
pub mod standards;
pub mod thresholds;

pub use self::analysis::audit_analysis;
pub use self::experiment::audit_experiment;
pub use self::finding::Finding;
pub use self::finding::Level;
pub use self::index::FileIndex;

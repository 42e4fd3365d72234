//! `dqa` is a command line tool and library for auditing functional genomics
//! metadata against externally defined data quality standards. This package
//! is composed of both a library crate, as well as a binary crate.
//!
//! The library takes one fully-embedded metadata graph (an experiment or an
//! analysis, along with its files, replicates, and quality metrics), routes
//! it through a registry of independent quality checks, and returns a flat
//! list of severity-tagged findings. It never mutates its input and it never
//! fails on malformed data: data problems come back as findings.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod audit;
pub mod commands;
pub mod model;

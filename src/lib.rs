//! Buildref - assembly reference statistics for build logs
//!
//! This library extracts `/reference:` arguments from the compiler invocations
//! in a build log, counts how often each assembly is referenced, and produces
//! the rows for a ranked report and a frequency distribution report.

pub mod config;
pub mod log;
pub mod report;
pub mod stats;

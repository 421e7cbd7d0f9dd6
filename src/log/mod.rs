//! # Build Log Module
//!
//! Reads compiler invocations out of a build log.
//!
//! ## Supported Logs
//!
//! | Source | Type |
//! |--------|------|
//! | Text log (`dotnet build -v:n > build.log`, `-flp` file logger) | [`TextLogReader`] |
//! | In-memory list of command lines | [`VecSource`] |
//!
//! Everything downstream only sees a `Vec<String>` of command lines, so other
//! log formats can be added by implementing [`InvocationSource`].

mod reader;

pub use reader::{InvocationSource, LogError, TextLogReader, VecSource, DEFAULT_COMPILERS};

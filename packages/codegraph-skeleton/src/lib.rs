//! codegraph-skeleton: ingests a Python project, extracts its structural and
//! referential skeleton as a typed graph, fingerprints every node for
//! incremental re-ingestion, and hands the result to an external graph store
//! through the `GraphStore` port.
//!
//! Feature-first layout, mirroring the teacher crate:
//! - `domain`   : the typed graph and the hexagonal ports it is handed across
//! - `features` : the C1-C6 pipeline stages (extractor, symtab, resolver,
//!                fingerprint, changes, emitter)
//! - `config`   : `AnalyzerConfig`
//! - `shared`   : error types and tuning constants
//! - `analyzer` : the single public orchestration entry point

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod features;
pub mod shared;

pub use analyzer::analyze_project;
pub use domain::model::AnalysisResult;

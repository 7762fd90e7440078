//! C1: Syntactic Extractor. Converts one source file's concrete syntax tree
//! into typed node records (module, class, function, variable, import,
//! decorator, parameter, reference). Parsing failures are never fatal: a
//! failed file yields an empty `Module` and an error string, and the
//! resolver moves on.

mod python;

pub use python::extract_module;

//! Hexagonal ports: the seams where this crate hands off to an external
//! collaborator instead of owning the concern itself.

use crate::domain::model::{AnalysisResult, Relationship};
use crate::shared::error::Result;

/// The graph-database driver is an external collaborator, referenced only by
/// this interface. No implementation ships in this crate; callers provide
/// their own adapter.
pub trait GraphStore: Send + Sync {
    /// Upsert a batch of relationships (and, transitively through their
    /// endpoints, the nodes they reference). Implementations decide their own
    /// transaction/batching strategy; the emitter only guarantees ordering
    /// (see `features::emitter`).
    fn upsert_relationships(&self, relationships: &[Relationship]) -> Result<()>;

    /// Persist or refresh the fingerprint map for incremental re-ingestion.
    fn upsert_fingerprints(&self, fingerprints: &std::collections::HashMap<String, String>) -> Result<()>;
}

/// A no-op store used by tests and by callers who only want the in-memory
/// `AnalysisResult` and do not need a live backing store.
#[derive(Debug, Default)]
pub struct NullGraphStore;

impl GraphStore for NullGraphStore {
    fn upsert_relationships(&self, _relationships: &[Relationship]) -> Result<()> {
        Ok(())
    }

    fn upsert_fingerprints(&self, _fingerprints: &std::collections::HashMap<String, String>) -> Result<()> {
        Ok(())
    }
}

/// Drive an `AnalysisResult` into a `GraphStore`, in the ordering §6/C6
/// requires: node upserts are implicit in relationship upserts here, since
/// this crate does not emit bare node records, only edges; callers needing a
/// separate node-upsert phase can walk `AnalysisResult` directly.
pub fn publish(store: &dyn GraphStore, result: &AnalysisResult) -> Result<()> {
    store.upsert_relationships(&result.relationships)?;
    store.upsert_fingerprints(&result.fingerprints)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_store_accepts_everything() {
        let store = NullGraphStore;
        let result = AnalysisResult::default();
        assert!(publish(&store, &result).is_ok());
    }
}

//! Embedding operators: how a candidate is evaluated against one transaction.

use std::sync::Arc;

use ftm_subtree::{StoreError, SubtreeIsoEngine};

use crate::candidates::Candidate;
use crate::support::SubtreeIsoDataStore;

/// Evaluates a candidate on the transaction of one support set element.
///
/// `element` belongs to the candidate's kept parent. An implementation may
/// use the element's store as a base or ignore it. If the result has
/// `found_iso == false`, the miner drops it, store included.
pub trait EmbeddingOperator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Evaluate `candidate` on `element.transaction`.
    fn evaluate(
        &self,
        element: &SubtreeIsoDataStore,
        candidate: &Candidate,
    ) -> Result<SubtreeIsoDataStore, StoreError>;
}

/// Derives the candidate's store from the parent's store.
#[derive(Clone, Copy, Debug, Default)]
pub struct IterativeSubtreeCheck;

impl EmbeddingOperator for IterativeSubtreeCheck {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn evaluate(
        &self,
        element: &SubtreeIsoDataStore,
        candidate: &Candidate,
    ) -> Result<SubtreeIsoDataStore, StoreError> {
        let transaction = &element.transaction;
        let engine = SubtreeIsoEngine::new(transaction.tree(), transaction.postorder());
        let result = engine.derive(&element.store, &candidate.tree, candidate.extension)?;
        Ok(SubtreeIsoDataStore {
            transaction: Arc::clone(transaction),
            pattern: Arc::clone(&candidate.tree),
            store: Arc::new(result.store),
            found_iso: result.found_iso,
        })
    }
}

/// Fills the candidate's store from scratch, ignoring the parent's store.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoniterativeSubtreeCheck;

impl EmbeddingOperator for NoniterativeSubtreeCheck {
    fn name(&self) -> &'static str {
        "noniterative"
    }

    fn evaluate(
        &self,
        element: &SubtreeIsoDataStore,
        candidate: &Candidate,
    ) -> Result<SubtreeIsoDataStore, StoreError> {
        let transaction = &element.transaction;
        let engine = SubtreeIsoEngine::new(transaction.tree(), transaction.postorder());
        let result = engine.from_scratch(&candidate.tree)?;
        Ok(SubtreeIsoDataStore {
            transaction: Arc::clone(transaction),
            pattern: Arc::clone(&candidate.tree),
            store: Arc::new(result.store),
            found_iso: result.found_iso,
        })
    }
}

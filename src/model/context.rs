//! Request-scoped transaction context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context propagated through one enrichment run.
///
/// Carries the caller-supplied transaction identifier that keys every
/// progress and diagnostic event. Passed explicitly through the pipeline;
/// there is no process-global request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionContext {
    pub transaction_id: String,
    pub origin: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl TransactionContext {
    /// Create a context with a freshly generated transaction id.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            transaction_id: generate_transaction_id(),
            origin: origin.into(),
            destination: destination.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a context with a caller-supplied transaction id.
    pub fn with_id(
        transaction_id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            origin: origin.into(),
            destination: destination.into(),
            created_at: Utc::now(),
        }
    }

    /// Milliseconds elapsed since the context was created.
    pub fn elapsed_ms(&self) -> u64 {
        (Utc::now() - self.created_at).num_milliseconds().max(0) as u64
    }
}

/// Generate a unique transaction id.
///
/// Format: `TXID-{timestamp}-{uuid}`, e.g.
/// `TXID-20250130T143052-7f3e4a2b-9c1d-4e8f-a5b3-6d2c8f1e9a4b`.
pub fn generate_transaction_id() -> String {
    let timestamp = Utc::now().format("%Y%m%dT%H%M%S");
    format!("TXID-{}-{}", timestamp, Uuid::new_v4())
}

use thiserror::Error;

/// Failures surfaced to the user for a single editor action
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to decode model from {source_name}")]
    Decode {
        source_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("viewport was detached before the model finished loading")]
    Detached,

    #[error("model decoder stopped before producing a result")]
    WorkerLost,
}

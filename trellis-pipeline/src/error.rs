use thiserror::Error;
use trellis_graph_json_ld::NormalizeError;
use trellis_query::QueryError;
use trellis_store::StoreError;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Normalization failed; nothing was ingested.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// A triple failed store validation during ingest.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The query pattern failed validation.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// An ingest task panicked or was cancelled.
    #[error("pipeline task failed: {0}")]
    Task(String),
}

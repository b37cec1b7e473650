//! Error types for trace ingestion

use crate::record::ParseRecordError;
use thiserror::Error;

/// Errors raised while turning a trace log into series
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: ParseRecordError,
    },

    #[error("Flow key {0:?} appears more than once in the flow table")]
    DuplicateFlowKey(String),

    #[error("Flow index {0} is assigned to more than one key")]
    DuplicateFlowIndex(usize),

    #[error("Flow index {index} out of range for a table of {len} keys")]
    FlowIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid ingest configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ─── Error ──────────────────────────────────────────────────────────────────
use crate::types::{RecordId, RecordType};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("id counter exhausted")]
    IdSpaceExhausted,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("unknown record type: {0}")]
    UnknownRecordType(String),
    #[error("no factory registered for {0}")]
    MissingFactory(RecordType),
    #[error("invalid record properties: {0}")]
    InvalidProps(#[from] serde_json::Error),
    #[error("case {case} does not belong to collection {collection}")]
    ForeignCase { case: RecordId, collection: RecordId },
}

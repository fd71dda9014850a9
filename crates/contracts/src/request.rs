//! IngestionRequest - validator output, executor input

use serde::Serialize;

use crate::{Credential, DataSource, FieldMapping};

/// Validated batch ingestion descriptor
///
/// Only the validator builds this; holding one means every data source rule passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionRequest {
    pub index_name: String,
    pub field_map: FieldMapping,
    #[serde(skip)]
    pub credential: Credential,
    pub data_source: DataSource,
}

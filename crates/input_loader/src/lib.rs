//! # Input Loader
//!
//! Batch ingestion descriptor loading and validation.
//!
//! Responsibilities:
//! - Parse JSON/TOML descriptor files
//! - Validate the `data_source` union and the index name
//! - Produce a typed `IngestionRequest`
//!
//! # Example
//!
//! ```no_run
//! use input_loader::InputLoader;
//! use std::path::Path;
//!
//! let input = InputLoader::load_from_path(Path::new("ingest.json")).unwrap();
//! let request = input_loader::validate(&input).unwrap();
//! println!("Index: {}", request.index_name);
//! ```

mod parser;
mod validator;

pub use contracts::{BatchIngestionInput, IngestionRequest, ValidationError};
pub use parser::InputFormat;
pub use self::validator::validate;

use contracts::ContractError;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Load-and-validate failure
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("{} in the batch ingestion input: {}", .0.kind(), .0)]
    Validation(#[from] ValidationError),
}

/// Descriptor loader
///
/// Provides static methods to load descriptors from files or strings.
pub struct InputLoader;

impl InputLoader {
    /// Load descriptor from file path
    ///
    /// Automatically detects format from file extension (.json / .toml).
    /// The descriptor is parsed but not validated.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    pub fn load_from_path(path: &Path) -> Result<BatchIngestionInput, ContractError> {
        let format = Self::detect_format(path)?;
        debug!(path = %path.display(), format = ?format, "Loading batch ingestion input");
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load descriptor from string
    pub fn load_from_str(
        content: &str,
        format: InputFormat,
    ) -> Result<BatchIngestionInput, ContractError> {
        parser::parse(content, format)
    }

    /// Load descriptor from file path and validate it
    pub fn load_and_validate(path: &Path) -> Result<IngestionRequest, LoadError> {
        let input = Self::load_from_path(path)?;
        Ok(validate(&input)?)
    }

    /// Serialize descriptor to JSON string
    pub fn to_json(input: &BatchIngestionInput) -> Result<String, ContractError> {
        serde_json::to_string_pretty(input)
            .map_err(|e| ContractError::input_parse(format!("JSON serialize error: {e}")))
    }

    /// Serialize descriptor to TOML string
    pub fn to_toml(input: &BatchIngestionInput) -> Result<String, ContractError> {
        toml::to_string_pretty(input)
            .map_err(|e| ContractError::input_parse(format!("TOML serialize error: {e}")))
    }
}

impl InputLoader {
    /// Infer descriptor format from file extension
    fn detect_format(path: &Path) -> Result<InputFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::input_parse("cannot determine file format from extension")
        })?;

        InputFormat::from_extension(ext).ok_or_else(|| {
            ContractError::input_parse(format!("unsupported input format: .{ext}"))
        })
    }

    /// Read descriptor file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_JSON: &str = r#"{
        "index_name": "testIndex",
        "field_map": { "input": "$.content", "output": "$.SageMakerOutput" },
        "data_source": { "type": "s3", "source": ["s3://bucket/valid.json"] }
    }"#;

    #[test]
    fn test_load_from_str_json() {
        let result = InputLoader::load_from_str(MINIMAL_JSON, InputFormat::Json);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        assert_eq!(result.unwrap().index_name, "testIndex");
    }

    #[test]
    fn test_round_trip_toml() {
        let input = InputLoader::load_from_str(MINIMAL_JSON, InputFormat::Json).unwrap();
        let serialized = InputLoader::to_toml(&input).unwrap();
        let input2 = InputLoader::load_from_str(&serialized, InputFormat::Toml).unwrap();
        assert_eq!(input.index_name, input2.index_name);
        assert_eq!(input.data_source, input2.data_source);
    }

    #[test]
    fn test_load_and_validate_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MINIMAL_JSON.as_bytes()).unwrap();

        let request = InputLoader::load_and_validate(file.path()).unwrap();
        assert_eq!(request.data_source.entries(), ["s3://bucket/valid.json"]);
    }

    #[test]
    fn test_validation_error_message_prefix() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{ "index_name": "testIndex" }"#).unwrap();

        let err = InputLoader::load_and_validate(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "IllegalArgumentException in the batch ingestion input: The batch ingest input data source cannot be null"
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = InputLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported input format"));
    }
}

//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::IngestionRequest;
use input_loader::{InputLoader, LoadError};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    input_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<InputSummary>,
}

#[derive(Serialize)]
struct InputSummary {
    index_name: String,
    source_type: String,
    source_count: usize,
    credential_count: usize,
}

impl ValidationResult {
    fn invalid(input_path: String, error: String) -> Self {
        Self {
            valid: false,
            input_path,
            error: Some(error),
            warnings: None,
            summary: None,
        }
    }
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(input = %args.input.display(), "Validating input");

    let result = validate_input(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::invalid_input(result.input_path).into())
    }
}

fn validate_input(args: &ValidateArgs) -> ValidationResult {
    let input_path = args.input.display().to_string();

    if !args.input.exists() {
        return ValidationResult::invalid(
            input_path,
            format!("File not found: {}", args.input.display()),
        );
    }

    let input = match InputLoader::load_from_path(&args.input) {
        Ok(input) => input,
        Err(e) => return ValidationResult::invalid(input_path, e.to_string()),
    };

    match input_loader::validate(&input) {
        Ok(request) => {
            let warnings = collect_warnings(&request);
            ValidationResult {
                valid: true,
                input_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(InputSummary {
                    index_name: request.index_name.clone(),
                    source_type: request.data_source.kind().to_string(),
                    source_count: request.data_source.entries().len(),
                    credential_count: request.credential.len(),
                }),
            }
        }
        Err(e) => ValidationResult::invalid(input_path, LoadError::from(e).to_string()),
    }
}

/// Collect non-fatal issues
fn collect_warnings(request: &IngestionRequest) -> Vec<String> {
    let mut warnings = Vec::new();

    if request.field_map.is_empty() {
        warnings.push("No field_map configured - records are ingested unchanged".to_string());
    }

    if request.credential.is_empty() {
        warnings.push(format!(
            "No credential configured - the {} source must allow anonymous reads",
            request.data_source.kind()
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Input is valid: {}", result.input_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Index: {}", summary.index_name);
            println!("  Source type: {}", summary.source_type);
            println!("  Sources: {}", summary.source_count);
            println!("  Credential entries: {}", summary.credential_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Input is invalid: {}", result.input_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    fn args(path: &Path) -> ValidateArgs {
        ValidateArgs {
            input: path.to_path_buf(),
            json: true,
        }
    }

    fn descriptor(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_valid_descriptor_summary() {
        let file = descriptor(
            r#"{"index_name": "testIndex", "data_source": {"type": "s3", "source": ["s3://bucket/a.json", "s3://bucket/b.json"]}}"#,
        );

        let result = validate_input(&args(file.path()));
        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.index_name, "testIndex");
        assert_eq!(summary.source_count, 2);
        assert_eq!(result.warnings.unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_descriptor_reports_message() {
        let file = descriptor(r#"{"index_name": "testIndex"}"#);

        let result = validate_input(&args(file.path()));
        assert!(!result.valid);
        assert_eq!(
            result.error.as_deref(),
            Some(
                "IllegalArgumentException in the batch ingestion input: \
                 The batch ingest input data source cannot be null"
            )
        );
        assert!(run_validate(&args(file.path())).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_input(&args(&dir.path().join("absent.json")));
        assert!(!result.valid);
        assert!(result.error.unwrap().starts_with("File not found"));
    }
}

//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::IngestionRequest;
use input_loader::InputLoader;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Descriptor info for JSON output
#[derive(Serialize)]
struct InputInfo {
    index_name: String,
    source_type: String,
    sources: Vec<String>,
    field_map: FieldMapInfo,
    /// Keys only, values are never printed
    credential_keys: Vec<String>,
}

#[derive(Serialize)]
struct FieldMapInfo {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    input_field_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    output_field_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ingest_fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    expressions: Vec<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(input = %args.input.display(), "Loading input info");

    if !args.input.exists() {
        return Err(CliError::input_not_found(args.input.display().to_string()).into());
    }

    let request = InputLoader::load_and_validate(&args.input)
        .with_context(|| format!("Failed to load input from {}", args.input.display()))?;
    let info = build_input_info(&request);

    if args.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize input info")?;
        println!("{}", json);
    } else {
        print_input_info(&info);
    }

    Ok(())
}

fn build_input_info(request: &IngestionRequest) -> InputInfo {
    let field_map = &request.field_map;
    let mut credential_keys: Vec<String> = request.credential.keys().map(str::to_string).collect();
    credential_keys.sort();

    InputInfo {
        index_name: request.index_name.clone(),
        source_type: request.data_source.kind().to_string(),
        sources: request.data_source.entries().to_vec(),
        field_map: FieldMapInfo {
            input_field_names: field_map.input_field_names.clone().unwrap_or_default(),
            output_field_names: field_map.output_field_names.clone().unwrap_or_default(),
            ingest_fields: field_map.ingest_fields.clone().unwrap_or_default(),
            expressions: field_map.expressions.keys().cloned().collect(),
        },
        credential_keys,
    }
}

fn print_input_info(info: &InputInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Batch Ingestion Input                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📍 Target");
    println!("   └─ Index: {}", info.index_name);

    println!("\n📥 Sources ({}, {})", info.sources.len(), info.source_type);
    for (i, source) in info.sources.iter().enumerate() {
        let prefix = if i == info.sources.len() - 1 { "└─" } else { "├─" };
        println!("   {} {}", prefix, source);
    }

    let field_map = &info.field_map;
    println!("\n🔀 Field Map");
    println!("   ├─ Input fields: {:?}", field_map.input_field_names);
    println!("   ├─ Output fields: {:?}", field_map.output_field_names);
    println!("   ├─ Ingest fields: {:?}", field_map.ingest_fields);
    println!("   └─ Expressions: {:?}", field_map.expressions);

    println!("\n🔑 Credential");
    if info.credential_keys.is_empty() {
        println!("   └─ (none)");
    } else {
        println!("   └─ Keys: {}", info.credential_keys.join(", "));
    }

    println!();
}

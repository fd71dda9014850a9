//! 批量导入描述校验模块
//!
//! 校验规则（按顺序，遇错即停）：
//! - data_source 存在且非空
//! - data_source 含 `type` 判别字段
//! - 按 `type` 分派到各数据源自己的规则（地址列表非空、地址格式合法）
//! - index_name 非空
//!
//! 同一类问题一次性汇总报告，例如所有非法 S3 URI 按原始顺序列在一条消息里。

use std::sync::LazyLock;

use contracts::{
    BatchIngestionInput, DataSource, IngestionRequest, SourceKind, ValidationError,
    DATA_SOURCE_SOURCE, DATA_SOURCE_TYPE,
};
use regex::Regex;
use serde_json::{Map, Value};
use ::validator::Validate;

static S3_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^s3://([a-zA-Z0-9.\-]+)(/.*)?$").expect("static regex"));

static OPENAI_FILE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^file-[A-Za-z0-9]+$").expect("static regex"));

/// 校验批量导入描述，成功时返回类型化的请求
pub fn validate(input: &BatchIngestionInput) -> Result<IngestionRequest, ValidationError> {
    let data_source = validate_data_source(&input.data_source)?;
    validate_index_name(input)?;

    Ok(IngestionRequest {
        index_name: input.index_name.clone(),
        field_map: input.field_map.clone(),
        credential: input.credential.clone(),
        data_source,
    })
}

/// 校验 data_source 并按 `type` 分派
fn validate_data_source(raw: &Map<String, Value>) -> Result<DataSource, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingDataSource);
    }

    let tag = raw
        .get(DATA_SOURCE_TYPE)
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingSourceType)?;

    let kind = SourceKind::from_tag(tag)
        .ok_or_else(|| ValidationError::UnsupportedSourceType(tag.to_string()))?;

    let entries = source_entries(raw, kind)?;

    match kind {
        SourceKind::S3 => {
            reject_unmatched(kind, &entries, &S3_URI)?;
            Ok(DataSource::S3 { uris: entries })
        }
        SourceKind::OpenAi => {
            reject_unmatched(kind, &entries, &OPENAI_FILE_ID)?;
            Ok(DataSource::OpenAi { file_ids: entries })
        }
    }
}

/// 取出地址列表
fn source_entries(
    raw: &Map<String, Value>,
    kind: SourceKind,
) -> Result<Vec<String>, ValidationError> {
    match raw.get(DATA_SOURCE_SOURCE) {
        None | Some(Value::Null) => Err(ValidationError::EmptySourceList { kind }),
        Some(Value::Array(items)) if items.is_empty() => {
            Err(ValidationError::EmptySourceList { kind })
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(malformed_source_list)
            })
            .collect(),
        Some(_) => Err(malformed_source_list()),
    }
}

fn malformed_source_list() -> ValidationError {
    ValidationError::MalformedSourceList {
        key: DATA_SOURCE_SOURCE.to_string(),
    }
}

/// 汇总所有不匹配的地址
fn reject_unmatched(
    kind: SourceKind,
    entries: &[String],
    pattern: &Regex,
) -> Result<(), ValidationError> {
    let invalid: Vec<String> = entries
        .iter()
        .filter(|entry| !pattern.is_match(entry))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidSourceEntries {
            kind,
            entries: invalid,
        })
    }
}

/// 校验 index_name
fn validate_index_name(input: &BatchIngestionInput) -> Result<(), ValidationError> {
    input
        .validate()
        .map_err(|_| ValidationError::EmptyIndexName)
}

//! 描述文件解析模块
//!
//! 支持 JSON (主要) 和 TOML 格式。

use contracts::{BatchIngestionInput, ContractError};

/// 描述文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON 格式 (推荐)
    Json,
    /// TOML 格式
    Toml,
}

impl InputFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// 解析 JSON 格式描述
pub fn parse_json(content: &str) -> Result<BatchIngestionInput, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::InputParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 TOML 格式描述
pub fn parse_toml(content: &str) -> Result<BatchIngestionInput, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::InputParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 根据格式解析描述
pub fn parse(content: &str, format: InputFormat) -> Result<BatchIngestionInput, ContractError> {
    match format {
        InputFormat::Json => parse_json(content),
        InputFormat::Toml => parse_toml(content),
    }
}

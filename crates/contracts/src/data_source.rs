//! DataSource - validated data source union
//!
//! Closed sum type over the source kinds the ingestion engines understand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Data source discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Object storage, addressed by `s3://bucket/key` URIs
    S3,
    /// Uploaded OpenAI batch files, addressed by file id
    OpenAi,
}

impl SourceKind {
    /// Parse a `type` tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "s3" => Some(Self::S3),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::OpenAi => "openai",
        }
    }

    /// Name of the address list in "is empty" messages
    pub fn list_label(self) -> &'static str {
        match self {
            Self::S3 => "s3Uris",
            Self::OpenAi => "openAI file ids",
        }
    }

    /// Name of the entries in "are invalid" messages
    pub fn entry_label(self) -> &'static str {
        match self {
            Self::S3 => "S3 URIs",
            Self::OpenAi => "OpenAI file ids",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataSource {
    S3 {
        #[serde(rename = "source")]
        uris: Vec<String>,
    },
    OpenAi {
        #[serde(rename = "source")]
        file_ids: Vec<String>,
    },
}

impl DataSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::S3 { .. } => SourceKind::S3,
            Self::OpenAi { .. } => SourceKind::OpenAi,
        }
    }

    /// Addresses in input order
    pub fn entries(&self) -> &[String] {
        match self {
            Self::S3 { uris } => uris,
            Self::OpenAi { file_ids } => file_ids,
        }
    }
}

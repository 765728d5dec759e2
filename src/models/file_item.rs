use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type FileId = u64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Binary,
    Image,
}

impl FileKind {
    // 이름에 확장자가 없을 때 붙이는 기본 확장자
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Text => ".txt",
            FileKind::Binary => ".bin",
            FileKind::Image => ".img",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::Text => "text",
            FileKind::Binary => "binary",
            FileKind::Image => "image",
        };
        f.pad(name)
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(FileKind::Text),
            "binary" | "bin" => Ok(FileKind::Binary),
            "image" | "img" => Ok(FileKind::Image),
            _ => Err(format!("Unknown file type: {s}")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileItem {
    pub id: FileId,
    pub name: String,
    pub kind: FileKind,
    pub size: u64, // bytes
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

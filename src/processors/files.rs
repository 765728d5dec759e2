use crate::models::{FileId, FileItem, FileKind};
use crate::utils::constants::EMPTY_FILE_SIZE;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 파일 생성/삭제 결과. 실패도 정상 반환값이다.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub success: bool,
    pub file_id: Option<FileId>,
    pub message: String,
}

impl FileOutcome {
    fn ok(file_id: FileId, message: String) -> Self {
        Self {
            success: true,
            file_id: Some(file_id),
            message,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            file_id: None,
            message: message.into(),
        }
    }
}

/// 단일 디렉토리 파일 관리자 (id 키 컬렉션)
#[derive(Debug, Clone, Default)]
pub struct FileDirectory {
    files: Vec<FileItem>,
    next_id: FileId,
}

impl FileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 예제 파일 두 개가 들어 있는 디렉토리
    pub fn with_samples() -> Self {
        let mut dir = Self::new();
        dir.create(
            "readme.txt",
            FileKind::Text,
            "Welcome to Mini OS Simulator!\n\nThis is a sample text file.",
        );
        dir.create("config.bin", FileKind::Binary, "0101010101010101...");
        dir
    }

    pub fn create(&mut self, name: &str, kind: FileKind, content: &str) -> FileOutcome {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return FileOutcome::err("File name is required");
        }

        let name = if trimmed.contains('.') {
            trimmed.to_string()
        } else {
            format!("{trimmed}{}", kind.extension())
        };

        // 확장자를 붙인 최종 이름으로 대소문자 무시 비교
        if self.find_by_name(&name).is_some() {
            return FileOutcome::err("A file with this name already exists");
        }

        let (size, content) = if content.is_empty() {
            (EMPTY_FILE_SIZE, format!("[Empty {kind} file]"))
        } else {
            (content.len() as u64, content.to_string())
        };

        let now = Utc::now();
        let id = self.next_id;
        self.next_id += 1;

        let message = format!("File \"{name}\" created");
        self.files.push(FileItem {
            id,
            name,
            kind,
            size,
            content,
            created_at: now,
            modified_at: now,
        });

        FileOutcome::ok(id, message)
    }

    pub fn delete(&mut self, id: FileId) -> FileOutcome {
        match self.files.iter().position(|f| f.id == id) {
            Some(index) => {
                let file = self.files.remove(index);
                FileOutcome::ok(id, format!("File \"{}\" deleted", file.name))
            }
            None => FileOutcome::err(format!("File {id} not found")),
        }
    }

    pub fn get(&self, id: FileId) -> Option<&FileItem> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FileItem> {
        let lower = name.to_lowercase();
        self.files.iter().find(|f| f.name.to_lowercase() == lower)
    }

    /// 이름에 query 가 포함된 파일 (대소문자 무시)
    pub fn search(&self, query: &str) -> Vec<&FileItem> {
        let query = query.to_lowercase();
        self.files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn files(&self) -> &[FileItem] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    // id 카운터는 유지 (재사용하지 않음)
    pub fn reset(&mut self) {
        self.files.clear();
    }
}

/// 바이트 수를 B / KB / MB 로 표시
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PLAIN_TEXT_MIME: &str = "text/plain";
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

const PLAIN_TEXT_EXTENSIONS: [&str; 2] = ["txt", "text"];

/// A file picked by the user: where it lives, what to call it and what type
/// it claims to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime = mime_for_path(&path).to_string();
        Self::with_mime(path, mime)
    }

    pub fn with_mime(path: impl Into<PathBuf>, mime: impl Into<String>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            path,
            name,
            mime: mime.into(),
        }
    }

    pub fn is_plain_text(&self) -> bool {
        let essence = self.mime.split(';').next().unwrap_or_default().trim();
        essence.eq_ignore_ascii_case(PLAIN_TEXT_MIME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFile {
    pub file_name: String,
    pub emails: Vec<String>,
}

fn mime_for_path(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str());
    match extension {
        Some(ext)
            if PLAIN_TEXT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            PLAIN_TEXT_MIME
        }
        _ => OCTET_STREAM_MIME,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

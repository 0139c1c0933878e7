use crate::domain::{split_email_lines, FileHandle, ParsedFile};
use crate::error::ExtractError;
use rayon::prelude::*;
use std::fs;
use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads the text content of a plaintext file.
///
/// The declared type is checked before touching the filesystem, so a
/// rejected file is never opened. Bytes that are not valid UTF-8 decode to
/// U+FFFD instead of failing the file.
pub fn extract_text(handle: Option<&FileHandle>) -> Result<String, ExtractError> {
    let handle = handle.ok_or(ExtractError::Missing)?;
    if !handle.is_plain_text() {
        return Err(ExtractError::NotPlainText {
            file_name: handle.name.clone(),
            mime: handle.mime.clone(),
        });
    }

    let bytes = fs::read(&handle.path).map_err(|source| ExtractError::Read {
        path: handle.path.clone(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text).to_string())
}

pub fn parse_email_file(handle: &FileHandle) -> Result<ParsedFile, ExtractError> {
    let text = extract_text(Some(handle))?;
    let emails = split_email_lines(&text);
    debug!(file = %handle.name, count = emails.len(), "parsed email file");
    Ok(ParsedFile {
        file_name: handle.name.clone(),
        emails,
    })
}

/// Parses every file concurrently. Results keep the input order; the first
/// failure fails the whole batch.
pub fn parse_email_files(handles: &[FileHandle]) -> Result<Vec<ParsedFile>, ExtractError> {
    handles.par_iter().map(parse_email_file).collect()
}

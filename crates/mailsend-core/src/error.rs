use crate::session::SubmitState;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no file was provided")]
    Missing,
    #[error("file {file_name} is not of type text (got {mime})")]
    NotPlainText { file_name: String, mime: String },
    #[error("failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Name of the file the error is about, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            ExtractError::Missing => None,
            ExtractError::NotPlainText { file_name, .. } => Some(file_name),
            ExtractError::Read { path, .. } => path.file_name().and_then(|name| name.to_str()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no files selected")]
    NoFiles,
    #[error("a submission is already in flight")]
    Busy,
    #[error("no submission in flight (session is {})", .0.as_str())]
    NotSubmitting(SubmitState),
}

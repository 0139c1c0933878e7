pub mod email;
pub mod file;

pub use email::{build_email_list, split_email_lines, EmailSet};
pub use file::{FileHandle, ParsedFile, OCTET_STREAM_MIME, PLAIN_TEXT_MIME};

pub mod domain;
pub mod dto;
pub mod error;
pub mod error_codes;
pub mod extract;
pub mod session;

pub use domain::*;
pub use dto::*;
pub use error::{ExtractError, SessionError};
pub use error_codes::describe_error_code;
pub use extract::{extract_text, parse_email_file, parse_email_files};
pub use session::{Session, SubmitState};

pub mod error;
pub mod http;
pub mod sender;

pub use error::{ClientError, Result};
pub use http::{send_url, HttpSender, HttpSettings};
pub use sender::Sender;

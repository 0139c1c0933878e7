use crate::Result;
use mailsend_core::{SendOutcome, SendRequest};

/// Delivers an email list to the backend.
///
/// `Ok` means the server answered, whether it accepted the list or not;
/// `Err` means no answer was received.
pub trait Sender {
    fn send(&self, request: &SendRequest) -> Result<SendOutcome>;
}

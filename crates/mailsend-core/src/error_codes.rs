use std::borrow::Cow;

const ERROR_MESSAGES: [(&str, &str); 3] = [
    ("send_failure", "Failed to send to some addresses"),
    ("server_error", "Internal server error"),
    ("invalid_request_body", "Invalid request body"),
];

/// Maps a server error code to a human string; unknown codes pass through.
pub fn describe_error_code(code: &str) -> Cow<'_, str> {
    ERROR_MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| Cow::Borrowed(*message))
        .unwrap_or(Cow::Borrowed(code))
}

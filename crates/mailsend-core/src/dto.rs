use crate::session::SubmitState;
use serde::{Deserialize, Serialize};

/// Body of `POST /send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub emails: Vec<String>,
}

/// Body of a non-200 response from `/send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFailureBody {
    pub error: String,
    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    Rejected { error: String, emails: Vec<String> },
}

impl From<SendFailureBody> for SendOutcome {
    fn from(body: SendFailureBody) -> Self {
        SendOutcome::Rejected {
            error: body.error,
            emails: body.emails,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummaryDto {
    pub file_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReportDto {
    pub state: SubmitState,
    pub status_message: String,
    pub files: Vec<FileSummaryDto>,
    pub borked_emails: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{SendFailureBody, SendOutcome, SendRequest};

    #[test]
    fn send_request_serializes_as_emails_object() {
        let body = SendRequest {
            emails: vec!["a@x.com".to_string()],
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(json, r#"{"emails":["a@x.com"]}"#);
    }

    #[test]
    fn failure_body_tolerates_missing_emails() {
        let body: SendFailureBody =
            serde_json::from_str(r#"{"error":"server_error"}"#).expect("parse");
        assert!(body.emails.is_empty());
        assert_eq!(
            SendOutcome::from(body),
            SendOutcome::Rejected {
                error: "server_error".to_string(),
                emails: Vec::new(),
            }
        );
    }
}

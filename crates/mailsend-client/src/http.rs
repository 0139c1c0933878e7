use crate::sender::Sender;
use crate::{ClientError, Result};
use mailsend_core::{SendFailureBody, SendOutcome, SendRequest};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const FALLBACK_ERROR_CODE: &str = "server_error";

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub api_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct HttpSender {
    client: Client,
    url: Url,
}

impl HttpSender {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        let url = send_url(&settings.api_url)?;
        let client = Client::builder()
            .user_agent(settings.user_agent)
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Sender for HttpSender {
    fn send(&self, request: &SendRequest) -> Result<SendOutcome> {
        let body = serde_json::to_vec(request)?;
        debug!(url = %self.url, count = request.emails.len(), "sending email list");

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        debug!(status = status.as_u16(), "send response");
        if status == StatusCode::OK {
            return Ok(SendOutcome::Delivered);
        }

        let bytes = response.bytes()?;
        match serde_json::from_slice::<SendFailureBody>(&bytes) {
            Ok(failure) => Ok(failure.into()),
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "unreadable error body");
                Ok(SendOutcome::Rejected {
                    error: FALLBACK_ERROR_CODE.to_string(),
                    emails: Vec::new(),
                })
            }
        }
    }
}

/// `{api_url}/send`, tolerating a trailing slash on the base.
pub fn send_url(api_url: &str) -> Result<Url> {
    let base = api_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{base}/send"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::UnsupportedUrl(api_url.to_string()));
    }
    Ok(url)
}

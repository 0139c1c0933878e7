use crate::domain::{build_email_list, ParsedFile};
use crate::dto::{FileSummaryDto, SendOutcome, SendRequest, SessionReportDto};
use crate::error::{ExtractError, SessionError};
use crate::error_codes::describe_error_code;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const SUCCESS_MESSAGE: &str = "Emails sent successfully!";
pub const NO_FILES_MESSAGE: &str = "Please select at least one file before sending.";
pub const NETWORK_ERROR_MESSAGE: &str = "Something went wrong. Are you offline?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    Idle,
    ValidatingFiles,
    Ready,
    Submitting,
    Success,
    PartialFailure,
    NetworkError,
}

impl SubmitState {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmitState::Idle => "idle",
            SubmitState::ValidatingFiles => "validating_files",
            SubmitState::Ready => "ready",
            SubmitState::Submitting => "submitting",
            SubmitState::Success => "success",
            SubmitState::PartialFailure => "partial_failure",
            SubmitState::NetworkError => "network_error",
        }
    }
}

/// Selected files plus the feedback shown for the last action.
///
/// Only one submission may be in flight at a time; `begin_submit` refuses to
/// start another until `complete_submit` or `fail_submit` is called.
#[derive(Debug, Clone)]
pub struct Session {
    state: SubmitState,
    files: Vec<ParsedFile>,
    status_message: String,
    borked_emails: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SubmitState::Idle,
            files: Vec::new(),
            status_message: String::new(),
            borked_emails: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn borked_emails(&self) -> &[String] {
        &self.borked_emails
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn begin_selection(&mut self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        self.transition(SubmitState::ValidatingFiles);
        self.status_message.clear();
        self.borked_emails.clear();
        Ok(())
    }

    /// Stores the parsed files, or records the failure and hands it back.
    pub fn finish_selection(
        &mut self,
        parsed: Result<Vec<ParsedFile>, ExtractError>,
    ) -> Result<(), ExtractError> {
        match parsed {
            Ok(files) => {
                self.files = files;
                self.transition(SubmitState::Ready);
                Ok(())
            }
            Err(err) => {
                self.files.clear();
                self.status_message = err.to_string();
                self.transition(SubmitState::Idle);
                Err(err)
            }
        }
    }

    /// Builds the request for the current files and marks the session busy.
    pub fn begin_submit(&mut self) -> Result<SendRequest, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        if self.files.is_empty() {
            self.status_message = NO_FILES_MESSAGE.to_string();
            return Err(SessionError::NoFiles);
        }

        let emails = build_email_list(&self.files).into_vec();
        self.status_message = LOADING_MESSAGE.to_string();
        self.borked_emails.clear();
        self.transition(SubmitState::Submitting);
        Ok(SendRequest { emails })
    }

    pub fn complete_submit(&mut self, outcome: SendOutcome) -> Result<(), SessionError> {
        self.ensure_submitting()?;
        self.files.clear();
        match outcome {
            SendOutcome::Delivered => {
                self.status_message = SUCCESS_MESSAGE.to_string();
                self.borked_emails.clear();
                self.transition(SubmitState::Success);
            }
            SendOutcome::Rejected { error, emails } => {
                self.status_message =
                    format!("There was an error: {}", describe_error_code(&error));
                self.borked_emails = emails;
                self.transition(SubmitState::PartialFailure);
            }
        }
        Ok(())
    }

    /// The request never produced a response. Files are kept for a retry.
    pub fn fail_submit(&mut self) -> Result<(), SessionError> {
        self.ensure_submitting()?;
        self.status_message = NETWORK_ERROR_MESSAGE.to_string();
        self.borked_emails.clear();
        self.transition(SubmitState::NetworkError);
        Ok(())
    }

    pub fn report(&self) -> SessionReportDto {
        SessionReportDto {
            state: self.state,
            status_message: self.status_message.clone(),
            files: self
                .files
                .iter()
                .map(|file| FileSummaryDto {
                    file_name: file.file_name.clone(),
                    count: file.emails.len(),
                })
                .collect(),
            borked_emails: self.borked_emails.clone(),
        }
    }

    fn ensure_submitting(&self) -> Result<(), SessionError> {
        if self.is_busy() {
            Ok(())
        } else {
            Err(SessionError::NotSubmitting(self.state))
        }
    }

    fn transition(&mut self, next: SubmitState) {
        debug!(from = self.state.as_str(), to = next.as_str(), "session state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Session, SubmitState, LOADING_MESSAGE, NETWORK_ERROR_MESSAGE, NO_FILES_MESSAGE,
        SUCCESS_MESSAGE,
    };
    use crate::domain::ParsedFile;
    use crate::dto::SendOutcome;
    use crate::error::{ExtractError, SessionError};

    fn parsed(name: &str, emails: &[&str]) -> ParsedFile {
        ParsedFile {
            file_name: name.to_string(),
            emails: emails.iter().map(|email| email.to_string()).collect(),
        }
    }

    fn ready_session(files: Vec<ParsedFile>) -> Session {
        let mut session = Session::new();
        session.begin_selection().expect("select");
        session.finish_selection(Ok(files)).expect("files");
        session
    }

    #[test]
    fn selection_moves_to_ready() {
        let session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        assert_eq!(session.state(), SubmitState::Ready);
        assert_eq!(session.files().len(), 1);
        assert_eq!(session.status_message(), "");
    }

    #[test]
    fn failed_selection_returns_to_idle_with_message() {
        let mut session = Session::new();
        session.begin_selection().expect("select");
        let err = session
            .finish_selection(Err(ExtractError::NotPlainText {
                file_name: "photo.png".to_string(),
                mime: "image/png".to_string(),
            }))
            .unwrap_err();
        assert_eq!(err.file_name(), Some("photo.png"));
        assert_eq!(session.state(), SubmitState::Idle);
        assert!(session.files().is_empty());
        assert!(session.status_message().contains("photo.png"));
    }

    #[test]
    fn submit_without_files_warns_and_builds_nothing() {
        let mut session = Session::new();
        let err = session.begin_submit().unwrap_err();
        assert_eq!(err, SessionError::NoFiles);
        assert_eq!(session.status_message(), NO_FILES_MESSAGE);
        assert_eq!(session.state(), SubmitState::Idle);
        assert!(!session.is_busy());
    }

    #[test]
    fn submit_builds_deduplicated_request() {
        let mut session = ready_session(vec![
            parsed("a.txt", &["a@x.com", "b@x.com"]),
            parsed("b.txt", &["b@x.com", "c@x.com"]),
        ]);
        let request = session.begin_submit().expect("submit");
        assert_eq!(request.emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
        assert_eq!(session.state(), SubmitState::Submitting);
        assert_eq!(session.status_message(), LOADING_MESSAGE);
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        session.begin_submit().expect("first submit");
        assert_eq!(session.begin_submit().unwrap_err(), SessionError::Busy);
        assert_eq!(session.begin_selection().unwrap_err(), SessionError::Busy);
    }

    #[test]
    fn delivered_clears_files_and_sets_success() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        session.begin_submit().expect("submit");
        session
            .complete_submit(SendOutcome::Delivered)
            .expect("complete");
        assert_eq!(session.state(), SubmitState::Success);
        assert_eq!(session.status_message(), SUCCESS_MESSAGE);
        assert!(session.files().is_empty());
        assert!(session.borked_emails().is_empty());
    }

    #[test]
    fn rejected_reports_message_and_borked_emails() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com", "b@x.com"])]);
        session.begin_submit().expect("submit");
        session
            .complete_submit(SendOutcome::Rejected {
                error: "send_failure".to_string(),
                emails: vec!["a@x.com".to_string()],
            })
            .expect("complete");
        assert_eq!(session.state(), SubmitState::PartialFailure);
        assert_eq!(
            session.status_message(),
            "There was an error: Failed to send to some addresses"
        );
        assert_eq!(session.borked_emails(), ["a@x.com".to_string()]);
        assert!(session.files().is_empty());
    }

    #[test]
    fn rejected_with_unknown_code_shows_raw_code() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        session.begin_submit().expect("submit");
        session
            .complete_submit(SendOutcome::Rejected {
                error: "quota_exceeded".to_string(),
                emails: Vec::new(),
            })
            .expect("complete");
        assert_eq!(session.status_message(), "There was an error: quota_exceeded");
    }

    #[test]
    fn network_failure_keeps_files_for_retry() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        session.begin_submit().expect("submit");
        session.fail_submit().expect("fail");
        assert_eq!(session.state(), SubmitState::NetworkError);
        assert_eq!(session.status_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(session.files().len(), 1);
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn new_selection_resets_feedback() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        session.begin_submit().expect("submit");
        session
            .complete_submit(SendOutcome::Rejected {
                error: "send_failure".to_string(),
                emails: vec!["a@x.com".to_string()],
            })
            .expect("complete");
        session.begin_selection().expect("select");
        assert_eq!(session.status_message(), "");
        assert!(session.borked_emails().is_empty());
    }

    #[test]
    fn report_summarizes_files() {
        let session = ready_session(vec![parsed("a.txt", &["a@x.com", "b@x.com"])]);
        let report = session.report();
        assert_eq!(report.state, SubmitState::Ready);
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].count, 2);
    }

    #[test]
    fn outcomes_outside_a_submission_are_refused() {
        let mut session = Session::new();
        assert_eq!(
            session.complete_submit(SendOutcome::Delivered).unwrap_err(),
            SessionError::NotSubmitting(SubmitState::Idle)
        );
        assert_eq!(session.state(), SubmitState::Idle);
        assert_eq!(session.status_message(), "");

        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        assert_eq!(
            session.fail_submit().unwrap_err(),
            SessionError::NotSubmitting(SubmitState::Ready)
        );
        assert_eq!(session.state(), SubmitState::Ready);
        assert_eq!(session.files().len(), 1);
    }

    #[test]
    fn outcome_is_applied_only_once() {
        let mut session = ready_session(vec![parsed("a.txt", &["a@x.com"])]);
        session.begin_submit().expect("submit");
        session
            .complete_submit(SendOutcome::Delivered)
            .expect("complete");
        assert!(session.fail_submit().is_err());
        assert_eq!(session.state(), SubmitState::Success);
        assert_eq!(session.status_message(), SUCCESS_MESSAGE);
    }
}

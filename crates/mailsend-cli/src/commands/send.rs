use crate::commands::{print_json, Context, FileArgs};
use crate::error::{invalid_input, network, partial_failure};
use crate::util::{file_handles, http_settings};
use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use mailsend_client::{HttpSender, Sender};
use mailsend_core::{parse_email_files, Session, SessionError, SubmitState};
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub files: FileArgs,
    /// Print the request body instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn send(ctx: &Context<'_>, args: SendArgs) -> Result<()> {
    let mut session = Session::new();
    if !args.files.files.is_empty() {
        let handles = file_handles(&args.files.files, args.files.mime.as_deref());
        session.begin_selection()?;
        if let Err(err) = session.finish_selection(parse_email_files(&handles)) {
            debug!(file = err.file_name().unwrap_or("-"), "file selection rejected");
            return Err(err.into());
        }
    }

    if args.dry_run {
        let request = begin_submit(&mut session)?;
        return print_json(&request);
    }

    let sender =
        HttpSender::new(http_settings(ctx.config)).with_context(|| "build http client")?;
    debug!(url = %sender.url(), "send endpoint");
    deliver(&mut session, &sender)?;
    finish(ctx, &session)
}

/// Runs one submission through `sender`, leaving the outcome on the session.
pub fn deliver<S: Sender>(session: &mut Session, sender: &S) -> Result<()> {
    let request = begin_submit(session)?;
    info!(count = request.emails.len(), "submitting email list");
    match sender.send(&request) {
        Ok(outcome) => session.complete_submit(outcome)?,
        Err(err) => {
            debug!(error = %err, "send request failed");
            session.fail_submit()?;
        }
    }
    Ok(())
}

fn begin_submit(session: &mut Session) -> Result<mailsend_core::SendRequest> {
    match session.begin_submit() {
        Ok(request) => Ok(request),
        Err(SessionError::NoFiles) => Err(invalid_input(session.status_message())),
        Err(err) => Err(err.into()),
    }
}

fn finish(ctx: &Context<'_>, session: &Session) -> Result<()> {
    if ctx.json {
        print_json(&session.report())?;
    } else {
        println!("{}", session.status_message());
        if !session.borked_emails().is_empty() {
            println!("Rejected addresses:");
            for email in session.borked_emails() {
                println!("- {}", email);
            }
        }
    }

    match session.state() {
        SubmitState::Success => Ok(()),
        SubmitState::PartialFailure => Err(partial_failure(format!(
            "{} addresses rejected",
            session.borked_emails().len()
        ))),
        SubmitState::NetworkError => Err(network(session.status_message())),
        state => Err(anyhow!("unexpected session state: {}", state.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::deliver;
    use mailsend_client::{ClientError, Result as ClientResult, Sender};
    use mailsend_core::session::{NETWORK_ERROR_MESSAGE, NO_FILES_MESSAGE, SUCCESS_MESSAGE};
    use mailsend_core::{ParsedFile, SendOutcome, SendRequest, Session, SubmitState};
    use std::cell::RefCell;

    struct FakeSender {
        requests: RefCell<Vec<SendRequest>>,
        reply: fn() -> ClientResult<SendOutcome>,
    }

    impl FakeSender {
        fn new(reply: fn() -> ClientResult<SendOutcome>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl Sender for FakeSender {
        fn send(&self, request: &SendRequest) -> ClientResult<SendOutcome> {
            self.requests.borrow_mut().push(request.clone());
            (self.reply)()
        }
    }

    fn parsed(name: &str, emails: &[&str]) -> ParsedFile {
        ParsedFile {
            file_name: name.to_string(),
            emails: emails.iter().map(|email| email.to_string()).collect(),
        }
    }

    fn session_with(files: Vec<ParsedFile>) -> Session {
        let mut session = Session::new();
        session.begin_selection().expect("select");
        session.finish_selection(Ok(files)).expect("files");
        session
    }

    #[test]
    fn deliver_sends_each_email_once() {
        let sender = FakeSender::new(|| Ok(SendOutcome::Delivered));
        let mut session = session_with(vec![
            parsed("a.txt", &["a@x.com", "b@x.com"]),
            parsed("b.txt", &["b@x.com", "a@x.com"]),
        ]);
        deliver(&mut session, &sender).expect("deliver");

        let requests = sender.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].emails, vec!["a@x.com", "b@x.com"]);
        assert_eq!(session.state(), SubmitState::Success);
        assert_eq!(session.status_message(), SUCCESS_MESSAGE);
    }

    #[test]
    fn deliver_without_files_never_calls_sender() {
        let sender = FakeSender::new(|| Ok(SendOutcome::Delivered));
        let mut session = Session::new();
        let err = deliver(&mut session, &sender).unwrap_err();
        assert!(err.to_string().contains(NO_FILES_MESSAGE));
        assert!(sender.requests.borrow().is_empty());
    }

    #[test]
    fn deliver_maps_transport_errors_to_network_state() {
        let sender =
            FakeSender::new(|| Err(ClientError::UnsupportedUrl("unreachable".to_string())));
        let mut session = session_with(vec![parsed("a.txt", &["a@x.com"])]);
        deliver(&mut session, &sender).expect("deliver");
        assert_eq!(session.state(), SubmitState::NetworkError);
        assert_eq!(session.status_message(), NETWORK_ERROR_MESSAGE);
        assert!(!session.status_message().contains("unreachable"));
    }

    #[test]
    fn deliver_records_partial_failure() {
        let sender = FakeSender::new(|| {
            Ok(SendOutcome::Rejected {
                error: "send_failure".to_string(),
                emails: vec!["a@x.com".to_string()],
            })
        });
        let mut session = session_with(vec![parsed("a.txt", &["a@x.com", "b@x.com"])]);
        deliver(&mut session, &sender).expect("deliver");
        assert_eq!(session.state(), SubmitState::PartialFailure);
        assert_eq!(
            session.status_message(),
            "There was an error: Failed to send to some addresses"
        );
        assert_eq!(session.borked_emails(), ["a@x.com".to_string()]);
    }
}

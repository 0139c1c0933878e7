use anyhow::Error;
use mailsend_client::ClientError;
use mailsend_config::ConfigError;
use mailsend_core::{ExtractError, SessionError};
use std::io::ErrorKind;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_PARTIAL_FAILURE: u8 = 4;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("server rejected the request: {0}")]
    PartialFailure(String),
    #[error("request failed: {0}")]
    Network(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn partial_failure(message: impl Into<String>) -> Error {
    CliError::PartialFailure(message.into()).into()
}

pub fn network(message: impl Into<String>) -> Error {
    CliError::Network(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::PartialFailure(_) => EXIT_PARTIAL_FAILURE,
                CliError::Network(_) => EXIT_FAILURE,
            });
        }
        if let Some(extract_err) = cause.downcast_ref::<ExtractError>() {
            return ExitCode::from(extract_exit_code(extract_err));
        }
        if let Some(session_err) = cause.downcast_ref::<SessionError>() {
            return ExitCode::from(match session_err {
                SessionError::NoFiles => EXIT_INVALID_INPUT,
                SessionError::Busy | SessionError::NotSubmitting(_) => EXIT_FAILURE,
            });
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(client_err) = cause.downcast_ref::<ClientError>() {
            return ExitCode::from(client_exit_code(client_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn extract_exit_code(err: &ExtractError) -> u8 {
    match err {
        ExtractError::Read { source, .. } if source.kind() == ErrorKind::NotFound => {
            EXIT_NOT_FOUND
        }
        ExtractError::Read { .. } => EXIT_FAILURE,
        ExtractError::Missing | ExtractError::NotPlainText { .. } => EXIT_INVALID_INPUT,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidApiUrl(_)
        | ConfigError::InvalidHttpField { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn client_exit_code(err: &ClientError) -> u8 {
    match err {
        ClientError::Url(_) | ClientError::UnsupportedUrl(_) => EXIT_INVALID_INPUT,
        ClientError::Http(_) | ClientError::Encode(_) => EXIT_FAILURE,
    }
}

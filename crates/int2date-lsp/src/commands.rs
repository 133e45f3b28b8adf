//! `workspace/executeCommand` surface.
//!
//! The client owns the UI: it prompts for input and passes the submitted
//! line to [`CONVERT`], and it passes the focused document's URI to
//! [`ACTIVATE_HOVER`]. Results are shown with `window/showMessage` and also
//! returned as the command result.

use crate::document::ServerState;
use int2date_core::{ActivationReport, ActiveHovers, DeactivationReport, validate_input};
use serde_json::Value;
use thiserror::Error;
use tower_lsp_server::ls_types::{ExecuteCommandParams, MessageType, Uri};

/// Convert a prompt input line to a date.
pub const CONVERT: &str = "int2date.convert";
/// Enable hover preview for the language of the focused document.
pub const ACTIVATE_HOVER: &str = "int2date.activateHover";
/// Disable hover preview for every language.
pub const DEACTIVATE_HOVERS: &str = "int2date.deactivateHovers";
/// List languages with hover preview enabled.
pub const LIST_HOVERS: &str = "int2date.listHovers";

/// Every command the server advertises.
pub const ALL_COMMANDS: [&str; 4] = [CONVERT, ACTIVATE_HOVER, DEACTIVATE_HOVERS, LIST_HOVERS];

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command '{command}' requires a {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid argument for '{command}': {source}")]
    InvalidArgument {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document is not open: {uri}")]
    UnknownDocument { uri: String },

    #[error("Failed to register hover provider for '{kind_tag}': {message}")]
    RegistrationFailed { kind_tag: String, message: String },
}

/// Parsed command invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `None` means the prompt was dismissed.
    Convert(Option<String>),
    ActivateHover(Uri),
    DeactivateHovers,
    ListHovers,
}

impl Command {
    pub fn parse(params: ExecuteCommandParams) -> Result<Self, CommandError> {
        let mut arguments = params.arguments.into_iter();

        match params.command.as_str() {
            CONVERT => {
                let input = match arguments.next() {
                    None | Some(Value::Null) => None,
                    Some(Value::Number(n)) => Some(n.to_string()),
                    Some(arg) => Some(serde_json::from_value::<String>(arg).map_err(
                        |source| CommandError::InvalidArgument {
                            command: CONVERT,
                            source,
                        },
                    )?),
                };
                Ok(Self::Convert(input))
            }
            ACTIVATE_HOVER => {
                let arg = arguments.next().ok_or(CommandError::MissingArgument {
                    command: ACTIVATE_HOVER,
                    argument: "document URI",
                })?;
                let uri = serde_json::from_value::<Uri>(arg).map_err(|source| {
                    CommandError::InvalidArgument {
                        command: ACTIVATE_HOVER,
                        source,
                    }
                })?;
                Ok(Self::ActivateHover(uri))
            }
            DEACTIVATE_HOVERS => Ok(Self::DeactivateHovers),
            LIST_HOVERS => Ok(Self::ListHovers),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Message to show the user after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Show { kind: MessageType, message: String },
    Silent,
}

impl CommandOutput {
    fn info(message: impl ToString) -> Self {
        Self::Show {
            kind: MessageType::INFO,
            message: message.to_string(),
        }
    }

    fn warning(message: impl ToString) -> Self {
        Self::Show {
            kind: MessageType::WARNING,
            message: message.to_string(),
        }
    }

    /// Value returned from `workspace/executeCommand`.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Show { message, .. } => Some(Value::String(message.clone())),
            Self::Silent => None,
        }
    }
}

/// Runs the convert command on submitted prompt input.
///
/// Rejected input gets the fixed hint. Input that passes validation but has
/// no date is dropped without a message.
pub fn run_convert(input: Option<&str>) -> CommandOutput {
    let Some(input) = input else {
        tracing::debug!("convert prompt dismissed");
        return CommandOutput::Silent;
    };

    let serial = match validate_input(input) {
        Ok(serial) => serial,
        Err(e) => {
            tracing::debug!("rejected convert input {:?}: {:?}", input, e);
            return CommandOutput::warning(e.hint());
        }
    };

    match serial.to_date() {
        Some(date) => CommandOutput::info(format!("result: {}", date)),
        None => {
            tracing::debug!("serial {} has no date", serial);
            CommandOutput::Silent
        }
    }
}

/// Activates hover preview for the language of `uri`.
pub async fn activate_for_document(
    state: &ServerState,
    uri: &Uri,
) -> Result<ActivationReport, CommandError> {
    let language_id = state
        .language_id(uri)
        .ok_or_else(|| CommandError::UnknownDocument {
            uri: uri.as_str().to_string(),
        })?;

    Ok(state.hovers.write().await.activate(&language_id))
}

/// Undoes a first activation whose host registration failed.
///
/// The tag returns to the unregistered state, so the next activation asks
/// the host to register again.
pub async fn rollback_activation(state: &ServerState, kind_tag: &str) -> bool {
    state.hovers.write().await.forget(kind_tag)
}

pub async fn deactivate_all(state: &ServerState) -> DeactivationReport {
    state.hovers.write().await.deactivate_all()
}

pub async fn list_active(state: &ServerState) -> ActiveHovers {
    state.hovers.read().await.list_active()
}

/// Formats a report for display.
pub fn report(message: impl ToString) -> CommandOutput {
    CommandOutput::info(message)
}

/// Formats a command failure for display.
pub fn failure(error: &CommandError) -> CommandOutput {
    CommandOutput::warning(error)
}

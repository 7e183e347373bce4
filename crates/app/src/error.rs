//! Errors reported by switch operations.
//!
//! None of these are fatal: the switch keeps its previous state and the
//! host decides whether to try again (usually on its next poll).

use crate::ports::{TemplateError, TransportError};

/// Command sent to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnOn,
    TurnOff,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TurnOn => f.write_str("on"),
            Self::TurnOff => f.write_str("off"),
        }
    }
}

/// Why a command did not take effect.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The on/off body could not be rendered; nothing was sent.
    #[error("cannot render request body")]
    Render(#[source] TemplateError),

    /// The request never got a response.
    #[error("endpoint unreachable")]
    Transport(#[source] TransportError),

    /// The endpoint answered with something other than `200 OK`.
    #[error("endpoint rejected the command with status {status}")]
    Rejected {
        /// Status code returned by the endpoint.
        status: u16,
    },
}

/// A `turn_on`/`turn_off` that left the state unchanged.
#[derive(Debug, thiserror::Error)]
#[error("cannot turn {command} {resource}")]
pub struct CommandFailed {
    pub command: Command,
    pub resource: String,
    #[source]
    pub cause: CommandError,
}

/// A `refresh_state` that got no response; the state is unchanged.
#[derive(Debug, thiserror::Error)]
#[error("cannot refresh state from {resource}")]
pub struct RefreshFailed {
    pub resource: String,
    #[source]
    pub source: TransportError,
}

/// Failure of a host service call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The switch does not provide this service.
    #[error("unknown service {0:?}")]
    UnknownService(String),

    #[error(transparent)]
    Command(#[from] CommandFailed),

    #[error(transparent)]
    Refresh(#[from] RefreshFailed),
}

//! Command result contract and dispatch surface
//!
//! This module defines:
//! - The caller-visible outcome of a single acknowledged command
//! - One-shot result callbacks for the non-blocking dispatch mode
//! - The [`Control`] API that authorizes and submits commands

mod control;

pub use control::Control;

use thiserror::Error;
use tracing::debug;

/// Failure outcome of a single acknowledged command.
///
/// `Denied` is produced locally by the arming interlock and never reaches the
/// wire; every other variant is reported by the transport and passed through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Refused by the local authorization gate; no message was sent.
    #[error("command denied")]
    Denied,
    /// The transport gave up waiting for an acknowledgment.
    #[error("timed out waiting for command acknowledgment")]
    Timeout,
    /// The vehicle acknowledged the command with a failure.
    #[error("vehicle rejected the command")]
    CommandFailed,
    /// The vehicle is busy and temporarily refused the command.
    #[error("vehicle is busy")]
    Busy,
    /// No vehicle is connected to the transport.
    #[error("no vehicle connected")]
    NoSystem,
    /// The connection dropped while the command was in flight.
    #[error("connection to vehicle lost")]
    ConnectionError,
    /// The transport could not classify the failure.
    #[error("unknown command failure")]
    Unknown,
}

/// Terminal result of a single acknowledged command.
pub type CommandResult = Result<(), CommandError>;

/// One-shot callback receiving the terminal result of a non-blocking send.
///
/// Ownership makes the delivery contract structural: the callback is consumed
/// by its single invocation and cannot run twice.
pub type ResultCallback = Box<dyn FnOnce(CommandResult) + Send + 'static>;

/// Deliver a terminal result to the caller's callback.
pub(crate) fn report_result(on_result: ResultCallback, result: CommandResult) {
    if let Err(e) = &result {
        debug!("command resolved: {e}");
    }
    on_result(result);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(CommandError::Denied.to_string(), "command denied");
        assert_eq!(CommandError::NoSystem.to_string(), "no vehicle connected");
    }

    #[test]
    fn report_invokes_the_callback_with_the_result() {
        let (tx, rx) = std::sync::mpsc::channel();
        report_result(
            Box::new(move |result| tx.send(result).unwrap()),
            Err(CommandError::Timeout),
        );
        assert_eq!(rx.recv().unwrap(), Err(CommandError::Timeout));
    }
}

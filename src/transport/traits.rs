//! Transport trait abstraction for acknowledgment-tracked command delivery

use async_trait::async_trait;

use crate::command::{CommandResult, ResultCallback};
use crate::mavlink::CommandRequest;

/// An acknowledgment-tracked command transport.
///
/// Implementations own the actual send, retry, timeout, and COMMAND_ACK
/// matching; this crate hands them fully-encoded requests and passes their
/// outcomes through unchanged. Once a request is submitted it cannot be
/// withdrawn.
#[async_trait]
pub trait AckTransport: Send + Sync {
    /// Send a command and wait for its terminal result.
    ///
    /// Suspends the caller until the vehicle acknowledges the command or the
    /// transport's own timeout policy gives up.
    async fn send_with_ack(&self, request: CommandRequest) -> CommandResult;

    /// Send a command and return immediately.
    ///
    /// The transport invokes `on_result` exactly once with the terminal
    /// result, on whatever context it chooses; callers must not assume it
    /// runs on the issuing context.
    fn send_with_ack_async(&self, request: CommandRequest, on_result: ResultCallback);
}

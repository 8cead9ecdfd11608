//! MAVLink Bridge Module
//!
//! Protocol-facing pieces of the control layer: the mapping from high-level
//! actions to COMMAND_LONG-shaped requests, and the message router that
//! delivers incoming telemetry to registered handlers.

mod commands;
mod router;

pub use commands::{CommandParams, CommandRequest, ControlAction, PARAM_COUNT};
pub use router::{HandlerToken, MessageHandler, MessageRouter};

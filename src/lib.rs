//! Command authorization and dispatch for MAVLink flight controllers
//!
//! This crate sits between a high-level vehicle API (arm, disarm, kill,
//! takeoff, land, return-to-land) and an acknowledgment-tracked command
//! transport. It follows the vehicle's airborne/ground status from
//! EXTENDED_SYS_STATE telemetry and uses it to gate arming and disarming
//! before anything touches the wire.
//!
//! The transport itself (send, retry, timeout, COMMAND_ACK matching) is a
//! collaborator behind the [`AckTransport`] trait; this crate only decides
//! whether a command may be sent and what its request looks like.

pub mod command;
pub mod mavlink;
pub mod safety;
pub mod transport;

pub use command::{Control, CommandError, CommandResult, ResultCallback};
pub use mavlink::{CommandRequest, ControlAction, HandlerToken, MessageHandler, MessageRouter};
pub use safety::AirState;
pub use transport::AckTransport;

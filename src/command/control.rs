//! Vehicle control surface - authorizes and dispatches commands
//!
//! Six high-level actions, each in a blocking form that awaits the terminal
//! result and a callback form that returns immediately. Arm and disarm consult
//! the air-state interlock before the transport is ever touched; kill is the
//! deliberate exception and always goes through.

use mavlink::common::EXTENDED_SYS_STATE_DATA;
use mavlink::MessageData;
use std::sync::Arc;
use tracing::{debug, info};

use super::{report_result, CommandError, CommandResult, ResultCallback};
use crate::mavlink::{ControlAction, HandlerToken, MessageRouter};
use crate::safety::AirStateTracker;
use crate::transport::AckTransport;

/// Command authorization and dispatch for one vehicle.
///
/// Intended to be shared between tasks as `Arc<Control>`; every method takes
/// `&self`.
pub struct Control {
    transport: Arc<dyn AckTransport>,
    router: Arc<MessageRouter>,
    tracker: Arc<AirStateTracker>,
    token: HandlerToken,
}

impl Control {
    /// Create the control layer and subscribe its air-state tracker to
    /// EXTENDED_SYS_STATE updates from the router.
    pub async fn new(transport: Arc<dyn AckTransport>, router: Arc<MessageRouter>) -> Self {
        let tracker = Arc::new(AirStateTracker::new());
        let token = router.issue_token();
        router
            .register(EXTENDED_SYS_STATE_DATA::ID, tracker.clone(), token)
            .await;
        info!("control layer registered for landed-state updates");

        Self {
            transport,
            router,
            tracker,
            token,
        }
    }

    /// Drop every router subscription owned by this control layer.
    ///
    /// After shutdown the tracked air state no longer updates, so gated
    /// commands fall back to failing closed on whatever was last observed.
    pub async fn shutdown(&self) {
        self.router.unregister_all(self.token).await;
    }

    /// Arm the vehicle. Denied unless it is known to be on the ground.
    pub async fn arm(&self) -> CommandResult {
        self.send(ControlAction::Arm).await
    }

    pub fn arm_async(&self, on_result: impl FnOnce(CommandResult) + Send + 'static) {
        self.send_async(ControlAction::Arm, Box::new(on_result));
    }

    /// Disarm the vehicle. Denied unless it is known to be on the ground.
    pub async fn disarm(&self) -> CommandResult {
        self.send(ControlAction::Disarm).await
    }

    pub fn disarm_async(&self, on_result: impl FnOnce(CommandResult) + Send + 'static) {
        self.send_async(ControlAction::Disarm, Box::new(on_result));
    }

    /// Emergency actuator kill. Never gated, even with the air state unknown.
    pub async fn kill(&self) -> CommandResult {
        self.send(ControlAction::Kill).await
    }

    pub fn kill_async(&self, on_result: impl FnOnce(CommandResult) + Send + 'static) {
        self.send_async(ControlAction::Kill, Box::new(on_result));
    }

    /// Take off from the current position.
    pub async fn takeoff(&self) -> CommandResult {
        self.send(ControlAction::Takeoff).await
    }

    pub fn takeoff_async(&self, on_result: impl FnOnce(CommandResult) + Send + 'static) {
        self.send_async(ControlAction::Takeoff, Box::new(on_result));
    }

    /// Land at the current position.
    pub async fn land(&self) -> CommandResult {
        self.send(ControlAction::Land).await
    }

    pub fn land_async(&self, on_result: impl FnOnce(CommandResult) + Send + 'static) {
        self.send_async(ControlAction::Land, Box::new(on_result));
    }

    /// Switch the vehicle into its autonomous return-to-land mode.
    pub async fn return_to_land(&self) -> CommandResult {
        self.send(ControlAction::ReturnToLand).await
    }

    pub fn return_to_land_async(&self, on_result: impl FnOnce(CommandResult) + Send + 'static) {
        self.send_async(ControlAction::ReturnToLand, Box::new(on_result));
    }

    /// Blocking dispatch: gate, encode, await the transport's terminal result.
    async fn send(&self, action: ControlAction) -> CommandResult {
        if let Some(denied) = self.denial(action) {
            return Err(denied);
        }
        self.transport.send_with_ack(action.request()).await
    }

    /// Callback dispatch: gate, encode, hand off to the transport.
    ///
    /// A denied command never produces a transport round trip; its callback
    /// runs synchronously on the issuing context.
    fn send_async(&self, action: ControlAction, on_result: ResultCallback) {
        if let Some(denied) = self.denial(action) {
            report_result(on_result, Err(denied));
            return;
        }
        self.transport.send_with_ack_async(
            action.request(),
            Box::new(move |result| report_result(on_result, result)),
        );
    }

    /// Consult the interlock. `None` means the action may be dispatched.
    fn denial(&self, action: ControlAction) -> Option<CommandError> {
        if !action.is_gated() {
            return None;
        }
        let state = self.tracker.current();
        let allowed = match action {
            ControlAction::Arm => state.arm_allowed(),
            _ => state.disarm_allowed(),
        };
        if allowed {
            return None;
        }
        if !state.known {
            debug!(?action, "air state not yet known, failing closed");
        } else {
            debug!(?action, "vehicle still in air");
        }
        Some(CommandError::Denied)
    }
}

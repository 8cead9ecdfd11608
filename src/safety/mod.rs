//! Safety Module
//!
//! Tracks the vehicle's airborne/ground status from EXTENDED_SYS_STATE
//! telemetry and answers the arming interlock questions derived from it.

use async_trait::async_trait;
use mavlink::common::{MavLandedState, MavMessage};
use tokio::sync::watch;

use crate::mavlink::MessageHandler;

/// Airborne/ground status as last reported by the vehicle.
///
/// `in_air` is only meaningful once `known` is true; until the first status
/// update arrives the interlock treats the vehicle as unsafe to arm or disarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AirState {
    /// At least one landed-state update has been observed.
    pub known: bool,
    /// The vehicle last reported being airborne.
    pub in_air: bool,
}

impl AirState {
    /// Arming is allowed only on the ground, with the state known.
    pub fn arm_allowed(&self) -> bool {
        self.known && !self.in_air
    }

    /// Disarming is allowed only on the ground, with the state known.
    pub fn disarm_allowed(&self) -> bool {
        self.known && !self.in_air
    }
}

/// Maintains [`AirState`] from incoming landed-state updates.
///
/// Updates arrive on whatever context routes telemetry; readers take atomic
/// snapshots through the watch channel, so a snapshot can never pair
/// `known = true` with a stale `in_air`. Updates are O(1) and never block.
pub struct AirStateTracker {
    state: watch::Sender<AirState>,
}

impl AirStateTracker {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(AirState::default()),
        }
    }

    /// Snapshot of the current tracked state.
    pub fn current(&self) -> AirState {
        *self.state.borrow()
    }

    fn apply(&self, landed_state: MavLandedState) {
        self.state.send_modify(|state| {
            match landed_state {
                MavLandedState::MAV_LANDED_STATE_IN_AIR => state.in_air = true,
                MavLandedState::MAV_LANDED_STATE_ON_GROUND => state.in_air = false,
                // TAKEOFF, LANDING and UNDEFINED leave the airborne flag as-is.
                _ => {}
            }
            // Any update counts as an observation, even an ambiguous one.
            state.known = true;
        });
    }
}

impl Default for AirStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageHandler for AirStateTracker {
    async fn handle_message(&self, message: &MavMessage) {
        if let MavMessage::EXTENDED_SYS_STATE(data) = message {
            self.apply(data.landed_state);
        }
    }
}

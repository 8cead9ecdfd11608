//! MAVLink Command Encoding
//!
//! Maps high-level control actions to fixed command codes plus their
//! seven-slot parameter vectors. Both dispatch modes build their requests
//! here, so blocking and callback submissions can never diverge on the wire.

use mavlink::common::{MavCmd, MavModeFlag};

/// Number of parameter slots in a COMMAND_LONG-shaped request.
pub const PARAM_COUNT: usize = 7;

/// Parameter vector with explicit "unused" slots.
///
/// `None` marks a slot the command does not use; it only becomes the
/// protocol's NaN encoding at the transport boundary, so a legitimate zero
/// parameter is never ambiguous.
pub type CommandParams = [Option<f32>; PARAM_COUNT];

/// PX4 custom main mode AUTO.
const PX4_CUSTOM_MAIN_MODE_AUTO: u8 = 4;
/// PX4 custom sub mode AUTO_RTL.
const PX4_CUSTOM_SUB_MODE_AUTO_RTL: u8 = 5;

/// A fully-encoded command, ready to hand to the transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandRequest {
    pub command: MavCmd,
    pub params: CommandParams,
}

impl CommandRequest {
    /// Translate unused slots to the wire's NaN sentinel.
    pub fn wire_params(&self) -> [f32; PARAM_COUNT] {
        self.params.map(|param| param.unwrap_or(f32::NAN))
    }
}

/// High-level vehicle actions exposed by the control layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Arm,
    Disarm,
    Kill,
    Takeoff,
    Land,
    ReturnToLand,
}

impl ControlAction {
    /// The single encoding source for both dispatch modes.
    pub fn request(self) -> CommandRequest {
        match self {
            ControlAction::Arm => CommandRequest {
                command: MavCmd::MAV_CMD_COMPONENT_ARM_DISARM,
                params: first_param(1.0),
            },
            // Kill shares the disarm encoding; the difference is that it
            // bypasses the interlock entirely.
            ControlAction::Disarm | ControlAction::Kill => CommandRequest {
                command: MavCmd::MAV_CMD_COMPONENT_ARM_DISARM,
                params: first_param(0.0),
            },
            ControlAction::Takeoff => CommandRequest {
                command: MavCmd::MAV_CMD_NAV_TAKEOFF,
                params: [None; PARAM_COUNT],
            },
            ControlAction::Land => CommandRequest {
                command: MavCmd::MAV_CMD_NAV_LAND,
                params: [None; PARAM_COUNT],
            },
            ControlAction::ReturnToLand => {
                // The mode slot carries a flag bitmask where plain mode values
                // go elsewhere; that overload is how DO_SET_MODE works.
                let mode = MavModeFlag::MAV_MODE_FLAG_SAFETY_ARMED
                    | MavModeFlag::MAV_MODE_FLAG_CUSTOM_MODE_ENABLED;
                let mut params = [None; PARAM_COUNT];
                params[0] = Some(f32::from(mode.bits()));
                params[1] = Some(f32::from(PX4_CUSTOM_MAIN_MODE_AUTO));
                params[2] = Some(f32::from(PX4_CUSTOM_SUB_MODE_AUTO_RTL));
                CommandRequest {
                    command: MavCmd::MAV_CMD_DO_SET_MODE,
                    params,
                }
            }
        }
    }

    /// Whether this action must clear the arming interlock before dispatch.
    pub fn is_gated(self) -> bool {
        matches!(self, ControlAction::Arm | ControlAction::Disarm)
    }
}

fn first_param(value: f32) -> CommandParams {
    let mut params = [None; PARAM_COUNT];
    params[0] = Some(value);
    params
}

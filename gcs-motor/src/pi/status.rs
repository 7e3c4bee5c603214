//! Motor-record vocabulary: the status word reported upward and the
//! abstract commands consumed from the record layer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::axis::AxisState;
use super::controller::PivotPoint;

bitflags! {
    /// Generic motor status bits, one word per axis per poll.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct MotorStatus: u16 {
        /// Last commanded direction was positive
        const DIRECTION = 0x0001;
        /// Motion (or homing) is complete
        const DONE = 0x0002;
        /// Positive limit switch active
        const PLUS_LS = 0x0004;
        /// Home switch active
        const HOME_LS = 0x0008;
        /// Axis has been referenced
        const HOMED = 0x0040;
        /// Negative limit switch active
        const MINUS_LS = 0x0080;
        /// Axis is moving or homing
        const MOVING = 0x0100;
        /// Latched problem, cleared only by re-enabling the servo
        const PROBLEM = 0x0200;
        /// Closed-loop gain is supported
        const GAIN_SUPPORT = 0x0800;
        /// Communication with the controller failed
        const COMM_ERROR = 0x1000;
        /// Encoder present
        const ENCODER_PRESENT = 0x2000;
        /// Servo (closed loop) enabled
        const POWER_ON = 0x4000;
    }
}

/// Raw per-axis status as decoded from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisStatusBits {
    pub homing: bool,
    pub moving: bool,
    pub neg_limit: bool,
    pub pos_limit: bool,
    /// Reference switch signal, only reported by `#4` status words
    pub home_switch: bool,
    pub servo: bool,
}

/// Abstract commands issued by the record layer. Positions, velocities and
/// accelerations are in counts.
#[derive(Debug, Clone, Copy, PartialEq, strum::Display)]
pub enum MotorCommand {
    MoveAbs { position: f64 },
    MoveRel { distance: f64 },
    HomeForward,
    HomeReverse,
    LoadPosition { position: f64 },
    SetVelocity { velocity: f64 },
    SetAcceleration { acceleration: f64 },
    Go,
    Stop,
    GetInfo,
    EnableTorque,
    DisableTorque,
    Jog { velocity: f64 },
    SetHighLimit { limit: f64 },
    SetLowLimit { limit: f64 },
}

/// Controller-level parameters that are not part of the motor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum DriverParam {
    #[strum(serialize = "CLOSED_LOOP")]
    ClosedLoop,
    #[strum(serialize = "DEFER_MOVES")]
    DeferMoves,
    #[strum(serialize = "PI_SUP_PIVOT_X")]
    PivotX,
    #[strum(serialize = "PI_SUP_PIVOT_Y")]
    PivotY,
    #[strum(serialize = "PI_SUP_PIVOT_Z")]
    PivotZ,
}

/// One axis' state after a poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisReport {
    pub index: usize,
    pub name: String,
    /// Position in counts
    pub position: i64,
    /// Encoder position in counts (same as `position` on GCS controllers)
    pub encoder_position: i64,
    /// Position in controller units (`PI_SUP_POSITION`)
    pub real_position: f64,
    pub status: MotorStatus,
    pub state: AxisState,
    /// Servo readback (`PI_SUP_SERVO`)
    pub servo: bool,
}

impl AxisReport {
    pub fn done(&self) -> bool {
        self.status.contains(MotorStatus::DONE)
    }

    pub fn moving(&self) -> bool {
        self.status.contains(MotorStatus::MOVING)
    }
}

/// Result of one controller-wide poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollReport {
    pub axes: Vec<AxisReport>,
    /// Pivot point readback (`PI_SUP_RBPIVOT_X/Y/Z`)
    pub pivot: PivotPoint,
    /// Most recent non-zero GCS error (`PI_SUP_LAST_ERR`)
    pub last_error: i32,
    /// True while any axis is moving or homing
    pub any_moving: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bits_are_distinct() {
        let all = MotorStatus::all();
        assert_eq!(all.bits().count_ones(), 12);
    }

    #[test]
    fn test_driver_param_names() {
        assert_eq!(DriverParam::PivotX.to_string(), "PI_SUP_PIVOT_X");
        assert_eq!("DEFER_MOVES".parse::<DriverParam>().unwrap(), DriverParam::DeferMoves);
        assert!("PI_SUP_TARGET".parse::<DriverParam>().is_err());
    }

    #[test]
    fn test_command_display_for_logs() {
        assert_eq!(MotorCommand::HomeForward.to_string(), "HomeForward");
        assert_eq!(MotorCommand::MoveAbs { position: 1.0 }.to_string(), "MoveAbs");
    }
}

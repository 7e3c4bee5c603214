//! Motor-style families: C-663/C-863/C-867, E-755 and C-702.

use std::time::Instant;

use tracing::{debug, info};

use super::{GcsController, CTRL_STATUS};
use crate::pi::axis::PiAxis;
use crate::pi::gcs::{GcsError, GcsResult};
use crate::pi::params::SpaParam;
use crate::pi::status::AxisStatusBits;

// Status word masks (control byte 4), one 16 bit word per axis
const STATUS_NEG_LIMIT: u16 = 0x0001;
const STATUS_REFERENCE: u16 = 0x0002;
const STATUS_POS_LIMIT: u16 = 0x0004;
const STATUS_SERVO: u16 = 0x1000;
const STATUS_MOVING: u16 = 0x2000;
const STATUS_HOMING: u16 = 0x4000;

/// Extract one axis' word from a `#4` reply such as `0x90009000`.
fn status_word(reply: &str, index: usize) -> GcsResult<u16> {
    let text = reply.trim();
    let start = 2 + 4 * index;
    let digits = text.get(start..start + 4).ok_or_else(|| {
        GcsError::InvalidResponse(format!("Status word too short for axis {index}: {text:?}"))
    })?;
    u16::from_str_radix(digits, 16)
        .map_err(|_| GcsError::ParseError(format!("Invalid status word: {digits:?}")))
}

impl GcsController {
    pub(super) fn motor_status(&mut self, axis: &PiAxis) -> GcsResult<AxisStatusBits> {
        let reply = self.interface.send_byte_and_receive(CTRL_STATUS)?;
        let word = status_word(&reply, axis.index)?;
        Ok(AxisStatusBits {
            homing: word & STATUS_HOMING != 0,
            moving: word & STATUS_MOVING != 0,
            neg_limit: word & STATUS_NEG_LIMIT != 0,
            pos_limit: word & STATUS_POS_LIMIT != 0,
            home_switch: word & STATUS_REFERENCE != 0,
            servo: word & STATUS_SERVO != 0,
        })
    }

    /// E-755/C-702: busy (byte 7) means a reference move is running.
    pub(super) fn busy_status(&mut self, axis: &PiAxis) -> GcsResult<AxisStatusBits> {
        let busy = self.read_busy()?;
        let moving = busy || self.read_moving_mask()? & axis.moving_state_mask != 0;
        Ok(AxisStatusBits {
            homing: busy,
            moving,
            servo: self.query_servo(axis)?,
            ..AxisStatusBits::default()
        })
    }

    pub(super) fn motor_set_acceleration(
        &mut self,
        axis: &mut PiAxis,
        acceleration_cts: f64,
    ) -> GcsResult<()> {
        let mut acceleration = axis.counts_per_unit.to_units(acceleration_cts.abs());
        if acceleration == axis.acceleration {
            return Ok(());
        }

        let max = match axis.max_acceleration {
            Some(max) => max,
            None => {
                let max = self.max_acceleration(axis)?;
                debug!("Axis {} max acceleration {}", axis.name, max);
                axis.max_acceleration = Some(max);
                max
            }
        };
        if max > 0.0 && acceleration > max {
            debug!(
                "Axis {} acceleration {} clamped to {}",
                axis.name, acceleration, max
            );
            acceleration = max;
        }

        self.set_param(axis, SpaParam::CurrentAcceleration, acceleration)?;
        self.set_param(axis, SpaParam::CurrentDeceleration, acceleration)?;
        self.check_error()?;
        axis.acceleration = acceleration;
        Ok(())
    }

    /// Lower of the two acceleration limits. The C-702 has no max
    /// parameters, its current values are the ceiling.
    fn max_acceleration(&mut self, axis: &PiAxis) -> GcsResult<f64> {
        let (accel, decel) = match self.family {
            super::ControllerFamily::C702 => {
                (SpaParam::CurrentAcceleration, SpaParam::CurrentDeceleration)
            }
            _ => (SpaParam::MaxAcceleration, SpaParam::MaxDeceleration),
        };
        let accel = self.get_param(axis, accel)?;
        let decel = self.get_param(axis, decel)?;
        Ok(accel.min(decel))
    }

    pub(super) fn motor_reference(
        &mut self,
        axis: &mut PiAxis,
        velocity_cts: f64,
        forwards: bool,
    ) -> GcsResult<()> {
        let c702 = self.family == super::ControllerFamily::C702;
        let command = match (axis.has_reference, axis.has_limit_switches, forwards) {
            (true, _, _) if c702 => "REF",
            (true, _, _) => "FRF",
            (false, true, true) if c702 => "MPL",
            (false, true, false) if c702 => "MNL",
            (false, true, true) => "FPL",
            (false, true, false) => "FNL",
            (false, false, _) => return Err(GcsError::NoReferenceCapability(axis.name.clone())),
        };

        self.set_servo(axis, true)?;
        if velocity_cts != 0.0 {
            if c702 {
                self.set_velocity_cts(axis, velocity_cts)?;
            } else {
                let velocity = axis.counts_per_unit.to_units(velocity_cts.abs());
                self.set_param(axis, SpaParam::ReferenceVelocity, velocity)?;
            }
        }

        self.interface.send_only(&format!("{command} {}", axis.name))?;
        self.check_error()?;

        if c702 {
            self.reference_started = Some(Instant::now());
        }
        info!("Axis {} referencing started ({})", axis.name, command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pi::testing::{motor_port, piezo_port, ScriptedPort};
    use std::time::Duration;

    fn ready(port: &ScriptedPort, idn: &str) -> (GcsController, PiAxis) {
        let mut gcs = GcsController::create(port.interface(), idn).unwrap();
        gcs.init().unwrap();
        let mut axis = PiAxis::new(0, gcs.axis_names()[0].clone());
        axis.init(&mut gcs).unwrap();
        port.clear_sent();
        (gcs, axis)
    }

    fn c702_port() -> ScriptedPort {
        let port = ScriptedPort::new();
        port.reply("SAI?", "BA")
            .reply("SPA? A 14", "A 14=1")
            .reply("SPA? A 15", "A 15=1")
            .reply("SPA? A 20", "A 20=1")
            .reply("SPA? A 28", "A 28=0")
            .reply("SPA? A 11", "A 11=8")
            .reply("SPA? A 12", "A 12=6")
            .reply("LIM? A", "A=1")
            .reply("CST? A", "A=M-840")
            .reply("VEL? A", "A=1")
            .reply("POS? A", "A=0")
            .reply("TMN? A", "A=-50")
            .reply("TMX? A", "A=50")
            .reply("SVO? A", "A=1")
            .reply("#5", "0");
        port
    }

    #[test]
    fn test_status_word_offsets() {
        assert_eq!(status_word("0x12345678", 0).unwrap(), 0x1234);
        assert_eq!(status_word("0x12345678\n", 1).unwrap(), 0x5678);
        assert!(status_word("0x1234", 1).is_err());
        assert!(status_word("0xZZZZ", 0).is_err());
    }

    #[test]
    fn test_reference_with_sensor() {
        let port = motor_port();
        let (mut gcs, mut axis) = ready(&port, "PI C-863");
        gcs.reference_vel_cts(&mut axis, 5000.0, false).unwrap();
        assert_eq!(
            port.sent(),
            vec!["SVO 1 1", "ERR?", "SPA 1 80 0.5", "FRF 1", "ERR?"]
        );
    }

    #[test]
    fn test_reference_keeps_velocity_when_zero() {
        let port = motor_port();
        let (mut gcs, mut axis) = ready(&port, "PI C-863");
        gcs.reference_vel_cts(&mut axis, 0.0, true).unwrap();
        assert_eq!(port.count("SPA 1 80"), 0);
        assert_eq!(port.count("FRF 1"), 1);
    }

    #[test]
    fn test_reference_on_limit_switch() {
        let port = motor_port();
        port.reply("TRS? 1", "1=0");
        let (mut gcs, mut axis) = ready(&port, "PI C-863");
        assert!(!axis.has_reference());

        gcs.reference_vel_cts(&mut axis, 0.0, true).unwrap();
        gcs.reference_vel_cts(&mut axis, 0.0, false).unwrap();
        assert_eq!(port.sent_matching("FPL"), vec!["FPL 1"]);
        assert_eq!(port.sent_matching("FNL"), vec!["FNL 1"]);
    }

    #[test]
    fn test_reference_rejected_by_controller() {
        let port = motor_port();
        let (mut gcs, mut axis) = ready(&port, "PI C-863");
        port.push_error(0).push_error(8);
        let err = gcs.reference_vel_cts(&mut axis, 0.0, true).unwrap_err();
        assert!(matches!(err, GcsError::ControllerError { code: 8, .. }));
    }

    #[test]
    fn test_c702_setup_and_reference() {
        let port = c702_port();
        let (mut gcs, mut axis) = ready(&port, "PI C-702.00");
        assert_eq!(gcs.axis_names(), ["A", "B"]);
        assert!(axis.has_reference());
        assert!(!axis.is_homed());

        gcs.reference_vel_cts(&mut axis, 2.0, true).unwrap();
        assert_eq!(port.sent_matching("REF"), vec!["REF A"]);
        assert_eq!(port.sent_matching("VEL "), vec!["VEL A 2"]);

        // inside the grace window the controller is not asked
        port.clear_sent();
        let status = gcs.get_status(&axis).unwrap();
        assert!(status.homing && status.moving);
        assert!(port.sent().is_empty());

        // once the window has passed, the busy byte decides
        gcs.reference_started = Instant::now().checked_sub(Duration::from_secs(2));
        assert!(gcs.reference_started.is_some());
        port.reply("#7", "0");
        let status = gcs.get_status(&axis).unwrap();
        assert!(!status.homing && !status.moving);
        assert!(status.servo);
        assert_eq!(port.sent(), vec!["#7", "#5", "SVO? A"]);

        port.reply_once("#7", "\u{B0}");
        port.clear_sent();
        let status = gcs.get_status(&axis).unwrap();
        assert!(status.homing && status.moving);
        assert_eq!(port.sent_matching("#7"), vec!["#7"]);
    }

    #[test]
    fn test_c702_acceleration_ceiling_is_current_value() {
        let port = c702_port();
        let (mut gcs, mut axis) = ready(&port, "PI C-702.00");
        gcs.set_acceleration_cts(&mut axis, 100.0).unwrap();
        assert_eq!(axis.max_acceleration, Some(6.0));
        assert_eq!(port.sent_matching("SPA A"), vec!["SPA A 11 6", "SPA A 12 6"]);
    }

    #[test]
    fn test_equal_acceleration_is_not_resent() {
        let port = motor_port();
        let (mut gcs, mut axis) = ready(&port, "PI C-863");
        gcs.set_acceleration_cts(&mut axis, 50000.0).unwrap();
        gcs.set_acceleration_cts(&mut axis, 50000.0).unwrap();
        assert_eq!(port.count("SPA 1 11"), 1);
    }

    #[test]
    fn test_e755_reference_uses_motor_commands() {
        let port = piezo_port();
        port.reply("LIM? 1", "1=0")
            .reply("HAR? 1", "1=0")
            .reply("TRS? 1", "1=1")
            .reply("FRF? 1", "1=0");
        let (mut gcs, mut axis) = ready(&port, "PI E-755.1CD");
        gcs.reference_vel_cts(&mut axis, 0.0, true).unwrap();
        assert_eq!(port.sent_matching("FRF "), vec!["FRF 1"]);
    }
}

//! GCS controller session and per-family command dispatch.
//!
//! A [`GcsController`] is created once per connected device from its `*IDN?`
//! answer. The [`ControllerFamily`] decided at that point never changes and
//! selects the command dialect and status decoding for every later call:
//!
//! | Family | Status source | Referencing | Acceleration |
//! |---|---|---|---|
//! | GenericMotor | control byte 4, 4 hex digits per axis | `FRF`/`FPL`/`FNL` | `SPA` 11/12, clamped |
//! | Piezo, E517 | control byte 5 bitmask + `SVO?` | none | none |
//! | E755 | control byte 7 busy, then byte 5 | `FRF`/`FPL`/`FNL` | none |
//! | C702 | as E755, forced busy 1 s after `REF` | `REF`/`MPL`/`MNL` | `SPA` 11/12, clamped |
//! | Hexapod1/2 | cached platform state, byte 5 per poll | `INI X` / `FRF X` | none |
//!
//! Axis operations take the axis as `&mut PiAxis`. The controller never keeps
//! a reference to an axis; it only updates the fields the command concerns.
//!
//! Every state-changing command is followed by `ERR?` before it is reported
//! as successful. The most recent non-zero code is kept in
//! [`last_error`](GcsController::last_error).

mod family;
mod hexapod;
mod motor;

pub use family::{ControllerFamily, FamilyMatch, GCS2_VERSION};
pub use hexapod::HEXAPOD_AXES;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::axis::{CountsPerUnit, PiAxis};
use super::error_codes::{self, COM_ERROR, COM_NO_ERROR, PI_CNTR_STOP, PI_CNTR_UNKNOWN_COMMAND};
use super::gcs::{GcsDevice, GcsError, GcsResult};
use super::interface::PiInterface;
use super::params::SpaParam;
use super::status::AxisStatusBits;

/// Most axes a controller may report.
pub const MAX_AXES: usize = 64;

/// Pause between a Hexapod `MOV` and the first moving-state read.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// C-702 reports busy for this long after a reference move is started,
/// because the controller acknowledges `REF` late.
const REFERENCE_GRACE: Duration = Duration::from_secs(1);

/// Status word query.
pub const CTRL_STATUS: u8 = 4;
/// Moving-axes bitmask query.
pub const CTRL_MOVING: u8 = 5;
/// Busy query, answers 0xB0 (busy) or 0xB1.
pub const CTRL_BUSY: u8 = 7;
/// Stop all axes (Hexapods).
pub const CTRL_STOP: u8 = 24;

const BUSY_REPLY: u32 = 0xB0;

/// Hexapod pivot point (rotation center), in controller units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PivotPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One pivot coordinate, named after its GCS letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum PivotCoordinate {
    #[strum(serialize = "R")]
    X,
    #[strum(serialize = "S")]
    Y,
    #[strum(serialize = "T")]
    Z,
}

/// Whole-platform state of a Hexapod.
#[derive(Debug, Default)]
struct PlatformState {
    homing: bool,
    pivot: PivotPoint,
    /// Control byte 4 is understood by this firmware
    status_byte_supported: bool,
}

/// Session with one GCS controller.
pub struct GcsController {
    interface: PiInterface,
    identification: String,
    family: ControllerFamily,
    axis_names: Vec<String>,
    last_error: i32,
    any_axis_moving: bool,
    platform: PlatformState,
    reference_started: Option<Instant>,
    output_channels: usize,
    settle_delay: Duration,
}

impl GcsController {
    /// Identify the device with `*IDN?` and build the matching controller.
    pub fn connect(interface: PiInterface) -> GcsResult<Self> {
        let idn = interface.send_and_receive("*IDN?")?;
        Self::create(interface, idn.trim())
    }

    /// Build the controller for an identification string.
    ///
    /// Hexapods are asked for their GCS version (`CSV?`) to pick the dialect.
    ///
    /// # Errors
    ///
    /// [`GcsError::UnsupportedController`] when no family token matches.
    pub fn create(interface: PiInterface, idn: &str) -> GcsResult<Self> {
        let family = match ControllerFamily::classify(idn) {
            Some(FamilyMatch::Known(family)) => family,
            Some(FamilyMatch::Hexapod) => {
                ControllerFamily::hexapod_for_version(query_gcs_version(&interface)?)
            }
            None => return Err(GcsError::UnsupportedController(idn.trim().to_string())),
        };
        info!("Controller {:?} uses the {} dialect", idn.trim(), family);

        Ok(Self {
            interface,
            identification: idn.trim().to_string(),
            family,
            axis_names: Vec::new(),
            last_error: COM_NO_ERROR,
            any_axis_moving: false,
            platform: PlatformState::default(),
            reference_started: None,
            output_channels: 0,
            settle_delay: DEFAULT_SETTLE_DELAY,
        })
    }

    /// Replace the Hexapod settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn family(&self) -> ControllerFamily {
        self.family
    }

    pub fn identification(&self) -> &str {
        &self.identification
    }

    /// Axis names found by [`init`](Self::init), in controller order.
    pub fn axis_names(&self) -> &[String] {
        &self.axis_names
    }

    /// Most recent non-zero GCS error code, 0 if none was seen.
    pub fn last_error(&self) -> i32 {
        self.last_error
    }

    pub fn any_axis_moving(&self) -> bool {
        self.any_axis_moving
    }

    /// Number of E-517 output channels switched online at init.
    pub fn output_channels(&self) -> usize {
        self.output_channels
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Transport, for raw access from tools.
    pub fn interface(&self) -> &PiInterface {
        &self.interface
    }

    /// Discover axes and run family-specific setup.
    pub fn init(&mut self) -> GcsResult<()> {
        self.axis_names = self.find_connected_axes()?;
        info!("Found {} axes: {:?}", self.axis_names.len(), self.axis_names);

        match self.family {
            ControllerFamily::E517 => self.switch_channels_online(),
            ControllerFamily::Hexapod1 | ControllerFamily::Hexapod2 => self.hexapod_init(),
            _ => Ok(()),
        }
    }

    fn find_connected_axes(&mut self) -> GcsResult<Vec<String>> {
        let names: Vec<String> = match self.family {
            ControllerFamily::Hexapod1 | ControllerFamily::Hexapod2 => {
                HEXAPOD_AXES.iter().map(|s| s.to_string()).collect()
            }
            // one character per axis, listed last-to-first
            ControllerFamily::C702 => {
                let reply = self.interface.send_and_receive("SAI?")?;
                reply.trim().chars().rev().map(String::from).collect()
            }
            _ => {
                let reply = self.interface.send_and_receive("SAI?")?;
                reply
                    .lines()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect()
            }
        };

        if names.len() > MAX_AXES {
            return Err(GcsError::InvalidResponse(format!(
                "controller reports {} axes, at most {MAX_AXES} are supported",
                names.len()
            )));
        }
        Ok(names)
    }

    fn switch_channels_online(&mut self) -> GcsResult<()> {
        let reply = self.interface.send_and_receive("TPC?")?;
        let channels = GcsDevice::value_after_equals(&reply);
        self.output_channels = channels
            .parse()
            .map_err(|_| GcsError::ParseError(format!("Invalid channel count: {channels:?}")))?;

        for channel in 1..=self.output_channels {
            self.interface.send_only(&format!("ONL {channel} 1"))?;
        }
        debug!("Switched {} output channels online", self.output_channels);
        Ok(())
    }

    /// Prepare one axis: capability queries, moving mask and servo on.
    pub fn init_axis(&mut self, axis: &mut PiAxis) -> GcsResult<()> {
        if self.family.is_hexapod() {
            axis.moving_state_mask = 1;
            return self.set_servo(axis, true);
        }

        if self.family.is_motor_like() {
            self.has_limit_switches(axis)?;
            self.has_reference_sensor(axis)?;
        }

        let stage = self.interface.send_and_receive(&format!("CST? {}", axis.name))?;
        info!(
            "Axis {} stage configuration: {}",
            axis.name,
            GcsDevice::value_after_equals(&stage)
        );
        axis.moving_state_mask = 1 << axis.index.min(63);
        self.set_servo(axis, true)
    }

    // ==================== Error protocol ====================

    /// Read and latch the controller error code.
    fn fetch_error(&mut self) -> GcsResult<i32> {
        let result = self.interface.send_and_receive("ERR?").and_then(|reply| {
            reply
                .trim()
                .parse::<i32>()
                .map_err(|_| GcsError::InvalidResponse(format!("Invalid error code: {reply:?}")))
        });

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.gcs_code().unwrap_or(COM_ERROR),
        };
        if code != COM_NO_ERROR {
            self.last_error = code;
            if code == PI_CNTR_STOP {
                debug!("GCS error {}: {}", code, error_codes::translate(code));
            } else {
                warn!(
                    "GCS error {} ({}): {}",
                    code,
                    error_codes::symbol(code).unwrap_or("?"),
                    error_codes::translate(code)
                );
            }
        }
        result
    }

    /// Query `ERR?`, returning 0 on success or the GCS code.
    ///
    /// Transport failures come back as `COM_TIMEOUT` or `COM_ERROR`.
    pub fn query_error(&mut self) -> i32 {
        match self.fetch_error() {
            Ok(code) => code,
            Err(e) => e.gcs_code().unwrap_or(COM_ERROR),
        }
    }

    fn check_error(&mut self) -> GcsResult<()> {
        match self.fetch_error()? {
            COM_NO_ERROR => Ok(()),
            code => Err(GcsError::controller(code)),
        }
    }

    fn check_motion(&mut self, axes: &str) -> GcsResult<()> {
        match self.fetch_error()? {
            COM_NO_ERROR => Ok(()),
            code => Err(GcsError::MotionRejected {
                axis: axes.to_string(),
                code,
                message: error_codes::translate(code).to_string(),
            }),
        }
    }

    // ==================== Motion ====================

    /// Absolute move to `target` in controller units.
    ///
    /// On rejection the cached position is left alone; the next poll reads it.
    pub fn move_axis(&mut self, axis: &mut PiAxis, target: f64) -> GcsResult<()> {
        self.interface.send_only(&format!("MOV {} {}", axis.name, target))?;
        axis.last_direction_positive = target > axis.position;
        self.check_motion(&axis.name)
    }

    /// Absolute move to `target_cts` counts.
    pub fn move_cts(&mut self, axis: &mut PiAxis, target_cts: i64) -> GcsResult<()> {
        let target = axis.counts_per_unit.to_units(target_cts as f64);
        debug!("Axis {} move to {} counts ({})", axis.name, target_cts, target);

        if self.family.is_hexapod() {
            return self.hexapod_move(axis, target_cts, target);
        }
        self.move_axis(axis, target)
    }

    /// Start several axes with a single `MOV` so they begin together.
    pub fn move_cts_multi(&mut self, moves: &mut [(&mut PiAxis, i64)]) -> GcsResult<()> {
        if moves.is_empty() {
            return Ok(());
        }

        let mut command = String::from("MOV");
        let mut names = Vec::with_capacity(moves.len());
        for (axis, target_cts) in moves.iter_mut() {
            let target = axis.counts_per_unit.to_units(*target_cts as f64);
            command.push_str(&format!(" {} {}", axis.name, target));
            axis.last_direction_positive = *target_cts > axis.position_cts;
            names.push(axis.name.clone());
        }
        let names = names.join(",");

        self.interface.send_only(&command)?;

        if self.family.is_hexapod() {
            std::thread::sleep(self.settle_delay);
            let moving = self.read_platform_moving()?;
            for (axis, _) in moves.iter_mut() {
                axis.moving = moving;
            }
            if !moving {
                self.check_motion(&names)?;
            }
            self.any_axis_moving = true;
            return Ok(());
        }
        self.check_motion(&names)
    }

    /// Set the axis velocity from counts/s. Skips the wire when the
    /// converted value equals the cached one.
    pub fn set_velocity_cts(&mut self, axis: &mut PiAxis, velocity_cts: f64) -> GcsResult<()> {
        let velocity = axis.counts_per_unit.to_units(velocity_cts.abs());
        if velocity == axis.velocity {
            return Ok(());
        }

        let command = match self.family {
            ControllerFamily::Hexapod2 => format!("VLS {velocity}"),
            _ => format!("VEL {} {}", axis.name, velocity),
        };
        self.interface.send_only(&command)?;
        self.check_error()?;
        axis.velocity = velocity;
        Ok(())
    }

    /// Set the acceleration from counts/s². Only motor controllers expose
    /// it; the other families accept the call and do nothing.
    pub fn set_acceleration_cts(&mut self, axis: &mut PiAxis, acceleration_cts: f64) -> GcsResult<()> {
        match self.family {
            ControllerFamily::GenericMotor | ControllerFamily::C702 => {
                self.motor_set_acceleration(axis, acceleration_cts)
            }
            _ => Ok(()),
        }
    }

    /// Start a reference move. `velocity_cts` of 0 keeps the controller's
    /// reference velocity.
    pub fn reference_vel_cts(&mut self, axis: &mut PiAxis, velocity_cts: f64, forwards: bool) -> GcsResult<()> {
        match self.family {
            ControllerFamily::GenericMotor | ControllerFamily::E755 | ControllerFamily::C702 => {
                self.motor_reference(axis, velocity_cts, forwards)
            }
            ControllerFamily::Hexapod1 | ControllerFamily::Hexapod2 => self.hexapod_reference(axis),
            ControllerFamily::Piezo | ControllerFamily::E517 => {
                debug!("Axis {} has no referencing, nothing to do", axis.name);
                Ok(())
            }
        }
    }

    /// Halt an axis. The controller must answer `ERR?` with the stop code.
    pub fn halt_axis(&mut self, axis: &mut PiAxis) -> GcsResult<()> {
        if self.family.is_hexapod() {
            self.interface.send_byte(CTRL_STOP)?;
        } else {
            self.interface.send_only(&format!("HLT {}", axis.name))?;
        }

        match self.fetch_error()? {
            PI_CNTR_STOP => Ok(()),
            code => {
                warn!("Stop on axis {} not confirmed, GCS error {}", axis.name, code);
                Err(GcsError::StopNotConfirmed {
                    axis: axis.name.clone(),
                    code,
                })
            }
        }
    }

    /// Redefine the current position (motor-record "load position").
    pub fn set_axis_position_cts(&mut self, axis: &mut PiAxis, position_cts: i64) -> GcsResult<()> {
        let position = axis.counts_per_unit.to_units(position_cts as f64);
        self.interface.send_only(&format!("POS {} {}", axis.name, position))?;
        self.check_error()?;
        axis.position = position;
        axis.position_cts = position_cts;
        Ok(())
    }

    /// Switch closed-loop operation. Enabling clears the axis' latched
    /// problem and comm-error flags.
    pub fn set_servo(&mut self, axis: &mut PiAxis, enabled: bool) -> GcsResult<()> {
        self.interface
            .send_only(&format!("SVO {} {}", axis.name, u8::from(enabled)))?;
        self.check_error()?;

        axis.servo_enabled = enabled;
        if enabled {
            axis.problem = false;
            axis.comm_error = false;
        }
        Ok(())
    }

    // ==================== Status ====================

    /// Decode the current status of one axis.
    pub fn get_status(&mut self, axis: &PiAxis) -> GcsResult<AxisStatusBits> {
        match self.family {
            ControllerFamily::GenericMotor => self.motor_status(axis),
            ControllerFamily::Piezo | ControllerFamily::E517 => {
                let moving = self.read_moving_mask()? & axis.moving_state_mask != 0;
                Ok(AxisStatusBits {
                    moving,
                    servo: self.query_servo(axis)?,
                    ..AxisStatusBits::default()
                })
            }
            ControllerFamily::E755 => self.busy_status(axis),
            ControllerFamily::C702 => {
                if self.reference_started.is_some_and(|t| t.elapsed() < REFERENCE_GRACE) {
                    return Ok(AxisStatusBits {
                        homing: true,
                        moving: true,
                        servo: axis.servo_enabled,
                        ..AxisStatusBits::default()
                    });
                }
                self.busy_status(axis)
            }
            ControllerFamily::Hexapod1 | ControllerFamily::Hexapod2 => Ok(self.hexapod_status(axis)),
        }
    }

    /// Refresh controller-wide moving state before the axes are polled.
    /// Only Hexapods have one.
    pub fn get_global_state(&mut self, axes: &mut [PiAxis]) -> GcsResult<()> {
        if !self.family.is_hexapod() {
            return Ok(());
        }
        let moving = self.read_platform_moving()?;
        for axis in axes {
            axis.moving = moving;
        }
        Ok(())
    }

    fn read_moving_mask(&mut self) -> GcsResult<u64> {
        let reply = self.interface.send_byte_and_receive(CTRL_MOVING)?;
        parse_hex_mask(&reply)
    }

    fn read_busy(&mut self) -> GcsResult<bool> {
        let reply = self.interface.send_byte_and_receive(CTRL_BUSY)?;
        Ok(reply.chars().next().map(u32::from) == Some(BUSY_REPLY))
    }

    fn query_servo(&mut self, axis: &PiAxis) -> GcsResult<bool> {
        let reply = self.interface.send_and_receive(&format!("SVO? {}", axis.name))?;
        GcsDevice::parse_bool(&reply)
    }

    // ==================== Queries ====================

    /// Position in controller units.
    pub fn get_axis_position(&mut self, axis: &PiAxis) -> GcsResult<f64> {
        if self.family == ControllerFamily::Hexapod1 && self.any_axis_moving {
            // a moving GCS 1 Hexapod answers queries unreliably
            return Ok(axis.counts_per_unit.to_units(axis.position_cts as f64));
        }
        let reply = self.interface.send_and_receive(&format!("POS? {}", axis.name))?;
        GcsDevice::parse_value(&reply)
    }

    /// Read the position and update both cached forms.
    pub fn get_axis_position_cts(&mut self, axis: &mut PiAxis) -> GcsResult<()> {
        let position = self.get_axis_position(axis)?;
        axis.position = position;
        axis.position_cts = axis.counts_per_unit.to_counts(position);
        Ok(())
    }

    pub fn get_axis_velocity(&mut self, axis: &mut PiAxis) -> GcsResult<()> {
        let command = match self.family {
            ControllerFamily::Hexapod2 => "VLS?".to_string(),
            _ => format!("VEL? {}", axis.name),
        };
        let reply = self.interface.send_and_receive(&command)?;
        axis.velocity = GcsDevice::parse_value(&reply)?;
        Ok(())
    }

    /// Travel range `(min, max)` in controller units.
    pub fn get_travel_limits(&mut self, axis: &PiAxis) -> GcsResult<(f64, f64)> {
        if self.family.is_hexapod() {
            return Ok(hexapod::TRAVEL_LIMITS);
        }
        let min = self.interface.send_and_receive(&format!("TMN? {}", axis.name))?;
        let max = self.interface.send_and_receive(&format!("TMX? {}", axis.name))?;
        Ok((GcsDevice::parse_value(&min)?, GcsDevice::parse_value(&max)?))
    }

    /// Detect limit switches, falling back to hard-stop detection (`HAR?`).
    ///
    /// Firmware without `HAR?` ignores the query and flags "unknown
    /// command"; that is read as "no limit switches", not as a failure.
    pub fn has_limit_switches(&mut self, axis: &mut PiAxis) -> GcsResult<bool> {
        let reply = self.interface.send_and_receive(&format!("LIM? {}", axis.name))?;
        let mut present = GcsDevice::parse_bool(&reply)?;

        if !present {
            match self.interface.send_and_receive(&format!("HAR? {}", axis.name)) {
                Ok(reply) => present = GcsDevice::parse_bool(&reply)?,
                Err(GcsError::Timeout) => {
                    let code = self.fetch_error()?;
                    if code != PI_CNTR_UNKNOWN_COMMAND {
                        return Err(GcsError::Timeout);
                    }
                    debug!("HAR? not supported on axis {}", axis.name);
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            "Axis {} has {}limit switches",
            axis.name,
            if present { "" } else { "no " }
        );
        axis.has_limit_switches = present;
        Ok(present)
    }

    pub fn has_reference_sensor(&mut self, axis: &mut PiAxis) -> GcsResult<bool> {
        let present = match self.family {
            ControllerFamily::C702 => self.get_param(axis, SpaParam::HasReference)? > 0.1,
            _ => {
                let reply = self.interface.send_and_receive(&format!("TRS? {}", axis.name))?;
                GcsDevice::parse_bool(&reply)?
            }
        };
        debug!(
            "Axis {} has {}reference sensor",
            axis.name,
            if present { "" } else { "no " }
        );
        axis.has_reference = present;
        Ok(present)
    }

    /// Update the axis' homed flag.
    pub fn get_referenced_state(&mut self, axis: &mut PiAxis) -> GcsResult<()> {
        axis.homed = match self.family {
            ControllerFamily::Piezo | ControllerFamily::E517 => true,
            ControllerFamily::C702 => self.get_param(axis, SpaParam::C702Referenced)? > 0.1,
            ControllerFamily::Hexapod1 | ControllerFamily::Hexapod2 => self.hexapod_referenced()?,
            _ => {
                let reply = self.interface.send_and_receive(&format!("FRF? {}", axis.name))?;
                GcsDevice::parse_bool(&reply)?
            }
        };
        Ok(())
    }

    /// Load the counts-per-unit ratio into the axis and return the size of
    /// one count in controller units.
    pub fn get_resolution(&mut self, axis: &mut PiAxis) -> GcsResult<f64> {
        axis.counts_per_unit = match self.family {
            ControllerFamily::GenericMotor | ControllerFamily::C702 => {
                let numerator = self.get_param(axis, SpaParam::CountsPerUnitNumerator)?;
                let denominator = self.get_param(axis, SpaParam::CountsPerUnitDenominator)?;
                CountsPerUnit::new(numerator as i64, denominator as i64)
            }
            _ => CountsPerUnit::FIXED,
        };
        Ok(axis.counts_per_unit.resolution())
    }

    fn get_param(&mut self, axis: &PiAxis, param: SpaParam) -> GcsResult<f64> {
        let reply = self
            .interface
            .send_and_receive(&format!("SPA? {} {}", axis.name, param.address()))?;
        GcsDevice::parse_value(&reply)
    }

    fn set_param(&mut self, axis: &PiAxis, param: SpaParam, value: f64) -> GcsResult<()> {
        self.interface
            .send_only(&format!("SPA {} {} {}", axis.name, param.address(), value))
    }

    // ==================== Capabilities ====================

    /// False while a GCS 1 Hexapod executes a move.
    pub fn accepts_new_target(&self) -> bool {
        !(self.family == ControllerFamily::Hexapod1 && self.any_axis_moving)
    }

    pub fn can_communicate_while_homing(&self) -> bool {
        self.family != ControllerFamily::Hexapod1
    }

    pub fn is_gcs2(&self) -> bool {
        self.family.is_gcs2()
    }
}

/// `CSV?` answer as a number. Firmware that predates `CSV?` ignores it and
/// is treated as GCS 1.
fn query_gcs_version(interface: &PiInterface) -> GcsResult<f64> {
    match interface.send_and_receive("CSV?") {
        Ok(reply) => GcsDevice::parse_value(&reply),
        Err(GcsError::Timeout) => {
            // clear the "unknown command" error
            interface.send_and_receive("ERR?")?;
            Ok(1.0)
        }
        Err(e) => Err(e),
    }
}

/// Parse a hex bitmask reply such as `0x3` or `3`.
fn parse_hex_mask(reply: &str) -> GcsResult<u64> {
    let text = reply.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .map_err(|_| GcsError::ParseError(format!("Invalid hex mask: {text:?}")))
}

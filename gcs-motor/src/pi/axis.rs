//! One controlled degree of freedom.
//!
//! A [`PiAxis`] caches everything the driver knows about an axis and turns
//! record-layer requests into [`GcsController`] calls. The axis never owns the
//! controller: every operation borrows it, so the coordinator can hold both
//! side by side.
//!
//! State transitions happen only in [`PiAxis::poll`]. `move_to`, `home` and
//! `stop` dispatch commands and mark the axis busy so a poll that races with
//! them does not report completion early.

use serde::{Deserialize, Serialize};
use tracing::{info_span, warn};

use super::controller::GcsController;
use super::gcs::{GcsError, GcsResult};
use super::status::{AxisReport, AxisStatusBits, MotorStatus};

/// Position/velocity scale between driver counts and controller units.
///
/// `counts = units * numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsPerUnit {
    pub numerator: i64,
    pub denominator: i64,
}

impl CountsPerUnit {
    /// Used until the controller reports the real ratio.
    pub const INITIAL: Self = Self::new(1000, 1);
    /// Used by families that do not expose a ratio.
    pub const FIXED: Self = Self::new(10000, 1);

    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// A zero numerator or denominator disables scaling.
    pub fn is_degenerate(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }

    pub fn to_units(&self, counts: f64) -> f64 {
        if self.is_degenerate() {
            return counts;
        }
        counts * self.denominator as f64 / self.numerator as f64
    }

    /// Nearest whole count for a position in units.
    pub fn to_counts(&self, units: f64) -> i64 {
        if self.is_degenerate() {
            return units.round() as i64;
        }
        (units * self.numerator as f64 / self.denominator as f64).round() as i64
    }

    /// Size of one count in units.
    pub fn resolution(&self) -> f64 {
        self.to_units(1.0)
    }
}

impl Default for CountsPerUnit {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Lifecycle of an axis as seen by the record layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
pub enum AxisState {
    #[default]
    Idle,
    Moving,
    Homing,
    /// Idle, but the servo dropped out (or an operation failed) since the
    /// servo was last enabled.
    IdleWithProblem,
}

impl AxisState {
    fn derive(homing: bool, done: bool, problem: bool) -> Self {
        if homing {
            AxisState::Homing
        } else if !done {
            AxisState::Moving
        } else if problem {
            AxisState::IdleWithProblem
        } else {
            AxisState::Idle
        }
    }
}

/// Target buffered while the controller is deferring moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeferredMove {
    /// Absolute target in counts
    pub target: i64,
    /// The request was relative (already resolved into `target`)
    pub relative: bool,
}

/// Velocity and acceleration accompanying a move request, in counts.
/// Zero means "leave the controller's current value".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionProfile {
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub acceleration: f64,
}

impl MotionProfile {
    pub fn new(max_velocity: f64, acceleration: f64) -> Self {
        Self {
            min_velocity: 0.0,
            max_velocity,
            acceleration,
        }
    }
}

/// Cached state and operations of one axis.
#[derive(Debug, Clone)]
pub struct PiAxis {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) position: f64,
    pub(crate) position_cts: i64,
    pub(crate) counts_per_unit: CountsPerUnit,
    pub(crate) velocity: f64,
    pub(crate) acceleration: f64,
    /// Lower of the max acceleration/deceleration, fetched on first use
    pub(crate) max_acceleration: Option<f64>,
    pub(crate) homed: bool,
    pub(crate) is_homing: bool,
    pub(crate) servo_enabled: bool,
    pub(crate) has_limit_switches: bool,
    pub(crate) has_reference: bool,
    pub(crate) moving: bool,
    pub(crate) last_direction_positive: bool,
    pub(crate) moving_state_mask: u64,
    pub(crate) neg_limit: f64,
    pub(crate) pos_limit: f64,
    pub(crate) problem: bool,
    pub(crate) comm_error: bool,
    pub(crate) deferred: Option<DeferredMove>,
    /// Velocity/acceleration last requested by the record layer (counts)
    pub(crate) profile: MotionProfile,
}

impl PiAxis {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            position: 0.0,
            position_cts: 0,
            counts_per_unit: CountsPerUnit::INITIAL,
            velocity: 0.0,
            acceleration: 0.0,
            max_acceleration: None,
            homed: false,
            is_homing: false,
            servo_enabled: false,
            has_limit_switches: false,
            has_reference: false,
            moving: false,
            last_direction_positive: false,
            moving_state_mask: 1 << index.min(63),
            neg_limit: 0.0,
            pos_limit: 0.0,
            problem: false,
            comm_error: false,
            deferred: None,
            profile: MotionProfile::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Controller axis identifier, e.g. `1` or `X`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last known position in controller units.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Last known position in counts.
    pub fn position_cts(&self) -> i64 {
        self.position_cts
    }

    pub fn counts_per_unit(&self) -> CountsPerUnit {
        self.counts_per_unit
    }

    /// Cached velocity in controller units.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Cached acceleration in controller units.
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn travel_limits(&self) -> (f64, f64) {
        (self.neg_limit, self.pos_limit)
    }

    pub fn is_homed(&self) -> bool {
        self.homed
    }

    pub fn is_homing(&self) -> bool {
        self.is_homing
    }

    pub fn servo_enabled(&self) -> bool {
        self.servo_enabled
    }

    pub fn has_limit_switches(&self) -> bool {
        self.has_limit_switches
    }

    pub fn has_reference(&self) -> bool {
        self.has_reference
    }

    pub fn has_problem(&self) -> bool {
        self.problem
    }

    pub fn has_comm_error(&self) -> bool {
        self.comm_error
    }

    pub fn deferred_move(&self) -> Option<DeferredMove> {
        self.deferred
    }

    fn span(&self) -> tracing::Span {
        info_span!("axis", name = %self.name)
    }

    /// Record a failed operation. The flags stay set until the servo is
    /// re-enabled successfully.
    fn latch<T>(&mut self, result: GcsResult<T>) -> GcsResult<T> {
        if let Err(e) = &result {
            warn!("axis {} operation failed: {}", self.name, e);
            self.problem = true;
            if e.is_communication() {
                self.comm_error = true;
            }
        }
        result
    }

    /// Read the axis configuration from the controller.
    pub fn init(&mut self, gcs: &mut GcsController) -> GcsResult<()> {
        let _span = self.span().entered();
        gcs.init_axis(self)?;
        gcs.get_resolution(self)?;
        gcs.get_axis_velocity(self)?;
        gcs.get_axis_position_cts(self)?;
        let (neg, pos) = gcs.get_travel_limits(self)?;
        self.neg_limit = neg;
        self.pos_limit = pos;
        gcs.get_referenced_state(self)?;
        Ok(())
    }

    /// Move to `position` counts (or by `position` counts when `relative`).
    ///
    /// With `defer` set the target is only buffered; the coordinator sends all
    /// buffered targets in one command when deferral ends.
    pub fn move_to(
        &mut self,
        gcs: &mut GcsController,
        position: f64,
        relative: bool,
        profile: MotionProfile,
        defer: bool,
    ) -> GcsResult<()> {
        let _span = self.span().entered();
        let result = self.try_move(gcs, position, relative, profile, defer);
        self.latch(result)
    }

    fn try_move(
        &mut self,
        gcs: &mut GcsController,
        position: f64,
        relative: bool,
        profile: MotionProfile,
        defer: bool,
    ) -> GcsResult<()> {
        if !gcs.accepts_new_target() {
            return Err(GcsError::ControllerBusy(self.name.clone()));
        }

        let mut target = position.round() as i64;
        if relative {
            target += self.position_cts;
        }

        if defer {
            self.deferred = Some(DeferredMove { target, relative });
            return Ok(());
        }

        if profile.max_velocity != 0.0 {
            gcs.set_velocity_cts(self, profile.max_velocity)?;
        }
        if profile.acceleration != 0.0 {
            gcs.set_acceleration_cts(self, profile.acceleration)?;
        }
        self.moving = true;
        gcs.move_cts(self, target)
    }

    /// Jog towards the travel limit in the direction of `max_velocity`.
    pub fn move_velocity(&mut self, gcs: &mut GcsController, profile: MotionProfile) -> GcsResult<()> {
        let _span = self.span().entered();
        let result = self.try_move_velocity(gcs, profile);
        self.latch(result)
    }

    fn try_move_velocity(&mut self, gcs: &mut GcsController, profile: MotionProfile) -> GcsResult<()> {
        if !gcs.accepts_new_target() {
            return Err(GcsError::ControllerBusy(self.name.clone()));
        }
        if profile.max_velocity != 0.0 {
            gcs.set_velocity_cts(self, profile.max_velocity)?;
        }
        let target = if profile.max_velocity > 0.0 {
            self.pos_limit
        } else {
            self.neg_limit
        };
        self.moving = true;
        gcs.move_axis(self, target)
    }

    /// Start a reference move.
    pub fn home(&mut self, gcs: &mut GcsController, max_velocity: f64, forwards: bool) -> GcsResult<()> {
        let _span = self.span().entered();
        self.is_homing = true;
        let result = gcs.reference_vel_cts(self, max_velocity, forwards);
        if result.is_err() {
            self.is_homing = false;
        }
        self.latch(result)
    }

    /// Halt the axis. Succeeds only when the controller confirms the stop.
    pub fn stop(&mut self, gcs: &mut GcsController) -> GcsResult<()> {
        let _span = self.span().entered();
        self.deferred = None;
        let result = gcs.halt_axis(self);
        self.latch(result)
    }

    /// Redefine the current position as `position` counts.
    pub fn set_position(&mut self, gcs: &mut GcsController, position: f64) -> GcsResult<()> {
        let _span = self.span().entered();
        let result = gcs.set_axis_position_cts(self, position.round() as i64);
        self.latch(result)
    }

    /// Replace one travel limit, given in counts. Jogs run to these limits.
    pub fn set_soft_limit(&mut self, high: bool, limit: f64) {
        let limit = self.counts_per_unit.to_units(limit);
        if high {
            self.pos_limit = limit;
        } else {
            self.neg_limit = limit;
        }
    }

    pub fn set_closed_loop(&mut self, gcs: &mut GcsController, enabled: bool) -> GcsResult<()> {
        let _span = self.span().entered();
        let result = gcs.set_servo(self, enabled);
        self.latch(result)
    }

    /// Refresh the axis from the controller and report it.
    ///
    /// Never fails: when the controller cannot be read the cached values are
    /// reported with the comm-error bit set.
    pub fn poll(&mut self, gcs: &mut GcsController) -> AxisReport {
        let _span = self.span().entered();
        let old_homing = self.is_homing;

        let status = match gcs.get_status(self) {
            Ok(status) => status,
            Err(e) => {
                warn!("axis {} status read failed: {}", self.name, e);
                self.comm_error = true;
                let done = !self.moving && !self.is_homing;
                return self.report(done, AxisStatusBits::default());
            }
        };

        self.is_homing = status.homing;
        let done = !status.moving && !status.homing;
        self.moving = !done;

        if !self.is_homing || gcs.can_communicate_while_homing() {
            if old_homing && !self.is_homing {
                if let Err(e) = gcs.get_referenced_state(self) {
                    self.note_poll_error(&e);
                }
                tracing::info!("axis {} referencing finished, homed = {}", self.name, self.homed);
            }
            if self.servo_enabled && !status.servo {
                warn!("axis {} servo switched off without request", self.name);
                self.problem = true;
            }
            if !self.is_homing || gcs.is_gcs2() {
                self.servo_enabled = status.servo;
                if let Err(e) = gcs.get_axis_position_cts(self) {
                    self.note_poll_error(&e);
                }
            }
        }

        self.report(done, status)
    }

    fn note_poll_error(&mut self, e: &GcsError) {
        warn!("axis {} poll query failed: {}", self.name, e);
        if e.is_communication() {
            self.comm_error = true;
        }
    }

    /// Status word from the cached state.
    pub fn report(&self, done: bool, bits: AxisStatusBits) -> AxisReport {
        // every GCS axis reports a sensor position
        let mut status = MotorStatus::GAIN_SUPPORT | MotorStatus::ENCODER_PRESENT;
        status.set(MotorStatus::DIRECTION, self.last_direction_positive);
        status.set(MotorStatus::DONE, done);
        status.set(MotorStatus::MOVING, !done);
        status.set(MotorStatus::PLUS_LS, bits.pos_limit);
        status.set(MotorStatus::MINUS_LS, bits.neg_limit);
        status.set(MotorStatus::HOME_LS, bits.home_switch);
        status.set(MotorStatus::HOMED, self.homed);
        status.set(MotorStatus::PROBLEM, self.problem);
        status.set(MotorStatus::COMM_ERROR, self.comm_error);
        status.set(MotorStatus::POWER_ON, self.servo_enabled);

        AxisReport {
            index: self.index,
            name: self.name.clone(),
            position: self.position_cts,
            encoder_position: self.position_cts,
            real_position: self.position,
            status,
            state: AxisState::derive(self.is_homing, done, self.problem),
            servo: self.servo_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pi::testing::{motor_port, piezo_port, ScriptedPort};
    use approx::assert_relative_eq;

    fn motor() -> (ScriptedPort, GcsController, Vec<PiAxis>) {
        let port = motor_port();
        let mut gcs = GcsController::create(port.interface(), "PI C-863.11").unwrap();
        gcs.init().unwrap();
        let mut axes: Vec<PiAxis> = gcs
            .axis_names()
            .iter()
            .enumerate()
            .map(|(i, name)| PiAxis::new(i, name.clone()))
            .collect();
        for axis in &mut axes {
            axis.init(&mut gcs).unwrap();
        }
        port.clear_sent();
        (port, gcs, axes)
    }

    #[test]
    fn test_counts_per_unit_conversion() {
        let cpu = CountsPerUnit::new(10000, 1);
        assert_eq!(cpu.to_counts(1.5), 15000);
        assert_eq!(cpu.to_counts(-1.5), -15000);
        assert_relative_eq!(cpu.to_units(2500.0), 0.25);
        assert_relative_eq!(cpu.resolution(), 0.0001);
    }

    #[test]
    fn test_degenerate_ratio_is_identity() {
        let cpu = CountsPerUnit::new(0, 1);
        assert_eq!(cpu.to_counts(12.4), 12);
        assert_relative_eq!(cpu.to_units(7.0), 7.0);
    }

    #[test]
    fn test_negative_positions_round_symmetrically() {
        let cpu = CountsPerUnit::new(3, 1);
        let units = cpu.to_units(-7.0);
        assert_eq!(cpu.to_counts(units), -7);
    }

    #[test]
    fn test_init_reads_configuration() {
        let (_port, _gcs, axes) = motor();
        let axis = &axes[1];
        assert_eq!(axis.name(), "2");
        assert_eq!(axis.counts_per_unit(), CountsPerUnit::new(10000, 1));
        assert_relative_eq!(axis.velocity(), 1.5);
        assert_eq!(axis.travel_limits(), (-10.0, 10.0));
        assert!(axis.is_homed());
        assert!(axis.servo_enabled());
        assert!(axis.has_reference());
        assert!(axis.has_limit_switches());
        assert_eq!(axis.moving_state_mask, 0b10);
    }

    #[test]
    fn test_relative_move_adds_cached_counts() {
        let (port, mut gcs, mut axes) = motor();
        axes[0].position_cts = 5000;
        axes[0]
            .move_to(&mut gcs, 2500.0, true, MotionProfile::default(), false)
            .unwrap();
        assert_eq!(port.sent_matching("MOV"), vec!["MOV 1 0.75"]);
    }

    #[test]
    fn test_deferred_move_sends_nothing() {
        let (port, mut gcs, mut axes) = motor();
        axes[0]
            .move_to(&mut gcs, 100.0, false, MotionProfile::new(50.0, 0.0), true)
            .unwrap();
        assert!(port.sent().is_empty());
        assert_eq!(
            axes[0].deferred_move(),
            Some(DeferredMove {
                target: 100,
                relative: false
            })
        );
    }

    #[test]
    fn test_failed_move_latches_problem_until_servo_enabled() {
        let (port, mut gcs, mut axes) = motor();
        port.push_error(5);
        let err = axes[0]
            .move_to(&mut gcs, 20000.0, false, MotionProfile::default(), false)
            .unwrap_err();
        assert!(matches!(err, GcsError::MotionRejected { code: 5, .. }));
        assert!(axes[0].has_problem());
        assert!(!axes[0].has_comm_error());

        // a clean poll does not clear the latch
        let report = axes[0].poll(&mut gcs);
        assert!(report.status.contains(MotorStatus::PROBLEM));
        assert_eq!(report.state, AxisState::IdleWithProblem);

        axes[0].set_closed_loop(&mut gcs, true).unwrap();
        assert!(!axes[0].has_problem());
        let report = axes[0].poll(&mut gcs);
        assert_eq!(report.state, AxisState::Idle);
    }

    #[test]
    fn test_stop_clears_deferred_move() {
        let (port, mut gcs, mut axes) = motor();
        axes[1]
            .move_to(&mut gcs, 100.0, false, MotionProfile::default(), true)
            .unwrap();
        port.push_error(10);
        axes[1].stop(&mut gcs).unwrap();
        assert_eq!(axes[1].deferred_move(), None);
        assert_eq!(port.sent_matching("HLT"), vec!["HLT 2"]);
    }

    #[test]
    fn test_stop_without_confirmation_fails() {
        let (port, mut gcs, mut axes) = motor();
        port.push_error(0);
        let err = axes[0].stop(&mut gcs).unwrap_err();
        assert!(matches!(err, GcsError::StopNotConfirmed { code: 0, .. }));
    }

    #[test]
    fn test_jog_targets_travel_limit() {
        let (port, mut gcs, mut axes) = motor();
        axes[0]
            .move_velocity(&mut gcs, MotionProfile::new(-20000.0, 0.0))
            .unwrap();
        assert_eq!(port.sent_matching("VEL"), vec!["VEL 1 2"]);
        assert_eq!(port.sent_matching("MOV"), vec!["MOV 1 -10"]);
    }

    #[test]
    fn test_poll_reports_position_and_done() {
        let (port, mut gcs, mut axes) = motor();
        port.reply("POS? 1", "1=0.25");
        let report = axes[0].poll(&mut gcs);
        assert_eq!(report.position, 2500);
        assert_relative_eq!(report.real_position, 0.25);
        assert!(report.done());
        assert!(report.status.contains(MotorStatus::POWER_ON | MotorStatus::HOMED));
        assert_eq!(report.state, AxisState::Idle);
    }

    #[test]
    fn test_poll_reports_reference_switch() {
        let (port, mut gcs, mut axes) = motor();
        // axis 2 servo on and sitting on its reference switch
        port.reply("#4", "0x90009002");
        let first = axes[0].poll(&mut gcs);
        let second = axes[1].poll(&mut gcs);
        assert!(!first.status.contains(MotorStatus::HOME_LS));
        assert!(second.status.contains(MotorStatus::HOME_LS));
        assert!(!second.status.intersects(MotorStatus::PLUS_LS | MotorStatus::MINUS_LS));
        assert!(second.status.contains(MotorStatus::ENCODER_PRESENT | MotorStatus::GAIN_SUPPORT));
    }

    #[test]
    fn test_poll_latches_servo_loss() {
        let (port, mut gcs, mut axes) = motor();
        // axis 1 moving with servo off
        port.reply("#4", "0x20009000");
        let report = axes[0].poll(&mut gcs);
        assert!(report.moving());
        assert!(axes[0].has_problem());
        assert!(!axes[0].servo_enabled());
        assert!(report.status.contains(MotorStatus::PROBLEM));
    }

    #[test]
    fn test_poll_status_failure_reports_stale_values() {
        let port = piezo_port();
        let mut gcs = GcsController::create(port.interface(), "PI E-727").unwrap();
        gcs.init().unwrap();
        let mut axis = PiAxis::new(0, "1");
        axis.init(&mut gcs).unwrap();
        axis.position_cts = 42;

        // same axis, controller no longer answering
        let silent = ScriptedPort::new();
        let mut gcs = GcsController::create(silent.interface(), "PI E-727").unwrap();
        let report = axis.poll(&mut gcs);
        assert_eq!(report.position, 42);
        assert!(report.status.contains(MotorStatus::COMM_ERROR));
        assert!(axis.has_comm_error());
        assert_eq!(silent.sent(), vec!["#5"]);
    }

    #[test]
    fn test_home_without_capability_is_rejected_before_wire() {
        let (port, mut gcs, mut axes) = motor();
        axes[0].has_reference = false;
        axes[0].has_limit_switches = false;
        let err = axes[0].home(&mut gcs, 0.0, true).unwrap_err();
        assert!(matches!(err, GcsError::NoReferenceCapability(_)));
        assert!(!axes[0].is_homing());
        assert!(port.sent().is_empty());
    }
}

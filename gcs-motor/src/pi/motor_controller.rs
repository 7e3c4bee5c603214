//! Multi-axis coordinator.
//!
//! [`PiMotorController`] owns one [`GcsController`] and the axes found on it,
//! and exposes the operations of a motor-record driver by axis index.
//! Multi-axis behavior lives here: deferred moves are collected from all axes
//! and started with a single command, and a poll refreshes controller-wide
//! state before the axes are read.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::axis::{MotionProfile, PiAxis};
use super::controller::{GcsController, PivotCoordinate, PivotPoint, DEFAULT_SETTLE_DELAY};
use super::gcs::{GcsError, GcsResult};
use super::interface::PiInterface;
use super::status::{AxisReport, DriverParam, MotorCommand, PollReport};

/// Construction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerOptions {
    /// Number of axes to drive; all axes found when `None`
    pub num_axes: Option<usize>,
    /// Hexapod pause between `MOV` and the first moving-state read
    pub settle_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            num_axes: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// A connected controller with its initialized axes.
pub struct PiMotorController {
    gcs: GcsController,
    axes: Vec<PiAxis>,
    defer_moves: bool,
}

impl PiMotorController {
    /// Identify the controller, discover and initialize its axes.
    pub fn connect(interface: PiInterface, options: ControllerOptions) -> GcsResult<Self> {
        let mut gcs = GcsController::connect(interface)?.with_settle_delay(options.settle_delay);
        gcs.init()?;

        let found = gcs.axis_names().len();
        let count = match options.num_axes {
            Some(requested) if requested > found => {
                return Err(GcsError::AxisCount { requested, found });
            }
            Some(requested) => requested,
            None => found,
        };

        let mut axes: Vec<PiAxis> = gcs.axis_names()[..count]
            .iter()
            .enumerate()
            .map(|(index, name)| PiAxis::new(index, name.clone()))
            .collect();
        for axis in &mut axes {
            axis.init(&mut gcs)?;
        }

        info!(
            "{} ready with {} axes ({})",
            gcs.identification(),
            axes.len(),
            gcs.family()
        );
        Ok(Self {
            gcs,
            axes,
            defer_moves: false,
        })
    }

    pub fn controller(&self) -> &GcsController {
        &self.gcs
    }

    pub fn axis(&self, index: usize) -> GcsResult<&PiAxis> {
        self.axes.get(index).ok_or(GcsError::UnknownAxis(index))
    }

    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[PiAxis] {
        &self.axes
    }

    /// The controller and one axis, borrowed together.
    fn split(&mut self, index: usize) -> GcsResult<(&mut GcsController, &mut PiAxis)> {
        let axis = self.axes.get_mut(index).ok_or(GcsError::UnknownAxis(index))?;
        Ok((&mut self.gcs, axis))
    }

    /// Move to (or by) `position` counts. While moves are deferred the target
    /// is only buffered.
    pub fn move_axis(
        &mut self,
        index: usize,
        position: f64,
        relative: bool,
        profile: MotionProfile,
    ) -> GcsResult<()> {
        let defer = self.defer_moves;
        let (gcs, axis) = self.split(index)?;
        axis.move_to(gcs, position, relative, profile, defer)
    }

    pub fn move_velocity(&mut self, index: usize, profile: MotionProfile) -> GcsResult<()> {
        let (gcs, axis) = self.split(index)?;
        axis.move_velocity(gcs, profile)
    }

    pub fn home(&mut self, index: usize, max_velocity: f64, forwards: bool) -> GcsResult<()> {
        let (gcs, axis) = self.split(index)?;
        axis.home(gcs, max_velocity, forwards)
    }

    pub fn stop(&mut self, index: usize) -> GcsResult<()> {
        let (gcs, axis) = self.split(index)?;
        axis.stop(gcs)
    }

    pub fn set_position(&mut self, index: usize, position: f64) -> GcsResult<()> {
        let (gcs, axis) = self.split(index)?;
        axis.set_position(gcs, position)
    }

    pub fn set_closed_loop(&mut self, index: usize, enabled: bool) -> GcsResult<()> {
        let (gcs, axis) = self.split(index)?;
        axis.set_closed_loop(gcs, enabled)
    }

    pub fn set_soft_limit(&mut self, index: usize, high: bool, limit: f64) -> GcsResult<()> {
        let (_, axis) = self.split(index)?;
        axis.set_soft_limit(high, limit);
        Ok(())
    }

    pub fn defer_moves(&self) -> bool {
        self.defer_moves
    }

    /// Turning deferral off starts everything buffered so far.
    pub fn set_defer_moves(&mut self, defer: bool) -> GcsResult<()> {
        debug!("{} deferred moves", if defer { "Setting" } else { "Clearing" });
        let flush = self.defer_moves && !defer;
        self.defer_moves = defer;
        if flush {
            self.process_deferred_moves()?;
        }
        Ok(())
    }

    /// Start all buffered moves with one `MOV`. The buffers are emptied
    /// whether or not the controller accepts the command.
    pub fn process_deferred_moves(&mut self) -> GcsResult<()> {
        let mut moves: Vec<(&mut PiAxis, i64)> = self
            .axes
            .iter_mut()
            .filter_map(|axis| {
                let deferred = axis.deferred.take()?;
                axis.moving = true;
                Some((axis, deferred.target))
            })
            .collect();
        if moves.is_empty() {
            return Ok(());
        }

        info!("Starting {} deferred moves", moves.len());
        let result = self.gcs.move_cts_multi(&mut moves);
        if let Err(e) = &result {
            warn!("Deferred moves failed: {}", e);
            for (axis, _) in moves.iter_mut() {
                axis.problem = true;
                axis.moving = false;
            }
        }
        result
    }

    pub fn set_pivot(&mut self, coordinate: PivotCoordinate, value: f64) -> GcsResult<()> {
        self.gcs.set_pivot(coordinate, value)
    }

    pub fn pivot(&self) -> PivotPoint {
        self.gcs.pivot()
    }

    /// Refresh controller-wide state, then every axis.
    pub fn poll(&mut self) -> PollReport {
        if let Err(e) = self.gcs.get_global_state(&mut self.axes) {
            warn!("Global state read failed: {}", e);
            if e.is_communication() {
                for axis in &mut self.axes {
                    axis.comm_error = true;
                }
            }
        }

        let gcs = &mut self.gcs;
        let axes: Vec<AxisReport> = self.axes.iter_mut().map(|axis| axis.poll(gcs)).collect();
        let any_moving = axes.iter().any(|report| !report.done());

        PollReport {
            axes,
            pivot: self.gcs.pivot(),
            last_error: self.gcs.last_error(),
            any_moving,
        }
    }

    /// Run one record-layer command on an axis. `GetInfo` returns the
    /// refreshed axis report, every other command returns `None`.
    pub fn execute(&mut self, index: usize, command: MotorCommand) -> GcsResult<Option<AxisReport>> {
        debug!("Axis {} command {}", index, command);
        let profile = self.axis(index)?.profile;

        match command {
            MotorCommand::MoveAbs { position } => self.move_axis(index, position, false, profile)?,
            MotorCommand::MoveRel { distance } => self.move_axis(index, distance, true, profile)?,
            MotorCommand::HomeForward => self.home(index, profile.max_velocity, true)?,
            MotorCommand::HomeReverse => self.home(index, profile.max_velocity, false)?,
            MotorCommand::LoadPosition { position } => self.set_position(index, position)?,
            MotorCommand::SetVelocity { velocity } => {
                self.split(index)?.1.profile.max_velocity = velocity;
            }
            MotorCommand::SetAcceleration { acceleration } => {
                self.split(index)?.1.profile.acceleration = acceleration;
            }
            MotorCommand::Go => {}
            MotorCommand::Stop => self.stop(index)?,
            MotorCommand::GetInfo => {
                let (gcs, axis) = self.split(index)?;
                return Ok(Some(axis.poll(gcs)));
            }
            MotorCommand::EnableTorque => self.set_closed_loop(index, true)?,
            MotorCommand::DisableTorque => self.set_closed_loop(index, false)?,
            MotorCommand::Jog { velocity } => {
                let jog = MotionProfile {
                    max_velocity: velocity,
                    ..profile
                };
                self.move_velocity(index, jog)?;
            }
            MotorCommand::SetHighLimit { limit } => self.set_soft_limit(index, true, limit)?,
            MotorCommand::SetLowLimit { limit } => self.set_soft_limit(index, false, limit)?,
        }
        Ok(None)
    }

    /// Write a driver-level parameter.
    pub fn write_param(&mut self, index: usize, param: DriverParam, value: f64) -> GcsResult<()> {
        match param {
            DriverParam::ClosedLoop => self.set_closed_loop(index, value != 0.0),
            DriverParam::DeferMoves => self.set_defer_moves(value != 0.0),
            DriverParam::PivotX => self.set_pivot(PivotCoordinate::X, value),
            DriverParam::PivotY => self.set_pivot(PivotCoordinate::Y, value),
            DriverParam::PivotZ => self.set_pivot(PivotCoordinate::Z, value),
        }
    }
}

//! Hexapod families.
//!
//! A Hexapod moves as one platform: referencing, stopping and the moving
//! state apply to all six axes at once. The per-axis status is therefore
//! served from the platform state refreshed by
//! [`get_global_state`](GcsController::get_global_state), and only the pivot
//! point is specific to these controllers.

use tracing::{debug, info};

use super::{ControllerFamily, GcsController, PivotCoordinate, PivotPoint, CTRL_STATUS};
use crate::pi::axis::PiAxis;
use crate::pi::gcs::{GcsDevice, GcsError, GcsResult};
use crate::pi::status::AxisStatusBits;

/// Axis names of every Hexapod, in order.
pub const HEXAPOD_AXES: [&str; 6] = ["X", "Y", "Z", "U", "V", "W"];

/// Hexapods report no soft limits; this range is used instead.
pub(super) const TRAVEL_LIMITS: (f64, f64) = (-100.0, 100.0);

/// Set in the decimal `#4` answer once the platform is referenced.
const REFERENCED_BIT: u32 = 0x10000;

impl GcsController {
    pub(super) fn hexapod_init(&mut self) -> GcsResult<()> {
        self.platform.homing = false;
        self.platform.status_byte_supported = match self.interface.send_byte_and_receive(CTRL_STATUS) {
            Ok(_) => true,
            Err(GcsError::Timeout) => {
                // firmware without #4 flags "unknown command"
                let cleared = self.interface.send_and_receive("ERR?")?;
                debug!("Status byte not supported (ERR? {})", cleared.trim());
                false
            }
            Err(e) => return Err(e),
        };

        self.platform.pivot = self.read_pivot()?;
        info!(
            "Hexapod pivot at ({}, {}, {})",
            self.platform.pivot.x, self.platform.pivot.y, self.platform.pivot.z
        );
        Ok(())
    }

    fn read_pivot(&mut self) -> GcsResult<PivotPoint> {
        let command = match self.family {
            ControllerFamily::Hexapod1 => "SPI? RST",
            _ => "SPI? R S T",
        };
        let reply = self.interface.send_and_receive(command)?;
        let values = GcsDevice::parse_axis_values(&reply)?;
        let coordinate = |key: PivotCoordinate| {
            values
                .get(&key.to_string())
                .copied()
                .ok_or_else(|| GcsError::InvalidResponse(format!("No pivot {key} in {reply:?}")))
        };
        Ok(PivotPoint {
            x: coordinate(PivotCoordinate::X)?,
            y: coordinate(PivotCoordinate::Y)?,
            z: coordinate(PivotCoordinate::Z)?,
        })
    }

    /// Move one axis, then give the platform time to start before asking
    /// whether it did.
    pub(super) fn hexapod_move(&mut self, axis: &mut PiAxis, target_cts: i64, target: f64) -> GcsResult<()> {
        self.interface.send_only(&format!("MOV {} {}", axis.name, target))?;
        axis.last_direction_positive = target_cts > axis.position_cts;

        std::thread::sleep(self.settle_delay);
        axis.moving = self.read_platform_moving()?;
        if !axis.moving {
            self.check_motion(&axis.name)?;
        }
        self.any_axis_moving = true;
        Ok(())
    }

    /// Read byte 5 and update the platform state. Referencing ends when the
    /// platform comes to rest.
    pub(super) fn read_platform_moving(&mut self) -> GcsResult<bool> {
        let moving = self.read_moving_mask()? != 0;
        self.any_axis_moving = moving;
        if self.platform.homing && !moving {
            info!("Hexapod referencing finished");
            self.platform.homing = false;
        }
        Ok(moving)
    }

    pub(super) fn hexapod_reference(&mut self, axis: &mut PiAxis) -> GcsResult<()> {
        let command = match self.family {
            ControllerFamily::Hexapod1 => "INI X",
            _ => {
                self.set_servo(axis, true)?;
                "FRF X"
            }
        };
        self.interface.send_only(command)?;
        self.check_error()?;
        self.platform.homing = true;
        info!("Hexapod referencing started ({})", command);
        Ok(())
    }

    /// Status from cached state only. A buffered deferred move counts as
    /// moving so the record layer waits for it.
    pub(super) fn hexapod_status(&self, axis: &PiAxis) -> AxisStatusBits {
        AxisStatusBits {
            homing: self.platform.homing,
            moving: axis.moving || axis.deferred.is_some(),
            servo: axis.servo_enabled,
            ..AxisStatusBits::default()
        }
    }

    pub(super) fn hexapod_referenced(&mut self) -> GcsResult<bool> {
        if !self.platform.status_byte_supported {
            return Ok(true);
        }
        let reply = self.interface.send_byte_and_receive(CTRL_STATUS)?;
        let word: u32 = reply
            .trim()
            .parse()
            .map_err(|_| GcsError::ParseError(format!("Invalid status: {:?}", reply.trim())))?;
        Ok(word & REFERENCED_BIT != 0)
    }

    /// Move one pivot coordinate. Only Hexapods have a pivot; on other
    /// controllers this logs and does nothing.
    ///
    /// # Errors
    ///
    /// [`GcsError::PivotWhileMoving`] while any axis moves, before anything
    /// is sent.
    pub fn set_pivot(&mut self, coordinate: PivotCoordinate, value: f64) -> GcsResult<()> {
        if !self.family.is_hexapod() {
            info!("{} controller has no pivot point, ignoring", self.family);
            return Ok(());
        }
        if self.any_axis_moving {
            return Err(GcsError::PivotWhileMoving);
        }

        self.interface.send_only(&format!("SPI {coordinate} {value}"))?;
        self.check_error()?;
        match coordinate {
            PivotCoordinate::X => self.platform.pivot.x = value,
            PivotCoordinate::Y => self.platform.pivot.y = value,
            PivotCoordinate::Z => self.platform.pivot.z = value,
        }
        Ok(())
    }

    /// Cached pivot point; all zeros for controllers without one.
    pub fn pivot(&self) -> PivotPoint {
        self.platform.pivot
    }
}

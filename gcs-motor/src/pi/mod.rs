//! Physik Instrumente GCS motion controllers.
//!
//! Layers, bottom-up:
//! - [`GcsDevice`]: framing over TCP or serial
//! - [`PiInterface`]: serialized access shared between threads
//! - [`GcsController`]: one session, dialect chosen from `*IDN?`
//! - [`PiAxis`]: cached per-axis state
//! - [`PiMotorController`]: axes by index, deferred moves, polling
//! - [`Poller`]: background poll thread

pub mod axis;
pub mod controller;
pub mod error_codes;
mod gcs;
mod interface;
pub mod motor_controller;
pub mod params;
pub mod poller;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use axis::{AxisState, CountsPerUnit, DeferredMove, MotionProfile, PiAxis};
pub use controller::{
    ControllerFamily, FamilyMatch, GcsController, PivotCoordinate, PivotPoint, HEXAPOD_AXES,
};
pub use gcs::{Connection, GcsDevice, GcsError, GcsResult, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use interface::PiInterface;
pub use motor_controller::{ControllerOptions, PiMotorController};
pub use params::SpaParam;
pub use poller::Poller;
pub use status::{AxisReport, AxisStatusBits, DriverParam, MotorCommand, MotorStatus, PollReport};

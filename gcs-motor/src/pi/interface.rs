//! Shared, serialized access to one GCS device.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::gcs::{GcsDevice, GcsResult};

/// Thread-safe handle to a [`GcsDevice`].
///
/// Every operation holds the device lock for its whole duration, so the
/// command and its reply are never interleaved with another caller's traffic.
/// Longer exchanges such as a command followed by `ERR?` are serialized one
/// level up: [`GcsController`](super::GcsController) methods take `&mut self`,
/// and threads share the controller through a mutex (see
/// [`Poller`](super::Poller)).
pub struct PiInterface {
    device: Mutex<GcsDevice>,
}

impl PiInterface {
    pub fn new(device: GcsDevice) -> Self {
        Self {
            device: Mutex::new(device),
        }
    }

    /// A poisoned lock is recovered: the device holds no invariants that a
    /// panicking holder could have broken half-way.
    fn lock(&self) -> MutexGuard<'_, GcsDevice> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn send_only(&self, command: &str) -> GcsResult<()> {
        self.lock().send_only(command)
    }

    pub fn send_byte(&self, byte: u8) -> GcsResult<()> {
        self.lock().send_byte(byte)
    }

    pub fn send_and_receive(&self, command: &str) -> GcsResult<String> {
        self.lock().send_and_receive(command)
    }

    pub fn send_byte_and_receive(&self, byte: u8) -> GcsResult<String> {
        self.lock().send_byte_and_receive(byte)
    }

    pub fn set_timeout(&self, timeout: Duration) -> GcsResult<()> {
        self.lock().set_timeout(timeout)
    }
}

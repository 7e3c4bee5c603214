//! Driver for Physik Instrumente (PI) motion controllers speaking the GCS
//! command set.
//!
//! Supported families are the C-663/C-863/C-867 motor controllers, E-5xx and
//! E-7xx piezo controllers, the C-702, and Hexapods in both GCS dialects.
//! [`pi::PiMotorController`] is the entry point for driving axes;
//! [`config::DriverConfig`] describes how to reach a controller.

pub mod config;
pub mod pi;

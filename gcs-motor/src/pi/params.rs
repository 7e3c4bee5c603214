//! Controller parameter IDs used with `SPA`/`SPA?`.
//!
//! Only the handful of parameters the motion layer touches are listed. IDs
//! go on the wire in decimal (`SPA? 1 14`).

/// Motor controller parameters addressed per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[repr(u32)]
pub enum SpaParam {
    /// Current closed-loop acceleration
    CurrentAcceleration = 0x0B,
    /// Current closed-loop deceleration
    CurrentDeceleration = 0x0C,
    /// Counts-per-unit numerator
    CountsPerUnitNumerator = 0x0E,
    /// Counts-per-unit denominator
    CountsPerUnitDenominator = 0x0F,
    /// Stage has a reference switch (C-702: >0.1 means present)
    HasReference = 0x14,
    /// C-702 only: axis has been referenced
    C702Referenced = 0x1C,
    /// Maximum closed-loop acceleration
    MaxAcceleration = 0x4A,
    /// Maximum closed-loop deceleration
    MaxDeceleration = 0x4B,
    /// Velocity used by reference moves
    ReferenceVelocity = 0x50,
}

impl SpaParam {
    /// Parameter address. PI manuals list these in hex (`0x50`); the
    /// controller accepts the decimal form (`80`) that goes on the wire.
    pub fn address(self) -> u32 {
        self as u32
    }
}

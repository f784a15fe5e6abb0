//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by NBR 7190-1. They are thin f64
//! newtypes that serialize as plain numbers.
//!
//! ## Working Units
//!
//! Requests are written in the units a designer reads off a load analysis;
//! every formula in the engine works in N and mm:
//!
//! | Quantity          | Request | Engine |
//! |-------------------|---------|--------|
//! | Member length     | m       | mm     |
//! | Bending moment    | N·m     | N·mm   |
//! | Line load         | N/m     | N/mm   |
//! | Stress, modulus   | MPa     | MPa (= N/mm²) |
//!
//! ## Example
//!
//! ```rust
//! use timber_core::units::{Meters, Millimeters, NewtonMeters, NewtonMillimeters};
//!
//! let length: Millimeters = Meters(3.0).into();
//! assert_eq!(length.0, 3000.0);
//!
//! let moment: NewtonMillimeters = NewtonMeters(2500.0).into();
//! assert_eq!(moment.0, 2_500_000.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<NewtonMeters> for NewtonMillimeters {
    fn from(nm: NewtonMeters) -> Self {
        NewtonMillimeters(nm.0 * 1000.0)
    }
}

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Line load in newtons per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMeter(pub f64);

/// Line load in newtons per millimeter (numerically kN/m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMillimeter(pub f64);

impl From<NewtonsPerMeter> for NewtonsPerMillimeter {
    fn from(npm: NewtonsPerMeter) -> Self {
        NewtonsPerMillimeter(npm.0 / 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress or modulus in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl Newtons {
    /// Normal stress from this force acting over `area_mm2`
    pub fn over_area(self, area_mm2: f64) -> Megapascals {
        Megapascals(self.0 / area_mm2)
    }
}

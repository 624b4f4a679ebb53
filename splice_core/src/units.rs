//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the splice engine, plus the
//! rounding helpers every plate dimension and bolt step passes through.
//!
//! ## Design Philosophy
//!
//! Simple newtype wrappers rather than a full units library:
//! - Splice design uses one consistent set of units
//! - JSON serialization stays clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Units
//!
//! - Length: millimeters (mm)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-meters (kN·m)
//!
//! ## Example
//!
//! ```rust
//! use splice_core::units::{round_up_to, KiloNewtonMeters, Millimeters};
//!
//! let lever_arm = Millimeters(388.0);
//! let force = KiloNewtonMeters(200.0).over_lever_arm(lever_arm);
//! assert!((force.0 - 515.46).abs() < 0.01);
//!
//! assert_eq!(round_up_to(582.0, 10.0), 590.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Newtypes
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl KiloNewtonMeters {
    /// Force couple produced by this moment over a lever arm.
    ///
    /// kN·m × 1000 / mm = kN
    pub fn over_lever_arm(self, lever_arm: Millimeters) -> KiloNewtons {
        KiloNewtons(self.0 * 1000.0 / lever_arm.0)
    }
}

// ============================================================================
// Rounding
// ============================================================================

// Absorbs float noise such as 3.0 * 0.1 * 100.0 before ceil/floor.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Round up to the next multiple of `step`.
pub fn round_up_to(value: f64, step: f64) -> f64 {
    (value / step - ROUNDING_EPSILON).ceil() * step
}

/// Round down to the previous multiple of `step`.
pub fn round_down_to(value: f64, step: f64) -> f64 {
    (value / step + ROUNDING_EPSILON).floor() * step
}

/// Round up to the nearest whole millimeter (thicknesses, edge distances).
pub fn ceil_mm(value: f64) -> f64 {
    round_up_to(value, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lever_arm_force() {
        let n = KiloNewtonMeters(200.0).over_lever_arm(Millimeters(400.0 - 12.0));
        approx::assert_relative_eq!(n.0, 200_000.0 / 388.0);
    }

    #[test]
    fn test_rounding_directions() {
        assert_eq!(round_up_to(581.0, 10.0), 590.0);
        assert_eq!(round_up_to(376.0, 10.0), 380.0);
        assert_eq!(round_down_to(199.9, 10.0), 190.0);
        assert_eq!(round_down_to(360.0, 10.0), 360.0);
        assert_eq!(ceil_mm(14.2), 15.0);
        assert_eq!(ceil_mm(60.0), 60.0);
        assert_eq!(round_down_to(48.0, 50.0), 0.0);
        assert_eq!(round_up_to(48.0, 25.0), 50.0);
    }

    #[test]
    fn test_rounding_absorbs_float_noise() {
        // 0.1 * 3.0 * 100.0 = 30.000000000000004
        assert_eq!(round_up_to(0.1 * 3.0 * 100.0, 10.0), 30.0);
        assert_eq!(ceil_mm(2.0 * 0.7 * 10.0), 14.0);
    }

    #[test]
    fn test_rounding_idempotence() {
        for v in [0.0, 7.3, 58.0, 199.99, 387.5, 1234.5] {
            let up = round_up_to(v, 10.0);
            assert_eq!(round_up_to(up, 10.0), up);
            let down = round_down_to(v, 10.0);
            assert_eq!(round_down_to(down, 10.0), down);
            let c = ceil_mm(v);
            assert_eq!(ceil_mm(c), c);
        }
    }

    #[test]
    fn test_serialization() {
        let len = Millimeters(12.5);
        let json = serde_json::to_string(&len).unwrap();
        assert_eq!(json, "12.5");
    }
}

//! # Bolt Spacing Check
//!
//! Turns a proposed pitch into a code-compliant pitch and edge distance for
//! a line of bolts along one plate dimension.
//!
//! ## Procedure
//!
//! 1. Limits: `min_step`, `max_step` (rounded down to the step grid) and
//!    `min_edge` (rounded up to a whole millimeter) from [`SpacingRules`].
//! 2. The line must fit at minimum spacing:
//!    `2 × min_edge + (n − 1) × min_step <= length`, else `InsufficientLength`.
//! 3. Step = proposed step raised to `min_step`, rounded down, capped at `max_step`.
//! 4. Edge = what is left at each end. If that falls below `min_edge`, the
//!    step is recomputed to fill the length between two minimum edges and
//!    the edge is pinned to `min_edge`.
//!
//! ## Example
//!
//! ```rust
//! use splice_core::calculations::spacing::validate_spacing;
//! use splice_core::settings::SpacingRules;
//!
//! let layout = validate_spacing(&SpacingRules::default(), 20.0, 50.0, 200.0, 3).unwrap();
//! assert_eq!(layout.step, 60.0);
//! assert_eq!(layout.edge_distance, 40.0);
//! assert!(layout.is_valid);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SpliceError, SpliceResult};
use crate::settings::SpacingRules;
use crate::units::ceil_mm;

/// Pitch and edge distance for one line of bolts (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingLayout {
    pub step: f64,
    pub edge_distance: f64,
    pub is_valid: bool,
}

/// Check and adjust the spacing of `bolt_count` bolts along `available_length_mm`.
///
/// # Errors
///
/// * `InsufficientLength` - the bolts do not fit at minimum spacing
/// * `SpacingInfeasible` - the resulting step exceeds the maximum pitch
/// * `InvalidInput` - zero bolts or a non-positive diameter
pub fn validate_spacing(
    rules: &SpacingRules,
    diameter_mm: f64,
    proposed_step_mm: f64,
    available_length_mm: f64,
    bolt_count: u32,
) -> SpliceResult<SpacingLayout> {
    if bolt_count == 0 {
        return Err(SpliceError::invalid_input("bolt_count", "0", "At least one bolt is required"));
    }
    if !(diameter_mm.is_finite() && diameter_mm > 0.0) {
        return Err(SpliceError::invalid_input(
            "diameter_mm",
            diameter_mm.to_string(),
            "Diameter must be positive",
        ));
    }

    let min_step = rules.min_step(diameter_mm);
    let max_step = rules.max_step(diameter_mm);
    let min_edge = rules.min_edge(diameter_mm);

    let required_length_mm = rules.min_length(diameter_mm, bolt_count);
    if required_length_mm > available_length_mm {
        return Err(SpliceError::InsufficientLength {
            diameter_mm,
            bolt_count,
            required_length_mm,
            available_length_mm,
        });
    }

    let gaps = (bolt_count - 1) as f64;
    let mut step = rules.round_step(proposed_step_mm.max(min_step)).min(max_step);
    let mut edge = (available_length_mm - gaps * step) / 2.0;

    if edge < min_edge && bolt_count > 1 {
        step = rules.round_step((available_length_mm - 2.0 * min_edge) / gaps);
        edge = min_edge;
    }

    if step > max_step {
        return Err(SpliceError::SpacingInfeasible {
            diameter_mm,
            step_mm: step,
            max_step_mm: max_step,
        });
    }

    Ok(SpacingLayout {
        step,
        edge_distance: ceil_mm(edge),
        is_valid: min_step <= step && step <= max_step,
    })
}

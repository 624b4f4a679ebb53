//! # Splice Calculations
//!
//! The sizing pipeline, leaves first:
//!
//! - [`spacing`] - pitch and edge distance check for one line of bolts
//! - [`bolt_selection`] - diameter × row search for one cover plate
//! - [`joint`] - plate proportioning, force split and the final result
//!
//! Every function here is a pure calculation: input in, result or
//! [`SpliceError`](crate::errors::SpliceError) out, no shared state.

pub mod bolt_selection;
pub mod joint;
pub mod spacing;

pub use bolt_selection::{select_bolts, BoltArrangement, PlateLoad};
pub use joint::{
    size_joint, size_joint_with, BeamRef, BoltPosition, ConnectionRequest, JointResult, PlateDesign, SteelRef,
};
pub use spacing::{validate_spacing, SpacingLayout};

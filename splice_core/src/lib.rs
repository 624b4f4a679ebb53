//! # splice_core - Bolted Beam Splice Sizing Engine
//!
//! `splice_core` sizes the bolted cover-plate splice between two rolled steel
//! I-beam segments. Given beam geometry, steel, the design moment and shear,
//! and the structure's responsibility level, it picks the bolt grade,
//! diameter and grid for the flange and web plates with the fewest bolts
//! that pass the capacity and spacing checks.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Requests and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Configurable**: Code constants live in [`settings::DesignSettings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use splice_core::calculations::{size_joint, BeamRef, ConnectionRequest, SteelRef};
//! use splice_core::materials::{builtin_i_beams, builtin_steels};
//!
//! let request = ConnectionRequest {
//!     beam_ref: BeamRef::Catalog("40".to_string()),
//!     steel_ref: SteelRef::Catalog("С255".to_string()),
//!     m_max: 200.0,
//!     q: 100.0,
//!     responsibility_level: "Нормальный".to_string(),
//! };
//!
//! let result = size_joint(&request, &builtin_i_beams(), &builtin_steels()).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"boltsPerRow\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - spacing check, bolt selection and joint sizing
//! - [`materials`] - bolt grades, beam sections and steel catalogs
//! - [`settings`] - governing constants and rule sets
//! - [`units`] - unit wrappers and rounding helpers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{size_joint, size_joint_with, ConnectionRequest, JointResult, PlateDesign};
pub use errors::{SpliceError, SpliceResult};
pub use settings::DesignSettings;

//! # Materials Database
//!
//! Reference data the splice design reads but never modifies:
//!
//! - **Bolts**: responsibility level → bolt grade table and per-bolt capacities
//! - **Sections**: rolled I-beam geometry and catalogs
//! - **Steel**: steel grade yield strengths and catalogs
//!
//! Catalogs are looked up through the [`BeamLookup`] and [`SteelLookup`]
//! traits so callers can supply their own data sources.
//!
//! ## Example
//!
//! ```rust
//! use splice_core::materials::{builtin_i_beams, BeamLookup, ResponsibilityLevel};
//!
//! let beam = builtin_i_beams().find_beam("50").unwrap();
//! let grade = ResponsibilityLevel::Increased.bolt_grade();
//! println!("h = {} mm, bolts {}", beam.h, grade.class);
//! ```

pub mod bolts;
pub mod sections;
pub mod steel;

mod csv_table;

pub use bolts::{bolt_grade_for, BoltGrade, ConnectionType, ResponsibilityLevel};
pub use sections::{builtin_i_beams, BeamCatalog, BeamLookup, BeamSection};
pub use steel::{builtin_steels, SteelCatalog, SteelGrade, SteelLookup};

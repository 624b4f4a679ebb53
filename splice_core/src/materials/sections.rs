//! Rolled I-Beam Sections
//!
//! Geometry of the spliced beam and an exact-match catalog of standard
//! sections. Only the four dimensions the splice design needs are kept.
//!
//! ## Example
//!
//! ```rust
//! use splice_core::materials::sections::{builtin_i_beams, BeamLookup};
//!
//! let catalog = builtin_i_beams();
//! let beam = catalog.find_beam("40").unwrap();
//! assert_eq!(beam.h, 400.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::csv_table::CsvTable;
use crate::errors::{SpliceError, SpliceResult};

/// I-beam cross-section dimensions (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSection {
    /// Overall depth
    pub h: f64,
    /// Flange width
    pub b: f64,
    /// Web thickness
    pub s: f64,
    /// Flange thickness
    pub t: f64,
}

impl BeamSection {
    pub fn new(h: f64, b: f64, s: f64, t: f64) -> Self {
        BeamSection { h, b, s, t }
    }

    /// Validate that every dimension is positive and the web has a clear height.
    pub fn validate(&self) -> SpliceResult<()> {
        for (field, value) in [("h", self.h), ("b", self.b), ("s", self.s), ("t", self.t)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpliceError::invalid_input(
                    field,
                    value.to_string(),
                    "Beam dimension must be positive",
                ));
            }
        }
        if self.h <= 2.0 * self.t {
            return Err(SpliceError::invalid_input(
                "h",
                self.h.to_string(),
                format!("Depth must exceed both flanges (2t = {})", 2.0 * self.t),
            ));
        }
        Ok(())
    }

    /// Distance between flange centroids, the lever arm of the flange forces (mm)
    pub fn lever_arm_mm(&self) -> f64 {
        self.h - self.t
    }

    /// Clear web height between the flanges (mm)
    pub fn web_height_mm(&self) -> f64 {
        self.h - 2.0 * self.t
    }
}

/// Source of beam geometry by identifier.
pub trait BeamLookup {
    fn find_beam(&self, identifier: &str) -> Option<BeamSection>;
}

impl<F> BeamLookup for F
where
    F: Fn(&str) -> Option<BeamSection>,
{
    fn find_beam(&self, identifier: &str) -> Option<BeamSection> {
        self(identifier)
    }
}

/// In-memory beam catalog keyed by the exact identifier.
#[derive(Debug, Clone, Default)]
pub struct BeamCatalog {
    beams: HashMap<String, BeamSection>,
    /// Identifiers in load order
    order: Vec<String>,
}

impl BeamCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, replacing any previous one with the same identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, section: BeamSection) {
        let key = identifier.into();
        if self.beams.insert(key.clone(), section).is_none() {
            self.order.push(key);
        }
    }

    /// Parse a catalog from CSV text.
    ///
    /// Expected header: `Номер двутавра,h,b,s,t` (`identifier` is accepted
    /// for the first column). Rows with an empty identifier are skipped.
    pub fn from_csv_str(text: &str) -> SpliceResult<Self> {
        let table = CsvTable::parse(text)?;
        let id_idx = table.column(&["Номер двутавра", "identifier"])?;
        let h_idx = table.column(&["h"])?;
        let b_idx = table.column(&["b"])?;
        let s_idx = table.column(&["s"])?;
        let t_idx = table.column(&["t"])?;

        let mut catalog = BeamCatalog::new();
        for row in table.rows() {
            let identifier = row.text(id_idx);
            if identifier.is_empty() {
                continue;
            }
            let section = BeamSection {
                h: row.positive(h_idx, "h")?,
                b: row.positive(b_idx, "b")?,
                s: row.positive(s_idx, "s")?,
                t: row.positive(t_idx, "t")?,
            };
            catalog.insert(identifier, section);
        }
        Ok(catalog)
    }

    /// Load a catalog from a CSV file.
    pub fn load_from_csv(path: &str) -> SpliceResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SpliceError::file_error("read", path, format!("Failed to open CSV: {}", e)))?;
        Self::from_csv_str(&text)
    }

    /// Identifiers in the order they were loaded
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }
}

impl BeamLookup for BeamCatalog {
    fn find_beam(&self, identifier: &str) -> Option<BeamSection> {
        self.beams.get(identifier).copied()
    }
}

/// Common hot-rolled I-beams (GOST 8239) for use without a catalog file.
pub fn builtin_i_beams() -> BeamCatalog {
    let mut catalog = BeamCatalog::new();
    let sections = [
        ("20", 200.0, 100.0, 5.2, 8.4),
        ("24", 240.0, 115.0, 5.6, 9.5),
        ("30", 300.0, 135.0, 6.5, 10.2),
        ("36", 360.0, 145.0, 7.5, 12.3),
        ("40", 400.0, 155.0, 8.3, 13.0),
        ("45", 450.0, 160.0, 9.0, 14.2),
        ("50", 500.0, 170.0, 10.0, 15.2),
        ("55", 550.0, 180.0, 11.0, 16.5),
        ("60", 600.0, 190.0, 12.0, 17.8),
    ];
    for (id, h, b, s, t) in sections {
        catalog.insert(id, BeamSection::new(h, b, s, t));
    }
    catalog
}

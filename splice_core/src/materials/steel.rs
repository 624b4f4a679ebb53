//! Structural Steel Grades
//!
//! Yield strength of the beam and cover plate steel. The fixed-multiple
//! spacing rules do not depend on it; the yield-dependent rule set
//! (see [`crate::settings::SpacingRuleSet`]) does, and results echo it for
//! traceability.
//!
//! ## Example
//!
//! ```rust
//! use splice_core::materials::steel::{builtin_steels, SteelLookup};
//!
//! let catalog = builtin_steels();
//! let c255 = catalog.find_steel("С255").unwrap();
//! assert_eq!(c255.yield_strength, 240.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::csv_table::CsvTable;
use crate::errors::{SpliceError, SpliceResult};

/// Steel grade properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelGrade {
    /// Design yield strength Ry (MPa)
    pub yield_strength: f64,
}

impl SteelGrade {
    pub fn new(yield_strength: f64) -> Self {
        SteelGrade { yield_strength }
    }

    pub fn validate(&self) -> SpliceResult<()> {
        if !(self.yield_strength.is_finite() && self.yield_strength > 0.0) {
            return Err(SpliceError::invalid_input(
                "yieldStrength",
                self.yield_strength.to_string(),
                "Yield strength must be positive",
            ));
        }
        Ok(())
    }
}

/// Source of steel properties by grade name.
pub trait SteelLookup {
    fn find_steel(&self, grade: &str) -> Option<SteelGrade>;
}

impl<F> SteelLookup for F
where
    F: Fn(&str) -> Option<SteelGrade>,
{
    fn find_steel(&self, grade: &str) -> Option<SteelGrade> {
        self(grade)
    }
}

/// In-memory steel catalog keyed by the exact grade name.
#[derive(Debug, Clone, Default)]
pub struct SteelCatalog {
    grades: HashMap<String, SteelGrade>,
    order: Vec<String>,
}

impl SteelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, grade: impl Into<String>, steel: SteelGrade) {
        let key = grade.into();
        if self.grades.insert(key.clone(), steel).is_none() {
            self.order.push(key);
        }
    }

    /// Parse a catalog from CSV text.
    ///
    /// Expected header: `Сталь,Предел текучести` (`grade,yieldStrength` also accepted).
    pub fn from_csv_str(text: &str) -> SpliceResult<Self> {
        let table = CsvTable::parse(text)?;
        let grade_idx = table.column(&["Сталь", "grade"])?;
        let ry_idx = table.column(&["Предел текучести", "yieldStrength"])?;

        let mut catalog = SteelCatalog::new();
        for row in table.rows() {
            let grade = row.text(grade_idx);
            if grade.is_empty() {
                continue;
            }
            catalog.insert(grade, SteelGrade::new(row.positive(ry_idx, "yieldStrength")?));
        }
        Ok(catalog)
    }

    /// Load a catalog from a CSV file.
    pub fn load_from_csv(path: &str) -> SpliceResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SpliceError::file_error("read", path, format!("Failed to open CSV: {}", e)))?;
        Self::from_csv_str(&text)
    }

    pub fn grades(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

impl SteelLookup for SteelCatalog {
    fn find_steel(&self, grade: &str) -> Option<SteelGrade> {
        self.grades.get(grade).copied()
    }
}

/// Common structural steels (GOST 27772) for use without a catalog file.
pub fn builtin_steels() -> SteelCatalog {
    let mut catalog = SteelCatalog::new();
    for (grade, ry) in [("С245", 240.0), ("С255", 240.0), ("С345", 335.0), ("С390", 380.0)] {
        catalog.insert(grade, SteelGrade::new(ry));
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = builtin_steels();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.find_steel("С345").unwrap().yield_strength, 335.0);
        // Exact match only: Latin "C" is not Cyrillic "С"
        assert!(catalog.find_steel("C345").is_none());
    }

    #[test]
    fn test_csv_parsing() {
        let csv = "Сталь,Предел текучести\nС255,240\nС345,335\n";
        let catalog = SteelCatalog::from_csv_str(csv).unwrap();
        assert_eq!(catalog.grades().collect::<Vec<_>>(), vec!["С255", "С345"]);
        assert_eq!(catalog.find_steel("С255"), Some(SteelGrade::new(240.0)));
    }

    #[test]
    fn test_csv_rejects_zero_yield() {
        let err = SteelCatalog::from_csv_str("grade,yieldStrength\nS0,0\n").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_serialized_field_name() {
        let json = serde_json::to_string(&SteelGrade::new(240.0)).unwrap();
        assert_eq!(json, r#"{"yieldStrength":240.0}"#);
    }
}

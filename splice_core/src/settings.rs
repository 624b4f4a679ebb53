//! # Design Settings
//!
//! All governing constants of the splice design live here rather than as
//! literals in the search code: spacing multiples, rounding steps, the
//! standard bolt size table, the row cap, capacity stresses and plate
//! proportioning rules. Defaults reproduce the fixed-multiple rule set
//! (3d / 12d / 2d).
//!
//! Settings can be overridden from a TOML file. Every field is optional.
//!
//! ```toml
//! max_rows = 3
//!
//! [spacing]
//! rule_set = "YieldDependent"
//!
//! [capacity]
//! bearing_shear_kn_per_mm2 = 0.38
//! ```
//!
//! ## Example
//!
//! ```rust
//! use splice_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::from_toml_str("max_rows = 3").unwrap();
//! assert_eq!(settings.max_rows, 3);
//! assert_eq!(settings.bolt_sizes.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SpliceError, SpliceResult};
use crate::units::{ceil_mm, round_down_to};

/// Yield strength below which the superseded table uses the looser multiples (MPa)
pub const YIELD_DEPENDENT_THRESHOLD_MPA: f64 = 540.0;

/// Which spacing rule set governs the bolt pitch and edge distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule_set")]
pub enum SpacingRuleSet {
    /// Fixed multiples of the bolt diameter, independent of the steel.
    FixedMultiples {
        #[serde(default = "default_min_step_multiple")]
        min_step_multiple: f64,
        #[serde(default = "default_max_step_multiple")]
        max_step_multiple: f64,
        #[serde(default = "default_min_edge_multiple")]
        min_edge_multiple: f64,
    },
    /// Superseded table keyed on the plate steel's yield strength:
    /// 2.5d / 16d / 2d below 540 MPa, 3d / 16d / 2.5d at or above.
    YieldDependent,
}

fn default_min_step_multiple() -> f64 {
    3.0
}

fn default_max_step_multiple() -> f64 {
    12.0
}

fn default_min_edge_multiple() -> f64 {
    2.0
}

impl Default for SpacingRuleSet {
    fn default() -> Self {
        SpacingRuleSet::FixedMultiples {
            min_step_multiple: default_min_step_multiple(),
            max_step_multiple: default_max_step_multiple(),
            min_edge_multiple: default_min_edge_multiple(),
        }
    }
}

impl SpacingRuleSet {
    /// Resolve the concrete multiples for a given steel yield strength.
    pub fn resolve(&self, yield_strength_mpa: f64, step_rounding_mm: f64) -> SpacingRules {
        match self {
            SpacingRuleSet::FixedMultiples {
                min_step_multiple,
                max_step_multiple,
                min_edge_multiple,
            } => SpacingRules {
                min_step_multiple: *min_step_multiple,
                max_step_multiple: *max_step_multiple,
                min_edge_multiple: *min_edge_multiple,
                step_rounding_mm,
            },
            SpacingRuleSet::YieldDependent => {
                let mild = yield_strength_mpa < YIELD_DEPENDENT_THRESHOLD_MPA;
                SpacingRules {
                    min_step_multiple: if mild { 2.5 } else { 3.0 },
                    max_step_multiple: 16.0,
                    min_edge_multiple: if mild { 2.0 } else { 2.5 },
                    step_rounding_mm,
                }
            }
        }
    }
}

/// Concrete spacing limits, as multiples of the bolt diameter.
///
/// Step bounds are rounded down to `step_rounding_mm`, the minimum edge
/// distance is rounded up to a whole millimeter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingRules {
    pub min_step_multiple: f64,
    pub max_step_multiple: f64,
    pub min_edge_multiple: f64,
    pub step_rounding_mm: f64,
}

impl Default for SpacingRules {
    fn default() -> Self {
        SpacingRuleSet::default().resolve(0.0, 10.0)
    }
}

impl SpacingRules {
    /// Minimum center-to-center pitch (mm)
    pub fn min_step(&self, diameter_mm: f64) -> f64 {
        self.round_step(self.min_step_multiple * diameter_mm)
    }

    /// Maximum center-to-center pitch (mm)
    pub fn max_step(&self, diameter_mm: f64) -> f64 {
        self.round_step(self.max_step_multiple * diameter_mm)
    }

    /// Minimum distance from a bolt center to the plate edge (mm)
    pub fn min_edge(&self, diameter_mm: f64) -> f64 {
        ceil_mm(self.min_edge_multiple * diameter_mm)
    }

    /// Round a pitch down to the step grid.
    pub fn round_step(&self, step_mm: f64) -> f64 {
        round_down_to(step_mm, self.step_rounding_mm)
    }

    /// Shortest dimension that fits `bolt_count` bolts at minimum spacing.
    pub fn min_length(&self, diameter_mm: f64, bolt_count: u32) -> f64 {
        let gaps = bolt_count.saturating_sub(1) as f64;
        2.0 * self.min_edge(diameter_mm) + gaps * self.min_step(diameter_mm)
    }

    /// Most bolts that fit along `length_mm` at minimum spacing (0 if none fit).
    pub fn max_bolts_along(&self, diameter_mm: f64, length_mm: f64) -> u32 {
        let free = length_mm - 2.0 * self.min_edge(diameter_mm);
        let min_step = self.min_step(diameter_mm);
        if free < 0.0 || min_step <= 0.0 {
            return 0;
        }
        ((free / min_step).floor() as u32).saturating_add(1)
    }
}

/// A standard bolt size with its gross shank area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltSize {
    /// Nominal diameter (mm)
    pub diameter_mm: f64,
    /// Gross cross-sectional area (mm²)
    pub area_mm2: f64,
}

impl BoltSize {
    pub const fn new(diameter_mm: f64, area_mm2: f64) -> Self {
        BoltSize {
            diameter_mm,
            area_mm2,
        }
    }
}

/// Standard metric bolt sizes M16, M20, M24, M30 (ascending).
pub const STANDARD_BOLT_SIZES: [BoltSize; 4] = [
    BoltSize::new(16.0, 201.0),
    BoltSize::new(20.0, 314.0),
    BoltSize::new(24.0, 452.0),
    BoltSize::new(30.0, 707.0),
];

/// Design stresses for bearing-type bolts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityFactors {
    /// Bolt shear stress applied to the gross area (kN/mm²)
    pub bearing_shear_kn_per_mm2: f64,
    /// Plate crushing stress applied to d × t (kN/mm²)
    pub bearing_crush_kn_per_mm2: f64,
}

impl Default for CapacityFactors {
    fn default() -> Self {
        CapacityFactors {
            bearing_shear_kn_per_mm2: 0.4,
            bearing_crush_kn_per_mm2: 0.8,
        }
    }
}

/// Cover plate proportioning rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateRules {
    /// Added to the spliced element's thickness (mm)
    pub thickness_allowance_mm: f64,
    /// Flange plate minimum thickness (mm)
    pub flange_min_thickness_mm: f64,
    /// Web plate minimum thickness (mm)
    pub web_min_thickness_mm: f64,
    /// Flange plate length as a multiple of the beam depth h
    pub flange_length_factor: f64,
    /// Web plate length as a multiple of the flange width b
    pub web_length_factor: f64,
}

impl Default for PlateRules {
    fn default() -> Self {
        PlateRules {
            thickness_allowance_mm: 2.0,
            flange_min_thickness_mm: 8.0,
            web_min_thickness_mm: 6.0,
            flange_length_factor: 1.5,
            web_length_factor: 1.5,
        }
    }
}

/// Complete set of design constants used by [`crate::calculations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    pub spacing: SpacingRuleSet,

    /// Bolt steps are rounded down to this grid (mm)
    pub step_rounding_mm: f64,

    /// Plate lengths and widths are rounded up to this grid (mm)
    pub dimension_rounding_mm: f64,

    /// Standard bolt sizes, ascending by diameter
    pub bolt_sizes: Vec<BoltSize>,

    /// Upper bound on bolt rows per plate
    pub max_rows: u32,

    pub capacity: CapacityFactors,

    pub plates: PlateRules,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            spacing: SpacingRuleSet::default(),
            step_rounding_mm: 10.0,
            dimension_rounding_mm: 10.0,
            bolt_sizes: STANDARD_BOLT_SIZES.to_vec(),
            max_rows: 4,
            capacity: CapacityFactors::default(),
            plates: PlateRules::default(),
        }
    }
}

impl DesignSettings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(text: &str) -> SpliceResult<Self> {
        let settings: DesignSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &str) -> SpliceResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SpliceError::file_error("read", path, e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Spacing limits for plates of the given steel.
    pub fn spacing_rules(&self, yield_strength_mpa: f64) -> SpacingRules {
        self.spacing.resolve(yield_strength_mpa, self.step_rounding_mm)
    }

    /// Validate settings values.
    pub fn validate(&self) -> SpliceResult<()> {
        let positive = [
            ("step_rounding_mm", self.step_rounding_mm),
            ("dimension_rounding_mm", self.dimension_rounding_mm),
            ("capacity.bearing_shear_kn_per_mm2", self.capacity.bearing_shear_kn_per_mm2),
            ("capacity.bearing_crush_kn_per_mm2", self.capacity.bearing_crush_kn_per_mm2),
            ("plates.flange_min_thickness_mm", self.plates.flange_min_thickness_mm),
            ("plates.web_min_thickness_mm", self.plates.web_min_thickness_mm),
            ("plates.flange_length_factor", self.plates.flange_length_factor),
            ("plates.web_length_factor", self.plates.web_length_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpliceError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if !(self.plates.thickness_allowance_mm.is_finite() && self.plates.thickness_allowance_mm >= 0.0) {
            return Err(SpliceError::invalid_input(
                "plates.thickness_allowance_mm",
                self.plates.thickness_allowance_mm.to_string(),
                "Must be zero or positive",
            ));
        }

        if let SpacingRuleSet::FixedMultiples {
            min_step_multiple,
            max_step_multiple,
            min_edge_multiple,
        } = self.spacing
        {
            if !(min_step_multiple > 0.0 && min_edge_multiple > 0.0) {
                return Err(SpliceError::invalid_input(
                    "spacing",
                    format!("{min_step_multiple}d / {min_edge_multiple}d"),
                    "Minimum step and edge multiples must be positive",
                ));
            }
            if max_step_multiple < min_step_multiple {
                return Err(SpliceError::invalid_input(
                    "spacing.max_step_multiple",
                    max_step_multiple.to_string(),
                    "Must not be below the minimum step multiple",
                ));
            }
        }

        if self.max_rows == 0 {
            return Err(SpliceError::invalid_input("max_rows", "0", "At least one row is required"));
        }

        if self.bolt_sizes.is_empty() {
            return Err(SpliceError::invalid_input("bolt_sizes", "[]", "Bolt size table is empty"));
        }
        for size in &self.bolt_sizes {
            if !(size.diameter_mm > 0.0 && size.area_mm2 > 0.0) {
                return Err(SpliceError::invalid_input(
                    "bolt_sizes",
                    format!("d={} A={}", size.diameter_mm, size.area_mm2),
                    "Diameter and area must be positive",
                ));
            }
        }
        if self
            .bolt_sizes
            .windows(2)
            .any(|pair| pair[0].diameter_mm >= pair[1].diameter_mm)
        {
            return Err(SpliceError::invalid_input(
                "bolt_sizes",
                format!("{} sizes", self.bolt_sizes.len()),
                "Diameters must be strictly ascending",
            ));
        }

        // Both regimes of the yield-dependent table must leave a usable pitch.
        for yield_strength in [0.0, YIELD_DEPENDENT_THRESHOLD_MPA] {
            let rules = self.spacing_rules(yield_strength);
            for size in &self.bolt_sizes {
                let (min_step, max_step) = (rules.min_step(size.diameter_mm), rules.max_step(size.diameter_mm));
                if min_step <= 0.0 || max_step <= 0.0 {
                    return Err(SpliceError::invalid_input(
                        "step_rounding_mm",
                        self.step_rounding_mm.to_string(),
                        format!(
                            "Step grid rounds the M{} pitch limits to {} / {} mm",
                            size.diameter_mm, min_step, max_step
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_for_m20() {
        let rules = SpacingRules::default();
        assert_eq!(rules.min_step(20.0), 60.0);
        assert_eq!(rules.max_step(20.0), 240.0);
        assert_eq!(rules.min_edge(20.0), 40.0);
    }

    #[test]
    fn test_step_bounds_round_down() {
        let rules = SpacingRules::default();
        // 3 x 16 = 48 -> 40, 12 x 16 = 192 -> 190
        assert_eq!(rules.min_step(16.0), 40.0);
        assert_eq!(rules.max_step(16.0), 190.0);
        assert_eq!(rules.min_edge(16.0), 32.0);
    }

    #[test]
    fn test_min_length_and_fit() {
        let rules = SpacingRules::default();
        assert_eq!(rules.min_length(20.0, 3), 200.0);
        assert_eq!(rules.min_length(20.0, 1), 80.0);
        assert_eq!(rules.max_bolts_along(20.0, 200.0), 3);
        assert_eq!(rules.max_bolts_along(20.0, 259.0), 3);
        assert_eq!(rules.max_bolts_along(20.0, 260.0), 4);
        assert_eq!(rules.max_bolts_along(30.0, 100.0), 0);
    }

    #[test]
    fn test_zero_step_never_overflows() {
        let rules = SpacingRuleSet::default().resolve(240.0, 50.0);
        assert_eq!(rules.min_step(16.0), 0.0);
        assert_eq!(rules.max_bolts_along(16.0, 600.0), 0);
    }

    #[test]
    fn test_rejects_step_grid_coarser_than_pitch() {
        // 3 x 16 = 48 rounds down to 0 on a 50 mm grid
        let err = DesignSettings::from_toml_str("step_rounding_mm = 50.0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("M16"));

        let m20_only = "step_rounding_mm = 50.0\nbolt_sizes = [{ diameter_mm = 20.0, area_mm2 = 314.0 }]\n\n[spacing]\nrule_set = \"YieldDependent\"\n";
        // 2.5 x 20 = 50 survives, 3 x 20 = 60 -> 50 as well
        assert!(DesignSettings::from_toml_str(m20_only).is_ok());
    }

    #[test]
    fn test_yield_dependent_rule_set() {
        let mild = SpacingRuleSet::YieldDependent.resolve(240.0, 10.0);
        assert_eq!(mild.min_step_multiple, 2.5);
        assert_eq!(mild.max_step_multiple, 16.0);
        assert_eq!(mild.min_edge_multiple, 2.0);

        let strong = SpacingRuleSet::YieldDependent.resolve(590.0, 10.0);
        assert_eq!(strong.min_step_multiple, 3.0);
        assert_eq!(strong.min_edge_multiple, 2.5);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(DesignSettings::default().validate().is_ok());
    }

    #[test]
    fn test_toml_overrides() {
        let text = r#"
            max_rows = 2

            [spacing]
            rule_set = "FixedMultiples"
            max_step_multiple = 8.0

            [plates]
            web_min_thickness_mm = 8.0
        "#;
        let settings = DesignSettings::from_toml_str(text).unwrap();
        assert_eq!(settings.max_rows, 2);
        assert_eq!(settings.plates.web_min_thickness_mm, 8.0);
        assert_eq!(settings.plates.flange_min_thickness_mm, 8.0);
        let rules = settings.spacing_rules(240.0);
        assert_eq!(rules.min_step_multiple, 3.0);
        assert_eq!(rules.max_step_multiple, 8.0);
    }

    #[test]
    fn test_yield_dependent_from_toml() {
        let settings = DesignSettings::from_toml_str("[spacing]\nrule_set = \"YieldDependent\"\n").unwrap();
        assert_eq!(settings.spacing, SpacingRuleSet::YieldDependent);
    }

    #[test]
    fn test_rejects_unsorted_bolt_sizes() {
        let mut settings = DesignSettings::default();
        settings.bolt_sizes.reverse();
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_zero_rows() {
        let err = DesignSettings::from_toml_str("max_rows = 0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bad_toml_is_serialization_error() {
        let err = DesignSettings::from_toml_str("max_rows = \"four\"").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}

//! # Bolt Selection
//!
//! Chooses bolt diameter and grid (rows × bolts per row) for one cover plate.
//!
//! ## Search
//!
//! Diameters are tried from largest to smallest. For each diameter the row
//! count runs from 1 up to `min(max_rows, floor(width / (min_step_multiple × d)))`.
//! For each (diameter, rows) candidate:
//!
//! 1. Force per row = force / rows
//! 2. Bolts per row = ceil(force per row / bolt capacity), at least one
//! 3. The row must fit along the plate length at minimum spacing
//! 4. Longitudinal spacing is checked along the length (bolts per row),
//!    transverse spacing along the width (rows)
//!
//! The feasible candidate with the strictly smallest total bolt count wins;
//! ties keep the first one found (larger diameter, then fewer rows).
//!
//! ## Example
//!
//! ```rust
//! use splice_core::calculations::bolt_selection::{select_bolts, PlateLoad};
//! use splice_core::materials::ResponsibilityLevel;
//! use splice_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::default();
//! let load = PlateLoad {
//!     force_kn: 257.73,
//!     thickness_mm: 12.0,
//!     length_mm: 600.0,
//!     width_mm: 200.0,
//! };
//! let grade = ResponsibilityLevel::Normal.bolt_grade();
//! let bolts = select_bolts(&load, &grade, &settings, &settings.spacing_rules(240.0)).unwrap();
//! assert_eq!((bolts.diameter, bolts.rows, bolts.bolts_per_row), (30.0, 1, 2));
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::errors::{SpliceError, SpliceResult};
use crate::materials::BoltGrade;
use crate::settings::{BoltSize, DesignSettings, SpacingRules};

use super::spacing::validate_spacing;

/// Force and geometry the bolts of one plate must work with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateLoad {
    /// Design force carried by this plate (kN)
    pub force_kn: f64,
    /// Thickness of the spliced element, used for plate bearing (mm)
    pub thickness_mm: f64,
    /// Plate dimension along the force, the bolt rows run this way (mm)
    pub length_mm: f64,
    /// Plate dimension across the force, rows are stacked this way (mm)
    pub width_mm: f64,
}

impl PlateLoad {
    pub fn validate(&self) -> SpliceResult<()> {
        if !(self.force_kn.is_finite() && self.force_kn >= 0.0) {
            return Err(SpliceError::invalid_input(
                "force_kn",
                self.force_kn.to_string(),
                "Plate force must be finite and not negative",
            ));
        }
        for (field, value) in [
            ("thickness_mm", self.thickness_mm),
            ("length_mm", self.length_mm),
            ("width_mm", self.width_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpliceError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        Ok(())
    }
}

/// Bolt grid chosen for one plate. All lengths in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoltArrangement {
    pub diameter: f64,
    pub count: u32,
    pub rows: u32,
    pub bolts_per_row: u32,
    /// Pitch between bolts within a row (along the plate length)
    pub vertical_step: f64,
    /// Pitch between rows (across the plate width)
    pub horizontal_step: f64,
    /// End distance along the plate length
    pub edge_distance: f64,
    /// Edge distance across the plate width
    pub horizontal_edge_distance: f64,
    pub is_valid: bool,
}

/// Most rows a plate of this width can take for the diameter.
pub fn max_rows_for(width_mm: f64, diameter_mm: f64, rules: &SpacingRules, settings: &DesignSettings) -> u32 {
    let by_width = (width_mm / (rules.min_step_multiple * diameter_mm)).floor();
    if by_width < 1.0 {
        return 0;
    }
    settings.max_rows.min(by_width as u32)
}

/// Evaluate a single (diameter, rows) candidate.
///
/// Returns `Ok(None)` when the candidate is not capacity- or spacing-feasible.
/// Spacing errors other than candidate rejections are returned as is.
pub fn evaluate_candidate(
    load: &PlateLoad,
    grade: &BoltGrade,
    size: &BoltSize,
    rows: u32,
    settings: &DesignSettings,
    rules: &SpacingRules,
) -> SpliceResult<Option<BoltArrangement>> {
    if rows == 0 {
        return Err(SpliceError::invalid_input("rows", "0", "At least one row is required"));
    }
    let d = size.diameter_mm;
    let per_row_force = load.force_kn / rows as f64;
    let capacity = grade.bolt_capacity_kn(size, load.thickness_mm, &settings.capacity);

    let required = (per_row_force / capacity).ceil().max(1.0);
    let fittable = rules.max_bolts_along(d, load.length_mm);
    if required > fittable as f64 {
        trace!(
            "d={} rows={}: {} bolts per row needed, only {} fit along {} mm",
            d, rows, required, fittable, load.length_mm
        );
        return Ok(None);
    }
    let bolts_per_row = required as u32;

    let layouts = validate_spacing(
        rules,
        d,
        load.length_mm / (bolts_per_row + 1) as f64,
        load.length_mm,
        bolts_per_row,
    )
    .and_then(|along| {
        validate_spacing(rules, d, load.width_mm / (rows + 1) as f64, load.width_mm, rows)
            .map(|across| (along, across))
    });

    let (along, across) = match layouts {
        Ok(layouts) => layouts,
        Err(e) if e.is_candidate_rejection() => {
            trace!("d={} rows={}: rejected, {}", d, rows, e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    Ok(Some(BoltArrangement {
        diameter: d,
        count: bolts_per_row * rows,
        rows,
        bolts_per_row,
        vertical_step: along.step,
        horizontal_step: across.step,
        edge_distance: along.edge_distance,
        horizontal_edge_distance: across.edge_distance,
        is_valid: along.is_valid && across.is_valid,
    }))
}

/// Select the arrangement with the fewest bolts for one plate.
///
/// # Errors
///
/// * `InvalidInput` - negative force, non-positive plate geometry or a
///   malformed bolt size
/// * `NoFeasibleBoltArrangement` - no (diameter, rows) candidate works
pub fn select_bolts(
    load: &PlateLoad,
    grade: &BoltGrade,
    settings: &DesignSettings,
    rules: &SpacingRules,
) -> SpliceResult<BoltArrangement> {
    load.validate()?;

    let mut best: Option<BoltArrangement> = None;
    for size in settings.bolt_sizes.iter().rev() {
        let max_rows = max_rows_for(load.width_mm, size.diameter_mm, rules, settings);
        for rows in 1..=max_rows {
            let Some(candidate) = evaluate_candidate(load, grade, size, rows, settings, rules)? else {
                continue;
            };
            if best.map_or(true, |b| candidate.count < b.count) {
                best = Some(candidate);
            }
        }
    }

    match best {
        Some(arrangement) => {
            debug!(
                "{:.2} kN on {}x{} mm: {} x M{} ({} rows x {})",
                load.force_kn,
                load.length_mm,
                load.width_mm,
                arrangement.count,
                arrangement.diameter,
                arrangement.rows,
                arrangement.bolts_per_row
            );
            Ok(arrangement)
        }
        None => Err(SpliceError::NoFeasibleBoltArrangement {
            force_kn: load.force_kn,
            length_mm: load.length_mm,
            width_mm: load.width_mm,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ResponsibilityLevel;

    fn flange_load() -> PlateLoad {
        PlateLoad {
            force_kn: 200_000.0 / 388.0 / 2.0,
            thickness_mm: 12.0,
            length_mm: 600.0,
            width_mm: 200.0,
        }
    }

    fn select(load: &PlateLoad, level: ResponsibilityLevel) -> SpliceResult<BoltArrangement> {
        let settings = DesignSettings::default();
        select_bolts(load, &level.bolt_grade(), &settings, &settings.spacing_rules(240.0))
    }

    #[test]
    fn test_flange_plate_slip_critical() {
        let bolts = select(&flange_load(), ResponsibilityLevel::Normal).unwrap();
        assert_eq!(
            bolts,
            BoltArrangement {
                diameter: 30.0,
                count: 2,
                rows: 1,
                bolts_per_row: 2,
                vertical_step: 200.0,
                horizontal_step: 100.0,
                edge_distance: 200.0,
                horizontal_edge_distance: 100.0,
                is_valid: true,
            }
        );
    }

    #[test]
    fn test_bearing_type_uses_shear_and_crushing() {
        // M30 8.8: min(0.4 x 707, 0.8 x 30 x 12) = 282.8 kN, one bolt carries 257.7 kN
        let bolts = select(&flange_load(), ResponsibilityLevel::Reduced).unwrap();
        assert_eq!(bolts.diameter, 30.0);
        assert_eq!(bolts.count, 1);
    }

    #[test]
    fn test_row_cap_by_width() {
        let settings = DesignSettings::default();
        let rules = settings.spacing_rules(240.0);
        assert_eq!(max_rows_for(200.0, 30.0, &rules, &settings), 2);
        assert_eq!(max_rows_for(1000.0, 16.0, &rules, &settings), 4);
        assert_eq!(max_rows_for(80.0, 30.0, &rules, &settings), 0);
    }

    #[test]
    fn test_zero_force_gives_single_bolt() {
        let load = PlateLoad {
            force_kn: 0.0,
            thickness_mm: 8.0,
            length_mm: 300.0,
            width_mm: 380.0,
        };
        let bolts = select(&load, ResponsibilityLevel::Normal).unwrap();
        assert_eq!(bolts.count, 1);
        assert_eq!(bolts.diameter, 30.0);
    }

    #[test]
    fn test_heavy_load_spreads_over_rows() {
        let load = PlateLoad {
            force_kn: 1500.0,
            thickness_mm: 20.0,
            length_mm: 400.0,
            width_mm: 400.0,
        };
        let bolts = select(&load, ResponsibilityLevel::Increased).unwrap();
        // Six M30 do not fit in one row along 400 mm
        assert_eq!(bolts.count, bolts.rows * bolts.bolts_per_row);
        assert_eq!((bolts.diameter, bolts.rows, bolts.bolts_per_row), (30.0, 2, 3));
        let grade = ResponsibilityLevel::Increased.bolt_grade();
        let size = BoltSize::new(bolts.diameter, area_of(bolts.diameter));
        let capacity = grade.bolt_capacity_kn(&size, load.thickness_mm, &Default::default());
        assert!(capacity * bolts.bolts_per_row as f64 >= load.force_kn / bolts.rows as f64);
    }

    fn area_of(diameter: f64) -> f64 {
        DesignSettings::default()
            .bolt_sizes
            .iter()
            .find(|s| s.diameter_mm == diameter)
            .map(|s| s.area_mm2)
            .unwrap()
    }

    #[test]
    fn test_result_is_minimal_over_search_space() {
        let settings = DesignSettings::default();
        let rules = settings.spacing_rules(240.0);
        let loads = [
            flange_load(),
            PlateLoad { force_kn: 50.0, thickness_mm: 8.0, length_mm: 300.0, width_mm: 380.0 },
            PlateLoad { force_kn: 900.0, thickness_mm: 15.0, length_mm: 750.0, width_mm: 170.0 },
            PlateLoad { force_kn: 2200.0, thickness_mm: 18.0, length_mm: 900.0, width_mm: 190.0 },
        ];
        for level in ResponsibilityLevel::ALL {
            let grade = level.bolt_grade();
            for load in &loads {
                let chosen = select_bolts(load, &grade, &settings, &rules);
                let mut feasible = Vec::new();
                for size in &settings.bolt_sizes {
                    for rows in 1..=settings.max_rows {
                        if rows > max_rows_for(load.width_mm, size.diameter_mm, &rules, &settings) {
                            continue;
                        }
                        if let Some(c) = evaluate_candidate(load, &grade, size, rows, &settings, &rules).unwrap() {
                            feasible.push(c.count);
                        }
                    }
                }
                match chosen {
                    Ok(best) => assert_eq!(Some(best.count), feasible.iter().copied().min()),
                    Err(e) => {
                        assert!(feasible.is_empty());
                        assert_eq!(e.error_code(), "NO_FEASIBLE_BOLT_ARRANGEMENT");
                    }
                }
            }
        }
    }

    #[test]
    fn test_ties_keep_larger_diameter_then_fewer_rows() {
        // 1 bolt of any size carries 10 kN: M30 in a single row is found first
        let load = PlateLoad {
            force_kn: 10.0,
            thickness_mm: 10.0,
            length_mm: 400.0,
            width_mm: 400.0,
        };
        let bolts = select(&load, ResponsibilityLevel::Normal).unwrap();
        assert_eq!((bolts.diameter, bolts.rows), (30.0, 1));
    }

    #[test]
    fn test_no_feasible_arrangement() {
        // Too short for even one M16 between two edges
        let load = PlateLoad {
            force_kn: 100.0,
            thickness_mm: 10.0,
            length_mm: 60.0,
            width_mm: 200.0,
        };
        let err = select(&load, ResponsibilityLevel::Normal).unwrap_err();
        assert_eq!(err.error_code(), "NO_FEASIBLE_BOLT_ARRANGEMENT");
    }

    #[test]
    fn test_overload_exhausts_search() {
        let load = PlateLoad {
            force_kn: 1.0e6,
            thickness_mm: 10.0,
            length_mm: 300.0,
            width_mm: 200.0,
        };
        assert!(select(&load, ResponsibilityLevel::Increased).is_err());
    }

    #[test]
    fn test_spacing_rejections_skip_candidate() {
        let settings = DesignSettings::default();
        let rules = settings.spacing_rules(240.0);
        let grade = ResponsibilityLevel::Normal.bolt_grade();
        // 3 rows of M30 need 2 x 60 + 2 x 90 = 300 mm across a 200 mm plate
        let load = PlateLoad { force_kn: 50.0, thickness_mm: 10.0, length_mm: 300.0, width_mm: 200.0 };
        let size = BoltSize::new(30.0, 707.0);
        assert_eq!(evaluate_candidate(&load, &grade, &size, 3, &settings, &rules), Ok(None));
    }

    #[test]
    fn test_other_candidate_errors_propagate() {
        let settings = DesignSettings::default();
        let rules = settings.spacing_rules(240.0);
        let grade = ResponsibilityLevel::Normal.bolt_grade();
        let load = PlateLoad { force_kn: 50.0, thickness_mm: 10.0, length_mm: 300.0, width_mm: 200.0 };

        let err = evaluate_candidate(&load, &grade, &BoltSize::new(f64::NAN, 314.0), 1, &settings, &rules)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_candidate_rejection());

        let err = evaluate_candidate(&load, &grade, &BoltSize::new(20.0, 314.0), 0, &settings, &rules).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_force_rejected() {
        let mut load = flange_load();
        load.force_kn = -1.0;
        let err = select(&load, ResponsibilityLevel::Normal).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}

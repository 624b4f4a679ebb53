//! # Beam Splice Sizing
//!
//! Sizes the bolted cover-plate splice of a rolled I-beam: one plate on each
//! flange and one on each side of the web.
//!
//! ## Procedure
//!
//! 1. Resolve beam geometry and steel (catalog or inline values)
//! 2. Bolt grade and connection type from the responsibility level
//! 3. Plate proportions from the beam:
//!    - flange plate: `t_p = ceil(max(t + 2, 8))`, `b_p = ⌈b⌉₁₀`, `l_p = ⌈1.5h⌉₁₀`
//!    - web plate: `t_p = ceil(max(s + 2, 6))`, `b_p = ⌈h − 2t⌉₁₀`, `l_p = ⌈1.5b⌉₁₀`
//! 4. Forces: flange couple `N = M × 1000 / (h − t)`, each flange plate takes
//!    `N / 2`; each of the two web plates takes `Q / 2`
//! 5. Bolt selection for each plate
//!
//! ## Example
//!
//! ```rust
//! use splice_core::calculations::joint::{size_joint, BeamRef, ConnectionRequest, SteelRef};
//! use splice_core::materials::{builtin_i_beams, builtin_steels, BeamSection};
//!
//! let request = ConnectionRequest {
//!     beam_ref: BeamRef::Custom(BeamSection::new(400.0, 200.0, 8.0, 12.0)),
//!     steel_ref: SteelRef::Catalog("С255".to_string()),
//!     m_max: 200.0,
//!     q: 100.0,
//!     responsibility_level: "Нормальный".to_string(),
//! };
//!
//! let result = size_joint(&request, &builtin_i_beams(), &builtin_steels()).unwrap();
//! assert_eq!(result.upper.count, 2);
//! assert_eq!(result.bolt_class, "10.9");
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{SpliceError, SpliceResult};
use crate::materials::{BeamLookup, BeamSection, ConnectionType, ResponsibilityLevel, SteelGrade, SteelLookup};
use crate::settings::DesignSettings;
use crate::units::{ceil_mm, round_up_to, KiloNewtonMeters, Millimeters};

use super::bolt_selection::{select_bolts, BoltArrangement, PlateLoad};

/// Beam reference: catalog identifier or inline geometry.
///
/// Serialized untagged: `"40"` or `{"h": 400, "b": 200, "s": 8, "t": 12}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BeamRef {
    Catalog(String),
    Custom(BeamSection),
}

/// Steel reference: catalog grade or inline yield strength.
///
/// Serialized untagged: `"С255"` or `{"yieldStrength": 240}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SteelRef {
    Catalog(String),
    Custom(SteelGrade),
}

/// Input for one splice.
///
/// ## JSON Example
///
/// ```json
/// {
///   "beamRef": "40",
///   "steelRef": { "yieldStrength": 240 },
///   "M_max": 200.0,
///   "Q": 100.0,
///   "responsibilityLevel": "Нормальный"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub beam_ref: BeamRef,
    pub steel_ref: SteelRef,
    /// Design bending moment (kN·m)
    #[serde(rename = "M_max")]
    pub m_max: f64,
    /// Design shear force (kN)
    #[serde(rename = "Q", default)]
    pub q: f64,
    /// One of `Пониженный`, `Нормальный`, `Повышенный`
    pub responsibility_level: String,
}

impl ConnectionRequest {
    /// Check the design forces. Runs before any lookup or sizing.
    pub fn validate(&self) -> SpliceResult<()> {
        if !(self.m_max.is_finite() && self.m_max > 0.0) {
            return Err(SpliceError::invalid_moment(self.m_max));
        }
        if !(self.q.is_finite() && self.q >= 0.0) {
            return Err(SpliceError::invalid_input(
                "Q",
                self.q.to_string(),
                "Shear force must be finite and not negative",
            ));
        }
        Ok(())
    }
}

/// One cover plate with its bolt grid. All lengths in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateDesign {
    pub width: f64,
    pub length: f64,
    pub thickness: f64,
    pub diameter: f64,
    pub count: u32,
    pub rows: u32,
    pub bolts_per_row: u32,
    pub vertical_step: f64,
    pub horizontal_step: f64,
    pub edge_distance: f64,
    pub horizontal_edge_distance: f64,
    pub is_valid: bool,
}

/// Bolt center measured from the plate corner (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltPosition {
    /// Along the plate length
    pub along: f64,
    /// Across the plate width
    pub across: f64,
}

impl PlateDesign {
    fn new(plate: PlateGeometry, bolts: BoltArrangement) -> Self {
        PlateDesign {
            width: plate.width,
            length: plate.length,
            thickness: plate.thickness,
            diameter: bolts.diameter,
            count: bolts.count,
            rows: bolts.rows,
            bolts_per_row: bolts.bolts_per_row,
            vertical_step: bolts.vertical_step,
            horizontal_step: bolts.horizontal_step,
            edge_distance: bolts.edge_distance,
            horizontal_edge_distance: bolts.horizontal_edge_distance,
            is_valid: bolts.is_valid,
        }
    }

    /// Centers of all bolts, row by row.
    pub fn bolt_positions(&self) -> Vec<BoltPosition> {
        (0..self.rows)
            .flat_map(|row| {
                (0..self.bolts_per_row).map(move |col| BoltPosition {
                    along: self.edge_distance + col as f64 * self.vertical_step,
                    across: self.horizontal_edge_distance + row as f64 * self.horizontal_step,
                })
            })
            .collect()
    }
}

/// Sized splice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointResult {
    pub connection_type: ConnectionType,
    pub bolt_class: String,
    /// Flange plate (one per flange)
    pub upper: PlateDesign,
    /// Web plate (one per side of the web)
    pub side: PlateDesign,
    /// Resolved beam geometry
    pub beam_data: BeamSection,
    /// Resolved steel
    pub steel_data: SteelGrade,
}

impl JointResult {
    /// Bolts on one side of the splice: two flange plates and two web plates.
    pub fn bolts_per_side(&self) -> u32 {
        2 * self.upper.count + 2 * self.side.count
    }
}

/// Cover plate outline before bolting (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateGeometry {
    pub thickness: f64,
    pub width: f64,
    pub length: f64,
}

/// Flange plate outline for a beam.
pub fn flange_plate(beam: &BeamSection, settings: &DesignSettings) -> PlateGeometry {
    let rules = &settings.plates;
    let grid = settings.dimension_rounding_mm;
    PlateGeometry {
        thickness: ceil_mm((beam.t + rules.thickness_allowance_mm).max(rules.flange_min_thickness_mm)),
        width: round_up_to(beam.b, grid),
        length: round_up_to(rules.flange_length_factor * beam.h, grid),
    }
}

/// Web plate outline for a beam.
pub fn web_plate(beam: &BeamSection, settings: &DesignSettings) -> PlateGeometry {
    let rules = &settings.plates;
    let grid = settings.dimension_rounding_mm;
    PlateGeometry {
        thickness: ceil_mm((beam.s + rules.thickness_allowance_mm).max(rules.web_min_thickness_mm)),
        width: round_up_to(beam.web_height_mm(), grid),
        length: round_up_to(rules.web_length_factor * beam.b, grid),
    }
}

fn resolve_beam(beam_ref: &BeamRef, beams: &impl BeamLookup) -> SpliceResult<BeamSection> {
    let beam = match beam_ref {
        BeamRef::Catalog(id) => beams.find_beam(id).ok_or_else(|| SpliceError::beam_not_found(id))?,
        BeamRef::Custom(section) => *section,
    };
    beam.validate()?;
    Ok(beam)
}

fn resolve_steel(steel_ref: &SteelRef, steels: &impl SteelLookup) -> SpliceResult<SteelGrade> {
    let steel = match steel_ref {
        SteelRef::Catalog(grade) => steels.find_steel(grade).ok_or_else(|| SpliceError::steel_not_found(grade))?,
        SteelRef::Custom(grade) => *grade,
    };
    steel.validate()?;
    Ok(steel)
}

/// Size a splice with the default design settings.
pub fn size_joint(
    request: &ConnectionRequest,
    beams: &impl BeamLookup,
    steels: &impl SteelLookup,
) -> SpliceResult<JointResult> {
    size_joint_with(request, beams, steels, &DesignSettings::default())
}

/// Size a splice.
///
/// # Errors
///
/// * `InvalidMoment` - `M_max` not positive and finite (checked first)
/// * `BeamNotFound` / `SteelNotFound` - catalog miss
/// * `InvalidResponsibilityLevel` - unknown level
/// * `NoFeasibleBoltArrangement` - a plate cannot be bolted
/// * `InvalidInput` - negative shear, bad geometry or settings
pub fn size_joint_with(
    request: &ConnectionRequest,
    beams: &impl BeamLookup,
    steels: &impl SteelLookup,
    settings: &DesignSettings,
) -> SpliceResult<JointResult> {
    request.validate()?;
    settings.validate()?;

    let beam = resolve_beam(&request.beam_ref, beams)?;
    let steel = resolve_steel(&request.steel_ref, steels)?;
    let grade = request
        .responsibility_level
        .parse::<ResponsibilityLevel>()?
        .bolt_grade();
    let rules = settings.spacing_rules(steel.yield_strength);

    let upper_plate = flange_plate(&beam, settings);
    let side_plate = web_plate(&beam, settings);

    let flange_force = KiloNewtonMeters(request.m_max).over_lever_arm(Millimeters(beam.lever_arm_mm()));
    debug!(
        "beam h={} b={} s={} t={}, N={:.2} kN, Q={:.2} kN, bolts {}",
        beam.h, beam.b, beam.s, beam.t, flange_force.0, request.q, grade.class
    );

    let upper_bolts = select_bolts(
        &PlateLoad {
            force_kn: flange_force.0 / 2.0,
            thickness_mm: beam.t,
            length_mm: upper_plate.length,
            width_mm: upper_plate.width,
        },
        &grade,
        settings,
        &rules,
    )?;

    let side_bolts = select_bolts(
        &PlateLoad {
            force_kn: request.q / 2.0,
            thickness_mm: beam.s,
            length_mm: side_plate.length,
            width_mm: side_plate.width,
        },
        &grade,
        settings,
        &rules,
    )?;

    Ok(JointResult {
        connection_type: grade.connection_type(),
        bolt_class: grade.class,
        upper: PlateDesign::new(upper_plate, upper_bolts),
        side: PlateDesign::new(side_plate, side_bolts),
        beam_data: beam,
        steel_data: steel,
    })
}

//! High-Strength Bolt Grades
//!
//! Fixed mapping from the structure's responsibility level to the bolt
//! property class used in the splice, and the per-bolt capacity formulas
//! for slip-critical and bearing-type connections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SpliceError, SpliceResult};
use crate::settings::{BoltSize, CapacityFactors};

/// Structural responsibility (safety) class of the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponsibilityLevel {
    #[serde(rename = "Пониженный")]
    Reduced,
    #[serde(rename = "Нормальный")]
    Normal,
    #[serde(rename = "Повышенный")]
    Increased,
}

impl ResponsibilityLevel {
    /// All levels for UI selection
    pub const ALL: [ResponsibilityLevel; 3] = [
        ResponsibilityLevel::Reduced,
        ResponsibilityLevel::Normal,
        ResponsibilityLevel::Increased,
    ];

    /// Label as printed in design documents
    pub fn label(&self) -> &'static str {
        match self {
            ResponsibilityLevel::Reduced => "Пониженный",
            ResponsibilityLevel::Normal => "Нормальный",
            ResponsibilityLevel::Increased => "Повышенный",
        }
    }

    /// Bolt grade required for this level.
    pub fn bolt_grade(&self) -> BoltGrade {
        match self {
            ResponsibilityLevel::Reduced => BoltGrade {
                class: "8.8".to_string(),
                strength: 830.0,
                // Bearing-type, the capacity never reads it
                friction_coefficient: 0.0,
                is_friction: false,
                reliability: 1.25,
            },
            ResponsibilityLevel::Normal => BoltGrade {
                class: "10.9".to_string(),
                strength: 1040.0,
                friction_coefficient: 0.42,
                is_friction: true,
                reliability: 1.25,
            },
            ResponsibilityLevel::Increased => BoltGrade {
                class: "12.9".to_string(),
                strength: 1220.0,
                friction_coefficient: 0.42,
                is_friction: true,
                reliability: 1.25,
            },
        }
    }
}

impl FromStr for ResponsibilityLevel {
    type Err = SpliceError;

    /// Accepts the Russian labels and the English aliases
    /// `reduced` / `normal` / `increased` (case-insensitive).
    fn from_str(s: &str) -> SpliceResult<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "пониженный" | "reduced" => Ok(ResponsibilityLevel::Reduced),
            "нормальный" | "normal" => Ok(ResponsibilityLevel::Normal),
            "повышенный" | "increased" => Ok(ResponsibilityLevel::Increased),
            _ => Err(SpliceError::invalid_responsibility_level(trimmed)),
        }
    }
}

impl fmt::Display for ResponsibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Look up the bolt grade for a responsibility label.
///
/// Fails with `InvalidResponsibilityLevel` for anything outside the three levels.
pub fn bolt_grade_for(level: &str) -> SpliceResult<BoltGrade> {
    Ok(level.parse::<ResponsibilityLevel>()?.bolt_grade())
}

/// How the joint transfers load through the bolts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    /// Pretensioned bolts, load carried by friction between the plies
    #[serde(rename = "Фрикционное")]
    SlipCritical,
    /// Load carried by bolt shear and plate bearing
    #[serde(rename = "Срезное")]
    Bearing,
}

impl ConnectionType {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionType::SlipCritical => "Фрикционное",
            ConnectionType::Bearing => "Срезное",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bolt property class with the values the capacity formulas need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoltGrade {
    /// Property class label (e.g., "10.9")
    pub class: String,
    /// Nominal tensile strength (MPa)
    pub strength: f64,
    /// Slip factor of the faying surfaces (slip-critical only)
    pub friction_coefficient: f64,
    /// Slip-critical when true, bearing-type otherwise
    pub is_friction: bool,
    /// Reliability factor applied to the slip resistance
    pub reliability: f64,
}

impl BoltGrade {
    pub fn connection_type(&self) -> ConnectionType {
        if self.is_friction {
            ConnectionType::SlipCritical
        } else {
            ConnectionType::Bearing
        }
    }

    /// Design resistance of one bolt (kN).
    ///
    /// Slip-critical: `strength × μ × A / (1000 × γ)`.
    /// Bearing-type: `min(τ × A, σ × d × t)` with τ, σ from `factors`.
    pub fn bolt_capacity_kn(&self, size: &BoltSize, thickness_mm: f64, factors: &CapacityFactors) -> f64 {
        if self.is_friction {
            self.strength * self.friction_coefficient * size.area_mm2 / (1000.0 * self.reliability)
        } else {
            let shear = factors.bearing_shear_kn_per_mm2 * size.area_mm2;
            let crush = factors.bearing_crush_kn_per_mm2 * size.diameter_mm * thickness_mm;
            shear.min(crush)
        }
    }
}

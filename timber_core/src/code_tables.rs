//! # NBR 7190-1:2022 Code Tables
//!
//! Static coefficients and enumerated selectors from NBR 7190-1:2022.
//!
//! ## Overview
//!
//! Characteristic values are turned into design values by the modification
//! factor and the material safety factor of the failure mode:
//!
//! ```text
//! kmod  = kmod1 (load duration) × kmod2 (moisture class)
//! f_d   = kmod × f_k / γ_w
//! E0,ef = kmod × E0,mean
//! ```
//!
//! ## Factor Summary
//!
//! | Factor | Description                  | Values        |
//! |--------|------------------------------|---------------|
//! | kmod1  | Load duration (Table 4)      | 0.60 - 1.10   |
//! | kmod2  | Moisture class (Table 5)     | 0.70 - 1.00   |
//! | γ_w    | Material safety factor       | 1.4 / 1.8     |
//! | β_c    | Straightness (6.5.5)         | 0.2 / 0.1     |
//! | β_M    | Lateral stability (Table 8)  | 6.0 - 74.0    |
//! | φ      | Creep coefficient (Table 20) | 0.6 - 2.0     |
//!
//! Every selector parses from the English identifier or the Portuguese key
//! used on design forms (`permanente`, `classe_1`, `serrada`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// NBR Code Section References
// ============================================================================

/// Traceable references to NBR 7190-1:2022 for each check and factor.
pub mod nbr_ref {
    // Checks
    pub const MINIMUM_DIMENSIONS: &str = "NBR 7190-1 9.2.1";
    pub const TENSION_PARALLEL: &str = "NBR 7190-1 6.3.2";
    pub const TENSION_PERPENDICULAR: &str = "NBR 7190-1 6.3.3";
    pub const COMPRESSION_PARALLEL: &str = "NBR 7190-1 6.3.4 / 6.5.5";
    pub const COMPRESSION_PERPENDICULAR: &str = "NBR 7190-1 6.3.5";
    pub const BENDING_STRAIGHT: &str = "NBR 7190-1 6.3.6";
    pub const BENDING_OBLIQUE: &str = "NBR 7190-1 6.3.7";
    pub const BENDING_TENSION: &str = "NBR 7190-1 6.3.8";
    pub const BENDING_COMPRESSION: &str = "NBR 7190-1 6.3.9 / 6.5.5 Eq. 13";
    pub const SHEAR: &str = "NBR 7190-1 6.4.2";
    pub const LATERAL_STABILITY: &str = "NBR 7190-1 6.5.6";
    pub const DEFLECTION: &str = "NBR 7190-1 8.2";
}

// ============================================================================
// Numeric Constants
// ============================================================================

/// Threshold below which an action counts as zero, and the slack on every
/// `ratio ≤ 1` comparison.
pub const TOL: f64 = 1e-9;

/// Moment magnitude above which lateral bracing spacing L1 is required.
pub const MOMENT_TOL: f64 = 1e-6;

/// γ_wc, compression
pub const GAMMA_C: f64 = 1.4;
/// γ_wt, tension
pub const GAMMA_T: f64 = 1.4;
/// γ_wm, bending
pub const GAMMA_M: f64 = 1.4;
/// γ_wv, shear
pub const GAMMA_V: f64 = 1.8;

/// Upper bound on λ for the stability formulas.
pub const SLENDERNESS_LIMIT: f64 = 140.0;

/// λ_rel at or below which no buckling reduction applies.
pub const RELATIVE_SLENDERNESS_THRESHOLD: f64 = 0.3;

/// Final deflection limit L / 250 for simply supported members.
pub const DEFLECTION_LIMIT_DIVISOR: f64 = 250.0;

/// f_t90,d may not exceed this fraction of f_t0,d.
pub const TENSION_PERPENDICULAR_CAP: f64 = 0.06;

/// f_c90,d may not exceed this fraction of f_c0,d.
pub const COMPRESSION_PERPENDICULAR_CAP: f64 = 0.25;

/// Interaction coefficient k_M for bending about two axes.
///
/// 0.7 for rectangular sections, 1.0 for square ones.
pub fn k_m(width_mm: f64, height_mm: f64) -> f64 {
    if (width_mm - height_mm).abs() <= TOL {
        1.0
    } else {
        0.7
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-', ','], "_")
}

// ============================================================================
// Load Duration (kmod1)
// ============================================================================

/// Load-duration class per NBR 7190-1 Table 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum LoadDurationClass {
    /// Permanent: kmod1 = 0.60
    Permanent,
    /// Long term: kmod1 = 0.70
    #[default]
    Long,
    /// Medium term: kmod1 = 0.80
    Medium,
    /// Short term: kmod1 = 0.90
    Short,
    /// Instantaneous: kmod1 = 1.10
    Instantaneous,
}

impl LoadDurationClass {
    /// kmod1 value
    pub fn kmod1(&self) -> f64 {
        match self {
            LoadDurationClass::Permanent => 0.60,
            LoadDurationClass::Long => 0.70,
            LoadDurationClass::Medium => 0.80,
            LoadDurationClass::Short => 0.90,
            LoadDurationClass::Instantaneous => 1.10,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "permanent" | "permanente" => Ok(LoadDurationClass::Permanent),
            "long" | "long_term" | "longa" | "longa_duracao" => Ok(LoadDurationClass::Long),
            "medium" | "medium_term" | "media" | "media_duracao" => Ok(LoadDurationClass::Medium),
            "short" | "short_term" | "curta" | "curta_duracao" => Ok(LoadDurationClass::Short),
            "instantaneous" | "instantanea" => Ok(LoadDurationClass::Instantaneous),
            _ => Err(CalcError::unknown_modifier("load duration", s)),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadDurationClass::Permanent => "Permanent (0.60)",
            LoadDurationClass::Long => "Long term (0.70)",
            LoadDurationClass::Medium => "Medium term (0.80)",
            LoadDurationClass::Short => "Short term (0.90)",
            LoadDurationClass::Instantaneous => "Instantaneous (1.10)",
        }
    }
}

impl TryFrom<String> for LoadDurationClass {
    type Error = CalcError;
    fn try_from(s: String) -> CalcResult<Self> {
        Self::from_str_flexible(&s)
    }
}

impl fmt::Display for LoadDurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Moisture Class (kmod2, creep)
// ============================================================================

/// Moisture class per NBR 7190-1 Table 5, serialized as its number 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "ModifierKey", into = "u8")]
pub enum MoistureClass {
    /// Class 1 (U_eq ≤ 12%): kmod2 = 1.00
    #[default]
    Class1,
    /// Class 2 (U_eq ≤ 15%): kmod2 = 0.90
    Class2,
    /// Class 3 (U_eq ≤ 18%): kmod2 = 0.80
    Class3,
    /// Class 4 (U_eq ≥ 25%): kmod2 = 0.70
    Class4,
}

/// Raw moisture-class key as it may appear in a request: `2` or `"classe_2"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ModifierKey {
    Number(u8),
    Text(String),
}

impl MoistureClass {
    /// Creep coefficient φ (Table 20)
    ///
    /// Sawn, round, glued-laminated and LVL timber share one row.
    pub fn creep_coefficient(&self) -> f64 {
        match self {
            MoistureClass::Class1 => 0.6,
            MoistureClass::Class2 | MoistureClass::Class3 => 0.8,
            MoistureClass::Class4 => 2.0,
        }
    }

    /// kmod2 value
    pub fn kmod2(&self) -> f64 {
        match self {
            MoistureClass::Class1 => 1.00,
            MoistureClass::Class2 => 0.90,
            MoistureClass::Class3 => 0.80,
            MoistureClass::Class4 => 0.70,
        }
    }

    /// Class number 1-4
    pub fn number(&self) -> u8 {
        match self {
            MoistureClass::Class1 => 1,
            MoistureClass::Class2 => 2,
            MoistureClass::Class3 => 3,
            MoistureClass::Class4 => 4,
        }
    }

    /// Look up by class number
    pub fn from_number(n: u8) -> CalcResult<Self> {
        match n {
            1 => Ok(MoistureClass::Class1),
            2 => Ok(MoistureClass::Class2),
            3 => Ok(MoistureClass::Class3),
            4 => Ok(MoistureClass::Class4),
            _ => Err(CalcError::unknown_modifier("moisture", n.to_string())),
        }
    }

    /// Parse from `"2"`, `"class_2"` or `"classe_2"`
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key = normalize(s);
        let digits = key
            .trim_start_matches("classe")
            .trim_start_matches("class")
            .trim_start_matches('_');
        match digits.parse::<u8>() {
            Ok(n) => Self::from_number(n).map_err(|_| CalcError::unknown_modifier("moisture", s)),
            Err(_) => Err(CalcError::unknown_modifier("moisture", s)),
        }
    }
}

impl TryFrom<ModifierKey> for MoistureClass {
    type Error = CalcError;
    fn try_from(key: ModifierKey) -> CalcResult<Self> {
        match key {
            ModifierKey::Number(n) => Self::from_number(n),
            ModifierKey::Text(s) => Self::from_str_flexible(&s),
        }
    }
}

impl From<MoistureClass> for u8 {
    fn from(class: MoistureClass) -> u8 {
        class.number()
    }
}

impl fmt::Display for MoistureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moisture class {} ({:.2})", self.number(), self.kmod2())
    }
}

// ============================================================================
// Wood Type (β_c, minimum eccentricity)
// ============================================================================

/// Product type as far as the stability rules distinguish it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum WoodType {
    /// Sawn or round timber: β_c = 0.2
    #[default]
    Sawn,
    /// Glued-laminated timber or LVL: β_c = 0.1
    GluedLaminated,
}

impl WoodType {
    /// Straightness factor β_c used in k_c
    pub fn beta_c(&self) -> f64 {
        match self {
            WoodType::Sawn => 0.2,
            WoodType::GluedLaminated => 0.1,
        }
    }

    /// Minimum eccentricity e_min = L / divisor
    pub fn min_eccentricity_divisor(&self) -> f64 {
        match self {
            WoodType::Sawn => 300.0,
            WoodType::GluedLaminated => 500.0,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "sawn" | "round" | "serrada" | "rolica" | "0.2" => Ok(WoodType::Sawn),
            "glued_laminated" | "glulam" | "lvl" | "mlc" | "0.1" => Ok(WoodType::GluedLaminated),
            _ => Err(CalcError::invalid_input("wood_type", s, "expected sawn or glued_laminated")),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WoodType::Sawn => "Sawn / round (β_c = 0.2)",
            WoodType::GluedLaminated => "Glued-laminated / LVL (β_c = 0.1)",
        }
    }
}

impl TryFrom<String> for WoodType {
    type Error = CalcError;
    fn try_from(s: String) -> CalcResult<Self> {
        Self::from_str_flexible(&s)
    }
}

// ============================================================================
// Piece Category (minimum dimensions)
// ============================================================================

/// Role of the member, which sets the minimum section per 9.2.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PieceCategory {
    #[default]
    PrincipalIsolated,
    SecondaryIsolated,
    PrincipalMultiple,
    SecondaryMultiple,
}

impl PieceCategory {
    /// Minimum area in mm²
    pub fn min_area_mm2(&self) -> f64 {
        match self {
            PieceCategory::PrincipalIsolated => 5000.0,
            PieceCategory::SecondaryIsolated => 1800.0,
            PieceCategory::PrincipalMultiple => 3500.0,
            PieceCategory::SecondaryMultiple => 1800.0,
        }
    }

    /// Minimum thickness min(b, h) in mm
    pub fn min_thickness_mm(&self) -> f64 {
        match self {
            PieceCategory::PrincipalIsolated => 50.0,
            PieceCategory::SecondaryIsolated => 25.0,
            PieceCategory::PrincipalMultiple => 25.0,
            PieceCategory::SecondaryMultiple => 18.0,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "principal_isolated" | "principal_isolada" => Ok(PieceCategory::PrincipalIsolated),
            "secondary_isolated" | "secundaria_isolada" => Ok(PieceCategory::SecondaryIsolated),
            "principal_multiple" | "principal_multipla" => Ok(PieceCategory::PrincipalMultiple),
            "secondary_multiple" | "secundaria_multipla" => Ok(PieceCategory::SecondaryMultiple),
            _ => Err(CalcError::invalid_input("piece_category", s, "unknown piece category")),
        }
    }
}

impl TryFrom<String> for PieceCategory {
    type Error = CalcError;
    fn try_from(s: String) -> CalcResult<Self> {
        Self::from_str_flexible(&s)
    }
}

// ============================================================================
// β_M (Table 8)
// ============================================================================

/// β_M for h/b = 1, 2, ..., 20 (γ_f = 1.4, β_E = 4).
const BETA_M_TABLE: [f64; 20] = [
    6.0, 8.8, 12.3, 15.9, 19.5, 23.1, 26.7, 30.3, 34.0, 37.6, 41.2, 44.8, 48.5, 52.1, 55.8, 59.4,
    63.0, 66.7, 70.3, 74.0,
];

/// β_M for an aspect ratio h/b, interpolated linearly and clamped to the
/// table ends.
pub fn beta_m(h_over_b: f64) -> f64 {
    let last = BETA_M_TABLE.len() - 1;
    if h_over_b <= 1.0 {
        return BETA_M_TABLE[0];
    }
    if h_over_b >= BETA_M_TABLE.len() as f64 {
        return BETA_M_TABLE[last];
    }
    let lower = h_over_b.floor();
    let idx = (lower as usize - 1).min(last - 1);
    let frac = h_over_b - lower;
    BETA_M_TABLE[idx] + frac * (BETA_M_TABLE[idx + 1] - BETA_M_TABLE[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmod_tables() {
        assert_eq!(LoadDurationClass::Long.kmod1(), 0.70);
        assert_eq!(MoistureClass::Class2.kmod2(), 0.90);
        let kmod = LoadDurationClass::Long.kmod1() * MoistureClass::Class1.kmod2();
        assert!((kmod - 0.70).abs() < 1e-12);
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(
            LoadDurationClass::from_str_flexible("Longa duracao").unwrap(),
            LoadDurationClass::Long
        );
        assert_eq!(
            LoadDurationClass::from_str_flexible("instantanea").unwrap(),
            LoadDurationClass::Instantaneous
        );
        let err = LoadDurationClass::from_str_flexible("forever").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MODIFIER");
    }

    #[test]
    fn test_moisture_parsing() {
        assert_eq!(MoistureClass::from_str_flexible("classe_3").unwrap(), MoistureClass::Class3);
        assert_eq!(MoistureClass::from_str_flexible("4").unwrap(), MoistureClass::Class4);
        assert!(MoistureClass::from_str_flexible("classe_5").is_err());
        assert!(MoistureClass::from_number(0).is_err());
    }

    #[test]
    fn test_moisture_serde_accepts_number_and_text() {
        let a: MoistureClass = serde_json::from_str("2").unwrap();
        let b: MoistureClass = serde_json::from_str("\"classe_2\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "2");
        assert!(serde_json::from_str::<MoistureClass>("7").is_err());
    }

    #[test]
    fn test_creep_follows_moisture() {
        assert_eq!(MoistureClass::Class1.creep_coefficient(), 0.6);
        assert_eq!(MoistureClass::Class2.creep_coefficient(), 0.8);
        assert_eq!(MoistureClass::Class3.creep_coefficient(), 0.8);
        assert_eq!(MoistureClass::Class4.creep_coefficient(), 2.0);
    }

    #[test]
    fn test_duration_serde() {
        let d: LoadDurationClass = serde_json::from_str("\"permanente\"").unwrap();
        assert_eq!(d, LoadDurationClass::Permanent);
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"permanent\"");
    }

    #[test]
    fn test_wood_type_factors() {
        assert_eq!(WoodType::Sawn.beta_c(), 0.2);
        assert_eq!(WoodType::GluedLaminated.beta_c(), 0.1);
        assert_eq!(WoodType::from_str_flexible("mlc").unwrap(), WoodType::GluedLaminated);
    }

    #[test]
    fn test_piece_category_limits() {
        let cat = PieceCategory::from_str_flexible("secundaria_multipla").unwrap();
        assert_eq!(cat.min_thickness_mm(), 18.0);
        assert_eq!(cat.min_area_mm2(), 1800.0);
        assert_eq!(PieceCategory::default().min_area_mm2(), 5000.0);
    }

    #[test]
    fn test_beta_m_interpolation() {
        assert_eq!(beta_m(0.5), 6.0);
        assert_eq!(beta_m(1.0), 6.0);
        assert!((beta_m(2.0) - 8.8).abs() < 1e-12);
        // 140 / 60 = 2.333..: 8.8 + (1/3)(12.3 - 8.8)
        assert!((beta_m(140.0 / 60.0) - (8.8 + 3.5 / 3.0)).abs() < 1e-9);
        assert!((beta_m(19.5) - 72.15).abs() < 1e-9);
        assert_eq!(beta_m(20.0), 74.0);
        assert_eq!(beta_m(35.0), 74.0);
    }

    #[test]
    fn test_k_m() {
        assert_eq!(k_m(60.0, 140.0), 0.7);
        assert_eq!(k_m(100.0, 100.0), 1.0);
    }
}

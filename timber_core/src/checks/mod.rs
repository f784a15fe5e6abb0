//! # Verification Checks
//!
//! Every NBR 7190-1 check is a variant of [`CheckId`]. Each check follows the
//! pattern:
//!
//! - an applicability rule that only looks at the request (so a check that
//!   does not apply never touches material data and never errors)
//! - an evaluation `fn(&CheckContext) -> CalcResult<VerificationResult>`
//! - errors raised during evaluation become that check's `Error` verdict
//!
//! ## Available Checks
//!
//! | Id                          | Module            | Ratio |
//! |-----------------------------|-------------------|-------|
//! | `minimum_dimensions`        | [`dimensions`]    | none  |
//! | `tension_parallel`          | [`axial`]         | N / (f_t0d A) |
//! | `tension_perpendicular`     | [`axial`]         | N / (f_t90d A) |
//! | `compression_parallel`      | [`compression`]   | resistance + stability |
//! | `compression_perpendicular` | [`axial`]         | N / (α_n f_c90d A) |
//! | `bending_straight`          | [`bending`]       | M / (f_md W), per axis |
//! | `bending_oblique`           | [`bending`]       | r_x + k_M r_y |
//! | `bending_tension`           | [`bending`]       | r_N + r_x + k_M r_y |
//! | `bending_compression`       | [`compression`]   | resistance + stability |
//! | `shear`                     | [`shear`]         | V / (f_vd 2A/3) |
//! | `lateral_stability`         | [`lateral`]       | σ_cd / σ_cd,adm |
//! | `deflection`                | [`deflection`]    | δ / (L/250) |

pub mod axial;
pub mod bending;
pub mod compression;
pub mod deflection;
pub mod dimensions;
pub mod lateral;
pub mod shear;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code_tables::{nbr_ref, TOL};
use crate::equations::GeometricProperties;
use crate::errors::{CalcError, CalcResult};
use crate::input::InputSpecification;
use crate::materials::MaterialProperties;

pub use axial::AxialDetails;
pub use bending::{BendingDetails, InteractionDetails};
pub use compression::{BendingCompressionDetails, CompressionDetails, EccentricityDetails, SlendernessDetails};
pub use deflection::{DeflectionCombination, DeflectionDetails};
pub use dimensions::DimensionDetails;
pub use lateral::LateralDetails;

// ============================================================================
// Check Registry
// ============================================================================

/// Identifier of a verification check, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CheckId {
    MinimumDimensions,
    TensionParallel,
    TensionPerpendicular,
    CompressionParallel,
    CompressionPerpendicular,
    BendingStraight,
    BendingOblique,
    BendingTension,
    BendingCompression,
    Shear,
    LateralStability,
    Deflection,
}

impl CheckId {
    /// All checks in registry order
    pub const ALL: [CheckId; 12] = [
        CheckId::MinimumDimensions,
        CheckId::TensionParallel,
        CheckId::TensionPerpendicular,
        CheckId::CompressionParallel,
        CheckId::CompressionPerpendicular,
        CheckId::BendingStraight,
        CheckId::BendingOblique,
        CheckId::BendingTension,
        CheckId::BendingCompression,
        CheckId::Shear,
        CheckId::LateralStability,
        CheckId::Deflection,
    ];

    /// Snake-case identifier
    pub fn code(&self) -> &'static str {
        match self {
            CheckId::MinimumDimensions => "minimum_dimensions",
            CheckId::TensionParallel => "tension_parallel",
            CheckId::TensionPerpendicular => "tension_perpendicular",
            CheckId::CompressionParallel => "compression_parallel",
            CheckId::CompressionPerpendicular => "compression_perpendicular",
            CheckId::BendingStraight => "bending_straight",
            CheckId::BendingOblique => "bending_oblique",
            CheckId::BendingTension => "bending_tension",
            CheckId::BendingCompression => "bending_compression",
            CheckId::Shear => "shear",
            CheckId::LateralStability => "lateral_stability",
            CheckId::Deflection => "deflection",
        }
    }

    /// Clause of NBR 7190-1 the check implements
    pub fn code_reference(&self) -> &'static str {
        match self {
            CheckId::MinimumDimensions => nbr_ref::MINIMUM_DIMENSIONS,
            CheckId::TensionParallel => nbr_ref::TENSION_PARALLEL,
            CheckId::TensionPerpendicular => nbr_ref::TENSION_PERPENDICULAR,
            CheckId::CompressionParallel => nbr_ref::COMPRESSION_PARALLEL,
            CheckId::CompressionPerpendicular => nbr_ref::COMPRESSION_PERPENDICULAR,
            CheckId::BendingStraight => nbr_ref::BENDING_STRAIGHT,
            CheckId::BendingOblique => nbr_ref::BENDING_OBLIQUE,
            CheckId::BendingTension => nbr_ref::BENDING_TENSION,
            CheckId::BendingCompression => nbr_ref::BENDING_COMPRESSION,
            CheckId::Shear => nbr_ref::SHEAR,
            CheckId::LateralStability => nbr_ref::LATERAL_STABILITY,
            CheckId::Deflection => nbr_ref::DEFLECTION,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckId::MinimumDimensions => "Minimum dimensions",
            CheckId::TensionParallel => "Tension parallel to grain",
            CheckId::TensionPerpendicular => "Tension perpendicular to grain",
            CheckId::CompressionParallel => "Compression parallel to grain",
            CheckId::CompressionPerpendicular => "Compression perpendicular to grain",
            CheckId::BendingStraight => "Straight bending",
            CheckId::BendingOblique => "Oblique bending",
            CheckId::BendingTension => "Bending with tension",
            CheckId::BendingCompression => "Bending with compression",
            CheckId::Shear => "Shear",
            CheckId::LateralStability => "Lateral stability",
            CheckId::Deflection => "Deflection (ELS)",
        }
    }

    /// Parse from the identifier or the Portuguese form key
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "minimum_dimensions" | "dimensoes" | "dimensoes_minimas" => Ok(CheckId::MinimumDimensions),
            "tension_parallel" | "tracao_simples" => Ok(CheckId::TensionParallel),
            "tension_perpendicular" | "tracao_perpendicular" => Ok(CheckId::TensionPerpendicular),
            "compression_parallel" | "compressao_simples" | "compressao_simples_resistencia" => {
                Ok(CheckId::CompressionParallel)
            }
            "compression_perpendicular" | "compressao_perpendicular" => Ok(CheckId::CompressionPerpendicular),
            "bending_straight" | "flexao_simples_reta" => Ok(CheckId::BendingStraight),
            "bending_oblique" | "flexao_obliqua" => Ok(CheckId::BendingOblique),
            "bending_tension" | "flexotracao" => Ok(CheckId::BendingTension),
            "bending_compression" | "flexocompressao" => Ok(CheckId::BendingCompression),
            "shear" | "cisalhamento" => Ok(CheckId::Shear),
            "lateral_stability" | "estabilidade_lateral" => Ok(CheckId::LateralStability),
            "deflection" | "flechas_els" | "flechas" => Ok(CheckId::Deflection),
            _ => Err(CalcError::invalid_input("selected_checks", s, "unknown check identifier")),
        }
    }

    /// Decide applicability from the request alone
    pub fn is_applicable(&self, input: &InputSpecification) -> bool {
        match self {
            CheckId::MinimumDimensions => true,
            CheckId::TensionParallel => axial::tension_parallel_applies(input),
            CheckId::TensionPerpendicular => axial::tension_perpendicular_applies(input),
            CheckId::CompressionParallel => compression::compression_parallel_applies(input),
            CheckId::CompressionPerpendicular => axial::compression_perpendicular_applies(input),
            CheckId::BendingStraight => bending::bending_straight_applies(input),
            CheckId::BendingOblique => bending::bending_oblique_applies(input),
            CheckId::BendingTension => bending::bending_tension_applies(input),
            CheckId::BendingCompression => compression::bending_compression_applies(input),
            CheckId::Shear => shear::shear_applies(input),
            CheckId::LateralStability => lateral::lateral_stability_applies(input),
            CheckId::Deflection => deflection::deflection_applies(input),
        }
    }

    /// Evaluate this check. Never fails: errors become an `Error` verdict.
    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> VerificationResult {
        if !self.is_applicable(ctx.input) {
            return VerificationResult::not_applicable(*self);
        }

        let outcome = match self {
            CheckId::MinimumDimensions => dimensions::minimum_dimensions(ctx),
            CheckId::TensionParallel => axial::tension_parallel(ctx),
            CheckId::TensionPerpendicular => axial::tension_perpendicular(ctx),
            CheckId::CompressionParallel => compression::compression_parallel(ctx),
            CheckId::CompressionPerpendicular => axial::compression_perpendicular(ctx),
            CheckId::BendingStraight => bending::bending_straight(ctx),
            CheckId::BendingOblique => bending::bending_oblique(ctx),
            CheckId::BendingTension => bending::bending_tension(ctx),
            CheckId::BendingCompression => compression::bending_compression(ctx),
            CheckId::Shear => shear::shear(ctx),
            CheckId::LateralStability => lateral::lateral_stability(ctx),
            CheckId::Deflection => deflection::deflection(ctx),
        };

        match outcome {
            Ok(result) => {
                tracing::debug!(check = self.code(), verdict = ?result.verdict, ratio = ?result.ratio, "check evaluated");
                result
            }
            Err(error) => {
                tracing::warn!(check = self.code(), code = error.error_code(), %error, "check ended in error");
                VerificationResult::error(*self, &error)
            }
        }
    }
}

impl TryFrom<String> for CheckId {
    type Error = CalcError;
    fn try_from(s: String) -> CalcResult<Self> {
        Self::from_str_flexible(&s)
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Verdicts and Ratios
// ============================================================================

/// Outcome of a check or sub-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Failed,
    /// Dispensed by a code exemption; no ratio computed
    Exempt,
    NotApplicable,
    Error,
}

impl Verdict {
    /// Failed and Error reject a member; every other verdict does not
    pub fn rejects(&self) -> bool {
        matches!(self, Verdict::Failed | Verdict::Error)
    }
}

/// Demand / capacity ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ratio {
    Finite(f64),
    /// Demand overflowed against a positive capacity
    Infinite,
    /// Capacity zero, negative or not finite
    Indeterminate,
}

impl Ratio {
    /// Ratio of a demand to a resisting capacity.
    ///
    /// A capacity that is not strictly positive and finite is an error.
    pub fn of(check: CheckId, demand: f64, capacity: f64) -> CalcResult<Ratio> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(CalcError::indeterminate(
                check.code(),
                format!("resisting capacity {capacity} is not positive"),
            ));
        }
        Ratio::from_value(check, demand.abs() / capacity)
    }

    /// Wrap an already computed ratio or interaction sum
    pub fn from_value(check: CheckId, value: f64) -> CalcResult<Ratio> {
        if value.is_nan() {
            Err(CalcError::indeterminate(check.code(), "ratio is not a number"))
        } else if value.is_infinite() {
            Ok(Ratio::Infinite)
        } else {
            Ok(Ratio::Finite(value))
        }
    }

    /// Ratio carried by a check that errored: `Indeterminate` when the
    /// error came from an undefined division, none otherwise
    pub fn for_error(error: &CalcError) -> Option<Ratio> {
        matches!(error, CalcError::ArithmeticIndeterminate { .. }).then_some(Ratio::Indeterminate)
    }

    /// Finite value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Finite(v) => Some(*v),
            _ => None,
        }
    }

    /// Approved iff ratio ≤ 1 + TOL
    pub fn verdict(&self) -> Verdict {
        match self {
            Ratio::Finite(v) if *v <= 1.0 + TOL => Verdict::Approved,
            Ratio::Finite(_) | Ratio::Infinite => Verdict::Failed,
            Ratio::Indeterminate => Verdict::Error,
        }
    }

    /// Governing (larger) of two ratios
    pub fn governing(self, other: Ratio) -> Ratio {
        match (self, other) {
            (Ratio::Indeterminate, _) | (_, Ratio::Indeterminate) => Ratio::Indeterminate,
            (Ratio::Infinite, _) | (_, Ratio::Infinite) => Ratio::Infinite,
            (Ratio::Finite(a), Ratio::Finite(b)) => Ratio::Finite(a.max(b)),
        }
    }
}

/// A component of a composite check (axis of bending, resistance vs.
/// stability, one load combination)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCheck {
    pub applicable: bool,
    pub verdict: Verdict,
    pub ratio: Option<Ratio>,
    pub diagnostic: Option<String>,
}

impl SubCheck {
    /// Sub-check that does not apply
    pub fn not_applicable() -> Self {
        SubCheck {
            applicable: false,
            verdict: Verdict::NotApplicable,
            ratio: None,
            diagnostic: None,
        }
    }

    /// Sub-check from a computed ratio, or the error that prevented it
    pub fn from_ratio(ratio: CalcResult<Ratio>) -> Self {
        match ratio {
            Ok(r) => SubCheck {
                applicable: true,
                verdict: r.verdict(),
                ratio: Some(r),
                diagnostic: None,
            },
            Err(e) => SubCheck {
                applicable: true,
                verdict: Verdict::Error,
                ratio: Ratio::for_error(&e),
                diagnostic: Some(e.to_string()),
            },
        }
    }
}

/// Verdict and governing ratio of a composite check.
///
/// Error if any sub-check errors; otherwise Approved iff every applicable
/// sub-check is approved; NotApplicable when none applies.
pub fn combine(subs: &[&SubCheck]) -> (Verdict, Option<Ratio>, Option<String>) {
    let applicable: Vec<&&SubCheck> = subs.iter().filter(|s| s.applicable).collect();
    if applicable.is_empty() {
        return (Verdict::NotApplicable, None, None);
    }

    let ratio = applicable
        .iter()
        .filter_map(|s| s.ratio)
        .reduce(Ratio::governing);

    if let Some(failed) = applicable.iter().find(|s| s.verdict == Verdict::Error) {
        return (Verdict::Error, ratio, failed.diagnostic.clone());
    }
    if applicable.iter().all(|s| s.verdict == Verdict::Approved) {
        (Verdict::Approved, ratio, None)
    } else {
        (Verdict::Failed, ratio, None)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Check-specific quantities behind a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckDetails {
    None,
    Dimensions(DimensionDetails),
    Axial(AxialDetails),
    Bending(BendingDetails),
    Interaction(InteractionDetails),
    Compression(CompressionDetails),
    BendingCompression(BendingCompressionDetails),
    Lateral(LateralDetails),
    Deflection(DeflectionDetails),
}

/// Result of one check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "check": "shear",
///   "applicable": true,
///   "verdict": "approved",
///   "ratio": { "finite": 0.1488 },
///   "details": { "kind": "axial", "demand": 5000.0, "capacity": 33600.0, "design_strength_mpa": 6.0, "area_mm2": 5600.0 },
///   "diagnostic": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub check: CheckId,
    pub applicable: bool,
    pub verdict: Verdict,
    pub ratio: Option<Ratio>,
    pub details: CheckDetails,
    /// Present only for `Error` verdicts
    pub diagnostic: Option<String>,
}

impl VerificationResult {
    /// Result of a check that does not apply
    pub fn not_applicable(check: CheckId) -> Self {
        VerificationResult {
            check,
            applicable: false,
            verdict: Verdict::NotApplicable,
            ratio: None,
            details: CheckDetails::None,
            diagnostic: None,
        }
    }

    /// Result of a check that could not be evaluated
    pub fn error(check: CheckId, error: &CalcError) -> Self {
        VerificationResult {
            check,
            applicable: true,
            verdict: Verdict::Error,
            ratio: Ratio::for_error(error),
            details: CheckDetails::None,
            diagnostic: Some(error.to_string()),
        }
    }

    /// Single-ratio result
    pub fn from_ratio(check: CheckId, ratio: Ratio, details: CheckDetails) -> Self {
        VerificationResult {
            check,
            applicable: true,
            verdict: ratio.verdict(),
            ratio: Some(ratio),
            details,
            diagnostic: None,
        }
    }

    /// Composite result from its sub-checks
    pub fn from_subchecks(check: CheckId, subs: &[&SubCheck], details: CheckDetails) -> Self {
        let (verdict, ratio, diagnostic) = combine(subs);
        VerificationResult {
            check,
            applicable: verdict != Verdict::NotApplicable,
            verdict,
            ratio,
            details,
            diagnostic,
        }
    }

    /// Check passed (or was exempted)
    pub fn passes(&self) -> bool {
        matches!(self.verdict, Verdict::Approved | Verdict::Exempt)
    }
}

// ============================================================================
// Evaluation Context
// ============================================================================

/// Everything a check may read: the request plus the derived section and
/// material. Derivation errors are kept so only checks that need the failed
/// quantity report them.
#[derive(Debug, Clone)]
pub struct CheckContext<'a> {
    pub input: &'a InputSpecification,
    geometry: CalcResult<GeometricProperties>,
    material: CalcResult<MaterialProperties>,
}

impl<'a> CheckContext<'a> {
    /// Derive section and material properties for a request
    pub fn new(input: &'a InputSpecification) -> Self {
        let geometry = GeometricProperties::from_dimensions(input.geometry.width_mm, input.geometry.height_mm);
        let material = MaterialProperties::resolve(&input.material);
        CheckContext { input, geometry, material }
    }

    /// Section properties, or the error that prevented them
    pub fn geometry(&self) -> CalcResult<&GeometricProperties> {
        self.geometry.as_ref().map_err(Clone::clone)
    }

    /// Material properties, or the error that prevented them
    pub fn material(&self) -> CalcResult<&MaterialProperties> {
        self.material.as_ref().map_err(Clone::clone)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::code_tables::{LoadDurationClass, MoistureClass, PieceCategory};
    use crate::input::{DesignActions, InputSpecification, MemberGeometry, StabilityParameters};
    use crate::materials::{MaterialSelection, TableOrigin};

    use super::CheckId;

    /// C24, 60 × 140 mm, 3 m, long term, moisture class 1, every check selected
    pub fn c24_60x140() -> InputSpecification {
        InputSpecification {
            label: "test".to_string(),
            material: MaterialSelection {
                origin: TableOrigin::Structural,
                class: "C24".to_string(),
                load_duration: LoadDurationClass::Long,
                moisture: MoistureClass::Class1,
            },
            geometry: MemberGeometry {
                width_mm: 60.0,
                height_mm: 140.0,
                length_m: 3.0,
                piece_category: PieceCategory::PrincipalIsolated,
            },
            actions: DesignActions::default(),
            stability: StabilityParameters::default(),
            serviceability: None,
            selected_checks: CheckId::ALL.into_iter().collect(),
        }
    }

    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }
}

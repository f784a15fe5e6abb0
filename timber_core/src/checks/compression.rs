//! Compression parallel to grain, alone and combined with bending.
//!
//! Both checks are composites of a resistance and a stability sub-check.
//!
//! ```text
//! compression_parallel
//!   resistance:  N / (f_c0,d A)
//!   stability:   N / (min(k_cx, k_cy) f_c0,d A)
//!
//! bending_compression, r_N = σ_N / f_c0,d
//!   resistance:  max(r_N² + r_x + k_M r_y,  r_N² + k_M r_x + r_y)
//!   stability:   max(r_N / k_cx + r_x + k_M r_y,  r_N / k_cy + k_M r_x + r_y)
//! ```
//!
//! Stability is outside the code's range when λ_max > 140. Without applied
//! moments, bending_compression uses the minimum eccentricity moment
//! N × L / 300 (sawn) or N × L / 500 (glued-laminated) about both axes.

use serde::{Deserialize, Serialize};

use crate::code_tables::{k_m, SLENDERNESS_LIMIT, TOL};
use crate::equations::section::GeometricProperties;
use crate::equations::stability::min_eccentricity_moment;
use crate::equations::AxisSlenderness;
use crate::errors::{CalcError, CalcResult};
use crate::input::InputSpecification;
use crate::materials::MaterialProperties;

use super::bending::utilization;
use super::{CheckContext, CheckDetails, CheckId, Ratio, SubCheck, VerificationResult};

/// λ, λ_rel and k_c about both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlendernessDetails {
    pub x: AxisSlenderness,
    pub y: AxisSlenderness,
    pub lambda_max: f64,
    pub beta_c: f64,
    /// Second-order amplification 1 / k_cx of the axial term
    pub amplification_x: f64,
    /// Second-order amplification 1 / k_cy of the axial term
    pub amplification_y: f64,
}

impl SlendernessDetails {
    fn evaluate(input: &InputSpecification, geometry: &GeometricProperties, material: &MaterialProperties) -> Self {
        let length = input.length_mm().0;
        let beta_c = input.stability.wood_type.beta_c();
        let f_c0k = material.characteristic.f_c0k_mpa;
        let e_0_05 = material.characteristic.e_0_05_mpa;

        let x = AxisSlenderness::evaluate(input.stability.ke_x, length, geometry.r_x_mm, f_c0k, e_0_05, beta_c);
        let y = AxisSlenderness::evaluate(input.stability.ke_y, length, geometry.r_y_mm, f_c0k, e_0_05, beta_c);

        SlendernessDetails {
            x,
            y,
            lambda_max: x.lambda.max(y.lambda),
            beta_c,
            amplification_x: x.amplification(),
            amplification_y: y.amplification(),
        }
    }

    /// Smaller of the two buckling factors
    pub fn kc_min(&self) -> f64 {
        self.x.kc.min(self.y.kc)
    }

    fn within_range(&self) -> CalcResult<()> {
        if self.lambda_max > SLENDERNESS_LIMIT {
            return Err(CalcError::out_of_range("lambda_max", self.lambda_max, SLENDERNESS_LIMIT));
        }
        Ok(())
    }
}

/// Compression parallel to grain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionDetails {
    /// f_c0,d (MPa)
    pub design_strength_mpa: f64,
    /// σ_Nc,d (MPa)
    pub axial_stress_mpa: f64,
    /// f_c0,d A (N)
    pub resistance_capacity_n: f64,
    /// k_c,min f_c0,d A (N)
    pub stability_capacity_n: f64,
    pub slenderness: SlendernessDetails,
    pub resistance: SubCheck,
    pub stability: SubCheck,
}

/// Moment from the minimum eccentricity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EccentricityDetails {
    /// L / divisor
    pub divisor: f64,
    pub eccentricity_mm: f64,
    /// N × e_min, applied about both axes
    pub moment_nmm: f64,
}

/// Bending with compression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingCompressionDetails {
    /// Present when no moment was applied
    pub min_eccentricity: Option<EccentricityDetails>,
    pub moment_x_nmm: f64,
    pub moment_y_nmm: f64,
    pub k_m: f64,
    /// σ_N / f_c0,d
    pub axial_term: f64,
    pub x_term: f64,
    pub y_term: f64,
    pub slenderness: SlendernessDetails,
    pub resistance: SubCheck,
    pub stability: SubCheck,
}

pub(crate) fn compression_parallel_applies(input: &InputSpecification) -> bool {
    input.actions.compression_n > TOL
}

/// Any compression makes bending_compression applicable: without applied
/// moments the minimum eccentricity supplies them.
pub(crate) fn bending_compression_applies(input: &InputSpecification) -> bool {
    input.actions.compression_n > TOL
}

/// Compression parallel to grain: resistance and buckling
pub fn compression_parallel(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    let check = CheckId::CompressionParallel;
    let n = ctx.input.compression();

    let slenderness = SlendernessDetails::evaluate(ctx.input, geometry, material);
    let resistance_capacity = material.f_c0d_mpa * geometry.area_mm2;
    let stability_capacity = slenderness.kc_min() * resistance_capacity;

    let resistance = SubCheck::from_ratio(Ratio::of(check, n.0, resistance_capacity));
    let stability = SubCheck::from_ratio(
        slenderness
            .within_range()
            .and_then(|_| Ratio::of(check, n.0, stability_capacity)),
    );

    let subs = [&resistance, &stability];
    let details = CompressionDetails {
        design_strength_mpa: material.f_c0d_mpa,
        axial_stress_mpa: n.over_area(geometry.area_mm2).0,
        resistance_capacity_n: resistance_capacity,
        stability_capacity_n: stability_capacity,
        slenderness,
        resistance: resistance.clone(),
        stability: stability.clone(),
    };
    Ok(VerificationResult::from_subchecks(check, &subs, CheckDetails::Compression(details)))
}

/// Bending with compression (NBR 7190-1 Eq. 13 for stability)
pub fn bending_compression(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    let check = CheckId::BendingCompression;
    let input = ctx.input;
    let n = input.compression();

    let (moment_x, moment_y, min_eccentricity) = if input.has_moment() {
        (input.moment_x().0.abs(), input.moment_y().0.abs(), None)
    } else {
        let length = input.length_mm().0;
        let divisor = input.stability.wood_type.min_eccentricity_divisor();
        let moment = min_eccentricity_moment(n.0, length, divisor);
        tracing::debug!(moment_nmm = moment, "no applied moment, using minimum eccentricity");
        let details = EccentricityDetails {
            divisor,
            eccentricity_mm: length / divisor,
            moment_nmm: moment,
        };
        (moment, moment, Some(details))
    };

    let r_n = utilization(check, n.over_area(geometry.area_mm2).0, material.f_c0d_mpa)?;
    let r_x = utilization(check, moment_x / geometry.w_x_mm3, material.f_md_mpa)?;
    let r_y = utilization(check, moment_y / geometry.w_y_mm3, material.f_md_mpa)?;
    let k_m = k_m(geometry.width_mm, geometry.height_mm);

    let resistance_sum = (r_n * r_n + r_x + k_m * r_y).max(r_n * r_n + k_m * r_x + r_y);
    let resistance = SubCheck::from_ratio(Ratio::from_value(check, resistance_sum));

    let slenderness = SlendernessDetails::evaluate(input, geometry, material);
    let stability = SubCheck::from_ratio(slenderness.within_range().and_then(|_| {
        let about_x = r_n * slenderness.amplification_x + r_x + k_m * r_y;
        let about_y = r_n * slenderness.amplification_y + k_m * r_x + r_y;
        Ratio::from_value(check, about_x.max(about_y))
    }));

    let subs = [&resistance, &stability];
    let details = BendingCompressionDetails {
        min_eccentricity,
        moment_x_nmm: moment_x,
        moment_y_nmm: moment_y,
        k_m,
        axial_term: r_n,
        x_term: r_x,
        y_term: r_y,
        slenderness,
        resistance: resistance.clone(),
        stability: stability.clone(),
    };
    Ok(VerificationResult::from_subchecks(check, &subs, CheckDetails::BendingCompression(details)))
}

//! Bending checks: straight bending per axis, oblique bending and bending
//! with axial tension.
//!
//! ```text
//! r_x = |M_x| / (W_x f_m,d)      r_y = |M_y| / (W_y f_m,d)
//!
//! straight:  r_x ≤ 1,  r_y ≤ 1
//! oblique:   max(r_x + k_M r_y,  k_M r_x + r_y) ≤ 1
//! tension:   max(r_N + r_x + k_M r_y,  r_N + k_M r_x + r_y) ≤ 1,  r_N = N / (A f_t0,d)
//! ```

use serde::{Deserialize, Serialize};

use crate::code_tables::{k_m, TOL};
use crate::errors::{CalcError, CalcResult};
use crate::input::InputSpecification;

use super::{CheckContext, CheckDetails, CheckId, Ratio, SubCheck, VerificationResult};

/// Straight bending, one sub-check per loaded axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingDetails {
    /// f_m,d (MPa)
    pub design_strength_mpa: f64,
    /// σ_Mx,d (MPa)
    pub stress_x_mpa: f64,
    /// σ_My,d (MPa)
    pub stress_y_mpa: f64,
    pub x: SubCheck,
    pub y: SubCheck,
    /// f_m,d taken as f_c0,d for a class without tabulated f_mk
    pub bending_estimated: bool,
}

/// Terms of a two-axis interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionDetails {
    pub k_m: f64,
    /// Axial term r_N (0 for pure oblique bending)
    pub axial_term: f64,
    pub x_term: f64,
    pub y_term: f64,
    /// r_N + r_x + k_M r_y
    pub sum_x: f64,
    /// r_N + k_M r_x + r_y
    pub sum_y: f64,
}

impl InteractionDetails {
    fn linear(k_m: f64, axial_term: f64, x_term: f64, y_term: f64) -> Self {
        InteractionDetails {
            k_m,
            axial_term,
            x_term,
            y_term,
            sum_x: axial_term + x_term + k_m * y_term,
            sum_y: axial_term + k_m * x_term + y_term,
        }
    }

    /// Governing sum
    pub fn governing(&self) -> f64 {
        self.sum_x.max(self.sum_y)
    }
}

/// Stress over strength for an interaction term.
///
/// The strength must be positive; the stress may overflow to infinity.
pub(crate) fn utilization(check: CheckId, stress: f64, strength: f64) -> CalcResult<f64> {
    if !strength.is_finite() || strength <= 0.0 {
        return Err(CalcError::indeterminate(
            check.code(),
            format!("design strength {strength} is not positive"),
        ));
    }
    Ok(stress.abs() / strength)
}

pub(crate) fn bending_straight_applies(input: &InputSpecification) -> bool {
    input.has_moment()
}

pub(crate) fn bending_oblique_applies(input: &InputSpecification) -> bool {
    input.actions.moment_x_nm.abs() > TOL && input.actions.moment_y_nm.abs() > TOL
}

pub(crate) fn bending_tension_applies(input: &InputSpecification) -> bool {
    input.actions.tension_n > TOL && input.has_moment()
}

/// Straight bending about each loaded axis
pub fn bending_straight(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    let check = CheckId::BendingStraight;

    let stress_x = ctx.input.moment_x().0 / geometry.w_x_mm3;
    let stress_y = ctx.input.moment_y().0 / geometry.w_y_mm3;

    let axis = |moment_nm: f64, stress: f64| {
        if moment_nm.abs() > TOL {
            SubCheck::from_ratio(Ratio::of(check, stress, material.f_md_mpa))
        } else {
            SubCheck::not_applicable()
        }
    };
    let x = axis(ctx.input.actions.moment_x_nm, stress_x);
    let y = axis(ctx.input.actions.moment_y_nm, stress_y);

    let subs = [&x, &y];
    let details = BendingDetails {
        design_strength_mpa: material.f_md_mpa,
        stress_x_mpa: stress_x,
        stress_y_mpa: stress_y,
        bending_estimated: material.bending_estimated,
        x: x.clone(),
        y: y.clone(),
    };
    Ok(VerificationResult::from_subchecks(check, &subs, CheckDetails::Bending(details)))
}

/// Oblique bending (both moments present)
pub fn bending_oblique(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    let check = CheckId::BendingOblique;

    let r_x = utilization(check, ctx.input.moment_x().0 / geometry.w_x_mm3, material.f_md_mpa)?;
    let r_y = utilization(check, ctx.input.moment_y().0 / geometry.w_y_mm3, material.f_md_mpa)?;

    let terms = InteractionDetails::linear(k_m(geometry.width_mm, geometry.height_mm), 0.0, r_x, r_y);
    let ratio = Ratio::from_value(check, terms.governing())?;
    Ok(VerificationResult::from_ratio(check, ratio, CheckDetails::Interaction(terms)))
}

/// Bending with axial tension
pub fn bending_tension(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    let check = CheckId::BendingTension;

    let r_n = utilization(check, ctx.input.actions.tension_n / geometry.area_mm2, material.f_t0d_mpa)?;
    let r_x = utilization(check, ctx.input.moment_x().0 / geometry.w_x_mm3, material.f_md_mpa)?;
    let r_y = utilization(check, ctx.input.moment_y().0 / geometry.w_y_mm3, material.f_md_mpa)?;

    let terms = InteractionDetails::linear(k_m(geometry.width_mm, geometry.height_mm), r_n, r_x, r_y);
    let ratio = Ratio::from_value(check, terms.governing())?;
    Ok(VerificationResult::from_ratio(check, ratio, CheckDetails::Interaction(terms)))
}

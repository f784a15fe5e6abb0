//! Lateral-torsional stability of members bent about the strong axis
//! (NBR 7190-1 6.5.6).
//!
//! ```text
//! exempt when  L1 / b ≤ E_0,ef / (β_M f_m,d)
//! otherwise    σ_cd = |M_x| / W_x ≤ σ_cd,adm = E_0,ef / ((L1 / b) β_M)
//! ```
//!
//! Applies only to an applied M_x. The minimum eccentricity moment of a
//! compressed member feeds bending_compression alone and never makes this
//! check applicable.

use serde::{Deserialize, Serialize};

use crate::code_tables::{beta_m, MOMENT_TOL, TOL};
use crate::errors::{CalcError, CalcResult};
use crate::input::InputSpecification;

use super::{CheckContext, CheckDetails, CheckId, Ratio, Verdict, VerificationResult};

/// Lateral stability quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralDetails {
    pub h_over_b: f64,
    pub beta_m: f64,
    pub l1_over_b: f64,
    /// E_0,ef / (β_M f_m,d)
    pub exemption_limit: f64,
    pub e_0_ef_mpa: f64,
    pub exempt: bool,
    /// σ_cd (MPa), when not exempt
    pub sigma_cd_mpa: Option<f64>,
    /// σ_cd,adm (MPa), when not exempt
    pub sigma_cd_adm_mpa: Option<f64>,
}

/// Applied M_x only; see the module notes on minimum eccentricity
pub(crate) fn lateral_stability_applies(input: &InputSpecification) -> bool {
    input.actions.moment_x_nm.abs() > MOMENT_TOL
}

/// Lateral stability; L1 is required whenever M_x is present
pub fn lateral_stability(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let check = CheckId::LateralStability;
    let l1 = ctx.input.stability.l1_mm;
    if l1 <= 0.0 {
        return Err(CalcError::missing_field("stability.l1_mm"));
    }

    let geometry = ctx.geometry()?;
    let material = ctx.material()?;

    let h_over_b = geometry.aspect_ratio();
    let beta = beta_m(h_over_b);
    let l1_over_b = l1 / geometry.width_mm;
    let e_ef = material.e_0_ef_mpa;

    let denominator = beta * material.f_md_mpa;
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(CalcError::indeterminate(check.code(), "β_M × f_md is not positive"));
    }
    let limit = e_ef / denominator;

    let mut details = LateralDetails {
        h_over_b,
        beta_m: beta,
        l1_over_b,
        exemption_limit: limit,
        e_0_ef_mpa: e_ef,
        exempt: l1_over_b <= limit + TOL,
        sigma_cd_mpa: None,
        sigma_cd_adm_mpa: None,
    };

    if details.exempt {
        return Ok(VerificationResult {
            check,
            applicable: true,
            verdict: Verdict::Exempt,
            ratio: None,
            details: CheckDetails::Lateral(details),
            diagnostic: None,
        });
    }

    let sigma_cd = ctx.input.moment_x().0.abs() / geometry.w_x_mm3;
    let sigma_adm = e_ef / (l1_over_b * beta);
    details.sigma_cd_mpa = Some(sigma_cd);
    details.sigma_cd_adm_mpa = Some(sigma_adm);

    let ratio = Ratio::of(check, sigma_cd, sigma_adm)?;
    Ok(VerificationResult::from_ratio(check, ratio, CheckDetails::Lateral(details)))
}

//! Axial checks: tension parallel and perpendicular to grain, compression
//! perpendicular to grain (bearing).
//!
//! ```text
//! N_t0,d  ≤ f_t0,d  × A
//! N_t90,d ≤ f_t90,d × A
//! N_c90,d ≤ α_n × f_c90,d × A
//! ```

use serde::{Deserialize, Serialize};

use crate::code_tables::TOL;
use crate::errors::CalcResult;
use crate::input::InputSpecification;

use super::{CheckContext, CheckDetails, CheckId, Ratio, VerificationResult};

/// Demand and capacity of a single-force check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxialDetails {
    /// Design force (N)
    pub demand: f64,
    /// Resisting force (N)
    pub capacity: f64,
    /// Design strength used (MPa)
    pub design_strength_mpa: f64,
    /// Resisting area (mm²)
    pub area_mm2: f64,
    /// α_n for bearing, 1 otherwise
    pub coefficient: f64,
}

fn single_force(check: CheckId, demand: f64, strength: f64, area: f64, coefficient: f64) -> CalcResult<VerificationResult> {
    let capacity = coefficient * strength * area;
    let ratio = Ratio::of(check, demand, capacity)?;
    let details = AxialDetails {
        demand,
        capacity,
        design_strength_mpa: strength,
        area_mm2: area,
        coefficient,
    };
    Ok(VerificationResult::from_ratio(check, ratio, CheckDetails::Axial(details)))
}

pub(crate) fn tension_parallel_applies(input: &InputSpecification) -> bool {
    input.actions.tension_n > TOL
}

pub(crate) fn tension_perpendicular_applies(input: &InputSpecification) -> bool {
    input.actions.tension_perpendicular_n > TOL
}

pub(crate) fn compression_perpendicular_applies(input: &InputSpecification) -> bool {
    input.actions.compression_perpendicular_n > TOL
}

/// Tension parallel to grain
pub fn tension_parallel(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    single_force(
        CheckId::TensionParallel,
        ctx.input.actions.tension_n,
        material.f_t0d_mpa,
        geometry.area_mm2,
        1.0,
    )
}

/// Tension perpendicular to grain
pub fn tension_perpendicular(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    single_force(
        CheckId::TensionPerpendicular,
        ctx.input.actions.tension_perpendicular_n,
        material.f_t90d_mpa,
        geometry.area_mm2,
        1.0,
    )
}

/// Compression perpendicular to grain over the full section
pub fn compression_perpendicular(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    single_force(
        CheckId::CompressionPerpendicular,
        ctx.input.actions.compression_perpendicular_n,
        material.f_c90d_mpa,
        geometry.area_mm2,
        ctx.input.stability.alpha_n,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{approx_eq, c24_60x140};
    use crate::checks::Verdict;

    #[test]
    fn test_tension_parallel_c24() {
        // f_t0d = 0.7 × 14 / 1.4 = 7.0 MPa, A = 8400 mm² → 58.8 kN
        let mut input = c24_60x140();
        input.actions.tension_n = 29_400.0;
        let result = CheckId::TensionParallel.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Approved);
        assert!(approx_eq(result.ratio.and_then(|r| r.value()).unwrap(), 0.5));
        match result.details {
            CheckDetails::Axial(d) => assert!(approx_eq(d.capacity, 58_800.0)),
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn test_tension_parallel_exact_capacity_passes() {
        let mut input = c24_60x140();
        input.actions.tension_n = 58_800.0;
        let result = CheckId::TensionParallel.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Approved);
    }

    #[test]
    fn test_tension_perpendicular_fails() {
        // f_t90d = 0.2 MPa → 1680 N
        let mut input = c24_60x140();
        input.actions.tension_perpendicular_n = 2_000.0;
        let result = CheckId::TensionPerpendicular.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Failed);
        assert!(result.ratio.and_then(|r| r.value()).unwrap() > 1.0);
    }

    #[test]
    fn test_bearing_uses_alpha_n() {
        // f_c90d = 1.25 MPa, α_n = 1.5 → 15 750 N
        let mut input = c24_60x140();
        input.actions.compression_perpendicular_n = 15_750.0;
        input.stability.alpha_n = 1.5;
        let result = CheckId::CompressionPerpendicular.evaluate(&CheckContext::new(&input));
        assert!(approx_eq(result.ratio.and_then(|r| r.value()).unwrap(), 1.0));
        assert_eq!(result.verdict, Verdict::Approved);
    }

    #[test]
    fn test_zero_force_is_not_applicable() {
        let input = c24_60x140();
        let result = CheckId::TensionParallel.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::NotApplicable);
        assert!(result.ratio.is_none());
    }
}

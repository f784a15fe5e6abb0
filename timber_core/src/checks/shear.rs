//! Shear parallel to grain on a rectangular section.
//!
//! ```text
//! τ_d = 3 V_d / (2 A) ≤ f_v,d   ⇔   |V_d| ≤ f_v,d × 2A/3
//! ```

use crate::code_tables::TOL;
use crate::errors::CalcResult;
use crate::input::InputSpecification;

use super::{AxialDetails, CheckContext, CheckDetails, CheckId, Ratio, VerificationResult};

pub(crate) fn shear_applies(input: &InputSpecification) -> bool {
    input.actions.shear_n.abs() > TOL
}

/// Shear check; the sign of V_d is ignored
pub fn shear(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;

    let demand = ctx.input.actions.shear_n.abs();
    let area = geometry.shear_area_mm2();
    let capacity = material.f_vd_mpa * area;
    let ratio = Ratio::of(CheckId::Shear, demand, capacity)?;

    let details = AxialDetails {
        demand,
        capacity,
        design_strength_mpa: material.f_vd_mpa,
        area_mm2: area,
        coefficient: 1.0,
    };
    Ok(VerificationResult::from_ratio(CheckId::Shear, ratio, CheckDetails::Axial(details)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{approx_eq, c24_60x140};
    use crate::checks::Verdict;

    #[test]
    fn test_shear_c24() {
        // f_vd = 0.7 × 4 / 1.8 = 1.5556 MPa, 2A/3 = 5600 mm² → 8711 N
        let mut input = c24_60x140();
        input.actions.shear_n = 5_000.0;
        let result = CheckId::Shear.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Approved);
        let expected = 5_000.0 / (0.7 * 4.0 / 1.8 * 5600.0);
        assert!(approx_eq(result.ratio.and_then(|r| r.value()).unwrap(), expected));
    }

    #[test]
    fn test_negative_shear_uses_magnitude() {
        let mut input = c24_60x140();
        input.actions.shear_n = -5_000.0;
        let negative = CheckId::Shear.evaluate(&CheckContext::new(&input));
        input.actions.shear_n = 5_000.0;
        let positive = CheckId::Shear.evaluate(&CheckContext::new(&input));
        assert_eq!(negative.ratio, positive.ratio);
    }

    #[test]
    fn test_overloaded_shear_fails() {
        let mut input = c24_60x140();
        input.actions.shear_n = 20_000.0;
        let result = CheckId::Shear.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Failed);
    }
}

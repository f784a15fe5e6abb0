//! Serviceability deflection of a simply-supported member (NBR 7190-1 8.2).
//!
//! Two combinations are checked independently: quasi-permanent and wind
//! suction. For each, the final deflection with creep about both axes is
//! combined into a resultant and compared to L / 250.

use serde::{Deserialize, Serialize};

use crate::code_tables::TOL;
use crate::equations::{deflection_limit, final_deflection, uniform_load_max_deflection, GeometricProperties};
use crate::errors::CalcResult;
use crate::input::InputSpecification;
use crate::units::NewtonsPerMillimeter;

use super::{CheckContext, CheckDetails, CheckId, Ratio, SubCheck, VerificationResult};

/// One load combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionCombination {
    /// q along x (N/mm)
    pub load_x_npmm: f64,
    /// q along y (N/mm)
    pub load_y_npmm: f64,
    pub instantaneous_x_mm: f64,
    pub instantaneous_y_mm: f64,
    pub final_x_mm: f64,
    pub final_y_mm: f64,
    /// √(δx² + δy²), signed by the dominant component
    pub resultant_mm: f64,
    pub check: SubCheck,
}

/// Deflection quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionDetails {
    /// φ
    pub creep_coefficient: f64,
    /// E_0,ef (MPa)
    pub e_0_ef_mpa: f64,
    /// L / 250 (mm)
    pub limit_mm: f64,
    pub quasi_permanent: Option<DeflectionCombination>,
    pub wind: Option<DeflectionCombination>,
}

fn loaded((q_x, q_y): (NewtonsPerMillimeter, NewtonsPerMillimeter)) -> bool {
    q_x.0.abs() > TOL || q_y.0.abs() > TOL
}

pub(crate) fn deflection_applies(input: &InputSpecification) -> bool {
    match &input.serviceability {
        Some(loads) => loaded(loads.quasi_permanent()) || loaded(loads.wind()),
        None => false,
    }
}

fn combination(
    (q_x, q_y): (NewtonsPerMillimeter, NewtonsPerMillimeter),
    length_mm: f64,
    e_mpa: f64,
    creep: f64,
    limit_mm: f64,
    geometry: &GeometricProperties,
) -> DeflectionCombination {
    // load along x bends about y
    let inst_x = uniform_load_max_deflection(q_x.0, length_mm, e_mpa, geometry.i_y_mm4);
    let inst_y = uniform_load_max_deflection(q_y.0, length_mm, e_mpa, geometry.i_x_mm4);
    let fin_x = final_deflection(inst_x, creep);
    let fin_y = final_deflection(inst_y, creep);

    let magnitude = fin_x.hypot(fin_y);
    let dominant = if fin_x.abs() > fin_y.abs() { fin_x } else { fin_y };
    let resultant = if dominant < 0.0 { -magnitude } else { magnitude };

    DeflectionCombination {
        load_x_npmm: q_x.0,
        load_y_npmm: q_y.0,
        instantaneous_x_mm: inst_x,
        instantaneous_y_mm: inst_y,
        final_x_mm: fin_x,
        final_y_mm: fin_y,
        resultant_mm: resultant,
        check: SubCheck::from_ratio(Ratio::of(CheckId::Deflection, resultant, limit_mm)),
    }
}

/// Deflection check over the loaded combinations
pub fn deflection(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let material = ctx.material()?;
    let input = ctx.input;
    let loads = input.service_loads();

    let length = input.length_mm().0;
    let creep = input.material.moisture.creep_coefficient();
    let limit = deflection_limit(length);
    let e = material.e_0_ef_mpa;

    let evaluate = |pair| loaded(pair).then(|| combination(pair, length, e, creep, limit, geometry));
    let quasi_permanent = evaluate(loads.quasi_permanent());
    let wind = evaluate(loads.wind());

    let not_applicable = SubCheck::not_applicable();
    let subs = [
        quasi_permanent.as_ref().map_or(&not_applicable, |c| &c.check),
        wind.as_ref().map_or(&not_applicable, |c| &c.check),
    ];
    let (verdict, ratio, diagnostic) = super::combine(&subs);

    let details = DeflectionDetails {
        creep_coefficient: creep,
        e_0_ef_mpa: e,
        limit_mm: limit,
        quasi_permanent,
        wind,
    };
    Ok(VerificationResult {
        check: CheckId::Deflection,
        applicable: true,
        verdict,
        ratio,
        details: CheckDetails::Deflection(details),
        diagnostic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{approx_eq, c24_60x140};
    use crate::checks::Verdict;
    use crate::code_tables::{MoistureClass, WoodType};
    use crate::input::ServiceLoads;

    fn expected_final(q: f64, i: f64, phi: f64) -> f64 {
        5.0 * q * 3000f64.powi(4) / (384.0 * 7700.0 * i) * (1.0 + phi)
    }

    #[test]
    fn test_zero_loads_not_applicable() {
        let mut input = c24_60x140();
        input.serviceability = Some(ServiceLoads::default());
        let result = CheckId::Deflection.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::NotApplicable);
    }

    #[test]
    fn test_quasi_permanent_strong_axis() {
        // q = 0.5 N/mm: δ_inst = 4.99 mm, δ_fin = 7.99 mm ≤ 12 mm
        let mut input = c24_60x140();
        input.serviceability = Some(ServiceLoads {
            quasi_permanent_y_npm: 500.0,
            ..Default::default()
        });
        let result = CheckId::Deflection.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Approved);

        let CheckDetails::Deflection(d) = result.details else {
            panic!("unexpected details");
        };
        assert!(approx_eq(d.limit_mm, 12.0));
        assert_eq!(d.creep_coefficient, 0.6);
        assert!(d.wind.is_none());
        let qp = d.quasi_permanent.unwrap();
        let expected = expected_final(0.5, 13_720_000.0, 0.6);
        assert!((qp.final_y_mm - expected).abs() < 1e-9);
        assert!((qp.resultant_mm - expected).abs() < 1e-9);
    }

    #[test]
    fn test_heavier_load_fails() {
        let mut input = c24_60x140();
        input.serviceability = Some(ServiceLoads {
            quasi_permanent_y_npm: 800.0,
            ..Default::default()
        });
        let result = CheckId::Deflection.evaluate(&CheckContext::new(&input));
        assert_eq!(result.verdict, Verdict::Failed);
    }

    #[test]
    fn test_wind_suction_keeps_sign() {
        let mut input = c24_60x140();
        input.serviceability = Some(ServiceLoads {
            wind_y_npm: -300.0,
            wind_x_npm: 20.0,
            ..Default::default()
        });
        let result = CheckId::Deflection.evaluate(&CheckContext::new(&input));
        let CheckDetails::Deflection(d) = result.details else {
            panic!("unexpected details");
        };
        let wind = d.wind.unwrap();
        assert!(wind.resultant_mm < 0.0);
        assert!(approx_eq(wind.resultant_mm.abs(), wind.final_x_mm.hypot(wind.final_y_mm)));
        assert!(d.quasi_permanent.is_none());
    }

    #[test]
    fn test_creep_follows_moisture_class() {
        let mut input = c24_60x140();
        input.material.moisture = MoistureClass::Class4;
        input.serviceability = Some(ServiceLoads {
            quasi_permanent_y_npm: 100.0,
            ..Default::default()
        });
        let result = CheckId::Deflection.evaluate(&CheckContext::new(&input));
        let CheckDetails::Deflection(d) = result.details else {
            panic!("unexpected details");
        };
        assert_eq!(d.creep_coefficient, 2.0);

        input.material.moisture = MoistureClass::Class1;
        input.stability.wood_type = WoodType::GluedLaminated;
        let result = CheckId::Deflection.evaluate(&CheckContext::new(&input));
        let CheckDetails::Deflection(d) = result.details else {
            panic!("unexpected details");
        };
        assert_eq!(d.creep_coefficient, 0.6);
    }
}

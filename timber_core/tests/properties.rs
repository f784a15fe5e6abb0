use timber_core::checks::CheckId;
use timber_core::code_tables::{LoadDurationClass, MoistureClass, PieceCategory};
use timber_core::equations::section::GeometricProperties;
use timber_core::input::{DesignActions, InputSpecification, MemberGeometry, StabilityParameters};
use timber_core::materials::{MaterialSelection, TableOrigin};
use timber_core::{evaluate, Verdict};
use proptest::prelude::*;

fn request(class: &str, b: f64, h: f64, length_m: f64, actions: DesignActions) -> InputSpecification {
    InputSpecification {
        label: "prop".to_string(),
        material: MaterialSelection {
            origin: if class.starts_with('C') { TableOrigin::Structural } else { TableOrigin::Native },
            class: class.to_string(),
            load_duration: LoadDurationClass::Medium,
            moisture: MoistureClass::Class2,
        },
        geometry: MemberGeometry {
            width_mm: b,
            height_mm: h,
            length_m,
            piece_category: PieceCategory::PrincipalIsolated,
        },
        actions,
        stability: StabilityParameters {
            l1_mm: 1500.0,
            ..Default::default()
        },
        serviceability: None,
        selected_checks: CheckId::ALL.into_iter().collect(),
    }
}

fn ratio_of(input: &InputSpecification, check: CheckId) -> Option<f64> {
    evaluate(input).result(check).and_then(|r| r.ratio).and_then(|r| r.value())
}

fn class_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["C14", "C24", "C40", "D30", "D50", "D20", "D40", "D60"])
}

proptest! {
    #[test]
    fn evaluate_is_total(
        b in -50.0f64..300.0,
        h in -50.0f64..600.0,
        length in -1.0f64..12.0,
        n in -1e5f64..1e6,
        m in -1e5f64..1e5,
        v in -1e5f64..1e5,
    ) {
        let actions = DesignActions {
            compression_n: n,
            moment_x_nm: m,
            moment_y_nm: m / 3.0,
            shear_n: v,
            ..Default::default()
        };
        let report = evaluate(&request("C30", b, h, length, actions));

        let mut seen: Vec<CheckId> = report.results.iter().map(|r| r.check).collect();
        seen.extend(report.not_applicable.iter().copied());
        seen.sort();
        prop_assert_eq!(seen, CheckId::ALL.to_vec());

        for r in &report.results {
            prop_assert_eq!(r.diagnostic.is_some(), r.verdict == Verdict::Error);
        }
        prop_assert_eq!(report.is_approved(), report.failures.is_empty());
    }

    #[test]
    fn evaluate_is_idempotent(class in class_strategy(), n in 0.0f64..5e4, m in 0.0f64..5e3) {
        let actions = DesignActions { tension_n: n, moment_x_nm: m, ..Default::default() };
        let input = request(class, 80.0, 160.0, 2.5, actions);
        prop_assert_eq!(evaluate(&input), evaluate(&input));
    }

    #[test]
    fn tension_ratio_is_monotone(class in class_strategy(), n in 1.0f64..1e5, scale in 1.0f64..10.0) {
        let low = request(class, 60.0, 140.0, 3.0, DesignActions { tension_n: n, ..Default::default() });
        let high = request(class, 60.0, 140.0, 3.0, DesignActions { tension_n: n * scale, ..Default::default() });
        let (Some(r_low), Some(r_high)) = (ratio_of(&low, CheckId::TensionParallel), ratio_of(&high, CheckId::TensionParallel)) else {
            return Err(TestCaseError::fail("tension ratio missing"));
        };
        prop_assert!(r_high >= r_low);
    }

    #[test]
    fn shear_ratio_is_monotone(class in class_strategy(), v in 1.0f64..1e5, scale in 1.0f64..10.0) {
        let low = request(class, 60.0, 140.0, 3.0, DesignActions { shear_n: v, ..Default::default() });
        let high = request(class, 60.0, 140.0, 3.0, DesignActions { shear_n: -v * scale, ..Default::default() });
        let r_low = ratio_of(&low, CheckId::Shear).unwrap();
        let r_high = ratio_of(&high, CheckId::Shear).unwrap();
        prop_assert!(r_high >= r_low);
    }

    #[test]
    fn bending_ratio_is_monotone(class in class_strategy(), m in 1.0f64..2e4, scale in 1.0f64..10.0) {
        let low = request(class, 60.0, 140.0, 3.0, DesignActions { moment_x_nm: m, ..Default::default() });
        let high = request(class, 60.0, 140.0, 3.0, DesignActions { moment_x_nm: m * scale, ..Default::default() });
        let r_low = ratio_of(&low, CheckId::BendingStraight).unwrap();
        let r_high = ratio_of(&high, CheckId::BendingStraight).unwrap();
        prop_assert!(r_high >= r_low);
    }

    #[test]
    fn compression_ratio_is_monotone(class in class_strategy(), n in 1.0f64..1e5, scale in 1.0f64..10.0) {
        // 100 x 150 at 1 m stays well inside λ ≤ 140
        let low = request(class, 100.0, 150.0, 1.0, DesignActions { compression_n: n, ..Default::default() });
        let high = request(class, 100.0, 150.0, 1.0, DesignActions { compression_n: n * scale, ..Default::default() });
        let r_low = ratio_of(&low, CheckId::CompressionParallel).unwrap();
        let r_high = ratio_of(&high, CheckId::CompressionParallel).unwrap();
        prop_assert!(r_high >= r_low);
    }

    #[test]
    fn deeper_section_lowers_bending_ratio(m in 100.0f64..2e4, extra in 1.0f64..200.0) {
        let actions = DesignActions { moment_x_nm: m, ..Default::default() };
        let shallow = ratio_of(&request("C24", 60.0, 140.0, 3.0, actions), CheckId::BendingStraight);
        let deep = ratio_of(&request("C24", 60.0, 140.0 + extra, 3.0, actions), CheckId::BendingStraight);
        prop_assert!(deep.unwrap() < shallow.unwrap());
    }

    #[test]
    fn section_properties_are_consistent(b in 1.0f64..500.0, h in 1.0f64..1000.0) {
        let g = GeometricProperties::from_dimensions(b, h).unwrap();
        prop_assert!(g.area_mm2 > 0.0 && g.i_x_mm4 > 0.0 && g.i_y_mm4 > 0.0);
        prop_assert!((g.w_x_mm3 - g.i_x_mm4 / (h / 2.0)).abs() <= 1e-9 * g.w_x_mm3);
        prop_assert!((g.r_y_mm - (g.i_y_mm4 / g.area_mm2).sqrt()).abs() <= 1e-9 * g.r_y_mm);
    }
}

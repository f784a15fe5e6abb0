//! # Verification Request
//!
//! The immutable input of one evaluation: material, geometry, ultimate design
//! actions, stability parameters, optional serviceability loads and the set
//! of checks to run.
//!
//! Requests use the units of a load analysis (m, N, N·m, N/m); accessors
//! convert to the N / mm system the formulas work in.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Purlin P-3",
//!   "material": { "origin": "structural", "class": "C24", "load_duration": "long", "moisture": 1 },
//!   "geometry": { "width_mm": 60.0, "height_mm": 140.0, "length_m": 3.0 },
//!   "actions": { "shear_n": 5000.0, "moment_x_nm": 2500.0 },
//!   "stability": { "l1_mm": 1000.0 },
//!   "serviceability": { "quasi_permanent_y_npm": 800.0 },
//!   "selected_checks": ["shear", "bending_straight", "lateral_stability", "deflection"]
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::checks::CheckId;
use crate::code_tables::{PieceCategory, WoodType, MOMENT_TOL, TOL};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialSelection;
use crate::units::{Meters, Millimeters, NewtonMeters, NewtonMillimeters, Newtons, NewtonsPerMeter, NewtonsPerMillimeter};

/// Section and member length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberGeometry {
    /// Section width b (mm)
    pub width_mm: f64,
    /// Section height h (mm)
    pub height_mm: f64,
    /// Member length L (m)
    pub length_m: f64,
    /// Role of the member, for minimum dimensions
    #[serde(default)]
    pub piece_category: PieceCategory,
}

/// Ultimate design actions
///
/// Axial and perpendicular forces are magnitudes (≥ 0); shear and moments
/// are signed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesignActions {
    /// Axial tension N_t0,d (N)
    pub tension_n: f64,
    /// Axial compression N_c0,d (N)
    pub compression_n: f64,
    /// Tension perpendicular to grain N_t90,d (N)
    pub tension_perpendicular_n: f64,
    /// Compression perpendicular to grain N_c90,d (N)
    pub compression_perpendicular_n: f64,
    /// Shear V_d (N)
    pub shear_n: f64,
    /// Moment about x M_x,d (N·m)
    pub moment_x_nm: f64,
    /// Moment about y M_y,d (N·m)
    pub moment_y_nm: f64,
}

/// Buckling, bearing and lateral bracing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityParameters {
    /// Buckling length coefficient about x
    pub ke_x: f64,
    /// Buckling length coefficient about y
    pub ke_y: f64,
    /// Product type, selects β_c and e_min
    pub wood_type: WoodType,
    /// Bearing coefficient α_n for compression perpendicular to grain
    pub alpha_n: f64,
    /// Spacing of lateral restraints of the compressed edge L1 (mm)
    pub l1_mm: f64,
}

impl Default for StabilityParameters {
    fn default() -> Self {
        StabilityParameters {
            ke_x: 1.0,
            ke_y: 1.0,
            wood_type: WoodType::Sawn,
            alpha_n: 1.0,
            l1_mm: 0.0,
        }
    }
}

/// Serviceability line loads (N/m), signed; negative values are suction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceLoads {
    /// Quasi-permanent combination, load along x
    pub quasi_permanent_x_npm: f64,
    /// Quasi-permanent combination, load along y
    pub quasi_permanent_y_npm: f64,
    /// Wind suction combination, load along x
    pub wind_x_npm: f64,
    /// Wind suction combination, load along y
    pub wind_y_npm: f64,
}

impl ServiceLoads {
    /// Quasi-permanent loads (q_x, q_y) in N/mm
    pub fn quasi_permanent(&self) -> (NewtonsPerMillimeter, NewtonsPerMillimeter) {
        (
            NewtonsPerMeter(self.quasi_permanent_x_npm).into(),
            NewtonsPerMeter(self.quasi_permanent_y_npm).into(),
        )
    }

    /// Wind suction loads (w_x, w_y) in N/mm
    pub fn wind(&self) -> (NewtonsPerMillimeter, NewtonsPerMillimeter) {
        (NewtonsPerMeter(self.wind_x_npm).into(), NewtonsPerMeter(self.wind_y_npm).into())
    }
}

/// A complete verification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpecification {
    /// User label (e.g. "Purlin P-3")
    #[serde(default)]
    pub label: String,
    /// Material selection
    pub material: MaterialSelection,
    /// Section and length
    pub geometry: MemberGeometry,
    /// Ultimate design actions
    #[serde(default)]
    pub actions: DesignActions,
    /// Stability parameters
    #[serde(default)]
    pub stability: StabilityParameters,
    /// Serviceability loads, if deflection is of interest
    #[serde(default)]
    pub serviceability: Option<ServiceLoads>,
    /// Checks to run
    pub selected_checks: BTreeSet<CheckId>,
}

fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"))
    }
}

fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must not be negative"));
    }
    Ok(())
}

impl InputSpecification {
    /// Validate input parameters.
    ///
    /// Bending about x needs a positive L1 between lateral restraints, so a
    /// request carrying M_x without it is rejected as a whole.
    pub fn validate(&self) -> CalcResult<()> {
        if self.selected_checks.is_empty() {
            return Err(CalcError::invalid_input("selected_checks", "[]", "Select at least one check"));
        }
        if self.material.class.trim().is_empty() {
            return Err(CalcError::missing_field("material.class"));
        }

        let g = &self.geometry;
        require_positive("geometry.width_mm", g.width_mm)?;
        require_positive("geometry.height_mm", g.height_mm)?;
        require_positive("geometry.length_m", g.length_m)?;

        let a = &self.actions;
        require_non_negative("actions.tension_n", a.tension_n)?;
        require_non_negative("actions.compression_n", a.compression_n)?;
        require_non_negative("actions.tension_perpendicular_n", a.tension_perpendicular_n)?;
        require_non_negative("actions.compression_perpendicular_n", a.compression_perpendicular_n)?;
        require_finite("actions.shear_n", a.shear_n)?;
        require_finite("actions.moment_x_nm", a.moment_x_nm)?;
        require_finite("actions.moment_y_nm", a.moment_y_nm)?;

        let s = &self.stability;
        for (field, ke) in [("stability.ke_x", s.ke_x), ("stability.ke_y", s.ke_y)] {
            require_finite(field, ke)?;
            if ke < 0.5 {
                return Err(CalcError::invalid_input(field, ke.to_string(), "Ke must be at least 0.5"));
            }
        }
        require_finite("stability.alpha_n", s.alpha_n)?;
        if !(1.0..=2.0).contains(&s.alpha_n) {
            return Err(CalcError::invalid_input(
                "stability.alpha_n",
                s.alpha_n.to_string(),
                "alpha_n must be between 1.0 and 2.0",
            ));
        }
        require_non_negative("stability.l1_mm", s.l1_mm)?;
        if a.moment_x_nm.abs() > MOMENT_TOL && s.l1_mm <= 0.0 {
            return Err(CalcError::missing_field("stability.l1_mm"));
        }

        if let Some(els) = &self.serviceability {
            require_finite("serviceability.quasi_permanent_x_npm", els.quasi_permanent_x_npm)?;
            require_finite("serviceability.quasi_permanent_y_npm", els.quasi_permanent_y_npm)?;
            require_finite("serviceability.wind_x_npm", els.wind_x_npm)?;
            require_finite("serviceability.wind_y_npm", els.wind_y_npm)?;
        }
        Ok(())
    }

    /// Member length in mm
    pub fn length_mm(&self) -> Millimeters {
        Meters(self.geometry.length_m).into()
    }

    /// Applied M_x in N·mm
    pub fn moment_x(&self) -> NewtonMillimeters {
        NewtonMeters(self.actions.moment_x_nm).into()
    }

    /// Applied M_y in N·mm
    pub fn moment_y(&self) -> NewtonMillimeters {
        NewtonMeters(self.actions.moment_y_nm).into()
    }

    /// Axial compression as a force
    pub fn compression(&self) -> Newtons {
        Newtons(self.actions.compression_n)
    }

    /// Any applied moment is non-zero
    pub fn has_moment(&self) -> bool {
        self.actions.moment_x_nm.abs() > TOL || self.actions.moment_y_nm.abs() > TOL
    }

    /// Serviceability loads, zero when absent
    pub fn service_loads(&self) -> ServiceLoads {
        self.serviceability.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_tables::{LoadDurationClass, MoistureClass};
    use crate::materials::TableOrigin;

    fn sample() -> InputSpecification {
        InputSpecification {
            label: "P-1".to_string(),
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

    #[test]
    fn test_valid_input() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut input = sample();
        input.selected_checks.clear();
        let err = input.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_axial_rejected() {
        let mut input = sample();
        input.actions.compression_n = -1.0;
        match input.validate().unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "actions.compression_n"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut input = sample();
        input.actions.moment_y_nm = f64::NAN;
        assert!(input.validate().is_err());

        let mut input = sample();
        input.serviceability = Some(ServiceLoads {
            wind_y_npm: f64::INFINITY,
            ..Default::default()
        });
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_stability_ranges() {
        let mut input = sample();
        input.stability.ke_y = 0.4;
        assert!(input.validate().is_err());

        let mut input = sample();
        input.stability.alpha_n = 2.5;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_moment_x_requires_l1() {
        let mut input = sample();
        input.actions.moment_x_nm = 1000.0;
        match input.validate().unwrap_err() {
            CalcError::MissingField { field } => assert_eq!(field, "stability.l1_mm"),
            other => panic!("unexpected error {other:?}"),
        }

        input.stability.l1_mm = 1200.0;
        assert!(input.validate().is_ok());

        // below the moment tolerance L1 stays optional
        input.stability.l1_mm = 0.0;
        input.actions.moment_x_nm = 1e-7;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_unit_conversions() {
        let mut input = sample();
        input.actions.moment_x_nm = 2500.0;
        input.serviceability = Some(ServiceLoads {
            quasi_permanent_y_npm: 800.0,
            ..Default::default()
        });
        assert_eq!(input.length_mm().0, 3000.0);
        assert_eq!(input.moment_x().0, 2_500_000.0);
        assert_eq!(input.service_loads().quasi_permanent().1 .0, 0.8);
        assert!(input.has_moment());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "material": { "origin": "structural", "class": "C24", "load_duration": "long", "moisture": 1 },
            "geometry": { "width_mm": 60.0, "height_mm": 140.0, "length_m": 3.0 },
            "actions": { "shear_n": 5000.0 },
            "selected_checks": ["shear", "cisalhamento"]
        }"#;
        let input: InputSpecification = serde_json::from_str(json).unwrap();
        assert_eq!(input.selected_checks.len(), 1);
        assert_eq!(input.stability.ke_x, 1.0);
        assert_eq!(input.geometry.piece_category, PieceCategory::PrincipalIsolated);
        assert!(input.serviceability.is_none());
        assert!(input.validate().is_ok());
    }
}

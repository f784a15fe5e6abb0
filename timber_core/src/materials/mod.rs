//! # Material Property Resolver
//!
//! Turns a material selection (table, class, load duration, moisture class)
//! into the design values every check consumes.
//!
//! ```text
//! kmod   = kmod1 × kmod2
//! f_t0d  = kmod × f_t0k / 1.4
//! f_t90d = min(kmod × f_t90k / 1.4, 0.06 × f_t0d)
//! f_c0d  = kmod × f_c0k / 1.4
//! f_c90d = min(kmod × f_c90k / 1.4, 0.25 × f_c0d)
//! f_vd   = kmod × f_vk / 1.8
//! f_md   = kmod × f_mk / 1.4        (f_c0d when f_mk is not tabulated)
//! E0,ef  = kmod × E0,mean
//! ```
//!
//! ## Example
//!
//! ```rust
//! use timber_core::materials::{MaterialProperties, MaterialSelection, TableOrigin};
//! use timber_core::code_tables::{LoadDurationClass, MoistureClass};
//!
//! let selection = MaterialSelection {
//!     origin: TableOrigin::Structural,
//!     class: "C24".to_string(),
//!     load_duration: LoadDurationClass::Long,
//!     moisture: MoistureClass::Class1,
//! };
//! let props = MaterialProperties::resolve(&selection).unwrap();
//! assert!((props.kmod - 0.70).abs() < 1e-12);
//! assert!((props.f_md_mpa - 0.70 * 24.0 / 1.4).abs() < 1e-9);
//! ```

pub mod wood_class;

pub use wood_class::{CharacteristicValues, TableOrigin};

use serde::{Deserialize, Serialize};

use crate::code_tables::{
    LoadDurationClass, MoistureClass, COMPRESSION_PERPENDICULAR_CAP, GAMMA_C, GAMMA_M, GAMMA_T,
    GAMMA_V, TENSION_PERPENDICULAR_CAP,
};
use crate::errors::CalcResult;

/// Material part of a verification request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "origin": "structural",
///   "class": "C30",
///   "load_duration": "long",
///   "moisture": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MaterialSelection {
    /// Characteristic-value table
    pub origin: TableOrigin,
    /// Strength class, e.g. "C24" or "D40"
    pub class: String,
    /// Load-duration class (kmod1)
    pub load_duration: LoadDurationClass,
    /// Moisture class (kmod2)
    pub moisture: MoistureClass,
}

/// Resolved material: characteristic values, modification factor and design values.
///
/// Strengths and moduli in MPa (N/mm²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Characteristic values as tabulated (or completed)
    pub characteristic: CharacteristicValues,

    /// Load-duration factor kmod1
    pub kmod1: f64,
    /// Moisture factor kmod2
    pub kmod2: f64,
    /// kmod = kmod1 × kmod2
    pub kmod: f64,

    /// Design tension parallel f_t0,d
    pub f_t0d_mpa: f64,
    /// Design tension perpendicular f_t90,d
    pub f_t90d_mpa: f64,
    /// Design compression parallel f_c0,d
    pub f_c0d_mpa: f64,
    /// Design compression perpendicular f_c90,d (before α_n)
    pub f_c90d_mpa: f64,
    /// Design shear f_v,d
    pub f_vd_mpa: f64,
    /// Design bending f_m,d
    pub f_md_mpa: f64,

    /// Effective modulus E_0,ef = kmod × E_0,mean
    pub e_0_ef_mpa: f64,

    /// f_m,d was derived from compression strength
    pub bending_estimated: bool,
}

impl MaterialProperties {
    /// Resolve design values for a material selection.
    ///
    /// Fails with `UnknownClass` when the class is not in the selected table.
    pub fn resolve(selection: &MaterialSelection) -> CalcResult<Self> {
        let ch = CharacteristicValues::lookup(selection.origin, &selection.class)?;
        let kmod1 = selection.load_duration.kmod1();
        let kmod2 = selection.moisture.kmod2();
        let kmod = kmod1 * kmod2;

        let f_t0d = kmod * ch.f_t0k_mpa / GAMMA_T;
        let f_t90d = capped(kmod * ch.f_t90k_mpa / GAMMA_T, TENSION_PERPENDICULAR_CAP, f_t0d);
        let f_c0d = kmod * ch.f_c0k_mpa / GAMMA_C;
        let f_c90d = capped(kmod * ch.f_c90k_mpa / GAMMA_C, COMPRESSION_PERPENDICULAR_CAP, f_c0d);
        let f_vd = kmod * ch.f_vk_mpa / GAMMA_V;
        let f_md = if ch.bending_estimated {
            tracing::debug!(class = %selection.class, "f_md estimated from f_c0d");
            f_c0d
        } else {
            kmod * ch.f_mk_mpa / GAMMA_M
        };

        Ok(MaterialProperties {
            characteristic: ch,
            kmod1,
            kmod2,
            kmod,
            f_t0d_mpa: f_t0d,
            f_t90d_mpa: f_t90d,
            f_c0d_mpa: f_c0d,
            f_c90d_mpa: f_c90d,
            f_vd_mpa: f_vd,
            f_md_mpa: f_md,
            e_0_ef_mpa: kmod * ch.e_0_mean_mpa,
            bending_estimated: ch.bending_estimated,
        })
    }
}

/// Perpendicular design strength limited to a fraction of the parallel one
fn capped(perpendicular: f64, fraction: f64, parallel: f64) -> f64 {
    perpendicular.min(fraction * parallel)
}

/// Shorthand for [`MaterialProperties::resolve`]
pub fn resolve(selection: &MaterialSelection) -> CalcResult<MaterialProperties> {
    MaterialProperties::resolve(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn selection(origin: TableOrigin, class: &str) -> MaterialSelection {
        MaterialSelection {
            origin,
            class: class.to_string(),
            load_duration: LoadDurationClass::Long,
            moisture: MoistureClass::Class1,
        }
    }

    #[test]
    fn test_c24_design_values() {
        let p = resolve(&selection(TableOrigin::Structural, "C24")).unwrap();
        assert!(approx_eq(p.kmod, 0.70));
        assert!(approx_eq(p.f_t0d_mpa, 0.7 * 14.0 / 1.4));
        assert!(approx_eq(p.f_c0d_mpa, 0.7 * 21.0 / 1.4));
        assert!(approx_eq(p.f_vd_mpa, 0.7 * 4.0 / 1.8));
        assert!(approx_eq(p.f_md_mpa, 12.0));
        assert!(approx_eq(p.e_0_ef_mpa, 0.7 * 11000.0));
        assert!(!p.bending_estimated);
    }

    #[test]
    fn test_perpendicular_caps() {
        let p = resolve(&selection(TableOrigin::Structural, "C24")).unwrap();
        // 0.7 × 0.4 / 1.4 = 0.2 is below the cap 0.06 × 7.0 = 0.42
        assert!(approx_eq(p.f_t90d_mpa, 0.2));
        // D70: 0.7 × 13.5 / 1.4 = 6.75 exceeds 0.25 × f_c0d = 4.25
        let d70 = resolve(&selection(TableOrigin::Structural, "D70")).unwrap();
        assert!(approx_eq(d70.f_c90d_mpa, 0.25 * d70.f_c0d_mpa));
    }

    #[test]
    fn test_cap_limits_perpendicular_strength() {
        // no tabulated class reaches the 6 % tension cap, so exercise it directly
        assert!(approx_eq(capped(0.5, TENSION_PERPENDICULAR_CAP, 7.0), 0.42));
        assert!(approx_eq(capped(0.2, TENSION_PERPENDICULAR_CAP, 7.0), 0.2));
        assert!(approx_eq(capped(5.0, COMPRESSION_PERPENDICULAR_CAP, 12.0), 3.0));
    }

    #[test]
    fn test_hardwood_compression_perpendicular_is_capped() {
        // D40: 0.7 × 8.3 / 1.4 = 4.15 against 0.25 × 13.0 = 3.25
        let p = resolve(&selection(TableOrigin::Structural, "D40")).unwrap();
        assert!(approx_eq(p.f_c0d_mpa, 13.0));
        assert!(approx_eq(p.f_c90d_mpa, 3.25));
        assert!(p.kmod * p.characteristic.f_c90k_mpa / GAMMA_C > p.f_c90d_mpa);

        let c24 = resolve(&selection(TableOrigin::Structural, "C24")).unwrap();
        assert!(approx_eq(c24.f_c90d_mpa, 1.25));
    }

    #[test]
    fn test_native_bending_estimated() {
        let p = resolve(&selection(TableOrigin::Native, "D30")).unwrap();
        assert!(p.bending_estimated);
        assert!(approx_eq(p.f_md_mpa, p.f_c0d_mpa));
        assert!(approx_eq(p.f_c0d_mpa, 0.7 * 30.0 / 1.4));
    }

    #[test]
    fn test_kmod_combination() {
        let mut sel = selection(TableOrigin::Structural, "C30");
        sel.load_duration = LoadDurationClass::Instantaneous;
        sel.moisture = MoistureClass::Class4;
        let p = resolve(&sel).unwrap();
        assert!(approx_eq(p.kmod, 1.10 * 0.70));
    }

    #[test]
    fn test_unknown_class_propagates() {
        let err = resolve(&selection(TableOrigin::Structural, "X1")).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CLASS");
    }

    #[test]
    fn test_selection_json() {
        let json = r#"{"origin":"estrutural","class":"C20","load_duration":"media","moisture":"classe_2"}"#;
        let sel: MaterialSelection = serde_json::from_str(json).unwrap();
        assert_eq!(sel.origin, TableOrigin::Structural);
        assert_eq!(sel.load_duration, LoadDurationClass::Medium);
        assert_eq!(sel.moisture, MoistureClass::Class2);
    }
}

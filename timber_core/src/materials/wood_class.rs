//! Wood Strength Classes (NBR 7190-1:2022)
//!
//! Characteristic values for the structural classes (C14-C50 softwoods,
//! D18-D70 hardwoods) and the native hardwood classes D20-D60 of Table 2.
//!
//! Table rows are loaded from TOML at compile time. The native table only
//! publishes f_c0k, f_vk, E_0,mean and mean density; the remaining values
//! are completed here from the code's standard ratios, and bending strength
//! is taken equal to f_c0k (reported as estimated).

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::generated::wood_class_data::{ClassRecord, WOOD_CLASSES};

/// Which characteristic-value table a class is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TableOrigin {
    /// Structural classes C14-C50 and D18-D70
    #[default]
    Structural,
    /// Native hardwood classes D20-D60 (Table 2)
    Native,
}

impl TableOrigin {
    /// Key used in the generated table
    pub fn code(&self) -> &'static str {
        match self {
            TableOrigin::Structural => "structural",
            TableOrigin::Native => "native",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "structural" | "estrutural" => Ok(TableOrigin::Structural),
            "native" | "nativa" => Ok(TableOrigin::Native),
            _ => Err(CalcError::unknown_class(s, "")),
        }
    }
}

impl TryFrom<String> for TableOrigin {
    type Error = CalcError;
    fn try_from(s: String) -> CalcResult<Self> {
        Self::from_str_flexible(&s)
    }
}

impl fmt::Display for TableOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn index_key(origin: &str, code: &str) -> String {
    format!("{origin}/{code}")
}

static CLASS_INDEX: Lazy<HashMap<String, &'static ClassRecord>> =
    Lazy::new(|| WOOD_CLASSES.iter().map(|r| (index_key(r.origin, r.code), r)).collect());

/// Complete set of characteristic values for one class (MPa, kg/m³)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicValues {
    /// Bending strength f_mk
    pub f_mk_mpa: f64,
    /// Tension parallel f_t0k
    pub f_t0k_mpa: f64,
    /// Tension perpendicular f_t90k
    pub f_t90k_mpa: f64,
    /// Compression parallel f_c0k
    pub f_c0k_mpa: f64,
    /// Compression perpendicular f_c90k
    pub f_c90k_mpa: f64,
    /// Shear f_vk
    pub f_vk_mpa: f64,
    /// Mean modulus parallel E_0,mean
    pub e_0_mean_mpa: f64,
    /// 5% modulus parallel E_0,05
    pub e_0_05_mpa: f64,
    /// Mean modulus perpendicular E_90,mean
    pub e_90_mean_mpa: f64,
    /// Mean shear modulus G_mean
    pub g_mean_mpa: f64,
    /// Characteristic density ρ_k
    pub density_k: f64,
    /// Mean density ρ_mean
    pub density_mean: f64,
    /// f_mk was not tabulated and was taken as f_c0k
    pub bending_estimated: bool,
}

impl CharacteristicValues {
    /// Look up a class and fill in untabulated values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use timber_core::materials::{CharacteristicValues, TableOrigin};
    ///
    /// let c24 = CharacteristicValues::lookup(TableOrigin::Structural, "C24").unwrap();
    /// assert_eq!(c24.f_mk_mpa, 24.0);
    /// assert!(!c24.bending_estimated);
    /// ```
    pub fn lookup(origin: TableOrigin, class: &str) -> CalcResult<Self> {
        let key = class.trim().to_uppercase();
        let record = CLASS_INDEX
            .get(&index_key(origin.code(), &key))
            .ok_or_else(|| CalcError::unknown_class(origin.code(), class))?;
        Ok(Self::complete(record))
    }

    fn complete(r: &ClassRecord) -> Self {
        let e = r.e_0_mean;
        CharacteristicValues {
            f_mk_mpa: r.f_mk.unwrap_or(r.f_c0k),
            f_t0k_mpa: r.f_t0k.unwrap_or(r.f_c0k),
            f_t90k_mpa: r.f_t90k.unwrap_or(0.05 * r.f_c0k),
            f_c0k_mpa: r.f_c0k,
            f_c90k_mpa: r.f_c90k.unwrap_or(0.25 * r.f_c0k),
            f_vk_mpa: r.f_vk,
            e_0_mean_mpa: e,
            e_0_05_mpa: r.e_0_05.unwrap_or(0.7 * e),
            e_90_mean_mpa: r.e_90_mean.unwrap_or(e / 20.0),
            g_mean_mpa: r.g_mean.unwrap_or(e / 16.0),
            density_k: r.density_k.unwrap_or(r.density_mean / 1.2),
            density_mean: r.density_mean,
            bending_estimated: r.f_mk.is_none(),
        }
    }
}

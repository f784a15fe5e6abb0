//! # timber_core - NBR 7190-1 Timber Member Verification
//!
//! `timber_core` verifies rectangular solid-timber members against the
//! ultimate and serviceability limit states of ABNT NBR 7190-1:2022. All
//! inputs and outputs are JSON-serializable, so a request can come from a
//! form, a file or another program and the report can go back the same way.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of the request; code tables are static
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Total**: [`evaluate`] never panics; problems become `Error` results
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use timber_core::{evaluate, CheckId, InputSpecification};
//!
//! let input: InputSpecification = serde_json::from_str(r#"{
//!     "label": "Purlin P-3",
//!     "material": { "origin": "structural", "class": "C24", "load_duration": "long", "moisture": 1 },
//!     "geometry": { "width_mm": 60.0, "height_mm": 140.0, "length_m": 3.0 },
//!     "actions": { "shear_n": 5000.0, "moment_x_nm": 1000.0 },
//!     "stability": { "l1_mm": 1000.0 },
//!     "selected_checks": ["shear", "bending_straight", "lateral_stability"]
//! }"#).unwrap();
//!
//! let report = evaluate(&input);
//! assert!(report.is_approved());
//! assert!(report.result(CheckId::Shear).is_some());
//! ```
//!
//! ## Modules
//!
//! - [`input`] - The verification request and its validation
//! - [`materials`] - Characteristic values and design strengths
//! - [`equations`] - Section, stability and deflection formulas
//! - [`checks`] - The NBR 7190-1 checks and their registry
//! - [`report`] - Aggregation into an overall verdict
//! - [`code_tables`] - kmod, β_M, creep and other tabulated values
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod checks;
pub mod code_tables;
pub mod equations;
pub mod errors;
pub mod generated;
pub mod input;
pub mod materials;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use checks::{CheckId, Ratio, Verdict, VerificationResult};
pub use errors::{CalcError, CalcResult};
pub use input::{DesignActions, InputSpecification, MemberGeometry, ServiceLoads, StabilityParameters};
pub use materials::{MaterialProperties, MaterialSelection, TableOrigin};
pub use report::{evaluate, AggregateReport, OverallVerdict};

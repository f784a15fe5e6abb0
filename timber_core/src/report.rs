//! # Aggregate Report
//!
//! Runs the selected checks for one request and folds the results into an
//! overall verdict.
//!
//! [`evaluate`] is total: invalid input, unknown classes and arithmetic
//! problems all surface as `Error` results inside the report, never as a
//! panic or an `Err`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checks::{CheckContext, CheckId, Ratio, Verdict, VerificationResult};
use crate::equations::GeometricProperties;
use crate::input::InputSpecification;
use crate::materials::MaterialProperties;

/// Verdict for the member as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallVerdict {
    Approved,
    Rejected,
}

impl fmt::Display for OverallVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallVerdict::Approved => write!(f, "APPROVED"),
            OverallVerdict::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A check that failed or could not be evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub check: CheckId,
    pub code_reference: String,
    pub verdict: Verdict,
    pub ratio: Option<Ratio>,
    pub diagnostic: Option<String>,
}

impl From<&VerificationResult> for FailureEntry {
    fn from(result: &VerificationResult) -> Self {
        FailureEntry {
            check: result.check,
            code_reference: result.check.code_reference().to_string(),
            verdict: result.verdict,
            ratio: result.ratio,
            diagnostic: result.diagnostic.clone(),
        }
    }
}

/// Outcome of evaluating one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub label: String,
    pub overall: OverallVerdict,
    /// Applicable results, in registry order
    pub results: Vec<VerificationResult>,
    /// Failed or errored checks, in registry order
    pub failures: Vec<FailureEntry>,
    /// Selected checks that did not apply
    pub not_applicable: Vec<CheckId>,
    /// Resolved material, when the class could be found
    pub material: Option<MaterialProperties>,
    /// Section properties, when the dimensions were valid
    pub geometry: Option<GeometricProperties>,
}

impl AggregateReport {
    fn from_results(
        label: &str,
        selected: usize,
        results: Vec<VerificationResult>,
        material: Option<MaterialProperties>,
        geometry: Option<GeometricProperties>,
    ) -> Self {
        let (results, skipped): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.applicable);
        let failures: Vec<FailureEntry> = results
            .iter()
            .filter(|r| r.verdict.rejects())
            .map(FailureEntry::from)
            .collect();
        let overall = if failures.is_empty() {
            OverallVerdict::Approved
        } else {
            OverallVerdict::Rejected
        };

        tracing::info!(
            label,
            selected,
            applicable = results.len(),
            failures = failures.len(),
            %overall,
            "member evaluated"
        );

        AggregateReport {
            label: label.to_string(),
            overall,
            results,
            failures,
            not_applicable: skipped.into_iter().map(|r| r.check).collect(),
            material,
            geometry,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.overall == OverallVerdict::Approved
    }

    /// Result of a given check, if it was selected and applicable
    pub fn result(&self, check: CheckId) -> Option<&VerificationResult> {
        self.results.iter().find(|r| r.check == check)
    }

    /// Largest finite ratio across the applicable results
    pub fn governing_ratio(&self) -> Option<(CheckId, f64)> {
        self.results
            .iter()
            .filter_map(|r| r.ratio.and_then(|ratio| ratio.value()).map(|v| (r.check, v)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Evaluate every selected check for a request.
///
/// # Example
///
/// ```rust
/// use timber_core::{evaluate, InputSpecification};
///
/// let input: InputSpecification = serde_json::from_str(r#"{
///     "material": { "origin": "structural", "class": "C24", "load_duration": "long", "moisture": 1 },
///     "geometry": { "width_mm": 60.0, "height_mm": 140.0, "length_m": 3.0 },
///     "actions": { "shear_n": 5000.0 },
///     "selected_checks": ["shear", "tension_parallel"]
/// }"#).unwrap();
///
/// let report = evaluate(&input);
/// assert!(report.is_approved());
/// assert_eq!(report.results.len(), 1);
/// assert_eq!(report.not_applicable.len(), 1);
/// ```
pub fn evaluate(input: &InputSpecification) -> AggregateReport {
    let selected = input.selected_checks.len();

    if let Err(error) = input.validate() {
        tracing::warn!(label = %input.label, code = error.error_code(), %error, "input rejected");
        let results = input
            .selected_checks
            .iter()
            .map(|id| VerificationResult::error(*id, &error))
            .collect();
        return AggregateReport::from_results(&input.label, selected, results, None, None);
    }

    let ctx = CheckContext::new(input);
    let results = input.selected_checks.iter().map(|id| id.evaluate(&ctx)).collect();

    AggregateReport::from_results(
        &input.label,
        selected,
        results,
        ctx.material().ok().copied(),
        ctx.geometry().ok().copied(),
    )
}

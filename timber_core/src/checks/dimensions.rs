//! Minimum section dimensions (NBR 7190-1 9.2.1).
//!
//! Pass/fail only: the section must meet both the minimum area and the
//! minimum thickness of its piece category.

use serde::{Deserialize, Serialize};

use crate::code_tables::{PieceCategory, TOL};
use crate::errors::CalcResult;

use super::{CheckContext, CheckDetails, CheckId, Verdict, VerificationResult};

/// Section against the minimums of its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionDetails {
    pub piece_category: PieceCategory,
    pub area_mm2: f64,
    pub required_area_mm2: f64,
    pub thickness_mm: f64,
    pub required_thickness_mm: f64,
    pub area_ok: bool,
    pub thickness_ok: bool,
}

/// Minimum dimensions; needs geometry only
pub fn minimum_dimensions(ctx: &CheckContext<'_>) -> CalcResult<VerificationResult> {
    let geometry = ctx.geometry()?;
    let category = ctx.input.geometry.piece_category;

    let required_area = category.min_area_mm2();
    let required_thickness = category.min_thickness_mm();
    let thickness = geometry.min_thickness_mm();

    let details = DimensionDetails {
        piece_category: category,
        area_mm2: geometry.area_mm2,
        required_area_mm2: required_area,
        thickness_mm: thickness,
        required_thickness_mm: required_thickness,
        area_ok: geometry.area_mm2 + TOL >= required_area,
        thickness_ok: thickness + TOL >= required_thickness,
    };

    let verdict = if details.area_ok && details.thickness_ok {
        Verdict::Approved
    } else {
        Verdict::Failed
    };

    Ok(VerificationResult {
        check: CheckId::MinimumDimensions,
        applicable: true,
        verdict,
        ratio: None,
        details: CheckDetails::Dimensions(details),
        diagnostic: None,
    })
}

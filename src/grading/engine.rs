//! The mGRADE formula chain.
//!
//! A fixed composition of averages, min-max normalizations and weighted
//! blends, evaluated in a documented order. The intermediate quantities are
//! part of the public contract and are exposed through [`GradeBreakdown`].

use crate::profile::Profile;
use thiserror::Error;

/// Default number of decimal digits in the rounded grade.
pub const DEFAULT_PRECISION: i32 = 4;

/// Fixed reference ranges for the normalization steps. Each step maps its
/// composite onto [0, 1] as `(value - MIN) / SPAN`.
mod ranges {
    /// Total rate-of-torque composite, reference range [1, 80000].
    pub const T_ROT_MIN: f64 = 1.0;
    pub const T_ROT_SPAN: f64 = 79_999.0;

    /// Vertical power composite, reference range [1, 13].
    pub const V_POW_MIN: f64 = 1.0;
    pub const V_POW_SPAN: f64 = 12.0;

    /// Age-normalized performance output, reference range [0.01, 250].
    pub const PRO_MIN: f64 = 0.01;
    pub const PRO_SPAN: f64 = 249.0;

    /// Mechanical score, reference range [0.077, 1].
    pub const MEC_MIN: f64 = 0.077;
    pub const MEC_SPAN: f64 = 0.923;
}

/// Blend weights for the two weighted-average steps.
mod weights {
    /// mPR = nvPOW * POW + ntROT * ROT
    pub const POW: f64 = 0.4;
    pub const ROT: f64 = 0.6;

    /// mGRADE = nMEC * MEC + nPRO * PRO
    pub const MEC: f64 = 0.6;
    pub const PRO: f64 = 0.4;
}

/// Errors that can occur when computing a grade.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradeError {
    #[error("age must be positive: the performance-output composite divides by age")]
    ZeroAge,
}

/// Every intermediate named quantity of the chain, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBreakdown {
    /// Glenohumeral rate-of-torque composite.
    pub gh_rot: f64,
    /// Hip rate-of-torque composite.
    pub h_rot: f64,
    /// Total rate-of-torque composite.
    pub t_rot: f64,
    /// `t_rot` normalized against [1, 80000].
    pub nt_rot: f64,
    /// Vertical power composite.
    pub v_pow: f64,
    /// `v_pow` normalized against [1, 13].
    pub nv_pow: f64,
    /// Movement performance rating, blend of `nv_pow` and `nt_rot`.
    pub m_pr: f64,
    /// Age-normalized performance output.
    pub pro: f64,
    /// `pro` normalized against [0.01, 250].
    pub n_pro: f64,
    /// Mechanical score normalized against [0.077, 1].
    pub n_mec: f64,
}

impl GradeBreakdown {
    /// `(label, value)` pairs in evaluation order, for display.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("ghROT", self.gh_rot),
            ("hROT", self.h_rot),
            ("tROT", self.t_rot),
            ("ntROT", self.nt_rot),
            ("vPOW", self.v_pow),
            ("nvPOW", self.nv_pow),
            ("mPR", self.m_pr),
            ("PRO", self.pro),
            ("nPRO", self.n_pro),
            ("nMEC", self.n_mec),
        ]
    }
}

/// A computed grade together with its intermediate quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeResult {
    /// Final composite score, rounded to the requested precision.
    pub grade: f64,
    pub breakdown: GradeBreakdown,
}

/// Compute the composite mGRADE score for a measurement profile.
///
/// Pure: identical inputs always produce the identical rounded output.
/// Non-finite measurements propagate through the arithmetic per IEEE-754.
/// The only rejected input is a zero age, which would otherwise divide by
/// zero in the performance-output step.
///
/// The final value is rounded to `precision` decimal digits, half away
/// from zero (the `f64::round` convention).
pub fn compute_grade(profile: &Profile, precision: i32) -> Result<GradeResult, GradeError> {
    if profile.age == 0 {
        return Err(GradeError::ZeroAge);
    }

    let gh_rot = (profile.gh_n + profile.gh_rfd) / 2.0;
    let h_rot = (profile.h_n + profile.h_rfd) / 2.0;
    let t_rot = (gh_rot + h_rot) / 2.0;
    let nt_rot = (t_rot - ranges::T_ROT_MIN) / ranges::T_ROT_SPAN;

    let v_pow = (profile.cmj + profile.mrsi_p + profile.mrsi_d) / 3.0;
    let nv_pow = (v_pow - ranges::V_POW_MIN) / ranges::V_POW_SPAN;

    let m_pr = nv_pow * weights::POW + nt_rot * weights::ROT;

    let pro = (((profile.tser + profile.tsir + m_pr + v_pow + t_rot + profile.mtp) / 6.0) / 100.0)
        / f64::from(profile.age);
    let n_pro = (pro - ranges::PRO_MIN) / ranges::PRO_SPAN;

    let n_mec = (profile.mec - ranges::MEC_MIN) / ranges::MEC_SPAN;

    let grade = n_mec * weights::MEC + n_pro * weights::PRO;

    Ok(GradeResult {
        grade: round_to(grade, precision),
        breakdown: GradeBreakdown {
            gh_rot,
            h_rot,
            t_rot,
            nt_rot,
            v_pow,
            nv_pow,
            m_pr,
            pro,
            n_pro,
            n_mec,
        },
    })
}

/// Round to `precision` decimal digits, half away from zero.
fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

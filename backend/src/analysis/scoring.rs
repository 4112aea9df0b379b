//! Deterministic placeholder scoring derived from image geometry.
//!
//! Scores are held in integer thousandths so that label thresholds and
//! three-decimal rounding are exact. Confidence is rounded half away from
//! zero on the exact value: a raw score of 1 gives 0.5005, reported as 0.501.
//!
//! Every odd raw score puts confidence exactly on a half. Rounding the
//! binary float instead (e.g. Python's `round(0.5005, 3)`, which yields 0.5)
//! can land on the other side, so confidence for odd raw scores may differ
//! from a float-based implementation by 0.001. Severity and labels never do.

use shared::Label;

use super::features::ImageDimensions;

const SCALE: u64 = 1000;
const SEVERE_ABOVE: u16 = 800;
const MODERATE_ABOVE: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Severity in thousandths, `(width * height) mod 1000`.
    raw: u16,
}

impl Score {
    pub fn from_dimensions(dimensions: ImageDimensions) -> Self {
        let raw = (dimensions.pixel_count() % SCALE) as u16;
        Self { raw }
    }

    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Bucket for the unrounded severity; first match wins.
    pub fn label(&self) -> Label {
        if self.raw > SEVERE_ABOVE {
            Label::Severe
        } else if self.raw > MODERATE_ABOVE {
            Label::Moderate
        } else {
            Label::Minor
        }
    }

    /// Severity in [0.0, 1.0], already exact to three decimals.
    pub fn severity(&self) -> f64 {
        f64::from(self.raw) / SCALE as f64
    }

    /// `0.5 + severity * 0.5`, rounded to three decimals.
    pub fn confidence(&self) -> f64 {
        let milli = 500 + (u32::from(self.raw) + 1) / 2;
        f64::from(milli) / SCALE as f64
    }
}

//! Darkness and channel-difference scores used to judge readability.

use crate::color::Color;

/// Weighted luma in `[0, 255]`.
pub type DarknessScore = f64;
/// Sum of per-channel absolute differences, each channel in `[0, 255]`.
pub type ContrastDifference = f64;

const LUMA_RED: f64 = 0.299;
const LUMA_GREEN: f64 = 0.587;
const LUMA_BLUE: f64 = 0.114;

/// ITU-R BT.601 luma of `color`, computed on clamped byte-range channels.
#[must_use]
pub fn darkness_score(color: &Color) -> DarknessScore {
    let [r, g, b] = color.scaled_rgb();
    LUMA_RED * r + LUMA_GREEN * g + LUMA_BLUE * b
}

/// Channel-wise distance between two colors. Alpha is ignored.
#[must_use]
pub fn contrast_difference(a: &Color, b: &Color) -> ContrastDifference {
    a.scaled_rgb()
        .into_iter()
        .zip(b.scaled_rgb())
        .map(|(x, y)| x.max(y) - x.min(y))
        .sum()
}

//! Iterative search for a foreground color that reads well on a background.
//!
//! The candidate's channels are stepped darker (on light backgrounds) or
//! brighter (on dark ones) until both the brightness difference and the
//! color difference reach their thresholds, or the step budget runs out.
//! Running out is not an error: the last candidate is returned and
//! [`MatchOutcome::readable`] is `false`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::{CHANNEL_MAX, Color};
use crate::error::Error;
use crate::processing::color::{PixelSampler, Region};
use crate::processing::score::{
    ContrastDifference, DarknessScore, contrast_difference, darkness_score,
};

/// Number of adjustment steps attempted before giving up.
pub const STEP_COUNT: u32 = 55;

/// How candidate channels are stepped on each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Scale each channel by `index / 55`, with large early jumps and fine late ones.
    #[default]
    Linear,
}

/// Direction the candidate is pushed in, chosen from the background's darkness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Adjustment {
    Darken,
    Brighten,
}

impl MatchStrategy {
    /// Factor applied on the zero-based `step`.
    ///
    /// Darkening walks the index from 55 down to 1, brightening from 0 up to 54.
    #[must_use]
    pub fn factor(self, adjustment: Adjustment, step: u32) -> f64 {
        match self {
            Self::Linear => {
                let index = match adjustment {
                    Adjustment::Darken => STEP_COUNT - step,
                    Adjustment::Brighten => step,
                };
                f64::from(index) / f64::from(STEP_COUNT)
            }
        }
    }

    /// Next value of a byte-range channel.
    ///
    /// Neither direction clamps: a brightened channel may land above 255 on the
    /// step that crosses the guard, after which it no longer moves.
    #[must_use]
    pub fn adjust(self, adjustment: Adjustment, channel: f64, factor: f64) -> f64 {
        match (self, adjustment) {
            (Self::Linear, Adjustment::Darken) => {
                if channel > 1.0 {
                    (channel * factor).floor()
                } else {
                    0.0
                }
            }
            (Self::Linear, Adjustment::Brighten) => {
                if channel < CHANNEL_MAX {
                    (channel + channel * factor + 1.0).floor()
                } else {
                    channel
                }
            }
        }
    }
}

/// Acceptance limits, defaulting to the W3C brightness/color difference pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Thresholds {
    /// Minimum `|darkness(candidate) - darkness(background)|`.
    pub brightness_difference: DarknessScore,
    /// Minimum channel-sum difference.
    pub color_difference: ContrastDifference,
    /// Backgrounds at or above this darkness score are treated as light.
    pub light_background: DarknessScore,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            brightness_difference: 125.0,
            color_difference: 300.0,
            light_background: 125.0,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub fn accepts(
        &self,
        brightness_difference: DarknessScore,
        color_difference: ContrastDifference,
    ) -> bool {
        brightness_difference >= self.brightness_difference
            && color_difference >= self.color_difference
    }
}

/// What a single iteration produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchStep {
    /// One-based iteration number.
    pub step: u32,
    pub candidate: Color,
    pub brightness_difference: DarknessScore,
    pub color_difference: ContrastDifference,
}

/// Final result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MatchOutcome {
    pub background: Color,
    pub color: Color,
    pub adjustment: Adjustment,
    /// Iterations run; `0` only if the budget were empty.
    pub steps: u32,
    pub brightness_difference: DarknessScore,
    pub color_difference: ContrastDifference,
    /// Whether `color` met both thresholds.
    pub readable: bool,
}

/// Receives every iteration of a search.
pub trait MatchObserver {
    fn on_step(&mut self, step: &MatchStep);
}

/// Discards all steps.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl MatchObserver for Silent {
    fn on_step(&mut self, _step: &MatchStep) {}
}

/// Logs a human-readable line per step.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceLog;

impl MatchObserver for TraceLog {
    fn on_step(&mut self, step: &MatchStep) {
        info!(
            "match step {} candidate={} brightness-diff={:.2} color-diff={:.2}",
            step.step, step.candidate, step.brightness_difference, step.color_difference
        );
    }
}

impl MatchObserver for Vec<MatchStep> {
    fn on_step(&mut self, step: &MatchStep) {
        self.push(*step);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matcher {
    strategy: MatchStrategy,
    thresholds: Thresholds,
}

impl Matcher {
    #[must_use]
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            thresholds: Thresholds::default(),
        }
    }

    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Search without observing intermediate steps.
    #[must_use]
    pub fn find(&self, background: Color, starting_from: Color) -> Color {
        self.run(background, starting_from, &mut Silent).color
    }

    /// Step `starting_from` until it reads well on `background`.
    pub fn run(
        &self,
        background: Color,
        starting_from: Color,
        observer: &mut dyn MatchObserver,
    ) -> MatchOutcome {
        let background_darkness = darkness_score(&background);
        let adjustment = if background_darkness >= self.thresholds.light_background {
            Adjustment::Darken
        } else {
            Adjustment::Brighten
        };

        let mut channels = starting_from.scaled_rgb();
        let mut outcome = MatchOutcome {
            background,
            color: starting_from,
            adjustment,
            steps: 0,
            brightness_difference: (darkness_score(&starting_from) - background_darkness).abs(),
            color_difference: contrast_difference(&background, &starting_from),
            readable: false,
        };

        for step in 0..STEP_COUNT {
            let factor = self.strategy.factor(adjustment, step);
            for channel in &mut channels {
                *channel = self.strategy.adjust(adjustment, *channel, factor);
            }
            let [r, g, b] = channels;
            let candidate = Color::from_scaled_rgb(r, g, b);
            let report = MatchStep {
                step: step + 1,
                candidate,
                brightness_difference: (darkness_score(&candidate) - background_darkness).abs(),
                color_difference: contrast_difference(&background, &candidate),
            };
            observer.on_step(&report);

            outcome.color = candidate;
            outcome.steps = report.step;
            outcome.brightness_difference = report.brightness_difference;
            outcome.color_difference = report.color_difference;
            outcome.readable = self
                .thresholds
                .accepts(report.brightness_difference, report.color_difference);
            if outcome.readable {
                break;
            }
        }

        debug!(
            background = %background,
            result = %outcome.color,
            adjustment = ?adjustment,
            steps = outcome.steps,
            readable = outcome.readable,
            "readability search finished"
        );
        outcome
    }
}

/// Adjust `starting_from` until it is readable on `background`.
///
/// Always returns a color; when no step satisfies both thresholds the last
/// candidate is returned.
#[must_use]
pub fn find_readable_color(
    background: Color,
    starting_from: Color,
    strategy: MatchStrategy,
) -> Color {
    Matcher::new(strategy).find(background, starting_from)
}

/// Sample `region` and search for a readable color on it.
///
/// Without a `preferred` color the search starts from the background itself.
/// `verbose` logs every step; it never changes the result.
///
/// # Errors
/// Returns [`Error::InvalidBackgroundContent`] if sampling fails.
pub fn match_region<S>(
    sampler: &S,
    region: Region,
    preferred: Option<Color>,
    matcher: &Matcher,
    verbose: bool,
) -> Result<MatchOutcome, Error>
where
    S: PixelSampler + ?Sized,
{
    let background = sampler.sample(region)?;
    let starting_from = preferred.unwrap_or(background);
    let outcome = if verbose {
        matcher.run(background, starting_from, &mut TraceLog)
    } else {
        matcher.run(background, starting_from, &mut Silent)
    };
    Ok(outcome)
}

/// Sample `region` and return the first readable color found on it.
///
/// # Errors
/// Returns [`Error::InvalidBackgroundContent`] if sampling fails.
pub fn find_first_readable_color<S>(
    sampler: &S,
    region: Region,
    preferred: Option<Color>,
    strategy: MatchStrategy,
    verbose: bool,
) -> Result<Color, Error>
where
    S: PixelSampler + ?Sized,
{
    match_region(sampler, region, preferred, &Matcher::new(strategy), verbose)
        .map(|outcome| outcome.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_factors_descend_from_one() {
        let s = MatchStrategy::Linear;
        assert_eq!(s.factor(Adjustment::Darken, 0), 1.0);
        assert_eq!(s.factor(Adjustment::Darken, STEP_COUNT - 1), 1.0 / 55.0);
    }

    #[test]
    fn brighten_factors_ascend_from_zero() {
        let s = MatchStrategy::Linear;
        assert_eq!(s.factor(Adjustment::Brighten, 0), 0.0);
        assert_eq!(s.factor(Adjustment::Brighten, STEP_COUNT - 1), 54.0 / 55.0);
    }

    #[test]
    fn darken_zeroes_small_channels() {
        let s = MatchStrategy::Linear;
        assert_eq!(s.adjust(Adjustment::Darken, 1.0, 1.0), 0.0);
        assert_eq!(s.adjust(Adjustment::Darken, 0.5, 1.0), 0.0);
        assert_eq!(s.adjust(Adjustment::Darken, 255.0, 54.0 / 55.0), 250.0);
    }

    #[test]
    fn brighten_overshoots_then_freezes() {
        let s = MatchStrategy::Linear;
        assert_eq!(s.adjust(Adjustment::Brighten, 232.0, 9.0 / 55.0), 270.0);
        assert_eq!(s.adjust(Adjustment::Brighten, 270.0, 10.0 / 55.0), 270.0);
        assert_eq!(s.adjust(Adjustment::Brighten, 255.0, 0.5), 255.0);
    }

    #[test]
    fn thresholds_need_both_limits() {
        let t = Thresholds::default();
        assert!(t.accepts(125.0, 300.0));
        assert!(!t.accepts(124.9, 765.0));
        assert!(!t.accepts(255.0, 299.9));
    }

    #[test]
    fn observer_sees_every_step() {
        let mut steps: Vec<MatchStep> = Vec::new();
        let outcome = Matcher::default().run(Color::WHITE, Color::WHITE, &mut steps);
        assert_eq!(steps.len() as u32, outcome.steps);
        assert_eq!(steps.last().map(|s| s.candidate), Some(outcome.color));
        assert!(steps.windows(2).all(|w| w[1].step == w[0].step + 1));
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Result, ensure};
use serde::Deserialize;
use tracing::debug;

use crate::color::Color;
use crate::error::Error;
use crate::matcher::{MatchStrategy, Matcher, Thresholds};
use crate::processing::color::Region;

/// Settings for a readability search, usually loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Area of the image to sample; the whole image when absent.
    pub region: Option<Region>,
    /// Starting candidate; the sampled background when absent.
    pub preferred_color: Option<Color>,
    pub strategy: MatchStrategy,
    /// Log every search step.
    pub verbose: bool,
    pub thresholds: Thresholds,
}

impl Configuration {
    /// Check thresholds are usable numbers.
    ///
    /// Regions are not checked here; a degenerate region is reported by the
    /// sampler when it is used.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("brightness-difference", t.brightness_difference),
            ("color-difference", t.color_difference),
            ("light-background", t.light_background),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "thresholds.{name} must be a non-negative number, got {value}"
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.strategy).with_thresholds(self.thresholds)
    }
}

/// Load a [`Configuration`] from a YAML file.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not a valid configuration.
pub fn from_yaml_file(path: &Path) -> Result<Configuration, Error> {
    let text = fs::read_to_string(path)?;
    let cfg: Configuration = serde_yaml::from_str(&text)?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(cfg)
}

//! Background sampling: averages a region of pixels into a single [`Color`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{GenericImageView, RgbaImage};
use serde::Deserialize;
use tracing::debug;

use crate::color::{CHANNEL_MAX, Color};
use crate::error::Error;

/// Rectangular area of a pixel surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u32; 4]")]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width` x `height` surface.
    #[must_use]
    pub const fn covering(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with a `width` x `height` surface anchored at the origin.
    ///
    /// Returns `None` when nothing of the region lies on the surface.
    #[must_use]
    pub fn clip(&self, width: u32, height: u32) -> Option<Self> {
        if self.is_empty() || self.x >= width || self.y >= height {
            return None;
        }
        Some(Self::new(
            self.x,
            self.y,
            self.width.min(width - self.x),
            self.height.min(height - self.y),
        ))
    }
}

impl From<[u32; 4]> for Region {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Region {
    type Err = Error;

    /// Parses `X,Y,W,H`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts = value
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidRegion(value.to_string()))?;
        let fields: [u32; 4] = parts
            .try_into()
            .map_err(|_| Error::InvalidRegion(value.to_string()))?;
        Ok(Self::from(fields))
    }
}

/// A source of averaged background colors.
pub trait PixelSampler {
    /// Average `region` into one color.
    ///
    /// # Errors
    /// Returns [`Error::InvalidBackgroundContent`] if the region yields no pixels.
    fn sample(&self, region: Region) -> Result<Color, Error>;
}

impl PixelSampler for RgbaImage {
    fn sample(&self, region: Region) -> Result<Color, Error> {
        let rgba = box_filter(self, region)?;
        let color = color_from_sample(rgba);
        debug!(%region, ?rgba, background = %color, "sampled background");
        Ok(color)
    }
}

/// Collapse every pixel of `region` into one RGBA quadruple (rounded mean).
///
/// # Errors
/// Returns [`Error::InvalidBackgroundContent`] if the region is empty or
/// entirely outside the image.
pub fn box_filter(img: &RgbaImage, region: Region) -> Result<[u8; 4], Error> {
    let clipped = region.clip(img.width(), img.height()).ok_or_else(|| {
        Error::InvalidBackgroundContent(format!(
            "region {region} has no pixels on a {}x{} surface",
            img.width(),
            img.height()
        ))
    })?;
    let view = image::imageops::crop_imm(img, clipped.x, clipped.y, clipped.width, clipped.height);
    let mut accum = [0u64; 4];
    for (_, _, pixel) in view.pixels() {
        for (sum, channel) in accum.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }
    let n = u64::from(clipped.width) * u64::from(clipped.height);
    Ok(accum.map(|sum| ((sum + n / 2) / n) as u8))
}

/// Convert a sampled RGBA quadruple into a [`Color`].
///
/// Chromatic channels are weighted by the sample's alpha; a fully transparent
/// sample keeps its raw channels and reports zero alpha.
#[must_use]
pub fn color_from_sample(rgba: [u8; 4]) -> Color {
    let [r, g, b, a] = rgba.map(f64::from);
    if rgba[3] > 0 {
        let multiplier = a / CHANNEL_MAX / CHANNEL_MAX;
        Color::new(r * multiplier, g * multiplier, b * multiplier, a / CHANNEL_MAX)
    } else {
        Color::new(r / CHANNEL_MAX, g / CHANNEL_MAX, b / CHANNEL_MAX, 0.0)
    }
}

/// Average color of the whole image.
///
/// # Errors
/// Returns [`Error::InvalidBackgroundContent`] for an empty image.
pub fn average_color(img: &RgbaImage) -> Result<Color, Error> {
    img.sample(Region::covering(img.width(), img.height()))
}

/// Decode an image file into RGBA8 pixels ready for sampling.
///
/// # Errors
/// Returns [`Error::Image`] if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<RgbaImage, Error> {
    let img = image::open(path)?.to_rgba8();
    debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded image");
    Ok(img)
}

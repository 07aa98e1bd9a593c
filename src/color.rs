//! Normalized RGBA color value shared by the sampler, scorer and matcher.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Error;

/// Upper bound of a channel once scaled to byte range.
pub const CHANNEL_MAX: f64 = 255.0;

/// An RGBA color with channels normalized so that `[0, 1]` is the nominal range.
///
/// Channels are stored as given. The matcher can produce values slightly above
/// `1.0`; [`Color::scaled_rgb`] clamps before anything consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Broadcast a single gray component to all three chromatic channels.
    #[must_use]
    pub const fn from_gray(white: f64, alpha: f64) -> Self {
        Self::new(white, white, white, alpha)
    }

    /// Build an opaque color from channel values already in byte range.
    #[must_use]
    pub fn from_scaled_rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red / CHANNEL_MAX, green / CHANNEL_MAX, blue / CHANNEL_MAX, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba.map(|c| f64::from(c) / CHANNEL_MAX);
        Self::new(r, g, b, a)
    }

    pub const fn red(&self) -> f64 {
        self.red
    }

    pub const fn green(&self) -> f64 {
        self.green
    }

    pub const fn blue(&self) -> f64 {
        self.blue
    }

    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Red, green and blue scaled to `[0, 255]` and clamped into that range.
    #[must_use]
    pub fn scaled_rgb(&self) -> [f64; 3] {
        [self.red, self.green, self.blue].map(|c| (c * CHANNEL_MAX).clamp(0.0, CHANNEL_MAX))
    }

    /// Clamped, rounded byte channels including alpha.
    #[must_use]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
            .map(|c| (c * CHANNEL_MAX).round().clamp(0.0, CHANNEL_MAX) as u8)
    }

    /// Uppercase `#RRGGBB`; alpha is dropped.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, with or without `#`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_hex_color(value).ok_or_else(|| Error::InvalidColor(value.to_string()))
    }
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let rgba = match hex.len() {
        3 => [short(0)?, short(1)?, short(2)?, 255],
        4 => [short(0)?, short(1)?, short(2)?, short(3)?],
        6 => [long(0)?, long(2)?, long(4)?, 255],
        8 => [long(0)?, long(2)?, long(4)?, long(6)?],
        _ => return None,
    };
    Some(Color::from_rgba8(rgba))
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

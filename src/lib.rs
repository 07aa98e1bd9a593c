pub mod color;
pub mod config;
pub mod error;
pub mod matcher;
pub mod processing {
    pub mod color;
    pub mod score;
}

pub use color::Color;
pub use error::Error;
pub use matcher::{
    MatchOutcome, MatchStrategy, Matcher, find_first_readable_color, find_readable_color,
    match_region,
};
pub use processing::color::{PixelSampler, Region};

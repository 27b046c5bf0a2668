//! Accomplishment color palette.
//!
//! # Responsibility
//! - Define the closed palette assigned to new accomplishments.
//! - Resolve persisted color names into RGB triples.
//!
//! # Invariants
//! - Palette names are canonical lowercase strings; lookup is case-sensitive.
//! - Unknown names resolve to `FALLBACK_GRAY` and never fail.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// RGB triple with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

/// Neutral color used for names outside the palette.
pub const FALLBACK_GRAY: Rgb = Rgb::new(0.85, 0.85, 0.85);

/// Palette member assigned to an accomplishment at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccomplishmentColor {
    Yellow,
    Orange,
    Pink,
    Green,
    Blue,
    Lavender,
}

const PALETTE: [AccomplishmentColor; 6] = [
    AccomplishmentColor::Yellow,
    AccomplishmentColor::Orange,
    AccomplishmentColor::Pink,
    AccomplishmentColor::Green,
    AccomplishmentColor::Blue,
    AccomplishmentColor::Lavender,
];

impl AccomplishmentColor {
    /// Returns every palette member in declaration order.
    pub fn all() -> &'static [AccomplishmentColor] {
        &PALETTE
    }

    /// Returns canonical palette names.
    pub fn available_names() -> Vec<&'static str> {
        PALETTE.iter().map(|color| color.as_str()).collect()
    }

    /// Picks a palette member uniformly at random.
    pub fn random() -> Self {
        *PALETTE
            .choose(&mut rand::thread_rng())
            .unwrap_or(&AccomplishmentColor::Yellow)
    }

    /// Parses a canonical palette name.
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE.iter().copied().find(|color| color.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Lavender => "lavender",
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            Self::Yellow => Rgb::new(1.0, 0.92, 0.55),
            Self::Orange => Rgb::new(1.0, 0.75, 0.5),
            Self::Pink => Rgb::new(1.0, 0.7, 0.8),
            Self::Green => Rgb::new(0.7, 0.92, 0.7),
            Self::Blue => Rgb::new(0.65, 0.8, 1.0),
            Self::Lavender => Rgb::new(0.8, 0.7, 1.0),
        }
    }
}

/// Resolves a persisted color name, falling back to neutral gray.
pub fn resolve_color(name: &str) -> Rgb {
    AccomplishmentColor::from_name(name).map_or(FALLBACK_GRAY, AccomplishmentColor::rgb)
}

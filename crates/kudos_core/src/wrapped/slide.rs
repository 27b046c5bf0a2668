//! Slide projections rendered by the yearly "Wrapped" review.

use crate::model::color::Rgb;
use serde::{Deserialize, Serialize};

/// One full-screen slide of the yearly review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slide {
    /// Opening slide with the reviewed year and number of entries.
    Intro { year: i32, count: usize },
    /// Photo entry; `caption` is present only when the entry has text.
    Photo {
        image: Vec<u8>,
        caption: Option<String>,
    },
    /// Text entry themed by the stored color name.
    Text { text: String, gradient_key: String },
    Outro,
}

/// Two-stop background gradient for text slides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemedGradient {
    pub start: Rgb,
    pub end: Rgb,
}

const PURPLE: Rgb = Rgb::new(0.69, 0.32, 0.87);
const PINK: Rgb = Rgb::new(1.0, 0.18, 0.33);

impl ThemedGradient {
    /// Fallback for keys without a dedicated theme.
    pub const FALLBACK: ThemedGradient = ThemedGradient {
        start: PURPLE,
        end: PINK,
    };

    /// Resolves a gradient key; matching ignores ASCII case.
    pub fn for_key(key: &str) -> Self {
        let (start, end) = match key.to_ascii_lowercase().as_str() {
            "orange" => (Rgb::new(1.0, 0.58, 0.0), Rgb::new(1.0, 0.23, 0.19)),
            "yellow" => (Rgb::new(1.0, 0.8, 0.0), Rgb::new(1.0, 0.58, 0.0)),
            "green" => (Rgb::new(0.2, 0.78, 0.35), Rgb::new(0.19, 0.69, 0.78)),
            "blue" => (Rgb::new(0.0, 0.48, 1.0), Rgb::new(0.35, 0.34, 0.84)),
            _ => return Self::FALLBACK,
        };
        Self { start, end }
    }
}

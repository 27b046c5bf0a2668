//! User-facing preferences shared across the process.

pub mod preferences;

pub use preferences::{
    AppColorScheme, Language, PreferenceError, PreferenceSnapshot, Preferences,
};

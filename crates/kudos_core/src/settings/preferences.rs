//! Process-wide user preferences (language, color scheme).
//!
//! # Responsibility
//! - Resolve the initial language from the system locale and saved choice.
//! - Persist preference changes through `PreferenceStore`.
//! - Serve the current values to any thread as an immutable snapshot.
//!
//! # Invariants
//! - Writes persist first and publish second; a failed write leaves the
//!   published snapshot unchanged.
//! - Writers are serialized by the snapshot write lock.
//! - Readers never observe a half-applied update.

use crate::model::validation::ValidationError;
use crate::repo::accomplishment_repo::RepoError;
use crate::repo::preference_repo::PreferenceStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock};

const LANGUAGE_KEY: &str = "selected_language";
const COLOR_SCHEME_KEY: &str = "selected_color_scheme";

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const SUPPORTED: [Language; 2] = [Language::Spanish, Language::English];

    pub fn code(self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|language| language.code() == code)
    }

    /// Spanish for any `es*` locale identifier, English otherwise.
    pub fn from_system_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("es") {
            Self::Spanish
        } else {
            Self::English
        }
    }
}

/// Color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppColorScheme {
    /// Follow the operating system setting.
    #[default]
    System,
    Light,
    Dark,
}

impl AppColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Immutable copy of the current preference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    pub language: Language,
    pub color_scheme: AppColorScheme,
}

/// Preference service errors.
#[derive(Debug)]
pub enum PreferenceError {
    UnsupportedLanguage(String),
    UnsupportedColorScheme(String),
    Repo(RepoError),
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLanguage(value) => {
                write!(f, "unsupported language `{value}`; expected es|en")
            }
            Self::UnsupportedColorScheme(value) => {
                write!(f, "unsupported color scheme `{value}`; expected system|light|dark")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PreferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PreferenceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Explicitly constructed preference service.
///
/// Create once at process start and share by reference or `Arc`. All reads
/// are safe from any thread.
#[derive(Debug)]
pub struct Preferences {
    snapshot: RwLock<PreferenceSnapshot>,
}

impl Preferences {
    pub fn new(snapshot: PreferenceSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Loads saved preferences, falling back to system-derived defaults.
    ///
    /// Saved values that are no longer supported are ignored.
    pub fn load(
        store: &impl PreferenceStore,
        system_locale: &str,
    ) -> Result<Self, PreferenceError> {
        let mut language = Language::from_system_locale(system_locale);
        if let Some(saved) = store.get(LANGUAGE_KEY)? {
            match Language::from_code(&saved) {
                Some(saved_language) => language = saved_language,
                None => warn!(
                    "event=preferences_load module=settings status=skip key={} reason=unsupported_value",
                    LANGUAGE_KEY
                ),
            }
        }

        let mut color_scheme = AppColorScheme::default();
        if let Some(saved) = store.get(COLOR_SCHEME_KEY)? {
            match AppColorScheme::parse(&saved) {
                Some(saved_scheme) => color_scheme = saved_scheme,
                None => warn!(
                    "event=preferences_load module=settings status=skip key={} reason=unsupported_value",
                    COLOR_SCHEME_KEY
                ),
            }
        }

        info!(
            "event=preferences_load module=settings status=ok language={} color_scheme={}",
            language.code(),
            color_scheme.as_str()
        );
        Ok(Self::new(PreferenceSnapshot {
            language,
            color_scheme,
        }))
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        *self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn language(&self) -> Language {
        self.snapshot().language
    }

    pub fn color_scheme(&self) -> AppColorScheme {
        self.snapshot().color_scheme
    }

    /// Persists and publishes a new language.
    pub fn set_language(
        &self,
        store: &impl PreferenceStore,
        language: Language,
    ) -> Result<(), PreferenceError> {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        store.set(LANGUAGE_KEY, language.code())?;
        guard.language = language;
        info!(
            "event=preference_set module=settings status=ok key={} value={}",
            LANGUAGE_KEY,
            language.code()
        );
        Ok(())
    }

    /// Parses a language code and applies it.
    ///
    /// # Errors
    /// - `UnsupportedLanguage` for codes other than `es|en`; nothing changes.
    pub fn set_language_code(
        &self,
        store: &impl PreferenceStore,
        code: &str,
    ) -> Result<Language, PreferenceError> {
        let language = Language::from_code(code.trim())
            .ok_or_else(|| PreferenceError::UnsupportedLanguage(code.to_string()))?;
        self.set_language(store, language)?;
        Ok(language)
    }

    /// Persists and publishes a new color scheme.
    pub fn set_color_scheme(
        &self,
        store: &impl PreferenceStore,
        color_scheme: AppColorScheme,
    ) -> Result<(), PreferenceError> {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        store.set(COLOR_SCHEME_KEY, color_scheme.as_str())?;
        guard.color_scheme = color_scheme;
        info!(
            "event=preference_set module=settings status=ok key={} value={}",
            COLOR_SCHEME_KEY,
            color_scheme.as_str()
        );
        Ok(())
    }

    /// Formats a validation alert in the current language.
    pub fn validation_message(&self, error: &ValidationError) -> String {
        error.localized_message(self.language())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppColorScheme, Language};

    #[test]
    fn system_locale_prefix_selects_spanish() {
        assert_eq!(Language::from_system_locale("es-MX"), Language::Spanish);
        assert_eq!(Language::from_system_locale("ES"), Language::Spanish);
        assert_eq!(Language::from_system_locale("en-GB"), Language::English);
        assert_eq!(Language::from_system_locale(""), Language::English);
    }

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for language in Language::SUPPORTED {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(AppColorScheme::parse("dark"), Some(AppColorScheme::Dark));
        assert_eq!(AppColorScheme::parse("Dark"), None);
    }
}

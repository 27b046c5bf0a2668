//! Text validation rules for accomplishment content.
//!
//! # Responsibility
//! - Normalize raw user text (trim leading/trailing whitespace).
//! - Reject empty and over-long content before any entity exists.
//!
//! # Invariants
//! - Validation is pure, deterministic and idempotent.
//! - Length is counted in Unicode scalar values after trimming.

use crate::settings::Language;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of characters accepted for accomplishment text.
pub const MAX_CHARACTERS: usize = 100;

/// Recoverable validation failure for user-entered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// Trimmed text exceeds the configured maximum.
    TextTooLong { max_length: usize },
}

impl ValidationError {
    /// Returns the user-facing alert message in the requested language.
    pub fn localized_message(&self, language: Language) -> String {
        match (self, language) {
            (Self::EmptyText, Language::Spanish) => {
                "El logro no puede estar vacío.".to_string()
            }
            (Self::EmptyText, Language::English) => {
                "The accomplishment cannot be empty.".to_string()
            }
            (Self::TextTooLong { max_length }, Language::Spanish) => {
                format!("El logro no puede superar los {max_length} caracteres.")
            }
            (Self::TextTooLong { max_length }, Language::English) => {
                format!("The accomplishment cannot exceed {max_length} characters.")
            }
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text must not be empty"),
            Self::TextTooLong { max_length } => {
                write!(f, "text must be at most {max_length} characters")
            }
        }
    }
}

impl Error for ValidationError {}

/// Validator for accomplishment text and photo captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccomplishmentValidator {
    max_length: usize,
}

impl Default for AccomplishmentValidator {
    fn default() -> Self {
        Self::new(MAX_CHARACTERS)
    }
}

impl AccomplishmentValidator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Validates mandatory text content and returns the trimmed value.
    ///
    /// # Errors
    /// - `EmptyText` when nothing remains after trimming.
    /// - `TextTooLong` when the trimmed text exceeds `max_length`.
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        self.check_length(trimmed)?;
        Ok(trimmed.to_string())
    }

    /// Validates an optional photo caption.
    ///
    /// Blank captions are allowed and normalized to `None`; only the length
    /// cap applies.
    pub fn validate_caption(&self, raw: &str) -> Result<Option<String>, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        self.check_length(trimmed)?;
        Ok(Some(trimmed.to_string()))
    }

    fn check_length(&self, trimmed: &str) -> Result<(), ValidationError> {
        if trimmed.chars().count() > self.max_length {
            return Err(ValidationError::TextTooLong {
                max_length: self.max_length,
            });
        }
        Ok(())
    }
}

/// Validates `raw` with the default character limit.
pub fn validate_text(raw: &str) -> Result<String, ValidationError> {
    AccomplishmentValidator::default().validate(raw)
}

#[cfg(test)]
mod tests {
    use super::{validate_text, AccomplishmentValidator, ValidationError, MAX_CHARACTERS};
    use crate::settings::Language;

    #[test]
    fn blank_inputs_are_empty_text() {
        for raw in ["", " ", "\n\t  ", "\r\n"] {
            assert_eq!(validate_text(raw), Err(ValidationError::EmptyText));
        }
    }

    #[test]
    fn over_limit_reports_configured_max() {
        let raw = "a".repeat(MAX_CHARACTERS + 1);
        assert_eq!(
            validate_text(&raw),
            Err(ValidationError::TextTooLong {
                max_length: MAX_CHARACTERS
            })
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_limit() {
        let raw = format!("   {}   ", "b".repeat(MAX_CHARACTERS));
        assert_eq!(validate_text(&raw).unwrap(), "b".repeat(MAX_CHARACTERS));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let validator = AccomplishmentValidator::new(3);
        assert_eq!(validator.validate("ñáé").unwrap(), "ñáé");
        assert!(validator.validate("ñáéí").is_err());
    }

    #[test]
    fn validation_is_idempotent() {
        let once = validate_text("  Terminé la maratón  ").unwrap();
        let twice = validate_text(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn blank_caption_is_none_but_long_caption_fails() {
        let validator = AccomplishmentValidator::new(5);
        assert_eq!(validator.validate_caption("   ").unwrap(), None);
        assert_eq!(
            validator.validate_caption(" hola ").unwrap().as_deref(),
            Some("hola")
        );
        assert_eq!(
            validator.validate_caption("demasiado"),
            Err(ValidationError::TextTooLong { max_length: 5 })
        );
    }

    #[test]
    fn localized_messages_mention_limit() {
        let err = ValidationError::TextTooLong { max_length: 100 };
        assert!(err.localized_message(Language::Spanish).contains("100"));
        assert!(err.localized_message(Language::English).contains("100"));
        assert_ne!(
            ValidationError::EmptyText.localized_message(Language::Spanish),
            ValidationError::EmptyText.localized_message(Language::English)
        );
    }
}

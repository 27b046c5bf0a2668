//! Accomplishment domain model.
//!
//! # Responsibility
//! - Define the persisted "kudos to self" record (text or captioned photo).
//! - Enforce content invariants in every constructor, so invalid records
//!   never exist in memory.
//!
//! # Invariants
//! - `id` is a non-nil UUID assigned once and never reused.
//! - A record carries non-empty trimmed text, non-empty photo bytes, or both.
//! - Text-only records always satisfy `AccomplishmentValidator::validate`.
//! - `color` is chosen at creation and never changes afterwards.
//!
//! # See also
//! - crate::model::validation
//! - crate::model::color

use crate::model::color::{resolve_color, AccomplishmentColor, Rgb};
use crate::model::validation::{AccomplishmentValidator, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one accomplishment.
pub type AccomplishmentId = Uuid;

/// Failure while building an accomplishment from raw input or storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// Text or caption failed validation.
    Validation(ValidationError),
    /// Photo path invoked with zero bytes.
    EmptyPhotoData,
    /// Restored row carried the nil UUID.
    NilId,
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmptyPhotoData => write!(f, "photo data must not be empty"),
            Self::NilId => write!(f, "accomplishment id must not be nil"),
        }
    }
}

impl Error for ConstructionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::EmptyPhotoData | Self::NilId => None,
        }
    }
}

impl From<ValidationError> for ConstructionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Canonical accomplishment record.
///
/// Fields are private; identity and content are read-only after construction.
/// Deserialization goes through [`Accomplishment::restore`], so wire payloads
/// obey the same invariants as freshly created records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccomplishmentWire")]
pub struct Accomplishment {
    id: AccomplishmentId,
    text: String,
    photo_data: Option<Vec<u8>>,
    color: String,
    date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct AccomplishmentWire {
    id: AccomplishmentId,
    text: String,
    photo_data: Option<Vec<u8>>,
    color: String,
    date: DateTime<Utc>,
}

impl TryFrom<AccomplishmentWire> for Accomplishment {
    type Error = ConstructionError;

    fn try_from(value: AccomplishmentWire) -> Result<Self, Self::Error> {
        Self::restore(
            value.id,
            value.text,
            value.photo_data,
            value.color,
            value.date,
        )
    }
}

impl Accomplishment {
    /// Creates a text accomplishment dated now.
    ///
    /// Uses `color` when given, otherwise a random palette member.
    ///
    /// # Errors
    /// Returns the validator error unchanged; no record is produced.
    pub fn from_text(
        text: &str,
        color: Option<AccomplishmentColor>,
    ) -> Result<Self, ValidationError> {
        Self::from_text_with(&AccomplishmentValidator::default(), text, color)
    }

    /// Same as [`Accomplishment::from_text`] with an explicit validator.
    pub fn from_text_with(
        validator: &AccomplishmentValidator,
        text: &str,
        color: Option<AccomplishmentColor>,
    ) -> Result<Self, ValidationError> {
        let text = validator.validate(text)?;
        let color = color.unwrap_or_else(AccomplishmentColor::random);
        Ok(Self {
            id: Uuid::new_v4(),
            text,
            photo_data: None,
            color: color.as_str().to_string(),
            date: Utc::now(),
        })
    }

    /// Creates a photo accomplishment with an optional caption, dated now.
    ///
    /// A blank caption is stored as empty text. Only the caption length cap
    /// applies.
    pub fn from_photo(
        photo_data: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<Self, ConstructionError> {
        Self::from_photo_with(&AccomplishmentValidator::default(), photo_data, caption)
    }

    /// Same as [`Accomplishment::from_photo`] with an explicit validator.
    pub fn from_photo_with(
        validator: &AccomplishmentValidator,
        photo_data: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<Self, ConstructionError> {
        if photo_data.is_empty() {
            return Err(ConstructionError::EmptyPhotoData);
        }
        let caption = match caption {
            Some(raw) => validator.validate_caption(raw)?,
            None => None,
        };
        Ok(Self {
            id: Uuid::new_v4(),
            text: caption.unwrap_or_default(),
            photo_data: Some(photo_data),
            color: AccomplishmentColor::random().as_str().to_string(),
            date: Utc::now(),
        })
    }

    /// Rebuilds a record from persisted fields.
    ///
    /// Used by storage and wire decoding where identity already exists.
    /// Color names outside the current palette are kept as-is.
    pub fn restore(
        id: AccomplishmentId,
        text: String,
        photo_data: Option<Vec<u8>>,
        color: String,
        date: DateTime<Utc>,
    ) -> Result<Self, ConstructionError> {
        if id.is_nil() {
            return Err(ConstructionError::NilId);
        }
        let validator = AccomplishmentValidator::default();
        let text = match &photo_data {
            Some(bytes) if bytes.is_empty() => return Err(ConstructionError::EmptyPhotoData),
            Some(_) => validator.validate_caption(&text)?.unwrap_or_default(),
            None => validator.validate(&text)?,
        };
        Ok(Self {
            id,
            text,
            photo_data,
            color,
            date,
        })
    }

    pub fn id(&self) -> AccomplishmentId {
        self.id
    }

    /// Text content, or the caption for photo records (may be empty).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn photo_data(&self) -> Option<&[u8]> {
        self.photo_data.as_deref()
    }

    /// Persisted palette name; may be outside the current palette.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Palette member for the stored name, if recognized.
    pub fn palette_color(&self) -> Option<AccomplishmentColor> {
        AccomplishmentColor::from_name(&self.color)
    }

    /// RGB for the stored color name, with the neutral fallback.
    pub fn rgb(&self) -> Rgb {
        resolve_color(&self.color)
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Overrides the record date. Reserved for backfill and tests.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    pub fn has_photo(&self) -> bool {
        self.photo_data.is_some()
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Accomplishment, ConstructionError};
    use crate::model::color::{AccomplishmentColor, FALLBACK_GRAY};
    use crate::model::validation::{ValidationError, MAX_CHARACTERS};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn from_text_keeps_explicit_color_and_trims() {
        let item = Accomplishment::from_text("  Mi logro  ", Some(AccomplishmentColor::Blue))
            .unwrap();
        assert_eq!(item.text(), "Mi logro");
        assert_eq!(item.color(), "blue");
        assert!(!item.has_photo());
        assert!(item.date() <= Utc::now());
    }

    #[test]
    fn from_text_without_color_uses_palette() {
        let item = Accomplishment::from_text("Test logro", None).unwrap();
        assert!(item.palette_color().is_some());
    }

    #[test]
    fn from_text_rejects_invalid_input() {
        assert_eq!(
            Accomplishment::from_text("", None).unwrap_err(),
            ValidationError::EmptyText
        );
        let long = "a".repeat(MAX_CHARACTERS + 1);
        assert_eq!(
            Accomplishment::from_text(&long, None).unwrap_err(),
            ValidationError::TextTooLong {
                max_length: MAX_CHARACTERS
            }
        );
    }

    #[test]
    fn from_photo_allows_missing_or_blank_caption() {
        let bare = Accomplishment::from_photo(vec![1, 2, 3], None).unwrap();
        assert!(bare.has_photo());
        assert!(!bare.has_text());

        let blank = Accomplishment::from_photo(vec![1], Some("   ")).unwrap();
        assert_eq!(blank.text(), "");

        let captioned = Accomplishment::from_photo(vec![1], Some(" cima ")).unwrap();
        assert_eq!(captioned.text(), "cima");
    }

    #[test]
    fn from_photo_rejects_empty_bytes_and_long_caption() {
        assert_eq!(
            Accomplishment::from_photo(Vec::new(), None).unwrap_err(),
            ConstructionError::EmptyPhotoData
        );
        let long = "c".repeat(MAX_CHARACTERS + 1);
        assert!(matches!(
            Accomplishment::from_photo(vec![9], Some(&long)).unwrap_err(),
            ConstructionError::Validation(ValidationError::TextTooLong { .. })
        ));
    }

    #[test]
    fn restore_keeps_unknown_color_with_fallback_rgb() {
        let item = Accomplishment::restore(
            Uuid::new_v4(),
            "legacy".to_string(),
            None,
            "unknownColor".to_string(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(item.color(), "unknownColor");
        assert_eq!(item.palette_color(), None);
        assert_eq!(item.rgb(), FALLBACK_GRAY);
    }

    #[test]
    fn restore_rejects_nil_id_and_missing_content() {
        let nil = Accomplishment::restore(
            Uuid::nil(),
            "x".to_string(),
            None,
            "blue".to_string(),
            Utc::now(),
        );
        assert_eq!(nil.unwrap_err(), ConstructionError::NilId);

        let empty = Accomplishment::restore(
            Uuid::new_v4(),
            "  ".to_string(),
            None,
            "blue".to_string(),
            Utc::now(),
        );
        assert_eq!(
            empty.unwrap_err(),
            ConstructionError::Validation(ValidationError::EmptyText)
        );
    }
}

//! Accomplishment use-case service.
//!
//! # Responsibility
//! - Provide stable record/delete/list entry points for FFI and CLI callers.
//! - Build the Wrapped slide sequence from a fresh repository snapshot.
//!
//! # Invariants
//! - Records reach the repository only through validating constructors.
//! - Service layer remains storage-agnostic.

use crate::model::accomplishment::{Accomplishment, AccomplishmentId, ConstructionError};
use crate::model::color::AccomplishmentColor;
use crate::repo::accomplishment_repo::{AccomplishmentRepository, RepoError, RepoResult, SortOrder};
use crate::wrapped::{build_slides, Slide};
use chrono::{DateTime, TimeZone};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for accomplishment use-cases.
#[derive(Debug)]
pub enum AccomplishmentServiceError {
    /// Input rejected before persistence.
    Invalid(ConstructionError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AccomplishmentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccomplishmentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConstructionError> for AccomplishmentServiceError {
    fn from(value: ConstructionError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for AccomplishmentServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper over an accomplishment repository.
pub struct AccomplishmentService<R: AccomplishmentRepository> {
    repo: R,
}

impl<R: AccomplishmentRepository> AccomplishmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a text accomplishment.
    pub fn record_text(
        &self,
        text: &str,
        color: Option<AccomplishmentColor>,
    ) -> Result<Accomplishment, AccomplishmentServiceError> {
        let item = Accomplishment::from_text(text, color).map_err(|err| {
            warn!(
                "event=record_text module=service status=error error_code=validation_failed error={}",
                err
            );
            ConstructionError::from(err)
        })?;
        self.repo.insert(&item)?;
        info!(
            "event=record_text module=service status=ok id={} color={}",
            item.id(),
            item.color()
        );
        Ok(item)
    }

    /// Stores a photo accomplishment with an optional caption.
    pub fn record_photo(
        &self,
        photo_data: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<Accomplishment, AccomplishmentServiceError> {
        let bytes = photo_data.len();
        let item = Accomplishment::from_photo(photo_data, caption)?;
        self.repo.insert(&item)?;
        info!(
            "event=record_photo module=service status=ok id={} bytes={} has_caption={}",
            item.id(),
            bytes,
            item.has_text()
        );
        Ok(item)
    }

    /// Hard-deletes one accomplishment.
    ///
    /// Returns `RepoError::NotFound` unchanged for unknown IDs.
    pub fn delete(&self, id: AccomplishmentId) -> RepoResult<()> {
        self.repo.delete(id)?;
        info!("event=delete module=service status=ok id={id}");
        Ok(())
    }

    /// Gets one accomplishment by ID.
    pub fn get(&self, id: AccomplishmentId) -> RepoResult<Option<Accomplishment>> {
        self.repo.get(id)
    }

    /// Lists every accomplishment ordered by date.
    pub fn list(&self, order: SortOrder) -> RepoResult<Vec<Accomplishment>> {
        self.repo.list(order)
    }

    /// Number of stored accomplishments.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }

    /// Builds the Wrapped slides for the year containing `reference`.
    pub fn wrapped<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> RepoResult<Vec<Slide>> {
        let items = self.repo.list(SortOrder::Ascending)?;
        let slides = build_slides(&items, reference);
        info!(
            "event=wrapped_build module=service status=ok total={} slides={}",
            items.len(),
            slides.len()
        );
        Ok(slides)
    }
}

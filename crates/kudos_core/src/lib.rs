//! Core domain logic for the Kudos accomplishment journal.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod settings;
pub mod wrapped;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::accomplishment::{Accomplishment, AccomplishmentId, ConstructionError};
pub use model::color::{resolve_color, AccomplishmentColor, Rgb, FALLBACK_GRAY};
pub use model::validation::{
    validate_text, AccomplishmentValidator, ValidationError, MAX_CHARACTERS,
};
pub use repo::accomplishment_repo::{
    AccomplishmentRepository, OwnedSqliteAccomplishmentRepository, RepoError, RepoResult,
    SortOrder, SqliteAccomplishmentRepository,
};
pub use repo::preference_repo::{PreferenceStore, SqlitePreferenceRepository};
pub use service::accomplishment_service::{AccomplishmentService, AccomplishmentServiceError};
pub use session::{CaptureConfig, CaptureMode, CaptureSession, SessionEvent};
pub use settings::{AppColorScheme, Language, PreferenceError, PreferenceSnapshot, Preferences};
pub use wrapped::{build_slides, Slide, ThemedGradient};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

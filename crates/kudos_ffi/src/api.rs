//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Map core errors into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Validation failures are reported with a localized message.
//! - One capture session exists per process; calls into it are serialized
//!   by its mutex.

use chrono::Local;
use kudos_core::db::open_db;
use kudos_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Accomplishment, AccomplishmentService, AccomplishmentServiceError, AppColorScheme,
    CaptureMode, CaptureSession, ConstructionError, Language, OwnedSqliteAccomplishmentRepository,
    PreferenceSnapshot, Preferences, SessionEvent, Slide, SortOrder,
    SqliteAccomplishmentRepository, SqlitePreferenceRepository,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

const ENTRY_DB_FILE_NAME: &str = "kudos_journal.sqlite3";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static PREFERENCES: OnceLock<Preferences> = OnceLock::new();
static CAPTURE_SESSION: OnceLock<Mutex<JournalCaptureSession>> = OnceLock::new();

type JournalCaptureSession = CaptureSession<OwnedSqliteAccomplishmentRepository>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Loads saved preferences once per process.
///
/// `system_locale` is the device locale identifier (for example `es-MX`).
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_preferences(system_locale: String) -> String {
    if PREFERENCES.get().is_some() {
        return String::new();
    }
    let loaded = with_connection(|conn| {
        Preferences::load(&SqlitePreferenceRepository::new(conn), &system_locale)
            .map_err(|err| err.to_string())
    });
    match loaded {
        Ok(preferences) => {
            let _ = PREFERENCES.set(preferences);
            String::new()
        }
        Err(err) => format!("init_preferences failed: {err}"),
    }
}

/// Current preference values (`language`, `color_scheme`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceView {
    /// `es|en`.
    pub language: String,
    /// `system|light|dark`.
    pub color_scheme: String,
}

/// Returns the current preference snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn current_preferences() -> PreferenceView {
    let snapshot = current_snapshot();
    PreferenceView {
        language: snapshot.language.code().to_string(),
        color_scheme: snapshot.color_scheme.as_str().to_string(),
    }
}

/// Persists and applies a language code (`es|en`).
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn set_language(code: String) -> String {
    let Some(preferences) = PREFERENCES.get() else {
        return "set_language failed: preferences not initialized".to_string();
    };
    with_connection(|conn| {
        preferences
            .set_language_code(&SqlitePreferenceRepository::new(conn), &code)
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
    .err()
    .map(|err| format!("set_language failed: {err}"))
    .unwrap_or_default()
}

/// Persists and applies a color scheme (`system|light|dark`).
#[flutter_rust_bridge::frb(sync)]
pub fn set_color_scheme(value: String) -> String {
    let Some(preferences) = PREFERENCES.get() else {
        return "set_color_scheme failed: preferences not initialized".to_string();
    };
    let Some(scheme) = AppColorScheme::parse(value.trim()) else {
        return format!("set_color_scheme failed: unsupported color scheme `{value}`");
    };
    with_connection(|conn| {
        preferences
            .set_color_scheme(&SqlitePreferenceRepository::new(conn), scheme)
            .map_err(|err| err.to_string())
    })
    .err()
    .map(|err| format!("set_color_scheme failed: {err}"))
    .unwrap_or_default()
}

/// Generic action response envelope for journal writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created accomplishment ID on success.
    pub id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One journal entry for list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    pub id: String,
    pub text: String,
    pub has_photo: bool,
    pub color: String,
    /// Unix epoch milliseconds.
    pub created_at_ms: i64,
}

/// One Wrapped slide flattened for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSlide {
    /// `intro|photo|text|outro`.
    pub kind: String,
    pub year: Option<i32>,
    pub count: Option<u32>,
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
    pub gradient_key: Option<String>,
}

/// Records a text accomplishment.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Validation errors return a localized message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_record_text(text: String) -> EntryActionResponse {
    let result = with_connection(|conn| {
        let service = AccomplishmentService::new(SqliteAccomplishmentRepository::new(conn));
        service
            .record_text(&text, None)
            .map_err(|err| describe_service_error(&err))
    });
    record_response(result, "Accomplishment saved.", "entry_record_text")
}

/// Records a photo accomplishment with an optional caption.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_record_photo(photo_data: Vec<u8>, caption: Option<String>) -> EntryActionResponse {
    let result = with_connection(|conn| {
        let service = AccomplishmentService::new(SqliteAccomplishmentRepository::new(conn));
        service
            .record_photo(photo_data, caption.as_deref())
            .map_err(|err| describe_service_error(&err))
    });
    record_response(result, "Photo saved.", "entry_record_photo")
}

/// Deletes one accomplishment by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(id: String) -> EntryActionResponse {
    let Ok(parsed) = Uuid::parse_str(id.trim()) else {
        return EntryActionResponse::failure(format!("entry_delete failed: invalid id `{id}`"));
    };
    let result = with_connection(|conn| {
        AccomplishmentService::new(SqliteAccomplishmentRepository::new(conn))
            .delete(parsed)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => EntryActionResponse::success("Accomplishment deleted.", Some(parsed.to_string())),
        Err(err) => EntryActionResponse::failure(format!("entry_delete failed: {err}")),
    }
}

/// Lists accomplishments by date; newest first when `newest_first`.
///
/// Returns an empty list when storage is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list(newest_first: bool) -> Vec<EntryItem> {
    let order = if newest_first {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let result = with_connection(|conn| {
        AccomplishmentService::new(SqliteAccomplishmentRepository::new(conn))
            .list(order)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(items) => items.iter().map(to_entry_item).collect(),
        Err(err) => {
            warn!("event=entry_list module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Builds the current year's Wrapped slides in local time.
///
/// Returns `[intro(count=0), outro]` when storage is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn wrapped_slides() -> Vec<WrappedSlide> {
    let now = Local::now();
    let result = with_connection(|conn| {
        AccomplishmentService::new(SqliteAccomplishmentRepository::new(conn))
            .wrapped(&now)
            .map_err(|err| err.to_string())
    });
    let slides = result.unwrap_or_else(|err| {
        warn!("event=wrapped_slides module=ffi status=error error={err}");
        kudos_core::build_slides(&[], &now)
    });
    slides.into_iter().map(to_wrapped_slide).collect()
}

/// One capture session event flattened for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    /// `mode_changed|ready_to_save_changed|ready_to_save_announced|
    /// save_scheduled|saved|saved_confirmation_shown|saved_confirmation_hidden|
    /// validation_failed|persistence_failed|focus_requested|focus_released|error`.
    pub kind: String,
    /// `viewing|editing` for `mode_changed`.
    pub mode: Option<String>,
    /// New indicator value for `ready_to_save_changed`.
    pub ready: Option<bool>,
    /// Saved accomplishment ID for `saved`.
    pub id: Option<String>,
    /// Localized alert or failure detail.
    pub message: Option<String>,
    /// Milliseconds until the scheduled save runs.
    pub due_in_ms: Option<u64>,
}

impl CaptureEvent {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            mode: None,
            ready: None,
            id: None,
            message: None,
            due_in_ms: None,
        }
    }
}

/// Capture session state for rendering the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureStateView {
    /// `viewing|editing`.
    pub mode: String,
    pub text: String,
    pub has_photo: bool,
    /// Damped drag offset in points (`<= 0`).
    pub drag_offset: f64,
    pub ready_to_save: bool,
    pub save_pending: bool,
    pub confirmation_shown: bool,
    pub character_count: u32,
    pub max_characters: u32,
    /// Successful saves so far; drives the confetti animation.
    pub celebration_count: u64,
}

/// Starts editing a new accomplishment.
///
/// # FFI contract
/// - Sync call; opens the capture session's connection on first use.
/// - Storage failures come back as a single `error` event.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_begin_edit() -> Vec<CaptureEvent> {
    run_capture("capture_begin_edit", Instant::now(), |session| {
        session.begin_edit()
    })
}

/// Leaves editing without saving.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_cancel_edit() -> Vec<CaptureEvent> {
    run_capture("capture_cancel_edit", Instant::now(), |session| {
        session.cancel_edit()
    })
}

/// Forwards the editor's full text after every change.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_text_changed(text: String) -> Vec<CaptureEvent> {
    run_capture("capture_text_changed", Instant::now(), |session| {
        session.text_changed(&text)
    })
}

/// Attaches a captured photo (encoded image bytes).
#[flutter_rust_bridge::frb(sync)]
pub fn capture_photo_captured(photo_data: Vec<u8>) -> Vec<CaptureEvent> {
    run_capture("capture_photo_captured", Instant::now(), |session| {
        session.photo_captured(photo_data)
    })
}

/// Detaches the photo and returns to text entry.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_photo_removed() -> Vec<CaptureEvent> {
    run_capture("capture_photo_removed", Instant::now(), |session| {
        session.photo_removed()
    })
}

/// Reports the current vertical drag translation (up is negative).
#[flutter_rust_bridge::frb(sync)]
pub fn capture_drag_changed(translation: f64) -> Vec<CaptureEvent> {
    run_capture("capture_drag_changed", Instant::now(), |session| {
        session.drag_changed(translation)
    })
}

/// Reports the final drag translation on release.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_drag_ended(translation: f64) -> Vec<CaptureEvent> {
    let now = Instant::now();
    run_capture("capture_drag_ended", now, |session| {
        session.drag_ended(translation, now)
    })
}

/// Save button.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_explicit_save() -> Vec<CaptureEvent> {
    let now = Instant::now();
    run_capture("capture_explicit_save", now, |session| {
        session.explicit_save_requested(now)
    })
}

/// Accessibility "save" action; saves without the feedback delay.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_accessibility_save() -> Vec<CaptureEvent> {
    let now = Instant::now();
    run_capture("capture_accessibility_save", now, |session| {
        session.accessibility_save_requested(now)
    })
}

/// Runs due capture work (pending save, confirmation dismissal).
///
/// Dart schedules the next call from `capture_next_deadline_ms`.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_poll() -> Vec<CaptureEvent> {
    capture_poll_at(Instant::now())
}

/// Milliseconds until `capture_poll` has work, if any is scheduled.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_next_deadline_ms() -> Option<u64> {
    let now = Instant::now();
    with_capture_session(|session| session.next_deadline())
        .unwrap_or_else(|err| {
            warn!("event=capture_next_deadline module=ffi status=error error={err}");
            None
        })
        .map(|deadline| duration_ms(deadline.saturating_duration_since(now)))
}

/// Current capture state; an idle view when storage is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_state() -> CaptureStateView {
    with_capture_session(|session| CaptureStateView {
        mode: mode_name(session.mode()).to_string(),
        text: session.text().to_string(),
        has_photo: session.has_photo(),
        drag_offset: session.drag_offset(),
        ready_to_save: session.is_ready_to_save(),
        save_pending: session.is_save_pending(),
        confirmation_shown: session.is_confirmation_shown(),
        character_count: u32::try_from(session.character_count()).unwrap_or(u32::MAX),
        max_characters: u32::try_from(session.max_characters()).unwrap_or(u32::MAX),
        celebration_count: session.celebration_count(),
    })
    .unwrap_or_else(|err| {
        warn!("event=capture_state module=ffi status=error error={err}");
        CaptureStateView {
            mode: mode_name(CaptureMode::Viewing).to_string(),
            text: String::new(),
            has_photo: false,
            drag_offset: 0.0,
            ready_to_save: false,
            save_pending: false,
            confirmation_shown: false,
            character_count: 0,
            max_characters: 0,
            celebration_count: 0,
        }
    })
}

fn capture_poll_at(now: Instant) -> Vec<CaptureEvent> {
    run_capture("capture_poll", now, |session| session.poll(now))
}

fn run_capture(
    operation: &str,
    now: Instant,
    f: impl FnOnce(&mut JournalCaptureSession) -> Vec<SessionEvent>,
) -> Vec<CaptureEvent> {
    match with_capture_session(f) {
        Ok(events) => events
            .into_iter()
            .map(|event| to_capture_event(event, now))
            .collect(),
        Err(err) => {
            warn!("event={operation} module=ffi status=error error={err}");
            let mut event = CaptureEvent::new("error");
            event.message = Some(format!("{operation} failed: {err}"));
            vec![event]
        }
    }
}

fn with_capture_session<T>(
    f: impl FnOnce(&mut JournalCaptureSession) -> T,
) -> Result<T, String> {
    let session = match CAPTURE_SESSION.get() {
        Some(session) => session,
        None => {
            let conn = open_db(resolve_entry_db_path())
                .map_err(|err| format!("entry DB open failed: {err}"))?;
            let session = CaptureSession::new(OwnedSqliteAccomplishmentRepository::new(conn));
            // A concurrent first call may have won the race; its session is kept.
            let _ = CAPTURE_SESSION.set(Mutex::new(session));
            CAPTURE_SESSION
                .get()
                .ok_or_else(|| "capture session unavailable".to_string())?
        }
    };
    let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&mut guard))
}

fn to_capture_event(event: SessionEvent, now: Instant) -> CaptureEvent {
    match event {
        SessionEvent::ModeChanged(mode) => CaptureEvent {
            mode: Some(mode_name(mode).to_string()),
            ..CaptureEvent::new("mode_changed")
        },
        SessionEvent::ReadyToSaveChanged(ready) => CaptureEvent {
            ready: Some(ready),
            ..CaptureEvent::new("ready_to_save_changed")
        },
        SessionEvent::ReadyToSaveAnnounced => CaptureEvent::new("ready_to_save_announced"),
        SessionEvent::SaveScheduled { due } => CaptureEvent {
            due_in_ms: Some(duration_ms(due.saturating_duration_since(now))),
            ..CaptureEvent::new("save_scheduled")
        },
        SessionEvent::Saved(id) => CaptureEvent {
            id: Some(id.to_string()),
            ..CaptureEvent::new("saved")
        },
        SessionEvent::SavedConfirmationShown => CaptureEvent::new("saved_confirmation_shown"),
        SessionEvent::SavedConfirmationHidden => CaptureEvent::new("saved_confirmation_hidden"),
        SessionEvent::ValidationFailed(err) => CaptureEvent {
            message: Some(err.localized_message(current_snapshot().language)),
            ..CaptureEvent::new("validation_failed")
        },
        SessionEvent::PersistenceFailed(reason) => CaptureEvent {
            message: Some(reason),
            ..CaptureEvent::new("persistence_failed")
        },
        SessionEvent::FocusRequested => CaptureEvent::new("focus_requested"),
        SessionEvent::FocusReleased => CaptureEvent::new("focus_released"),
    }
}

fn mode_name(mode: CaptureMode) -> &'static str {
    match mode {
        CaptureMode::Viewing => "viewing",
        CaptureMode::Editing => "editing",
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn record_response(
    result: Result<Accomplishment, String>,
    ok_message: &str,
    operation: &str,
) -> EntryActionResponse {
    match result {
        Ok(item) => EntryActionResponse::success(ok_message, Some(item.id().to_string())),
        Err(err) => EntryActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn describe_service_error(err: &AccomplishmentServiceError) -> String {
    match err {
        AccomplishmentServiceError::Invalid(ConstructionError::Validation(validation)) => {
            validation.localized_message(current_snapshot().language)
        }
        other => other.to_string(),
    }
}

fn current_snapshot() -> PreferenceSnapshot {
    PREFERENCES
        .get()
        .map(Preferences::snapshot)
        .unwrap_or(PreferenceSnapshot {
            language: Language::English,
            color_scheme: AppColorScheme::System,
        })
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("KUDOS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    f(&conn)
}

fn to_entry_item(item: &Accomplishment) -> EntryItem {
    EntryItem {
        id: item.id().to_string(),
        text: item.text().to_string(),
        has_photo: item.has_photo(),
        color: item.color().to_string(),
        created_at_ms: item.date().timestamp_millis(),
    }
}

fn to_wrapped_slide(slide: Slide) -> WrappedSlide {
    let empty = WrappedSlide {
        kind: String::new(),
        year: None,
        count: None,
        text: None,
        image: None,
        gradient_key: None,
    };
    match slide {
        Slide::Intro { year, count } => WrappedSlide {
            kind: "intro".to_string(),
            year: Some(year),
            count: Some(u32::try_from(count).unwrap_or(u32::MAX)),
            ..empty
        },
        Slide::Photo { image, caption } => WrappedSlide {
            kind: "photo".to_string(),
            text: caption,
            image: Some(image),
            ..empty
        },
        Slide::Text { text, gradient_key } => WrappedSlide {
            kind: "text".to_string(),
            text: Some(text),
            gradient_key: Some(gradient_key),
            ..empty
        },
        Slide::Outro => WrappedSlide {
            kind: "outro".to_string(),
            ..empty
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        capture_begin_edit, capture_cancel_edit, capture_drag_changed, capture_drag_ended,
        capture_explicit_save, capture_next_deadline_ms, capture_poll_at, capture_state,
        capture_text_changed, core_version, entry_delete, entry_list, entry_record_photo,
        entry_record_text, init_logging, ping, to_capture_event, to_wrapped_slide, CaptureEvent,
    };
    use kudos_core::{CaptureMode, SessionEvent, Slide, ValidationError};
    use std::time::{Duration, Instant};

    fn kinds(events: &[CaptureEvent]) -> Vec<&str> {
        events.iter().map(|event| event.kind.as_str()).collect()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/kudos-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn record_text_then_list_and_delete() {
        let created = entry_record_text("  ffi logro  ".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.id.unwrap();

        let listed = entry_list(true);
        let item = listed.iter().find(|item| item.id == id).unwrap();
        assert_eq!(item.text, "ffi logro");
        assert!(!item.has_photo);

        let deleted = entry_delete(id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(entry_list(true).iter().all(|item| item.id != id));
    }

    #[test]
    fn record_text_rejects_blank_input() {
        let response = entry_record_text("   ".to_string());
        assert!(!response.ok);
        assert!(response.id.is_none());
    }

    #[test]
    fn record_photo_rejects_empty_bytes() {
        let response = entry_record_photo(Vec::new(), None);
        assert!(!response.ok);
        assert!(response.message.contains("photo data"));
    }

    #[test]
    fn delete_rejects_malformed_id() {
        let response = entry_delete("not-a-uuid".to_string());
        assert!(!response.ok);
    }

    #[test]
    fn intro_slide_is_flattened_with_year_and_count() {
        let flat = to_wrapped_slide(Slide::Intro {
            year: 2026,
            count: 3,
        });
        assert_eq!(flat.kind, "intro");
        assert_eq!(flat.year, Some(2026));
        assert_eq!(flat.count, Some(3));
        assert!(flat.image.is_none());
    }

    #[test]
    fn session_events_are_flattened() {
        let now = Instant::now();
        let scheduled = to_capture_event(
            SessionEvent::SaveScheduled {
                due: now + Duration::from_millis(300),
            },
            now,
        );
        assert_eq!(scheduled.kind, "save_scheduled");
        assert_eq!(scheduled.due_in_ms, Some(300));

        let mode = to_capture_event(SessionEvent::ModeChanged(CaptureMode::Viewing), now);
        assert_eq!(mode.mode.as_deref(), Some("viewing"));

        let failed = to_capture_event(
            SessionEvent::ValidationFailed(ValidationError::EmptyText),
            now,
        );
        assert_eq!(failed.kind, "validation_failed");
        assert!(!failed.message.unwrap_or_default().is_empty());
    }

    #[test]
    fn capture_session_saves_through_ffi_and_recovers_from_validation() {
        capture_cancel_edit();
        let started = capture_begin_edit();
        assert_eq!(kinds(&started), ["mode_changed", "focus_requested"]);
        assert_eq!(started[0].mode.as_deref(), Some("editing"));

        assert_eq!(
            kinds(&capture_text_changed("ffi captura\n".to_string())),
            ["focus_released"]
        );
        let ready = capture_drag_changed(-120.0);
        assert_eq!(
            kinds(&ready),
            ["ready_to_save_changed", "ready_to_save_announced"]
        );
        assert_eq!(ready[0].ready, Some(true));

        let scheduled = capture_drag_ended(-200.0);
        assert_eq!(kinds(&scheduled), ["save_scheduled"]);
        assert!(scheduled[0].due_in_ms.is_some_and(|ms| ms <= 300));
        assert!(capture_explicit_save().is_empty());
        assert!(capture_state().save_pending);
        assert!(capture_next_deadline_ms().is_some());

        let saved = capture_poll_at(Instant::now() + Duration::from_secs(1));
        let id = saved
            .iter()
            .find(|event| event.kind == "saved")
            .and_then(|event| event.id.clone())
            .unwrap();
        assert!(saved
            .iter()
            .any(|event| event.kind == "saved_confirmation_shown"));
        let state = capture_state();
        assert_eq!(state.mode, "viewing");
        assert_eq!(state.text, "");
        assert!(state.celebration_count >= 1);
        assert!(entry_list(false)
            .iter()
            .any(|item| item.id == id && item.text == "ffi captura"));

        capture_begin_edit();
        capture_text_changed("x".to_string());
        assert_eq!(kinds(&capture_explicit_save()), ["save_scheduled"]);
        capture_text_changed("   ".to_string());
        let failed = capture_poll_at(Instant::now() + Duration::from_secs(1));
        let alert = failed
            .iter()
            .find(|event| event.kind == "validation_failed")
            .unwrap();
        assert!(alert.message.as_deref().is_some_and(|message| !message.is_empty()));
        assert!(failed.iter().any(|event| event.kind == "focus_requested"));
        assert_eq!(capture_state().text, "   ");
        assert_eq!(capture_state().mode, "editing");

        capture_cancel_edit();
        assert!(entry_delete(id).ok);
    }
}

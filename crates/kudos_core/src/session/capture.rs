//! Capture interaction state machine.
//!
//! # Responsibility
//! - Track the in-progress text buffer, optional photo and drag gesture.
//! - Turn commit gestures into validated, persisted accomplishments.
//! - Report every visible state change as a discrete `SessionEvent`.
//!
//! # Invariants
//! - At most one save is pending at any time; triggers during the pending
//!   window are ignored.
//! - A failed save never clears the attempted input and never leaves
//!   `Editing`.
//! - The drag offset is always `<= 0`.
//! - `ReadyToSaveAnnounced` fires only on the false -> true edge.
//! - The typing cap never exceeds `MAX_CHARACTERS`.
//!
//! Time is supplied by the caller (`now`); `poll` runs whatever is due.

use crate::model::accomplishment::{Accomplishment, AccomplishmentId, ConstructionError};
use crate::model::validation::{AccomplishmentValidator, ValidationError, MAX_CHARACTERS};
use crate::repo::accomplishment_repo::AccomplishmentRepository;
use crate::session::config::CaptureConfig;
use log::{debug, error, info, warn};
use std::time::Instant;

/// Top-level capture mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureMode {
    #[default]
    Viewing,
    Editing,
}

/// Notification emitted for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ModeChanged(CaptureMode),
    ReadyToSaveChanged(bool),
    /// One-time accessibility announcement when the drag becomes ready.
    ReadyToSaveAnnounced,
    /// A save was accepted and will run once `due` is reached.
    SaveScheduled { due: Instant },
    Saved(AccomplishmentId),
    SavedConfirmationShown,
    SavedConfirmationHidden,
    ValidationFailed(ValidationError),
    /// Storage (or non-validation construction) failure; input is kept.
    PersistenceFailed(String),
    FocusRequested,
    FocusReleased,
}

/// Long-lived capture session bound to one repository.
pub struct CaptureSession<R: AccomplishmentRepository> {
    repo: R,
    config: CaptureConfig,
    validator: AccomplishmentValidator,
    mode: CaptureMode,
    text: String,
    photo: Option<Vec<u8>>,
    drag_offset: f64,
    ready_to_save: bool,
    pending_save: Option<Instant>,
    confirmation_until: Option<Instant>,
    celebration_count: u64,
}

impl<R: AccomplishmentRepository> CaptureSession<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, CaptureConfig::default())
    }

    /// Builds a session with custom tuning.
    ///
    /// `max_characters` is capped at `MAX_CHARACTERS`, the limit storage reads
    /// enforce, so every saved row stays readable.
    pub fn with_config(repo: R, mut config: CaptureConfig) -> Self {
        if config.max_characters > MAX_CHARACTERS {
            warn!(
                "event=capture_config module=session status=skip reason=max_characters_capped requested={} applied={}",
                config.max_characters, MAX_CHARACTERS
            );
            config.max_characters = MAX_CHARACTERS;
        }
        Self {
            repo,
            validator: AccomplishmentValidator::new(config.max_characters),
            config,
            mode: CaptureMode::Viewing,
            text: String::new(),
            photo: None,
            drag_offset: 0.0,
            ready_to_save: false,
            pending_save: None,
            confirmation_until: None,
            celebration_count: 0,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn photo(&self) -> Option<&[u8]> {
        self.photo.as_deref()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Non-empty trimmed text or an attached photo.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || self.photo.is_some()
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    pub fn is_ready_to_save(&self) -> bool {
        self.ready_to_save
    }

    pub fn is_save_pending(&self) -> bool {
        self.pending_save.is_some()
    }

    pub fn is_confirmation_shown(&self) -> bool {
        self.confirmation_until.is_some()
    }

    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn max_characters(&self) -> usize {
        self.config.max_characters
    }

    /// Number of successful saves; drives the confetti animation.
    pub fn celebration_count(&self) -> u64 {
        self.celebration_count
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// `Viewing -> Editing` with empty buffers.
    pub fn begin_edit(&mut self) -> Vec<SessionEvent> {
        if self.mode == CaptureMode::Editing {
            return Vec::new();
        }
        self.text.clear();
        self.photo = None;
        self.drag_offset = 0.0;
        self.ready_to_save = false;
        self.mode = CaptureMode::Editing;
        debug!("event=capture_mode module=session status=ok mode=editing");
        vec![
            SessionEvent::ModeChanged(CaptureMode::Editing),
            SessionEvent::FocusRequested,
        ]
    }

    /// Leaves `Editing` without saving and discards the buffers.
    ///
    /// Ignored while a save is pending.
    pub fn cancel_edit(&mut self) -> Vec<SessionEvent> {
        if self.mode != CaptureMode::Editing || self.pending_save.is_some() {
            return Vec::new();
        }
        let mut events = self.reset_drag();
        self.text.clear();
        self.photo = None;
        self.mode = CaptureMode::Viewing;
        events.push(SessionEvent::FocusReleased);
        events.push(SessionEvent::ModeChanged(CaptureMode::Viewing));
        events
    }

    /// Replaces the text buffer with the editor's current contents.
    ///
    /// A trailing newline commits the line: it is dropped and focus is
    /// released. Input past `max_characters` is truncated.
    pub fn text_changed(&mut self, raw: &str) -> Vec<SessionEvent> {
        if self.mode != CaptureMode::Editing {
            return Vec::new();
        }
        let mut events = Vec::new();
        let mut text = raw;
        if let Some(stripped) = text.strip_suffix('\n') {
            text = stripped.strip_suffix('\r').unwrap_or(stripped);
            events.push(SessionEvent::FocusReleased);
        }
        self.text = match text.char_indices().nth(self.config.max_characters) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        };
        events
    }

    /// Attaches a captured photo; the text buffer becomes its caption.
    pub fn photo_captured(&mut self, bytes: Vec<u8>) -> Vec<SessionEvent> {
        if self.mode != CaptureMode::Editing {
            return Vec::new();
        }
        if bytes.is_empty() {
            warn!("event=capture_photo module=session status=skip reason=empty_photo_data");
            return Vec::new();
        }
        debug!(
            "event=capture_photo module=session status=ok bytes={}",
            bytes.len()
        );
        self.photo = Some(bytes);
        vec![SessionEvent::FocusReleased]
    }

    /// Detaches the photo and returns to text entry; the buffer is kept.
    pub fn photo_removed(&mut self) -> Vec<SessionEvent> {
        if self.mode != CaptureMode::Editing || self.photo.take().is_none() {
            return Vec::new();
        }
        vec![SessionEvent::FocusRequested]
    }

    /// Tracks an in-progress vertical drag (`translation` in points, up < 0).
    pub fn drag_changed(&mut self, translation: f64) -> Vec<SessionEvent> {
        if !self.accepts_triggers() {
            return Vec::new();
        }
        self.drag_offset = (translation * self.config.drag_damping_factor).min(0.0);
        let ready = self.drag_offset < self.config.ready_threshold;
        if ready == self.ready_to_save {
            return Vec::new();
        }
        self.ready_to_save = ready;
        let mut events = vec![SessionEvent::ReadyToSaveChanged(ready)];
        if ready {
            events.push(SessionEvent::ReadyToSaveAnnounced);
        }
        events
    }

    /// Ends a drag; past the commit threshold this schedules a save.
    pub fn drag_ended(&mut self, translation: f64, now: Instant) -> Vec<SessionEvent> {
        if self.mode != CaptureMode::Editing || self.pending_save.is_some() {
            return Vec::new();
        }
        if self.has_content() && translation < self.config.commit_threshold {
            return self.schedule_save(now);
        }
        self.reset_drag()
    }

    /// Save button; no-op without content.
    pub fn explicit_save_requested(&mut self, now: Instant) -> Vec<SessionEvent> {
        if !self.accepts_triggers() {
            return Vec::new();
        }
        self.schedule_save(now)
    }

    /// Accessibility "save" action; saves immediately without feedback delay.
    pub fn accessibility_save_requested(&mut self, now: Instant) -> Vec<SessionEvent> {
        if !self.accepts_triggers() {
            return Vec::new();
        }
        self.save(now)
    }

    /// Runs due work: the pending save and the confirmation auto-dismiss.
    pub fn poll(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if let Some(due) = self.pending_save {
            if now >= due {
                self.pending_save = None;
                events.extend(self.save(now));
            }
        }
        if let Some(until) = self.confirmation_until {
            if now >= until {
                self.confirmation_until = None;
                events.push(SessionEvent::SavedConfirmationHidden);
            }
        }
        events
    }

    /// Earliest instant at which `poll` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pending_save, self.confirmation_until) {
            (Some(save), Some(dismiss)) => Some(save.min(dismiss)),
            (save, dismiss) => save.or(dismiss),
        }
    }

    fn accepts_triggers(&self) -> bool {
        self.mode == CaptureMode::Editing && self.pending_save.is_none() && self.has_content()
    }

    fn schedule_save(&mut self, now: Instant) -> Vec<SessionEvent> {
        let due = now + self.config.save_feedback_delay;
        self.pending_save = Some(due);
        debug!(
            "event=capture_save module=session status=scheduled delay_ms={}",
            self.config.save_feedback_delay.as_millis()
        );
        vec![SessionEvent::SaveScheduled { due }]
    }

    fn reset_drag(&mut self) -> Vec<SessionEvent> {
        self.drag_offset = 0.0;
        if self.ready_to_save {
            self.ready_to_save = false;
            return vec![SessionEvent::ReadyToSaveChanged(false)];
        }
        Vec::new()
    }

    fn save(&mut self, now: Instant) -> Vec<SessionEvent> {
        let kind = if self.photo.is_some() { "photo" } else { "text" };
        let built = match &self.photo {
            Some(photo) => Accomplishment::from_photo_with(
                &self.validator,
                photo.clone(),
                Some(self.text.as_str()),
            ),
            None => Accomplishment::from_text_with(&self.validator, &self.text, None)
                .map_err(ConstructionError::from),
        };

        let mut events = self.reset_drag();
        let item = match built {
            Ok(item) => item,
            Err(ConstructionError::Validation(err)) => {
                warn!(
                    "event=capture_save module=session status=error kind={} error_code=validation_failed error={}",
                    kind, err
                );
                events.push(SessionEvent::ValidationFailed(err));
                events.push(SessionEvent::FocusRequested);
                return events;
            }
            Err(err) => {
                error!(
                    "event=capture_save module=session status=error kind={} error_code=construction_failed error={}",
                    kind, err
                );
                events.push(SessionEvent::PersistenceFailed(err.to_string()));
                return events;
            }
        };

        let id = match self.repo.insert(&item) {
            Ok(id) => id,
            Err(err) => {
                error!(
                    "event=capture_save module=session status=error kind={} error_code=persist_failed error={}",
                    kind, err
                );
                events.push(SessionEvent::PersistenceFailed(err.to_string()));
                return events;
            }
        };

        info!(
            "event=capture_save module=session status=ok kind={} id={}",
            kind, id
        );
        self.text.clear();
        self.photo = None;
        self.mode = CaptureMode::Viewing;
        self.celebration_count += 1;
        events.push(SessionEvent::Saved(id));
        if self.confirmation_until.is_none() {
            events.push(SessionEvent::SavedConfirmationShown);
        }
        self.confirmation_until = Some(now + self.config.confirmation_dismiss_delay);
        events.push(SessionEvent::ModeChanged(CaptureMode::Viewing));
        events
    }
}

//! Capture session: user input to persisted accomplishments.
//!
//! # See also
//! - crate::session::capture for the state machine rules.

pub mod capture;
pub mod config;

pub use capture::{CaptureMode, CaptureSession, SessionEvent};
pub use config::CaptureConfig;

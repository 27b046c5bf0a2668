//! Accomplishment domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the validation and color rules every record is built through.
//!
//! # Invariants
//! - Every record is identified by a stable `AccomplishmentId`.
//! - Deletion is a hard delete; records are never edited after creation.

pub mod accomplishment;
pub mod color;
pub mod validation;

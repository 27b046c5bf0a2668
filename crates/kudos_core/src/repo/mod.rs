//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/session orchestration.
//!
//! # Invariants
//! - Only validated `Accomplishment` values reach write paths.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod accomplishment_repo;
pub mod preference_repo;

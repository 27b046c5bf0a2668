//! Flutter bridge for the Kudos journal core.

pub mod api;

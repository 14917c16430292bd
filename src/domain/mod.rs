//! Shared data model layer (structs only).
//!
//! ## Files
//! - `models.rs` — home/park/ranked-park types and the API wire shapes.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.

pub mod models;

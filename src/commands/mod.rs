//! Command handler layer.
//!
//! ## Files
//! - `report.rs` — resolve home, fetch, rank, resolve activations, render.
//!
//! ## Principles
//! - Validate inputs before any network activity.
//! - Delegate business logic to `services/*`.
//! - Return the finished report; print nothing on failure.

pub mod report;

pub use report::{handle_report, run_report};

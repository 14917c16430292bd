//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `geo.rs` — home resolution, grid locator decoding, haversine distance.
//! - `cache.rs` — on-disk response cache keyed by request URL.
//! - `api.rs` — POTA API client and the `ParkSource` seam.
//! - `progress.rs` — ranking and activation-status resolution.
//! - `output.rs` — summary line and table rendering.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects (network, cache files) live in `api.rs` and `cache.rs` only.

pub mod api;
pub mod cache;
pub mod geo;
pub mod output;
pub mod progress;

//! Reports which of the parks nearest to a location a callsign has activated,
//! using the public Parks on the Air API.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod error;
pub mod services;

pub use error::{ProgressError, Result};

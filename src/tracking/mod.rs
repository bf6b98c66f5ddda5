//! Tracking simulation core
//!
//! The pipeline behind a lookup: validate the number, run the staged
//! fake-progress sequence, then fabricate a profile from a seed derived
//! from the number string. Profile content is deterministic per number;
//! whether a run succeeds at all is decided by an independent random draw.

pub mod generator;
pub mod models;
pub mod phone;
pub mod seed;
pub mod simulator;
pub mod service;

pub use generator::generate_profile;
pub use models::*;
pub use phone::{format_phone_number, validate_phone_number, DEFAULT_COUNTRY_CODE};
pub use seed::SeededRng;
pub use simulator::{StageOutcome, FAILURE_PROBABILITY, PROGRESS_STAGES, TOTAL_STEPS};
pub use service::{track, track_with};

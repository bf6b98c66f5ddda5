//! rastro — an educational phone-number "tracking" simulator.
//!
//! Nothing here looks anything up. A submitted number drives a staged fake
//! search, then a profile is fabricated from a seed derived from the number
//! itself, so repeated lookups of the same number agree with each other.
//! The crate exposes the simulation core ([`tracking`]), a bounded lookup
//! history ([`history`]) and an HTTP/WebSocket boundary ([`server`]).

pub mod history;
pub mod server;
pub mod tracking;

//! Lookup orchestration
//!
//! Ties validation, the staged simulation and profile fabrication together
//! behind one entry point. The service never fails as a Rust call: every
//! outcome, including rejection and cancellation, travels inside the
//! `TrackingResponse` envelope.

use tokio_util::sync::CancellationToken;

use super::generator::generate_profile;
use super::models::{SearchProgress, TrackingResponse};
use super::phone::{validate_phone_number, DEFAULT_COUNTRY_CODE};
use super::simulator::{run_stages, StageOutcome, FAILURE_PROBABILITY};

/// Rejection for an empty or absent phone number
pub const MISSING_NUMBER_ERROR: &str = "Número de telefone é obrigatório";

/// Rejection for a number that fails digit-count validation
pub const INVALID_FORMAT_ERROR: &str = "Número de telefone inválido. Verifique o formato.";

/// Error reported when the run is cancelled mid-search
pub const CANCELLED_ERROR: &str = "Rastreamento cancelado.";

/// Run one simulated lookup with the default failure probability.
pub async fn track<F>(
    phone_number: &str,
    country_code: Option<&str>,
    on_progress: F,
    cancel: Option<&CancellationToken>,
) -> TrackingResponse
where
    F: FnMut(&SearchProgress),
{
    track_with(phone_number, country_code, on_progress, cancel, FAILURE_PROBABILITY).await
}

/// Run one simulated lookup with an explicit failure probability.
///
/// Rejected inputs short-circuit with `processing_time` 0 and no progress
/// callbacks. Otherwise all stages run, each `SearchProgress` is forwarded
/// to the callback, and the envelope carries either the fabricated profile
/// or the run's error message plus the elapsed milliseconds.
pub async fn track_with<F>(
    phone_number: &str,
    country_code: Option<&str>,
    on_progress: F,
    cancel: Option<&CancellationToken>,
    failure_probability: f64,
) -> TrackingResponse
where
    F: FnMut(&SearchProgress),
{
    let phone_number = phone_number.trim();
    if phone_number.is_empty() {
        log::warn!("lookup rejected: missing phone number");
        return TrackingResponse::failure(MISSING_NUMBER_ERROR, 0);
    }

    let country_code = country_code.unwrap_or(DEFAULT_COUNTRY_CODE);
    if !validate_phone_number(phone_number, country_code) {
        log::warn!("lookup rejected: invalid number format for country {country_code}");
        return TrackingResponse::failure(INVALID_FORMAT_ERROR, 0);
    }

    log::info!("lookup started for a {country_code} number");
    let started = tokio::time::Instant::now();
    let outcome = run_stages(on_progress, cancel, failure_probability).await;
    let elapsed = started.elapsed().as_millis() as u64;

    match outcome {
        StageOutcome::Completed => {
            log::info!("lookup completed in {elapsed}ms");
            TrackingResponse::ok(generate_profile(phone_number), elapsed)
        }
        StageOutcome::Failed(message) => {
            log::warn!("lookup failed after {elapsed}ms");
            TrackingResponse::failure(message, elapsed)
        }
        StageOutcome::Cancelled => {
            log::info!("lookup cancelled after {elapsed}ms");
            TrackingResponse::failure(CANCELLED_ERROR, elapsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::simulator::FAILURE_MESSAGE;

    #[tokio::test(start_paused = true)]
    async fn test_missing_number_short_circuits() {
        let mut callbacks = 0;
        let response = track_with("", None, |_| callbacks += 1, None, 0.0).await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(MISSING_NUMBER_ERROR));
        assert_eq!(response.processing_time, 0);
        assert_eq!(callbacks, 0, "no stages run for a rejected input");

        let response = track_with("   ", None, |_| callbacks += 1, None, 0.0).await;
        assert_eq!(response.error.as_deref(), Some(MISSING_NUMBER_ERROR));
        assert_eq!(callbacks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_format_short_circuits() {
        let mut callbacks = 0;
        let response = track_with("119999", None, |_| callbacks += 1, None, 0.0).await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(INVALID_FORMAT_ERROR));
        assert_eq!(response.processing_time, 0);
        assert_eq!(callbacks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_lookup_yields_a_profile() {
        let mut steps = Vec::new();
        let response = track_with("11999998888", None, |p| steps.push(p.step), None, 0.0).await;

        assert!(response.success);
        assert!(response.error.is_none());
        assert_eq!(steps, [1, 2, 3, 4, 5, 6]);
        assert_eq!(response.processing_time, 8300, "paused time counts the stage naps");

        let data = response.data.expect("successful envelope carries a profile");
        assert_eq!(data.phone_number, "11999998888");
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_failure_yields_the_simulator_message() {
        let response = track_with("11999998888", None, |_| {}, None, 1.0).await;

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some(FAILURE_MESSAGE));
        assert_eq!(response.processing_time, 8300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_lookup_reports_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let mut callbacks = 0;
        let response =
            track_with("11999998888", None, |_| callbacks += 1, Some(&token), 0.0).await;

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some(CANCELLED_ERROR));
        assert_eq!(callbacks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_country_code_selects_the_validation_rule() {
        // Eight digits are too short for +55
        let response = track_with("12345678", Some("+55"), |_| {}, None, 0.0).await;
        assert_eq!(response.error.as_deref(), Some(INVALID_FORMAT_ERROR));

        // The same digits pass the international rule
        let response = track_with("12345678", Some("+1"), |_| {}, None, 0.0).await;
        assert!(response.success);
    }
}

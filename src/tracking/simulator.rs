//! Staged search simulation
//!
//! Walks a fixed table of progress stages, reporting each one before
//! sleeping for its duration. After the last stage an independent random
//! draw decides whether the run "fails"; unlike the profile draws this one
//! is deliberately not seeded, so the same number can succeed on one run
//! and fail on the next.

use rand::Rng;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

use super::models::SearchProgress;

/// Stage table: (message, duration in milliseconds)
pub const PROGRESS_STAGES: &[(&str, u64)] = &[
    ("Conectando aos servidores...", 1000),
    ("Validando número de telefone...", 1500),
    ("Coletando dados públicos...", 2000),
    ("Analisando padrões de atividade...", 1800),
    ("Processando localização...", 1200),
    ("Finalizando análise...", 800),
];

/// Number of progress stages in a full run
pub const TOTAL_STEPS: u32 = PROGRESS_STAGES.len() as u32;

/// Default chance that a completed run reports failure
pub const FAILURE_PROBABILITY: f64 = 0.05;

/// Error reported when the failure draw hits
pub const FAILURE_MESSAGE: &str = "Não foi possível rastrear este número. Tente novamente.";

/// How a staged run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// All stages ran and the failure draw missed
    Completed,
    /// All stages ran but the failure draw hit; carries the user-facing message
    Failed(String),
    /// The cancellation token fired during a stage
    Cancelled,
}

/// Completion percentage reported for a 1-based stage
fn stage_percentage(step: u32) -> u32 {
    ((step as f64 / TOTAL_STEPS as f64) * 100.0).round() as u32
}

/// Run the staged sequence, delivering each `SearchProgress` to the callback
/// before suspending for that stage's duration.
///
/// Callbacks arrive strictly in order, exactly once per stage. A signaled
/// cancellation token aborts during the current suspension; no further
/// callbacks are delivered after that.
pub async fn run_stages<F>(
    mut on_progress: F,
    cancel: Option<&CancellationToken>,
    failure_probability: f64,
) -> StageOutcome
where
    F: FnMut(&SearchProgress),
{
    for (index, (message, duration_ms)) in PROGRESS_STAGES.iter().enumerate() {
        let step = index as u32 + 1;
        let progress = SearchProgress {
            step,
            total_steps: TOTAL_STEPS,
            message: (*message).to_string(),
            percentage: stage_percentage(step),
        };
        log::debug!("search stage {step}/{TOTAL_STEPS}: {message}");
        on_progress(&progress);

        let nap = sleep(Duration::from_millis(*duration_ms));
        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        log::info!("search cancelled during stage {step}/{TOTAL_STEPS}");
                        return StageOutcome::Cancelled;
                    }
                    _ = nap => {}
                }
            }
            None => nap.await,
        }
    }

    if rand::thread_rng().gen::<f64>() < failure_probability {
        log::warn!("search finished with a simulated failure");
        return StageOutcome::Failed(FAILURE_MESSAGE.to_string());
    }

    StageOutcome::Completed
}

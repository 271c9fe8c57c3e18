//! Periodic status reporter
//!
//! On every tick the reporter asks the controller for the next green time
//! (which prunes stale vehicles first) and logs it with the live count.

use std::future::Future;
use std::time::Duration;

use sintra_core_presence::ControllerSnapshot;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;

/// Run one control query and log the result
pub async fn report_once(state: &AppState) -> ControllerSnapshot {
    let snapshot = state.controller.lock().await.snapshot();

    tracing::info!(
        live_count = snapshot.live_count,
        capacity = snapshot.capacity,
        green_secs = snapshot.green_secs,
        "Active vehicles: {}, green time: {} s",
        snapshot.live_count,
        snapshot.green_secs
    );

    snapshot
}

/// Report every `period` until `shutdown` resolves
pub async fn run<F>(state: AppState, period: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // interval fires immediately; the first report is due one period from now
    ticker.tick().await;

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                report_once(&state).await;
            }
        }
    }

    tracing::debug!("Reporter stopped");
}

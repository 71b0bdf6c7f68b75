//! Background scheduler for periodic price refresh.
//!
//! Runs the refresher's cycle on a fixed interval, independent of request
//! traffic. A failed cycle is logged and the next tick is the retry.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{info, warn};

use assetarc_core::prices::RefreshOutcome;

use crate::main_lib::AppState;

/// Initial delay before the first refresh (let the server fully start).
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the background price refresh scheduler.
pub fn start_price_refresh_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!(
            "Price refresh scheduler started ({}s interval)",
            state.refresh_interval.as_secs()
        );

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate, subsequent ticks are one interval apart
        let mut tick = interval(state.refresh_interval);

        loop {
            tick.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

/// Runs a single scheduled refresh cycle.
async fn run_scheduled_refresh(state: &Arc<AppState>) {
    match state.refresher.run_cycle().await {
        RefreshOutcome::Completed { written } => {
            info!("Scheduled price refresh wrote {} quotes", written);
        }
        RefreshOutcome::SkippedCacheUnavailable => {
            warn!("Scheduled price refresh skipped: cache unavailable");
        }
        RefreshOutcome::SkippedUpstream => {
            warn!("Scheduled price refresh skipped: upstream fetch failed");
        }
    }
}

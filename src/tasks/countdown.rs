//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::state::AppState;

const TICK: Duration = Duration::from_secs(1);

/// Drive one running countdown, one tick per second.
///
/// The task belongs to a single run `generation`; it exits as soon as the
/// controller reports that generation paused, superseded, or expired.
pub async fn countdown_task(state: Arc<AppState>, generation: u64) {
    debug!("Countdown {} started", generation);

    // First tick one period from now, not immediately
    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if !state.tick(generation) {
            break;
        }
    }

    debug!("Countdown {} finished", generation);
}

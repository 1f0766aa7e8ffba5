//! Deferred phase switch after a completion

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::debug;

use crate::state::AppState;

/// Wait out the completion delay, then apply switch `id` unless it was
/// cancelled or replaced in the meantime
pub async fn mode_switch_task(state: Arc<AppState>, id: u64, delay: Duration) {
    debug!("Switch {} scheduled in {:?}", id, delay);
    sleep(delay).await;
    state.apply_scheduled_switch(id);
}

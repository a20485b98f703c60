use std::time::Duration;

use log::*;
use payment_order_engine::OrderStatusTracker;
use tokio::task::JoinHandle;

use crate::backend_client::HttpOrderBackend;

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Starts the order status worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// Poll intervals shorter than a second are raised to one second.
pub fn start_tracker_worker(tracker: OrderStatusTracker<HttpOrderBackend>, poll_interval: Duration) -> JoinHandle<()> {
    if poll_interval < MIN_POLL_INTERVAL {
        warn!("🕰️ A poll interval of {poll_interval:?} is too short. Polling every {MIN_POLL_INTERVAL:?} instead.");
    }
    let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(poll_interval);
        info!("🕰️ Order status worker started. Polling every {}s", poll_interval.as_secs());
        loop {
            timer.tick().await;
            if tracker.tracked_orders().is_empty() {
                trace!("🕰️ No orders are being tracked");
                continue;
            }
            debug!("🕰️ Polling the status of {} orders", tracker.tracked_orders().len());
            let result = tracker.poll().await;
            info!(
                "🕰️ Order status poll complete. {} updated, {} completed, {} abandoned, {} failed",
                result.updated_count(),
                result.completed_count(),
                result.abandoned_count(),
                result.failed_count()
            );
            if !result.failed.is_empty() {
                warn!("🕰️ Could not poll the status of orders {}", result.failed.join(", "));
            }
        }
    })
}

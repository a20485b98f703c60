use log::*;
use payment_order_engine::{order_objects::OrderUpdatedPayload, OrderUpdatedCallback};

/// Logs every order update. This is the listener the server registers when it starts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingOrderListener;

impl OrderUpdatedCallback for LoggingOrderListener {
    fn on_update(&self, update: &OrderUpdatedPayload) {
        info!(
            "📬️ Order {} is now {} ({} {})",
            update.order_id, update.status, update.pay_amount, update.pay_currency
        );
    }
}

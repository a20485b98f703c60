use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::*;
use mpo_common::helpers::env_flag;
use payment_order_engine::events::DEFAULT_EVENT_BUFFER_SIZE;

const DEFAULT_MPO_HOST: &str = "127.0.0.1";
const DEFAULT_MPO_PORT: u16 = 8370;
const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_STATUS_POLL_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_STATUS_TRACKING_HOURS: i64 = 48;
const DEFAULT_STATUS_TRACKING_TIMEOUT: chrono::Duration = chrono::Duration::hours(DEFAULT_STATUS_TRACKING_HOURS);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The base URL of the backend payment order service, e.g. "https://orders.example.com/api/v2"
    pub backend_url: String,
    /// Requests to the backend that take longer than this are abandoned and reported as unavailable.
    pub backend_timeout: Duration,
    /// Where to look up the node's location when a client does not supply a billing country. If this is not set,
    /// such orders cannot be created.
    pub location_oracle_url: Option<String>,
    pub event_buffer_size: usize,
    /// If false, order statuses are not tracked and no order update notifications are produced.
    pub track_order_status: bool,
    pub status_poll_interval: Duration,
    /// Orders that have not reached a final status after this long are no longer tracked.
    pub status_tracking_timeout: chrono::Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MPO_HOST.to_string(),
            port: DEFAULT_MPO_PORT,
            backend_url: String::default(),
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            location_oracle_url: None,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            track_order_status: true,
            status_poll_interval: DEFAULT_STATUS_POLL_INTERVAL,
            status_tracking_timeout: DEFAULT_STATUS_TRACKING_TIMEOUT,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MPO_HOST").ok().unwrap_or_else(|| DEFAULT_MPO_HOST.into());
        let port = parse_env_or("MPO_PORT", DEFAULT_MPO_PORT);
        let backend_url = env::var("MPO_BACKEND_URL").ok().unwrap_or_else(|| {
            error!("🪛️ MPO_BACKEND_URL is not set. Please set it to the base URL of the payment order backend.");
            String::default()
        });
        let backend_timeout =
            Duration::from_secs(parse_nonzero_env_or("MPO_BACKEND_TIMEOUT_SECS", DEFAULT_BACKEND_TIMEOUT.as_secs()));
        let location_oracle_url = env::var("MPO_LOCATION_ORACLE_URL").ok().filter(|s| !s.is_empty());
        if location_oracle_url.is_none() {
            warn!(
                "🪛️ MPO_LOCATION_ORACLE_URL is not set. Orders without a billing country will be refused, since the \
                 country cannot be derived from the node location."
            );
        }
        let event_buffer_size = parse_env_or("MPO_EVENT_BUFFER_SIZE", DEFAULT_EVENT_BUFFER_SIZE);
        let track_order_status = env_flag("MPO_TRACK_ORDER_STATUS", true);
        let status_poll_interval = Duration::from_secs(parse_nonzero_env_or(
            "MPO_STATUS_POLL_INTERVAL_SECS",
            DEFAULT_STATUS_POLL_INTERVAL.as_secs(),
        ));
        let status_tracking_timeout = parse_hours_env_or("MPO_STATUS_TRACKING_TIMEOUT", DEFAULT_STATUS_TRACKING_HOURS);
        Self {
            host,
            port,
            backend_url,
            backend_timeout,
            location_oracle_url,
            event_buffer_size,
            track_order_status,
            status_poll_interval,
            status_tracking_timeout,
        }
    }
}

/// Read `name` from the environment. Missing or invalid values give `default`, with a log message explaining why.
fn parse_env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(name) {
        Ok(s) => s.parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            info!("🪛️ {name} is not set. Using the default value of {default}.");
            default
        },
    }
}

/// As [`parse_env_or`], but zero is also replaced by `default`.
fn parse_nonzero_env_or(name: &str, default: u64) -> u64 {
    match parse_env_or(name, default) {
        0 => {
            error!("🪛️ {name} must be greater than zero. Using the default, {default}, instead.");
            default
        },
        value => value,
    }
}

/// A positive number of hours from the environment. Values too large to represent also fall back to `default_hours`.
fn parse_hours_env_or(name: &str, default_hours: i64) -> chrono::Duration {
    let fallback = chrono::Duration::hours(default_hours);
    let hours = parse_env_or(name, default_hours);
    if hours <= 0 {
        error!("🪛️ {name} must be a positive number of hours. Using the default, {default_hours}, instead.");
        return fallback;
    }
    chrono::Duration::try_hours(hours).unwrap_or_else(|| {
        error!("🪛️ {hours} hours is too long for {name}. Using the default, {default_hours}, instead.");
        fallback
    })
}

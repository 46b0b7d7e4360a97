//! Build-time configuration.
//!
//! The frontend ships as a static bundle, so the only knobs are baked in when
//! Trunk compiles it: set `EXPENSE_TRACKER_API_URL` or `EXPENSE_TRACKER_LOG`
//! in the build environment to override the defaults below.

use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

pub const CURRENCY_SYMBOL: &str = "₹";

/// Canvas element ids the dashboard renders charts into.
pub const EXPENSE_CANVAS: &str = "expenseChart";
pub const CATEGORY_CANVAS: &str = "categoryChart";
pub const TREND_CANVAS: &str = "mlChart";

pub fn api_base_url() -> &'static str {
    option_env!("EXPENSE_TRACKER_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
}

pub fn log_level() -> log::Level {
    parse_log_level(option_env!("EXPENSE_TRACKER_LOG"))
}

fn parse_log_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|level| log::Level::from_str(level.trim()).ok())
        .unwrap_or(if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        })
}

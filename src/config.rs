//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Root of the "On this day" feed. Requests are made to `{FEED_BASE_URL}/{category}/{MM}/{DD}`.
/// Can be set with the `TODAY_FEED_URL` environment variable, or overridden when initing this library.
pub static FEED_BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(
    from_env_or("TODAY_FEED_URL", "https://api.wikimedia.org/feed/v1/wikipedia/en/onthisday")
)));

/// The MediaWiki API that serves the pre-rendered "Selected anniversaries" pages
pub static LEGACY_API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(
    "https://en.wikipedia.org/w/api.php".to_string()
)));

/// Where the binary gets its data from: `feed` (the default) for the "On this day" feed,
/// or `anniversaries` to scrape the "Selected anniversaries" pages from [`LEGACY_API_URL`].
/// Can be set with the `TODAY_SOURCE` environment variable, or overridden when initing this library.
pub static DATA_SOURCE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(
    from_env_or("TODAY_SOURCE", "feed")
)));

/// The value of the identifying header that Wikimedia APIs require.
/// Can be set with the `TODAY_USER_AGENT` environment variable, or overridden when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(
    from_env_or("TODAY_USER_AGENT", concat!("TodayInHistory/", env!("CARGO_PKG_VERSION"), " (https://github.com/daladim/today-in-history)"))
)));

fn from_env_or(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() == false => value,
        _ => default.to_string(),
    }
}

/// Read the current value of a setting
///
/// A poisoned lock still holds a valid `String`, so its value is used anyway.
pub fn get(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override a setting
pub fn set<S: ToString>(setting: &Lazy<Arc<Mutex<String>>>, value: S) {
    match setting.lock() {
        Ok(mut current) => *current = value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = value.to_string(),
    }
}

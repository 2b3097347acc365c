use std::{env, path::PathBuf, time::Duration};

use crate::{CDN_TIMEOUT_ENV, DATA_ROOT_DIR_NAME, DATA_ROOT_ENV, DESKTOP_LOG_ENV};

pub(crate) fn default_data_root_dir() -> Option<PathBuf> {
    if let Ok(root) = env::var(DATA_ROOT_ENV) {
        let path = PathBuf::from(root.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home::home_dir().map(|home| home.join(DATA_ROOT_DIR_NAME))
}

/// Upstream CDN timeout. `None` leaves the request bounded only by the transport.
pub(crate) fn cdn_timeout() -> Option<Duration> {
    env::var(CDN_TIMEOUT_ENV)
        .ok()
        .and_then(|raw| parse_timeout_ms(&raw))
}

pub(crate) fn parse_timeout_ms(raw: &str) -> Option<Duration> {
    let timeout_ms = raw.trim().parse::<u64>().ok()?;
    if timeout_ms == 0 {
        return None;
    }
    Some(Duration::from_millis(timeout_ms))
}

pub(crate) fn desktop_log_file_enabled() -> bool {
    env::var(DESKTOP_LOG_ENV)
        .map(|value| value.trim() != "0")
        .unwrap_or(true)
}

use std::process::{Command, Stdio};
use url::Url;

use crate::{append_desktop_log, BridgeResult};

/// Only absolute http(s) URLs leave the app; everything else stays rejected.
fn external_url(candidate: &str) -> Result<Url, String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Err("No URL was given to open.".to_string());
    }

    let url = Url::parse(candidate)
        .map_err(|error| format!("Cannot open '{candidate}' in the browser: {error}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "Refusing to hand a {} URL to the browser.",
            url.scheme()
        ));
    }
    Ok(url)
}

fn spawn_opener(program: &str, args: &[&str]) -> Result<(), String> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run '{program}': {error}"))
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_opener("open", &[url])
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_opener("rundll32", &["url.dll,FileProtocolHandler", url])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_opener("xdg-open", &[url])
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

#[tauri::command]
pub(crate) fn open_external_url(url: String) -> BridgeResult {
    let parsed = match external_url(&url) {
        Ok(parsed) => parsed,
        Err(error) => {
            append_desktop_log(&format!("refused to open external url: {error}"));
            return BridgeResult::failed(error);
        }
    };

    append_desktop_log(&format!("opening external url: {parsed}"));
    match open_url_with_system_browser(parsed.as_str()) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => {
            append_desktop_log(&error);
            BridgeResult::failed(error)
        }
    }
}

use tauri::{window::Color, AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::{
    app_protocol, bootstrap_script::BootstrapScript, MAIN_WINDOW_BACKGROUND_RGB,
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE, MAIN_WINDOW_WIDTH,
};

pub(crate) fn create_main_window(app_handle: &AppHandle) -> Result<(), String> {
    let url = app_protocol::app_url()?;
    let (red, green, blue) = MAIN_WINDOW_BACKGROUND_RGB;
    // Installed before any page script runs so startup fetches are rewritten too.
    let bootstrap = BootstrapScript::default().render()?;

    WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::CustomProtocol(url))
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .background_color(Color(red, green, blue, 255))
        .initialization_script(bootstrap.as_str())
        .build()
        .map(|_| ())
        .map_err(|error| format!("Failed to create main window: {error}"))
}

pub(crate) fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("show_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub(crate) fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("hide_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.hide() {
        log(&format!("failed to hide main window: {error}"));
    }
}

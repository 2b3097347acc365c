pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "it-tools";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1280.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 768.0;
pub(crate) const MAIN_WINDOW_BACKGROUND_RGB: (u8, u8, u8) = (27, 38, 54);

pub(crate) const APP_PROTOCOL_SCHEME: &str = "ittools";
pub(crate) const CDN_PROXY_PREFIX: &str = "/unpkg.com";
pub(crate) const CDN_UPSTREAM_SCHEME: &str = "https";

pub(crate) const ABOUT_TITLE: &str = "it-tools gui";
pub(crate) const ABOUT_MESSAGE: &str = "it-tools: https://github.com/CorentinTh/it-tools";

pub(crate) const DATA_ROOT_DIR_NAME: &str = ".it-tools";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";

pub(crate) const DATA_ROOT_ENV: &str = "ITTOOLS_ROOT";
pub(crate) const CDN_TIMEOUT_ENV: &str = "ITTOOLS_CDN_TIMEOUT_MS";
pub(crate) const DESKTOP_LOG_ENV: &str = "ITTOOLS_DESKTOP_LOG";

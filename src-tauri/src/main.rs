#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_menu;
mod app_protocol;
mod app_runtime;
mod app_types;
mod asset_loader;
mod bootstrap_script;
mod cdn_client;
mod desktop_bridge;
mod desktop_bridge_commands;
mod logging;
mod main_window;
mod runtime_config;

pub(crate) use app_constants::*;
pub(crate) use app_types::{AppState, BridgeResult};
pub(crate) use logging::append_desktop_log;

fn main() {
    app_runtime::run();
}

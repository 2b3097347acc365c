use tauri::{
    image::Image,
    menu::{AboutMetadata, Menu, PredefinedMenuItem, Submenu},
    AppHandle,
};

use crate::{ABOUT_MESSAGE, ABOUT_TITLE, MAIN_WINDOW_TITLE};

fn about_metadata() -> AboutMetadata<'static> {
    AboutMetadata {
        name: Some(ABOUT_TITLE.to_string()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        comments: Some(ABOUT_MESSAGE.to_string()),
        website: Some("https://github.com/CorentinTh/it-tools".to_string()),
        icon: Some(about_icon()),
        ..Default::default()
    }
}

fn about_icon() -> Image<'static> {
    tauri::include_image!("./icons/appicon.png")
}

/// Application menu with an About panel. Only macOS shows an app menu.
pub(crate) fn build_app_menu(app_handle: &AppHandle) -> Result<Option<Menu<tauri::Wry>>, String> {
    if !cfg!(target_os = "macos") {
        return Ok(None);
    }

    let about = PredefinedMenuItem::about(app_handle, Some("About it-tools"), Some(about_metadata()))
        .map_err(|error| format!("Failed to create about menu item: {error}"))?;
    let services = PredefinedMenuItem::services(app_handle, None)
        .map_err(|error| format!("Failed to create services menu item: {error}"))?;
    let hide = PredefinedMenuItem::hide(app_handle, None)
        .map_err(|error| format!("Failed to create hide menu item: {error}"))?;
    let hide_others = PredefinedMenuItem::hide_others(app_handle, None)
        .map_err(|error| format!("Failed to create hide-others menu item: {error}"))?;
    let show_all = PredefinedMenuItem::show_all(app_handle, None)
        .map_err(|error| format!("Failed to create show-all menu item: {error}"))?;
    let quit = PredefinedMenuItem::quit(app_handle, None)
        .map_err(|error| format!("Failed to create quit menu item: {error}"))?;
    let first_separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))?;
    let second_separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))?;
    let third_separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))?;

    let app_submenu = Submenu::with_items(
        app_handle,
        MAIN_WINDOW_TITLE,
        true,
        &[
            &about,
            &first_separator,
            &services,
            &second_separator,
            &hide,
            &hide_others,
            &show_all,
            &third_separator,
            &quit,
        ],
    )
    .map_err(|error| format!("Failed to build application submenu: {error}"))?;

    Menu::with_items(app_handle, &[&app_submenu])
        .map(Some)
        .map_err(|error| format!("Failed to build application menu: {error}"))
}

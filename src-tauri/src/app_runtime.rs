use tauri::{webview::PageLoadEvent, AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_menu, app_protocol, append_desktop_log, cdn_client::CdnClient, desktop_bridge,
    logging, main_window, runtime_config, AppState, APP_PROTOCOL_SCHEME, DESKTOP_LOG_FILE,
    MAIN_WINDOW_LABEL,
};

fn hide_on_close() -> bool {
    cfg!(target_os = "macos")
}

fn setup_app(app_handle: &AppHandle) -> Result<(), String> {
    let cdn_timeout = runtime_config::cdn_timeout();
    append_desktop_log(&format!(
        "cdn proxy timeout: {}",
        cdn_timeout
            .map(|timeout| format!("{}ms", timeout.as_millis()))
            .unwrap_or_else(|| "none".to_string())
    ));
    app_handle.manage(CdnClient::new(cdn_timeout)?);

    if let Some(menu) = app_menu::build_app_menu(app_handle)? {
        app_handle
            .set_menu(menu)
            .map_err(|error| format!("Failed to install application menu: {error}"))?;
    }

    main_window::create_main_window(app_handle)
}

pub(crate) fn run() {
    append_desktop_log("desktop process starting");
    append_desktop_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(runtime_config::default_data_root_dir(), DESKTOP_LOG_FILE)
            .display()
    ));

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _args, _cwd| {
            append_desktop_log("second instance launched; focusing main window");
            main_window::show_main_window(app_handle, append_desktop_log);
        }))
        .manage(AppState::default())
        .register_asynchronous_uri_scheme_protocol(APP_PROTOCOL_SCHEME, |ctx, request, responder| {
            app_protocol::handle_request(ctx, request, responder)
        })
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::open_external_url
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL || !hide_on_close() {
                return;
            }

            if let WindowEvent::CloseRequested { api, .. } = event {
                let app_handle = window.app_handle();
                if app_handle.state::<AppState>().is_quitting() {
                    return;
                }

                api.prevent_close();
                main_window::hide_main_window(app_handle, append_desktop_log);
            }
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                append_desktop_log(&format!("page-load started: {}", payload.url()));
            }
            PageLoadEvent::Finished => {
                append_desktop_log(&format!("page-load finished: {}", payload.url()));
                if desktop_bridge::should_inject_bridge(payload.url()) {
                    desktop_bridge::inject_bridge(webview);
                }
            }
        })
        .setup(|app| {
            setup_app(app.handle())?;
            Ok(())
        })
        .build(tauri::generate_context!());

    let app = match app {
        Ok(app) => app,
        Err(error) => {
            eprintln!("Error: {error}");
            append_desktop_log(&format!("failed to start: {error}"));
            std::process::exit(1);
        }
    };

    app.run(|app_handle, event| match event {
        RunEvent::ExitRequested { .. } => {
            app_handle.state::<AppState>().mark_quitting();
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows: false,
            ..
        } => {
            main_window::show_main_window(app_handle, append_desktop_log);
        }
        _ => {}
    });
}

use tauri::{webview::PageLoadEvent, Manager, WindowEvent};

use crate::{
    app_config::{self, LauncherConfig},
    desktop_bridge,
    logging::{
        append_runtime_log, append_startup_log, append_ui_log, resolve_launcher_log_path,
        LAUNCHER_LOG_FILE,
    },
    main_window::{self, MAIN_WINDOW_LABEL},
    tauri_update, updater_bridge,
};

pub fn run() {
    let config = LauncherConfig::from_env();

    append_startup_log("launcher process starting");
    append_startup_log(&format!(
        "launcher log path: {}",
        resolve_launcher_log_path(app_config::resolve_log_dir(), LAUNCHER_LOG_FILE).display()
    ));
    append_startup_log(&format!(
        "dev_build={} locale={} update_check_interval_ms={}",
        config.dev_build,
        config.locale,
        config.update_check_interval.as_millis()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            main_window::show_main_window(app, append_runtime_log);
        }))
        .plugin(tauri_plugin_updater::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            crate::bridge_commands::launcher_window_control,
            crate::bridge_commands::launcher_handle_key_chord,
            crate::bridge_commands::launcher_open_external_url,
            crate::bridge_commands::launcher_change_allow_prerelease,
            crate::bridge_commands::launcher_update_button_clicked,
            crate::bridge_commands::launcher_update_badge_clicked,
            crate::bridge_commands::launcher_get_update_ui_state,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::Destroyed = event {
                tauri_update::shutdown_update_relay(window.app_handle());
            }
        })
        .on_page_load(|webview, payload| {
            if webview.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match payload.event() {
                PageLoadEvent::Started => {
                    append_ui_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_ui_log(&format!("page-load finished: {}", payload.url()));
                    desktop_bridge::inject_desktop_bridge(webview, append_ui_log);
                    main_window::apply_launch_layout(webview, append_ui_log);
                }
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            tauri_update::install_update_relay(&app_handle, &config);

            if config.dev_build {
                append_startup_log("auto updates disabled in development build");
            } else {
                updater_bridge::start_updater_bridge(&app_handle);
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

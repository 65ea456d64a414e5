use std::sync::{Arc, Mutex};

use tauri::{AppHandle, Emitter, Listener, Manager};

use crate::{
    app_config::LauncherConfig,
    desktop_bridge::{OPEN_UPDATE_SETTINGS_EVENT, UPDATE_UI_EVENT},
    logging::{append_runtime_log, append_updater_log, LogLevel},
    main_window::{self, MAIN_WINDOW_LABEL},
    update_action::{UpdateAction, UpdateActionSink, UPDATE_ACTION_EVENT},
    update_relay::{RelayConfig, UpdateNotificationRelay},
    update_schedule::ThreadScheduler,
    update_status::{UpdateNotification, UPDATE_NOTIFICATION_EVENT},
    update_ui::{UpdateSurface, UpdateUiState},
};

pub(crate) struct LauncherUpdateState {
    relay: Mutex<UpdateNotificationRelay>,
}

struct TauriUpdateSurface {
    app_handle: AppHandle,
}

impl UpdateSurface for TauriUpdateSurface {
    fn apply(&self, state: &UpdateUiState) {
        if let Err(error) = self
            .app_handle
            .emit_to(MAIN_WINDOW_LABEL, UPDATE_UI_EVENT, state)
        {
            append_runtime_log(&format!("failed to emit update ui state: {error}"));
        }
    }

    fn open_update_settings(&self) {
        main_window::show_main_window(&self.app_handle, append_runtime_log);
        if let Err(error) = self
            .app_handle
            .emit_to(MAIN_WINDOW_LABEL, OPEN_UPDATE_SETTINGS_EVENT, ())
        {
            append_runtime_log(&format!("failed to request update settings view: {error}"));
        }
    }
}

struct TauriActionSink {
    app_handle: AppHandle,
}

impl UpdateActionSink for TauriActionSink {
    fn send(&self, action: UpdateAction) {
        if let Err(error) = self.app_handle.emit(UPDATE_ACTION_EVENT, action) {
            append_updater_log(
                LogLevel::Error,
                &format!("failed to send update action {action:?}: {error}"),
            );
        }
    }
}

/// Runs `f` against the relay, or returns `None` before it is installed.
pub(crate) fn with_relay<T, F>(app_handle: &AppHandle, f: F) -> Option<T>
where
    F: FnOnce(&mut UpdateNotificationRelay) -> T,
{
    let state = app_handle.try_state::<LauncherUpdateState>()?;
    let mut relay = state
        .relay
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Some(f(&mut relay))
}

pub(crate) fn install_update_relay(app_handle: &AppHandle, config: &LauncherConfig) {
    let relay = UpdateNotificationRelay::new(
        RelayConfig::from_launcher_config(config),
        Arc::new(TauriUpdateSurface {
            app_handle: app_handle.clone(),
        }),
        Arc::new(TauriActionSink {
            app_handle: app_handle.clone(),
        }),
        Arc::new(ThreadScheduler),
        Arc::new(append_updater_log),
    );
    if !app_handle.manage(LauncherUpdateState {
        relay: Mutex::new(relay),
    }) {
        append_runtime_log("update relay already installed, skipping");
        return;
    }

    let listener_app = app_handle.clone();
    app_handle.listen(UPDATE_NOTIFICATION_EVENT, move |event| {
        match serde_json::from_str::<UpdateNotification>(event.payload()) {
            Ok(notification) => {
                with_relay(&listener_app, |relay| relay.handle_notification(&notification));
            }
            Err(error) => append_updater_log(
                LogLevel::Error,
                &format!("malformed update notification ignored: {error}"),
            ),
        }
    });
}

pub(crate) fn shutdown_update_relay(app_handle: &AppHandle) {
    let had_timer = with_relay(app_handle, |relay| {
        let had_timer = relay.has_check_timer();
        relay.shutdown();
        had_timer
    });
    if had_timer == Some(true) {
        append_runtime_log("main window destroyed; periodic update check stopped");
    }
}

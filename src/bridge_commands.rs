use tauri::{AppHandle, WebviewWindow};

use crate::{
    external_links,
    logging::{append_runtime_log, append_ui_log},
    tauri_update::with_relay,
    update_ui::UpdateUiState,
    window_controls::{self, KeyChord, WindowControl},
};

#[derive(Debug, serde::Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    fn success() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    fn failure(reason: String) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }
}

impl From<Result<(), String>> for BridgeResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(reason) => Self::failure(reason),
        }
    }
}

fn update_relay_missing() -> BridgeResult {
    BridgeResult::failure("Update relay is not running.".to_string())
}

#[tauri::command]
pub(crate) fn launcher_window_control(
    window: WebviewWindow,
    control: WindowControl,
) -> BridgeResult {
    let result = window_controls::apply_window_control(&window, control);
    if let Err(error) = &result {
        append_ui_log(&format!("window control {control:?} failed: {error}"));
    }
    result.into()
}

#[tauri::command]
pub(crate) fn launcher_handle_key_chord(window: WebviewWindow, chord: KeyChord) -> bool {
    if !window_controls::is_devtools_shortcut(&chord) {
        return false;
    }

    if let Err(error) = window_controls::apply_window_control(&window, WindowControl::ToggleDevtools)
    {
        append_ui_log(&format!("failed to toggle devtools: {error}"));
    }
    true
}

#[tauri::command]
pub(crate) fn launcher_open_external_url(url: String) -> BridgeResult {
    let result = external_links::open_external_link(&url);
    if let Err(error) = &result {
        append_ui_log(&format!("external link not opened: {error}"));
    }
    result.into()
}

#[tauri::command]
pub(crate) fn launcher_change_allow_prerelease(app_handle: AppHandle, allow: bool) -> BridgeResult {
    match with_relay(&app_handle, |relay| relay.change_allow_prerelease(allow)) {
        Some(()) => BridgeResult::success(),
        None => update_relay_missing(),
    }
}

#[tauri::command]
pub(crate) fn launcher_update_button_clicked(app_handle: AppHandle) -> BridgeResult {
    match with_relay(&app_handle, |relay| relay.click_update_button()) {
        Some(()) => BridgeResult::success(),
        None => update_relay_missing(),
    }
}

#[tauri::command]
pub(crate) fn launcher_update_badge_clicked(app_handle: AppHandle) -> BridgeResult {
    match with_relay(&app_handle, |relay| relay.click_update_badge()) {
        Some(()) => BridgeResult::success(),
        None => update_relay_missing(),
    }
}

#[tauri::command]
pub(crate) fn launcher_get_update_ui_state(app_handle: AppHandle) -> Option<UpdateUiState> {
    let snapshot = with_relay(&app_handle, |relay| relay.ui_state().clone());
    if snapshot.is_none() {
        append_runtime_log("update ui state requested before relay was installed");
    }
    snapshot
}

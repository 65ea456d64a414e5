use tauri::{AppHandle, Manager, Webview, WebviewWindow};

use crate::{
    launch_layout::{build_launch_layout_script, LAUNCHER_ZOOM, LAUNCH_LAYOUT},
    window_controls::LauncherWindow,
};

pub const MAIN_WINDOW_LABEL: &str = "main";

impl LauncherWindow for WebviewWindow {
    fn close(&self) -> Result<(), String> {
        WebviewWindow::close(self).map_err(|error| format!("Failed to close window: {error}"))
    }

    fn minimize(&self) -> Result<(), String> {
        WebviewWindow::minimize(self)
            .map_err(|error| format!("Failed to minimize window: {error}"))
    }

    fn maximize(&self) -> Result<(), String> {
        WebviewWindow::maximize(self)
            .map_err(|error| format!("Failed to maximize window: {error}"))
    }

    fn unmaximize(&self) -> Result<(), String> {
        WebviewWindow::unmaximize(self)
            .map_err(|error| format!("Failed to restore window: {error}"))
    }

    fn is_maximized(&self) -> Result<bool, String> {
        WebviewWindow::is_maximized(self)
            .map_err(|error| format!("Failed to read window maximized state: {error}"))
    }

    fn is_devtools_open(&self) -> bool {
        WebviewWindow::is_devtools_open(self)
    }

    fn open_devtools(&self) {
        WebviewWindow::open_devtools(self);
    }

    fn close_devtools(&self) {
        WebviewWindow::close_devtools(self);
    }
}

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
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

/// Pins zoom and applies the fixed launch bar widths once the page is up.
pub fn apply_launch_layout<F>(webview: &Webview, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = webview.set_zoom(LAUNCHER_ZOOM) {
        log(&format!("failed to reset launcher zoom: {error}"));
    }

    match build_launch_layout_script(&LAUNCH_LAYOUT) {
        Ok(script) => {
            if let Err(error) = webview.eval(&script) {
                log(&format!("failed to apply launch layout: {error}"));
            }
        }
        Err(error) => log(&error),
    }
}

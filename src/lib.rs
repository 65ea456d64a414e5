pub mod app_config;
pub mod desktop_bridge;
pub mod download_url;
pub mod external_links;
pub mod launch_layout;
pub mod launcher_texts;
pub mod logging;
pub mod update_action;
pub mod update_relay;
pub mod update_schedule;
pub mod update_status;
pub mod update_ui;
pub mod window_controls;

#[cfg(feature = "desktop")]
pub mod app_runtime;
#[cfg(feature = "desktop")]
mod bridge_commands;
#[cfg(feature = "desktop")]
mod main_window;
#[cfg(feature = "desktop")]
mod tauri_update;
#[cfg(feature = "desktop")]
mod updater_bridge;

pub use logging::{
    append_runtime_log, append_startup_log, append_ui_log, append_updater_log, LogCategory,
    LogLevel,
};
pub use update_relay::{RelayConfig, UpdateNotificationRelay};

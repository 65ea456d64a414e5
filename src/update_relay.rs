use std::{sync::Arc, time::Duration};

use crate::{
    app_config::LauncherConfig,
    download_url::{derive_download_url, DOWNLOAD_URL_TEMPLATE},
    launcher_texts::{launcher_texts_for_locale, LauncherTexts},
    logging::LogLevel,
    update_action::{UpdateAction, UpdateActionSink},
    update_schedule::{Scheduler, TimerHandle},
    update_status::{
        UpdateErrorCode, UpdateErrorInfo, UpdateInfo, UpdateNotification, UpdateStatus,
    },
    update_ui::{BadgeClickAction, ButtonClickAction, UpdatePhase, UpdateSurface, UpdateUiState},
};

pub type RelayLogger = Arc<dyn Fn(LogLevel, &str) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub dev_build: bool,
    pub check_interval: Duration,
    pub download_url_template: String,
    pub texts: LauncherTexts,
}

impl RelayConfig {
    pub fn from_launcher_config(config: &LauncherConfig) -> Self {
        Self {
            dev_build: config.dev_build,
            check_interval: config.update_check_interval,
            download_url_template: DOWNLOAD_URL_TEMPLATE.to_string(),
            texts: launcher_texts_for_locale(config.locale),
        }
    }
}

/// Projects updater notifications onto the launcher's update widgets and
/// forwards user intent back to the updater.
///
/// The relay never fails: unknown tags, unknown error codes and missing
/// payload fields end up as log lines. It owns at most one periodic
/// update check, started by `ready` and replaced if `ready` arrives again.
pub struct UpdateNotificationRelay {
    config: RelayConfig,
    surface: Arc<dyn UpdateSurface>,
    actions: Arc<dyn UpdateActionSink>,
    scheduler: Arc<dyn Scheduler>,
    log: RelayLogger,
    state: UpdateUiState,
    check_timer: Option<TimerHandle>,
}

impl UpdateNotificationRelay {
    pub fn new(
        config: RelayConfig,
        surface: Arc<dyn UpdateSurface>,
        actions: Arc<dyn UpdateActionSink>,
        scheduler: Arc<dyn Scheduler>,
        log: RelayLogger,
    ) -> Self {
        let state = UpdateUiState::idle(&config.texts);
        Self {
            config,
            surface,
            actions,
            scheduler,
            log,
            state,
            check_timer: None,
        }
    }

    pub fn ui_state(&self) -> &UpdateUiState {
        &self.state
    }

    pub fn has_check_timer(&self) -> bool {
        self.check_timer.is_some()
    }

    pub fn handle_notification(&mut self, notification: &UpdateNotification) {
        self.dispatch(notification.to_status());
    }

    pub fn dispatch(&mut self, status: UpdateStatus) {
        match status {
            UpdateStatus::Checking => self.on_checking(),
            UpdateStatus::Available(info) => self.on_available(info),
            UpdateStatus::Downloaded(info) => self.on_downloaded(info),
            UpdateStatus::NotAvailable => self.on_not_available(),
            UpdateStatus::Ready => self.on_ready(),
            UpdateStatus::Error(info) => self.on_error(&info),
            UpdateStatus::Unknown(tag) => {
                (self.log)(LogLevel::Info, &format!("Unknown update notification: {tag}"));
            }
        }
    }

    fn on_checking(&mut self) {
        (self.log)(LogLevel::Info, "Checking for updates..");
        let label = self.config.texts.checking_for_update_button;
        self.state.set_button(label, false, ButtonClickAction::None);
        self.state.phase = UpdatePhase::Checking;
        self.surface.apply(&self.state);
    }

    fn on_available(&mut self, mut info: UpdateInfo) {
        (self.log)(
            LogLevel::Info,
            &format!(
                "New update available: {}",
                info.version.as_deref().unwrap_or("unknown version")
            ),
        );
        if let Some(version) = info.version.as_deref() {
            info.download_url = Some(derive_download_url(
                &self.config.download_url_template,
                version,
            ));
        }
        self.state.raise_badge();
        self.state.update_info = Some(info);
        self.state.phase = UpdatePhase::AvailableUnactioned;
        self.surface.apply(&self.state);
    }

    fn on_downloaded(&mut self, info: UpdateInfo) {
        (self.log)(
            LogLevel::Info,
            &format!(
                "Update {} ready to be installed.",
                info.version.as_deref().unwrap_or("unknown version")
            ),
        );
        let label = self.config.texts.install_now_button;
        self.state
            .set_button(label, true, ButtonClickAction::InstallUpdateNow);
        self.state.raise_badge();
        self.state.phase = UpdatePhase::ReadyToInstall;
        self.surface.apply(&self.state);
    }

    fn on_not_available(&mut self) {
        (self.log)(LogLevel::Info, "No new update found.");
        let label = self.config.texts.check_for_updates_button;
        self.state.set_button(label, true, ButtonClickAction::None);
        self.state.phase = UpdatePhase::Idle;
        self.surface.apply(&self.state);
    }

    fn on_ready(&mut self) {
        self.actions.send(UpdateAction::CheckForUpdate);

        if let Some(previous) = self.check_timer.take() {
            (self.log)(
                LogLevel::Debug,
                "Updater signalled ready again; replacing periodic update check.",
            );
            previous.cancel();
        }

        let actions = Arc::clone(&self.actions);
        match self.scheduler.schedule_repeating(
            self.config.check_interval,
            Box::new(move || actions.send(UpdateAction::CheckForUpdate)),
        ) {
            Ok(handle) => self.check_timer = Some(handle),
            Err(error) => (self.log)(
                LogLevel::Error,
                &format!("Periodic update check not scheduled: {error}"),
            ),
        }
    }

    fn on_error(&self, info: &UpdateErrorInfo) {
        match info.error_code() {
            Some(UpdateErrorCode::InvalidReleaseFeed) => {
                (self.log)(LogLevel::Info, "No suitable releases found.");
            }
            Some(UpdateErrorCode::MissingReleaseElement) => {
                (self.log)(LogLevel::Info, "No releases found.");
            }
            Some(UpdateErrorCode::Other(code)) => {
                (self.log)(
                    LogLevel::Error,
                    &format!(
                        "Error during update check: {}",
                        info.message.as_deref().unwrap_or("no details")
                    ),
                );
                (self.log)(LogLevel::Debug, &format!("Error code: {code}"));
            }
            None => {
                (self.log)(LogLevel::Debug, "Update error reported without a code.");
            }
        }
    }

    pub fn click_update_button(&self) {
        if !self.state.button.enabled {
            return;
        }

        match self.state.button.on_click {
            ButtonClickAction::None => {}
            ButtonClickAction::InstallUpdateNow if self.config.dev_build => {
                (self.log)(
                    LogLevel::Error,
                    "Cannot install updates in development environment.",
                );
            }
            ButtonClickAction::InstallUpdateNow => {
                self.actions.send(UpdateAction::InstallUpdateNow);
            }
        }
    }

    pub fn click_update_badge(&self) {
        match self.state.badge_click {
            BadgeClickAction::None => {}
            BadgeClickAction::OpenUpdateSettings => self.surface.open_update_settings(),
        }
    }

    pub fn change_allow_prerelease(&self, allow: bool) {
        crate::update_action::change_allow_prerelease(self.actions.as_ref(), allow);
    }

    /// Stops the periodic update check. Called when the window goes away.
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.check_timer.take() {
            timer.cancel();
        }
    }
}

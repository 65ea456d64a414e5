use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use tauri::{AppHandle, Emitter, Listener, Manager};
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::{
    logging::{append_updater_log, LogLevel},
    update_action::{UpdateAction, UPDATE_ACTION_EVENT},
    update_status::{
        UpdateNotification, ERR_INVALID_RELEASE_FEED, ERR_MISSING_RELEASE_ELEMENT, TAG_AVAILABLE,
        TAG_CHECKING, TAG_DOWNLOADED, TAG_NOT_AVAILABLE, TAG_READY, UPDATE_NOTIFICATION_EVENT,
    },
};

const ERR_UPDATE_CHECK_FAILED: &str = "ERR_UPDATER_CHECK_FAILED";
const ERR_UPDATE_DOWNLOAD_FAILED: &str = "ERR_UPDATER_DOWNLOAD_FAILED";

/// Release details announced for the update that is currently held.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReleaseDetails {
    version: String,
    notes: Option<String>,
    date: Option<String>,
}

impl ReleaseDetails {
    fn from_update(update: &Update) -> Self {
        Self {
            version: update.version.clone(),
            notes: update.body.clone(),
            date: update.date.map(|date| date.to_string()),
        }
    }

    fn notification(&self, tag: &str) -> UpdateNotification {
        UpdateNotification::update(
            tag,
            &self.version,
            self.notes.as_deref(),
            self.date.as_deref(),
        )
    }
}

struct DownloadedUpdate {
    update: Update,
    bytes: Vec<u8>,
    details: ReleaseDetails,
}

/// Updater side of the notification channel, backed by
/// `tauri-plugin-updater`.
pub(crate) struct UpdaterBridgeState {
    allow_prerelease: AtomicBool,
    is_checking: AtomicBool,
    downloaded: Mutex<Option<DownloadedUpdate>>,
}

impl Default for UpdaterBridgeState {
    fn default() -> Self {
        Self {
            allow_prerelease: AtomicBool::new(false),
            is_checking: AtomicBool::new(false),
            downloaded: Mutex::new(None),
        }
    }
}

impl UpdaterBridgeState {
    fn pending_release(&self) -> Option<ReleaseDetails> {
        self.downloaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|downloaded| downloaded.details.clone())
    }
}

/// Marks an update check as running until dropped.
struct CheckInFlight<'a>(&'a AtomicBool);

impl<'a> CheckInFlight<'a> {
    fn begin(running: &'a AtomicBool) -> Option<Self> {
        if running.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self(running))
    }
}

impl Drop for CheckInFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum CheckDecision {
    Check,
    ReannounceDownloaded(ReleaseDetails),
}

/// A downloaded update waiting for install is announced again instead of
/// being checked and fetched a second time.
fn decide_update_check(pending: Option<ReleaseDetails>) -> CheckDecision {
    match pending {
        Some(details) => CheckDecision::ReannounceDownloaded(details),
        None => CheckDecision::Check,
    }
}

fn notify(app_handle: &AppHandle, notification: UpdateNotification) {
    if let Err(error) = app_handle.emit(UPDATE_NOTIFICATION_EVENT, &notification) {
        append_updater_log(
            LogLevel::Error,
            &format!(
                "failed to emit update notification {}: {error}",
                notification.tag
            ),
        );
    }
}

fn updater_error_code(error: &tauri_plugin_updater::Error) -> &'static str {
    match error {
        tauri_plugin_updater::Error::ReleaseNotFound => ERR_MISSING_RELEASE_ELEMENT,
        tauri_plugin_updater::Error::TargetNotFound(_) => ERR_INVALID_RELEASE_FEED,
        _ => ERR_UPDATE_CHECK_FAILED,
    }
}

/// Accepts a release newer than the running build. Pre-releases are only
/// accepted after the user opted in.
fn is_acceptable_release(
    current: &semver::Version,
    candidate: &semver::Version,
    allow_prerelease: bool,
) -> bool {
    candidate > current && (allow_prerelease || candidate.pre.is_empty())
}

async fn check_for_update(app_handle: AppHandle) {
    let state = app_handle.state::<UpdaterBridgeState>();
    let Some(_checking) = CheckInFlight::begin(&state.is_checking) else {
        append_updater_log(LogLevel::Debug, "update check already running, skipping");
        return;
    };

    if let CheckDecision::ReannounceDownloaded(details) =
        decide_update_check(state.pending_release())
    {
        append_updater_log(
            LogLevel::Debug,
            &format!("update {} already downloaded, skipping check", details.version),
        );
        notify(&app_handle, details.notification(TAG_DOWNLOADED));
        return;
    }

    notify(&app_handle, UpdateNotification::new(TAG_CHECKING));

    let allow_prerelease = state.allow_prerelease.load(Ordering::Relaxed);
    let updater = match app_handle
        .updater_builder()
        .version_comparator(move |current, release| {
            is_acceptable_release(&current, &release.version, allow_prerelease)
        })
        .build()
    {
        Ok(updater) => updater,
        Err(error) => {
            notify(
                &app_handle,
                UpdateNotification::error(updater_error_code(&error), &error.to_string()),
            );
            return;
        }
    };

    let update = match updater.check().await {
        Ok(Some(update)) => update,
        Ok(None) => {
            notify(&app_handle, UpdateNotification::new(TAG_NOT_AVAILABLE));
            return;
        }
        Err(error) => {
            notify(
                &app_handle,
                UpdateNotification::error(updater_error_code(&error), &error.to_string()),
            );
            return;
        }
    };

    let details = ReleaseDetails::from_update(&update);
    notify(&app_handle, details.notification(TAG_AVAILABLE));

    let bytes = match update.download(|_, _| {}, || {}).await {
        Ok(bytes) => bytes,
        Err(error) => {
            notify(
                &app_handle,
                UpdateNotification::error(ERR_UPDATE_DOWNLOAD_FAILED, &error.to_string()),
            );
            return;
        }
    };

    {
        let mut downloaded = state
            .downloaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *downloaded = Some(DownloadedUpdate {
            update,
            bytes,
            details: details.clone(),
        });
    }
    notify(&app_handle, details.notification(TAG_DOWNLOADED));
}

fn install_downloaded_update(app_handle: &AppHandle) {
    let state = app_handle.state::<UpdaterBridgeState>();
    let downloaded = state
        .downloaded
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
    let Some(DownloadedUpdate { update, bytes, .. }) = downloaded else {
        append_updater_log(LogLevel::Error, "install requested but no update is downloaded");
        return;
    };

    if let Err(error) = update.install(&bytes) {
        append_updater_log(
            LogLevel::Error,
            &format!("failed to install update {}: {error}", update.version),
        );
        return;
    }

    append_updater_log(
        LogLevel::Info,
        &format!("update {} installed; restarting launcher", update.version),
    );
    app_handle.request_restart();
}

fn handle_update_action(app_handle: &AppHandle, action: UpdateAction) {
    match action {
        UpdateAction::AllowPrereleaseChange(allow) => {
            app_handle
                .state::<UpdaterBridgeState>()
                .allow_prerelease
                .store(allow, Ordering::Relaxed);
            append_updater_log(
                LogLevel::Info,
                &format!("prerelease updates {}", if allow { "allowed" } else { "disallowed" }),
            );
        }
        UpdateAction::CheckForUpdate => {
            tauri::async_runtime::spawn(check_for_update(app_handle.clone()));
        }
        UpdateAction::InstallUpdateNow => {
            let install_app = app_handle.clone();
            tauri::async_runtime::spawn(async move {
                install_downloaded_update(&install_app);
            });
        }
    }
}

/// Listens for launcher update actions and announces readiness. Must run
/// after the relay is installed so the `ready` notification is observed.
pub(crate) fn start_updater_bridge(app_handle: &AppHandle) {
    if !app_handle.manage(UpdaterBridgeState::default()) {
        append_updater_log(LogLevel::Debug, "updater bridge already started");
        return;
    }

    let listener_app = app_handle.clone();
    app_handle.listen(UPDATE_ACTION_EVENT, move |event| {
        match serde_json::from_str::<UpdateAction>(event.payload()) {
            Ok(action) => handle_update_action(&listener_app, action),
            Err(error) => append_updater_log(
                LogLevel::Error,
                &format!("malformed update action ignored: {error}"),
            ),
        }
    });

    notify(app_handle, UpdateNotification::new(TAG_READY));
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use semver::Version;
    use serde_json::json;

    use super::{
        decide_update_check, is_acceptable_release, CheckDecision, CheckInFlight, ReleaseDetails,
    };
    use crate::update_status::TAG_DOWNLOADED;

    fn version(raw: &str) -> Version {
        Version::parse(raw).expect("valid version")
    }

    #[test]
    fn is_acceptable_release_requires_newer_version() {
        assert!(is_acceptable_release(&version("1.0.0"), &version("1.0.1"), false));
        assert!(!is_acceptable_release(&version("1.0.1"), &version("1.0.1"), false));
        assert!(!is_acceptable_release(&version("1.2.0"), &version("1.1.9"), true));
    }

    #[test]
    fn is_acceptable_release_gates_prereleases_on_opt_in() {
        assert!(!is_acceptable_release(&version("1.0.0"), &version("2.0.0-beta.1"), false));
        assert!(is_acceptable_release(&version("1.0.0"), &version("2.0.0-beta.1"), true));
    }

    fn details(notes: Option<&str>) -> ReleaseDetails {
        ReleaseDetails {
            version: "2.0.0".to_string(),
            notes: notes.map(str::to_string),
            date: Some("2026-01-01 0:00:00.0 +00:00:00".to_string()),
        }
    }

    #[test]
    fn decide_update_check_reannounces_pending_download() {
        assert_eq!(decide_update_check(None), CheckDecision::Check);

        let pending = details(Some("Fixed crash"));
        let CheckDecision::ReannounceDownloaded(announced) =
            decide_update_check(Some(pending.clone()))
        else {
            panic!("pending download must not be checked again");
        };
        assert_eq!(announced, pending);

        let notification = announced.notification(TAG_DOWNLOADED);
        assert_eq!(notification.tag, TAG_DOWNLOADED);
        assert_eq!(
            notification.info,
            Some(json!({
                "version": "2.0.0",
                "releaseNotes": "Fixed crash",
                "releaseDate": "2026-01-01 0:00:00.0 +00:00:00"
            }))
        );
    }

    #[test]
    fn release_details_omit_missing_notes() {
        let notification = details(None).notification(TAG_DOWNLOADED);
        let info = notification.info.expect("payload present");
        assert!(info.get("releaseNotes").is_none());
        assert_eq!(info["version"], "2.0.0");
    }

    #[test]
    fn check_in_flight_blocks_overlapping_checks() {
        let running = AtomicBool::new(false);
        let first = CheckInFlight::begin(&running).expect("first check starts");
        assert!(CheckInFlight::begin(&running).is_none());
        drop(first);
        assert!(!running.load(Ordering::Acquire));
        assert!(CheckInFlight::begin(&running).is_some());
    }
}

use serde::Serialize;

use crate::{launcher_texts::LauncherTexts, update_status::UpdateInfo};

pub const UPDATE_BADGE_ELEMENT_ID: &str = "image_seal_container";
pub const UPDATE_BUTTON_ELEMENT_ID: &str = "settingsUpdateButton";
pub const UPDATE_SETTINGS_NAV_ELEMENT_ID: &str = "settingsNavUpdate";

/// Button-centric view of the update flow. Only incoming tags move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdatePhase {
    Idle,
    Checking,
    AvailableUnactioned,
    ReadyToInstall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonClickAction {
    None,
    InstallUpdateNow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeClickAction {
    None,
    OpenUpdateSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateButtonState {
    pub label: String,
    pub enabled: bool,
    pub on_click: ButtonClickAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUiState {
    pub phase: UpdatePhase,
    pub button: UpdateButtonState,
    pub badge_visible: bool,
    pub badge_click: BadgeClickAction,
    pub update_info: Option<UpdateInfo>,
}

impl UpdateUiState {
    pub fn idle(texts: &LauncherTexts) -> Self {
        Self {
            phase: UpdatePhase::Idle,
            button: UpdateButtonState {
                label: texts.check_for_updates_button.to_string(),
                enabled: true,
                on_click: ButtonClickAction::None,
            },
            badge_visible: false,
            badge_click: BadgeClickAction::None,
            update_info: None,
        }
    }

    pub(crate) fn set_button(&mut self, label: &str, enabled: bool, on_click: ButtonClickAction) {
        self.button = UpdateButtonState {
            label: label.to_string(),
            enabled,
            on_click,
        };
    }

    pub(crate) fn raise_badge(&mut self) {
        self.badge_visible = true;
        self.badge_click = BadgeClickAction::OpenUpdateSettings;
    }
}

/// Where the relay's UI projection is rendered. Implementations own the
/// real widgets; the relay only pushes snapshots and navigation requests.
pub trait UpdateSurface: Send + Sync {
    fn apply(&self, state: &UpdateUiState);

    /// Switch to the settings view and highlight the update section.
    fn open_update_settings(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher_texts::launcher_texts_for_locale;

    #[test]
    fn idle_state_has_enabled_default_button_and_no_badge() {
        let state = UpdateUiState::idle(&launcher_texts_for_locale("en-US"));
        assert_eq!(state.phase, UpdatePhase::Idle);
        assert_eq!(state.button.label, "Check for Updates");
        assert!(state.button.enabled);
        assert_eq!(state.button.on_click, ButtonClickAction::None);
        assert!(!state.badge_visible);
    }

    #[test]
    fn ui_state_serializes_camel_case_for_the_webview() {
        let mut state = UpdateUiState::idle(&launcher_texts_for_locale("en-US"));
        state.raise_badge();
        let value = serde_json::to_value(&state).expect("serialize state");
        assert_eq!(value["badgeVisible"], true);
        assert_eq!(value["badgeClick"], "openUpdateSettings");
        assert_eq!(value["button"]["onClick"], "none");
        assert_eq!(value["phase"], "idle");
    }
}

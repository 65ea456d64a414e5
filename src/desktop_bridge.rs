use serde_json::json;

use crate::{
    external_links::EXTERNAL_LINK_SELECTOR,
    update_ui::{UPDATE_BADGE_ELEMENT_ID, UPDATE_BUTTON_ELEMENT_ID, UPDATE_SETTINGS_NAV_ELEMENT_ID},
    window_controls::{
        WindowControl, CLOSE_BUTTON_CLASS, MEDIA_LINK_CLASS, MINIMIZE_BUTTON_CLASS,
        RESTORE_BUTTON_CLASS,
    },
};

pub const UPDATE_UI_EVENT: &str = "launcher://update-ui";
pub const OPEN_UPDATE_SETTINGS_EVENT: &str = "launcher://open-update-settings";
/// DOM event the launcher page listens for to switch to the settings view.
pub const OPEN_UPDATE_SETTINGS_DOM_EVENT: &str = "launcher:open-update-settings";

const BRIDGE_TEMPLATE: &str = r#"(function () {
  if (window.__msmpDesktopBridge) {
    return;
  }
  var tauri = window.__TAURI__;
  if (!tauri || !tauri.core || !tauri.event) {
    return;
  }
  window.__msmpDesktopBridge = true;
  var config = __BRIDGE_CONFIG__;
  var invoke = tauri.core.invoke;

  function blurActive() {
    if (document.activeElement && document.activeElement.blur) {
      document.activeElement.blur();
    }
  }

  function applyUpdateUi(state) {
    if (!state) {
      return;
    }
    var badge = document.getElementById(config.badgeId);
    if (badge) {
      if (state.badgeVisible) {
        badge.setAttribute('update', 'true');
      } else {
        badge.removeAttribute('update');
      }
    }
    var button = document.getElementById(config.buttonId);
    if (button) {
      button.textContent = state.button.label;
      button.disabled = !state.button.enabled;
    }
    window.__msmpUpdateInfo = state.updateInfo || null;
  }

  document.addEventListener('click', function (event) {
    var target = event.target;
    if (!(target instanceof Element)) {
      return;
    }
    var anchor = target.closest(config.linkSelector);
    if (anchor) {
      event.preventDefault();
      invoke('launcher_open_external_url', { url: anchor.href });
    }
    Object.keys(config.controls).forEach(function (className) {
      if (target.closest('.' + className)) {
        var control = config.controls[className];
        invoke('launcher_window_control', { control: control });
        if (config.blurControls.indexOf(control) !== -1) {
          blurActive();
        }
      }
    });
    if (target.closest('.' + config.mediaLinkClass)) {
      blurActive();
    }
    if (target.closest('#' + config.badgeId)) {
      invoke('launcher_update_badge_clicked');
    }
    if (target.closest('#' + config.buttonId)) {
      invoke('launcher_update_button_clicked');
    }
  }, true);

  document.addEventListener('keydown', function (event) {
    if (event.ctrlKey && event.shiftKey) {
      invoke('launcher_handle_key_chord', {
        chord: { key: event.key, ctrlKey: event.ctrlKey, shiftKey: event.shiftKey }
      });
    }
  });

  window.changeAllowPrerelease = function (allow) {
    invoke('launcher_change_allow_prerelease', { allow: !!allow });
  };

  tauri.event.listen(config.updateUiEvent, function (event) {
    applyUpdateUi(event.payload);
  });
  tauri.event.listen(config.openSettingsEvent, function () {
    document.dispatchEvent(new CustomEvent(config.openSettingsDomEvent, {
      detail: { navItemId: config.settingsNavId }
    }));
  });
  invoke('launcher_get_update_ui_state').then(applyUpdateUi);
})();"#;

fn control_name(control: WindowControl) -> Result<String, String> {
    serde_json::to_value(control)
        .map_err(|error| format!("Failed to serialize window control: {error}"))?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "Window control did not serialize to a string.".to_string())
}

pub fn build_desktop_bridge_script() -> Result<String, String> {
    let mut controls = serde_json::Map::new();
    for class_name in [CLOSE_BUTTON_CLASS, RESTORE_BUTTON_CLASS, MINIMIZE_BUTTON_CLASS] {
        if let Some(control) = WindowControl::from_button_class(class_name) {
            controls.insert(class_name.to_string(), control_name(control)?.into());
        }
    }
    let blur_controls = [WindowControl::Minimize, WindowControl::ToggleMaximize]
        .into_iter()
        .filter(|control| control.blurs_active_element())
        .map(control_name)
        .collect::<Result<Vec<_>, _>>()?;

    let config = json!({
        "controls": controls,
        "blurControls": blur_controls,
        "mediaLinkClass": MEDIA_LINK_CLASS,
        "linkSelector": EXTERNAL_LINK_SELECTOR,
        "badgeId": UPDATE_BADGE_ELEMENT_ID,
        "buttonId": UPDATE_BUTTON_ELEMENT_ID,
        "settingsNavId": UPDATE_SETTINGS_NAV_ELEMENT_ID,
        "updateUiEvent": UPDATE_UI_EVENT,
        "openSettingsEvent": OPEN_UPDATE_SETTINGS_EVENT,
        "openSettingsDomEvent": OPEN_UPDATE_SETTINGS_DOM_EVENT,
    });
    Ok(BRIDGE_TEMPLATE.replace("__BRIDGE_CONFIG__", &config.to_string()))
}

#[cfg(feature = "desktop")]
pub fn inject_desktop_bridge<F>(webview: &tauri::Webview, log: F)
where
    F: Fn(&str),
{
    let script = match build_desktop_bridge_script() {
        Ok(script) => script,
        Err(error) => {
            log(&format!("desktop bridge script unavailable: {error}"));
            return;
        }
    };
    if let Err(error) = webview.eval(&script) {
        log(&format!("failed to inject desktop bridge: {error}"));
    }
}

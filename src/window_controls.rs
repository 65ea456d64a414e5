use serde::{Deserialize, Serialize};

pub const CLOSE_BUTTON_CLASS: &str = "fCb";
pub const RESTORE_BUTTON_CLASS: &str = "fRb";
pub const MINIMIZE_BUTTON_CLASS: &str = "fMb";
pub const MEDIA_LINK_CLASS: &str = "mediaURL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowControl {
    Close,
    Minimize,
    ToggleMaximize,
    ToggleDevtools,
}

impl WindowControl {
    pub fn from_button_class(class_name: &str) -> Option<Self> {
        match class_name {
            CLOSE_BUTTON_CLASS => Some(Self::Close),
            RESTORE_BUTTON_CLASS => Some(Self::ToggleMaximize),
            MINIMIZE_BUTTON_CLASS => Some(Self::Minimize),
            _ => None,
        }
    }

    /// Whether the clicked button should give up focus afterwards, so the
    /// title bar does not keep a focus ring.
    pub fn blurs_active_element(self) -> bool {
        matches!(self, Self::Minimize | Self::ToggleMaximize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyChord {
    pub key: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
}

/// Ctrl+Shift+I, in either letter case.
pub fn is_devtools_shortcut(chord: &KeyChord) -> bool {
    chord.ctrl_key && chord.shift_key && matches!(chord.key.as_str(), "I" | "i")
}

pub trait LauncherWindow {
    fn close(&self) -> Result<(), String>;
    fn minimize(&self) -> Result<(), String>;
    fn maximize(&self) -> Result<(), String>;
    fn unmaximize(&self) -> Result<(), String>;
    fn is_maximized(&self) -> Result<bool, String>;
    fn is_devtools_open(&self) -> bool;
    fn open_devtools(&self);
    fn close_devtools(&self);
}

pub fn apply_window_control<W>(window: &W, control: WindowControl) -> Result<(), String>
where
    W: LauncherWindow + ?Sized,
{
    match control {
        WindowControl::Close => window.close(),
        WindowControl::Minimize => window.minimize(),
        WindowControl::ToggleMaximize => {
            if window.is_maximized()? {
                window.unmaximize()
            } else {
                window.maximize()
            }
        }
        WindowControl::ToggleDevtools => {
            if window.is_devtools_open() {
                window.close_devtools();
            } else {
                window.open_devtools();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct FakeWindow {
        calls: RefCell<Vec<&'static str>>,
        maximized: Cell<bool>,
        devtools_open: Cell<bool>,
        fail_maximize_query: bool,
    }

    impl LauncherWindow for FakeWindow {
        fn close(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("close");
            Ok(())
        }

        fn minimize(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("minimize");
            Ok(())
        }

        fn maximize(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("maximize");
            self.maximized.set(true);
            Ok(())
        }

        fn unmaximize(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("unmaximize");
            self.maximized.set(false);
            Ok(())
        }

        fn is_maximized(&self) -> Result<bool, String> {
            if self.fail_maximize_query {
                return Err("window is gone".to_string());
            }
            Ok(self.maximized.get())
        }

        fn is_devtools_open(&self) -> bool {
            self.devtools_open.get()
        }

        fn open_devtools(&self) {
            self.calls.borrow_mut().push("open_devtools");
            self.devtools_open.set(true);
        }

        fn close_devtools(&self) {
            self.calls.borrow_mut().push("close_devtools");
            self.devtools_open.set(false);
        }
    }

    #[test]
    fn from_button_class_maps_title_bar_buttons() {
        assert_eq!(
            WindowControl::from_button_class(CLOSE_BUTTON_CLASS),
            Some(WindowControl::Close)
        );
        assert_eq!(
            WindowControl::from_button_class(RESTORE_BUTTON_CLASS),
            Some(WindowControl::ToggleMaximize)
        );
        assert_eq!(
            WindowControl::from_button_class(MINIMIZE_BUTTON_CLASS),
            Some(WindowControl::Minimize)
        );
        assert_eq!(WindowControl::from_button_class(MEDIA_LINK_CLASS), None);
    }

    #[test]
    fn toggle_maximize_alternates_between_states() {
        let window = FakeWindow::default();
        apply_window_control(&window, WindowControl::ToggleMaximize).expect("maximize");
        apply_window_control(&window, WindowControl::ToggleMaximize).expect("restore");
        assert_eq!(*window.calls.borrow(), vec!["maximize", "unmaximize"]);
    }

    #[test]
    fn toggle_maximize_propagates_query_errors() {
        let window = FakeWindow {
            fail_maximize_query: true,
            ..FakeWindow::default()
        };
        let result = apply_window_control(&window, WindowControl::ToggleMaximize);
        assert_eq!(result, Err("window is gone".to_string()));
        assert!(window.calls.borrow().is_empty());
    }

    #[test]
    fn toggle_devtools_opens_then_closes() {
        let window = FakeWindow::default();
        apply_window_control(&window, WindowControl::ToggleDevtools).expect("open");
        apply_window_control(&window, WindowControl::ToggleDevtools).expect("close");
        assert_eq!(*window.calls.borrow(), vec!["open_devtools", "close_devtools"]);
    }

    #[test]
    fn only_minimize_and_restore_blur_focus() {
        assert!(WindowControl::Minimize.blurs_active_element());
        assert!(WindowControl::ToggleMaximize.blurs_active_element());
        assert!(!WindowControl::Close.blurs_active_element());
    }

    #[test]
    fn devtools_shortcut_requires_ctrl_and_shift() {
        let chord = |key: &str, ctrl_key: bool, shift_key: bool| KeyChord {
            key: key.to_string(),
            ctrl_key,
            shift_key,
        };
        assert!(is_devtools_shortcut(&chord("I", true, true)));
        assert!(is_devtools_shortcut(&chord("i", true, true)));
        assert!(!is_devtools_shortcut(&chord("I", true, false)));
        assert!(!is_devtools_shortcut(&chord("J", true, true)));
    }

    #[test]
    fn key_chord_deserializes_from_keyboard_event_fields() {
        let chord: KeyChord =
            serde_json::from_str(r#"{"key":"I","ctrlKey":true,"shiftKey":true}"#)
                .expect("parse chord");
        assert!(is_devtools_shortcut(&chord));
    }
}

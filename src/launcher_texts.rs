pub const DEFAULT_LAUNCHER_LOCALE: &str = "en-US";
pub const LAUNCHER_LOCALE_ENV: &str = "MSMP_LAUNCHER_LOCALE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherTexts {
    pub checking_for_update_button: &'static str,
    pub install_now_button: &'static str,
    pub check_for_updates_button: &'static str,
}

pub fn launcher_texts_for_locale(locale: &str) -> LauncherTexts {
    if locale == "pt-BR" {
        return LauncherTexts {
            checking_for_update_button: "Verificando atualizações..",
            install_now_button: "Instalar agora",
            check_for_updates_button: "Verificar atualizações",
        };
    }

    LauncherTexts {
        checking_for_update_button: "Checking for Updates..",
        install_now_button: "Install Now",
        check_for_updates_button: "Check for Updates",
    }
}

pub fn resolve_launcher_locale<F>(default_locale: &'static str, lookup: F) -> &'static str
where
    F: Fn(&str) -> Option<String>,
{
    for env_key in [LAUNCHER_LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Some(value) = lookup(env_key) {
            if let Some(locale) = normalize_launcher_locale(&value) {
                return locale;
            }
        }
    }

    default_locale
}

pub(crate) fn normalize_launcher_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("pt") {
        return Some("pt-BR");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_texts_for_locale_returns_portuguese_copy() {
        let texts = launcher_texts_for_locale("pt-BR");
        assert_eq!(texts.install_now_button, "Instalar agora");
    }

    #[test]
    fn launcher_texts_for_locale_falls_back_to_english_copy() {
        let texts = launcher_texts_for_locale("fr-FR");
        assert_eq!(texts.check_for_updates_button, "Check for Updates");
        assert_eq!(texts.checking_for_update_button, "Checking for Updates..");
    }

    #[test]
    fn normalize_launcher_locale_accepts_language_prefixes() {
        assert_eq!(normalize_launcher_locale("EN_gb"), Some("en-US"));
        assert_eq!(normalize_launcher_locale("pt_PT.UTF-8"), Some("pt-BR"));
        assert_eq!(normalize_launcher_locale("C"), None);
        assert_eq!(normalize_launcher_locale("  "), None);
    }

    #[test]
    fn resolve_launcher_locale_prefers_explicit_override() {
        let locale = resolve_launcher_locale(DEFAULT_LAUNCHER_LOCALE, |key| match key {
            LAUNCHER_LOCALE_ENV => Some("pt-BR".to_string()),
            "LANG" => Some("en_US.UTF-8".to_string()),
            _ => None,
        });
        assert_eq!(locale, "pt-BR");
    }

    #[test]
    fn resolve_launcher_locale_skips_unsupported_values() {
        let locale = resolve_launcher_locale(DEFAULT_LAUNCHER_LOCALE, |key| match key {
            "LC_ALL" => Some("C".to_string()),
            "LANG" => Some("pt_BR.UTF-8".to_string()),
            _ => None,
        });
        assert_eq!(locale, "pt-BR");
    }
}

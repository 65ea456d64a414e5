use std::{env, path::PathBuf, time::Duration};

use crate::launcher_texts;

pub const DEV_MODE_ENV: &str = "MSMP_LAUNCHER_DEV";
pub const UPDATE_CHECK_INTERVAL_ENV: &str = "MSMP_UPDATE_CHECK_INTERVAL_MS";
pub const LOG_DIR_ENV: &str = "MSMP_LAUNCHER_LOG_DIR";
pub const DEFAULT_UPDATE_CHECK_INTERVAL_MS: u64 = 1_800_000;
pub const UPDATE_CHECK_INTERVAL_MIN_MS: u64 = 60_000;
pub const UPDATE_CHECK_INTERVAL_MAX_MS: u64 = 24 * 60 * 60 * 1000;
const DEFAULT_LOG_DIR_NAME: &str = ".msmp-launcher";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub dev_build: bool,
    pub update_check_interval: Duration,
    pub locale: &'static str,
}

impl LauncherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dev_build = lookup(DEV_MODE_ENV)
            .as_deref()
            .and_then(parse_truthy)
            .unwrap_or(cfg!(debug_assertions));
        let update_check_interval =
            parse_update_check_interval(lookup(UPDATE_CHECK_INTERVAL_ENV).as_deref());
        let locale = launcher_texts::resolve_launcher_locale(
            launcher_texts::DEFAULT_LAUNCHER_LOCALE,
            &lookup,
        );

        Self {
            dev_build,
            update_check_interval,
            locale,
        }
    }
}

pub(crate) fn parse_truthy(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_update_check_interval(raw: Option<&str>) -> Duration {
    let millis = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(|value| value.clamp(UPDATE_CHECK_INTERVAL_MIN_MS, UPDATE_CHECK_INTERVAL_MAX_MS))
        .unwrap_or(DEFAULT_UPDATE_CHECK_INTERVAL_MS);
    Duration::from_millis(millis)
}

pub fn resolve_log_dir() -> Option<PathBuf> {
    if let Ok(raw) = env::var(LOG_DIR_ENV) {
        let path = PathBuf::from(raw.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home::home_dir().map(|home| home.join(DEFAULT_LOG_DIR_NAME).join("logs"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> LauncherConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        LauncherConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn from_lookup_uses_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.dev_build, cfg!(debug_assertions));
        assert_eq!(
            config.update_check_interval,
            Duration::from_millis(1_800_000)
        );
        assert_eq!(config.locale, "en-US");
    }

    #[test]
    fn from_lookup_reads_dev_flag_and_locale() {
        let config = config_from(&[(DEV_MODE_ENV, "off"), ("LANG", "pt_BR.UTF-8")]);
        assert!(!config.dev_build);
        assert_eq!(config.locale, "pt-BR");

        let config = config_from(&[(DEV_MODE_ENV, " TRUE ")]);
        assert!(config.dev_build);
    }

    #[test]
    fn parse_update_check_interval_clamps_out_of_range_values() {
        assert_eq!(
            parse_update_check_interval(Some("10")),
            Duration::from_millis(UPDATE_CHECK_INTERVAL_MIN_MS)
        );
        assert_eq!(
            parse_update_check_interval(Some("999999999999")),
            Duration::from_millis(UPDATE_CHECK_INTERVAL_MAX_MS)
        );
        assert_eq!(
            parse_update_check_interval(Some("120000")),
            Duration::from_millis(120_000)
        );
    }

    #[test]
    fn parse_update_check_interval_falls_back_on_garbage() {
        assert_eq!(
            parse_update_check_interval(Some("soon")),
            Duration::from_millis(DEFAULT_UPDATE_CHECK_INTERVAL_MS)
        );
        assert_eq!(
            parse_update_check_interval(None),
            Duration::from_millis(DEFAULT_UPDATE_CHECK_INTERVAL_MS)
        );
    }

    #[test]
    fn parse_truthy_rejects_unknown_words() {
        assert_eq!(parse_truthy("maybe"), None);
        assert_eq!(parse_truthy("0"), Some(false));
    }
}

/// Release asset URL for the Windows installer. `{version}` is replaced
/// with the version reported by the updater, without a leading `v`.
pub const DOWNLOAD_URL_TEMPLATE: &str =
    "https://github.com/yOstrix/MSMP/releases/v{version}/MSMP_Launcher-setup.exe";

const VERSION_PLACEHOLDER: &str = "{version}";

pub fn derive_download_url(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_download_url_substitutes_version() {
        assert_eq!(
            derive_download_url(DOWNLOAD_URL_TEMPLATE, "1.2.3"),
            "https://github.com/yOstrix/MSMP/releases/v1.2.3/MSMP_Launcher-setup.exe"
        );
    }

    #[test]
    fn derive_download_url_keeps_prerelease_suffix() {
        assert_eq!(
            derive_download_url(DOWNLOAD_URL_TEMPLATE, "2.0.0-beta.1"),
            "https://github.com/yOstrix/MSMP/releases/v2.0.0-beta.1/MSMP_Launcher-setup.exe"
        );
    }
}

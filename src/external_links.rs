use std::process::{Command, Stdio};

use url::Url;

/// CSS selector for anchors the launcher hands to the system browser.
pub const EXTERNAL_LINK_SELECTOR: &str = "a[href^=\"http\"]";

const BROWSER_SCHEMES: [&str; 2] = ["http", "https"];

/// Validates a link clicked in the launcher page. Only web links leave the
/// launcher.
pub fn parse_external_link(href: &str) -> Result<Url, String> {
    let href = href.trim();
    if href.is_empty() {
        return Err("No link to open.".to_string());
    }

    let link = Url::parse(href).map_err(|error| format!("Cannot open link '{href}': {error}"))?;
    if !BROWSER_SCHEMES.contains(&link.scheme()) {
        return Err(format!(
            "Refusing to open '{}' link in the system browser.",
            link.scheme()
        ));
    }
    Ok(link)
}

fn spawn_detached(program: &str, args: &[&str]) -> Result<(), String> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run '{program}': {error}"))
}

#[cfg(target_os = "macos")]
fn open_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached("open", &[url])
}

#[cfg(target_os = "windows")]
fn open_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached("rundll32", &["url.dll,FileProtocolHandler", url])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached("xdg-open", &[url])
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

pub fn open_external_link(raw_url: &str) -> Result<(), String> {
    let parsed = parse_external_link(raw_url)?;
    open_with_system_browser(parsed.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_link_selector_matches_web_anchors() {
        assert_eq!(EXTERNAL_LINK_SELECTOR, r#"a[href^="http"]"#);
        assert!(BROWSER_SCHEMES.iter().all(|scheme| scheme.starts_with("http")));
    }

    #[test]
    fn parse_external_link_accepts_http_and_https() {
        let parsed = parse_external_link("  https://github.com/yOstrix/MSMP  ").expect("parse url");
        assert_eq!(parsed.as_str(), "https://github.com/yOstrix/MSMP");
        assert!(parse_external_link("http://example.com/a?b=c").is_ok());
    }

    #[test]
    fn parse_external_link_rejects_other_schemes() {
        let error = parse_external_link("javascript:alert(1)").expect_err("scheme rejected");
        assert!(error.contains("'javascript'"));
        assert!(parse_external_link("httpfoo").is_err());
    }

    #[test]
    fn parse_external_link_rejects_blank_input() {
        assert_eq!(
            parse_external_link("   "),
            Err("No link to open.".to_string())
        );
    }

    #[test]
    fn open_external_link_validates_before_spawning() {
        assert!(open_external_link("ftp://example.com").is_err());
    }
}

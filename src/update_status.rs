use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UPDATE_NOTIFICATION_EVENT: &str = "autoUpdateNotification";

pub const TAG_CHECKING: &str = "checking-for-update";
pub const TAG_AVAILABLE: &str = "update-available";
pub const TAG_DOWNLOADED: &str = "update-downloaded";
pub const TAG_NOT_AVAILABLE: &str = "update-not-available";
pub const TAG_READY: &str = "ready";
pub const TAG_ERROR: &str = "realerror";

pub const ERR_INVALID_RELEASE_FEED: &str = "ERR_UPDATER_INVALID_RELEASE_FEED";
pub const ERR_MISSING_RELEASE_ELEMENT: &str = "ERR_XML_MISSED_ELEMENT";

/// Update details carried by `update-available` and `update-downloaded`.
/// Every field is optional; `download_url` is filled in by the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub version: Option<String>,
    #[serde(rename = "downloadURL")]
    pub download_url: Option<String>,
    pub release_name: Option<String>,
    pub release_notes: Option<String>,
    pub release_date: Option<String>,
}

impl UpdateInfo {
    fn from_payload(payload: Option<&Value>) -> Self {
        Self {
            version: string_field(payload, "version"),
            download_url: None,
            release_name: string_field(payload, "releaseName"),
            release_notes: string_field(payload, "releaseNotes"),
            release_date: string_field(payload, "releaseDate"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateErrorInfo {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl UpdateErrorInfo {
    fn from_payload(payload: Option<&Value>) -> Self {
        Self {
            code: string_field(payload, "code"),
            message: string_field(payload, "message"),
        }
    }

    pub fn error_code(&self) -> Option<UpdateErrorCode> {
        self.code.as_deref().map(UpdateErrorCode::from_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateErrorCode {
    /// The feed exists but holds no release usable by this platform.
    InvalidReleaseFeed,
    /// The feed holds no release at all.
    MissingReleaseElement,
    Other(String),
}

impl UpdateErrorCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            ERR_INVALID_RELEASE_FEED => Self::InvalidReleaseFeed,
            ERR_MISSING_RELEASE_ELEMENT => Self::MissingReleaseElement,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Checking,
    Available(UpdateInfo),
    Downloaded(UpdateInfo),
    NotAvailable,
    Ready,
    Error(UpdateErrorInfo),
    Unknown(String),
}

impl UpdateStatus {
    /// Maps a wire tag and its optional payload to a status. Both the
    /// updater's long tags and the short forms are accepted; anything else
    /// becomes `Unknown`.
    pub fn from_tag(tag: &str, payload: Option<&Value>) -> Self {
        match tag {
            TAG_CHECKING | "checking" => Self::Checking,
            TAG_AVAILABLE | "available" => Self::Available(UpdateInfo::from_payload(payload)),
            TAG_DOWNLOADED | "downloaded" => Self::Downloaded(UpdateInfo::from_payload(payload)),
            TAG_NOT_AVAILABLE | "not-available" => Self::NotAvailable,
            TAG_READY => Self::Ready,
            TAG_ERROR | "error" => Self::Error(UpdateErrorInfo::from_payload(payload)),
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Payload of the `autoUpdateNotification` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNotification {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
}

impl UpdateNotification {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            info: None,
        }
    }

    pub fn with_info(tag: &str, info: Value) -> Self {
        Self {
            tag: tag.to_string(),
            info: Some(info),
        }
    }

    /// Builds an `update-available` / `update-downloaded` notification.
    /// Absent details are left out of the payload.
    pub fn update(
        tag: &str,
        version: &str,
        release_notes: Option<&str>,
        release_date: Option<&str>,
    ) -> Self {
        let mut info = Map::new();
        info.insert("version".to_string(), Value::String(version.to_string()));
        if let Some(notes) = release_notes {
            info.insert("releaseNotes".to_string(), Value::String(notes.to_string()));
        }
        if let Some(date) = release_date {
            info.insert("releaseDate".to_string(), Value::String(date.to_string()));
        }
        Self::with_info(tag, Value::Object(info))
    }

    pub fn error(code: &str, message: &str) -> Self {
        let mut info = Map::new();
        info.insert("code".to_string(), Value::String(code.to_string()));
        info.insert("message".to_string(), Value::String(message.to_string()));
        Self::with_info(TAG_ERROR, Value::Object(info))
    }

    pub fn to_status(&self) -> UpdateStatus {
        UpdateStatus::from_tag(&self.tag, self.info.as_ref())
    }
}

fn string_field(payload: Option<&Value>, key: &str) -> Option<String> {
    payload?.get(key)?.as_str().map(str::to_string)
}

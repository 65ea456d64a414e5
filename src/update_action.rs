use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

pub const UPDATE_ACTION_EVENT: &str = "autoUpdateAction";

/// Requests sent from the launcher window to the updater. Serialized as
/// `{"action": "...", "value": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum UpdateAction {
    AllowPrereleaseChange(bool),
    CheckForUpdate,
    InstallUpdateNow,
}

/// Fire-and-forget outbound channel to the updater.
pub trait UpdateActionSink: Send + Sync {
    fn send(&self, action: UpdateAction);
}

impl UpdateActionSink for Sender<UpdateAction> {
    fn send(&self, action: UpdateAction) {
        // The updater side may already be gone during shutdown.
        let _ = Sender::send(self, action);
    }
}

/// Sends the prerelease opt-in flag upstream. No local state is kept and
/// no reply is awaited.
pub fn change_allow_prerelease(sink: &dyn UpdateActionSink, allow: bool) {
    sink.send(UpdateAction::AllowPrereleaseChange(allow));
}

use crate::Model;

/// Keys in the persisted key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    VerificationFlag,
    SavedPrompt,
}

impl StorageKey {
    /// Name of the entry as written to the store.
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageKey::VerificationFlag => "hasVerifiedAccount",
            StorageKey::SavedPrompt => "savedProductDescription",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStyle {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub style: NotificationStyle,
    pub title: String,
    pub detail: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Success,
            title: title.into(),
            detail: None,
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Failure,
            title: title.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadValue { key: StorageKey },
    StoreValue { key: StorageKey, value: String },
    RequestLink { prompt: String, model: Model },
    CopyToClipboard { text: String },
    OpenUrl { url: String },
    Notify(Notification),
}

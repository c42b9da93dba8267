use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("failed to copy to clipboard: {0}")]
    Copy(String),
    #[error("failed to open {url}: {source}")]
    Open {
        url: String,
        source: std::io::Error,
    },
}

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), DesktopError>;
}

pub trait UrlOpener {
    /// Hands `url` to the user's default handler.
    fn open(&self, url: &str) -> Result<(), DesktopError>;
}

/// System clipboard. The handle is created on first use and kept alive, since
/// on X11/Wayland the copied text disappears with the owning handle.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), DesktopError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| DesktopError::ClipboardUnavailable(e.to_string()))?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_string())
            .map_err(|e| DesktopError::Copy(e.to_string()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), DesktopError> {
        open::that(url).map_err(|source| DesktopError::Open {
            url: url.to_string(),
            source,
        })
    }
}

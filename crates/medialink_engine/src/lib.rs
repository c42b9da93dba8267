//! Medialink engine: collaborators behind the state machine's effects.
mod desktop;
mod engine;
mod inference;
mod store;
mod types;

pub use desktop::{Clipboard, DesktopError, SystemClipboard, SystemOpener, UrlOpener};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use inference::{ChatCompletionsClient, InferenceClient, InferenceSettings};
pub use store::{
    ensure_data_dir, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StoreError,
};
pub use types::{EngineError, EngineEvent, InferenceError, InferenceFailureKind};

//! Medialink core: pure state machine and view-model helpers.
mod effect;
mod extract;
mod msg;
mod prompt;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notification, NotificationStyle, StorageKey};
pub use extract::extract_first_url;
pub use msg::{Msg, ServiceFailure};
pub use prompt::{compose_prompt, Model, INSTRUCTIONS};
pub use state::{
    AppState, FormInputs, Generator, Phase, Screen, SIGN_UP_URL, VERIFIED_SENTINEL,
};
pub use update::{
    update, EMPTY_PROMOTION_WARNING, GENERIC_ERROR_TITLE, LINK_COPIED_TITLE, NO_LINK_TITLE,
    UNKNOWN_ERROR_DETAIL,
};
pub use view_model::{AppViewModel, ScreenKind};

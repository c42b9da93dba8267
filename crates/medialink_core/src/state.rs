use crate::view_model::{AppViewModel, ScreenKind};

/// Stored value meaning the user has acknowledged the account requirement.
pub const VERIFIED_SENTINEL: &str = "true";

pub const SIGN_UP_URL: &str =
    "https://app.medialister.com/sign-up/?utm_source=raycast&utm_medium=extension&utm_campaign=referral";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    screen: Screen,
    dirty: bool,
}

/// Top-level screen. The gate moves `Loading` to exactly one of the other two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Loading,
    NeedsVerification,
    Ready(Generator),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInputs {
    pub promotion: String,
    pub targeting: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Saved promotion text is still being read.
    #[default]
    Initializing,
    Editing,
    Submitting,
    Result { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Generator {
    pub(crate) phase: Phase,
    pub(crate) form: FormInputs,
}

impl Generator {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn form(&self) -> &FormInputs {
        &self.form
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Current phase of the generator, `None` until the gate has been passed.
    pub fn phase(&self) -> Option<&Phase> {
        match &self.screen {
            Screen::Ready(generator) => Some(&generator.phase),
            Screen::Loading | Screen::NeedsVerification => None,
        }
    }

    pub fn form(&self) -> Option<&FormInputs> {
        match &self.screen {
            Screen::Ready(generator) => Some(&generator.form),
            Screen::Loading | Screen::NeedsVerification => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let mut view = AppViewModel {
            dirty: self.dirty,
            ..AppViewModel::default()
        };
        match &self.screen {
            Screen::Loading => {
                view.screen = ScreenKind::Loading;
                view.is_loading = true;
            }
            Screen::NeedsVerification => {
                view.screen = ScreenKind::NeedsVerification;
            }
            Screen::Ready(generator) => {
                view.promotion = generator.form.promotion.clone();
                view.targeting = generator.form.targeting.clone();
                match &generator.phase {
                    Phase::Initializing => {
                        view.screen = ScreenKind::Form;
                        view.is_loading = true;
                        view.form_enabled = true;
                    }
                    Phase::Editing => {
                        view.screen = ScreenKind::Form;
                        view.form_enabled = true;
                        view.can_submit = true;
                    }
                    Phase::Submitting => {
                        view.screen = ScreenKind::Form;
                        view.is_loading = true;
                    }
                    Phase::Result { url } => {
                        view.screen = ScreenKind::Result;
                        view.result_url = Some(url.clone());
                    }
                }
            }
        }
        view
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub(crate) fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

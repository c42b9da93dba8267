use crate::state::Generator;
use crate::{
    compose_prompt, extract_first_url, AppState, Effect, Model, Msg, Notification, Phase, Screen,
    StorageKey, SIGN_UP_URL, VERIFIED_SENTINEL,
};

pub const EMPTY_PROMOTION_WARNING: &str =
    "Please provide details on what you would like to promote";
pub const LINK_COPIED_TITLE: &str = "A link has been copied to the clipboard";
pub const NO_LINK_TITLE: &str = "No link was generated by some reason. Try again.";
pub const GENERIC_ERROR_TITLE: &str = "An error occurred";
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not belong to the current screen or phase are ignored and
/// produce no effects. This is what keeps stale engine results (a late
/// `LinkResponse`, a second `VerificationLoaded`) from disturbing the flow.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => match state.screen() {
            Screen::Loading => vec![Effect::LoadValue {
                key: StorageKey::VerificationFlag,
            }],
            Screen::NeedsVerification | Screen::Ready(_) => Vec::new(),
        },
        Msg::VerificationLoaded(value) => {
            if *state.screen() != Screen::Loading {
                return (state, Vec::new());
            }
            if value.as_deref() == Some(VERIFIED_SENTINEL) {
                enter_generator(&mut state)
            } else {
                state.set_screen(Screen::NeedsVerification);
                Vec::new()
            }
        }
        Msg::ProceedClicked => {
            if *state.screen() != Screen::NeedsVerification {
                return (state, Vec::new());
            }
            let mut effects = vec![Effect::StoreValue {
                key: StorageKey::VerificationFlag,
                value: VERIFIED_SENTINEL.to_string(),
            }];
            effects.extend(enter_generator(&mut state));
            effects
        }
        Msg::SignUpClicked => match state.screen() {
            // Leaves the verification flag untouched.
            Screen::NeedsVerification => vec![Effect::OpenUrl {
                url: SIGN_UP_URL.to_string(),
            }],
            Screen::Loading | Screen::Ready(_) => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
        other => {
            let (changed, effects) = match state.screen_mut() {
                Screen::Ready(generator) => update_generator(generator, other),
                Screen::Loading | Screen::NeedsVerification => (false, Vec::new()),
            };
            if changed {
                state.mark_dirty();
            }
            effects
        }
    };

    (state, effects)
}

fn enter_generator(state: &mut AppState) -> Vec<Effect> {
    state.set_screen(Screen::Ready(Generator::default()));
    vec![Effect::LoadValue {
        key: StorageKey::SavedPrompt,
    }]
}

/// Returns whether the generator changed, plus the effects to run.
fn update_generator(generator: &mut Generator, msg: Msg) -> (bool, Vec<Effect>) {
    match msg {
        Msg::SavedPromptLoaded(saved) => {
            if generator.phase != Phase::Initializing {
                return (false, Vec::new());
            }
            // Text typed while the read was outstanding wins over the saved value.
            if let Some(text) = saved.filter(|text| !text.is_empty()) {
                if generator.form.promotion.is_empty() {
                    generator.form.promotion = text;
                }
            }
            generator.phase = Phase::Editing;
            (true, Vec::new())
        }
        Msg::PromotionEdited(text) => {
            if !accepts_edits(&generator.phase) {
                return (false, Vec::new());
            }
            let effects = if text.is_empty() {
                Vec::new()
            } else {
                vec![Effect::StoreValue {
                    key: StorageKey::SavedPrompt,
                    value: text.clone(),
                }]
            };
            generator.form.promotion = text;
            (true, effects)
        }
        Msg::TargetingEdited(text) => {
            if !accepts_edits(&generator.phase) {
                return (false, Vec::new());
            }
            generator.form.targeting = text;
            (true, Vec::new())
        }
        Msg::SubmitClicked => {
            if generator.phase != Phase::Editing {
                return (false, Vec::new());
            }
            if generator.form.promotion.is_empty() {
                return (
                    false,
                    vec![Effect::Notify(Notification::failure(
                        EMPTY_PROMOTION_WARNING,
                    ))],
                );
            }
            generator.phase = Phase::Submitting;
            let prompt = compose_prompt(&generator.form.promotion, &generator.form.targeting);
            (
                true,
                vec![Effect::RequestLink {
                    prompt,
                    model: Model::Gpt4oMini,
                }],
            )
        }
        Msg::LinkResponse(result) => {
            if generator.phase != Phase::Submitting {
                return (false, Vec::new());
            }
            let effects = match result {
                Ok(text) => match extract_first_url(&text) {
                    Some(url) => {
                        let url = url.to_string();
                        generator.phase = Phase::Result { url: url.clone() };
                        vec![
                            Effect::CopyToClipboard { text: url.clone() },
                            Effect::Notify(Notification::success(LINK_COPIED_TITLE)),
                            Effect::OpenUrl { url },
                        ]
                    }
                    None => {
                        generator.phase = Phase::Editing;
                        vec![Effect::Notify(Notification::failure(NO_LINK_TITLE))]
                    }
                },
                Err(failure) => {
                    generator.phase = Phase::Editing;
                    let detail = failure
                        .message
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string());
                    vec![Effect::Notify(
                        Notification::failure(GENERIC_ERROR_TITLE).with_detail(detail),
                    )]
                }
            };
            (true, effects)
        }
        Msg::RegenerateClicked => {
            if !matches!(generator.phase, Phase::Result { .. }) {
                return (false, Vec::new());
            }
            generator.phase = Phase::Editing;
            (true, Vec::new())
        }
        Msg::Started
        | Msg::VerificationLoaded(_)
        | Msg::ProceedClicked
        | Msg::SignUpClicked
        | Msg::NoOp => (false, Vec::new()),
    }
}

fn accepts_edits(phase: &Phase) -> bool {
    matches!(phase, Phase::Initializing | Phase::Editing)
}

use medialink_core::{
    compose_prompt, update, AppState, Effect, FormInputs, Model, Msg, Notification,
    NotificationStyle, Phase, ScreenKind, ServiceFailure, StorageKey, EMPTY_PROMOTION_WARNING,
    GENERIC_ERROR_TITLE, LINK_COPIED_TITLE, NO_LINK_TITLE, UNKNOWN_ERROR_DETAIL,
    VERIFIED_SENTINEL,
};
use pretty_assertions::assert_eq;

/// Verified user with the saved-input read resolved.
fn editing(saved: Option<&str>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::VerificationLoaded(Some(VERIFIED_SENTINEL.to_string())),
    );
    let (state, _) = update(state, Msg::SavedPromptLoaded(saved.map(ToOwned::to_owned)));
    assert_eq!(state.phase(), Some(&Phase::Editing));
    state
}

fn fill(state: AppState, promotion: &str, targeting: &str) -> AppState {
    let (state, _) = update(state, Msg::PromotionEdited(promotion.to_string()));
    let (state, _) = update(state, Msg::TargetingEdited(targeting.to_string()));
    state
}

fn submitted(promotion: &str, targeting: &str) -> AppState {
    let state = fill(editing(None), promotion, targeting);
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    assert_eq!(state.phase(), Some(&Phase::Submitting));
    state
}

fn notifications(effects: &[Effect]) -> Vec<&Notification> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notification) => Some(notification),
            _ => None,
        })
        .collect()
}

#[test]
fn saved_prompt_prefills_form() {
    let state = editing(Some("organic coffee beans"));
    let view = state.view();

    assert_eq!(view.screen, ScreenKind::Form);
    assert_eq!(view.promotion, "organic coffee beans");
    assert_eq!(view.targeting, "");
    assert!(!view.is_loading);
    assert!(view.can_submit);
}

#[test]
fn missing_or_empty_saved_prompt_starts_empty() {
    assert_eq!(editing(None).view().promotion, "");
    assert_eq!(editing(Some("")).view().promotion, "");
}

#[test]
fn form_is_loading_until_saved_prompt_resolves() {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::VerificationLoaded(Some(VERIFIED_SENTINEL.to_string())),
    );
    let view = state.view();
    assert!(view.is_loading);
    assert!(!view.can_submit);

    // Submitting before the read resolves does nothing.
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Some(&Phase::Initializing));
}

#[test]
fn typing_during_initialization_is_not_overwritten_by_saved_prompt() {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::VerificationLoaded(Some(VERIFIED_SENTINEL.to_string())),
    );
    let (state, _) = update(state, Msg::PromotionEdited("fresh text".to_string()));
    let (state, _) = update(state, Msg::SavedPromptLoaded(Some("old text".to_string())));

    assert_eq!(state.view().promotion, "fresh text");
    assert_eq!(state.phase(), Some(&Phase::Editing));
}

#[test]
fn every_non_empty_promotion_edit_is_written_through() {
    let mut state = editing(None);
    let mut last_written = None;

    for text in ["c", "co", "coffee", "coffee beans", "coffee"] {
        let (next, effects) = update(state, Msg::PromotionEdited(text.to_string()));
        assert_eq!(
            effects,
            vec![Effect::StoreValue {
                key: StorageKey::SavedPrompt,
                value: text.to_string(),
            }]
        );
        last_written = Some(text.to_string());
        state = next;
        assert_eq!(Some(state.view().promotion), last_written);
    }
}

#[test]
fn clearing_promotion_is_not_persisted() {
    let state = editing(Some("coffee"));
    let (state, effects) = update(state, Msg::PromotionEdited(String::new()));

    assert!(effects.is_empty());
    assert_eq!(state.view().promotion, "");
}

#[test]
fn targeting_edits_are_never_persisted() {
    let state = editing(None);
    let (state, effects) = update(state, Msg::TargetingEdited("US tech news".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().targeting, "US tech news");
}

#[test]
fn empty_promotion_submit_warns_and_stays_editing() {
    let mut state = fill(editing(None), "", "German food blogs");
    state.consume_dirty();

    let (mut next, effects) = update(state.clone(), Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::failure(EMPTY_PROMOTION_WARNING))]
    );
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::RequestLink { .. })));
    assert_eq!(next, state);
    assert_eq!(next.phase(), Some(&Phase::Editing));
    assert!(!next.consume_dirty());
}

#[test]
fn submit_requests_link_with_composed_prompt() {
    let state = fill(editing(None), "organic coffee", "");
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::RequestLink {
            prompt: compose_prompt("organic coffee", ""),
            model: Model::Gpt4oMini,
        }]
    );
    let view = state.view();
    assert!(view.is_loading);
    assert!(!view.form_enabled);
    assert!(!view.can_submit);
}

#[test]
fn edits_and_resubmits_are_ignored_while_submitting() {
    let state = submitted("coffee", "blogs");

    for msg in [
        Msg::SubmitClicked,
        Msg::PromotionEdited("tea".to_string()),
        Msg::TargetingEdited("news".to_string()),
        Msg::RegenerateClicked,
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn url_in_response_is_copied_announced_and_opened() {
    let state = submitted("coffee", "blogs");
    let (state, effects) = update(
        state,
        Msg::LinkResponse(Ok("...visit https://example.com/x now".to_string())),
    );

    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard {
                text: "https://example.com/x".to_string()
            },
            Effect::Notify(Notification::success(LINK_COPIED_TITLE)),
            Effect::OpenUrl {
                url: "https://example.com/x".to_string()
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.screen, ScreenKind::Result);
    assert_eq!(view.result_url.as_deref(), Some("https://example.com/x"));
    assert!(!view.is_loading);
}

#[test]
fn response_without_url_returns_to_editing_with_inputs() {
    let state = submitted("coffee", "blogs");
    let (state, effects) = update(
        state,
        Msg::LinkResponse(Ok("I could not find anything, sorry.".to_string())),
    );

    let notes = notifications(&effects);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].style, NotificationStyle::Failure);
    assert_eq!(notes[0].title, NO_LINK_TITLE);
    assert_eq!(effects.len(), 1);

    assert_eq!(state.phase(), Some(&Phase::Editing));
    assert_eq!(
        state.form(),
        Some(&FormInputs {
            promotion: "coffee".to_string(),
            targeting: "blogs".to_string(),
        })
    );
    assert!(!state.view().is_loading);
}

#[test]
fn service_error_message_becomes_notification_detail() {
    let state = submitted("coffee", "blogs");
    let (state, effects) = update(
        state,
        Msg::LinkResponse(Err(ServiceFailure::new("rate limited"))),
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(
            Notification::failure(GENERIC_ERROR_TITLE).with_detail("rate limited")
        )]
    );
    assert_eq!(state.phase(), Some(&Phase::Editing));
    assert_eq!(state.view().promotion, "coffee");
    assert_eq!(state.view().targeting, "blogs");
}

#[test]
fn service_error_without_message_uses_fallback_detail() {
    for failure in [
        ServiceFailure::without_message(),
        ServiceFailure::new(""),
        ServiceFailure::new("   "),
    ] {
        let state = submitted("coffee", "blogs");
        let (_, effects) = update(state, Msg::LinkResponse(Err(failure)));
        let notes = notifications(&effects);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].detail.as_deref(), Some(UNKNOWN_ERROR_DETAIL));
    }
}

#[test]
fn loading_indicator_is_cleared_on_every_exit_path() {
    let outcomes = [
        Ok("https://example.com/x".to_string()),
        Ok("no link".to_string()),
        Err(ServiceFailure::new("boom")),
        Err(ServiceFailure::without_message()),
    ];

    for outcome in outcomes {
        let state = submitted("coffee", "blogs");
        assert!(state.view().is_loading);
        let (state, _) = update(state, Msg::LinkResponse(outcome));
        assert!(!state.view().is_loading);
    }
}

#[test]
fn regenerate_returns_to_editing_with_previous_inputs() {
    let before = fill(editing(None), "coffee", "blogs");
    let inputs_before = before.form().cloned();

    let (state, _) = update(before, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::LinkResponse(Ok("https://app.medialister.com/catalog?q=coffee".to_string())),
    );
    assert_eq!(state.view().screen, ScreenKind::Result);

    let (state, effects) = update(state, Msg::RegenerateClicked);

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Some(&Phase::Editing));
    assert_eq!(state.form().cloned(), inputs_before);
    assert_eq!(state.view().result_url, None);
}

#[test]
fn stale_link_response_is_ignored() {
    let state = editing(Some("coffee"));
    let (next, effects) = update(
        state.clone(),
        Msg::LinkResponse(Ok("https://example.com".to_string())),
    );

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

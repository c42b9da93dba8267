use medialink_core::ScreenKind;

use super::constants::*;

pub const LOADING_TEXT: &str = "Loading...";

pub const NOTICE_TITLE: &str = "Do You Have an Account on Medialister?";
pub const NOTICE_BODY: &str =
    "If you don't have an account on Medialister yet, sign up first to use this extension.";

pub const PROMOTION_TITLE: &str = "What do you want to promote?";
pub const PROMOTION_PLACEHOLDER: &str =
    "What product, person, or company do you want to promote?";
pub const TARGETING_TITLE: &str = "What kind of media are you interested in?";
pub const TARGETING_PLACEHOLDER: &str = "Specify the targeted geography, price per placement, \
media website metrics, such as Ahrefs Domain Rating, and other information.";

pub const RESULT_TITLE: &str = "Use this link:";

/// One row of the action panel: what to type, and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRow {
    pub command: &'static str,
    pub title: &'static str,
}

const NOTICE_ACTIONS: &[ActionRow] = &[
    ActionRow {
        command: CMD_NEXT,
        title: "Next",
    },
    ActionRow {
        command: CMD_SIGN_UP,
        title: "Sign Up",
    },
];

const FORM_ACTIONS: &[ActionRow] = &[
    ActionRow {
        command: "promote <text>",
        title: PROMOTION_TITLE,
    },
    ActionRow {
        command: "media <text>",
        title: TARGETING_TITLE,
    },
    ActionRow {
        command: CMD_GENERATE,
        title: "Generate Link",
    },
];

const RESULT_ACTIONS: &[ActionRow] = &[ActionRow {
    command: CMD_NEW,
    title: "Generate a New Link",
}];

const QUIT_ACTION: ActionRow = ActionRow {
    command: CMD_QUIT,
    title: "Quit",
};

/// Action panel for a screen, always ending with "quit".
pub fn actions_for(screen: ScreenKind) -> Vec<ActionRow> {
    let rows: &[ActionRow] = match screen {
        ScreenKind::Loading => &[],
        ScreenKind::NeedsVerification => NOTICE_ACTIONS,
        ScreenKind::Form => FORM_ACTIONS,
        ScreenKind::Result => RESULT_ACTIONS,
    };
    let mut actions = rows.to_vec();
    actions.push(QUIT_ACTION);
    actions
}

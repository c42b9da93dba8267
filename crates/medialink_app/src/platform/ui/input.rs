use medialink_core::Msg;

use super::constants::*;

/// Everything the main loop reacts to: typed commands and engine results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    HelpRequested,
    QuitRequested,
    Unrecognized(String),
    Blank,
}

/// Maps one input line to an event. The command word is case-insensitive;
/// field text after it is kept verbatim apart from surrounding whitespace.
pub fn parse_line(line: &str) -> AppEvent {
    let line = line.trim();
    if line.is_empty() {
        return AppEvent::Blank;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    match word.as_str() {
        CMD_PROMOTE => AppEvent::Core(Msg::PromotionEdited(rest.to_string())),
        CMD_MEDIA => AppEvent::Core(Msg::TargetingEdited(rest.to_string())),
        _ if !rest.is_empty() => AppEvent::Unrecognized(line.to_string()),
        CMD_NEXT => AppEvent::Core(Msg::ProceedClicked),
        CMD_SIGN_UP | CMD_SIGN_UP_SHORT => AppEvent::Core(Msg::SignUpClicked),
        CMD_GENERATE | CMD_GENERATE_SHORT => AppEvent::Core(Msg::SubmitClicked),
        CMD_NEW => AppEvent::Core(Msg::RegenerateClicked),
        CMD_HELP | "?" => AppEvent::HelpRequested,
        CMD_QUIT | "exit" | "q" => AppEvent::QuitRequested,
        _ => AppEvent::Unrecognized(line.to_string()),
    }
}

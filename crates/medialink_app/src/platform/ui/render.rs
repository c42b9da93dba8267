use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};
use medialink_core::{AppViewModel, Notification, NotificationStyle, ScreenKind, SIGN_UP_URL};

use super::constants::CMD_GENERATE;
use super::layout::*;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    match view.screen {
        ScreenKind::Loading => {
            out.push_str(LOADING_TEXT);
            out.push('\n');
            return out;
        }
        ScreenKind::NeedsVerification => {
            let _ = writeln!(out, "# {NOTICE_TITLE}\n");
            let _ = writeln!(out, "{NOTICE_BODY}");
            let _ = writeln!(out, "Sign up: {SIGN_UP_URL}\n");
        }
        ScreenKind::Form => {
            render_field(&mut out, PROMOTION_TITLE, &view.promotion, PROMOTION_PLACEHOLDER);
            render_field(&mut out, TARGETING_TITLE, &view.targeting, TARGETING_PLACEHOLDER);
            if view.is_loading {
                let status = if view.form_enabled {
                    "Loading saved input..."
                } else {
                    "Generating link..."
                };
                let _ = writeln!(out, "{status}\n");
            }
        }
        ScreenKind::Result => {
            let _ = writeln!(out, "# {RESULT_TITLE}\n");
            if let Some(url) = &view.result_url {
                let _ = writeln!(out, "{url}\n");
            }
        }
    }

    // No actions while a request is in flight.
    if view.screen != ScreenKind::Form || view.form_enabled {
        let mut actions = actions_for(view.screen);
        if !view.can_submit {
            actions.retain(|row| row.command != CMD_GENERATE);
        }
        out.push_str(&render_rows(&actions));
    }
    out
}

pub fn render_actions(screen: ScreenKind) -> String {
    render_rows(&actions_for(screen))
}

fn render_rows(actions: &[ActionRow]) -> String {
    let width = actions
        .iter()
        .map(|row| row.command.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for row in actions {
        let _ = writeln!(out, "  {:<width$}  {}", row.command, row.title);
    }
    out
}

pub fn render_notification<Tz>(notification: &Notification, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mark = match notification.style {
        NotificationStyle::Success => "✔",
        NotificationStyle::Failure => "✖",
    };
    let time = at.format("%H:%M:%S");
    match &notification.detail {
        Some(detail) => format!("[{time}] {mark} {}: {detail}", notification.title),
        None => format!("[{time}] {mark} {}", notification.title),
    }
}

fn render_field(out: &mut String, title: &str, value: &str, placeholder: &str) {
    let _ = writeln!(out, "{title}");
    if value.is_empty() {
        let _ = writeln!(out, "  ({placeholder})\n");
    } else {
        for line in value.lines() {
            let _ = writeln!(out, "  {line}");
        }
        out.push('\n');
    }
}

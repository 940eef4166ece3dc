//! src/view/components/status_bar.rs
//!
//! One line: location and display flags on the left, the latest
//! notification (or a key hint) on the right.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

use crate::{
    model::{
        navigation::{Navigator, ScanState},
        ui_state::{NotificationLevel, UIState},
    },
    view::theme,
};

const KEY_HINT: &str = "Enter open | h up | . hidden | s sort | r refresh | o accept | q quit";

pub struct StatusBar;

impl StatusBar {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, ui_state: &UIState, navigator: &Navigator, area: Rect) {
        let options = navigator.options();
        let scan = match navigator.state() {
            ScanState::Idle => "idle",
            ScanState::Scanning => "scanning",
        };

        let left_text = format!(
            "{} | hidden: {} | sort: {} | {scan}",
            navigator.location().display(),
            on_off(options.show_hidden),
            on_off(options.sort_enabled),
        );

        let (right_text, right_style) = match &ui_state.notification {
            Some(n) if n.level == NotificationLevel::Error => {
                (n.message.as_str(), theme::status_error_style())
            }
            Some(n) => (n.message.as_str(), theme::status_style()),
            None => (KEY_HINT, theme::status_style()),
        };

        let left_style = if navigator.state() == ScanState::Scanning {
            theme::status_busy_style()
        } else {
            theme::status_style()
        };

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Paragraph::new(left_text)
            .style(left_style)
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(right_text)
            .style(right_style)
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

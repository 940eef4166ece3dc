//! src/view/components/drive_panel.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph},
};

use crate::{
    model::drive_list::DriveList,
    view::{icons, theme},
};

pub struct DrivePanel;

impl DrivePanel {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, drives: &DriveList, focused: bool, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Drives ")
            .title_style(theme::pane_title_style())
            .border_style(theme::pane_border_style(focused))
            .style(theme::pane_style());

        if drives.is_empty() {
            let empty = Paragraph::new("No roots found")
                .style(theme::hidden_directory_style())
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem<'_>> = drives
            .roots()
            .iter()
            .map(|root| ListItem::new(format!("{} {root}", icons::DRIVE_ICON)).style(theme::drive_style()))
            .collect();

        let mut list_state = ListState::default().with_selected(drives.highlighted());

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

impl Default for DrivePanel {
    fn default() -> Self {
        Self::new()
    }
}

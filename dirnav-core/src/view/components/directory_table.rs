//! src/view/components/directory_table.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};

use crate::{
    fs::entry::DirectoryEntry,
    model::navigation::{Navigator, ScanState},
    util::paths::is_hidden,
    view::{icons, theme},
};

pub struct DirectoryTable;

impl DirectoryTable {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        navigator: &Navigator,
        focused: bool,
        show_modified: bool,
        area: Rect,
    ) {
        let header_cells: Vec<&str> = if show_modified {
            vec!["Name", "Modified"]
        } else {
            vec!["Name"]
        };
        let header = Row::new(header_cells)
            .style(theme::header_style())
            .bottom_margin(1);

        let rows: Vec<Row<'_>> = navigator
            .rows()
            .iter()
            .map(|entry| Self::row(entry, show_modified))
            .collect();

        let widths: Vec<Constraint> = if show_modified {
            vec![Constraint::Fill(1), Constraint::Length(20)]
        } else {
            vec![Constraint::Fill(1)]
        };

        let busy = if navigator.state() == ScanState::Scanning {
            " (scanning)"
        } else {
            ""
        };
        let title = format!(" {}{busy} ", navigator.location().display());

        let mut table_state = TableState::default().with_selected(navigator.highlighted());

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(theme::pane_title_style())
                    .border_style(theme::pane_border_style(focused))
                    .style(theme::pane_style()),
            )
            .row_highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn row(entry: &DirectoryEntry, show_modified: bool) -> Row<'static> {
        let (icon, style) = if entry.is_parent() {
            (icons::PARENT_ICON, theme::parent_row_style())
        } else if is_hidden(entry.name()) {
            (icons::FOLDER_ICON, theme::hidden_directory_style())
        } else {
            (icons::FOLDER_ICON, theme::directory_style())
        };

        let mut cells = vec![Cell::from(format!("{icon} {}", entry.label()))];
        if show_modified {
            cells.push(Cell::from(entry.modified().to_owned()));
        }

        Row::new(cells).style(style)
    }
}

impl Default for DirectoryTable {
    fn default() -> Self {
        Self::new()
    }
}

//! src/view/ui.rs
//! ============================================================
//! Frame renderer for the picker: optional drive column, the directory
//! table and a status line. Reads state only; never mutates it.

use ratatui::prelude::*;
use tracing::instrument;

use crate::{
    model::{
        drive_list::DriveList,
        navigation::Navigator,
        ui_state::{Focus, UIState},
    },
    view::components::{
        directory_table::DirectoryTable, drive_panel::DrivePanel, status_bar::StatusBar,
    },
};

const DRIVE_COLUMN_WIDTH: u16 = 24;

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub frames: u64,
}

pub struct UIRenderer {
    table: DirectoryTable,
    drives: DrivePanel,
    status: StatusBar,
    stats: RenderStats,
}

impl UIRenderer {
    pub const fn new() -> Self {
        Self {
            table: DirectoryTable::new(),
            drives: DrivePanel::new(),
            status: StatusBar::new(),
            stats: RenderStats { frames: 0 },
        }
    }

    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(
        &mut self,
        frame: &mut Frame<'_>,
        ui_state: &UIState,
        navigator: &Navigator,
        drives: &DriveList,
    ) {
        let [main, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        if ui_state.drives_visible {
            let [drive_area, table_area] = Layout::horizontal([
                Constraint::Length(DRIVE_COLUMN_WIDTH),
                Constraint::Fill(1),
            ])
            .areas(main);

            self.drives
                .render(frame, drives, ui_state.focus == Focus::Drives, drive_area);
            self.draw_table(frame, ui_state, navigator, table_area);
        } else {
            self.draw_table(frame, ui_state, navigator, main);
        }

        self.status.render(frame, ui_state, navigator, status);
        self.stats.frames += 1;
    }

    fn draw_table(&self, frame: &mut Frame<'_>, ui_state: &UIState, navigator: &Navigator, area: Rect) {
        self.table.render(
            frame,
            navigator,
            ui_state.focus == Focus::Directories,
            ui_state.show_modified,
            area,
        );
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::model::projection::DisplayOptions;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_renders_rows_drives_and_status() {
        let fs = Arc::new(MockFileSystem::new().with_dir("/a", &[".git", "src", "docs"]));
        let (events_tx, _events) = mpsc::unbounded_channel();
        let (mut nav, mut reports) =
            Navigator::new(fs, "/a", DisplayOptions::default(), events_tx).unwrap();
        nav.mount();
        let report = reports.recv().await.unwrap();
        nav.apply_scan_report(report);

        let (drive_tx, _drive_rx) = mpsc::unbounded_channel();
        let mut drives = DriveList::new(drive_tx);
        drives.activate_with(|| vec!["/mnt/data".to_owned()]);

        let ui_state = UIState::new(true, false);
        let mut renderer = UIRenderer::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &ui_state, &nav, &drives))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("/mnt/data"));
        assert!(text.contains("docs"));
        assert!(text.contains("src"));
        assert!(!text.contains(".git"));
        assert!(text.contains("hidden: off"));
        assert_eq!(renderer.stats().frames, 1);
    }
}

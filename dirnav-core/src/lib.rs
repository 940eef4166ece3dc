pub mod error;

pub mod config;

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod events;
    pub use events::{DriveEvent, NavigationEvent};
}

pub mod model {
    pub mod drive_list;
    pub use drive_list::DriveList;

    pub mod navigation;
    pub use navigation::{Navigator, ScanState};

    pub mod projection;
    pub use projection::{DisplayOptions, EntryCache, project};

    pub mod ui_state;
    pub use ui_state::{Focus, NotificationLevel, RedrawFlag, UIState};
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod directory_table;
        pub use directory_table::DirectoryTable;
        pub mod drive_panel;
        pub use drive_panel::DrivePanel;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }
}

pub mod fs {
    pub mod entry;
    pub use entry::DirectoryEntry;

    pub mod roots;

    pub mod source;
    pub use source::{FileSystem, LocalFileSystem};

    #[cfg(test)]
    pub mod mock;
}

pub mod tasks {
    pub mod scan_task;
}

pub mod logging;

pub mod util {
    pub mod paths;
}

pub use error::{NavError, NavResult};

pub use model::{drive_list::DriveList, navigation::Navigator};

//! Picker UI state: focus, redraw flags and the status-line notification.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use compact_str::CompactString;

/// Atomic redraw flags for lock-free UI updates.
///
/// `Content` covers both panes; any set bit makes the next frame draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Content = 1,
    StatusBar = 2,
    All = 3,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Which pane receives movement and activation keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Drives,
    #[default]
    Directories,
}

impl Focus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Drives => Self::Directories,
            Self::Directories => Self::Drives,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Error = 1,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u32>,
}

#[derive(Debug)]
pub struct UIState {
    pub redraw_flags: AtomicU32,
    pub focus: Focus,
    pub notification: Option<Notification>,

    /// Drive column disabled in config or no roots found.
    pub drives_visible: bool,
    pub show_modified: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl UIState {
    #[must_use]
    pub fn new(drives_visible: bool, show_modified: bool) -> Self {
        Self {
            redraw_flags: AtomicU32::new(u32::from(RedrawFlag::All.bits())),
            focus: Focus::Directories,
            notification: None,
            drives_visible,
            show_modified,
        }
    }

    #[inline]
    pub fn request_redraw(&self, flag: RedrawFlag) {
        self.redraw_flags
            .fetch_or(u32::from(flag.bits()), Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_flags.load(Ordering::Relaxed) != 0
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw_flags.store(0, Ordering::Relaxed);
    }

    /// Switch focus; the drive pane can only take focus while visible.
    pub fn toggle_focus(&mut self) {
        let next = self.focus.toggled();
        if next == Focus::Drives && !self.drives_visible {
            return;
        }
        self.focus = next;
        self.request_redraw(RedrawFlag::All);
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss_ms: Option<u32>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
        self.request_redraw(RedrawFlag::StatusBar);
    }

    /// Info messages fade after three seconds.
    #[inline]
    pub fn show_info(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Info, Some(3000));
    }

    /// Errors stay until replaced.
    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Error, None);
    }

    /// Drop an expired notification. Returns whether one was dropped.
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification
            && let Some(auto_dismiss_ms) = notification.auto_dismiss_ms
            && notification.timestamp.elapsed().as_millis() > u128::from(auto_dismiss_ms)
        {
            self.notification = None;
            self.request_redraw(RedrawFlag::StatusBar);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_skips_hidden_drive_pane() {
        let mut ui = UIState::new(false, true);
        ui.toggle_focus();
        assert_eq!(ui.focus, Focus::Directories);

        let mut ui = UIState::new(true, true);
        ui.toggle_focus();
        assert_eq!(ui.focus, Focus::Drives);
        ui.toggle_focus();
        assert_eq!(ui.focus, Focus::Directories);
    }

    #[test]
    fn test_redraw_flags() {
        let ui = UIState::default();
        assert!(ui.needs_redraw());
        ui.clear_redraw();
        assert!(!ui.needs_redraw());
        ui.request_redraw(RedrawFlag::StatusBar);
        assert!(ui.needs_redraw());
        ui.clear_redraw();
        ui.request_redraw(RedrawFlag::Content);
        assert!(ui.needs_redraw());
    }

    #[test]
    fn test_info_is_dismissed_after_timeout() {
        let mut ui = UIState::default();
        ui.show_info("Reloading /tmp");

        let notification = ui.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Info);
        assert_eq!(notification.auto_dismiss_ms, Some(3000));
        assert!(!ui.update_notification());

        ui.notification.as_mut().unwrap().timestamp -= std::time::Duration::from_secs(4);
        assert!(ui.update_notification());
        assert!(ui.notification.is_none());
    }

    #[test]
    fn test_errors_never_auto_dismiss() {
        let mut ui = UIState::default();
        ui.show_error("Cannot list \"/x\"");
        assert!(!ui.update_notification());
        assert!(ui.notification.is_some());

        ui.show_notification("gone", NotificationLevel::Info, Some(0));
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(ui.update_notification());
        assert!(ui.notification.is_none());
    }
}

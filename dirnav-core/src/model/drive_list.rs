//! ``src/model/drive_list.rs``
//! ============================================================================
//! # `DriveList`: flat list of filesystem roots
//!
//! Populated once on activation and never refreshed. Selecting a row emits
//! [`DriveEvent::RootSelected`] with the root's string; whoever composes this
//! with a navigator decides what to do with it.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use crate::controller::events::DriveEvent;
use crate::fs::roots::list_roots;

#[derive(Debug)]
pub struct DriveList {
    roots: Vec<String>,
    highlighted: Option<usize>,
    activated: bool,
    events_tx: UnboundedSender<DriveEvent>,
}

impl DriveList {
    #[must_use]
    pub const fn new(events_tx: UnboundedSender<DriveEvent>) -> Self {
        Self {
            roots: Vec::new(),
            highlighted: None,
            activated: false,
            events_tx,
        }
    }

    /// Enumerate the platform's roots. Only the first call does any work.
    pub fn activate(&mut self) {
        self.activate_with(list_roots);
    }

    /// Like [`DriveList::activate`] with a custom root source.
    pub fn activate_with<F>(&mut self, source: F)
    where
        F: FnOnce() -> Vec<String>,
    {
        if self.activated {
            trace!("drive list already activated");
            return;
        }

        self.activated = true;
        self.roots = source();
        self.highlighted = (!self.roots.is_empty()).then_some(0);
        debug!(count = self.roots.len(), "drive list activated");
    }

    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        if let Some(idx) = self.highlighted
            && idx + 1 < self.roots.len()
        {
            self.highlighted = Some(idx + 1);
        }
    }

    pub fn highlight_previous(&mut self) {
        if let Some(idx) = self.highlighted
            && idx > 0
        {
            self.highlighted = Some(idx - 1);
        }
    }

    pub fn highlight_first(&mut self) {
        if !self.roots.is_empty() {
            self.highlighted = Some(0);
        }
    }

    pub fn highlight_last(&mut self) {
        if !self.roots.is_empty() {
            self.highlighted = Some(self.roots.len() - 1);
        }
    }

    /// Emit `RootSelected` for the root at `index`.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(root) = self.roots.get(index) else {
            return false;
        };

        self.highlighted = Some(index);
        debug!(root = %root, "root selected");

        if self
            .events_tx
            .send(DriveEvent::RootSelected(root.clone()))
            .is_err()
        {
            trace!("drive event dropped: no listener");
        }
        true
    }

    pub fn select_highlighted(&mut self) -> bool {
        match self.highlighted {
            Some(idx) => self.select(idx),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn roots() -> Vec<String> {
        vec!["C:\\".to_owned(), "D:\\".to_owned()]
    }

    #[test]
    fn test_activation_lists_once() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut drives = DriveList::new(tx);

        drives.activate_with(roots);
        drives.activate_with(|| vec!["/other".to_owned()]);

        assert_eq!(drives.roots(), ["C:\\", "D:\\"]);
        assert_eq!(drives.highlighted(), Some(0));
    }

    #[test]
    fn test_select_emits_root_string() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut drives = DriveList::new(tx);
        drives.activate_with(roots);

        assert!(drives.select(1));
        assert_eq!(rx.try_recv().unwrap(), DriveEvent::RootSelected("D:\\".to_owned()));

        assert!(!drives.select(5));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_empty_root_list_is_not_an_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut drives = DriveList::new(tx);
        drives.activate_with(Vec::new);

        assert!(drives.is_empty());
        assert_eq!(drives.highlighted(), None);
        assert!(!drives.select_highlighted());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_highlight_movement_and_select_highlighted() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut drives = DriveList::new(tx);
        drives.activate_with(roots);

        drives.highlight_previous();
        assert_eq!(drives.highlighted(), Some(0));
        drives.highlight_last();
        assert_eq!(drives.highlighted(), Some(1));
        drives.highlight_first();
        drives.highlight_next();
        drives.highlight_next();
        assert_eq!(drives.highlighted(), Some(1));

        assert!(drives.select_highlighted());
        assert_eq!(rx.try_recv().unwrap(), DriveEvent::RootSelected("D:\\".to_owned()));
    }
}

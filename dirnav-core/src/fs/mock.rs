//! In-memory `FileSystem` for tests: scripted listings, a read counter and
//! per-directory gates that hold an enumeration until released.

use std::collections::{HashMap, HashSet};
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, mpsc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{NavError, NavResult};
use crate::fs::source::{ChildInfo, ChildIter, FileSystem};

pub const MOCK_MTIME: Duration = Duration::from_secs(1_700_000_000);

#[derive(Debug, Clone)]
enum MockChild {
    Dir(String),
    File(String),
    Broken(String),
}

impl MockChild {
    fn name(&self) -> &str {
        match self {
            Self::Dir(n) | Self::File(n) | Self::Broken(n) => n,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockFileSystem {
    dirs: Mutex<HashMap<PathBuf, Vec<MockChild>>>,
    failing: Mutex<HashSet<PathBuf>>,
    gates: Mutex<HashMap<PathBuf, mpsc::Receiver<()>>>,
    reads: AtomicUsize,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.ensure_dir(Path::new("/"));
        fs
    }

    /// Register `dir` with the given subdirectories, in this order.
    pub fn with_dir(self, dir: &str, children: &[&str]) -> Self {
        let dir = PathBuf::from(dir);
        self.ensure_dir(&dir);
        for child in children {
            self.ensure_dir(&dir.join(child));
        }
        self
    }

    pub fn with_file(self, dir: &str, name: &str) -> Self {
        let dir = PathBuf::from(dir);
        self.ensure_dir(&dir);
        self.push_child(&dir, MockChild::File(name.to_owned()));
        self
    }

    /// A child whose metadata cannot be read.
    pub fn with_broken(self, dir: &str, name: &str) -> Self {
        let dir = PathBuf::from(dir);
        self.ensure_dir(&dir);
        self.push_child(&dir, MockChild::Broken(name.to_owned()));
        self
    }

    /// Listing `dir` fails with `PermissionDenied`; it still resolves.
    pub fn with_unreadable(self, dir: &str) -> Self {
        let dir = PathBuf::from(dir);
        self.ensure_dir(&dir);
        self.failing.lock().unwrap().insert(dir);
        self
    }

    /// Delete `dir` (and its listing) after the fact.
    pub fn remove_dir(&self, dir: &str) {
        self.dirs.lock().unwrap().remove(Path::new(dir));
    }

    /// Hold the next enumeration of `dir` until the sender fires or drops.
    pub fn gate(&self, dir: &str) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(PathBuf::from(dir), rx);
        tx
    }

    /// Number of `read_children` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn ensure_dir(&self, dir: &Path) {
        let mut dirs = self.dirs.lock().unwrap();
        let mut current = PathBuf::new();

        for component in dir.components() {
            let parent = current.clone();
            current.push(component);
            dirs.entry(current.clone()).or_default();

            if let Component::Normal(name) = component {
                let name = name.to_string_lossy().into_owned();
                let siblings = dirs.entry(parent).or_default();
                if !siblings.iter().any(|c| c.name() == name) {
                    siblings.push(MockChild::Dir(name));
                }
            }
        }
    }

    fn push_child(&self, dir: &Path, child: MockChild) {
        self.dirs
            .lock()
            .unwrap()
            .entry(dir.to_path_buf())
            .or_default()
            .push(child);
    }

    fn normalize(path: &Path) -> PathBuf {
        let mut out = PathBuf::from("/");
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    out.pop();
                }
                Component::Normal(name) => out.push(name),
                _ => {}
            }
        }
        out
    }

    fn mtime() -> SystemTime {
        UNIX_EPOCH + MOCK_MTIME
    }
}

impl FileSystem for MockFileSystem {
    fn resolve(&self, path: &Path) -> NavResult<PathBuf> {
        let normalized = Self::normalize(path);
        if self.dirs.lock().unwrap().contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(NavError::resolution_failed(
                path,
                io::Error::new(ErrorKind::NotFound, "no such directory"),
            ))
        }
    }

    fn read_children(&self, dir: &Path) -> NavResult<ChildIter> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().remove(dir);
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        if self.failing.lock().unwrap().contains(dir) {
            return Err(NavError::enumeration_failed(
                dir,
                io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
            ));
        }

        let children = self
            .dirs
            .lock()
            .unwrap()
            .get(dir)
            .cloned()
            .ok_or_else(|| {
                NavError::enumeration_failed(
                    dir,
                    io::Error::new(ErrorKind::NotFound, "no such directory"),
                )
            })?;

        let dir = dir.to_path_buf();
        let items: Vec<NavResult<ChildInfo>> = children
            .into_iter()
            .map(|child| {
                let path = dir.join(child.name());
                match child {
                    MockChild::Dir(_) => Ok(ChildInfo {
                        path,
                        is_dir: true,
                        modified: Some(Self::mtime()),
                    }),
                    MockChild::File(_) => Ok(ChildInfo {
                        path,
                        is_dir: false,
                        modified: Some(Self::mtime()),
                    }),
                    MockChild::Broken(_) => Err(NavError::metadata_unavailable(
                        path,
                        io::Error::new(ErrorKind::PermissionDenied, "stat failed"),
                    )),
                }
            })
            .collect();

        Ok(Box::new(items.into_iter()))
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.dirs
            .lock()
            .unwrap()
            .contains_key(path)
            .then(Self::mtime)
    }
}

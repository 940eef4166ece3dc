//! Filesystem roots (drives and mount points) for the drive list.

use sysinfo::Disks;
use tracing::debug;

/// Mount points as opaque display strings, in platform order.
///
/// Enumeration failure and unsupported platforms both yield an empty list.
#[must_use]
pub fn list_roots() -> Vec<String> {
    let disks = Disks::new_with_refreshed_list();

    let roots: Vec<String> = disks
        .iter()
        .map(|disk| disk.mount_point())
        .filter(|mount| mount.is_absolute())
        .map(|mount| mount.to_string_lossy().into_owned())
        .collect();

    debug!(count = roots.len(), "enumerated filesystem roots");
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_roots_are_absolute() {
        for root in list_roots() {
            assert!(Path::new(&root).is_absolute(), "{root} is not absolute");
        }
    }
}

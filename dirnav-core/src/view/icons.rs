//! src/view/icons.rs
//! ============================================================================
//! # Nerd Font icons for the picker rows

pub const FOLDER_ICON: &str = "";
pub const PARENT_ICON: &str = "";
pub const DRIVE_ICON: &str = "";

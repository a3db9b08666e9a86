use std::path::PathBuf;

use crate::types::SHOPDESK_DIR;

/// Returns the root shopdesk directory path.
///
/// Resolution order:
/// 1. `SHOPDESK_ROOT` environment variable (if set)
/// 2. Current working directory + `.shopdesk`
pub fn shop_root() -> PathBuf {
    if let Ok(root) = std::env::var("SHOPDESK_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(SHOPDESK_DIR)
    }
}

/// Returns the path to the customer records directory.
pub fn customers_dir() -> PathBuf {
    shop_root().join("customers")
}

/// Returns the path to the ticket records directory.
pub fn tickets_dir() -> PathBuf {
    shop_root().join("tickets")
}

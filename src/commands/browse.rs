//! Grid browser command (`shopdesk browse`)
//!
//! Full-screen TUI over the ticket and customer grids with sorting,
//! filtering, paging, and background refresh.

use iocraft::prelude::*;

use crate::error::{Result, ShopdeskError};
use crate::tui::{BrowseGrid, Tab};

/// Launch the grid browser TUI.
pub fn cmd_browse(target: Option<&str>, term: Option<&str>) -> Result<()> {
    let tab = match target {
        None | Some("tickets") => Tab::Tickets,
        Some("customers") => Tab::Customers,
        Some(other) => {
            return Err(ShopdeskError::InvalidInput(format!(
                "unknown browse target '{}' (expected tickets or customers)",
                other
            )));
        }
    };
    let term = term.unwrap_or_default().to_string();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ShopdeskError::Other(format!("Failed to create runtime: {}", e)))?;

    rt.block_on(async {
        element!(BrowseGrid(tab: tab, term: term))
            .fullscreen()
            .await
            .map_err(|e| ShopdeskError::Other(format!("TUI error: {}", e)))
    })
}

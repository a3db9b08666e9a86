mod auth;
mod browse;
mod config;
mod customers;
mod tickets;

pub use auth::{cmd_login, cmd_logout, cmd_whoami};
pub use browse::cmd_browse;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use customers::{
    CustomerFieldOptions, cmd_customer_create, cmd_customer_edit, cmd_customer_show, cmd_customers,
};
pub use tickets::{
    TicketCreateOptions, TicketEditOptions, cmd_ticket_create, cmd_ticket_edit, cmd_ticket_show,
    cmd_tickets,
};

use clap::Args;

use crate::error::{Result, ShopdeskError};
use crate::forms::FieldErrors;
use crate::grid::{GridState, SortDirection, page_index_from_param};

/// Listing flags shared by the ticket and customer grids.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Free-text search term; omit it for the default listing
    pub term: Option<String>,

    /// Page number, 1-based (invalid values fall back to page 1)
    #[arg(long, allow_hyphen_values = true)]
    pub page: Option<String>,

    /// Sort by this column id
    #[arg(long, value_name = "COL")]
    pub sort: Option<String>,

    /// Sort descending (requires --sort)
    #[arg(long, requires = "sort", conflicts_with = "unsorted")]
    pub desc: bool,

    /// Drop the default sort and keep fetch order
    #[arg(long)]
    pub unsorted: bool,

    /// Column filter, repeatable (e.g. --filter tech=new-ticket)
    #[arg(long = "filter", value_name = "COL=TEXT")]
    pub filters: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Build the grid state for one listing from entity defaults plus flags.
pub fn grid_state_from_args(defaults: GridState, args: &ListArgs) -> Result<GridState> {
    let mut state = defaults;

    if args.unsorted {
        state.sort = None;
    }
    if let Some(ref column) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        state.sort = Some((column.clone(), direction));
    }

    for pair in &args.filters {
        let (column, text) = pair.split_once('=').ok_or_else(|| {
            ShopdeskError::InvalidInput(format!("filter '{}' is not COL=TEXT", pair))
        })?;
        state.set_filter(column, text);
    }

    state.page_index = page_index_from_param(args.page.as_deref());
    Ok(state)
}

/// Print field-level validation errors and return a failure.
pub fn report_field_errors(errors: &FieldErrors) -> Result<()> {
    let mut lines = vec!["Validation failed:".to_string()];
    for (field, message) in errors.iter() {
        lines.push(format!("  {}: {}", field, message));
    }
    Err(ShopdeskError::InvalidInput(lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_state_from_defaults() {
        let state = grid_state_from_args(GridState::ticket_defaults(), &ListArgs::default()).unwrap();
        assert_eq!(
            state.sort,
            Some(("date".to_string(), SortDirection::Ascending))
        );
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn test_sort_and_page_flags() {
        let args = ListArgs {
            sort: Some("title".to_string()),
            desc: true,
            page: Some("3".to_string()),
            ..ListArgs::default()
        };
        let state = grid_state_from_args(GridState::customer_defaults(), &args).unwrap();
        assert_eq!(
            state.sort,
            Some(("title".to_string(), SortDirection::Descending))
        );
        assert_eq!(state.page_index, 2);
    }

    #[test]
    fn test_unsorted_drops_default_sort() {
        let args = ListArgs {
            unsorted: true,
            ..ListArgs::default()
        };
        let state = grid_state_from_args(GridState::ticket_defaults(), &args).unwrap();
        assert_eq!(state.sort, None);
    }

    #[test]
    fn test_filter_pairs() {
        let args = ListArgs {
            filters: vec!["tech=new-ticket".to_string(), "status=open".to_string()],
            ..ListArgs::default()
        };
        let state = grid_state_from_args(GridState::default(), &args).unwrap();
        assert_eq!(state.filter("tech"), "new-ticket");
        assert_eq!(state.filter("status"), "open");

        let bad = ListArgs {
            filters: vec!["tech".to_string()],
            ..ListArgs::default()
        };
        assert!(grid_state_from_args(GridState::default(), &bad).is_err());
    }

    #[test]
    fn test_bad_page_parameter_falls_back_to_first() {
        let args = ListArgs {
            page: Some("abc".to_string()),
            ..ListArgs::default()
        };
        let state = grid_state_from_args(GridState::default(), &args).unwrap();
        assert_eq!(state.page_index, 0);
    }
}

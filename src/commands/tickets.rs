//! Ticket listing and mutation commands.

use serde_json::json;

use crate::commands::{ListArgs, grid_state_from_args, report_field_errors};
use crate::config::Config;
use crate::display;
use crate::error::{Result, ShopdeskError};
use crate::forms::{SaveOutcome, TicketForm, save_ticket};
use crate::grid::{GridState, compute_grid, ticket_columns};
use crate::store::ShopStore;
use crate::types::{TicketRow, UNASSIGNED_TECH};

/// `shopdesk tickets [TERM]` — the ticket grid.
///
/// Without a term this is the default listing: open tickets only, oldest
/// first. With a term it searches every ticket, completed ones included.
pub fn cmd_tickets(args: &ListArgs) -> Result<()> {
    let store = ShopStore::load()?;

    let rows: Vec<TicketRow> = match args.term.as_deref() {
        None | Some("") => store.open_tickets(),
        Some(term) => store.search_tickets(term),
    };

    let columns = ticket_columns();
    let state = grid_state_from_args(GridState::ticket_defaults(), args)?;
    let view = compute_grid(&rows, &columns, &state);

    if args.json {
        let output = json!({
            "rows": view.page_rows,
            "page": view.page_index + 1,
            "page_count": view.page_count,
            "total": view.filtered_count,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if view.filtered_count == 0 {
        println!("{}", display::NO_RESULTS);
        return Ok(());
    }

    println!("{}", display::render_ticket_grid(&view, &columns));
    println!("{}", display::page_summary(&view));
    Ok(())
}

/// `shopdesk tickets show <ID>`
pub fn cmd_ticket_show(id: u32) -> Result<()> {
    let store = ShopStore::load()?;
    let ticket = store
        .get_ticket(id)
        .ok_or(ShopdeskError::TicketNotFound(id))?;

    println!(
        "{}",
        display::format_ticket_detail(ticket, store.get_customer(ticket.customer_id))
    );
    Ok(())
}

pub struct TicketCreateOptions {
    pub customer_id: u32,
    pub title: String,
    pub description: String,
    pub tech: Option<String>,
}

/// `shopdesk tickets create`
pub fn cmd_ticket_create(options: TicketCreateOptions) -> Result<()> {
    let config = Config::load()?;
    let user = config.require_user()?;
    let store = ShopStore::load()?;

    let form = TicketForm {
        title: options.title,
        description: options.description,
        tech: options
            .tech
            .unwrap_or_else(|| UNASSIGNED_TECH.to_string()),
        ..TicketForm::new_for_customer(options.customer_id)
    };

    match save_ticket(&form, &store, user)? {
        SaveOutcome::Saved { message, .. } => {
            println!("{}", message);
            Ok(())
        }
        SaveOutcome::Invalid(errors) => report_field_errors(&errors),
    }
}

#[derive(Default)]
pub struct TicketEditOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech: Option<String>,
    pub completed: Option<bool>,
}

/// `shopdesk tickets edit <ID>` — technician reassignment and completion
/// toggling, plus text fixes.
pub fn cmd_ticket_edit(id: u32, options: TicketEditOptions) -> Result<()> {
    let config = Config::load()?;
    let user = config.require_user()?;
    let store = ShopStore::load()?;

    let ticket = store
        .get_ticket(id)
        .ok_or(ShopdeskError::TicketNotFound(id))?;
    let mut form = TicketForm::from_ticket(ticket);

    if let Some(title) = options.title {
        form.title = title;
    }
    if let Some(description) = options.description {
        form.description = description;
    }
    if let Some(tech) = options.tech {
        form.tech = tech;
    }
    if let Some(completed) = options.completed {
        form.completed = completed;
    }

    match save_ticket(&form, &store, user)? {
        SaveOutcome::Saved { message, .. } => {
            println!("{}", message);
            Ok(())
        }
        SaveOutcome::Invalid(errors) => report_field_errors(&errors),
    }
}

use unicase::UniCase;

use crate::config::UserConfig;
use crate::error::{Result, ShopdeskError};
use crate::forms::validate::validate_ticket;
use crate::forms::SaveOutcome;
use crate::store::{ShopStore, repository};
use crate::types::{Ticket, UNASSIGNED_TECH};
use crate::utils;

/// Ticket form input. `id: None` marks a ticket that has not been
/// persisted yet and means insert; `Some(id)` means update.
#[derive(Debug, Clone)]
pub struct TicketForm {
    pub id: Option<u32>,
    pub customer_id: u32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub tech: String,
}

impl TicketForm {
    /// A fresh form for a customer, technician defaulting to the
    /// unassigned sentinel.
    pub fn new_for_customer(customer_id: u32) -> Self {
        TicketForm {
            id: None,
            customer_id,
            title: String::new(),
            description: String::new(),
            completed: false,
            tech: UNASSIGNED_TECH.to_string(),
        }
    }

    pub fn from_ticket(ticket: &Ticket) -> Self {
        TicketForm {
            id: Some(ticket.id),
            customer_id: ticket.customer_id,
            title: ticket.title.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            completed: ticket.completed,
            tech: ticket.tech.clone(),
        }
    }
}

fn same_email(a: &str, b: &str) -> bool {
    UniCase::new(a) == UniCase::new(b)
}

/// Non-managers may only point the technician field at themselves or
/// leave the ticket unassigned.
fn check_tech_assignment(form: &TicketForm, user: &UserConfig) -> Result<()> {
    if user.manager || form.tech == UNASSIGNED_TECH || same_email(&form.tech, &user.email) {
        return Ok(());
    }
    Err(ShopdeskError::PermissionDenied(
        "only managers may assign another technician".to_string(),
    ))
}

/// Validate and persist a ticket form against the current store snapshot.
///
/// Creation requires an existing, active customer. Updates require the
/// ticket to exist and, for non-managers, to be assigned to them (or to
/// nobody). Creation timestamps survive updates.
pub fn save_ticket(form: &TicketForm, store: &ShopStore, user: &UserConfig) -> Result<SaveOutcome> {
    let errors = validate_ticket(&form.title, &form.description, &form.tech);
    if !errors.is_empty() {
        return Ok(SaveOutcome::Invalid(errors));
    }

    check_tech_assignment(form, user)?;

    let now = utils::iso_date();
    let (id, created, verb) = match form.id {
        None => {
            let customer = store
                .get_customer(form.customer_id)
                .ok_or(ShopdeskError::CustomerNotFound(form.customer_id))?;
            if !customer.active {
                return Err(ShopdeskError::CustomerInactive(customer.id));
            }
            (store.next_ticket_id(), now.clone(), "created")
        }
        Some(id) => {
            let existing = store
                .get_ticket(id)
                .ok_or(ShopdeskError::TicketNotFound(id))?;
            if !user.manager
                && existing.tech != UNASSIGNED_TECH
                && !same_email(&existing.tech, &user.email)
            {
                return Err(ShopdeskError::PermissionDenied(format!(
                    "ticket {} is assigned to {}",
                    id, existing.tech
                )));
            }
            (id, existing.created.clone(), "updated")
        }
    };

    let ticket = Ticket {
        id,
        customer_id: form.customer_id,
        title: form.title.clone(),
        description: match form.description.trim() {
            "" => None,
            text => Some(text.to_string()),
        },
        completed: form.completed,
        tech: form.tech.clone(),
        created,
        updated: now,
    };

    repository::save_ticket(&ticket)?;

    Ok(SaveOutcome::Saved {
        id,
        message: format!("Ticket id {} {} successfully", id, verb),
    })
}

//! Disk round-tripping for record files.
//!
//! Records live under the shop root as `customers/<id>.md` and
//! `tickets/<id>.md`. The filename stem is the authoritative id; a file
//! that fails to read or parse is skipped with a warning so one bad
//! record cannot take down a listing.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, ShopdeskError};
use crate::parser::{parse_customer_content, parse_ticket_content};
use crate::paths::{customers_dir, tickets_dir};
use crate::types::{Customer, Ticket};
use crate::utils;

pub fn customer_path(id: u32) -> PathBuf {
    customers_dir().join(format!("{id}.md"))
}

pub fn ticket_path(id: u32) -> PathBuf {
    tickets_dir().join(format!("{id}.md"))
}

pub fn load_customers() -> Result<Vec<Customer>> {
    let dir = customers_dir();
    let mut customers = Vec::new();

    for file in utils::find_markdown_files(&dir)? {
        let file_path = dir.join(&file);
        let content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "Failed to read customer record {}: {}",
                    utils::format_relative_path(&file_path),
                    e
                );
                continue;
            }
        };
        let mut customer = match parse_customer_content(&content) {
            Ok(customer) => customer,
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed customer record {}: {}",
                    utils::format_relative_path(&file_path),
                    e
                );
                continue;
            }
        };
        match utils::extract_id_from_path(&file_path, "customer") {
            Ok(id) => customer.id = id,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        }
        customers.push(customer);
    }

    Ok(customers)
}

pub fn load_tickets() -> Result<Vec<Ticket>> {
    let dir = tickets_dir();
    let mut tickets = Vec::new();

    for file in utils::find_markdown_files(&dir)? {
        let file_path = dir.join(&file);
        let content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "Failed to read ticket record {}: {}",
                    utils::format_relative_path(&file_path),
                    e
                );
                continue;
            }
        };
        let mut ticket = match parse_ticket_content(&content) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed ticket record {}: {}",
                    utils::format_relative_path(&file_path),
                    e
                );
                continue;
            }
        };
        match utils::extract_id_from_path(&file_path, "ticket") {
            Ok(id) => ticket.id = id,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        }
        tickets.push(ticket);
    }

    Ok(tickets)
}

pub fn save_customer(customer: &Customer) -> Result<PathBuf> {
    let mut lines = vec![
        "---".to_string(),
        format!("id: {}", customer.id),
        format!("first-name: {}", customer.first_name),
        format!("last-name: {}", customer.last_name),
        format!("email: {}", customer.email),
        format!("phone: {}", customer.phone),
        format!("address1: {}", customer.address1),
    ];

    if let Some(ref address2) = customer.address2 {
        lines.push(format!("address2: {}", address2));
    }

    lines.push(format!("city: {}", customer.city));
    lines.push(format!("state: {}", customer.state));
    lines.push(format!("zip: {}", customer.zip));
    lines.push(format!("active: {}", customer.active));
    lines.push(format!("created: {}", customer.created));
    lines.push(format!("updated: {}", customer.updated));
    lines.push("---".to_string());

    let frontmatter = lines.join("\n");
    let content = match customer.notes {
        Some(ref notes) => format!("{}\n{}\n", frontmatter, notes),
        None => format!("{}\n", frontmatter),
    };

    let file_path = customer_path(customer.id);
    utils::ensure_parent_dir(&file_path)?;
    fs::write(&file_path, &content).map_err(|e| {
        ShopdeskError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to write customer record at {}: {}",
                utils::format_relative_path(&file_path),
                e
            ),
        ))
    })?;

    Ok(file_path)
}

pub fn save_ticket(ticket: &Ticket) -> Result<PathBuf> {
    let frontmatter_lines = vec![
        "---".to_string(),
        format!("id: {}", ticket.id),
        format!("customer: {}", ticket.customer_id),
        format!("completed: {}", ticket.completed),
        format!("tech: {}", ticket.tech),
        format!("created: {}", ticket.created),
        format!("updated: {}", ticket.updated),
        "---".to_string(),
    ];

    let frontmatter = frontmatter_lines.join("\n");

    let mut sections = vec![format!("# {}", ticket.title)];
    if let Some(ref description) = ticket.description {
        sections.push(format!("\n{}", description));
    }
    let body = sections.join("\n");

    let content = format!("{}\n{}\n", frontmatter, body);

    let file_path = ticket_path(ticket.id);
    utils::ensure_parent_dir(&file_path)?;
    fs::write(&file_path, &content).map_err(|e| {
        ShopdeskError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to write ticket record at {}: {}",
                utils::format_relative_path(&file_path),
                e
            ),
        ))
    })?;

    Ok(file_path)
}

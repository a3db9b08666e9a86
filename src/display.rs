//! CLI rendering: grid tables, page footers, and record detail blocks.
//!
//! Colors are applied only when stdout is a terminal, so piped output
//! stays plain.

use owo_colors::{OwoColorize, Stream};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::grid::{
    Column, CustomerTone, GridView, TicketTone, customer_tone, format_date, ticket_tone,
};
use crate::types::{Customer, Ticket, TicketRow, UNASSIGNED_TECH};

pub const NO_RESULTS: &str = "No results found";

/// Display label for a technician address.
pub fn tech_label(tech: &str) -> &str {
    if tech == UNASSIGNED_TECH { "UNASSIGNED" } else { tech }
}

fn green(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
}

fn red(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
}

fn yellow(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
}

fn bold(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
}

fn grid_table<R>(
    view: &GridView<R>,
    columns: &[Column<R>],
    paint: impl Fn(&R, String) -> String,
) -> String
where
    R: Clone,
{
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.header.to_string()));
    for row in &view.page_rows {
        builder.push_record(columns.iter().map(|c| paint(row, c.display_value(row))));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_ticket_grid(view: &GridView<TicketRow>, columns: &[Column<TicketRow>]) -> String {
    grid_table(view, columns, |row, text| match ticket_tone(row) {
        TicketTone::Completed => green(&text),
        TicketTone::Unassigned => red(&text),
        TicketTone::InProgress => yellow(&text),
    })
}

pub fn render_customer_grid(view: &GridView<Customer>, columns: &[Column<Customer>]) -> String {
    grid_table(view, columns, |customer, text| match customer_tone(customer) {
        CustomerTone::Active => green(&text),
        CustomerTone::Inactive => red(&text),
    })
}

/// The pagination footer line, 1-based for humans.
pub fn page_summary<R>(view: &GridView<R>) -> String {
    let noun = if view.filtered_count == 1 {
        "result"
    } else {
        "total results"
    };
    format!(
        "Page {} of {} ({} {})",
        view.page_index + 1,
        view.page_count,
        view.filtered_count,
        noun
    )
}

pub fn format_ticket_detail(ticket: &Ticket, customer: Option<&Customer>) -> String {
    let row = TicketRow::from_join(ticket, customer);
    let status_label = if ticket.completed { "COMPLETE" } else { "OPEN" };
    let colored_status = match ticket_tone(&row) {
        TicketTone::Completed => green(status_label),
        TicketTone::Unassigned => red(status_label),
        TicketTone::InProgress => yellow(status_label),
    };

    let mut output = vec![
        bold(&format!("{}, ID: {}", ticket.title, ticket.id)),
        format!("Status: {}", colored_status),
        format!(
            "Customer: {}",
            customer.map(|c| c.full_name()).unwrap_or_default()
        ),
        format!("Technician: {}", tech_label(&ticket.tech)),
        format!(
            "Created: {}  Updated: {}",
            format_date(&ticket.created),
            format_date(&ticket.updated)
        ),
    ];

    if let Some(ref description) = ticket.description {
        output.push(String::new());
        output.push(format!("Description: {}", description));
    }

    output.join("\n")
}

pub fn format_customer_detail(customer: &Customer) -> String {
    let status = match customer_tone(customer) {
        CustomerTone::Active => green("Active"),
        CustomerTone::Inactive => red("Inactive"),
    };

    let address = match customer.address2 {
        Some(ref address2) => format!("{}, {}", customer.address1, address2),
        None => customer.address1.clone(),
    };

    let mut output = vec![
        bold(&format!("{}, ID: {}", customer.full_name(), customer.id)),
        format!("Status: {}", status),
        format!("Email: {}", customer.email),
        format!("Phone: {}", customer.phone),
        format!("Address: {}", address),
        format!(
            "{}, {} {}",
            customer.city, customer.state, customer.zip
        ),
        format!(
            "Created: {}  Updated: {}",
            format_date(&customer.created),
            format_date(&customer.updated)
        ),
    ];

    if let Some(ref notes) = customer.notes {
        output.push(String::new());
        output.push(format!("Notes: {}", notes));
    }

    output.join("\n")
}

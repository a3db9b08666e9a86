use jiff::Timestamp;

use crate::types::{Customer, TicketRow};

/// How a column pulls a value out of a row.
///
/// Text columns filter and sort on the string as-is. Date columns display
/// and filter on the `DD/MM/YYYY` rendering but sort on the underlying
/// timestamp. Status columns render a completion flag as `COMPLETE`/`OPEN`.
pub enum CellAccessor<R> {
    Text(fn(&R) -> String),
    Date(fn(&R) -> &str),
    Status(fn(&R) -> bool),
}

pub struct Column<R> {
    pub id: &'static str,
    pub header: &'static str,
    pub width: Option<u16>,
    pub sortable: bool,
    pub filterable: bool,
    pub accessor: CellAccessor<R>,
}

/// Sort key for a cell. Within one column every key is the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    Time(Timestamp),
}

impl<R> Column<R> {
    /// The derived display value. Filtering and faceting both run on this,
    /// so a date column matches filter text like "03/2024" and a status
    /// column matches "open".
    pub fn display_value(&self, row: &R) -> String {
        match self.accessor {
            CellAccessor::Text(get) => get(row),
            CellAccessor::Date(get) => format_date(get(row)),
            CellAccessor::Status(get) => {
                if get(row) { "COMPLETE" } else { "OPEN" }.to_string()
            }
        }
    }

    pub fn sort_key(&self, row: &R) -> SortKey {
        match self.accessor {
            CellAccessor::Date(get) => SortKey::Time(parse_timestamp(get(row))),
            _ => SortKey::Text(self.display_value(row)),
        }
    }
}

fn parse_timestamp(raw: &str) -> Timestamp {
    raw.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

/// Render a stored RFC 3339 timestamp as a short `DD/MM/YYYY` date.
/// An unparseable value falls through unchanged.
pub fn format_date(raw: &str) -> String {
    match raw.parse::<Timestamp>() {
        Ok(ts) => ts.strftime("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn ticket_created(row: &TicketRow) -> &str {
    &row.created
}

/// The curated ticket listing columns, in display order.
pub fn ticket_columns() -> Vec<Column<TicketRow>> {
    vec![
        Column {
            id: "id",
            header: "Id",
            width: Some(6),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|row: &TicketRow| row.id.to_string()),
        },
        Column {
            id: "title",
            header: "Title",
            width: Some(28),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|row: &TicketRow| row.title.clone()),
        },
        Column {
            id: "date",
            header: "Date",
            width: Some(12),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Date(ticket_created),
        },
        Column {
            id: "first-name",
            header: "First Name",
            width: Some(12),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|row: &TicketRow| {
                row.first_name.clone().unwrap_or_default()
            }),
        },
        Column {
            id: "last-name",
            header: "Last Name",
            width: Some(12),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|row: &TicketRow| {
                row.last_name.clone().unwrap_or_default()
            }),
        },
        Column {
            id: "tech",
            header: "Tech",
            width: Some(24),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|row: &TicketRow| row.tech.clone()),
        },
        Column {
            id: "status",
            header: "Status",
            width: Some(10),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Status(|row: &TicketRow| row.completed),
        },
    ]
}

/// The curated customer listing columns, in display order.
pub fn customer_columns() -> Vec<Column<Customer>> {
    vec![
        Column {
            id: "first-name",
            header: "First Name",
            width: Some(12),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.first_name.clone()),
        },
        Column {
            id: "last-name",
            header: "Last Name",
            width: Some(12),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.last_name.clone()),
        },
        Column {
            id: "email",
            header: "Email",
            width: Some(24),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.email.clone()),
        },
        Column {
            id: "phone",
            header: "Phone",
            width: Some(14),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.phone.clone()),
        },
        Column {
            id: "address1",
            header: "Address",
            width: Some(22),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.address1.clone()),
        },
        Column {
            id: "city",
            header: "City",
            width: Some(14),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.city.clone()),
        },
        Column {
            id: "state",
            header: "State",
            width: Some(6),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.state.clone()),
        },
        Column {
            id: "zip",
            header: "Zip",
            width: Some(7),
            sortable: true,
            filterable: true,
            accessor: CellAccessor::Text(|customer: &Customer| customer.zip.clone()),
        },
    ]
}

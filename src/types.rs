use serde::{Deserialize, Serialize};

pub const SHOPDESK_DIR: &str = ".shopdesk";

/// Technician address reserved for tickets nobody has picked up yet.
pub const UNASSIGNED_TECH: &str = "new-ticket@example.com";

/// Customer id used by forms for a record that has not been persisted.
pub const NEW_CUSTOMER_ID: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub active: bool,
    /// RFC 3339, assigned on insert.
    pub created: String,
    /// RFC 3339, refreshed on every write.
    pub updated: String,
}

impl Customer {
    /// "First Last", the form names are matched against in searches.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub customer_id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub tech: String,
    pub created: String,
    pub updated: String,
}

impl Ticket {
    pub fn is_unassigned(&self) -> bool {
        self.tech == UNASSIGNED_TECH
    }
}

/// One ticket grid row: the ticket joined with its customer's name.
///
/// The customer side is optional so a ticket whose customer file has gone
/// missing still lists (the join is a left join, not a constraint check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRow {
    pub id: u32,
    pub customer_id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub tech: String,
    pub created: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl TicketRow {
    pub fn from_join(ticket: &Ticket, customer: Option<&Customer>) -> Self {
        TicketRow {
            id: ticket.id,
            customer_id: ticket.customer_id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            completed: ticket.completed,
            tech: ticket.tech.clone(),
            created: ticket.created.clone(),
            first_name: customer.map(|c| c.first_name.clone()),
            last_name: customer.map(|c| c.last_name.clone()),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.tech == UNASSIGNED_TECH
    }
}

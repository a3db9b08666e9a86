//! Record store: customers and tickets.
//!
//! `ShopStore` is an in-memory snapshot of the record files, loaded fresh
//! per command. The pure query methods live here so they can be tested
//! without touching the filesystem; disk round-tripping lives in
//! [`repository`].

pub mod repository;

use jiff::Timestamp;

use crate::error::Result;
use crate::query;
use crate::types::{Customer, Ticket, TicketRow};

#[derive(Debug, Clone, Default)]
pub struct ShopStore {
    customers: Vec<Customer>,
    tickets: Vec<Ticket>,
}

fn created_key(created: &str) -> Timestamp {
    created.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

impl ShopStore {
    pub fn empty() -> Self {
        ShopStore::default()
    }

    /// Load a snapshot from disk. Records are ordered by id so listings
    /// have a stable fetch order regardless of directory iteration.
    pub fn load() -> Result<Self> {
        let mut customers = repository::load_customers()?;
        let mut tickets = repository::load_tickets()?;
        customers.sort_by_key(|c| c.id);
        tickets.sort_by_key(|t| t.id);
        Ok(ShopStore { customers, tickets })
    }

    pub fn from_records(mut customers: Vec<Customer>, mut tickets: Vec<Ticket>) -> Self {
        customers.sort_by_key(|c| c.id);
        tickets.sort_by_key(|t| t.id);
        ShopStore { customers, tickets }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Get a single customer by exact id.
    pub fn get_customer(&self, id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Get a single ticket by exact id.
    pub fn get_ticket(&self, id: u32) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    fn join(&self, ticket: &Ticket) -> TicketRow {
        TicketRow::from_join(ticket, self.get_customer(ticket.customer_id))
    }

    /// The default listing: tickets not yet completed, oldest first.
    pub fn open_tickets(&self) -> Vec<TicketRow> {
        let mut rows: Vec<TicketRow> = self
            .tickets
            .iter()
            .filter(|t| !t.completed)
            .map(|t| self.join(t))
            .collect();
        rows.sort_by_key(|r| created_key(&r.created));
        rows
    }

    /// All tickets matching the search term, joined with their customers.
    pub fn search_tickets(&self, term: &str) -> Vec<TicketRow> {
        self.tickets
            .iter()
            .filter(|t| query::ticket_matches(t, self.get_customer(t.customer_id), term))
            .map(|t| self.join(t))
            .collect()
    }

    /// All customers matching the search term.
    pub fn search_customers(&self, term: &str) -> Vec<Customer> {
        self.customers
            .iter()
            .filter(|c| query::customer_matches(c, term))
            .cloned()
            .collect()
    }

    /// Is this email already taken by another customer?
    pub fn email_in_use(&self, email: &str, exclude_id: Option<u32>) -> bool {
        self.customers
            .iter()
            .any(|c| c.email == email && Some(c.id) != exclude_id)
    }

    /// Is this phone number already taken by another customer?
    pub fn phone_in_use(&self, phone: &str, exclude_id: Option<u32>) -> bool {
        self.customers
            .iter()
            .any(|c| c.phone == phone && Some(c.id) != exclude_id)
    }

    pub fn next_customer_id(&self) -> u32 {
        self.customers.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn next_ticket_id(&self) -> u32 {
        self.tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}

pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod forms;
pub mod grid;
pub mod parser;
pub mod paths;
pub mod query;
pub mod store;
pub mod tui;
pub mod types;
pub mod utils;

pub use config::{Config, UserConfig};
pub use error::{Result, ShopdeskError};
pub use grid::{
    Column, GridState, GridView, PAGE_SIZE, SortDirection, compute_grid, customer_columns,
    page_index_from_param, ticket_columns,
};
pub use store::ShopStore;
pub use types::{Customer, Ticket, TicketRow, NEW_CUSTOMER_ID, UNASSIGNED_TECH};

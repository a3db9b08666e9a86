//! Interactive grid engine.
//!
//! Turns a fixed in-memory result set into a navigable table: per-column
//! substring filters with faceted suggestions, a three-state sort cycle,
//! and fixed-size page windows with snap-back. All derivation is pure and
//! synchronous; callers re-fetch rows and recompute.

mod column;
mod engine;
mod state;

pub use column::{CellAccessor, Column, SortKey, customer_columns, format_date, ticket_columns};
pub use engine::{
    CustomerTone, GridView, PAGE_SIZE, TicketTone, compute_grid, customer_tone,
    page_index_from_param, ticket_tone,
};
pub use state::{GridState, SortDirection};

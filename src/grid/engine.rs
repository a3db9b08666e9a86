//! Pure grid computation: filter, facet, sort, paginate.
//!
//! Every state change re-derives the whole view from the in-memory row
//! array. Nothing here performs I/O, so the engine is trivially testable
//! and safe to run on every keystroke.

use std::collections::BTreeSet;

use crate::grid::column::Column;
use crate::grid::state::{GridState, SortDirection};
use crate::query::contains_case_insensitive;
use crate::types::{Customer, TicketRow};

pub const PAGE_SIZE: usize = 10;

/// The derived view for one grid render.
#[derive(Debug, Clone)]
pub struct GridView<R> {
    /// Rows visible on the current page, in final display order.
    pub page_rows: Vec<R>,
    /// Page index after any snap-back.
    pub page_index: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    /// Distinct display values of the filtered set, one sorted list per
    /// column (empty for non-filterable columns). Note these are computed
    /// from the already-filtered rows, so a column's own filter narrows
    /// its own suggestion list.
    pub facets: Vec<Vec<String>>,
    /// True when the page index was reset because filtering shrank the
    /// result set below the requested page.
    pub snapped_back: bool,
}

/// Map a 1-based page parameter to a zero-based page index. Missing,
/// non-numeric, zero, or negative values all fall back to the first page.
pub fn page_index_from_param(param: Option<&str>) -> usize {
    match param.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(n)) if n > 0 => (n - 1) as usize,
        _ => 0,
    }
}

pub fn compute_grid<R: Clone>(
    rows: &[R],
    columns: &[Column<R>],
    state: &GridState,
) -> GridView<R> {
    // A row survives iff every filtered column's display value contains
    // that column's filter text, case-insensitively.
    let mut filtered: Vec<&R> = rows
        .iter()
        .filter(|row| {
            columns.iter().all(|column| {
                if !column.filterable {
                    return true;
                }
                let text = state.filter(column.id);
                text.is_empty() || contains_case_insensitive(&column.display_value(row), text)
            })
        })
        .collect();

    let facets: Vec<Vec<String>> = columns
        .iter()
        .map(|column| {
            if !column.filterable {
                return Vec::new();
            }
            let values: BTreeSet<String> = filtered
                .iter()
                .map(|row| column.display_value(row))
                .collect();
            values.into_iter().collect()
        })
        .collect();

    if let Some((column_id, direction)) = &state.sort
        && let Some(column) = columns.iter().find(|c| c.id == column_id && c.sortable)
    {
        let mut keyed: Vec<_> = filtered
            .into_iter()
            .map(|row| (column.sort_key(row), row))
            .collect();
        keyed.sort_by(|a, b| {
            let ordering = a.0.cmp(&b.0);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        filtered = keyed.into_iter().map(|(_, row)| row).collect();
    }

    let filtered_count = filtered.len();
    let page_count = filtered_count.div_ceil(PAGE_SIZE);

    // Snap back to the first page when filtering leaves the current page
    // out of range, so the user never stares at an empty page.
    let page_index = if page_count <= state.page_index && state.page_index != 0 {
        0
    } else {
        state.page_index
    };
    let snapped_back = page_index != state.page_index;

    let page_rows = filtered
        .iter()
        .skip(page_index * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|row| (*row).clone())
        .collect();

    GridView {
        page_rows,
        page_index,
        page_count,
        filtered_count,
        facets,
        snapped_back,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketTone {
    Completed,
    Unassigned,
    InProgress,
}

/// Row classification for the ticket grid. Completion wins over the
/// unassigned sentinel.
pub fn ticket_tone(row: &TicketRow) -> TicketTone {
    if row.completed {
        TicketTone::Completed
    } else if row.is_unassigned() {
        TicketTone::Unassigned
    } else {
        TicketTone::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerTone {
    Active,
    Inactive,
}

pub fn customer_tone(customer: &Customer) -> CustomerTone {
    if customer.active {
        CustomerTone::Active
    } else {
        CustomerTone::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::column::{CellAccessor, ticket_columns};
    use crate::types::{Ticket, UNASSIGNED_TECH};

    fn make_customer(active: bool) -> Customer {
        Customer {
            id: 4,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: "555-010-0040".to_string(),
            address1: "4 Maplewood Avenue".to_string(),
            address2: None,
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            notes: None,
            active,
            created: "2024-01-04T09:00:00Z".to_string(),
            updated: "2024-01-04T09:00:00Z".to_string(),
        }
    }

    fn make_row(id: u32, title: &str, created: &str, tech: &str, completed: bool) -> TicketRow {
        let ticket = Ticket {
            id,
            customer_id: 1,
            title: title.to_string(),
            description: None,
            completed,
            tech: tech.to_string(),
            created: created.to_string(),
            updated: created.to_string(),
        };
        TicketRow::from_join(&ticket, None)
    }

    /// 25 rows with increasing created timestamps. The first five belong
    /// to alice, the rest to bob.
    fn many_rows() -> Vec<TicketRow> {
        (1..=25)
            .map(|n| {
                let tech = if n <= 5 { "alice@shop.test" } else { "bob@shop.test" };
                make_row(
                    n,
                    &format!("Ticket {n:02}"),
                    &format!("2024-01-{:02}T08:00:00Z", n),
                    tech,
                    false,
                )
            })
            .collect()
    }

    #[test]
    fn test_filter_matches_display_substring() {
        let rows = vec![
            make_row(1, "One", "2024-01-01T00:00:00Z", "a@x.com", false),
            make_row(2, "Two", "2024-01-02T00:00:00Z", "b@x.com", false),
            make_row(3, "Three", "2024-01-03T00:00:00Z", UNASSIGNED_TECH, false),
        ];
        let columns = ticket_columns();
        let mut state = GridState::default();
        state.set_filter("tech", "new-ticket");

        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.page_rows[0].id, 3);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let rows = vec![
            make_row(1, "Screen repair", "2024-01-01T00:00:00Z", "a@x.com", false),
            make_row(2, "Screen repair", "2024-01-02T00:00:00Z", "b@x.com", false),
            make_row(3, "Battery", "2024-01-03T00:00:00Z", "a@x.com", false),
        ];
        let columns = ticket_columns();
        let mut state = GridState::default();
        state.set_filter("title", "screen");
        state.set_filter("tech", "a@");

        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.page_rows[0].id, 1);
    }

    #[test]
    fn test_unknown_filter_id_is_ignored() {
        let rows = many_rows();
        let columns = ticket_columns();
        let mut state = GridState::default();
        state.set_filter("bogus", "zzz");

        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.filtered_count, 25);
    }

    #[test]
    fn test_sort_uses_underlying_timestamp_not_display_string() {
        // Display strings would order 02/01/2024 before 15/06/2023.
        let rows = vec![
            make_row(1, "A", "2024-01-02T00:00:00Z", "t@x.com", false),
            make_row(2, "B", "2023-06-15T00:00:00Z", "t@x.com", false),
            make_row(3, "C", "2024-02-28T00:00:00Z", "t@x.com", false),
        ];
        let columns = ticket_columns();
        let state = GridState::ticket_defaults();

        let view = compute_grid(&rows, &columns, &state);
        let ids: Vec<u32> = view.page_rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_cycle_descending_then_back_to_fetch_order() {
        let rows = vec![
            make_row(1, "A", "2024-01-02T00:00:00Z", "t@x.com", false),
            make_row(2, "B", "2023-06-15T00:00:00Z", "t@x.com", false),
            make_row(3, "C", "2024-02-28T00:00:00Z", "t@x.com", false),
        ];
        let columns = ticket_columns();
        let mut state = GridState::default();

        state.toggle_sort("date");
        state.toggle_sort("date");
        let view = compute_grid(&rows, &columns, &state);
        let ids: Vec<u32> = view.page_rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        state.toggle_sort("date");
        let view = compute_grid(&rows, &columns, &state);
        let ids: Vec<u32> = view.page_rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_page_windows() {
        let rows = many_rows();
        let columns = ticket_columns();

        let view = compute_grid(&rows, &columns, &GridState::default());
        assert_eq!(view.page_count, 3);
        assert_eq!(view.page_rows.len(), 10);
        assert_eq!(view.page_rows[0].id, 1);

        let view = compute_grid(&rows, &columns, &GridState::default().with_page(2));
        assert_eq!(view.page_rows.len(), 5);
        assert_eq!(view.page_rows[0].id, 21);
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let columns = ticket_columns();
        let state = GridState::default();

        assert_eq!(compute_grid(&many_rows()[..10], &columns, &state).page_count, 1);
        assert_eq!(compute_grid(&many_rows()[..11], &columns, &state).page_count, 2);
        assert_eq!(compute_grid(&[], &columns, &state).page_count, 0);
    }

    #[test]
    fn test_filter_shrink_snaps_back_to_first_page() {
        let rows = many_rows();
        let columns = ticket_columns();
        let mut state = GridState::default().with_page(2);
        state.set_filter("tech", "alice");

        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.filtered_count, 5);
        assert_eq!(view.page_index, 0);
        assert!(view.snapped_back);
        assert_eq!(view.page_rows.len(), 5);
    }

    #[test]
    fn test_no_snap_back_when_already_on_first_page() {
        let rows = many_rows();
        let columns = ticket_columns();
        let mut state = GridState::default();
        state.set_filter("title", "no such ticket");

        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.page_index, 0);
        assert!(!view.snapped_back);
        assert!(view.page_rows.is_empty());
    }

    #[test]
    fn test_facets_are_distinct_and_sorted() {
        let rows = vec![
            make_row(1, "B", "2024-01-01T00:00:00Z", "b@x.com", false),
            make_row(2, "A", "2024-01-02T00:00:00Z", "a@x.com", false),
            make_row(3, "C", "2024-01-03T00:00:00Z", "b@x.com", false),
        ];
        let columns = ticket_columns();
        let view = compute_grid(&rows, &columns, &GridState::default());

        let tech_index = columns.iter().position(|c| c.id == "tech").unwrap();
        assert_eq!(view.facets[tech_index], vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_facets_reflect_already_filtered_rows() {
        let rows = vec![
            make_row(1, "Screen", "2024-01-01T00:00:00Z", "a@x.com", false),
            make_row(2, "Screen", "2024-01-02T00:00:00Z", "b@x.com", true),
            make_row(3, "Battery", "2024-01-03T00:00:00Z", "c@x.com", true),
        ];
        let columns = ticket_columns();
        let tech_index = columns.iter().position(|c| c.id == "tech").unwrap();

        // Another column's filter narrows this column's suggestions.
        let mut state = GridState::default();
        state.set_filter("status", "complete");
        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.facets[tech_index], vec!["b@x.com", "c@x.com"]);

        // A column's own filter narrows its own suggestions too.
        let mut state = GridState::default();
        state.set_filter("tech", "a@");
        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.facets[tech_index], vec!["a@x.com"]);
    }

    #[test]
    fn test_column_flags_are_honored() {
        let columns = vec![
            Column {
                id: "title",
                header: "Title",
                width: None,
                sortable: false,
                filterable: false,
                accessor: CellAccessor::Text(|row: &TicketRow| row.title.clone()),
            },
        ];
        let rows = vec![
            make_row(1, "B", "2024-01-01T00:00:00Z", "t@x.com", false),
            make_row(2, "A", "2024-01-02T00:00:00Z", "t@x.com", false),
        ];

        let mut state = GridState::default();
        state.set_filter("title", "A");
        state.toggle_sort("title");

        let view = compute_grid(&rows, &columns, &state);
        assert_eq!(view.filtered_count, 2, "non-filterable column keeps all rows");
        let ids: Vec<u32> = view.page_rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2], "non-sortable column keeps fetch order");
        assert!(view.facets[0].is_empty());
    }

    #[test]
    fn test_page_index_from_param() {
        assert_eq!(page_index_from_param(None), 0);
        assert_eq!(page_index_from_param(Some("1")), 0);
        assert_eq!(page_index_from_param(Some("3")), 2);
        assert_eq!(page_index_from_param(Some(" 2 ")), 1);
        assert_eq!(page_index_from_param(Some("0")), 0);
        assert_eq!(page_index_from_param(Some("-2")), 0);
        assert_eq!(page_index_from_param(Some("abc")), 0);
    }

    #[test]
    fn test_ticket_tone_precedence() {
        let completed_unassigned = make_row(1, "T", "2024-01-01T00:00:00Z", UNASSIGNED_TECH, true);
        assert_eq!(ticket_tone(&completed_unassigned), TicketTone::Completed);

        let unassigned = make_row(2, "T", "2024-01-01T00:00:00Z", UNASSIGNED_TECH, false);
        assert_eq!(ticket_tone(&unassigned), TicketTone::Unassigned);

        let in_progress = make_row(3, "T", "2024-01-01T00:00:00Z", "t@x.com", false);
        assert_eq!(ticket_tone(&in_progress), TicketTone::InProgress);
    }

    #[test]
    fn test_customer_tone_follows_active_flag() {
        assert_eq!(customer_tone(&make_customer(true)), CustomerTone::Active);
        assert_eq!(customer_tone(&make_customer(false)), CustomerTone::Inactive);
    }

    #[test]
    fn test_same_state_recomputes_identical_view() {
        let rows = many_rows();
        let columns = ticket_columns();
        let mut state = GridState::default().with_page(1);
        state.set_filter("tech", "bob");
        state.toggle_sort("date");
        state.toggle_sort("date");

        let first = compute_grid(&rows, &columns, &state);
        let second = compute_grid(&rows, &columns, &state);

        let ids = |view: &GridView<TicketRow>| -> Vec<u32> {
            view.page_rows.iter().map(|r| r.id).collect()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.page_index, second.page_index);
        assert_eq!(first.page_count, second.page_count);
        assert_eq!(first.filtered_count, second.filtered_count);
        assert_eq!(first.facets, second.facets);
    }
}

//! The grid browser component.
//!
//! Wraps the pure grid engine in an interactive full-screen view: two
//! tabs (tickets and customers), a column cursor for sort and filter
//! keys, faceted filter suggestions, page navigation, and a background
//! refresh timer that stays quiet while a search term is active.

use std::time::Duration;

use iocraft::prelude::*;

use crate::config::Config;
use crate::display::tech_label;
use crate::grid::{
    Column, GridState, GridView, SortDirection, compute_grid, customer_columns, customer_tone,
    format_date, ticket_columns, ticket_tone,
};
use crate::store::ShopStore;
use crate::tui::model::{BrowseState, Effect, GridBounds, Mode, Tab, action_for_key, apply};
use crate::tui::theme::theme;
use crate::types::{Customer, TicketRow};

const NO_RESULTS: &str = "No results found";

/// Pad or truncate a cell to its column width.
fn cell(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

fn column_width<R>(column: &Column<R>) -> usize {
    column.width.unwrap_or(12) as usize
}

/// Everything the renderer needs for one tab, precomputed outside the
/// element tree so both row types flow through the same markup.
struct TableData {
    column_ids: Vec<&'static str>,
    header_cells: Vec<String>,
    filter_cells: Vec<String>,
    /// Padded cell text plus the row's tone color.
    rows: Vec<(Vec<String>, Color)>,
    facets: Vec<Vec<String>>,
    page_index: usize,
    page_count: usize,
    filtered_count: usize,
    snapped_back: bool,
}

fn header_cells<R>(columns: &[Column<R>], state: &GridState) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let marker = match &state.sort {
                Some((id, SortDirection::Ascending)) if id == column.id => " ^",
                Some((id, SortDirection::Descending)) if id == column.id => " v",
                _ => "",
            };
            cell(&format!("{}{}", column.header, marker), column_width(column))
        })
        .collect()
}

fn filter_cells<R>(columns: &[Column<R>], state: &GridState) -> Vec<String> {
    columns
        .iter()
        .map(|column| cell(state.filter(column.id), column_width(column)))
        .collect()
}

fn build_table<R: Clone>(
    rows: &[R],
    columns: &[Column<R>],
    state: &GridState,
    tone: impl Fn(&R) -> Color,
) -> (TableData, GridView<R>) {
    let view = compute_grid(rows, columns, state);

    let table = TableData {
        column_ids: columns.iter().map(|c| c.id).collect(),
        header_cells: header_cells(columns, state),
        filter_cells: filter_cells(columns, state),
        rows: view
            .page_rows
            .iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|column| cell(&column.display_value(row), column_width(column)))
                    .collect();
                (cells, tone(row))
            })
            .collect(),
        facets: view.facets.clone(),
        page_index: view.page_index,
        page_count: view.page_count,
        filtered_count: view.filtered_count,
        snapped_back: view.snapped_back,
    };

    (table, view)
}

fn ticket_detail_lines(row: &TicketRow) -> Vec<String> {
    let name = match (&row.first_name, &row.last_name) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        _ => String::new(),
    };
    let mut lines = vec![
        format!("{}, ID: {}", row.title, row.id),
        format!("Status: {}", if row.completed { "COMPLETE" } else { "OPEN" }),
        format!("Customer: {} (id {})", name, row.customer_id),
        format!("Technician: {}", tech_label(&row.tech)),
        format!("Created: {}", format_date(&row.created)),
    ];
    if let Some(ref description) = row.description {
        lines.push(String::new());
        lines.push(format!("Description: {}", description));
    }
    lines.push(String::new());
    lines.push(format!("Edit with: shopdesk tickets edit {}", row.id));
    lines
}

fn customer_detail_lines(customer: &Customer) -> Vec<String> {
    vec![
        format!("{}, ID: {}", customer.full_name(), customer.id),
        format!(
            "Status: {}",
            if customer.active { "Active" } else { "Inactive" }
        ),
        format!("Email: {}", customer.email),
        format!("Phone: {}", customer.phone),
        format!(
            "{}, {}, {} {}",
            customer.address1, customer.city, customer.state, customer.zip
        ),
        String::new(),
        format!("Edit with: shopdesk customers edit {}", customer.id),
    ]
}

#[derive(Default, Props)]
pub struct BrowseGridProps {
    pub tab: Tab,
    pub term: String,
}

#[component]
pub fn BrowseGrid<'a>(props: &BrowseGridProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let config = hooks.use_state(|| Config::load().unwrap_or_default());
    let mut browse: State<BrowseState> =
        hooks.use_state(|| BrowseState::new(props.tab, props.term.clone()));
    let ticket_rows: State<Vec<TicketRow>> = hooks.use_state(Vec::new);
    let customer_rows: State<Vec<Customer>> = hooks.use_state(Vec::new);

    // Monotonic request id. A completed load whose id is no longer the
    // latest is stale and gets dropped instead of overwriting newer rows.
    let latest_request: State<u64> = hooks.use_state(|| 0u64);
    let mut loading = hooks.use_state(|| true);
    let mut should_exit = hooks.use_state(|| false);

    let load_handler: Handler<(u64, String)> = hooks.use_async_handler({
        let ticket_setter = ticket_rows;
        let customer_setter = customer_rows;
        let loading_setter = loading;
        let latest = latest_request;

        move |(request_id, term): (u64, String)| {
            let mut ticket_setter = ticket_setter;
            let mut customer_setter = customer_setter;
            let mut loading_setter = loading_setter;
            let latest = latest;

            async move {
                let loaded = ShopStore::load();
                if latest.get() != request_id {
                    return;
                }
                match loaded {
                    Ok(store) => {
                        let tickets = if term.is_empty() {
                            store.open_tickets()
                        } else {
                            store.search_tickets(&term)
                        };
                        // Customers are only listed against a search term.
                        let customers = if term.is_empty() {
                            Vec::new()
                        } else {
                            store.search_customers(&term)
                        };
                        ticket_setter.set(tickets);
                        customer_setter.set(customers);
                    }
                    Err(e) => {
                        tracing::error!("failed to load records: {}", e);
                    }
                }
                loading_setter.set(false);
            }
        }
    });

    let request_load = {
        let load_handler = load_handler.clone();
        let mut latest = latest_request;
        let browse = browse;
        move || {
            let id = latest.get() + 1;
            latest.set(id);
            let term = browse.read().term.clone();
            load_handler.clone()((id, term));
        }
    };

    // Initial fetch on startup.
    let mut fetch_started = hooks.use_state(|| false);
    if !fetch_started.get() {
        fetch_started.set(true);
        request_load.clone()();
    }

    // Background refresh: re-fetch the default listing on the configured
    // interval. A present search term suspends polling entirely.
    hooks.use_future({
        let request_load = request_load.clone();
        let browse = browse;
        let poll_secs = config.read().poll_interval_secs();
        async move {
            loop {
                tokio::time::sleep(Duration::from_secs(poll_secs)).await;
                let quiet = {
                    let state = browse.read();
                    state.term.is_empty() && state.mode == Mode::Grid
                };
                if quiet {
                    request_load.clone()();
                }
            }
        }
    });

    // Derive the visible table for the current tab.
    let state_now = browse.read().clone();
    let (table, selected_ticket, selected_customer) = match state_now.tab {
        Tab::Tickets => {
            let columns = ticket_columns();
            let rows_ref = ticket_rows.read();
            let (table, view) = build_table(&rows_ref, &columns, state_now.grid(), |row| {
                theme.ticket_tone_color(ticket_tone(row))
            });
            let selected = view.page_rows.get(state_now.cursor_row).cloned();
            (table, selected, None)
        }
        Tab::Customers => {
            let columns = customer_columns();
            let rows_ref = customer_rows.read();
            let (table, view) = build_table(&rows_ref, &columns, state_now.grid(), |customer| {
                theme.customer_tone_color(customer_tone(customer))
            });
            let selected = view.page_rows.get(state_now.cursor_row).cloned();
            (table, None, selected)
        }
    };

    // Shell side of the snap-back invariant: when filtering shrank the
    // result set below the stored page, persist the engine's page 0.
    if table.snapped_back {
        let mut state = browse.read().clone();
        state.grid_mut().page_index = 0;
        state.cursor_row = 0;
        browse.set(state);
    }

    let bounds = GridBounds {
        page_len: table.rows.len(),
        col_count: table.column_ids.len(),
        page_count: table.page_count,
    };
    let column_ids = table.column_ids.clone();

    hooks.use_terminal_events({
        let mut browse = browse;
        let request_load = request_load.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                let mode = browse.read().mode;
                if let Some(action) = action_for_key(mode, code) {
                    let mut state = browse.read().clone();
                    let effect = apply(&mut state, action, &bounds, &column_ids);
                    browse.set(state);
                    match effect {
                        Effect::Exit => should_exit.set(true),
                        Effect::Reload => {
                            loading.set(true);
                            request_load.clone()();
                        }
                        Effect::None => {}
                    }
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    // Row cursor can go stale when rows shrink under it.
    if state_now.cursor_row >= table.rows.len() && !table.rows.is_empty() {
        let mut state = browse.read().clone();
        state.cursor_row = table.rows.len() - 1;
        browse.set(state);
    }

    let shop_name = config.read().shop_name.clone();
    let cursor_row = state_now.cursor_row.min(table.rows.len().saturating_sub(1));
    let cursor_col = state_now.cursor_col.min(table.column_ids.len() - 1);

    // Faceted suggestions for the cursor column, shown while filtering.
    let facet_values = table.facets.get(cursor_col).cloned().unwrap_or_default();
    let facet_line = {
        let preview: Vec<&str> = facet_values.iter().map(String::as_str).take(6).collect();
        let noun = if facet_values.len() == 1 { "item" } else { "items" };
        format!(
            "Search ({} {}): {}",
            facet_values.len(),
            noun,
            preview.join(", ")
        )
    };

    let page_line = format!(
        "Page {} of {} ({} {})",
        table.page_index + 1,
        table.page_count,
        table.filtered_count,
        if table.filtered_count == 1 {
            "result"
        } else {
            "total results"
        }
    );

    let term_display = if state_now.term.is_empty() {
        "  / search".to_string()
    } else {
        format!("  search: {}", state_now.term)
    };

    let input_line = match state_now.mode {
        Mode::Search => Some(format!("Search term: {}_", state_now.input)),
        Mode::Filter => Some(format!(
            "Filter [{}]: {}_",
            table.column_ids[cursor_col], state_now.input
        )),
        _ => None,
    };

    let detail_lines: Vec<String> = if state_now.mode == Mode::Detail {
        match (&selected_ticket, &selected_customer) {
            (Some(row), _) => ticket_detail_lines(row),
            (_, Some(customer)) => customer_detail_lines(customer),
            _ => Vec::new(),
        }
    } else {
        Vec::new()
    };

    let empty_line = if loading.get() {
        Some("Loading...".to_string())
    } else if table.filtered_count == 0 {
        if state_now.tab == Tab::Customers && state_now.term.is_empty() {
            Some("Enter a search term (/) to list customers.".to_string())
        } else {
            Some(NO_RESULTS.to_string())
        }
    } else {
        None
    };

    let tab_text = {
        let current = state_now.tab;
        let other = current.other();
        match current {
            Tab::Tickets => format!("[{}]  {}", current.label(), other.label()),
            Tab::Customers => format!("{}  [{}]", other.label(), current.label()),
        }
    };

    let shortcuts = match state_now.mode {
        Mode::Grid => "[j/k] Row  [h/l] Column  [[/]] Page  [s] Sort  [f] Filter  [/] Search  [Tab] Switch  [Enter] Open  [r] Refresh  [R] Reset  [q] Quit",
        Mode::Search | Mode::Filter => "[Enter] Apply  [Esc] Cancel",
        Mode::Detail => "[Esc] Back",
    };

    let showing_detail = state_now.mode == Mode::Detail;
    let showing_grid = !showing_detail && empty_line.is_none();
    let header_row = table.header_cells.clone();
    let filter_row = table.filter_cells.clone();
    let body_rows = table.rows;

    element! {
        View(
            width: width,
            height: height,
            flex_direction: FlexDirection::Column,
            padding: 1,
        ) {
            View(flex_direction: FlexDirection::Row, column_gap: 2) {
                Text(content: shop_name, color: theme.header, weight: Weight::Bold)
                Text(content: tab_text, color: theme.highlight)
                Text(content: term_display, color: theme.text_dimmed)
            }

            #(input_line.map(|line| element! {
                View(border_style: BorderStyle::Round, border_color: theme.border_focused) {
                    Text(content: line, color: theme.text)
                }
            }))

            #(empty_line.map(|line| element! {
                View(padding: 1) {
                    Text(content: line, color: theme.text_dimmed)
                }
            }))

            #(showing_detail.then(|| element! {
                View(
                    flex_direction: FlexDirection::Column,
                    border_style: BorderStyle::Round,
                    border_color: theme.border_focused,
                    padding: 1,
                ) {
                    #(detail_lines.into_iter().map(|line| element! {
                        Text(content: line, color: theme.text)
                    }))
                }
            }))

            #(showing_grid.then(|| element! {
                View(flex_direction: FlexDirection::Column) {
                    View(flex_direction: FlexDirection::Row) {
                        #(header_row.into_iter().enumerate().map(|(i, text)| {
                            let color = if i == cursor_col { theme.highlight } else { theme.header };
                            element! {
                                Text(content: text, color: color, weight: Weight::Bold)
                            }
                        }))
                    }
                    View(flex_direction: FlexDirection::Row) {
                        #(filter_row.into_iter().enumerate().map(|(i, text)| {
                            let color = if i == cursor_col { theme.highlight } else { theme.text_dimmed };
                            element! {
                                Text(content: text, color: color)
                            }
                        }))
                    }
                    #(body_rows.into_iter().enumerate().map(|(row_index, (cells, tone))| {
                        let selected = row_index == cursor_row;
                        element! {
                            View(
                                flex_direction: FlexDirection::Row,
                                background_color: if selected { theme.border } else { Color::Reset },
                            ) {
                                #(cells.into_iter().map(|text| element! {
                                    Text(content: text, color: tone)
                                }))
                            }
                        }
                    }))
                }
            }))

            View(flex_grow: 1.0)

            #((!showing_detail).then(|| element! {
                Text(content: facet_line, color: theme.text_dimmed)
            }))
            View(flex_direction: FlexDirection::Row, column_gap: 2) {
                Text(content: page_line, color: theme.text)
                Text(content: shortcuts, color: theme.text_dimmed)
            }
        }
    }
}

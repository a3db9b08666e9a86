//! Browse model types for testable state management.
//!
//! State and key handling live here, separated from the iocraft
//! component, so the navigation and mode logic can be unit tested
//! without a terminal.

use iocraft::prelude::KeyCode;

use crate::grid::GridState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Tickets,
    Customers,
}

impl Tab {
    pub fn other(self) -> Tab {
        match self {
            Tab::Tickets => Tab::Customers,
            Tab::Customers => Tab::Tickets,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Tickets => "Tickets",
            Tab::Customers => "Customers",
        }
    }
}

/// Input focus for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Grid navigation keys are live.
    #[default]
    Grid,
    /// Typing edits the search term.
    Search,
    /// Typing edits the cursor column's filter.
    Filter,
    /// A row detail pane is open.
    Detail,
}

#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    pub tab: Tab,
    pub mode: Mode,
    /// The applied search term. Non-empty suspends background refresh.
    pub term: String,
    /// Text being edited while in Search or Filter mode.
    pub input: String,
    /// Row cursor within the current page.
    pub cursor_row: usize,
    /// Column cursor, shared by sort and filter keys.
    pub cursor_col: usize,
    pub ticket_grid: GridState,
    pub customer_grid: GridState,
}

impl BrowseState {
    pub fn new(tab: Tab, term: String) -> Self {
        BrowseState {
            tab,
            term,
            ticket_grid: GridState::ticket_defaults(),
            customer_grid: GridState::customer_defaults(),
            ..BrowseState::default()
        }
    }

    pub fn grid(&self) -> &GridState {
        match self.tab {
            Tab::Tickets => &self.ticket_grid,
            Tab::Customers => &self.customer_grid,
        }
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        match self.tab {
            Tab::Tickets => &mut self.ticket_grid,
            Tab::Customers => &mut self.customer_grid,
        }
    }
}

/// All possible actions on the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    Quit,
    Refresh,
    SwitchTab,
    RowDown,
    RowUp,
    ColRight,
    ColLeft,
    PageNext,
    PagePrev,
    ToggleSort,
    StartFilter,
    StartSearch,
    OpenDetail,
    CloseDetail,
    ResetGrid,
    InputChar(char),
    InputBackspace,
    InputSubmit,
    InputCancel,
}

/// What the component must do after applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Exit,
    /// Re-fetch rows from the store (new search term or manual refresh).
    Reload,
}

/// Current grid dimensions, needed to clamp cursor movement.
#[derive(Debug, Clone, Copy)]
pub struct GridBounds {
    pub page_len: usize,
    pub col_count: usize,
    pub page_count: usize,
}

/// Map a key press to an action for the current mode.
pub fn action_for_key(mode: Mode, code: KeyCode) -> Option<BrowseAction> {
    match mode {
        Mode::Grid => match code {
            KeyCode::Char('q') => Some(BrowseAction::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(BrowseAction::RowDown),
            KeyCode::Char('k') | KeyCode::Up => Some(BrowseAction::RowUp),
            KeyCode::Char('l') | KeyCode::Right => Some(BrowseAction::ColRight),
            KeyCode::Char('h') | KeyCode::Left => Some(BrowseAction::ColLeft),
            KeyCode::Char(']') | KeyCode::Char('n') => Some(BrowseAction::PageNext),
            KeyCode::Char('[') | KeyCode::Char('p') => Some(BrowseAction::PagePrev),
            KeyCode::Char('s') => Some(BrowseAction::ToggleSort),
            KeyCode::Char('f') => Some(BrowseAction::StartFilter),
            KeyCode::Char('/') => Some(BrowseAction::StartSearch),
            KeyCode::Char('r') => Some(BrowseAction::Refresh),
            KeyCode::Char('R') => Some(BrowseAction::ResetGrid),
            KeyCode::Tab => Some(BrowseAction::SwitchTab),
            KeyCode::Enter => Some(BrowseAction::OpenDetail),
            _ => None,
        },
        Mode::Search | Mode::Filter => match code {
            KeyCode::Enter => Some(BrowseAction::InputSubmit),
            KeyCode::Esc => Some(BrowseAction::InputCancel),
            KeyCode::Backspace => Some(BrowseAction::InputBackspace),
            KeyCode::Char(c) => Some(BrowseAction::InputChar(c)),
            _ => None,
        },
        Mode::Detail => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(BrowseAction::CloseDetail),
            _ => None,
        },
    }
}

/// Apply an action to the state, returning what the component must do.
pub fn apply(
    state: &mut BrowseState,
    action: BrowseAction,
    bounds: &GridBounds,
    column_ids: &[&str],
) -> Effect {
    match action {
        BrowseAction::Quit => return Effect::Exit,
        BrowseAction::Refresh => return Effect::Reload,

        BrowseAction::SwitchTab => {
            state.tab = state.tab.other();
            state.cursor_row = 0;
            state.cursor_col = 0;
        }

        BrowseAction::RowDown => {
            if state.cursor_row + 1 < bounds.page_len {
                state.cursor_row += 1;
            }
        }
        BrowseAction::RowUp => {
            state.cursor_row = state.cursor_row.saturating_sub(1);
        }
        BrowseAction::ColRight => {
            if state.cursor_col + 1 < bounds.col_count {
                state.cursor_col += 1;
            }
        }
        BrowseAction::ColLeft => {
            state.cursor_col = state.cursor_col.saturating_sub(1);
        }

        BrowseAction::PageNext => {
            let grid = state.grid_mut();
            if grid.page_index + 1 < bounds.page_count {
                grid.page_index += 1;
                state.cursor_row = 0;
            }
        }
        BrowseAction::PagePrev => {
            let grid = state.grid_mut();
            if grid.page_index > 0 {
                grid.page_index -= 1;
                state.cursor_row = 0;
            }
        }

        BrowseAction::ToggleSort => {
            if let Some(column_id) = column_ids.get(state.cursor_col) {
                let column_id = column_id.to_string();
                state.grid_mut().toggle_sort(&column_id);
            }
        }

        BrowseAction::StartFilter => {
            if let Some(column_id) = column_ids.get(state.cursor_col) {
                state.input = state.grid().filter(column_id).to_string();
                state.mode = Mode::Filter;
            }
        }
        BrowseAction::StartSearch => {
            state.input = state.term.clone();
            state.mode = Mode::Search;
        }

        BrowseAction::OpenDetail => {
            if bounds.page_len > 0 {
                state.mode = Mode::Detail;
            }
        }
        BrowseAction::CloseDetail => {
            state.mode = Mode::Grid;
        }

        BrowseAction::ResetGrid => {
            match state.tab {
                Tab::Tickets => state.ticket_grid = GridState::ticket_defaults(),
                Tab::Customers => state.customer_grid = GridState::customer_defaults(),
            }
            state.cursor_row = 0;
            state.cursor_col = 0;
        }

        BrowseAction::InputChar(c) => state.input.push(c),
        BrowseAction::InputBackspace => {
            state.input.pop();
        }
        BrowseAction::InputCancel => {
            state.input.clear();
            state.mode = Mode::Grid;
        }
        BrowseAction::InputSubmit => {
            let input = std::mem::take(&mut state.input);
            match state.mode {
                Mode::Filter => {
                    if let Some(column_id) = column_ids.get(state.cursor_col) {
                        let column_id = column_id.to_string();
                        state.grid_mut().set_filter(&column_id, &input);
                    }
                    state.cursor_row = 0;
                    state.mode = Mode::Grid;
                }
                Mode::Search => {
                    state.term = input;
                    // A new result set invalidates both page positions.
                    state.ticket_grid.page_index = 0;
                    state.customer_grid.page_index = 0;
                    state.cursor_row = 0;
                    state.mode = Mode::Grid;
                    return Effect::Reload;
                }
                _ => state.mode = Mode::Grid,
            }
        }
    }

    Effect::None
}

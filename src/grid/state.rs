use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Client-local grid state: active column filters, active sort, and the
/// current zero-based page index. Pure data; [`compute_grid`] derives the
/// visible view from it on every change.
///
/// [`compute_grid`]: super::compute_grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    pub filters: HashMap<String, String>,
    pub sort: Option<(String, SortDirection)>,
    pub page_index: usize,
}

impl GridState {
    /// Defaults for the ticket grid: oldest tickets first, since they have
    /// waited the longest.
    pub fn ticket_defaults() -> Self {
        GridState {
            sort: Some(("date".to_string(), SortDirection::Ascending)),
            ..GridState::default()
        }
    }

    /// Defaults for the customer grid: fetch order, no sort.
    pub fn customer_defaults() -> Self {
        GridState::default()
    }

    pub fn with_page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    /// Advance the sort cycle for a column: unsorted to ascending to
    /// descending and back to unsorted. Toggling a different column always
    /// starts it ascending.
    pub fn toggle_sort(&mut self, column_id: &str) {
        self.sort = match self.sort.take() {
            Some((id, SortDirection::Ascending)) if id == column_id => {
                Some((id, SortDirection::Descending))
            }
            Some((id, SortDirection::Descending)) if id == column_id => None,
            _ => Some((column_id.to_string(), SortDirection::Ascending)),
        };
    }

    /// Set one column's filter text. Empty text clears the entry.
    pub fn set_filter(&mut self, column_id: &str, value: &str) {
        if value.is_empty() {
            self.filters.remove(column_id);
        } else {
            self.filters
                .insert(column_id.to_string(), value.to_string());
        }
    }

    pub fn filter(&self, column_id: &str) -> &str {
        self.filters.get(column_id).map(String::as_str).unwrap_or("")
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle_returns_to_unsorted() {
        let mut state = GridState::customer_defaults();
        assert_eq!(state.sort, None);

        state.toggle_sort("email");
        assert_eq!(
            state.sort,
            Some(("email".to_string(), SortDirection::Ascending))
        );

        state.toggle_sort("email");
        assert_eq!(
            state.sort,
            Some(("email".to_string(), SortDirection::Descending))
        );

        state.toggle_sort("email");
        assert_eq!(state.sort, None);
    }

    #[test]
    fn test_toggling_another_column_starts_ascending() {
        let mut state = GridState::ticket_defaults();
        state.toggle_sort("date");
        assert_eq!(
            state.sort,
            Some(("date".to_string(), SortDirection::Descending))
        );

        state.toggle_sort("title");
        assert_eq!(
            state.sort,
            Some(("title".to_string(), SortDirection::Ascending))
        );
    }

    #[test]
    fn test_empty_filter_clears_entry() {
        let mut state = GridState::default();
        state.set_filter("tech", "new-ticket");
        assert_eq!(state.filter("tech"), "new-ticket");
        assert!(state.has_filters());

        state.set_filter("tech", "");
        assert_eq!(state.filter("tech"), "");
        assert!(!state.has_filters());
    }
}

//! Table view state.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub order: SortOrder,
}

/// UI state owned by one table instance.
///
/// Starts as `("", unsorted, page 1)`. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_query: String,
    sort: Option<SortState>,
    current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            search_query: String::new(),
            sort: None,
            current_page: 1,
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replace the search query. Always returns to page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.current_page = 1;
    }

    /// Apply a header click on `key`.
    ///
    /// A new column starts ascending; the same column flips between
    /// ascending and descending. There is no way back to unsorted.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.key == key => Some(SortState {
                key: current.key,
                order: current.order.toggled(),
            }),
            _ => Some(SortState {
                key: key.to_string(),
                order: SortOrder::Asc,
            }),
        };
    }

    /// Move to `page`, clamped to `[1, total_pages]`.
    ///
    /// Returns the page actually selected.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> usize {
        self.current_page = clamp_page(page, total_pages);
        self.current_page
    }
}

/// Clamp a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::new();
        assert_eq!(state.search_query(), "");
        assert_eq!(state.sort(), None);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = ViewState::new();
        state.set_page(3, 5);
        state.set_search("bo");
        assert_eq!(state.current_page(), 1);

        state.set_page(2, 5);
        state.set_search("");
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_sort_cycle_on_same_column() {
        let mut state = ViewState::new();
        let orders: Vec<SortOrder> = (0..4)
            .map(|_| {
                state.toggle_sort("name");
                state.sort().unwrap().order
            })
            .collect();
        assert_eq!(
            orders,
            [SortOrder::Asc, SortOrder::Desc, SortOrder::Asc, SortOrder::Desc]
        );
    }

    #[test]
    fn test_switching_column_resets_to_asc() {
        let mut state = ViewState::new();
        state.toggle_sort("name");
        state.toggle_sort("name");
        state.toggle_sort("views");
        assert_eq!(
            state.sort(),
            Some(&SortState {
                key: "views".into(),
                order: SortOrder::Asc
            })
        );
    }

    #[test]
    fn test_page_clamping() {
        let mut state = ViewState::new();
        assert_eq!(state.set_page(5, 3), 3);
        assert_eq!(state.set_page(0, 3), 1);
        assert_eq!(state.set_page(2, 0), 1);
    }
}

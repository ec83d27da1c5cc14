//! Server-side paged lists: query state, sortable headers, the search bar.

use contracts::shared::{Page, PageQuery};
use leptos::prelude::*;
use thaw::*;

use crate::shared::config::app_config;
use crate::shared::icons::icon;

/// Paging, sorting and search of one list view.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    pub search_query: String,
    pub sort_field: &'static str,
    pub sort_ascending: bool,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub is_loaded: bool,
}

impl ListState {
    /// Page size comes from the `[ui]` config section.
    pub fn new(sort_field: &'static str) -> Self {
        Self::with_page_size(sort_field, app_config().ui.page_size)
    }

    pub fn with_page_size(sort_field: &'static str, page_size: u32) -> Self {
        Self {
            search_query: String::new(),
            sort_field,
            sort_ascending: true,
            page: 0,
            page_size: page_size.max(1),
            total_count: 0,
            total_pages: 1,
            is_loaded: false,
        }
    }

    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
            .with_sort(self.sort_field, self.sort_ascending)
            .with_search(&self.search_query)
    }

    /// Take the totals from a fetched page.
    pub fn apply_page<T>(&mut self, page: &Page<T>) {
        self.total_count = page.total_elements;
        self.total_pages = page.total_pages.max(1);
        self.page = page.number.min(self.total_pages - 1);
        self.is_loaded = true;
    }

    /// Clicking the active column flips direction; another column sorts ascending.
    pub fn toggle_sort(&mut self, field: &'static str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field;
            self.sort_ascending = true;
        }
        self.page = 0;
    }

    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
        self.page = 0;
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.min(self.total_pages.saturating_sub(1));
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size.max(1);
        self.page = 0;
    }

    pub fn sort_indicator(&self, field: &str) -> &'static str {
        if self.sort_field != field {
            " ⇅"
        } else if self.sort_ascending {
            " ▲"
        } else {
            " ▼"
        }
    }
}

/// Header cell that re-sorts the list on click.
#[component]
pub fn SortHeader(
    state: RwSignal<ListState>,
    field: &'static str,
    label: &'static str,
    on_sort: Callback<()>,
) -> impl IntoView {
    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                style="cursor:pointer;"
                on:click=move |_| {
                    state.update(|s| s.toggle_sort(field));
                    on_sort.run(());
                }
            >
                {label}
                <span class=move || {
                    if state.with(|s| s.sort_field == field) {
                        "table__sort-indicator table__sort-indicator--active"
                    } else {
                        "table__sort-indicator"
                    }
                }>{move || state.with(|s| s.sort_indicator(field))}</span>
            </div>
        </TableHeaderCell>
    }
}

/// Search box with Find/Reset. Extra filters go in `children`.
#[component]
pub fn SearchBar(
    state: RwSignal<ListState>,
    on_search: Callback<()>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let text = RwSignal::new(state.with_untracked(|s| s.search_query.clone()));
    let placeholder = if placeholder.is_empty() { "Search..." } else { placeholder };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Input value=text placeholder=placeholder />
                    </div>
                    {children.map(|c| c())}
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| {
                            state.update(|s| s.set_search(text.get_untracked()));
                            on_search.run(());
                        }
                    >
                        {icon("filter")}
                        " Find"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            text.set(String::new());
                            state.update(|s| s.set_search(String::new()));
                            on_search.run(());
                        }
                    >
                        "Reset"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total_elements: u64, total_pages: u32, number: u32) -> Page<()> {
        Page {
            content: vec![],
            total_elements,
            total_pages,
            number,
            size: 20,
        }
    }

    #[test]
    fn query_carries_sort_and_search() {
        let mut state = ListState::with_page_size("sku", 20);
        state.set_search("  bolt ".to_string());
        let q = state.query();
        assert_eq!(q.page, 0);
        assert_eq!(q.size, 20);
        assert_eq!(q.sort.as_deref(), Some("sku,asc"));
        assert_eq!(q.search.as_deref(), Some("bolt"));
    }

    #[test]
    fn toggling_sort() {
        let mut state = ListState::with_page_size("sku", 20);
        state.page = 3;
        state.toggle_sort("sku");
        assert!(!state.sort_ascending);
        assert_eq!(state.page, 0);
        state.toggle_sort("name");
        assert_eq!(state.sort_field, "name");
        assert!(state.sort_ascending);
        assert_eq!(state.sort_indicator("name"), " ▲");
        assert_eq!(state.sort_indicator("sku"), " ⇅");
    }

    #[test]
    fn apply_page_clamps() {
        let mut state = ListState::with_page_size("id", 20);
        state.apply_page(&page(0, 0, 0));
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.page, 0);
        assert!(state.is_loaded);

        state.apply_page(&page(45, 3, 5));
        assert_eq!(state.page, 2);
        state.go_to(10);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn page_size_resets_to_first_page() {
        let mut state = ListState::with_page_size("id", 20);
        state.page = 2;
        state.set_page_size(0);
        assert_eq!(state.page_size, 1);
        assert_eq!(state.page, 0);
    }
}

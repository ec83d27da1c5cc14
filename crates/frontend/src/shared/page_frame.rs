//! Root wrapper for every page rendered inside a tab.
//!
//! The root element carries `id="{view}--{category}"` and
//! `data-page-category`, so a page found in the DOM inspector can be traced
//! back to its module (`products--list` lives in `domain/a001_product`).

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    /// Table with filters and pagination.
    List,
    /// Summary cards.
    Dashboard,
    /// Task-oriented flow such as the client catalog.
    Usecase,
    /// Administration pages.
    System,
}

impl PageCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Dashboard => "dashboard",
            PageCategory::Usecase => "usecase",
            PageCategory::System => "system",
        }
    }

    fn class(self) -> &'static str {
        match self {
            PageCategory::Dashboard => "page page--dashboard",
            _ => "page",
        }
    }
}

#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=category.class() data-page-category=category.as_str()>
            {children()}
        </div>
    }
}

/// Standard header row: title, a count badge, and action buttons on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] count: Option<Signal<u64>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
                {count.map(|count| view! { <thaw::Badge>{move || count.get().to_string()}</thaw::Badge> })}
            </div>
            <div class="page__header-right">{children()}</div>
        </div>
    }
}

use leptos::prelude::*;

use crate::shared::format::format_thousands;
use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Success,
    Warning,
}

/// One number on the overview dashboard. `None` renders a dash while loading.
#[component]
pub fn StatCard(
    label: &'static str,
    icon_name: &'static str,
    #[prop(into)] value: Signal<Option<i64>>,
    #[prop(into, optional)] tone: Signal<CardTone>,
    #[prop(optional)] on_open: Option<Callback<()>>,
) -> impl IntoView {
    let class = move || match tone.get() {
        CardTone::Neutral => "stat-card",
        CardTone::Success => "stat-card stat-card--success",
        CardTone::Warning => "stat-card stat-card--warning",
    };

    view! {
        <div
            class=class
            class:stat-card--clickable=on_open.is_some()
            on:click=move |_| {
                if let Some(cb) = on_open {
                    cb.run(());
                }
            }
        >
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().map(format_thousands).unwrap_or_else(|| "-".to_string())}
                </div>
            </div>
        </div>
    }
}

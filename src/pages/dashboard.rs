//! Admin dashboard: headline stats and the daily borrow trend.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::app::use_services;
use crate::net::api;
use crate::net::types::TrendPoint;

/// `"total_books"` / `"totalBooks"` → `"Total books"`.
pub(crate) fn stat_label(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch == '_' || ch == '-' {
            words.push(' ');
        } else if ch.is_ascii_uppercase() && i > 0 {
            words.push(' ');
            words.push(ch.to_ascii_lowercase());
        } else {
            words.push(ch);
        }
    }
    let mut chars = words.trim().chars();
    chars.next().map(|first| first.to_uppercase().chain(chars).collect()).unwrap_or_default()
}

/// Render a stat value without JSON quoting.
pub(crate) fn stat_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "—".to_owned(),
        other => other.to_string(),
    }
}

/// Bar width as a percentage of the busiest day.
pub(crate) fn bar_width_percent(count: u64, max: u64) -> u64 {
    if max == 0 { 0 } else { (count.min(max) * 100) / max }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = use_services();

    let stats = LocalResource::new(move || {
        let services = services.get_value();
        async move { api::fetch_dashboard_stats(&services.client).await.ok() }
    });
    let trend = LocalResource::new(move || {
        let services = services.get_value();
        async move { api::fetch_borrow_trend(&services.client).await.ok() }
    });

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Dashboard"</h1>
            </header>

            <section class="dashboard-page__stats">
                <Suspense fallback=move || view! { <p>"Loading stats..."</p> }>
                    {move || {
                        stats
                            .get()
                            .map(|loaded| match loaded {
                                Some(map) => map
                                    .into_iter()
                                    .map(|(key, value)| {
                                        view! {
                                            <div class="stat-card">
                                                <span class="stat-card__label">{stat_label(&key)}</span>
                                                <span class="stat-card__value">{stat_value(&value)}</span>
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                                    .into_any(),
                                None => view! { <p class="dashboard-page__empty">"Stats unavailable."</p> }.into_any(),
                            })
                    }}
                </Suspense>
            </section>

            <section class="dashboard-page__trend">
                <h2>"Borrowing trend"</h2>
                <Suspense fallback=move || view! { <p>"Loading trend..."</p> }>
                    {move || trend.get().map(|loaded| view! { <TrendChart points=loaded.unwrap_or_default()/> })}
                </Suspense>
            </section>
        </div>
    }
}

/// Horizontal bar per day, scaled to the busiest day.
#[component]
fn TrendChart(points: Vec<TrendPoint>) -> impl IntoView {
    if points.is_empty() {
        return view! { <p class="dashboard-page__empty">"No borrowing activity yet."</p> }.into_any();
    }
    let max = points.iter().map(|p| p.count).max().unwrap_or(0);
    view! {
        <ul class="trend-chart">
            {points
                .into_iter()
                .map(|p| {
                    let style = format!("width: {}%", bar_width_percent(p.count, max));
                    view! {
                        <li class="trend-chart__row">
                            <span class="trend-chart__date">{p.date}</span>
                            <span class="trend-chart__bar" style=style></span>
                            <span class="trend-chart__count">{p.count}</span>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
    .into_any()
}

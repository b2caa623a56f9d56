use std::rc::Rc;

use dioxus::prelude::*;

use super::cards::SummaryCards;
use super::dayparts::DaypartsCard;
use super::export::ExportPanel;
use super::DashboardState;
use crate::charts::{ChartCanvas, ChartKind, ChartLegend, ChartSpec};
use crate::core::dayparts;
use crate::core::format::NumberLocale;
use crate::core::provider::{load_snapshot, LoadError, ProviderError, ProviderHandle};
use crate::core::snapshot::Snapshot;
use crate::core::theme::Theme;
use crate::t;

pub(crate) fn chart_title(kind: ChartKind) -> String {
    match kind {
        ChartKind::ProductRadar => t!("chart-product-performance"),
        ChartKind::SegmentDonut => t!("chart-customer-segments"),
        ChartKind::PeakHours => t!("chart-peak-hours"),
        ChartKind::CategoryTreemap => t!("chart-product-categories"),
        ChartKind::SatisfactionBars => t!("chart-satisfaction"),
    }
}

/// Localized status line for a failed load.
pub(crate) fn load_error_text(err: &LoadError) -> String {
    match err {
        LoadError::Provider(ProviderError::Unavailable(detail)) => {
            t!("dashboard-error-unavailable", detail = detail.as_str())
        }
        LoadError::Provider(ProviderError::Rejected(detail)) => {
            t!("dashboard-error-rejected", detail = detail.as_str())
        }
        LoadError::Malformed(err) => t!("dashboard-error-malformed", detail = err.to_string()),
    }
}

/// Dashboard page body.
///
/// Requests one snapshot from the provider in context when mounted (the
/// synthetic provider when none is registered) and renders cards and charts
/// once it resolves. A load still pending at unmount is dropped with the scope.
#[component]
pub fn CafeDashboard() -> Element {
    let provider = try_use_context::<ProviderHandle>().unwrap_or_else(ProviderHandle::synthetic);
    let theme = try_use_context::<Theme>().unwrap_or_default();
    let locale = NumberLocale::for_language(&crate::i18n::use_language_tag());

    let mut load = use_resource(move || {
        let provider = provider.clone();
        async move { load_snapshot(provider.provider()).await }
    });

    use_drop(|| tracing::debug!("dashboard unmounted"));

    let state = DashboardState::from_outcome(Option::as_ref(&*load.read()));
    let loading = state.is_loading();

    let on_refresh = move |_| {
        tracing::info!("dashboard refresh requested");
        load.restart();
    };

    rsx! {
        section { class: "page page-dashboard",
            div { class: "dashboard__header",
                div {
                    h1 { {t!("dashboard-title")} }
                    p { class: "dashboard__subtitle", {t!("dashboard-subtitle")} }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: loading,
                    onclick: on_refresh,
                    {t!("dashboard-refresh")}
                }
            }

            match state {
                DashboardState::Loading => rsx! {
                    div { class: "dashboard__status dashboard__status--loading", role: "status",
                        {t!("dashboard-loading")}
                    }
                },
                DashboardState::Failed(err) => rsx! {
                    div { class: "dashboard__status dashboard__status--error", role: "alert",
                        h2 { {t!("dashboard-error-title")} }
                        p { {load_error_text(&err)} }
                        p { class: "dashboard-card__meta", {t!("dashboard-error-hint")} }
                    }
                },
                DashboardState::Ready(snapshot) => rsx! {
                    DashboardBody { snapshot, theme, locale }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(snapshot: Rc<Snapshot>, theme: Theme, locale: NumberLocale) -> Element {
    let state = DashboardState::Ready(Rc::clone(&snapshot));
    let cards = state.cards(&theme, &locale);
    let charts = state.charts(&theme, &locale);
    let summary = dayparts::summarize(&snapshot.peak_hours);

    rsx! {
        SummaryCards { cards }
        div { class: "dashboard__charts",
            for (slug, chart) in charts.into_iter().map(|chart| (chart.kind().slug(), chart)) {
                ChartPanel { key: "{slug}", chart }
            }
        }
        div { class: "dashboard__extras",
            DaypartsCard { summary, locale }
            ExportPanel { snapshot, theme, locale }
        }
    }
}

#[component]
fn ChartPanel(chart: ChartSpec) -> Element {
    let _lang = crate::i18n::use_language_tag();
    let kind = chart.kind();
    let slug = kind.slug();
    let legend = chart.legend();

    rsx! {
        article { class: "dashboard-card dashboard-chart dashboard-chart--{slug}",
            h2 { class: "dashboard-card__title", {chart_title(kind)} }
            ChartCanvas { chart }
            ChartLegend { entries: legend }
        }
    }
}

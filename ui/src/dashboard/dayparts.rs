use dioxus::prelude::*;

use crate::core::dayparts::{DaypartSummary, DaypartTotals, TimeBlock, TradingBand};
use crate::core::format::{self, NumberLocale};
use crate::t;

#[derive(Debug, Clone, PartialEq)]
struct DaypartRow {
    slug: &'static str,
    label: String,
    revenue: String,
    orders: String,
    average_order: String,
    share: String,
}

fn block_label(block: TimeBlock) -> String {
    match block {
        TimeBlock::Morning => t!("dayparts-morning"),
        TimeBlock::Afternoon => t!("dayparts-afternoon"),
        TimeBlock::Evening => t!("dayparts-evening"),
    }
}

fn band_label(band: TradingBand) -> String {
    match band {
        TradingBand::MorningPeak => t!("dayparts-morning-peak"),
        TradingBand::LunchPeak => t!("dayparts-lunch-peak"),
        TradingBand::EveningPeak => t!("dayparts-evening-peak"),
        TradingBand::LowTraffic => t!("dayparts-low-traffic"),
    }
}

fn row(
    slug: &'static str,
    label: String,
    totals: &DaypartTotals,
    total_revenue: f64,
    locale: &NumberLocale,
) -> DaypartRow {
    let share = totals.revenue_share(total_revenue) * 100.0;
    DaypartRow {
        slug,
        label,
        revenue: format::format_currency(totals.revenue, locale),
        orders: format::format_integer(totals.orders, locale),
        average_order: totals
            .average_order_value()
            .map(|aov| format::format_currency(aov, locale))
            .unwrap_or_else(|| "—".to_string()),
        share: format!("{}%", format::format_decimal(share, 1, locale)),
    }
}

/// Revenue split by time block and trading band.
#[component]
pub fn DaypartsCard(summary: DaypartSummary, locale: NumberLocale) -> Element {
    let blocks: Vec<DaypartRow> = summary
        .blocks
        .iter()
        .map(|(block, totals)| {
            row(block.slug(), block_label(*block), totals, summary.total_revenue, &locale)
        })
        .collect();
    let bands: Vec<DaypartRow> = summary
        .bands
        .iter()
        .map(|(band, totals)| {
            row(band.slug(), band_label(*band), totals, summary.total_revenue, &locale)
        })
        .collect();
    let busiest = summary
        .busiest_hour
        .map(|hour| t!("dayparts-busiest", hour = format!("{hour:02}")));

    rsx! {
        section { class: "dashboard-card dayparts",
            div { class: "dashboard-card__header",
                h2 { {t!("dayparts-title")} }
                if let Some(busiest) = busiest {
                    span { class: "dashboard-card__meta", "{busiest}" }
                }
            }
            for (group, rows) in [("blocks", blocks), ("bands", bands)] {
                table { key: "{group}", class: "dayparts__table dayparts__table--{group}",
                    thead {
                        tr {
                            th { {t!("dayparts-col-part")} }
                            th { {t!("dayparts-col-revenue")} }
                            th { {t!("dayparts-col-orders")} }
                            th { {t!("dayparts-col-aov")} }
                            th { {t!("dayparts-col-share")} }
                        }
                    }
                    tbody {
                        for entry in rows {
                            tr { key: "{entry.slug}", class: "dayparts__row dayparts__row--{entry.slug}",
                                th { scope: "row", "{entry.label}" }
                                td { "{entry.revenue}" }
                                td { "{entry.orders}" }
                                td { "{entry.average_order}" }
                                td { "{entry.share}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

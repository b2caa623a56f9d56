use dioxus::prelude::*;

use super::scene::{num, Shape};
use super::{ChartSpec, LegendEntry, LegendLabel};
use crate::t;

/// Draws one chart spec as inline SVG.
#[component]
pub fn ChartCanvas(chart: ChartSpec) -> Element {
    let scene = chart.scene();
    let view_box = scene.view_box();
    let slug = chart.kind().slug();

    rsx! {
        svg {
            class: "dashboard-chart__canvas dashboard-chart__canvas--{slug}",
            view_box: "{view_box}",
            preserve_aspect_ratio: "xMidYMid meet",
            for (idx, shape) in scene.shapes.into_iter().enumerate() {
                {render_shape(idx, shape)}
            }
        }
    }
}

#[component]
pub fn ChartLegend(entries: Vec<LegendEntry>) -> Element {
    let _lang = crate::i18n::use_language_tag();
    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        ul { class: "dashboard-chart__legend",
            for (idx, entry) in entries.into_iter().enumerate() {
                li { key: "{idx}", class: "dashboard-chart__legend-item",
                    span {
                        class: "dashboard-chart__legend-swatch",
                        style: "background-color: {entry.color}",
                    }
                    span { {legend_text(&entry.label)} }
                }
            }
        }
    }
}

fn legend_text(label: &LegendLabel) -> String {
    match label {
        LegendLabel::Name(name) => name.clone(),
        LegendLabel::Series(key) => series_label(key),
    }
}

/// Localized display name for a chart series key.
pub(crate) fn series_label(key: &str) -> String {
    match key {
        "profit" => t!("series-profit"),
        "growth" => t!("series-growth"),
        "traffic" => t!("series-traffic"),
        "revenue" => t!("series-revenue"),
        "orders" => t!("series-orders"),
        other => other.to_string(),
    }
}

fn render_shape(idx: usize, shape: Shape) -> Element {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            title,
        } => rsx! {
            rect {
                key: "{idx}",
                x: num(x),
                y: num(y),
                width: num(width),
                height: num(height),
                fill: fill,
                stroke: stroke,
                if let Some(hint) = title {
                    title { "{hint}" }
                }
            }
        },
        Shape::Path {
            d,
            fill,
            fill_opacity,
            stroke,
            stroke_width,
            dash,
        } => rsx! {
            path {
                key: "{idx}",
                d: d,
                fill: fill.unwrap_or_else(|| "none".to_string()),
                fill_opacity: num(fill_opacity),
                stroke: stroke,
                stroke_width: num(stroke_width),
                stroke_dasharray: dash,
            }
        },
        Shape::Text {
            x,
            y,
            content,
            fill,
            size,
            anchor,
            bold,
        } => rsx! {
            text {
                key: "{idx}",
                x: num(x),
                y: num(y),
                fill: fill,
                font_size: num(size),
                font_weight: if bold { "600" } else { "400" },
                text_anchor: anchor.as_svg(),
                "{content}"
            }
        },
    }
}

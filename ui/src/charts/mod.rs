//! Chart renderers.
//!
//! Every chart is two pure steps: `build` turns a slice of the snapshot into a
//! typed spec (series keys, domains, colors), and `scene` lays that spec out
//! into drawing primitives. Neither step touches the snapshot mutably or keeps
//! state, so rebuilding from the same input always yields the same output.

pub mod donut;
pub mod peak_hours;
pub mod radar;
pub mod satisfaction;
pub mod scale;
pub mod scene;
pub mod treemap;

mod canvas;
pub use canvas::{ChartCanvas, ChartLegend};

use serde::Serialize;

use crate::core::format::NumberLocale;
use crate::core::snapshot::Snapshot;
use crate::core::theme::Theme;

use self::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    ProductRadar,
    SegmentDonut,
    PeakHours,
    CategoryTreemap,
    SatisfactionBars,
}

impl ChartKind {
    /// Display order on the dashboard.
    pub const ALL: [ChartKind; 5] = [
        ChartKind::ProductRadar,
        ChartKind::SegmentDonut,
        ChartKind::PeakHours,
        ChartKind::CategoryTreemap,
        ChartKind::SatisfactionBars,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::ProductRadar => "product-performance",
            ChartKind::SegmentDonut => "customer-segments",
            ChartKind::PeakHours => "peak-hours",
            ChartKind::CategoryTreemap => "product-categories",
            ChartKind::SatisfactionBars => "satisfaction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartSpec {
    Radar(radar::RadarSpec),
    Donut(donut::DonutSpec),
    PeakHours(peak_hours::ComposedSpec),
    Treemap(treemap::TreemapSpec),
    Satisfaction(satisfaction::BarSpec),
}

/// Legend label: a series key to translate, or a data-provided name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LegendLabel {
    Series(&'static str),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: LegendLabel,
    pub color: String,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Radar(_) => ChartKind::ProductRadar,
            ChartSpec::Donut(_) => ChartKind::SegmentDonut,
            ChartSpec::PeakHours(_) => ChartKind::PeakHours,
            ChartSpec::Treemap(_) => ChartKind::CategoryTreemap,
            ChartSpec::Satisfaction(_) => ChartKind::SatisfactionBars,
        }
    }

    pub fn scene(&self) -> Scene {
        match self {
            ChartSpec::Radar(spec) => spec.scene(),
            ChartSpec::Donut(spec) => spec.scene(),
            ChartSpec::PeakHours(spec) => spec.scene(),
            ChartSpec::Treemap(spec) => spec.scene(),
            ChartSpec::Satisfaction(spec) => spec.scene(),
        }
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        match self {
            ChartSpec::Radar(spec) => spec
                .series
                .iter()
                .map(|s| series_entry(s.key, &s.color))
                .collect(),
            ChartSpec::PeakHours(spec) => spec
                .series
                .iter()
                .map(|s| series_entry(s.key, &s.color))
                .collect(),
            ChartSpec::Donut(spec) => spec
                .slices
                .iter()
                .map(|s| named_entry(&s.name, &s.color))
                .collect(),
            ChartSpec::Treemap(spec) => spec
                .groups
                .iter()
                .map(|g| named_entry(&g.category, &g.color))
                .collect(),
            ChartSpec::Satisfaction(_) => Vec::new(),
        }
    }
}

fn series_entry(key: &'static str, color: &str) -> LegendEntry {
    LegendEntry {
        label: LegendLabel::Series(key),
        color: color.to_string(),
    }
}

fn named_entry(name: &str, color: &str) -> LegendEntry {
    LegendEntry {
        label: LegendLabel::Name(name.to_string()),
        color: color.to_string(),
    }
}

/// The five dashboard charts, in display order.
pub fn dashboard_charts(snapshot: &Snapshot, theme: &Theme, locale: &NumberLocale) -> Vec<ChartSpec> {
    vec![
        ChartSpec::Radar(radar::build(&snapshot.product_metrics, theme)),
        ChartSpec::Donut(donut::build(&snapshot.customer_segments, theme)),
        ChartSpec::PeakHours(peak_hours::build(&snapshot.peak_hours, theme, locale)),
        ChartSpec::Treemap(treemap::build(&snapshot.product_performance, theme)),
        ChartSpec::Satisfaction(satisfaction::build(&snapshot.satisfaction_metrics, theme)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::EN_US;
    use crate::core::snapshot::fixtures::snapshot;

    #[test]
    fn five_charts_in_display_order() {
        let charts = dashboard_charts(&snapshot(), &Theme::default(), &EN_US);
        let kinds: Vec<_> = charts.iter().map(ChartSpec::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::ProductRadar,
                ChartKind::SegmentDonut,
                ChartKind::PeakHours,
                ChartKind::CategoryTreemap,
                ChartKind::SatisfactionBars,
            ]
        );
    }

    #[test]
    fn rendering_leaves_snapshot_untouched() {
        let snap = snapshot();
        let before = snap.clone();
        let first = dashboard_charts(&snap, &Theme::default(), &EN_US);
        let second = dashboard_charts(&snap, &Theme::default(), &EN_US);
        assert_eq!(snap, before);
        assert_eq!(first, second);
    }

    #[test]
    fn legends_use_series_keys_or_names() {
        let charts = dashboard_charts(&snapshot(), &Theme::default(), &EN_US);
        assert_eq!(
            charts[0].legend()[0].label,
            LegendLabel::Series("profit")
        );
        assert_eq!(
            charts[1].legend()[3].label,
            LegendLabel::Name("Lost".into())
        );
        assert!(charts[4].legend().is_empty());
    }
}

//! Peak hours composite: traffic area and order bars on the left axis,
//! revenue line (with currency labels) on an independent right axis.

use serde::Serialize;

use super::scale::{Domain, LinearScale};
use super::scene::{num, Anchor, Scene, Shape};
use crate::core::format::{format_currency, NumberLocale};
use crate::core::snapshot::HourlyActivity;
use crate::core::theme::Theme;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 52.0;
const MARGIN_TOP: f64 = 28.0;
const MARGIN_BOTTOM: f64 = 28.0;
const GRID_COLOR: &str = "#f0f0f0";
const AXIS_COLOR: &str = "#6B7280";
const TICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mark {
    Area,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedSpec {
    /// X axis categories in ascending order.
    pub hours: Vec<u8>,
    pub left_domain: Domain,
    pub right_domain: Domain,
    pub series: Vec<ComposedSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedSeries {
    pub key: &'static str,
    pub mark: Mark,
    pub axis: AxisSide,
    pub color: String,
    pub fill_opacity: f64,
    pub stroke_width: f64,
    pub values: Vec<f64>,
    /// Value labels drawn above each point (revenue only).
    pub labels: Option<Vec<String>>,
}

pub fn build(hours: &[HourlyActivity], theme: &Theme, locale: &NumberLocale) -> ComposedSpec {
    let traffic: Vec<f64> = hours.iter().map(|h| f64::from(h.traffic)).collect();
    let orders: Vec<f64> = hours.iter().map(|h| f64::from(h.orders)).collect();
    let revenue: Vec<f64> = hours.iter().map(|h| h.revenue).collect();

    let left_max = traffic.iter().chain(&orders).copied().fold(0.0, f64::max);
    let right_max = revenue.iter().copied().fold(0.0, f64::max);

    ComposedSpec {
        hours: hours.iter().map(|h| h.hour).collect(),
        left_domain: Domain::zero_to_nice(left_max),
        right_domain: Domain::zero_to_nice(right_max),
        series: vec![
            ComposedSeries {
                key: "traffic",
                mark: Mark::Area,
                axis: AxisSide::Left,
                color: theme.primary.clone(),
                fill_opacity: 0.3,
                stroke_width: 1.0,
                values: traffic,
                labels: None,
            },
            ComposedSeries {
                key: "revenue",
                mark: Mark::Line,
                axis: AxisSide::Right,
                color: theme.accent.clone(),
                fill_opacity: 0.0,
                stroke_width: 2.0,
                labels: Some(revenue.iter().map(|v| format_currency(*v, locale)).collect()),
                values: revenue,
            },
            ComposedSeries {
                key: "orders",
                mark: Mark::Bar,
                axis: AxisSide::Left,
                color: theme.tertiary.clone(),
                fill_opacity: 1.0,
                stroke_width: 0.0,
                values: orders,
                labels: None,
            },
        ],
    }
}

impl ComposedSpec {
    pub fn domain(&self, axis: AxisSide) -> Domain {
        match axis {
            AxisSide::Left => self.left_domain,
            AxisSide::Right => self.right_domain,
        }
    }

    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(WIDTH, HEIGHT);
        let plot_left = MARGIN_LEFT;
        let plot_right = WIDTH - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = HEIGHT - MARGIN_BOTTOM;

        let count = self.hours.len().max(1);
        let band = (plot_right - plot_left) / count as f64;
        let x_at = |idx: usize| plot_left + band * (idx as f64 + 0.5);
        let y_scale = |axis: AxisSide| {
            LinearScale::new(self.domain(axis), (plot_bottom, plot_top))
        };

        let left = y_scale(AxisSide::Left);
        let right = y_scale(AxisSide::Right);
        for (tick_l, tick_r) in left
            .domain
            .ticks(TICKS)
            .into_iter()
            .zip(right.domain.ticks(TICKS))
        {
            let y = left.map(tick_l);
            scene.line((plot_left, y), (plot_right, y), GRID_COLOR, Some("3 3"));
            scene.text(plot_left - 6.0, y + 4.0, num(tick_l.round()), AXIS_COLOR, Anchor::End);
            scene.text(plot_right + 6.0, y + 4.0, num(tick_r.round()), AXIS_COLOR, Anchor::Start);
        }
        for (idx, hour) in self.hours.iter().enumerate() {
            if idx % 3 == 0 {
                scene.text(x_at(idx), plot_bottom + 16.0, hour.to_string(), AXIS_COLOR, Anchor::Middle);
            }
        }

        // Paint order: area, bars, then the line and its labels on top.
        for mark in [Mark::Area, Mark::Bar, Mark::Line] {
            for series in self.series.iter().filter(|s| s.mark == mark) {
                let scale = y_scale(series.axis);
                let points: Vec<(f64, f64)> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| (x_at(idx), scale.map(*v)))
                    .collect();
                match mark {
                    Mark::Area => draw_area(&mut scene, series, &points, plot_bottom),
                    Mark::Bar => draw_bars(&mut scene, series, &points, band, plot_bottom),
                    Mark::Line => draw_line(&mut scene, series, &points),
                }
            }
        }

        scene
    }
}

fn draw_area(scene: &mut Scene, series: &ComposedSeries, points: &[(f64, f64)], baseline: f64) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };
    let mut d = format!("M{} {} ", num(first.0), num(baseline));
    for (x, y) in points {
        d.push_str(&format!("L{} {} ", num(*x), num(*y)));
    }
    d.push_str(&format!("L{} {} Z", num(last.0), num(baseline)));
    scene.push(Shape::Path {
        d,
        fill: Some(series.color.clone()),
        fill_opacity: series.fill_opacity,
        stroke: Some(series.color.clone()),
        stroke_width: series.stroke_width,
        dash: None,
    });
}

fn draw_bars(
    scene: &mut Scene,
    series: &ComposedSeries,
    points: &[(f64, f64)],
    band: f64,
    baseline: f64,
) {
    let width = band * 0.6;
    for ((x, y), value) in points.iter().zip(&series.values) {
        scene.push(Shape::Rect {
            x: x - width / 2.0,
            y: *y,
            width,
            height: (baseline - y).max(0.0),
            fill: series.color.clone(),
            stroke: None,
            title: Some(format!("{}: {}", series.key, num(*value))),
        });
    }
}

fn draw_line(scene: &mut Scene, series: &ComposedSeries, points: &[(f64, f64)]) {
    let d = points
        .iter()
        .enumerate()
        .map(|(idx, (x, y))| format!("{}{} {}", if idx == 0 { 'M' } else { 'L' }, num(*x), num(*y)))
        .collect::<Vec<_>>()
        .join(" ");
    scene.push(Shape::Path {
        d,
        fill: None,
        fill_opacity: 0.0,
        stroke: Some(series.color.clone()),
        stroke_width: series.stroke_width,
        dash: None,
    });
    if let Some(labels) = &series.labels {
        for ((x, y), label) in points.iter().zip(labels) {
            scene.push(Shape::Text {
                x: *x,
                y: y - 10.0,
                content: label.clone(),
                fill: series.color.clone(),
                size: 9.0,
                anchor: Anchor::Middle,
                bold: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::EN_US;
    use crate::core::snapshot::fixtures::snapshot;

    #[test]
    fn plots_twenty_four_ascending_hours() {
        let spec = build(&snapshot().peak_hours, &Theme::default(), &EN_US);
        assert_eq!(spec.hours.len(), 24);
        assert_eq!(spec.hours, (0..24).collect::<Vec<u8>>());
        for series in &spec.series {
            assert_eq!(series.values.len(), 24);
        }
    }

    #[test]
    fn revenue_uses_its_own_axis() {
        let spec = build(&snapshot().peak_hours, &Theme::default(), &EN_US);
        let axes: Vec<_> = spec.series.iter().map(|s| (s.key, s.mark, s.axis)).collect();
        assert_eq!(
            axes,
            vec![
                ("traffic", Mark::Area, AxisSide::Left),
                ("revenue", Mark::Line, AxisSide::Right),
                ("orders", Mark::Bar, AxisSide::Left),
            ]
        );
        // fixture: traffic 50, orders 20, revenue up to 630
        assert_eq!(spec.left_domain, Domain::new(0.0, 50.0));
        assert_eq!(spec.right_domain, Domain::new(0.0, 1000.0));
    }

    #[test]
    fn revenue_labels_are_currency() {
        let spec = build(&snapshot().peak_hours, &Theme::default(), &EN_US);
        let labels = spec.series[1].labels.as_ref().unwrap();
        assert_eq!(labels[0], "$400");
        assert_eq!(labels[23], "$630");
    }

    #[test]
    fn scene_is_reproducible() {
        let snap = snapshot();
        let a = build(&snap.peak_hours, &Theme::default(), &EN_US).scene();
        let b = build(&snap.peak_hours, &Theme::default(), &EN_US).scene();
        assert_eq!(a, b);
        let bars = a
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { .. }))
            .count();
        assert_eq!(bars, 24);
    }
}

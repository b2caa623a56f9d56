//! Product performance radar: profit and growth per product on a fixed
//! 0–100 radial axis.
//!
//! Values outside the axis are clamped for plotting; the raw value stays on
//! the point (and in its label) and the point is flagged `clipped`.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use super::scale::Domain;
use super::scene::{polygon_path, Anchor, Scene, Shape};
use crate::core::snapshot::ProductMetric;
use crate::core::theme::Theme;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;
const RADIUS: f64 = 105.0;
const GRID_RINGS: usize = 5;
const FILL_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSpec {
    /// Angular axis labels, one per product, clockwise from the top.
    pub axes: Vec<String>,
    pub domain: Domain,
    pub series: Vec<RadarSeries>,
    pub grid_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub key: &'static str,
    pub color: String,
    pub fill_opacity: f64,
    pub points: Vec<RadarPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarPoint {
    pub raw: f64,
    pub plotted: f64,
    pub clipped: bool,
}

pub fn build(products: &[ProductMetric], theme: &Theme) -> RadarSpec {
    let domain = Domain::PERCENT;
    let series = |key: &'static str, color: &str, pick: fn(&ProductMetric) -> f64| RadarSeries {
        key,
        color: color.to_string(),
        fill_opacity: FILL_OPACITY,
        points: products
            .iter()
            .map(|product| {
                let raw = pick(product);
                RadarPoint {
                    raw,
                    plotted: domain.clamp(raw),
                    clipped: !domain.contains(raw),
                }
            })
            .collect(),
    };

    RadarSpec {
        axes: products.iter().map(|p| p.name.clone()).collect(),
        domain,
        series: vec![
            series("profit", &theme.primary, |p| p.profit),
            series("growth", &theme.accent, |p| p.growth),
        ],
        grid_color: theme.neutral.clone(),
    }
}

impl RadarSpec {
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(WIDTH, HEIGHT);
        let center = (WIDTH / 2.0, HEIGHT / 2.0);
        let count = self.axes.len();
        if count == 0 {
            return scene;
        }

        for ring in 1..=GRID_RINGS {
            let r = RADIUS * ring as f64 / GRID_RINGS as f64;
            let ring_points: Vec<_> = (0..count).map(|i| polar(center, r, i, count)).collect();
            scene.push(Shape::Path {
                d: polygon_path(&ring_points),
                fill: None,
                fill_opacity: 0.0,
                stroke: Some(self.grid_color.clone()),
                stroke_width: 0.5,
                dash: None,
            });
        }

        for (idx, label) in self.axes.iter().enumerate() {
            let spoke = polar(center, RADIUS, idx, count);
            scene.line(center, spoke, &self.grid_color, None);
            let (lx, ly) = polar(center, RADIUS + 16.0, idx, count);
            let anchor = if (lx - center.0).abs() < 1.0 {
                Anchor::Middle
            } else if lx > center.0 {
                Anchor::Start
            } else {
                Anchor::End
            };
            scene.text(lx, ly + 4.0, label.clone(), &self.grid_color, anchor);
        }

        for tick in self.domain.ticks(GRID_RINGS + 1).into_iter().skip(1) {
            let r = RADIUS * self.domain.normalize(tick);
            scene.text(
                center.0 + 3.0,
                center.1 - r,
                super::scene::num(tick),
                &self.grid_color,
                Anchor::Start,
            );
        }

        for series in &self.series {
            let points: Vec<_> = series
                .points
                .iter()
                .enumerate()
                .map(|(idx, point)| {
                    polar(center, RADIUS * self.domain.normalize(point.plotted), idx, count)
                })
                .collect();
            scene.push(Shape::Path {
                d: polygon_path(&points),
                fill: Some(series.color.clone()),
                fill_opacity: series.fill_opacity,
                stroke: Some(series.color.clone()),
                stroke_width: 1.5,
                dash: None,
            });
        }

        scene
    }
}

/// Point at radius `r` on spoke `idx` of `count`, starting at 12 o'clock.
fn polar(center: (f64, f64), r: f64, idx: usize, count: usize) -> (f64, f64) {
    let angle = TAU * idx as f64 / count as f64 - FRAC_PI_2;
    (center.0 + r * angle.cos(), center.1 + r * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::fixtures::{product, snapshot};

    #[test]
    fn two_series_keyed_by_product() {
        let spec = build(&snapshot().product_metrics, &Theme::default());
        assert_eq!(spec.axes, vec!["Espresso", "Latte"]);
        let keys: Vec<_> = spec.series.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["profit", "growth"]);
        assert_eq!(spec.series[0].color, Theme::default().primary);
        assert_eq!(spec.series[1].color, Theme::default().accent);
        assert_eq!(spec.domain, Domain::PERCENT);
    }

    #[test]
    fn out_of_domain_values_are_clamped_and_flagged() {
        let products = vec![product("Nitro", 1.0, 140.0, -12.0)];
        let spec = build(&products, &Theme::default());
        let profit = spec.series[0].points[0];
        let growth = spec.series[1].points[0];
        assert_eq!(profit.plotted, 100.0);
        assert_eq!(profit.raw, 140.0);
        assert!(profit.clipped);
        assert_eq!(growth.plotted, 0.0);
        assert!(growth.clipped);
    }

    #[test]
    fn building_twice_is_identical() {
        let snap = snapshot();
        let theme = Theme::default();
        assert_eq!(
            build(&snap.product_metrics, &theme),
            build(&snap.product_metrics, &theme)
        );
        assert_eq!(
            build(&snap.product_metrics, &theme).scene(),
            build(&snap.product_metrics, &theme).scene()
        );
    }

    #[test]
    fn first_spoke_points_up() {
        let (x, y) = polar((0.0, 0.0), 10.0, 0, 4);
        assert!(x.abs() < 1e-9);
        assert!((y + 10.0).abs() < 1e-9);
    }
}

//! Satisfaction metrics as horizontal bars on a fixed 0–100 axis.

use serde::Serialize;

use super::scale::{Domain, LinearScale};
use super::scene::{num, Anchor, Scene, Shape};
use crate::core::snapshot::SatisfactionScore;
use crate::core::theme::Theme;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;
const LABEL_GUTTER: f64 = 80.0;
const RIGHT_PAD: f64 = 36.0;
const BOTTOM_AXIS: f64 = 24.0;
const AXIS_COLOR: &str = "#6B7280";
const GRID_COLOR: &str = "#e5e7eb";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub domain: Domain,
    pub color: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub aspect: String,
    pub score: f64,
    /// Inline label drawn to the right of the bar.
    pub label: String,
}

pub fn build(metrics: &[SatisfactionScore], theme: &Theme) -> BarSpec {
    BarSpec {
        domain: Domain::PERCENT,
        color: theme.quaternary.clone(),
        bars: metrics
            .iter()
            .map(|metric| Bar {
                aspect: metric.aspect.clone(),
                score: metric.score,
                label: num(metric.score),
            })
            .collect(),
    }
}

impl BarSpec {
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(WIDTH, HEIGHT);
        let plot_left = LABEL_GUTTER;
        let plot_right = WIDTH - RIGHT_PAD;
        let plot_bottom = HEIGHT - BOTTOM_AXIS;
        let x = LinearScale::new(self.domain, (plot_left, plot_right));

        for tick in self.domain.ticks(5) {
            let tx = x.map(tick);
            scene.line((tx, 8.0), (tx, plot_bottom), GRID_COLOR, Some("3 3"));
            scene.text(tx, plot_bottom + 16.0, num(tick), AXIS_COLOR, Anchor::Middle);
        }

        let count = self.bars.len().max(1);
        let band = (plot_bottom - 8.0) / count as f64;
        let thickness = band * 0.6;
        for (idx, bar) in self.bars.iter().enumerate() {
            let top = 8.0 + band * idx as f64 + (band - thickness) / 2.0;
            let end = x.map(self.domain.clamp(bar.score));
            scene.push(Shape::Rect {
                x: plot_left,
                y: top,
                width: (end - plot_left).max(0.0),
                height: thickness,
                fill: self.color.clone(),
                stroke: None,
                title: Some(format!("{}: {}", bar.aspect, bar.label)),
            });
            let mid = top + thickness / 2.0 + 4.0;
            scene.text(plot_left - 8.0, mid, bar.aspect.clone(), AXIS_COLOR, Anchor::End);
            scene.text(end + 6.0, mid, bar.label.clone(), AXIS_COLOR, Anchor::Start);
        }

        scene
    }
}

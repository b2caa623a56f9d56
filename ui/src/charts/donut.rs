//! Customer segment donut.
//!
//! Slice sizes are relative to the actual sum of segment values, so data that
//! does not add up to 100 still fills the ring. Colors come from an explicit
//! segment → color map: the n-th segment (in snapshot order) takes palette
//! entry `n mod 9`, so a tenth segment reuses the first color.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use super::scene::{num, Scene, Shape};
use crate::core::snapshot::CustomerSegment;
use crate::core::theme::Theme;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;
pub const INNER_RADIUS: f64 = 60.0;
pub const OUTER_RADIUS: f64 = 80.0;
/// Gap between neighbouring slices, in degrees.
pub const PADDING_ANGLE_DEG: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSpec {
    pub slices: Vec<DonutSlice>,
    pub total: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub padding_angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    pub name: String,
    pub value: f64,
    /// Share of the ring in [0, 1]; zero for every slice when the total is zero.
    pub fraction: f64,
    pub color: String,
}

/// Stable name → color assignment for a list of segments.
pub fn segment_colors(segments: &[CustomerSegment], theme: &Theme) -> BTreeMap<String, String> {
    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| (segment.name.clone(), theme.palette_color(idx).to_string()))
        .collect()
}

pub fn build(segments: &[CustomerSegment], theme: &Theme) -> DonutSpec {
    let total: f64 = segments.iter().map(|s| s.value).sum();
    let colors = segment_colors(segments, theme);

    let slices = segments
        .iter()
        .map(|segment| DonutSlice {
            name: segment.name.clone(),
            value: segment.value,
            fraction: if total > 0.0 {
                segment.value / total
            } else {
                0.0
            },
            color: colors
                .get(&segment.name)
                .cloned()
                .unwrap_or_else(|| theme.neutral.clone()),
        })
        .collect();

    DonutSpec {
        slices,
        total,
        inner_radius: INNER_RADIUS,
        outer_radius: OUTER_RADIUS,
        padding_angle_deg: PADDING_ANGLE_DEG,
    }
}

impl DonutSpec {
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(WIDTH, HEIGHT);
        let center = (WIDTH / 2.0, HEIGHT / 2.0);

        let visible: Vec<&DonutSlice> = self.slices.iter().filter(|s| s.fraction > 0.0).collect();
        let padding = if visible.len() > 1 {
            self.padding_angle_deg.to_radians()
        } else {
            0.0
        };
        let sweep_total = (TAU - padding * visible.len() as f64).max(0.0);

        let mut start = -FRAC_PI_2;
        for slice in visible {
            let sweep = sweep_total * slice.fraction;
            scene.push(Shape::Path {
                d: ring_segment(center, self.inner_radius, self.outer_radius, start, sweep),
                fill: Some(slice.color.clone()),
                fill_opacity: 1.0,
                stroke: None,
                stroke_width: 0.0,
                dash: None,
            });
            start += sweep + padding;
        }

        scene
    }
}

/// Annular sector from `start` sweeping `sweep` radians clockwise.
fn ring_segment(center: (f64, f64), inner: f64, outer: f64, start: f64, sweep: f64) -> String {
    // A full-circle arc collapses to nothing in SVG; stop just short of it.
    let sweep = sweep.min(TAU - 1e-4);
    let end = start + sweep;
    let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
    let at = |r: f64, a: f64| (center.0 + r * a.cos(), center.1 + r * a.sin());
    let (ox0, oy0) = at(outer, start);
    let (ox1, oy1) = at(outer, end);
    let (ix1, iy1) = at(inner, end);
    let (ix0, iy0) = at(inner, start);
    format!(
        "M{} {} A{} {} 0 {large} 1 {} {} L{} {} A{} {} 0 {large} 0 {} {} Z",
        num(ox0),
        num(oy0),
        num(outer),
        num(outer),
        num(ox1),
        num(oy1),
        num(ix1),
        num(iy1),
        num(inner),
        num(inner),
        num(ix0),
        num(iy0),
    )
}

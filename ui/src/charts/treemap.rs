//! Product category treemap.
//!
//! Two-level squarified layout: categories first (area proportional to the
//! category total), then products inside their category's rectangle. A
//! category's color is the palette entry for its first-appearance index.

use serde::Serialize;

use super::scene::{Anchor, Scene, Shape};
use crate::core::snapshot::ProductCategoryEntry;
use crate::core::theme::Theme;

const WIDTH: f64 = 400.0;
/// Canvas aspect ratio, width over height.
pub const ASPECT_RATIO: f64 = 4.0 / 3.0;
const STROKE: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.x + other.width <= self.x + self.width + EPS
            && other.y + other.height <= self.y + self.height + EPS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapSpec {
    pub bounds: Rect,
    pub groups: Vec<TreemapGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapGroup {
    pub category: String,
    pub color: String,
    pub total: f64,
    pub rect: Rect,
    pub tiles: Vec<TreemapTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapTile {
    pub name: String,
    pub size: f64,
    pub rect: Rect,
}

pub fn build(entries: &[ProductCategoryEntry], theme: &Theme) -> TreemapSpec {
    let bounds = Rect {
        x: 0.0,
        y: 0.0,
        width: WIDTH,
        height: WIDTH / ASPECT_RATIO,
    };

    let mut categories: Vec<(String, Vec<&ProductCategoryEntry>)> = Vec::new();
    for entry in entries {
        match categories.iter_mut().find(|(name, _)| *name == entry.category) {
            Some((_, members)) => members.push(entry),
            None => categories.push((entry.category.clone(), vec![entry])),
        }
    }

    let totals: Vec<f64> = categories
        .iter()
        .map(|(_, members)| members.iter().map(|m| m.size).sum())
        .collect();
    let group_rects = squarify(&totals, bounds);

    let groups = categories
        .into_iter()
        .zip(totals)
        .zip(group_rects)
        .enumerate()
        .map(|(idx, (((category, members), total), rect))| {
            let sizes: Vec<f64> = members.iter().map(|m| m.size).collect();
            let tiles = members
                .iter()
                .zip(squarify(&sizes, rect))
                .map(|(member, rect)| TreemapTile {
                    name: member.name.clone(),
                    size: member.size,
                    rect,
                })
                .collect();
            TreemapGroup {
                category,
                color: theme.palette_color(idx).to_string(),
                total,
                rect,
                tiles,
            }
        })
        .collect();

    TreemapSpec { bounds, groups }
}

impl TreemapSpec {
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.bounds.width, self.bounds.height);
        for group in &self.groups {
            for tile in &group.tiles {
                if tile.rect.area() <= 0.0 {
                    continue;
                }
                scene.push(Shape::Rect {
                    x: tile.rect.x,
                    y: tile.rect.y,
                    width: tile.rect.width,
                    height: tile.rect.height,
                    fill: group.color.clone(),
                    stroke: Some(STROKE.to_string()),
                    title: Some(format!("{} · {}: {}", group.category, tile.name, tile.size)),
                });
                if tile.rect.width > 48.0 && tile.rect.height > 20.0 {
                    scene.text(
                        tile.rect.x + tile.rect.width / 2.0,
                        tile.rect.y + tile.rect.height / 2.0 + 4.0,
                        tile.name.clone(),
                        STROKE,
                        Anchor::Middle,
                    );
                }
            }
        }
        scene
    }
}

/// Squarified treemap layout (Bruls, Huizing & van Wijk). Returns one
/// rectangle per weight, in input order; zero weights get empty rectangles.
pub fn squarify(weights: &[f64], bounds: Rect) -> Vec<Rect> {
    let total: f64 = weights.iter().sum();
    let empty = Rect {
        x: bounds.x,
        y: bounds.y,
        width: 0.0,
        height: 0.0,
    };
    if total <= 0.0 || bounds.area() <= 0.0 {
        return vec![empty; weights.len()];
    }

    let scale = bounds.area() / total;
    let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0.0).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));

    let mut out = vec![empty; weights.len()];
    let mut free = bounds;
    let mut row: Vec<usize> = Vec::new();

    for idx in order {
        let area = |i: &usize| weights[*i] * scale;
        let side = free.short_side();
        let current: Vec<f64> = row.iter().map(area).collect();
        let mut candidate = current.clone();
        candidate.push(area(&idx));
        if row.is_empty() || worst(&candidate, side) <= worst(&current, side) {
            row.push(idx);
        } else {
            free = place_row(&row, &current, free, &mut out);
            row.clear();
            row.push(idx);
        }
    }
    if !row.is_empty() {
        let areas: Vec<f64> = row.iter().map(|i| weights[*i] * scale).collect();
        place_row(&row, &areas, free, &mut out);
    }
    out
}

/// Worst aspect ratio of a row laid along a side of length `side`.
fn worst(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    if areas.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max = areas.iter().copied().fold(f64::MIN, f64::max);
    let min = areas.iter().copied().fold(f64::MAX, f64::min);
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

/// Lay `row` along the short side of `free`; returns the remaining space.
fn place_row(row: &[usize], areas: &[f64], free: Rect, out: &mut [Rect]) -> Rect {
    let sum: f64 = areas.iter().sum();
    if free.width >= free.height {
        // Column on the left edge.
        let thickness = if free.height > 0.0 { sum / free.height } else { 0.0 };
        let mut y = free.y;
        for (idx, area) in row.iter().zip(areas) {
            let height = if thickness > 0.0 { area / thickness } else { 0.0 };
            out[*idx] = Rect {
                x: free.x,
                y,
                width: thickness,
                height,
            };
            y += height;
        }
        Rect {
            x: free.x + thickness,
            y: free.y,
            width: (free.width - thickness).max(0.0),
            height: free.height,
        }
    } else {
        // Row along the top edge.
        let thickness = if free.width > 0.0 { sum / free.width } else { 0.0 };
        let mut x = free.x;
        for (idx, area) in row.iter().zip(areas) {
            let width = if thickness > 0.0 { area / thickness } else { 0.0 };
            out[*idx] = Rect {
                x,
                y: free.y,
                width,
                height: thickness,
            };
            x += width;
        }
        Rect {
            x: free.x,
            y: free.y + thickness,
            width: free.width,
            height: (free.height - thickness).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: f64, category: &str) -> ProductCategoryEntry {
        ProductCategoryEntry {
            name: name.into(),
            size,
            category: category.into(),
        }
    }

    fn cafe_menu() -> Vec<ProductCategoryEntry> {
        vec![
            entry("Coffee", 400.0, "Beverages"),
            entry("Tea", 300.0, "Beverages"),
            entry("Pastries", 350.0, "Food"),
            entry("Sandwiches", 250.0, "Food"),
            entry("Desserts", 200.0, "Food"),
            entry("Smoothies", 150.0, "Beverages"),
        ]
    }

    #[test]
    fn groups_follow_first_appearance() {
        let theme = Theme::default();
        let spec = build(&cafe_menu(), &theme);
        let names: Vec<_> = spec.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Beverages", "Food"]);
        assert_eq!(spec.groups[0].color, theme.primary);
        assert_eq!(spec.groups[1].color, theme.secondary);
        assert_eq!(spec.groups[0].total, 850.0);
        assert_eq!(spec.groups[0].tiles.len(), 3);
    }

    #[test]
    fn tile_areas_are_proportional_to_size() {
        let spec = build(&cafe_menu(), &Theme::default());
        let total_size: f64 = cafe_menu().iter().map(|e| e.size).sum();
        let canvas = spec.bounds.area();
        for group in &spec.groups {
            assert!((group.rect.area() / canvas - group.total / total_size).abs() < 1e-9);
            for tile in &group.tiles {
                assert!((tile.rect.area() / canvas - tile.size / total_size).abs() < 1e-9);
                assert!(group.rect.contains(&tile.rect), "{} escapes its group", tile.name);
            }
        }
    }

    #[test]
    fn canvas_keeps_four_by_three() {
        let spec = build(&cafe_menu(), &Theme::default());
        assert!((spec.bounds.width / spec.bounds.height - ASPECT_RATIO).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_get_empty_rects() {
        let bounds = Rect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let rects = squarify(&[0.0, 5.0, 5.0], bounds);
        assert_eq!(rects[0].area(), 0.0);
        assert!((rects[1].area() - 50.0).abs() < 1e-9);
        assert!((rects[2].area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn layout_is_deterministic() {
        let theme = Theme::default();
        assert_eq!(build(&cafe_menu(), &theme), build(&cafe_menu(), &theme));
    }
}

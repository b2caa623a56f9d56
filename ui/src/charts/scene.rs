//! Backend-neutral drawing primitives.
//!
//! Each chart lays its spec out into a [`Scene`]: a fixed-size canvas and an
//! ordered list of shapes, painted first to last. The same scene feeds the
//! live `ChartCanvas` component and the SVG sheet used for exports.

use std::fmt::Write as _;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        stroke: Option<String>,
        /// Optional hover text (series name and raw value).
        title: Option<String>,
    },
    Path {
        d: String,
        fill: Option<String>,
        fill_opacity: f64,
        stroke: Option<String>,
        stroke_width: f64,
        dash: Option<String>,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        fill: String,
        size: f64,
        anchor: Anchor,
        bold: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", num(self.width), num(self.height))
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, dash: Option<&str>) {
        self.push(Shape::Path {
            d: format!(
                "M{} {} L{} {}",
                num(from.0),
                num(from.1),
                num(to.0),
                num(to.1)
            ),
            fill: None,
            fill_opacity: 0.0,
            stroke: Some(stroke.to_string()),
            stroke_width: 1.0,
            dash: dash.map(str::to_string),
        });
    }

    pub fn text(&mut self, x: f64, y: f64, content: impl Into<String>, fill: &str, anchor: Anchor) {
        self.push(Shape::Text {
            x,
            y,
            content: content.into(),
            fill: fill.to_string(),
            size: 12.0,
            anchor,
            bold: false,
        });
    }

    /// Render as a standalone `<g>` group, translated by `(dx, dy)`.
    pub fn to_svg_group(&self, dx: f64, dy: f64) -> String {
        let mut out = format!("<g transform='translate({} {})'>", num(dx), num(dy));
        for shape in &self.shapes {
            write_shape(&mut out, shape);
        }
        out.push_str("</g>");
        out
    }
}

fn write_shape(out: &mut String, shape: &Shape) {
    // Writing into a String cannot fail.
    let _ = match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            title,
        } => {
            let stroke_attr = stroke
                .as_deref()
                .map(|s| format!(" stroke='{}'", escape(s)))
                .unwrap_or_default();
            let title_el = title
                .as_deref()
                .map(|t| format!("<title>{}</title>", escape(t)))
                .unwrap_or_default();
            write!(
                out,
                "<rect x='{}' y='{}' width='{}' height='{}' fill='{}'{stroke_attr}>{title_el}</rect>",
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                escape(fill)
            )
        }
        Shape::Path {
            d,
            fill,
            fill_opacity,
            stroke,
            stroke_width,
            dash,
        } => {
            let fill_attr = match fill {
                Some(fill) => format!(" fill='{}' fill-opacity='{}'", escape(fill), num(*fill_opacity)),
                None => " fill='none'".to_string(),
            };
            let stroke_attr = stroke
                .as_deref()
                .map(|s| format!(" stroke='{}' stroke-width='{}'", escape(s), num(*stroke_width)))
                .unwrap_or_default();
            let dash_attr = dash
                .as_deref()
                .map(|d| format!(" stroke-dasharray='{d}'"))
                .unwrap_or_default();
            write!(out, "<path d='{d}'{fill_attr}{stroke_attr}{dash_attr}/>")
        }
        Shape::Text {
            x,
            y,
            content,
            fill,
            size,
            anchor,
            bold,
        } => {
            let weight = if *bold { "600" } else { "400" };
            write!(
                out,
                "<text x='{}' y='{}' fill='{}' font-family='Inter, sans-serif' font-size='{}' font-weight='{weight}' text-anchor='{}'>{}</text>",
                num(*x),
                num(*y),
                escape(fill),
                num(*size),
                anchor.as_svg(),
                escape(content)
            )
        }
    };
}

/// Compact number for SVG attributes (two decimals, trailing zeros dropped).
pub fn num(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

/// Closed polygon path through `points`.
pub fn polygon_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (idx, (x, y)) in points.iter().enumerate() {
        let cmd = if idx == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{} {} ", num(*x), num(*y));
    }
    d.push('Z');
    d
}

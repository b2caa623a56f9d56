use std::fmt::Write as _;
use std::rc::Rc;

use dioxus::prelude::*;
use thiserror::Error;

use crate::charts::{dashboard_charts, ChartKind};
use crate::core::dayparts::{TimeBlock, TradingBand};
use crate::core::format::NumberLocale;
use crate::core::platform::Platform;
use crate::core::snapshot::Snapshot;
use crate::core::theme::Theme;
use crate::t;

const SHEET_PAD: f64 = 32.0;
const SHEET_TITLE_GAP: f64 = 28.0;
const SHEET_BACKGROUND: &str = "#ffffff";
const SHEET_INK: &str = "#111827";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not render image: {0}")]
    Render(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("{0}")]
    Unavailable(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Json,
    Csv,
    Svg,
    Png,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Json => "json",
            ExportKind::Csv => "csv",
            ExportKind::Svg => "svg",
            ExportKind::Png => "png",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportKind::Json => "application/json",
            ExportKind::Csv => "text/csv",
            ExportKind::Svg => "image/svg+xml",
            ExportKind::Png => "image/png",
        }
    }

    pub fn filename(self, stamp: &str) -> String {
        format!("cafe-analytics-{stamp}.{}", self.extension())
    }
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Saved(String),
    Downloaded,
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(ExportKind),
    Done(String),
    Failed(String),
}

pub fn snapshot_json(snapshot: &Snapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// One row per hour with its daypart labels.
pub fn hourly_csv(snapshot: &Snapshot) -> String {
    let mut csv = String::from(
        "hour,time_block,trading_band,traffic,revenue,orders,average_order_value\n",
    );
    for entry in &snapshot.peak_hours {
        let average = if entry.orders > 0 {
            format!("{:.2}", entry.revenue / f64::from(entry.orders))
        } else {
            String::new()
        };
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.2},{},{average}",
            entry.hour,
            TimeBlock::of_hour(entry.hour).slug(),
            TradingBand::of_hour(entry.hour).slug(),
            entry.traffic,
            entry.revenue,
            entry.orders,
        );
    }
    csv
}

/// All five charts stacked into one standalone SVG document.
pub fn dashboard_sheet_svg(
    snapshot: &Snapshot,
    theme: &Theme,
    locale: &NumberLocale,
    title: impl Fn(ChartKind) -> String,
) -> String {
    let scenes: Vec<_> = dashboard_charts(snapshot, theme, locale)
        .iter()
        .map(|chart| (chart.kind(), chart.scene()))
        .collect();

    let width = scenes
        .iter()
        .map(|(_, scene)| scene.width)
        .fold(0.0, f64::max)
        + SHEET_PAD * 2.0;
    let height = scenes
        .iter()
        .map(|(_, scene)| scene.height + SHEET_TITLE_GAP + SHEET_PAD)
        .sum::<f64>()
        + SHEET_PAD;

    let mut body = String::new();
    let mut y = SHEET_PAD;
    for (kind, scene) in &scenes {
        let _ = write!(
            body,
            "<text x='{}' y='{}' fill='{SHEET_INK}' font-size='16' font-weight='600'>{}</text>",
            SHEET_PAD,
            y + 16.0,
            crate::charts::scene::escape(&title(*kind)),
        );
        y += SHEET_TITLE_GAP;
        body.push_str(&scene.to_svg_group(SHEET_PAD, y));
        y += scene.height + SHEET_PAD;
    }

    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}' font-family='Inter, sans-serif'>\
         <rect width='{w}' height='{h}' fill='{SHEET_BACKGROUND}'/>{body}</svg>",
        w = crate::charts::scene::num(width),
        h = crate::charts::scene::num(height),
    )
}

/// Rasterize an SVG document into PNG bytes.
#[cfg(not(target_arch = "wasm32"))]
pub fn render_png(svg: &str) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| ExportError::Render(err.to_string()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or(ExportError::Render("empty canvas".into()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // The background is opaque, so premultiplied RGBA equals straight RGBA.
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| ExportError::Render(err.to_string()))?
            .write_image_data(pixmap.data())
            .map_err(|err| ExportError::Render(err.to_string()))?;
    }
    Ok(buffer)
}

#[cfg(target_arch = "wasm32")]
pub fn render_png(_svg: &str) -> Result<Vec<u8>, ExportError> {
    Err(ExportError::Unavailable("PNG export is only available on desktop"))
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!("[year][month][day]_[hour][minute][second]"))
        .unwrap_or_else(|_| "export".into())
}

async fn perform_export(
    kind: ExportKind,
    snapshot: Rc<Snapshot>,
    theme: Theme,
    locale: NumberLocale,
    titles: Vec<(ChartKind, String)>,
) -> Result<Delivery, ExportError> {
    let bytes = match kind {
        ExportKind::Json => {
            let json = snapshot_json(&snapshot)?;
            if let Err(err) = copy_to_clipboard(&json) {
                tracing::warn!(%err, "snapshot JSON not copied to clipboard");
            }
            json.into_bytes()
        }
        ExportKind::Csv => hourly_csv(&snapshot).into_bytes(),
        ExportKind::Svg | ExportKind::Png => {
            let svg = dashboard_sheet_svg(&snapshot, &theme, &locale, |chart| {
                titles
                    .iter()
                    .find(|(k, _)| *k == chart)
                    .map(|(_, title)| title.clone())
                    .unwrap_or_else(|| chart.slug().to_string())
            });
            if kind == ExportKind::Png {
                render_png(&svg)?
            } else {
                svg.into_bytes()
            }
        }
    };
    deliver(&kind.filename(&timestamp_slug()), kind.mime(), bytes).await
}

#[cfg(not(target_arch = "wasm32"))]
fn copy_to_clipboard(payload: &str) -> Result<(), ExportError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
    clipboard
        .set_text(payload.to_string())
        .map_err(|err| ExportError::Clipboard(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn copy_to_clipboard(_payload: &str) -> Result<(), ExportError> {
    Err(ExportError::Clipboard("not supported in the browser build".into()))
}

#[cfg(not(target_arch = "wasm32"))]
async fn deliver(filename: &str, _mime: &str, bytes: Vec<u8>) -> Result<Delivery, ExportError> {
    let dir = directories::ProjectDirs::from("com", "CafeAnalytics", "CafeAnalytics")
        .ok_or(ExportError::Unavailable("unable to determine export directory"))?
        .data_dir()
        .join("exports");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "export written");
    Ok(Delivery::Saved(path.to_string_lossy().to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn deliver(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Delivery, ExportError> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    const BROWSER: ExportError = ExportError::Unavailable("browser download failed");

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts).map_err(|_| BROWSER)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|_| BROWSER)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(BROWSER)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| BROWSER)?
        .dyn_into()
        .map_err(|_| BROWSER)?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    Url::revoke_object_url(&url).ok();

    tracing::info!(filename, "export download started");
    Ok(Delivery::Downloaded)
}

fn working_text(kind: ExportKind) -> String {
    match kind {
        ExportKind::Json => t!("export-working-json"),
        ExportKind::Csv => t!("export-working-csv"),
        ExportKind::Svg => t!("export-working-svg"),
        ExportKind::Png => t!("export-working-png"),
    }
}

fn chart_titles() -> Vec<(ChartKind, String)> {
    ChartKind::ALL
        .into_iter()
        .map(|kind| (kind, super::view::chart_title(kind)))
        .collect()
}

#[component]
pub fn ExportPanel(snapshot: Rc<Snapshot>, theme: Theme, locale: NumberLocale) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = matches!(status(), ExportStatus::Working(_));

    let start = move |kind: ExportKind| {
        let mut status = status;
        if matches!(status(), ExportStatus::Working(_)) {
            return;
        }
        status.set(ExportStatus::Working(kind));
        let snapshot = Rc::clone(&snapshot);
        let theme = theme.clone();
        let titles = chart_titles();
        spawn(async move {
            match perform_export(kind, snapshot, theme, locale, titles).await {
                Ok(Delivery::Saved(path)) => {
                    status.set(ExportStatus::Done(t!("export-saved", path = path.as_str())))
                }
                Ok(Delivery::Downloaded) => status.set(ExportStatus::Done(t!("export-downloaded"))),
                Err(err) => {
                    tracing::warn!(?kind, %err, "export failed");
                    status.set(ExportStatus::Failed(t!("export-failed", detail = err.to_string())))
                }
            }
        });
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(kind) => Some(("export-panel__status", working_text(kind))),
        ExportStatus::Done(message) => Some(("export-panel__status export-panel__status--success", message)),
        ExportStatus::Failed(message) => Some(("export-panel__status export-panel__status--error", message)),
    };

    let on_json = start.clone();
    let on_csv = start.clone();
    let on_svg = start.clone();
    let on_png = start;

    rsx! {
        section { class: "dashboard-card export-panel",
            div { class: "dashboard-card__header",
                h2 { {t!("export-title")} }
            }
            p { class: "dashboard-card__meta", {t!("export-summary")} }
            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy,
                    onclick: move |_| on_json(ExportKind::Json),
                    {t!("export-json")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy,
                    onclick: move |_| on_csv(ExportKind::Csv),
                    {t!("export-csv")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy,
                    onclick: move |_| on_svg(ExportKind::Svg),
                    {t!("export-svg")}
                }
                if Platform::current().renders_png() {
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: busy,
                        onclick: move |_| on_png(ExportKind::Png),
                        {t!("export-png")}
                    }
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", role: "status", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::EN_US;
    use crate::core::snapshot::fixtures::snapshot;

    #[test]
    fn json_round_trips_the_snapshot() {
        let snap = snapshot();
        let json = snapshot_json(&snap).unwrap();
        assert!(json.contains("\"totalSales\""));
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snap);
    }

    #[test]
    fn csv_has_header_and_one_row_per_hour() {
        let csv = hourly_csv(&snapshot());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 25);
        assert_eq!(
            lines[0],
            "hour,time_block,trading_band,traffic,revenue,orders,average_order_value"
        );
        assert_eq!(lines[8], "7,morning,morning-peak,50,470.00,20,23.50");
        assert_eq!(lines[24], "23,evening,low-traffic,50,630.00,20,31.50");
    }

    #[test]
    fn csv_leaves_average_blank_without_orders() {
        let mut snap = snapshot();
        snap.peak_hours[3].orders = 0;
        let csv = hourly_csv(&snap);
        assert_eq!(csv.lines().nth(4), Some("3,evening,low-traffic,50,430.00,0,"));
    }

    #[test]
    fn sheet_contains_every_chart_title() {
        let svg = dashboard_sheet_svg(&snapshot(), &Theme::default(), &EN_US, |kind| {
            format!("<{}>", kind.slug())
        });
        assert!(svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg'"));
        assert!(svg.ends_with("</svg>"));
        for slug in [
            "product-performance",
            "customer-segments",
            "peak-hours",
            "product-categories",
            "satisfaction",
        ] {
            assert!(svg.contains(&format!("&lt;{slug}&gt;")), "missing {slug}");
        }
        assert_eq!(svg.matches("<g transform=").count(), 5);
    }

    #[test]
    fn filenames_carry_extension() {
        assert_eq!(ExportKind::Csv.filename("20240101_000000"), "cafe-analytics-20240101_000000.csv");
        assert_eq!(ExportKind::Png.mime(), "image/png");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn png_render_produces_png_signature() {
        let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='20' height='10'>\
                   <rect width='20' height='10' fill='#4F46E5'/></svg>";
        let bytes = render_png(svg).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

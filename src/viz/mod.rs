//! Export step: draw a [`RenderedChart`] to **SVG** or **PNG**.
//!
//! - Distinct series colors (Microsoft Office palette)
//! - Y axis rescaled to thousands/millions/… with the scale in the axis title
//! - Locale-aware tick labels (`30,000` vs `30.000`)
//! - Legend outside the plot area: `Right`, `Top` or `Bottom`
//! - Categorical x axis for bar charts, rotated labels for country clusters

pub mod fonts;
pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{DEFAULT_LEGEND_MODE, ExportOptions, LegendMode, OutputFormat};

use crate::charts::{self, ChartBody, ChartKind, RenderedChart, stack_segments};
use anyhow::{Result, anyhow};
use log::debug;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;

use fonts::ensure_font;
use legend::{LegendGlyph, LegendItem, draw_legend_panel, estimate_band_height_px};
use text::estimate_text_width_px;
use util::{
    choose_axis_scale, compute_left_label_area_px, format_tick, is_percentage_like, map_locale,
    office_color, stacked_color,
};

const MARGIN: i32 = 16;
const Y_TICKS: usize = 10;
const TICK_FONT_PX: u32 = 12;
const RIGHT_LEGEND_PCT: i32 = 25;

/// Draw `chart` into `out_path`. `.svg` selects the SVG backend, anything
/// else the bitmap backend (format from the extension, e.g. `.png`).
///
/// Fails when no font can be registered or the backend cannot write.
pub fn export_chart<P: AsRef<Path>>(
    chart: &RenderedChart,
    out_path: P,
    opts: &ExportOptions,
) -> Result<()> {
    ensure_font(opts.font.as_deref())?;
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (opts.width, opts.height);

    match OutputFormat::from_path(out_path) {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_chart(root, chart, opts)?;
        }
        OutputFormat::Png => {
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_chart(root, chart, opts)?;
        }
    }
    debug!("wrote {}", out_path.display());
    Ok(())
}

/// Y range in data units plus the scale applied to tick values.
struct YAxis {
    lo: f64,
    hi: f64,
    scale: f64,
    title: String,
}

impl YAxis {
    fn for_chart(chart: &RenderedChart) -> Self {
        let (mut lo, mut hi) = chart.value_range().unwrap_or((0.0, 1.0));
        if (hi - lo).abs() < f64::EPSILON {
            lo -= 1.0;
            hi += 1.0;
        }
        let pad = (hi - lo) * 0.05;
        hi += pad;
        // bars stand on the zero baseline; lines get symmetric headroom
        if lo < 0.0 || chart.kind == ChartKind::Line {
            lo -= pad;
        }

        let (scale, word) = if is_percentage_like(&chart.y_label) {
            (1.0, "")
        } else {
            choose_axis_scale(lo.abs().max(hi.abs()))
        };
        let title = if word.is_empty() {
            chart.y_label.clone()
        } else {
            format!("{} ({word})", chart.y_label)
        };
        Self {
            lo,
            hi,
            scale,
            title,
        }
    }

    fn scaled(&self) -> std::ops::Range<f64> {
        (self.lo / self.scale)..(self.hi / self.scale)
    }
}

/// Integer x layout for categorical bars: every bar is two units wide and
/// each cluster keeps one free unit on either side, so a cluster's center is
/// always an integer tick.
#[derive(Debug, Clone, Copy)]
struct BarLayout {
    per_group: i32,
}

impl BarLayout {
    fn new(per_group: usize) -> Self {
        Self {
            per_group: per_group.max(1) as i32,
        }
    }

    fn group_width(self) -> i32 {
        2 * self.per_group + 2
    }

    fn extent(self, groups: usize) -> i32 {
        (groups as i32 * self.group_width()).max(1)
    }

    fn bar_span(self, group: usize, bar: usize) -> (i32, i32) {
        let x0 = group as i32 * self.group_width() + 1 + 2 * bar as i32;
        (x0, x0 + 2)
    }

    /// Category whose center tick is `x`.
    fn category_at(self, x: i32) -> Option<usize> {
        let off = x - 1 - self.per_group;
        (off >= 0 && off % self.group_width() == 0).then(|| (off / self.group_width()) as usize)
    }
}

struct Bar {
    x0: i32,
    x1: i32,
    bottom: f64,
    top: f64,
    color: RGBAColor,
}

fn legend_items(chart: &RenderedChart) -> Vec<LegendItem> {
    let (glyph, color): (LegendGlyph, fn(usize) -> RGBAColor) = match chart.kind {
        ChartKind::Line => (LegendGlyph::Line, office_color),
        ChartKind::GroupedBar => (LegendGlyph::Bar, office_color),
        ChartKind::StackedBar => (LegendGlyph::Bar, stacked_color),
    };
    chart
        .legend_labels()
        .into_iter()
        .enumerate()
        .map(|(i, label)| LegendItem {
            label: label.to_string(),
            color: color(i),
            glyph,
        })
        .collect()
}

/// Split a line into runs of consecutive present values. Missing values
/// break the line instead of being drawn as zero.
fn contiguous_runs(points: &[(i32, Option<f64>)], scale: f64) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut cur = Vec::new();
    for &(x, v) in points {
        match v {
            Some(v) => cur.push((x, v / scale)),
            None if !cur.is_empty() => runs.push(std::mem::take(&mut cur)),
            None => {}
        }
    }
    if !cur.is_empty() {
        runs.push(cur);
    }
    runs
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, chart: &RenderedChart, opts: &ExportOptions) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (locale, dec_sep) = map_locale(&opts.locale);
    let fmt_y = |v: f64| format_tick(v, locale, dec_sep);
    let y = YAxis::for_chart(chart);
    let left_px = compute_left_label_area_px(
        y.lo / y.scale,
        y.hi / y.scale,
        Y_TICKS,
        TICK_FONT_PX,
        fmt_y,
    );
    let axis_x_start_px = MARGIN + left_px as i32;

    let items = legend_items(chart);
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    let (root_w, root_h) = root.dim_in_pixel();

    let (plot_area, legend_area) = match opts.legend {
        LegendMode::Right => root.split_horizontally((100 - RIGHT_LEGEND_PCT).percent_width()),
        LegendMode::Top => {
            let h = estimate_band_height_px(&labels, axis_x_start_px, root_w as i32).max(40);
            let (legend, plot) = root.split_vertically(h);
            (plot, legend)
        }
        LegendMode::Bottom => {
            let h = estimate_band_height_px(&labels, axis_x_start_px, root_w as i32).max(40);
            let (plot, legend) = root.split_vertically((root_h as i32 - h).max(40));
            (plot, legend)
        }
    };

    match &chart.body {
        ChartBody::Lines(lines) => draw_line_chart(&plot_area, chart, lines, &y, &fmt_y, left_px)?,
        ChartBody::GroupedBars { categories, series } => {
            let layout = BarLayout::new(series.len());
            let mut bars = Vec::new();
            for (si, s) in series.iter().enumerate() {
                for (ci, v) in s.values.iter().enumerate() {
                    if let Some(v) = *v {
                        let (x0, x1) = layout.bar_span(ci, si);
                        bars.push(Bar {
                            x0,
                            x1,
                            bottom: 0.0,
                            top: v,
                            color: office_color(si),
                        });
                    }
                }
            }
            draw_bar_chart(&plot_area, chart, categories, layout, &bars, &y, &fmt_y, left_px)?;
        }
        ChartBody::StackedBars { categories, layers } => {
            let layout = BarLayout::new(1);
            let mut bars = Vec::new();
            for ci in 0..categories.len() {
                let (x0, x1) = layout.bar_span(ci, 0);
                for seg in stack_segments(layers, ci) {
                    bars.push(Bar {
                        x0,
                        x1,
                        bottom: seg.bottom,
                        top: seg.top,
                        color: stacked_color(seg.layer),
                    });
                }
            }
            draw_bar_chart(&plot_area, chart, categories, layout, &bars, &y, &fmt_y, left_px)?;
        }
    }

    draw_legend_panel(&legend_area, &items, opts.legend, axis_x_start_px)?;

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    legend_area.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_line_chart<DB, F>(
    area: &DrawingArea<DB, Shift>,
    chart: &RenderedChart,
    lines: &[charts::LineSeries],
    y: &YAxis,
    fmt_y: &F,
    left_px: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    F: Fn(f64) -> String,
{
    let years = lines.iter().flat_map(|l| l.points.iter().map(|p| p.0));
    let (mut x_min, mut x_max) = years.fold((i32::MAX, i32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
    if x_min > x_max {
        (x_min, x_max) = (0, 1);
    }
    if x_min == x_max {
        x_min -= 1;
        x_max += 1;
    }

    let mut cc = ChartBuilder::on(area)
        .margin(MARGIN as u32)
        .caption(&chart.title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(x_min..x_max, y.scaled())
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |x: &i32| x.to_string();
    let y_label_fmt = |v: &f64| fmt_y(*v);
    cc.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(y.title.as_str())
        .x_labels(((x_max - x_min + 1) as usize).min(12))
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, TICK_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for (idx, line) in lines.iter().enumerate() {
        let color = office_color(idx);
        for run in contiguous_runs(&line.points, y.scale) {
            if run.len() == 1 {
                // a lone observation has no neighbour to connect to
                cc.draw_series(std::iter::once(Circle::new(run[0], 4, color.filled())))
                    .map_err(|e| anyhow!("{:?}", e))?;
            } else {
                cc.draw_series(LineSeries::new(run, color.stroke_width(2)))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_bar_chart<DB, F>(
    area: &DrawingArea<DB, Shift>,
    chart: &RenderedChart,
    categories: &[String],
    layout: BarLayout,
    bars: &[Bar],
    y: &YAxis,
    fmt_y: &F,
    left_px: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    F: Fn(f64) -> String,
{
    let rotate = chart.kind == ChartKind::GroupedBar;
    let bottom_px = if rotate {
        let widest = categories
            .iter()
            .map(|c| estimate_text_width_px(c, TICK_FONT_PX))
            .max()
            .unwrap_or(0);
        (widest + 40).clamp(56, 240)
    } else {
        56
    };
    let extent = layout.extent(categories.len());

    let mut cc = ChartBuilder::on(area)
        .margin(MARGIN as u32)
        .caption(&chart.title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom_px)
        .build_cartesian_2d(0..extent, y.scaled())
        .map_err(|e| anyhow!("{:?}", e))?;

    let tick_font = FontDesc::new(FontFamily::SansSerif, TICK_FONT_PX as f64, FontStyle::Normal);
    let x_tick_font = if rotate {
        tick_font.transform(FontTransform::Rotate90)
    } else {
        tick_font.clone()
    };
    let x_label_fmt = |x: &i32| {
        layout
            .category_at(*x)
            .and_then(|i| categories.get(i))
            .cloned()
            .unwrap_or_default()
    };
    let y_label_fmt = |v: &f64| fmt_y(*v);
    cc.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(y.title.as_str())
        .x_labels(extent as usize + 1)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(tick_font)
        .x_label_style(x_tick_font)
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    cc.draw_series(bars.iter().map(|b| {
        let (lo, hi) = (b.bottom.min(b.top), b.bottom.max(b.top));
        Rectangle::new(
            [(b.x0, lo / y.scale), (b.x1, hi / y.scale)],
            b.color.filled(),
        )
    }))
    .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

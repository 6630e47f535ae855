//! Legend panels drawn next to (never over) the plot area.
//!
//! Top/Bottom bands flow items left to right into rows. The height estimator
//! and the drawing code share [`flow_rows`], so the reserved band always
//! matches what gets drawn.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, wrap_text_to_width};
use super::types::LegendMode;

const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 4;
const PAD: i32 = 8;
const GLYPH_W: i32 = 18;
const GLYPH_TO_TEXT: i32 = 8;
const TRAILING_GAP: i32 = 16;

/// How an entry is marked: a stroke for lines, a filled square for bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGlyph {
    Line,
    Bar,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub label: String,
    pub color: RGBAColor,
    pub glyph: LegendGlyph,
}

/// One placed entry in a flowed band: item index, x offset, wrapped lines.
struct Placed {
    item: usize,
    x: i32,
    lines: Vec<String>,
}

/// Greedy left-to-right packing of labels into rows of width `total_w`,
/// starting each row at `start_x`.
fn flow_rows<S: AsRef<str>>(labels: &[S], start_x: i32, total_w: i32) -> Vec<Vec<Placed>> {
    let usable = total_w - PAD;
    let text_cap = (((usable - start_x) as f32 * 0.4) as i32).max(120) as u32;

    let mut rows: Vec<Vec<Placed>> = Vec::new();
    let mut cur: Vec<Placed> = Vec::new();
    let mut x = start_x;
    for (item, label) in labels.iter().enumerate() {
        let lines = wrap_text_to_width(label.as_ref(), FONT_PX, text_cap);
        let text_w = lines
            .iter()
            .map(|l| estimate_text_width_px(l, FONT_PX) as i32)
            .max()
            .unwrap_or(0);
        let block_w = GLYPH_W + GLYPH_TO_TEXT + text_w + TRAILING_GAP;
        if x + block_w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = start_x;
        }
        cur.push(Placed { item, x, lines });
        x += block_w;
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

fn row_height(row: &[Placed]) -> i32 {
    row.iter()
        .map(|p| p.lines.len().max(1) as i32 * LINE_H)
        .max()
        .unwrap_or(LINE_H)
}

/// Height in pixels a Top/Bottom band needs for `labels`.
pub fn estimate_band_height_px<S: AsRef<str>>(labels: &[S], start_x: i32, total_w: i32) -> i32 {
    let rows = flow_rows(labels, start_x, total_w);
    let body: i32 = rows.iter().map(|r| row_height(r)).sum::<i32>()
        + ROW_GAP * (rows.len().saturating_sub(1) as i32);
    body + 2 * PAD
}

fn draw_glyph<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: i32,
    y_center: i32,
    item: &LegendItem,
) -> Result<()> {
    match item.glyph {
        LegendGlyph::Line => area
            .draw(&PathElement::new(
                vec![(x, y_center), (x + GLYPH_W, y_center)],
                item.color.stroke_width(3),
            ))
            .map_err(|e| anyhow!("{:?}", e)),
        LegendGlyph::Bar => area
            .draw(&Rectangle::new(
                [(x + 3, y_center - 6), (x + GLYPH_W - 3, y_center + 6)],
                item.color.filled(),
            ))
            .map_err(|e| anyhow!("{:?}", e)),
    }
}

fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lines: &[String],
    x: i32,
    top: i32,
) -> Result<()> {
    let style = TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as i32 * LINE_H + LINE_H / 2;
        area.draw(&Text::new(line.as_str(), (x, y), style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Draw `items` into `legend_area`.
///
/// `axis_x_start_px` aligns Top/Bottom bands with the plot's x axis.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    placement: LegendMode,
    axis_x_start_px: i32,
) -> Result<()> {
    legend_area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (w, _) = legend_area.dim_in_pixel();
    let w = w as i32;

    match placement {
        LegendMode::Right => {
            let text_x = PAD + GLYPH_W + GLYPH_TO_TEXT;
            let max_text_w = (w - text_x - PAD).max(40) as u32;
            // start below the chart caption
            let mut y = PAD + 40;
            for item in items {
                let lines = wrap_text_to_width(&item.label, FONT_PX, max_text_w);
                let block_h = lines.len().max(1) as i32 * LINE_H;
                draw_glyph(legend_area, PAD, y + LINE_H / 2, item)?;
                draw_lines(legend_area, &lines, text_x, y)?;
                y += block_h + ROW_GAP;
            }
        }
        LegendMode::Top | LegendMode::Bottom => {
            let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
            let mut y = PAD;
            for row in flow_rows(&labels, axis_x_start_px, w) {
                let h = row_height(&row);
                for placed in &row {
                    let item = &items[placed.item];
                    draw_glyph(legend_area, placed.x, y + LINE_H / 2, item)?;
                    draw_lines(
                        legend_area,
                        &placed.lines,
                        placed.x + GLYPH_W + GLYPH_TO_TEXT,
                        y,
                    )?;
                }
                y += h + ROW_GAP;
            }
        }
    }
    Ok(())
}

//! Colors, axis scaling and tick formatting.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Colors for the two layers of a stacked bar: blue base, green top.
pub fn stacked_color(layer: usize) -> RGBAColor {
    match layer {
        0 => office_color(0),
        1 => office_color(5),
        n => office_color(n),
    }
}

/// Pick a single Y-axis scale and its label from the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Percent-like axes are never rescaled.
pub fn is_percentage_like(label: &str) -> bool {
    let l = label.to_ascii_lowercase();
    l.contains('%') || l.contains("percent") || l.contains("per cent")
}

/// Map a locale tag to a `num_format::Locale` and its decimal separator.
///
/// Supported tags (case-insensitive): `en`, `de`, `fr`, `es`, `it`, `pt`, `nl`
/// and their `xx_XX` forms. Anything else is English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Format an already-scaled tick value.
///
/// Large values get locale thousands separators; small ones keep up to two
/// decimals with the locale's decimal separator.
pub fn format_tick(v: f64, locale: &Locale, dec_sep: char) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        return (v.round() as i64).to_formatted_string(locale);
    }
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    if dec_sep == '.' {
        s
    } else {
        s.replace('.', &dec_sep.to_string())
    }
}

/// Width of the Y label area in pixels, sized to the widest tick label.
///
/// `format` must be the formatter handed to `configure_mesh`.
pub fn compute_left_label_area_px<F>(
    ymin_scaled: f64,
    ymax_scaled: f64,
    ticks: usize,
    font_px: u32,
    format: F,
) -> u32
where
    F: Fn(f64) -> String,
{
    let widest = (0..=ticks)
        .map(|i| {
            let t = if ticks == 0 {
                0.0
            } else {
                i as f64 / ticks as f64
            };
            let v = ymin_scaled + (ymax_scaled - ymin_scaled) * t;
            estimate_text_width_px(&format(v), font_px)
        })
        .max()
        .unwrap_or(0);

    // room for tick marks and the rotated axis description
    widest.saturating_add(40).clamp(60, 160)
}

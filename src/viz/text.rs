//! Text measurement and wrapping for legend and axis layout.

/// Heuristic pixel width of `text` (Plotters has no layout-free measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Cut `text` so it fits `max_px`, ending in a single ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = text.chars().collect();
    while !out.is_empty() {
        out.pop();
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) <= max_px {
            break;
        }
    }
    out.push('…');
    out
}

/// Greedy word wrap into lines no wider than `max_px`.
/// Words longer than a line are hard-broken by characters.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    let fits = |s: &str| estimate_text_width_px(s, font_px) <= max_px;
    if max_px <= 12 {
        return vec![truncate_to_width(text, font_px, max_px)];
    }

    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if fits(&candidate) {
            cur = candidate;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if fits(word) {
            cur = word.to_string();
            continue;
        }
        for ch in word.chars() {
            cur.push(ch);
            if !fits(&cur) {
                let ch = cur.pop().unwrap_or(ch);
                if cur.is_empty() {
                    lines.push(truncate_to_width(word, font_px, max_px));
                    break;
                }
                lines.push(std::mem::take(&mut cur));
                cur.push(ch);
            }
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        // 14px font → 8.4px per char; 100px fits 11 chars
        let lines = wrap_text_to_width("United Kingdom Netherlands", 14, 100);
        assert_eq!(lines, vec!["United", "Kingdom", "Netherlands"]);
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text_to_width("France", 14, 200), vec!["France"]);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        let t = truncate_to_width("Total greenhouse gas emissions", 10, 60);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 10) <= 60);
    }
}

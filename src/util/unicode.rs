use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `s` in terminal cells, counting tabs as four.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_display_width).sum()
}

/// Cut `s` down to at most `max_cells` cells, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    // The ellipsis mark takes the last cell.
    let Some(keep) = max_cells.checked_sub(1) else {
        return String::new();
    };
    let mut out = String::new();
    let mut used = 0;
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if used + gw > keep {
            break;
        }
        out.push_str(grapheme);
        used += gw;
    }
    out.push('\u{2026}');
    out
}

/// Word-wrap a string to `max_cells` terminal cells per line.
///
/// Embedded newlines start a fresh line. Words wider than a full line are
/// broken at grapheme boundaries. Always returns at least one line.
pub fn wrap_to_width(s: &str, max_cells: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in s.lines() {
        wrap_line(raw_line, max_cells, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_line(s: &str, max_cells: usize, out: &mut Vec<String>) {
    if max_cells == 0 || s.trim().is_empty() {
        out.push(String::new());
        return;
    }
    let mut line = String::new();
    let mut width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);
        if width > 0 && width + 1 + word_width > max_cells {
            out.push(std::mem::take(&mut line));
            width = 0;
        }
        if word_width <= max_cells {
            if width > 0 {
                line.push(' ');
                width += 1;
            }
            line.push_str(word);
            width += word_width;
        } else {
            // Wider than a full line: break at grapheme boundaries.
            for grapheme in word.graphemes(true) {
                let gw = grapheme_display_width(grapheme);
                if width > 0 && width + gw > max_cells {
                    out.push(std::mem::take(&mut line));
                    width = 0;
                }
                line.push_str(grapheme);
                width += gw;
            }
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
}

/// Width of a single grapheme cluster.
fn grapheme_display_width(g: &str) -> usize {
    match g {
        "\t" => 4,
        _ => UnicodeWidthStr::width(g),
    }
}

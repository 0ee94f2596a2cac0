use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` cells, ending in `…` when anything was cut.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let Some(budget) = max_cells.checked_sub(1) else {
        return String::new();
    };
    let mut used = 0;
    let mut out: String = s
        .graphemes(true)
        .take_while(|g| {
            used += display_width(g);
            used <= budget
        })
        .collect();
    out.push(ELLIPSIS);
    out
}

/// Truncate, then pad with spaces to exactly `cells` wide
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let pad = cells.saturating_sub(display_width(&out));
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`; None at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..).filter(|r| !r.is_empty())?;
    let first = rest.graphemes(true).next()?;
    Some(byte_offset + first.len())
}

/// Byte offset of the grapheme before `byte_offset`; None at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset).filter(|h| !h.is_empty())?;
    let last = head.graphemes(true).next_back()?;
    Some(byte_offset - last.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("Task 12"), 7);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("cafe\u{0301}"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("Task 1", 10), "Task 1");
        assert_eq!(truncate_to_width("Task 1", 6), "Task 1");
        assert_eq!(truncate_to_width("Deploy the thing", 8), "Deploy \u{2026}");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn truncation_respects_wide_chars() {
        // Budget of 4 cells for "你好世界" leaves room for one 2-cell char
        let cut = truncate_to_width("你好世界", 5);
        assert_eq!(cut, "你好\u{2026}");
        let cut = truncate_to_width("你好世界", 4);
        assert_eq!(cut, "你\u{2026}");
        assert!(display_width(&cut) <= 4);
    }

    #[test]
    fn fit_pads_short_text() {
        assert_eq!(fit_to_width("LOW", 6), "LOW   ");
        assert_eq!(fit_to_width("CRITICAL", 6), "CRITI\u{2026}");
        assert_eq!(fit_to_width("你", 3), "你 ");
    }

    #[test]
    fn grapheme_steps() {
        let s = "a\u{1F389}e\u{0301}";
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(5));
        assert_eq!(next_grapheme_boundary(s, 5), Some(s.len()));
        assert_eq!(next_grapheme_boundary(s, s.len()), None);

        assert_eq!(prev_grapheme_boundary(s, s.len()), Some(5));
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn zwj_sequence_is_one_step() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(next_grapheme_boundary(family, 0), Some(family.len()));
        assert_eq!(prev_grapheme_boundary(family, family.len()), Some(0));
    }
}

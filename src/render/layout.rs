use crate::style::FIELD_LINE_HEIGHT;
use crate::surface::TextStyle;

/// A field value broken into lines for one column.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLayout {
    pub lines: Vec<String>,
    /// Vertical space the value occupies below its baseline, in mm.
    pub height: f32,
}

/// Wrap `value` to `max_width` mm in `style`. Always yields at least one line.
pub fn layout_cell(value: &str, max_width: f32, style: &TextStyle) -> CellLayout {
    let lines = wrap_text(value, max_width, style);
    let height = lines.len() as f32 * FIELD_LINE_HEIGHT;
    CellLayout { lines, height }
}

/// Row advance: the tallest cell decides, so a wrapped value never overlaps the next row.
pub fn row_height<'a>(cells: impl IntoIterator<Item = &'a CellLayout>) -> f32 {
    cells.into_iter().map(|c| c.height).fold(0.0, f32::max)
}

/// Greedy word wrap on measured widths. Explicit newlines start a new line;
/// a single word wider than the column is broken between characters.
/// Spacing inside a line is kept as typed; spaces at a break are dropped.
pub fn wrap_text(text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
    let measure = |s: &str| style.face.text_width(s, style.size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        // Nothing placed on the current line yet, not even a leading space
        let mut fresh = true;
        let mut wrapped = false;
        for word in paragraph.split(' ') {
            if fresh && wrapped && word.is_empty() {
                continue;
            }
            let candidate = if fresh {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                fresh = false;
                continue;
            }
            if !fresh {
                let line = std::mem::take(&mut current);
                lines.push(line.trim_end().to_string());
                fresh = true;
                wrapped = true;
            }
            if word.is_empty() {
                continue;
            }
            fresh = false;
            if measure(word) <= max_width {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                current.push(ch);
                if measure(&current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, ch.to_string()));
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Face;
    use crate::style::BLACK;

    const VALUE: TextStyle = TextStyle::new(Face::HelveticaBold, 10.0, BLACK);

    #[test]
    fn short_value_is_one_line() {
        let cell = layout_cell("Sedan", 60.0, &VALUE);
        assert_eq!(cell.lines, vec!["Sedan"]);
        assert_eq!(cell.height, 4.0);
    }

    #[test]
    fn long_value_wraps_within_width() {
        let text = "Vista Travels Corporate Accounts Division South Zone";
        let cell = layout_cell(text, 30.0, &VALUE);
        assert!(cell.lines.len() > 1);
        for line in &cell.lines {
            assert!(VALUE.face.text_width(line, VALUE.size) <= 30.0, "{line}");
        }
        assert_eq!(cell.lines.join(" "), text);
        assert_eq!(cell.height, cell.lines.len() as f32 * 4.0);
    }

    #[test]
    fn unbreakable_word_is_split() {
        let cell = layout_cell("TN01AB1234TN01AB1234TN01AB1234", 20.0, &VALUE);
        assert!(cell.lines.len() > 1);
        assert_eq!(cell.lines.concat(), "TN01AB1234TN01AB1234TN01AB1234");
    }

    #[test]
    fn inner_spacing_is_kept() {
        let cell = layout_cell("Gate  4,   Terminal 1", 80.0, &VALUE);
        assert_eq!(cell.lines, vec!["Gate  4,   Terminal 1"]);
    }

    #[test]
    fn spaces_at_a_break_are_dropped() {
        let lines = wrap_text("Chennai     Airport", 20.0, &VALUE);
        assert_eq!(lines, vec!["Chennai", "Airport"]);
        let lines = wrap_text("Chennai            Airport", 20.0, &VALUE);
        assert_eq!(lines, vec!["Chennai", "Airport"]);
    }

    #[test]
    fn empty_value_keeps_one_line() {
        assert_eq!(layout_cell("", 40.0, &VALUE).lines, vec![""]);
    }

    #[test]
    fn row_height_is_tallest_cell() {
        let a = layout_cell("A", 40.0, &VALUE);
        let b = layout_cell("one two three four five six seven eight", 20.0, &VALUE);
        assert_eq!(row_height([&a, &b]), b.height);
    }
}

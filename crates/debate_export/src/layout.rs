//! Page layout for transcripts.
//!
//! Turns messages into positioned text lines on US Letter pages. Coordinates
//! are PDF points with the origin at the bottom-left corner.

use debate_chat::Message;

use crate::error::{ExportError, ExportResult};

/// US Letter width in points
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter height in points
pub const PAGE_HEIGHT: f32 = 792.0;

/// Font faces available to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Resource name used in content streams
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }
}

/// Helvetica advance widths for ' ' through '~', in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width assumed for glyphs outside printable ASCII
const FALLBACK_WIDTH: u16 = 667;

/// Rendered width of `text` in Helvetica at `size` points
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| match ch {
            ' '..='~' => u32::from(HELVETICA_WIDTHS[ch as usize - 0x20]),
            _ => u32::from(FALLBACK_WIDTH),
        })
        .sum();
    units as f32 * size / 1000.0
}

/// A single line of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: FontFace,
    pub size: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PositionedLine>,
}

/// Geometry and text settings for a transcript document
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub title: String,
    pub left_margin: f32,
    /// Distance from the page top to the first baseline, on every page
    pub top_margin: f32,
    /// A new page starts once the cursor drops below this
    pub bottom_margin: f32,
    pub title_size: f32,
    /// Gap between the title baseline and the first body line
    pub title_gap: f32,
    pub body_size: f32,
    pub line_height: f32,
    /// Maximum characters per body line, applied on top of the width limit
    pub wrap_columns: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            title: "Debate Transcript".to_string(),
            left_margin: 50.0,
            top_margin: 40.0,
            bottom_margin: 40.0,
            title_size: 16.0,
            title_gap: 40.0,
            body_size: 12.0,
            line_height: 20.0,
            wrap_columns: 90,
        }
    }
}

impl LayoutOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_wrap_columns(mut self, columns: usize) -> Self {
        self.wrap_columns = columns;
        self
    }

    pub fn validate(&self) -> ExportResult<()> {
        if self.wrap_columns == 0 {
            return Err(ExportError::InvalidLayout(
                "wrap_columns must be greater than zero".to_string(),
            ));
        }
        if self.line_height <= 0.0 || self.body_size <= 0.0 || self.title_size <= 0.0 {
            return Err(ExportError::InvalidLayout(
                "font sizes and line height must be positive".to_string(),
            ));
        }
        if self.printable_width() <= 0.0 {
            return Err(ExportError::InvalidLayout(
                "left margin leaves no printable width".to_string(),
            ));
        }
        if self.top_margin + self.bottom_margin >= PAGE_HEIGHT {
            return Err(ExportError::InvalidLayout(
                "top and bottom margins leave no room on the page".to_string(),
            ));
        }
        Ok(())
    }

    fn first_baseline(&self) -> f32 {
        PAGE_HEIGHT - self.top_margin
    }

    /// Page width minus equal left and right margins
    pub fn printable_width(&self) -> f32 {
        PAGE_WIDTH - 2.0 * self.left_margin
    }

    /// Whether a body line fits both the column limit and the printable width
    pub fn body_line_fits(&self, text: &str) -> bool {
        text.chars().count() <= self.wrap_columns
            && text_width(text, self.body_size) <= self.printable_width()
    }
}

/// Lay out the title and every message, paginating as needed.
///
/// Each message becomes `"<Role>: <content>"`, split on newlines and wrapped
/// to the printable width. Pages are only opened when a line needs one, so
/// there is never a trailing blank page.
pub fn layout_transcript(messages: &[Message], options: &LayoutOptions) -> ExportResult<Vec<PageLayout>> {
    options.validate()?;

    let mut pages = Vec::new();
    let mut page = PageLayout::default();
    let mut y = options.first_baseline();

    page.lines.push(PositionedLine {
        text: options.title.clone(),
        x: options.left_margin,
        y,
        font: FontFace::Bold,
        size: options.title_size,
    });
    y -= options.title_gap;

    for message in messages {
        let entry = message.transcript_line();
        for raw_line in entry.split('\n') {
            for line in wrap_line(raw_line, |text| options.body_line_fits(text)) {
                if y < options.bottom_margin {
                    pages.push(std::mem::take(&mut page));
                    y = options.first_baseline();
                }
                page.lines.push(PositionedLine {
                    text: line,
                    x: options.left_margin,
                    y,
                    font: FontFace::Regular,
                    size: options.body_size,
                });
                y -= options.line_height;
            }
        }
    }

    pages.push(page);
    Ok(pages)
}

/// Greedy word wrap. Words are separated by single spaces, so runs of
/// whitespace collapse. A word that fits on no line is split between
/// characters. An empty input yields one empty line.
pub fn wrap_line(line: &str, fits: impl Fn(&str) -> bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        let mut rest = word;
        while !fits(rest) {
            let split = split_point(rest, &fits);
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
        }
        current = rest.to_string();
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Byte index of the longest fitting prefix, never less than one character
fn split_point(word: &str, fits: &impl Fn(&str) -> bool) -> usize {
    let mut end = 0;
    for (idx, ch) in word.char_indices() {
        let next = idx + ch.len_utf8();
        if end > 0 && !fits(&word[..next]) {
            break;
        }
        end = next;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_lines(pages: &[PageLayout]) -> Vec<&PositionedLine> {
        pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .filter(|l| l.font == FontFace::Regular)
            .collect()
    }

    #[test]
    fn test_title_and_first_line_positions() {
        let messages = vec![Message::user("Hello")];
        let pages = layout_transcript(&messages, &LayoutOptions::default()).unwrap();

        assert_eq!(pages.len(), 1);
        let title = &pages[0].lines[0];
        assert_eq!(title.text, "Debate Transcript");
        assert_eq!(title.y, 752.0);
        assert_eq!(title.font, FontFace::Bold);
        assert_eq!(title.size, 16.0);

        let first = &pages[0].lines[1];
        assert_eq!(first.text, "User: Hello");
        assert_eq!(first.x, 50.0);
        assert_eq!(first.y, 712.0);
    }

    #[test]
    fn test_multiline_content_splits() {
        let messages = vec![Message::assistant("line one\nline two")];
        let pages = layout_transcript(&messages, &LayoutOptions::default()).unwrap();
        let lines = body_lines(&pages);

        assert_eq!(lines[0].text, "Assistant: line one");
        assert_eq!(lines[1].text, "line two");
        assert_eq!(lines[1].y, 692.0);
    }

    #[test]
    fn test_pagination_resets_to_top_margin() {
        // First page holds 34 body lines (712 down to 52)
        let messages: Vec<_> = (0..35).map(|i| Message::user(format!("arg {}", i))).collect();
        let pages = layout_transcript(&messages, &LayoutOptions::default()).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 1 + 34);
        assert_eq!(pages[0].lines.last().unwrap().y, 52.0);
        assert_eq!(pages[1].lines.len(), 1);
        assert_eq!(pages[1].lines[0].y, 752.0);
        assert_eq!(pages[1].lines[0].font, FontFace::Regular);
        assert_eq!(pages[1].lines[0].text, "User: arg 34");
    }

    #[test]
    fn test_no_trailing_blank_page() {
        let messages: Vec<_> = (0..34).map(|i| Message::user(format!("arg {}", i))).collect();
        let pages = layout_transcript(&messages, &LayoutOptions::default()).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_empty_transcript_has_title_only() {
        let pages = layout_transcript(&[], &LayoutOptions::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 1);
    }

    fn columns(limit: usize) -> impl Fn(&str) -> bool {
        move |text: &str| text.chars().count() <= limit
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("short", columns(10)), vec!["short"]);
        assert_eq!(wrap_line("", columns(10)), vec![""]);
        assert_eq!(
            wrap_line("the quick brown fox jumps", columns(10)),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap_line("abcdefghijklmno", columns(5)), vec!["abcde", "fghij", "klmno"]);
        assert_eq!(wrap_line("ab abcdefghijk", columns(5)), vec!["ab", "abcde", "fghij", "k"]);
    }

    #[test]
    fn test_wrap_line_collapses_whitespace_consistently() {
        // Same treatment whether or not the line needs wrapping
        assert_eq!(wrap_line("a   b\tc\r", columns(80)), vec!["a b c"]);
        assert_eq!(wrap_line("aa   bb   cc", columns(5)), vec!["aa bb", "cc"]);
        assert_eq!(wrap_line("   ", columns(5)), vec![""]);
    }

    #[test]
    fn test_text_width_uses_glyph_metrics() {
        assert_eq!(text_width("", 12.0), 0.0);
        // 'i' is 222 units, 'W' is 944
        assert!((text_width("i", 1000.0) - 222.0).abs() < 0.01);
        assert!((text_width("W", 1000.0) - 944.0).abs() < 0.01);
        assert!(text_width("WWW", 12.0) > text_width("iii", 12.0));
    }

    #[test]
    fn test_wide_glyphs_wrap_within_printable_width() {
        // 90 capitals fit the column limit but not the page
        let options = LayoutOptions::default();
        let messages = vec![Message::user("W".repeat(60)), Message::assistant("M ".repeat(45))];
        let pages = layout_transcript(&messages, &options).unwrap();
        let lines = body_lines(&pages);

        assert!(lines.len() > 2);
        for line in &lines {
            assert!(
                text_width(&line.text, options.body_size) <= options.printable_width(),
                "line overflows the page: {}",
                line.text
            );
        }
    }

    #[test]
    fn test_prose_still_wraps_at_column_limit() {
        let options = LayoutOptions::default().with_wrap_columns(20);
        let pages =
            layout_transcript(&[Message::user("this argument is long enough to wrap twice")], &options).unwrap();
        let texts: Vec<_> = body_lines(&pages).iter().map(|l| l.text.clone()).collect();
        assert_eq!(texts, vec!["User: this argument", "is long enough to", "wrap twice"]);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = LayoutOptions::default().with_wrap_columns(0);
        assert!(layout_transcript(&[], &options).is_err());
    }
}

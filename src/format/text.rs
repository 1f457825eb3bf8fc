/// Line breaking for replacement text.
use crate::ooxml::units::Length;
use smallvec::SmallVec;

/// Characters per line in a circular shape.
pub const CIRCULAR_LINE_WIDTH: usize = 5;

/// Characters per line in any other shape.
pub const RECTANGULAR_LINE_WIDTH: usize = 7;

const BRACKET_OPEN: char = '（';
const BRACKET_CLOSE: char = '）';

const SEPARATOR: char = '・';

/// Minimum length for splitting at [`SEPARATOR`].
const SEPARATOR_MIN_LEN: usize = 10;

/// Connective particles, in priority order.
const KEYWORDS: [&str; 6] = ["による", "としての", "への", "での", "からの", "における"];

/// Minimum length for splitting after a keyword.
const KEYWORD_MIN_LEN: usize = 12;

/// Punctuation that must not start a line.
const TRAILING_PUNCTUATION: [char; 2] = ['、', '。'];

/// Geometry category of a shape, as far as line width is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circular,
    Rectangular,
}

impl ShapeKind {
    /// Classify by aspect ratio: roughly square shapes are the circular nodes.
    ///
    /// A non-positive height counts as ratio 1.
    pub fn from_extents(width: Length, height: Length) -> Self {
        let ratio = if height.as_emu() > 0 {
            width.as_emu() as f64 / height.as_emu() as f64
        } else {
            1.0
        };
        if 0.9 < ratio && ratio < 1.1 {
            Self::Circular
        } else {
            Self::Rectangular
        }
    }

    #[inline]
    pub fn line_width(self) -> usize {
        match self {
            Self::Circular => CIRCULAR_LINE_WIDTH,
            Self::Rectangular => RECTANGULAR_LINE_WIDTH,
        }
    }
}

/// Insert line breaks into `text` for a shape of the given kind.
///
/// Titles are returned unchanged. Otherwise the first rule that applies wins:
///
/// 1. a full-width parenthetical goes on its own line, the text before it is
///    formatted recursively (an empty main clause leaves an empty first line);
/// 2. text longer than 10 characters is split once after `・`;
/// 3. text longer than 12 characters is split once after the first connective
///    particle found;
/// 4. text longer than the line width is wrapped greedily, never starting a
///    line with `、` or `。`.
///
/// # Examples
///
/// ```
/// use contextmap::format::{ShapeKind, format_text_for_shape};
///
/// assert_eq!(
///     format_text_for_shape("品質管理（ISO）", ShapeKind::Rectangular, false),
///     "品質管理\n（ISO）"
/// );
/// assert_eq!(
///     format_text_for_shape("デジタル変革推進", ShapeKind::Circular, false),
///     "デジタル変\n革推進"
/// );
/// ```
pub fn format_text_for_shape(text: &str, kind: ShapeKind, is_title: bool) -> String {
    if text.is_empty() || is_title {
        return text.to_string();
    }

    if text.contains(BRACKET_OPEN) && text.contains(BRACKET_CLOSE) {
        if let Some((main, rest)) = text.split_once(BRACKET_OPEN) {
            let main = format_text_for_shape(main, kind, false);
            return format!("{main}\n{BRACKET_OPEN}{rest}");
        }
    }

    let len = text.chars().count();

    if len > SEPARATOR_MIN_LEN {
        if let Some((head, tail)) = text.split_once(SEPARATOR) {
            return format!("{head}{SEPARATOR}\n{tail}");
        }
    }

    if len > KEYWORD_MIN_LEN {
        for keyword in KEYWORDS {
            if let Some((head, tail)) = text.split_once(keyword) {
                return format!("{head}{keyword}\n{tail}");
            }
        }
    }

    let width = kind.line_width();
    if len <= width {
        return text.to_string();
    }
    wrap(text, width)
}

/// Greedy fixed-width wrap that keeps trailing punctuation on its line.
fn wrap(text: &str, width: usize) -> String {
    let mut lines: SmallVec<[String; 8]> = SmallVec::new();
    let mut line = String::new();
    let mut line_len = 0;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        line.push(c);
        line_len += 1;
        let next_is_punctuation = chars
            .peek()
            .is_some_and(|next| TRAILING_PUNCTUATION.contains(next));
        if line_len >= width && !next_is_punctuation {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_shape_kind() {
        assert_eq!(
            ShapeKind::from_extents(Length::emu(1000), Length::emu(1000)),
            ShapeKind::Circular
        );
        assert_eq!(
            ShapeKind::from_extents(Length::emu(1090), Length::emu(1000)),
            ShapeKind::Circular
        );
        assert_eq!(
            ShapeKind::from_extents(Length::emu(1100), Length::emu(1000)),
            ShapeKind::Rectangular
        );
        assert_eq!(
            ShapeKind::from_extents(Length::emu(900), Length::emu(1000)),
            ShapeKind::Rectangular
        );
        assert_eq!(
            ShapeKind::from_extents(Length::emu(5000), Length::emu(0)),
            ShapeKind::Circular
        );
    }

    #[test]
    fn test_empty_and_title() {
        assert_eq!(format_text_for_shape("", ShapeKind::Circular, false), "");
        let title = "株式会社サンプルテクノロジーズコンテクストマップ";
        assert_eq!(format_text_for_shape(title, ShapeKind::Rectangular, true), title);
    }

    #[test]
    fn test_parenthetical() {
        assert_eq!(
            format_text_for_shape("短い（補足）", ShapeKind::Rectangular, false),
            "短い\n（補足）"
        );
        // The main clause is wrapped on its own
        assert_eq!(
            format_text_for_shape("持続可能な社会の実現（SDGs）", ShapeKind::Rectangular, false),
            "持続可能な社会\nの実現\n（SDGs）"
        );
        // Splits at the first opening bracket only
        assert_eq!(
            format_text_for_shape("A（B）C（D）", ShapeKind::Circular, false),
            "A\n（B）C（D）"
        );
        // Nothing before the bracket still leaves an empty first line
        assert_eq!(
            format_text_for_shape("（補足のみ）", ShapeKind::Rectangular, false),
            "\n（補足のみ）"
        );
        // An unmatched bracket falls through to the other rules
        assert_eq!(
            format_text_for_shape("（未完", ShapeKind::Rectangular, false),
            "（未完"
        );
    }

    #[test]
    fn test_separator() {
        assert_eq!(
            format_text_for_shape("研究開発・製品設計の強化", ShapeKind::Rectangular, false),
            "研究開発・\n製品設計の強化"
        );
        // Ten characters or fewer: wrapped by width instead
        assert_eq!(
            format_text_for_shape("開発・設計の強化", ShapeKind::Rectangular, false),
            "開発・設計の強\n化"
        );
    }

    #[test]
    fn test_keywords_in_priority_order() {
        assert_eq!(
            format_text_for_shape("地域社会への貢献によるブランド向上", ShapeKind::Rectangular, false),
            "地域社会への貢献による\nブランド向上"
        );
        assert_eq!(
            format_text_for_shape("海外市場における販売網の拡大", ShapeKind::Rectangular, false),
            "海外市場における\n販売網の拡大"
        );
        // Ten characters: too short for a keyword split
        assert_eq!(
            format_text_for_shape("市場への新規参入強化", ShapeKind::Rectangular, false),
            "市場への新規参\n入強化"
        );
    }

    #[test]
    fn test_greedy_wrap() {
        assert_eq!(format_text_for_shape("七文字ちょうど", ShapeKind::Rectangular, false), "七文字ちょうど");
        assert_eq!(format_text_for_shape("abcdefghijkl", ShapeKind::Circular, false), "abcde\nfghij\nkl");
        assert_eq!(
            format_text_for_shape("あいうえお、かきくけこ。さ", ShapeKind::Circular, false),
            "あいうえお、\nかきくけこ。\nさ"
        );
        assert_eq!(
            format_text_for_shape("あいうえお、、かき", ShapeKind::Circular, false),
            "あいうえお、、\nかき"
        );
    }

    fn strip_breaks(s: &str) -> String {
        s.chars().filter(|&c| c != '\n').collect()
    }

    proptest! {
        #[test]
        fn prop_formatting_only_inserts_breaks(
            text in "[あ-んア-ン一-十・、。（）による]{0,40}",
            circular in any::<bool>(),
        ) {
            let kind = if circular { ShapeKind::Circular } else { ShapeKind::Rectangular };
            let formatted = format_text_for_shape(&text, kind, false);
            prop_assert_eq!(strip_breaks(&formatted), strip_breaks(&text));
        }

        #[test]
        fn prop_wrapped_lines_fit_width(text in "[a-z]{0,60}", circular in any::<bool>()) {
            let kind = if circular { ShapeKind::Circular } else { ShapeKind::Rectangular };
            let formatted = format_text_for_shape(&text, kind, false);
            for line in formatted.split('\n') {
                prop_assert!(line.chars().count() <= kind.line_width());
            }
        }

        #[test]
        fn prop_title_unchanged(text in "\\PC{0,60}") {
            prop_assert_eq!(format_text_for_shape(&text, ShapeKind::Circular, true), text);
        }
    }
}

/// Font size heuristic for replaced shape text.
use crate::ooxml::units::Length;

/// Base size of a rewritten run, which has no size of its own.
pub const DEFAULT_FONT_SIZE: Length = Length::pt(10);

/// Smallest size a title is shrunk to.
pub const TITLE_FLOOR: Length = Length::pt(12);

/// A shrink step: applies to text with at least `min_lines` lines or more
/// than `min_len` characters.
#[derive(Debug, Clone, Copy)]
struct Tier {
    min_lines: usize,
    min_len: usize,
    factor: f64,
    floor: Length,
}

/// Checked in order; the first match wins.
const TIERS: [Tier; 3] = [
    Tier {
        min_lines: 3,
        min_len: 25,
        factor: 0.6,
        floor: Length::pt(7),
    },
    Tier {
        min_lines: 2,
        min_len: 15,
        factor: 0.7,
        floor: Length::pt(8),
    },
    Tier {
        min_lines: usize::MAX,
        min_len: 10,
        factor: 0.8,
        floor: Length::pt(9),
    },
];

/// Factor for short single-line text; no floor applies.
const SHORT_TEXT_FACTOR: f64 = 0.9;

const TITLE_FACTOR: f64 = 0.8;

/// New font size for `text` (already formatted) given the run's current size.
///
/// Replacement passes [`DEFAULT_FONT_SIZE`] as `current`.
///
/// `len` counts characters including line breaks.
///
/// # Examples
///
/// ```
/// use contextmap::format::adjust_font_size;
/// use contextmap::ooxml::Length;
///
/// assert_eq!(adjust_font_size("短い", Length::pt(10), false), Length::pt(9));
/// assert_eq!(adjust_font_size("二行の\nテキスト", Length::pt(10), false), Length::pt(8));
/// ```
pub fn adjust_font_size(text: &str, current: Length, is_title: bool) -> Length {
    if is_title {
        return current.scale(TITLE_FACTOR).max(TITLE_FLOOR);
    }

    let lines = text.matches('\n').count() + 1;
    let len = text.chars().count();

    TIERS
        .iter()
        .find(|tier| lines >= tier.min_lines || len > tier.min_len)
        .map_or_else(
            || current.scale(SHORT_TEXT_FACTOR),
            |tier| current.scale(tier.factor).max(tier.floor),
        )
}

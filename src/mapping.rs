//! Placeholder tokens and the mapping from tokens to replacement text.
//!
//! The template marks every slot with a short literal token (`企業`, `あ`,
//! `十一`, ...). Each of the five section codes owns a fixed set of slots: one
//! for the section title, five for item titles and three for social trends.

use crate::data::Section;
use phf::phf_map;
use std::collections::HashMap;

/// Token replaced by the company name.
pub const COMPANY_TOKEN: &str = "企業名";

/// Token of the slide title; replaced by the company name plus [`TITLE_SUFFIX`].
pub const TITLE_TOKEN: &str = "企業名コンテクストマップ";

pub const TITLE_SUFFIX: &str = "コンテクストマップ";

/// Item slots per section.
pub const ITEM_SLOTS: usize = 5;

/// Social trend slots per section.
pub const TREND_SLOTS: usize = 3;

/// The five fixed section codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionCode {
    /// Company
    A,
    /// Product
    B,
    /// Trends (TOP)
    C,
    /// Industry
    D,
    /// Global
    E,
}

/// Tokens owned by one section code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTable {
    pub title: &'static str,
    pub items: [&'static str; ITEM_SLOTS],
    pub trends: [&'static str; TREND_SLOTS],
}

static SECTION_CODES: phf::Map<&'static str, SectionCode> = phf_map! {
    "A" => SectionCode::A,
    "B" => SectionCode::B,
    "C" => SectionCode::C,
    "D" => SectionCode::D,
    "E" => SectionCode::E,
};

static SLOTS_A: SlotTable = SlotTable {
    title: "企業",
    items: ["あ", "い", "う", "え", "お"],
    trends: ["一", "二", "三"],
};

static SLOTS_B: SlotTable = SlotTable {
    title: "プロ",
    items: ["か", "き", "く", "け", "こ"],
    trends: ["十", "十一", "十二"],
};

static SLOTS_C: SlotTable = SlotTable {
    title: "TOP",
    items: ["さ", "し", "す", "せ", "そ"],
    trends: ["四", "五", "六"],
};

static SLOTS_D: SlotTable = SlotTable {
    title: "業界",
    items: ["た", "ち", "つ", "て", "と"],
    trends: ["十三", "十四", "十五"],
};

static SLOTS_E: SlotTable = SlotTable {
    title: "グロ",
    items: ["な", "に", "ぬ", "ね", "の"],
    trends: ["七", "八", "九"],
};

impl SectionCode {
    pub const ALL: [SectionCode; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Look up a code as written in the data file.
    #[inline]
    pub fn parse(code: &str) -> Option<Self> {
        SECTION_CODES.get(code).copied()
    }

    pub fn slots(self) -> &'static SlotTable {
        match self {
            Self::A => &SLOTS_A,
            Self::B => &SLOTS_B,
            Self::C => &SLOTS_C,
            Self::D => &SLOTS_D,
            Self::E => &SLOTS_E,
        }
    }
}

/// Flat token → text table, built once per run.
///
/// Every known token is present; an empty text means "leave the shape alone".
#[derive(Debug, Clone)]
pub struct PlaceholderMap {
    tokens: Vec<&'static str>,
    texts: HashMap<&'static str, String>,
}

impl PlaceholderMap {
    /// A map holding only the company-derived entries.
    pub fn new(company: &str) -> Self {
        let mut tokens = vec![COMPANY_TOKEN, TITLE_TOKEN];
        tokens.extend(SectionCode::ALL.iter().map(|code| code.slots().title));
        tokens.extend(SectionCode::ALL.iter().flat_map(|code| code.slots().items));
        tokens.extend(SectionCode::ALL.iter().flat_map(|code| code.slots().trends));

        let mut texts: HashMap<_, _> = tokens.iter().map(|&t| (t, String::new())).collect();
        texts.insert(COMPANY_TOKEN, company.to_string());
        texts.insert(TITLE_TOKEN, format!("{company}{TITLE_SUFFIX}"));

        Self { tokens, texts }
    }

    /// Build the map from the data sections.
    ///
    /// Sections are applied in order, so a repeated code overwrites the slots
    /// the earlier section filled. Unknown codes and data beyond the slot
    /// counts are skipped.
    pub fn build(sections: &[Section], company: &str) -> Self {
        let mut map = Self::new(company);

        for (idx, section) in sections.iter().enumerate() {
            let Some(code) = SectionCode::parse(&section.code) else {
                tracing::debug!(section = idx, code = %section.code, "Skipping section with unknown code");
                continue;
            };
            let slots = code.slots();

            map.set(slots.title, &section.section_name);
            for (token, item) in slots.items.iter().zip(&section.items) {
                map.set(token, &item.title);
            }
            for (token, trend) in slots.trends.iter().zip(&section.social_trend) {
                map.set(token, trend);
            }

            if section.items.len() > ITEM_SLOTS {
                tracing::debug!(
                    section = idx,
                    "Ignoring {} items beyond the {} slots",
                    section.items.len() - ITEM_SLOTS,
                    ITEM_SLOTS
                );
            }
            if section.social_trend.len() > TREND_SLOTS {
                tracing::debug!(
                    section = idx,
                    "Ignoring {} social trends beyond the {} slots",
                    section.social_trend.len() - TREND_SLOTS,
                    TREND_SLOTS
                );
            }
        }

        map
    }

    fn set(&mut self, token: &str, text: &str) {
        if let Some(slot) = self.texts.get_mut(token) {
            slot.clear();
            slot.push_str(text);
        }
    }

    /// Raw text for a token, including empty entries.
    #[inline]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.texts.get(token).map(String::as_str)
    }

    /// Replacement for a shape whose whole text is `token`.
    ///
    /// `None` for unknown tokens and for tokens without text.
    pub fn replacement(&self, token: &str) -> Option<&str> {
        self.get(token).filter(|text| !text.is_empty())
    }

    /// All known tokens in table order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tokens.iter().copied()
    }

    /// Number of tokens with a non-empty replacement.
    pub fn populated_len(&self) -> usize {
        self.texts.values().filter(|text| !text.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Item;

    fn section(code: &str, name: &str, items: &[&str], trends: &[&str]) -> Section {
        Section {
            code: code.to_string(),
            section_name: name.to_string(),
            items: items
                .iter()
                .map(|t| Item {
                    title: t.to_string(),
                })
                .collect(),
            social_trend: trends.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_company_entries() {
        let map = PlaceholderMap::build(&[], "アクメ");
        assert_eq!(map.replacement(COMPANY_TOKEN), Some("アクメ"));
        assert_eq!(map.replacement(TITLE_TOKEN), Some("アクメコンテクストマップ"));
        assert_eq!(map.populated_len(), 2);
        assert_eq!(map.tokens().count(), 2 + 5 * (1 + ITEM_SLOTS + TREND_SLOTS));
        assert_eq!(map.get("あ"), Some(""));
        assert_eq!(map.replacement("あ"), None);
        assert_eq!(map.get("unknown"), None);
    }

    #[test]
    fn test_items_fill_slots_in_order() {
        let sections = [section("A", "自社", &["1", "2", "3", "4", "5", "6"], &[])];
        let map = PlaceholderMap::build(&sections, "X");

        assert_eq!(map.replacement("企業"), Some("自社"));
        for (token, expected) in SLOTS_A.items.iter().zip(["1", "2", "3", "4", "5"]) {
            assert_eq!(map.replacement(token), Some(expected));
        }
        assert!(map.tokens().all(|t| map.get(t) != Some("6")));
    }

    #[test]
    fn test_trends_truncated_to_three() {
        let sections = [section("B", "製品", &[], &["t1", "t2", "t3", "t4"])];
        let map = PlaceholderMap::build(&sections, "X");

        assert_eq!(map.replacement("十"), Some("t1"));
        assert_eq!(map.replacement("十一"), Some("t2"));
        assert_eq!(map.replacement("十二"), Some("t3"));
        assert!(map.tokens().all(|t| map.get(t) != Some("t4")));
    }

    #[test]
    fn test_unknown_code_contributes_nothing() {
        let sections = [section("Z", "謎", &["x"], &["y"])];
        let map = PlaceholderMap::build(&sections, "X");
        assert_eq!(map.populated_len(), 2);
    }

    #[test]
    fn test_later_section_overwrites() {
        let sections = [
            section("D", "業界1", &["a", "b"], &[]),
            section("D", "業界2", &["c"], &[]),
        ];
        let map = PlaceholderMap::build(&sections, "X");
        assert_eq!(map.replacement("業界"), Some("業界2"));
        assert_eq!(map.replacement("た"), Some("c"));
        assert_eq!(map.replacement("ち"), Some("b"));
    }

    #[test]
    fn test_null_title_leaves_only_its_slot_empty() {
        let sections = crate::data::parse_sections(
            r#"[{"code": "A", "section_name": "自社", "items": [{"title": "1"}, {"title": null}, {"title": "3"}]}]"#,
            std::path::Path::new("data.json"),
        )
        .unwrap();
        let map = PlaceholderMap::build(&sections, "X");

        assert_eq!(map.replacement("企業"), Some("自社"));
        assert_eq!(map.replacement("あ"), Some("1"));
        assert_eq!(map.replacement("い"), None);
        assert_eq!(map.replacement("う"), Some("3"));
    }

    #[test]
    fn test_code_lookup() {
        assert_eq!(SectionCode::parse("C"), Some(SectionCode::C));
        assert_eq!(SectionCode::parse("c"), None);
        assert_eq!(SectionCode::E.slots().title, "グロ");
        assert_eq!(SectionCode::D.slots().trends, ["十三", "十四", "十五"]);
    }
}

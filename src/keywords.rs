use std::collections::BTreeSet;
use std::fmt;

use jieba_rs::{Jieba, KeywordExtract, TfIdf};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);
static TFIDF: Lazy<TfIdf> = Lazy::new(TfIdf::default);

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeywordCategory {
    Offense,
    Creativity,
    Defense,
    Efficiency,
    Technique,
    Stamina,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 6] = [
        KeywordCategory::Offense,
        KeywordCategory::Creativity,
        KeywordCategory::Defense,
        KeywordCategory::Efficiency,
        KeywordCategory::Technique,
        KeywordCategory::Stamina,
    ];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            KeywordCategory::Offense => &[
                "goals", "进球", "射门", "得分", "前锋", "attack", "scoring", "finishing",
                "striker", "shooting",
            ],
            KeywordCategory::Creativity => &[
                "assists", "传球", "助攻", "组织", "视野", "中场", "chances_created", "creativ",
                "playmak", "vision", "passing",
            ],
            KeywordCategory::Defense => &[
                "yellow_cards", "red_cards", "headers_won", "后卫", "门将", "防守", "defen", "tackl",
                "steel", "aerial",
            ],
            KeywordCategory::Efficiency => &[
                "pass_success_rate", "效率", "转化率", "成功率", "efficien", "conversion",
                "accuracy",
            ],
            KeywordCategory::Technique => &[
                "rating", "技术", "控球", "盘带", "过人", "techni", "dribbl", "skill",
                "control",
            ],
            KeywordCategory::Stamina => &[
                "minutes_played", "体能", "速度", "耐力", "力量", "stamina", "fitness",
                "endurance", "strength", "pace", "speed",
            ],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeywordCategory::Offense => "Offense",
            KeywordCategory::Creativity => "Creativity",
            KeywordCategory::Defense => "Defense",
            KeywordCategory::Efficiency => "Efficiency",
            KeywordCategory::Technique => "Technique",
            KeywordCategory::Stamina => "Stamina",
        }
    }

    pub fn matches(self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.aliases().iter().any(|alias| keyword.contains(alias))
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor {
    top_k: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl KeywordExtractor {
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k: top_k.max(1),
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn candidates(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        TFIDF
            .extract_keywords(&JIEBA, text, self.top_k, Vec::new())
            .into_iter()
            .map(|k| k.keyword)
            .collect()
    }

    pub fn categories(&self, text: &str) -> BTreeSet<KeywordCategory> {
        categories_for_keywords(&self.candidates(text))
    }
}

pub fn categories_for_keywords<S: AsRef<str>>(keywords: &[S]) -> BTreeSet<KeywordCategory> {
    let mut out = BTreeSet::new();
    for keyword in keywords {
        for category in KeywordCategory::ALL {
            if category.matches(keyword.as_ref()) {
                out.insert(category);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_has_no_keywords() {
        let ex = KeywordExtractor::default();
        assert!(ex.candidates("").is_empty());
        assert!(ex.categories("   \n").is_empty());
    }

    #[test]
    fn keyword_mapping_uses_substring_containment() {
        let cats = categories_for_keywords(&["射门效率", "Creativity"]);
        assert!(cats.contains(&KeywordCategory::Offense));
        assert!(cats.contains(&KeywordCategory::Efficiency));
        assert!(cats.contains(&KeywordCategory::Creativity));
        assert!(!cats.contains(&KeywordCategory::Stamina));
    }

    #[test]
    fn one_keyword_can_hit_several_categories() {
        let cats = categories_for_keywords(&["传球成功率"]);
        assert_eq!(
            cats.into_iter().collect::<Vec<_>>(),
            vec![KeywordCategory::Creativity, KeywordCategory::Efficiency]
        );
    }

    #[test]
    fn candidates_are_capped() {
        let ex = KeywordExtractor::new(2);
        let words = ex.candidates("需要更多进球和射门效率以及更好的防守和体能");
        assert!(words.len() <= 2);
    }

    #[test]
    fn extraction_is_deterministic() {
        let ex = KeywordExtractor::default();
        let text = "需要更多进球和射门效率";
        assert_eq!(ex.categories(text), ex.categories(text));
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
    #[default]
    Unknown,
}

// Exact matches on the upper-cased token: short codes plus the canonical labels.
const CODE_TABLE: &[(&str, Position)] = &[
    ("ST", Position::Forward),
    ("CF", Position::Forward),
    ("LW", Position::Forward),
    ("RW", Position::Forward),
    ("SS", Position::Forward),
    ("FW", Position::Forward),
    ("CAM", Position::Midfielder),
    ("CM", Position::Midfielder),
    ("CDM", Position::Midfielder),
    ("LM", Position::Midfielder),
    ("RM", Position::Midfielder),
    ("AM", Position::Midfielder),
    ("DM", Position::Midfielder),
    ("MF", Position::Midfielder),
    ("CB", Position::Defender),
    ("LB", Position::Defender),
    ("RB", Position::Defender),
    ("LWB", Position::Defender),
    ("RWB", Position::Defender),
    ("DF", Position::Defender),
    ("GK", Position::Goalkeeper),
    ("FORWARD", Position::Forward),
    ("MIDFIELDER", Position::Midfielder),
    ("DEFENDER", Position::Defender),
    ("GOALKEEPER", Position::Goalkeeper),
];

// Substring matches on the lower-cased label, checked in order. 前卫 sits
// before 卫 so wide midfielders do not fall into the defender bucket.
const LABEL_TABLE: &[(&str, Position)] = &[
    ("门将", Position::Goalkeeper),
    ("守门", Position::Goalkeeper),
    ("keeper", Position::Goalkeeper),
    ("锋", Position::Forward),
    ("forward", Position::Forward),
    ("striker", Position::Forward),
    ("winger", Position::Forward),
    ("attacker", Position::Forward),
    ("前卫", Position::Midfielder),
    ("中场", Position::Midfielder),
    ("腰", Position::Midfielder),
    ("midfield", Position::Midfielder),
    ("后卫", Position::Defender),
    ("卫", Position::Defender),
    ("defender", Position::Defender),
    ("back", Position::Defender),
];

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Forward,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
        Position::Unknown,
    ];

    pub fn from_label(raw: &str) -> Position {
        let s = raw.trim();
        if s.is_empty() {
            return Position::Unknown;
        }
        let upper = s.to_ascii_uppercase();
        if let Some((_, pos)) = CODE_TABLE.iter().find(|(code, _)| *code == upper) {
            return *pos;
        }
        let lower = s.to_lowercase();
        LABEL_TABLE
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, pos)| *pos)
            .unwrap_or(Position::Unknown)
    }

    pub fn parse_filter(raw: &str) -> Option<Position> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Position::from_label(raw))
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
            Position::Unknown => "Unknown",
        }
    }

    pub fn label_zh(self) -> &'static str {
        match self {
            Position::Forward => "前锋",
            Position::Midfielder => "中场",
            Position::Defender => "后卫",
            Position::Goalkeeper => "门将",
            Position::Unknown => "未知",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_codes_map_case_insensitively() {
        assert_eq!(Position::from_label("st"), Position::Forward);
        assert_eq!(Position::from_label(" CDM "), Position::Midfielder);
        assert_eq!(Position::from_label("rwb"), Position::Defender);
        assert_eq!(Position::from_label("GK"), Position::Goalkeeper);
    }

    #[test]
    fn chinese_labels_map_by_containment() {
        assert_eq!(Position::from_label("中锋"), Position::Forward);
        assert_eq!(Position::from_label("二前锋"), Position::Forward);
        assert_eq!(Position::from_label("左边锋"), Position::Forward);
        assert_eq!(Position::from_label("后腰"), Position::Midfielder);
        assert_eq!(Position::from_label("右前卫"), Position::Midfielder);
        assert_eq!(Position::from_label("中后卫"), Position::Defender);
        assert_eq!(Position::from_label("左后卫"), Position::Defender);
        assert_eq!(Position::from_label("门将"), Position::Goalkeeper);
    }

    #[test]
    fn unrecognized_or_blank_is_unknown() {
        assert_eq!(Position::from_label(""), Position::Unknown);
        assert_eq!(Position::from_label("   "), Position::Unknown);
        assert_eq!(Position::from_label("coach"), Position::Unknown);
    }

    #[test]
    fn mapping_is_idempotent() {
        for pos in Position::ALL {
            assert_eq!(Position::from_label(pos.label()), pos);
            assert_eq!(Position::from_label(pos.label_zh()), pos);
        }
    }

    #[test]
    fn blank_filter_means_no_filter() {
        assert_eq!(Position::parse_filter(""), None);
        assert_eq!(Position::parse_filter("前锋"), Some(Position::Forward));
    }
}

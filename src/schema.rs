use crate::error::{SchemaValidationError, TableKind};
use crate::table::RawTable;

#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    pub kind: TableKind,
    pub fields: &'static [FieldAliases],
    pub required: &'static [&'static str],
}

pub mod team_fields {
    pub const TEAM_NAME: &str = "team_name";
    pub const GOALS: &str = "goals";
    pub const SHOTS: &str = "shots";
    pub const CONVERSION_RATE: &str = "conversion_rate";
    pub const KEY_PASSES: &str = "key_passes";
    pub const GOALS_CONCEDED: &str = "goals_conceded";
}

pub mod player_fields {
    pub const PLAYER_NAME: &str = "player_name";
    pub const CLUB_NAME: &str = "club_name";
    pub const AGE: &str = "age";
    pub const POSITION: &str = "position";
    pub const MATCHES_PLAYED: &str = "matches_played";
    pub const MINUTES_PLAYED: &str = "minutes_played";
    pub const GOALS: &str = "goals";
    pub const ASSISTS: &str = "assists";
    pub const YELLOW_CARDS: &str = "yellow_cards";
    pub const RED_CARDS: &str = "red_cards";
    pub const PASS_SUCCESS_RATE: &str = "pass_success_rate";
    pub const CHANCES_CREATED: &str = "chances_created";
    pub const HEADERS_WON: &str = "headers_won";
    pub const RATING: &str = "rating";
    pub const MARKET_VALUE: &str = "market_value";
    pub const TACKLES: &str = "tackles";
    pub const INTERCEPTIONS: &str = "interceptions";
    pub const CLEARANCES: &str = "clearances";
    pub const BLOCKS: &str = "blocks";
}

const TEAM_FIELDS: &[FieldAliases] = &[
    FieldAliases {
        canonical: team_fields::TEAM_NAME,
        aliases: &["球队", "Team", "team", "编码名称", "球队名称"],
    },
    FieldAliases {
        canonical: team_fields::GOALS,
        aliases: &["进球", "Goals", "goals", "进球数"],
    },
    FieldAliases {
        canonical: team_fields::SHOTS,
        aliases: &["射门", "Shots", "shots", "射门次数"],
    },
    FieldAliases {
        canonical: team_fields::CONVERSION_RATE,
        aliases: &["进球转化率", "Conversion Rate", "conversion_rate", "转化率"],
    },
    FieldAliases {
        canonical: team_fields::KEY_PASSES,
        aliases: &["关键传球", "Key Passes", "key_passes", "关键传球次数"],
    },
    FieldAliases {
        canonical: team_fields::GOALS_CONCEDED,
        aliases: &["失球", "Goals Conceded", "goals_conceded", "失球数"],
    },
];

const PLAYER_FIELDS: &[FieldAliases] = &[
    FieldAliases {
        canonical: player_fields::PLAYER_NAME,
        aliases: &["球员", "姓名", "Player", "player", "Name", "name"],
    },
    FieldAliases {
        canonical: player_fields::CLUB_NAME,
        aliases: &["俱乐部", "Club", "club", "球队"],
    },
    FieldAliases {
        canonical: player_fields::AGE,
        aliases: &["年龄", "Age"],
    },
    FieldAliases {
        canonical: player_fields::POSITION,
        aliases: &["位置", "Position", "pos", "Pos"],
    },
    FieldAliases {
        canonical: player_fields::MATCHES_PLAYED,
        aliases: &["出场", "出场次数", "Matches", "Apps", "appearances"],
    },
    FieldAliases {
        canonical: player_fields::MINUTES_PLAYED,
        aliases: &["上场时间", "出场时间", "Minutes", "minutes"],
    },
    FieldAliases {
        canonical: player_fields::GOALS,
        aliases: &["进球", "Goals"],
    },
    FieldAliases {
        canonical: player_fields::ASSISTS,
        aliases: &["助攻", "Assists"],
    },
    FieldAliases {
        canonical: player_fields::YELLOW_CARDS,
        aliases: &["黄牌", "Yellow Cards", "yellow"],
    },
    FieldAliases {
        canonical: player_fields::RED_CARDS,
        aliases: &["红牌", "Red Cards", "red"],
    },
    FieldAliases {
        canonical: player_fields::PASS_SUCCESS_RATE,
        aliases: &["传球成功率", "Pass Success", "Pass Success Rate", "pass_accuracy"],
    },
    FieldAliases {
        canonical: player_fields::CHANCES_CREATED,
        aliases: &["创造机会", "Chances Created"],
    },
    FieldAliases {
        canonical: player_fields::HEADERS_WON,
        aliases: &["争顶成功", "头球争顶", "Aerials Won", "aerials_won"],
    },
    FieldAliases {
        canonical: player_fields::RATING,
        aliases: &["评分", "Rating"],
    },
    FieldAliases {
        canonical: player_fields::MARKET_VALUE,
        aliases: &["身价", "Market Value", "value"],
    },
    FieldAliases {
        canonical: player_fields::TACKLES,
        aliases: &["抢断", "Tackles"],
    },
    FieldAliases {
        canonical: player_fields::INTERCEPTIONS,
        aliases: &["拦截", "Interceptions"],
    },
    FieldAliases {
        canonical: player_fields::CLEARANCES,
        aliases: &["解围", "Clearances"],
    },
    FieldAliases {
        canonical: player_fields::BLOCKS,
        aliases: &["封堵", "Blocks"],
    },
];

pub const TEAM_ALIASES: AliasTable = AliasTable {
    kind: TableKind::Teams,
    fields: TEAM_FIELDS,
    required: &[
        team_fields::TEAM_NAME,
        team_fields::GOALS,
        team_fields::SHOTS,
        team_fields::CONVERSION_RATE,
        team_fields::KEY_PASSES,
        team_fields::GOALS_CONCEDED,
    ],
};

pub const PLAYER_ALIASES: AliasTable = AliasTable {
    kind: TableKind::Players,
    fields: PLAYER_FIELDS,
    required: &[
        player_fields::PLAYER_NAME,
        player_fields::CLUB_NAME,
        player_fields::POSITION,
    ],
};

pub fn normalize_columns(
    mut table: RawTable,
    aliases: &AliasTable,
) -> Result<RawTable, SchemaValidationError> {
    rename_aliases(&mut table, aliases);
    check_required(&table, aliases)?;
    Ok(table)
}

/// An existing canonical column wins over every alias.
pub fn rename_aliases(table: &mut RawTable, aliases: &AliasTable) {
    for field in aliases.fields {
        if table.has_column(field.canonical) {
            continue;
        }
        for alias in field.aliases {
            if table.rename_column(alias, field.canonical) {
                break;
            }
        }
    }
}

pub fn check_required(table: &RawTable, aliases: &AliasTable) -> Result<(), SchemaValidationError> {
    let missing: Vec<String> = aliases
        .required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError {
            table: aliases.kind,
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chinese_team_table() -> RawTable {
        RawTable::from_parts(
            &["球队", "进球", "射门", "转化率", "关键传球", "失球数"],
            vec![vec!["Alpha", "10", "100", "0.1", "50", "5"]],
        )
    }

    #[test]
    fn renames_chinese_team_columns() {
        let table = normalize_columns(chinese_team_table(), &TEAM_ALIASES).unwrap();
        assert_eq!(
            table.columns,
            vec![
                "team_name",
                "goals",
                "shots",
                "conversion_rate",
                "key_passes",
                "goals_conceded"
            ]
        );
        assert_eq!(table.rows, chinese_team_table().rows);
    }

    #[test]
    fn first_listed_alias_wins() {
        let table = RawTable::from_parts(&["Team", "球队名称"], vec![vec!["a", "b"]]);
        let mut table = table;
        rename_aliases(&mut table, &TEAM_ALIASES);
        assert_eq!(table.columns, vec!["team_name", "球队名称"]);
    }

    #[test]
    fn reports_all_missing_fields() {
        let table = RawTable::from_parts(&["Team", "Goals"], Vec::<Vec<String>>::new());
        let err = normalize_columns(table, &TEAM_ALIASES).unwrap_err();
        assert_eq!(
            err.missing,
            vec!["shots", "conversion_rate", "key_passes", "goals_conceded"]
        );
        assert_eq!(err.table, TableKind::Teams);
    }

    #[test]
    fn canonical_table_is_unchanged() {
        let once = normalize_columns(chinese_team_table(), &TEAM_ALIASES).unwrap();
        let twice = normalize_columns(once.clone(), &TEAM_ALIASES).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn player_table_needs_identity_columns_only() {
        let table = RawTable::from_parts(&["球员", "俱乐部", "位置"], vec![vec!["A", "B", "ST"]]);
        let table = normalize_columns(table, &PLAYER_ALIASES).unwrap();
        assert_eq!(table.columns, vec!["player_name", "club_name", "position"]);
    }
}

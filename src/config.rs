use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::keywords::DEFAULT_TOP_K;
use crate::recommender::DEFAULT_TOP_N;

pub const DEFAULT_PLAYERS_TABLE: &str = "football_players";

// Flags that stand in for the matching environment variable.
const FLAG_VARS: [(&str, &str); 8] = [
    ("players", "SCOUT_PLAYERS_PATH"),
    ("teams", "SCOUT_TEAMS_PATH"),
    ("sqlite", "SCOUT_SQLITE_PATH"),
    ("players-table", "SCOUT_PLAYERS_TABLE"),
    ("teams-table", "SCOUT_TEAMS_TABLE"),
    ("demo", "SCOUT_DEMO_SEED"),
    ("top", "SCOUT_TOP_N"),
    ("keywords", "SCOUT_KEYWORD_TOP_K"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub flags: HashMap<String, String>,
    pub positional: Vec<String>,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::split(args.into_iter().map(Into::into).collect(), false)
    }

    // The last argument is always free text, never a flag value.
    pub fn parse_with_text<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::split(args.into_iter().map(Into::into).collect(), true)
    }

    fn split(args: Vec<String>, keep_last: bool) -> Self {
        let mut out = CliArgs::default();
        let mut idx = 0;
        while idx < args.len() {
            let arg = &args[idx];
            idx += 1;
            let Some(flag) = arg.strip_prefix("--") else {
                out.positional.push(arg.clone());
                continue;
            };
            if let Some((name, value)) = flag.split_once('=') {
                out.flags.insert(name.to_string(), value.trim().to_string());
                continue;
            }
            let takes_next = args.get(idx).is_some_and(|next| {
                !next.starts_with("--") && !(keep_last && idx + 1 == args.len())
            });
            if takes_next {
                out.flags.insert(flag.to_string(), args[idx].trim().to_string());
                idx += 1;
            } else {
                out.flags.insert(flag.to_string(), String::new());
            }
        }
        out
    }

    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Json {
        players_path: PathBuf,
        teams_path: Option<PathBuf>,
    },
    Sqlite {
        db_path: PathBuf,
        players_table: String,
        teams_table: Option<String>,
    },
    Demo {
        seed: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: DataSource,
    pub top_n: usize,
    pub keyword_top_k: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_args_and_env(args: &CliArgs) -> Result<Self> {
        Self::from_lookup(|key| {
            FLAG_VARS
                .iter()
                .find(|(_, var)| *var == key)
                .and_then(|(flag, _)| args.flag(flag))
                .map(str::to_string)
                .or_else(|| std::env::var(key).ok())
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = if let Some(seed) = get("SCOUT_DEMO_SEED") {
            DataSource::Demo {
                seed: seed.trim().parse().unwrap_or(0),
            }
        } else if let Some(db) = get("SCOUT_SQLITE_PATH") {
            DataSource::Sqlite {
                db_path: PathBuf::from(db),
                players_table: get("SCOUT_PLAYERS_TABLE")
                    .unwrap_or_else(|| DEFAULT_PLAYERS_TABLE.to_string()),
                teams_table: get("SCOUT_TEAMS_TABLE"),
            }
        } else if let Some(players) = get("SCOUT_PLAYERS_PATH") {
            DataSource::Json {
                players_path: PathBuf::from(players),
                teams_path: get("SCOUT_TEAMS_PATH").map(PathBuf::from),
            }
        } else {
            return Err(anyhow!(
                "no data source configured (set SCOUT_PLAYERS_PATH, SCOUT_SQLITE_PATH or SCOUT_DEMO_SEED)"
            ));
        };

        let top_n = get("SCOUT_TOP_N")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_TOP_N)
            .max(1);
        let keyword_top_k = get("SCOUT_KEYWORD_TOP_K")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_TOP_K)
            .max(1);

        Ok(Self {
            source,
            top_n,
            keyword_top_k,
        })
    }
}

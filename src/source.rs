use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use tracing::info;

use crate::config::{AppConfig, DataSource};
use crate::ingest;
use crate::records::{PlayerRecord, TeamRecord};
use crate::table::RawTable;

pub fn load_json_table(path: &Path) -> Result<RawTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read table file {}", path.display()))?;
    RawTable::from_json_records(&raw).with_context(|| format!("parse table file {}", path.display()))
}

pub fn open_db(path: &Path) -> Result<Connection> {
    Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))
}

pub fn load_sqlite_table(conn: &Connection, table: &str) -> Result<RawTable> {
    if !is_identifier(table) {
        return Err(anyhow!("invalid table name {table:?}"));
    }
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {table}"))
        .with_context(|| format!("prepare query for {table}"))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();

    let mut out = RawTable::new(columns);
    let mut rows = stmt.query([]).with_context(|| format!("query {table}"))?;
    while let Some(row) = rows.next().with_context(|| format!("read row from {table}"))? {
        let mut cells = Vec::with_capacity(width);
        for idx in 0..width {
            cells.push(value_text(row.get_ref(idx)?));
        }
        out.rows.push(cells);
    }
    Ok(out)
}

fn value_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn load_tables(cfg: &AppConfig) -> Result<(Vec<PlayerRecord>, Vec<TeamRecord>)> {
    let (players_raw, teams_raw) = match &cfg.source {
        DataSource::Json {
            players_path,
            teams_path,
        } => {
            let players = load_json_table(players_path)?;
            let teams = match teams_path {
                Some(path) => Some(load_json_table(path)?),
                None => None,
            };
            (players, teams)
        }
        DataSource::Sqlite {
            db_path,
            players_table,
            teams_table,
        } => {
            let conn = open_db(db_path)?;
            let players = load_sqlite_table(&conn, players_table)?;
            let teams = match teams_table {
                Some(table) => Some(load_sqlite_table(&conn, table)?),
                None => None,
            };
            (players, teams)
        }
        DataSource::Demo { seed } => {
            let league = crate::fake_data::demo_league(*seed);
            return Ok((league.players, league.teams));
        }
    };

    let players = ingest::players_from_table(players_raw)?.records;
    let teams = match teams_raw {
        Some(raw) => ingest::teams_from_table(raw)?.records,
        None => Vec::new(),
    };
    info!(players = players.len(), teams = teams.len(), "loaded tables");
    Ok((players, teams))
}

use tracing::{info, warn};

use crate::error::{DataQualityWarning, SchemaValidationError, TableKind};
use crate::metrics::{self, DefensiveWeights, finite_or_zero};
use crate::position::Position;
use crate::records::{PlayerRecord, TeamRecord};
use crate::schema::{self, PLAYER_ALIASES, TEAM_ALIASES, player_fields as pf, team_fields as tf};
use crate::table::{RawTable, parse_fraction, parse_number};

#[derive(Debug, Clone)]
pub struct IngestOutcome<T> {
    pub records: Vec<T>,
    pub warnings: Vec<DataQualityWarning>,
}

enum Cell {
    Blank,
    Value(f64),
    Malformed,
}

struct CellReader<'a> {
    table: &'a RawTable,
    warnings: Vec<DataQualityWarning>,
}

impl<'a> CellReader<'a> {
    fn new(table: &'a RawTable) -> Self {
        Self {
            table,
            warnings: Vec::new(),
        }
    }

    fn text(&self, row: usize, col: Option<usize>) -> String {
        col.and_then(|c| self.table.cell(row, c))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn read(&self, row: usize, col: usize, parse: fn(&str) -> Option<f64>) -> Cell {
        let raw = self.table.cell(row, col).unwrap_or("");
        if raw.trim().is_empty() {
            return Cell::Blank;
        }
        match parse(raw) {
            Some(v) => Cell::Value(v),
            None => Cell::Malformed,
        }
    }

    fn note(&mut self, row: usize, col: usize) {
        self.warnings.push(DataQualityWarning {
            row,
            column: self.table.columns[col].clone(),
            raw: self.table.cell(row, col).unwrap_or("").to_string(),
        });
    }

    fn optional(&mut self, row: usize, col: Option<usize>) -> Option<f64> {
        let col = col?;
        match self.read(row, col, parse_number) {
            Cell::Blank => None,
            Cell::Value(v) => Some(v),
            Cell::Malformed => {
                self.note(row, col);
                Some(0.0)
            }
        }
    }

    fn required(&mut self, row: usize, col: Option<usize>) -> f64 {
        let Some(col) = col else { return 0.0 };
        match self.read(row, col, parse_number) {
            Cell::Value(v) => v,
            Cell::Blank | Cell::Malformed => {
                self.note(row, col);
                0.0
            }
        }
    }
}

pub fn players_from_table(
    raw: RawTable,
) -> Result<IngestOutcome<PlayerRecord>, SchemaValidationError> {
    let table = schema::normalize_columns(raw, &PLAYER_ALIASES)?;
    let mut outcome = build_players(&table);
    let weights = DefensiveWeights::detect(&outcome.records);
    metrics::derive_metrics(&mut outcome.records, &weights);
    log_outcome(TableKind::Players, &outcome);
    Ok(outcome)
}

pub fn teams_from_table(raw: RawTable) -> Result<IngestOutcome<TeamRecord>, SchemaValidationError> {
    let table = schema::normalize_columns(raw, &TEAM_ALIASES)?;
    let outcome = build_teams(&table);
    log_outcome(TableKind::Teams, &outcome);
    Ok(outcome)
}

fn build_players(table: &RawTable) -> IngestOutcome<PlayerRecord> {
    let col = |name: &str| table.column_index(name);
    let name = col(pf::PLAYER_NAME);
    let club = col(pf::CLUB_NAME);
    let age = col(pf::AGE);
    let position = col(pf::POSITION);
    let matches_played = col(pf::MATCHES_PLAYED);
    let minutes_played = col(pf::MINUTES_PLAYED);
    let goals = col(pf::GOALS);
    let assists = col(pf::ASSISTS);
    let yellow_cards = col(pf::YELLOW_CARDS);
    let red_cards = col(pf::RED_CARDS);
    let pass_success_rate = col(pf::PASS_SUCCESS_RATE);
    let chances_created = col(pf::CHANCES_CREATED);
    let headers_won = col(pf::HEADERS_WON);
    let rating = col(pf::RATING);
    let market_value = col(pf::MARKET_VALUE);
    let tackles = col(pf::TACKLES);
    let interceptions = col(pf::INTERCEPTIONS);
    let clearances = col(pf::CLEARANCES);
    let blocks = col(pf::BLOCKS);

    let mut reader = CellReader::new(table);
    let mut records = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let position_raw = reader.text(row, position);
        records.push(PlayerRecord {
            name: reader.text(row, name),
            club: reader.text(row, club),
            age: reader
                .optional(row, age)
                .filter(|v| *v >= 0.0)
                .map(|v| v.round() as u32),
            position: Position::from_label(&position_raw),
            position_raw,
            matches_played: reader.optional(row, matches_played),
            minutes_played: reader.optional(row, minutes_played),
            goals: reader.optional(row, goals),
            assists: reader.optional(row, assists),
            yellow_cards: reader.optional(row, yellow_cards),
            red_cards: reader.optional(row, red_cards),
            pass_success_rate: reader.optional(row, pass_success_rate),
            chances_created: reader.optional(row, chances_created),
            headers_won: reader.optional(row, headers_won),
            rating: reader.optional(row, rating),
            market_value: reader.optional(row, market_value),
            tackles: reader.optional(row, tackles),
            interceptions: reader.optional(row, interceptions),
            clearances: reader.optional(row, clearances),
            blocks: reader.optional(row, blocks),
            ..Default::default()
        });
    }

    IngestOutcome {
        records,
        warnings: reader.warnings,
    }
}

fn build_teams(table: &RawTable) -> IngestOutcome<TeamRecord> {
    let col = |name: &str| table.column_index(name);
    let team_name = col(tf::TEAM_NAME);
    let goals = col(tf::GOALS);
    let shots = col(tf::SHOTS);
    let conversion_rate = col(tf::CONVERSION_RATE);
    let key_passes = col(tf::KEY_PASSES);
    let goals_conceded = col(tf::GOALS_CONCEDED);

    let mut reader = CellReader::new(table);
    let mut records = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let goals_v = reader.required(row, goals);
        let shots_v = reader.required(row, shots);
        // Blank or malformed conversion cells are re-derived from goals/shots.
        let conversion = match conversion_rate.map(|c| (c, reader.read(row, c, parse_fraction))) {
            Some((_, Cell::Value(v))) => v,
            Some((c, Cell::Malformed)) => {
                reader.note(row, c);
                derived_conversion(goals_v, shots_v)
            }
            _ => derived_conversion(goals_v, shots_v),
        };
        records.push(TeamRecord {
            team_name: reader.text(row, team_name),
            goals: goals_v,
            shots: shots_v,
            conversion_rate: conversion,
            key_passes: reader.required(row, key_passes),
            goals_conceded: reader.required(row, goals_conceded),
        });
    }

    IngestOutcome {
        records,
        warnings: reader.warnings,
    }
}

fn derived_conversion(goals: f64, shots: f64) -> f64 {
    if shots > 0.0 {
        finite_or_zero(goals / shots)
    } else {
        0.0
    }
}

fn log_outcome<T>(kind: TableKind, outcome: &IngestOutcome<T>) {
    info!(table = %kind, rows = outcome.records.len(), "ingested table");
    if !outcome.warnings.is_empty() {
        warn!(
            table = %kind,
            coerced = outcome.warnings.len(),
            first = %outcome.warnings[0],
            "repaired malformed numeric cells"
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::position::Position;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub club: String,
    pub age: Option<u32>,
    pub position_raw: String,
    pub position: Position,
    pub matches_played: Option<f64>,
    pub minutes_played: Option<f64>,
    pub goals: Option<f64>,
    pub assists: Option<f64>,
    pub yellow_cards: Option<f64>,
    pub red_cards: Option<f64>,
    pub pass_success_rate: Option<f64>,
    pub chances_created: Option<f64>,
    pub headers_won: Option<f64>,
    pub rating: Option<f64>,
    pub market_value: Option<f64>,
    pub tackles: Option<f64>,
    pub interceptions: Option<f64>,
    pub clearances: Option<f64>,
    pub blocks: Option<f64>,
    pub goals_per_minute: f64,
    pub assists_per_minute: f64,
    pub defensive_contribution: f64,
}

impl PlayerRecord {
    pub fn new(name: &str, club: &str, position_label: &str) -> Self {
        Self {
            name: name.to_string(),
            club: club.to_string(),
            position_raw: position_label.to_string(),
            position: Position::from_label(position_label),
            ..Default::default()
        }
    }

    pub fn has_defensive_actions(&self) -> bool {
        self.tackles.is_some()
            || self.interceptions.is_some()
            || self.clearances.is_some()
            || self.blocks.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_name: String,
    pub goals: f64,
    pub shots: f64,
    /// Fraction of shots converted (0.10 == 10%).
    pub conversion_rate: f64,
    pub key_passes: f64,
    pub goals_conceded: f64,
}

impl TeamRecord {
    pub fn new(
        team_name: &str,
        goals: f64,
        shots: f64,
        conversion_rate: f64,
        key_passes: f64,
        goals_conceded: f64,
    ) -> Self {
        Self {
            team_name: team_name.to_string(),
            goals,
            shots,
            conversion_rate,
            key_passes,
            goals_conceded,
        }
    }
}
